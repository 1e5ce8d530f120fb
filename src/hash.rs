//! Sample hash functions and the signature the maps accept.
//!
//! Both maps take their hash function as a plain function value at
//! construction time. The two functions here are intentionally simple (and
//! deliberately collision-prone) so collision handling is easy to exercise;
//! any `fn(&str) -> u64` works in their place.

/// Signature of the hash functions consumed by the maps.
pub type HashFn = fn(&str) -> u64;

/// Sums the Unicode scalar values of the key's characters.
#[must_use]
pub fn additive(key: &str) -> u64 {
    key.chars().fold(0, |hash, ch| hash.wrapping_add(u64::from(ch)))
}

/// Sums the key's characters weighted by their 1-based position.
///
/// Unlike [`additive`], this distinguishes anagrams of the same characters.
#[must_use]
pub fn positional(key: &str) -> u64 {
    key.chars().enumerate().fold(0, |hash, (index, ch)| {
        let weight = (index as u64).wrapping_add(1);
        hash.wrapping_add(weight.wrapping_mul(u64::from(ch)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_additive() {
        assert_eq!(additive(""), 0);
        assert_eq!(additive("abc"), 294);
        // Character order does not matter
        assert_eq!(additive("ab"), additive("ba"));
    }

    #[test]
    fn test_positional() {
        assert_eq!(positional(""), 0);
        assert_eq!(positional("abc"), 590);
        // Position weighting separates anagrams
        assert_ne!(positional("ab"), positional("ba"));
    }
}
