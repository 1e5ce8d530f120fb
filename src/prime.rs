//! Prime sizing helpers shared by both map implementations.
//!
//! Table capacities are kept prime to spread probe sequences and bucket
//! assignments; these functions compute the capacities the maps grow to.

/// Determines whether `n` is a prime number by trial division.
#[must_use]
#[allow(clippy::arithmetic_side_effects)]
pub fn is_prime(n: usize) -> bool {
    if n == 2 || n == 3 {
        return true;
    }

    if n < 2 || n % 2 == 0 {
        return false;
    }

    // Only odd factors up to sqrt(n) need checking
    let mut factor: usize = 3;
    while factor.saturating_mul(factor) <= n {
        if n % factor == 0 {
            return false;
        }
        factor = factor.saturating_add(2);
    }

    true
}

/// Returns the first prime at or above `n`, scanning odd candidates only.
///
/// Even inputs are bumped to the next odd number before the scan, so the
/// result is never 2; callers that need a capacity of exactly 2 special-case
/// it at the resize site instead of relying on this function.
#[must_use]
pub fn next_prime(n: usize) -> usize {
    let mut candidate = if n % 2 == 0 { n.saturating_add(1) } else { n };

    while !is_prime(candidate) {
        candidate = candidate.saturating_add(2);
    }

    candidate
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_prime() {
        assert!(!is_prime(0));
        assert!(!is_prime(1));
        assert!(is_prime(2));
        assert!(is_prime(3));
        assert!(!is_prime(4));
        assert!(is_prime(5));
        assert!(!is_prime(9));
        assert!(is_prime(23));
        assert!(!is_prime(25));
        assert!(is_prime(97));
        assert!(!is_prime(221));
        assert!(is_prime(223));
        // Deep factor walks: 10_403 is 101 * 103
        assert!(is_prime(10_007));
        assert!(!is_prime(10_403));
    }

    #[test]
    fn test_next_prime_rounds_up() {
        assert_eq!(next_prime(0), 3);
        assert_eq!(next_prime(1), 3);
        assert_eq!(next_prime(20), 23);
        assert_eq!(next_prime(30), 31);
        assert_eq!(next_prime(106), 107);
        assert_eq!(next_prime(226), 227);
    }

    #[test]
    fn test_next_prime_keeps_primes() {
        assert_eq!(next_prime(11), 11);
        assert_eq!(next_prime(23), 23);
        assert_eq!(next_prime(449), 449);
    }

    #[test]
    fn test_next_prime_skips_two() {
        assert_eq!(next_prime(2), 3);
    }
}
