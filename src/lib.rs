//! # Prime Map
//!
//! A Rust implementation of string-keyed hash tables with prime capacities.
//!
//! This crate provides two hash map implementations:
//!
//! - `OpenAddressingMap`: an open addressing table with quadratic probing
//!   and tombstone deletion
//! - `ChainingMap`: a separate chaining table with a linked list per bucket
//!
//! Both implementations keep a prime number of slots, grow by doubling
//! before their load threshold is crossed, and take the hash function as a
//! plain `fn` pointer, so collision behavior is deterministic and easy to
//! steer in tests.
//!
//! ## Basic Usage
//!
//! ```rust
//! use primemap::{hash, OpenAddressingMap};
//!
//! // Create a map; the capacity rounds up to the next prime
//! let mut map = OpenAddressingMap::new(20, hash::additive);
//! assert_eq!(map.capacity(), 23);
//!
//! // Insert values
//! map.put("apple".to_string(), 1);
//! map.put("banana".to_string(), 2);
//!
//! // Retrieve and update values
//! assert_eq!(map.get("apple"), Some(&1));
//! map.put("apple".to_string(), 10);
//! assert_eq!(map.get("apple"), Some(&10));
//!
//! // Rebuild at a larger prime capacity
//! map.resize_table(30);
//! assert_eq!(map.capacity(), 31);
//!
//! // Remove values
//! map.remove("apple");
//! assert_eq!(map.get("apple"), None);
//! ```
//!
//! ## Separate Chaining
//!
//! ```rust
//! use primemap::{find_mode, ChainingMap};
//!
//! // The default configuration has 11 buckets and the additive hash
//! let mut map = ChainingMap::default();
//! map.put("apple".to_string(), 1);
//! assert_eq!(map.get("apple"), Some(&1));
//!
//! // find_mode reports the most frequent values in a slice
//! let fruit = ["apple", "banana", "apple", "cherry"].map(String::from);
//! let (mode, frequency) = find_mode(&fruit);
//! assert_eq!(mode, ["apple"]);
//! assert_eq!(frequency, 2);
//! ```

/// Module implementing a hash map resolving collisions by separate chaining
pub mod chaining;
/// Hash functions shared by both map implementations
pub mod hash;
/// Module implementing a hash map resolving collisions by quadratic probing
pub mod open_addressing;
/// Prime sizing helpers shared by both map implementations
pub mod prime;
/// Utility functions and traits for the hash maps
pub mod utils;

pub use chaining::{find_mode, ChainingMap};
pub use hash::HashFn;
pub use open_addressing::OpenAddressingMap;
pub use utils::MapExtensions;
