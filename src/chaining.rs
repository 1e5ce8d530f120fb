use crate::hash::{self, HashFn};
use crate::prime::next_prime;
use std::mem;

/// A node in a bucket's singly linked list
#[derive(Debug, Clone)]
struct Node<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
    /// Next node in the same bucket
    next: Option<Box<Node<V>>>,
}

/// A hash table resolving collisions with separate chaining.
///
/// Each bucket holds a singly linked list with new keys linked at the head.
/// The capacity is prime (a resize to exactly 2 is the one documented
/// exception) and the table grows to double capacity before any insertion
/// attempted at load factor 1.0 or higher, keeping chains short under a
/// well-spread hash.
///
/// Note: this implementation is not thread-safe. For concurrent use, wrap it
/// in external synchronization.
#[derive(Debug, Clone)]
pub struct ChainingMap<V> {
    /// Bucket heads, one optional chain per slot
    buckets: Vec<Option<Box<Node<V>>>>,
    /// Current number of entries across all chains
    size: usize,
    /// Hash function applied to every key
    hash_fn: HashFn,
}

impl<V> Default for ChainingMap<V> {
    /// An 11-bucket map using [`hash::additive`]
    fn default() -> Self {
        Self::new(11, hash::additive)
    }
}

impl<V> Extend<(String, V)> for ChainingMap<V> {
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V> ChainingMap<V> {
    /// Creates an empty map with `initial_capacity` rounded up to a prime.
    #[must_use]
    pub fn new(initial_capacity: usize, hash_fn: HashFn) -> Self {
        let capacity = next_prime(initial_capacity);

        Self { buckets: (0..capacity).map(|_| None).collect(), size: 0, hash_fn }
    }

    /// Maps a key to its bucket index
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn bucket_index(&self, key: &str) -> usize {
        ((self.hash_fn)(key) % self.buckets.len() as u64) as usize
    }

    /// Walks the bucket for `key`, returning its value when present
    fn find(&self, key: &str) -> Option<&V> {
        let index = self.bucket_index(key);
        let mut cursor = self.buckets.get(index)?.as_deref();

        while let Some(node) = cursor {
            if node.key == key {
                return Some(&node.value);
            }
            cursor = node.next.as_deref();
        }

        None
    }

    /// Walks the bucket for `key`, returning its value slot when present
    fn find_mut(&mut self, key: &str) -> Option<&mut V> {
        let index = self.bucket_index(key);
        let mut cursor = self.buckets.get_mut(index)?;

        while let Some(node) = cursor {
            if node.key == key {
                return Some(&mut node.value);
            }
            cursor = &mut node.next;
        }

        None
    }

    /// Inserts or updates a key-value pair, returning the previous value
    /// when the key was present.
    ///
    /// The table grows to double capacity before the bucket walk whenever
    /// the load factor has reached 1.0, even when the call turns out to be
    /// an update. New keys are linked at the head of their bucket.
    pub fn put(&mut self, key: String, value: V) -> Option<V> {
        // Check if we need to resize
        if self.table_load() >= 1.0 {
            self.resize_table(self.buckets.len().saturating_mul(2));
        }

        if let Some(slot) = self.find_mut(&key) {
            return Some(mem::replace(slot, value));
        }

        let index = self.bucket_index(&key);
        if let Some(bucket) = self.buckets.get_mut(index) {
            let next = bucket.take();
            *bucket = Some(Box::new(Node { key, value, next }));
            self.size = self.size.saturating_add(1);
        }

        None
    }

    /// Returns a reference to the value stored for `key`
    pub fn get(&self, key: &str) -> Option<&V> {
        self.find(key)
    }

    /// Returns a mutable reference to the value stored for `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        self.find_mut(key)
    }

    /// Reports whether `key` currently maps to an entry
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Removes `key` from the map, unlinking its node from the chain.
    ///
    /// Removing a missing key is a no-op.
    pub fn remove(&mut self, key: &str) {
        let index = self.bucket_index(key);
        let Some(mut link) = self.buckets.get_mut(index) else {
            return;
        };

        while link.as_ref().is_some_and(|node| node.key != key) {
            match link {
                Some(node) => link = &mut node.next,
                None => return,
            }
        }

        if let Some(node) = link.take() {
            *link = node.next;
            self.size = self.size.saturating_sub(1);
        }
    }

    /// Rebuilds the table at a prime capacity of at least `new_capacity`.
    ///
    /// Silently ignored when `new_capacity` is below 1. Entries are
    /// re-inserted through `put`, so a target too small for the current size
    /// grows again mid-rebuild. Requesting exactly 2 produces the one
    /// non-prime capacity the table ever uses.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < 1 {
            return;
        }

        let mut fresh = Self::new(new_capacity, self.hash_fn);
        if new_capacity == 2 {
            fresh.buckets.pop();
        }

        for mut head in mem::take(&mut self.buckets) {
            // Every entry is moved once the counts match
            if fresh.size >= self.size {
                break;
            }
            while let Some(node) = head {
                let Node { key, value, next } = *node;
                head = next;
                fresh.put(key, value);
            }
        }

        self.buckets = fresh.buckets;
    }

    /// Rebuilds the table at exactly `new_capacity` buckets (primed to at
    /// least that many unless 2 is requested), relinking the existing nodes.
    ///
    /// Unlike [`Self::resize_table`] this never consults the load factor, so
    /// the result can sit above load 1.0. Silently ignored when
    /// `new_capacity` is below 1.
    pub fn harder_resize_table(&mut self, new_capacity: usize) {
        if new_capacity < 1 {
            return;
        }

        let capacity = if new_capacity == 2 { 2 } else { next_prime(new_capacity) };
        let old_buckets = mem::replace(&mut self.buckets, (0..capacity).map(|_| None).collect());

        let mut moved = 0;
        for mut head in old_buckets {
            if moved >= self.size {
                break;
            }
            while let Some(mut node) = head {
                head = node.next.take();
                let index = self.bucket_index(&node.key);
                if let Some(bucket) = self.buckets.get_mut(index) {
                    node.next = bucket.take();
                    *bucket = Some(node);
                    moved = moved.saturating_add(1);
                }
            }
        }
    }

    /// Returns the current load factor of the table
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.buckets.len() as f64
    }

    /// Counts the buckets holding no entries
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        self.buckets.iter().filter(|bucket| bucket.is_none()).count()
    }

    /// Collects every key-value pair in traversal order
    #[must_use]
    pub fn get_keys_and_values(&self) -> Vec<(&str, &V)> {
        self.iter().collect()
    }

    /// Drops every chain; capacity is unchanged
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            *bucket = None;
        }
        self.size = 0;
    }

    /// Returns the number of entries in the map
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of buckets in the table
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    /// Returns an iterator visiting buckets in slot order and each chain
    /// from its head.
    ///
    /// The iterator borrows the table, so the borrow checker rejects any
    /// mutation while it is alive; several iterators may run at once.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { buckets: &self.buckets, bucket: 0, node: None }
    }
}

/// Iterator over the key-value pairs of the map
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Buckets of the map being traversed
    buckets: &'a [Option<Box<Node<V>>>],
    /// Index of the next bucket to enter
    bucket: usize,
    /// Node the cursor is parked on within the current chain
    node: Option<&'a Node<V>>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.node {
                self.node = node.next.as_deref();
                return Some((node.key.as_str(), &node.value));
            }

            let head = self.buckets.get(self.bucket)?;
            self.bucket = self.bucket.saturating_add(1);
            self.node = head.as_deref();
        }
    }
}

/// Returns the most frequent values in `values` together with how often
/// they occur.
///
/// Ties all make it into the result, ordered the way the internal frequency
/// map happens to traverse them. An empty input yields an empty mode list
/// with frequency 0.
#[must_use]
pub fn find_mode(values: &[String]) -> (Vec<String>, usize) {
    let mut counts: ChainingMap<usize> = ChainingMap::default();

    for value in values {
        match counts.get_mut(value) {
            Some(count) => *count = count.saturating_add(1),
            None => {
                counts.put(value.clone(), 1);
            }
        }
    }

    let mut mode = Vec::new();
    let mut frequency = 0;

    for (value, &count) in counts.iter() {
        if count > frequency {
            frequency = count;
            mode = vec![value.to_string()];
        } else if count == frequency {
            mode.push(value.to_string());
        }
    }

    (mode, frequency)
}
