use crate::hash::HashFn;
use crate::prime::next_prime;
use std::{marker::PhantomData, mem};

/// A slot entry holding a key-value pair
#[derive(Debug, Clone)]
struct Entry<V> {
    /// The key in the key-value pair
    key: String,
    /// The value associated with the key
    value: V,
    /// Flag marking the entry as deleted while its slot stays occupied
    tombstone: bool,
}

/// Outcome of walking a key's quadratic probe sequence
enum Probe {
    /// Index of the slot already holding the key, live or tombstoned
    Match(usize),
    /// Index of the first never-used slot on the sequence
    Vacant(usize),
    /// Every reachable slot is occupied by other keys
    Saturated,
}

/// A hash table resolving collisions with quadratic probing.
///
/// Removed entries stay in their slots as tombstones until the next rebuild,
/// and probe sequences treat them as occupied, so heavy delete/insert
/// cycling lengthens the walks until a rebuild drops the tombstones. The
/// capacity is prime (a resize to exactly 2 is the one documented exception)
/// and the table grows to double capacity before any insertion attempted at
/// load factor 0.5 or higher.
///
/// Note: this implementation is not thread-safe. For concurrent use, wrap it
/// in external synchronization.
#[derive(Debug, Clone)]
pub struct OpenAddressingMap<V> {
    /// Flat table of slots holding live entries and tombstones
    slots: Vec<Option<Entry<V>>>,
    /// Current number of live (non-tombstone) entries
    size: usize,
    /// Hash function applied to every key
    hash_fn: HashFn,
}

impl<V> Extend<(String, V)> for OpenAddressingMap<V> {
    fn extend<T: IntoIterator<Item = (String, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<V> OpenAddressingMap<V> {
    /// Creates an empty map with `initial_capacity` rounded up to a prime.
    #[must_use]
    pub fn new(initial_capacity: usize, hash_fn: HashFn) -> Self {
        let capacity = next_prime(initial_capacity);

        Self { slots: (0..capacity).map(|_| None).collect(), size: 0, hash_fn }
    }

    /// Maps a key to its home slot index
    #[allow(clippy::arithmetic_side_effects, clippy::cast_possible_truncation)]
    fn bucket_index(&self, key: &str) -> usize {
        ((self.hash_fn)(key) % self.slots.len() as u64) as usize
    }

    /// Computes the `i`-th index of the probe sequence starting at `base`
    #[allow(clippy::arithmetic_side_effects)]
    fn probe_slot(base: usize, i: usize, capacity: usize) -> usize {
        base.wrapping_add(i.wrapping_mul(i)) % capacity
    }

    /// Walks the quadratic probe sequence for `key`.
    ///
    /// The walk inspects at most `capacity` slots, so a table saturated with
    /// tombstones reports `Saturated` instead of cycling forever.
    fn probe(&self, key: &str) -> Probe {
        let capacity = self.slots.len();
        let base = self.bucket_index(key);

        for i in 0..capacity {
            let index = Self::probe_slot(base, i, capacity);
            match self.slots.get(index) {
                // A never-used slot ends the sequence
                None | Some(None) => return Probe::Vacant(index),
                Some(Some(entry)) if entry.key == key => return Probe::Match(index),
                Some(Some(_)) => {}
            }
        }

        Probe::Saturated
    }

    /// Inserts or updates a key-value pair, returning the previous value
    /// when the key was live.
    ///
    /// The table grows to double capacity before probing whenever the load
    /// factor has reached 0.5, even when the call turns out to be an update.
    /// Re-inserting a tombstoned key revives its old slot and returns `None`
    /// because the key was logically absent.
    pub fn put(&mut self, key: String, value: V) -> Option<V> {
        // Check if we need to resize
        if self.table_load() >= 0.5 {
            self.resize_table(self.slots.len().saturating_mul(2));
        }

        match self.probe(&key) {
            Probe::Match(index) => {
                if let Some(Some(entry)) = self.slots.get_mut(index) {
                    if entry.tombstone {
                        entry.value = value;
                        entry.tombstone = false;
                        self.size = self.size.saturating_add(1);
                        None
                    } else {
                        Some(mem::replace(&mut entry.value, value))
                    }
                } else {
                    None
                }
            }
            Probe::Vacant(index) => {
                if let Some(slot) = self.slots.get_mut(index) {
                    *slot = Some(Entry { key, value, tombstone: false });
                    self.size = self.size.saturating_add(1);
                }
                None
            }
            Probe::Saturated => {
                // Tombstones cover the whole sequence; rebuilding drops them,
                // so the retry always finds a slot
                self.resize_table(self.slots.len().saturating_mul(2));
                self.put(key, value)
            }
        }
    }

    /// Returns a reference to the value stored for `key`
    pub fn get(&self, key: &str) -> Option<&V> {
        match self.probe(key) {
            Probe::Match(index) => match self.slots.get(index) {
                Some(Some(entry)) if !entry.tombstone => Some(&entry.value),
                _ => None,
            },
            Probe::Vacant(_) | Probe::Saturated => None,
        }
    }

    /// Returns a mutable reference to the value stored for `key`
    pub fn get_mut(&mut self, key: &str) -> Option<&mut V> {
        match self.probe(key) {
            Probe::Match(index) => match self.slots.get_mut(index) {
                Some(Some(entry)) if !entry.tombstone => Some(&mut entry.value),
                _ => None,
            },
            Probe::Vacant(_) | Probe::Saturated => None,
        }
    }

    /// Reports whether `key` currently maps to a live entry
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    /// Removes `key` from the map by tombstoning its slot.
    ///
    /// The entry keeps occupying the slot until the next rebuild, so probe
    /// sequences crossing it stay intact. Removing a missing or already
    /// removed key is a no-op.
    pub fn remove(&mut self, key: &str) {
        if let Probe::Match(index) = self.probe(key) {
            if let Some(Some(entry)) = self.slots.get_mut(index) {
                if !entry.tombstone {
                    entry.tombstone = true;
                    self.size = self.size.saturating_sub(1);
                }
            }
        }
    }

    /// Rebuilds the table at a prime capacity of at least `new_capacity`.
    ///
    /// Silently ignored when `new_capacity` is below the current size. Live
    /// entries are re-inserted through `put`, so the rebuild itself may grow
    /// the fresh table further; tombstones are dropped. Requesting exactly 2
    /// produces the one non-prime capacity the table ever uses.
    pub fn resize_table(&mut self, new_capacity: usize) {
        if new_capacity < self.size {
            return;
        }

        let mut fresh = Self::new(new_capacity, self.hash_fn);
        if new_capacity == 2 {
            fresh.slots.pop();
        }

        for entry in mem::take(&mut self.slots).into_iter().flatten() {
            if !entry.tombstone {
                fresh.put(entry.key, entry.value);
            }
        }

        // The live count carries over unchanged
        self.slots = fresh.slots;
    }

    /// Returns the current load factor of the table
    #[must_use]
    #[allow(clippy::arithmetic_side_effects, clippy::cast_precision_loss)]
    pub fn table_load(&self) -> f64 {
        self.size as f64 / self.slots.len() as f64
    }

    /// Counts the slots holding no live entry.
    ///
    /// Slots occupied only by a tombstone count as empty here even though
    /// probe sequences treat them as occupied.
    #[must_use]
    pub fn empty_buckets(&self) -> usize {
        let live = self.slots.iter().flatten().filter(|entry| !entry.tombstone).count();

        self.slots.len().saturating_sub(live)
    }

    /// Collects every live key-value pair in slot order
    #[must_use]
    pub fn get_keys_and_values(&self) -> Vec<(&str, &V)> {
        self.iter().collect()
    }

    /// Clears every slot, dropping tombstones too; capacity is unchanged
    pub fn clear(&mut self) {
        for slot in &mut self.slots {
            *slot = None;
        }
        self.size = 0;
    }

    /// Returns the number of live entries in the map
    #[must_use]
    pub fn len(&self) -> usize {
        self.size
    }

    /// Returns true if the map holds no live entries
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Returns the number of slots in the table
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns an iterator over the live key-value pairs in slot order.
    ///
    /// The iterator borrows the table, so the borrow checker rejects any
    /// mutation while it is alive; several iterators may run at once.
    #[must_use]
    #[allow(clippy::iter_without_into_iter)]
    pub fn iter(&self) -> Iter<'_, V> {
        Iter { slots: &self.slots, index: 0, _marker: PhantomData }
    }
}

/// Iterator over the live key-value pairs of the table
#[derive(Debug, Clone)]
pub struct Iter<'a, V> {
    /// Slots of the table being traversed
    slots: &'a [Option<Entry<V>>],
    /// Index of the next slot to inspect
    index: usize,
    /// Marker tying the items to the table's borrow
    _marker: PhantomData<&'a V>,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        while self.index < self.slots.len() {
            let slot = self.slots.get(self.index);
            self.index = self.index.saturating_add(1);

            if let Some(Some(entry)) = slot {
                if !entry.tombstone {
                    return Some((entry.key.as_str(), &entry.value));
                }
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hash::{additive, positional};
    use crate::prime::is_prime;
    use proptest::prelude::*;
    use std::collections::HashMap;

    #[test]
    fn test_put_and_get() {
        let mut map = OpenAddressingMap::new(20, additive);
        assert_eq!(map.capacity(), 23);

        assert_eq!(map.put("key1".to_string(), 10), None);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("key1"), Some(&10));
        assert_eq!(map.get("key2"), None);
        assert!(map.contains_key("key1"));
        assert!(!map.contains_key("key2"));
    }

    #[test]
    fn test_update_returns_previous_value() {
        let mut map = OpenAddressingMap::new(20, additive);
        assert_eq!(map.put("key1".to_string(), 1), None);
        assert_eq!(map.put("key1".to_string(), 10), Some(1));
        assert_eq!(map.get("key1"), Some(&10));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_remove_is_idempotent() {
        let mut map = OpenAddressingMap::new(20, additive);
        map.put("key1".to_string(), 1);
        map.put("key2".to_string(), 2);

        map.remove("key1");
        assert_eq!(map.get("key1"), None);
        assert_eq!(map.get("key2"), Some(&2));
        assert_eq!(map.len(), 1);

        map.remove("key1");
        map.remove("missing");
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_tombstone_revival() {
        let mut map = OpenAddressingMap::new(20, additive);
        map.put("a".to_string(), 1);
        map.remove("a");
        assert_eq!(map.len(), 0);

        // The key is logically absent, so no previous value comes back
        assert_eq!(map.put("a".to_string(), 2), None);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some(&2));
    }

    #[test]
    fn test_resize_keeps_entries() {
        let mut map = OpenAddressingMap::new(20, additive);
        map.put("key1".to_string(), 10);
        assert_eq!(map.len(), 1);
        assert_eq!(map.capacity(), 23);

        map.resize_table(30);
        assert_eq!(map.capacity(), 31);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("key1"), Some(&10));
        assert!(!map.contains_key("key2"));
    }

    #[test]
    fn test_resize_below_size_is_ignored() {
        let mut map = OpenAddressingMap::new(20, additive);
        for i in 0..3 {
            map.put(format!("key{i}"), i);
        }

        map.resize_table(2);
        assert_eq!(map.capacity(), 23);
        assert_eq!(map.len(), 3);
    }

    #[test]
    fn test_resize_to_two() {
        let mut map = OpenAddressingMap::new(10, additive);
        map.put("a".to_string(), 1);

        map.resize_table(2);
        assert_eq!(map.capacity(), 2);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("a"), Some(&1));
        assert!((map.table_load() - 0.5).abs() < 0.01);

        // The next insertion sees load 0.5 and doubles away from 2
        map.put("b".to_string(), 2);
        assert_eq!(map.capacity(), 5);
        assert_eq!(map.get("a"), Some(&1));
        assert_eq!(map.get("b"), Some(&2));
    }

    #[test]
    fn test_resize_rebuild_can_grow_further() {
        let mut map = OpenAddressingMap::new(75, positional);
        for k in (25..1000).step_by(13) {
            map.put(format!("{k}"), k * 42);
        }
        assert_eq!(map.len(), 75);
        assert_eq!(map.capacity(), 163);

        // 113 slots cannot hold 75 entries below load 0.5, so the rebuild's
        // own put calls double it again
        map.resize_table(111);
        assert_eq!(map.capacity(), 227);
        assert_eq!(map.len(), 75);
        for k in (25..1000).step_by(13) {
            assert_eq!(map.get(&format!("{k}")), Some(&(k * 42)));
            assert!(!map.contains_key(&format!("{}", k + 1)));
        }
    }

    #[test]
    fn test_growth_ladder() {
        let mut map = OpenAddressingMap::new(53, additive);
        for i in 0..150 {
            map.put(format!("str{i}"), i * 100);
            // The threshold insert may land just above 0.5; the next put
            // resizes before probing
            assert!(map.len().saturating_mul(2) <= map.capacity().saturating_add(1));
            assert!(is_prime(map.capacity()));
        }

        assert_eq!(map.len(), 150);
        assert_eq!(map.capacity(), 449);
        assert_eq!(map.empty_buckets(), 299);
        assert!((map.table_load() - 150.0 / 449.0).abs() < 0.01);
        for i in 0..150 {
            assert_eq!(map.get(&format!("str{i}")), Some(&(i * 100)));
        }
    }

    #[test]
    fn test_duplicate_puts_do_not_double_count() {
        let mut map = OpenAddressingMap::new(41, positional);
        for i in 0..50 {
            map.put(format!("str{}", i / 3), i * 100);
        }

        assert_eq!(map.len(), 17);
        assert_eq!(map.get("str3"), Some(&1100));
        assert_eq!(map.get("str16"), Some(&4900));
    }

    #[test]
    fn test_collisions_share_probe_sequence() {
        let mut map = OpenAddressingMap::new(10, |_| 0);
        map.put("k0".to_string(), 0);
        map.put("k1".to_string(), 1);
        map.put("k2".to_string(), 2);

        // Slot order pins the quadratic offsets 0, 1, 4
        let pairs: Vec<(&str, &i32)> = map.iter().collect();
        assert_eq!(pairs, vec![("k0", &0), ("k1", &1), ("k2", &2)]);

        // A tombstone in the middle of the sequence keeps later keys visible
        map.remove("k1");
        assert_eq!(map.get("k0"), Some(&0));
        assert_eq!(map.get("k2"), Some(&2));
        assert!(!map.contains_key("k1"));

        // Revival reuses the tombstoned slot, preserving slot order
        map.put("k1".to_string(), 10);
        let pairs: Vec<(&str, &i32)> = map.iter().collect();
        assert_eq!(pairs, vec![("k0", &0), ("k1", &10), ("k2", &2)]);
    }

    #[test]
    fn test_put_recovers_from_tombstone_saturation() {
        // Capacity 3 with a constant hash only ever probes slots 0 and 1
        let mut map = OpenAddressingMap::new(0, |_| 0);
        assert_eq!(map.capacity(), 3);

        map.put("a".to_string(), 1);
        map.remove("a");
        map.put("b".to_string(), 2);
        map.remove("b");

        // Both reachable slots are tombstones; the rebuild clears them
        map.put("c".to_string(), 3);
        assert_eq!(map.capacity(), 7);
        assert_eq!(map.len(), 1);
        assert_eq!(map.get("c"), Some(&3));
        assert_eq!(map.get("a"), None);
        assert_eq!(map.get("b"), None);
    }

    #[test]
    fn test_empty_buckets_counts_tombstones_as_empty() {
        let mut map = OpenAddressingMap::new(100, additive);
        assert_eq!(map.empty_buckets(), 101);

        map.put("key1".to_string(), 10);
        assert_eq!(map.empty_buckets(), 100);
        map.put("key2".to_string(), 20);
        assert_eq!(map.empty_buckets(), 99);
        map.put("key1".to_string(), 30);
        assert_eq!(map.empty_buckets(), 99);
        map.put("key4".to_string(), 40);
        assert_eq!(map.empty_buckets(), 98);

        map.remove("key4");
        assert_eq!(map.empty_buckets(), 99);
    }

    #[test]
    fn test_get_keys_and_values_in_slot_order() {
        let mut map = OpenAddressingMap::new(10, additive);
        map.put("a".to_string(), 1);
        map.put("b".to_string(), 2);
        map.put("c".to_string(), 3);

        // additive maps a, b, c to slots 9, 10, 0 of the 11-slot table
        assert_eq!(map.get_keys_and_values(), vec![("c", &3), ("a", &1), ("b", &2)]);
    }

    #[test]
    fn test_iter_skips_tombstones() {
        let mut map = OpenAddressingMap::new(10, additive);
        for i in 0..5 {
            map.put(format!("{i}"), i * 10);
        }
        map.remove("0");
        map.remove("4");

        let mut count = 0;
        let mut sum = 0;
        for (_, &value) in map.iter() {
            count += 1;
            sum += value;
        }

        assert_eq!(count, 3);
        assert_eq!(sum, 60);
    }

    #[test]
    fn test_len_and_is_empty() {
        let mut map = OpenAddressingMap::new(20, additive);
        assert!(map.is_empty());
        assert_eq!(map.len(), 0);

        map.put("key1".to_string(), 1);
        assert!(!map.is_empty());
        assert_eq!(map.len(), 1);

        map.remove("key1");
        assert!(map.is_empty());
    }

    #[test]
    fn test_get_mut() {
        let mut map = OpenAddressingMap::new(20, additive);
        map.put("key1".to_string(), 1);

        if let Some(value) = map.get_mut("key1") {
            *value += 10;
        }

        assert_eq!(map.get("key1"), Some(&11));
        assert_eq!(map.get_mut("missing"), None);
    }

    #[test]
    fn test_clear() {
        let mut map = OpenAddressingMap::new(20, additive);
        map.put("key1".to_string(), 1);
        map.put("key2".to_string(), 2);
        map.remove("key2");

        map.clear();
        assert_eq!(map.len(), 0);
        assert!(map.is_empty());
        assert_eq!(map.capacity(), 23);
        assert_eq!(map.get("key1"), None);
        assert_eq!(map.empty_buckets(), 23);
    }

    #[test]
    fn test_extend() {
        let mut map = OpenAddressingMap::new(20, additive);
        map.extend(vec![("a".to_string(), 1), ("b".to_string(), 2), ("a".to_string(), 3)]);

        assert_eq!(map.len(), 2);
        assert_eq!(map.get("a"), Some(&3));
        assert_eq!(map.get("b"), Some(&2));
    }

    proptest! {
        #[test]
        fn prop_matches_std_hash_map(
            ops in prop::collection::vec(("[a-d]{0,4}", 0i32..100, any::<bool>()), 0..80),
        ) {
            let mut map = OpenAddressingMap::new(5, additive);
            let mut model = HashMap::new();

            for (key, value, remove) in ops {
                if remove {
                    map.remove(&key);
                    model.remove(&key);
                } else {
                    let previous = map.put(key.clone(), value);
                    prop_assert_eq!(previous, model.insert(key, value));
                }

                prop_assert!(map.len().saturating_mul(2) <= map.capacity().saturating_add(1));
                prop_assert!(is_prime(map.capacity()));
            }

            prop_assert_eq!(map.len(), model.len());
            for (key, value) in &model {
                prop_assert_eq!(map.get(key), Some(value));
            }
        }
    }
}
