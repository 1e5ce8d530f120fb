//! Utility functions and traits shared by both map implementations

use crate::{ChainingMap, OpenAddressingMap};

/// Extension trait for map implementations that provides additional utility
/// methods
pub trait MapExtensions<V> {
    /// Returns the keys of the map as a Vec, in traversal order
    fn keys(&self) -> Vec<&str>;

    /// Returns the values of the map as a Vec, in traversal order
    fn values(&self) -> Vec<&V>;
}

impl<V> MapExtensions<V> for OpenAddressingMap<V> {
    fn keys(&self) -> Vec<&str> {
        self.iter().map(|(key, _)| key).collect()
    }

    fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, value)| value).collect()
    }
}

impl<V> MapExtensions<V> for ChainingMap<V> {
    fn keys(&self) -> Vec<&str> {
        self.iter().map(|(key, _)| key).collect()
    }

    fn values(&self) -> Vec<&V> {
        self.iter().map(|(_, value)| value).collect()
    }
}

/// Creates a `ChainingMap` in its default configuration from an iterator of
/// key-value pairs
pub fn from_iter<V, I>(iter: I) -> ChainingMap<V>
where
    I: IntoIterator<Item = (String, V)>,
{
    let mut map = ChainingMap::default();

    for (key, value) in iter {
        map.put(key, value);
    }

    map
}
