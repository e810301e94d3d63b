//! Lookup tables that answer every key
//!
use std::collections::HashMap;
use std::hash::Hash;

#[cfg(feature = "serde")]
use serde_crate::{Deserialize, Serialize};

/// A hash map returning a fixed default for keys it does not hold
///
/// Reading a missing key never inserts it, only [`entry`](DefaultMap::entry) does. The default
/// belongs to the map instance.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(crate = "serde_crate")
)]
#[derive(Debug, Clone, PartialEq)]
pub struct DefaultMap<K: Eq + Hash, V> {
    values: HashMap<K, V>,
    default: V,
}

impl<K: Eq + Hash, V: Copy> DefaultMap<K, V> {
    pub fn new(default: V) -> Self {
        DefaultMap {
            values: HashMap::new(),
            default,
        }
    }

    pub fn with_capacity(capacity: usize, default: V) -> Self {
        DefaultMap {
            values: HashMap::with_capacity(capacity),
            default,
        }
    }

    /// Value stored for `key`, or the default
    pub fn get(&self, key: &K) -> V {
        self.values.get(key).copied().unwrap_or(self.default)
    }

    /// Mutable slot of `key`, initialized with the default on first access
    pub fn entry(&mut self, key: K) -> &mut V {
        let default = self.default;
        self.values.entry(key).or_insert(default)
    }

    pub fn contains_key(&self, key: &K) -> bool {
        self.values.contains_key(key)
    }

    pub fn default_value(&self) -> V {
        self.default
    }

    /// Number of explicitly stored keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.values.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::DefaultMap;

    #[test]
    fn missing_keys_read_as_default_without_insert() {
        let map: DefaultMap<u32, f64> = DefaultMap::new(0.0);
        assert_eq!(map.get(&3), 0.0);
        assert!(!map.contains_key(&3));
        assert!(map.is_empty());
    }

    #[test]
    fn entry_starts_from_default() {
        let mut map = DefaultMap::new(1.5);
        *map.entry(7u32) += 1.0;
        *map.entry(7u32) += 1.0;

        assert_eq!(map.get(&7), 3.5);
        assert_eq!(map.get(&8), 1.5);
        assert_eq!(map.len(), 1);
        assert_eq!(map.default_value(), 1.5);
    }
}
