//! Pass-through store with no eviction

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::StoreError;
use crate::store::{CacheStore, Insertion};

/// A store whose declared capacity is never enforced.
///
/// Intended for artifacts that must stay resident for the process
/// lifetime; callers opt into it explicitly through
/// [`CachePolicy::Unbounded`](crate::policy::CachePolicy::Unbounded)
/// rather than getting silent unbounded growth by default.
pub struct UnboundedStore<K, V> {
    entries: HashMap<K, V>,
    capacity: usize,
}

impl<K, V> UnboundedStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + PartialEq,
{
    /// Create a store with an advisory capacity.
    pub fn new(capacity: usize) -> Result<Self, StoreError> {
        if capacity == 0 {
            return Err(StoreError::InvalidCapacity(capacity));
        }
        Ok(Self {
            entries: HashMap::new(),
            capacity,
        })
    }
}

impl<K, V> CacheStore<K, V> for UnboundedStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + PartialEq,
{
    fn insert(&mut self, key: K, value: V) -> Insertion<K, V> {
        Insertion {
            replaced: self.entries.insert(key, value),
            evicted: None,
        }
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key)
    }

    fn clear(&mut self) {
        self.entries.clear();
    }

    fn len(&self) -> usize {
        self.entries.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &K> + '_> {
        Box::new(self.entries.keys())
    }

    fn values(&self) -> Box<dyn Iterator<Item = &V> + '_> {
        Box::new(self.entries.values())
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.entries.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_zero_capacity() {
        assert!(UnboundedStore::<&str, i32>::new(0).is_err());
    }

    #[test]
    fn round_trips_and_removes() {
        let mut store = UnboundedStore::new(8).unwrap();
        store.put("a", 1);
        assert_eq!(store.get(&"a"), Some(&1));
        assert_eq!(store.remove(&"a"), Some(1));
        assert_eq!(store.get(&"a"), None);
    }

    #[test]
    fn never_evicts_past_capacity() {
        let mut store = UnboundedStore::new(8).unwrap();
        for i in 0..1008 {
            let outcome = store.insert(i, i);
            assert!(outcome.evicted.is_none());
        }
        assert_eq!(store.len(), 1008);
        assert!(store.len() > store.capacity());
        assert!(store.contains_key(&0));
        assert!(store.contains_key(&1007));
    }
}
