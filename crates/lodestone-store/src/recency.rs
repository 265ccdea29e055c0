//! Recency-based eviction (LRU)

use std::collections::HashMap;
use std::hash::Hash;

use crate::error::StoreError;
use crate::store::{CacheStore, Insertion};

struct Slot<V> {
    value: V,
    touched: u64,
}

/// Evicts the least-recently-touched entry when a new key would exceed
/// capacity.
///
/// Every hit stamps the entry with the next tick of a monotonic counter;
/// eviction removes the minimum stamp. Access order is a strict sequence,
/// so eviction is total and deterministic.
pub struct RecencyStore<K, V> {
    entries: HashMap<K, Slot<V>>,
    capacity: usize,
    clock: u64,
}

impl<K, V> RecencyStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + PartialEq,
{
    pub fn new(capacity: usize) -> Result<Self, StoreError> {
        if capacity == 0 {
            return Err(StoreError::InvalidCapacity(capacity));
        }
        Ok(Self {
            entries: HashMap::with_capacity(capacity),
            capacity,
            clock: 0,
        })
    }

    fn evict_least_recent(&mut self) -> Option<(K, V)> {
        let victim = self
            .entries
            .iter()
            .min_by_key(|(_, slot)| slot.touched)
            .map(|(key, _)| key.clone())?;
        let slot = self.entries.remove(&victim)?;
        Some((victim, slot.value))
    }
}

impl<K, V> CacheStore<K, V> for RecencyStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + PartialEq,
{
    fn insert(&mut self, key: K, value: V) -> Insertion<K, V> {
        self.clock += 1;
        if let Some(slot) = self.entries.get_mut(&key) {
            slot.touched = self.clock;
            return Insertion {
                replaced: Some(std::mem::replace(&mut slot.value, value)),
                evicted: None,
            };
        }
        let evicted = if self.entries.len() == self.capacity {
            self.evict_least_recent()
        } else {
            None
        };
        self.entries.insert(
            key,
            Slot {
                value,
                touched: self.clock,
            },
        );
        Insertion {
            replaced: None,
            evicted,
        }
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        let slot = self.entries.get_mut(key)?;
        self.clock += 1;
        slot.touched = self.clock;
        Some(&slot.value)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key).map(|slot| &slot.value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        self.entries.remove(key).map(|slot| slot.value)
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
        Box::new(self.entries.values().map(|slot| &slot.value))
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_> {
        Box::new(self.entries.iter().map(|(key, slot)| (key, &slot.value)))
    }
}
