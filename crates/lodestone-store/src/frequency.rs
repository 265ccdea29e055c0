//! Frequency-weighted eviction

use std::collections::{BTreeMap, HashMap};
use std::hash::Hash;

use crate::error::StoreError;
use crate::store::{CacheStore, Insertion};

struct Slot<V> {
    value: V,
    hits: u64,
    seq: u64,
}

/// Evicts the lowest-frequency entry when a new key would exceed capacity.
///
/// Each key carries a hit counter: 1 on first insertion, +1 on every `get`
/// or re-insert. Keys are ordered in a `BTreeMap` keyed by `(hits, seq)`,
/// where `seq` is a global sequence refreshed on every counter bump; the
/// ordering map and the per-key slots are kept strictly in sync on every
/// mutation, so eviction is O(log n) and two keys can never share an
/// ordering entry. Ties on the minimum counter break toward the key whose
/// ordering entry is oldest.
pub struct FrequencyStore<K, V> {
    entries: HashMap<K, Slot<V>>,
    order: BTreeMap<(u64, u64), K>,
    capacity: usize,
    seq: u64,
}

impl<K, V> FrequencyStore<K, V>
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
            order: BTreeMap::new(),
            capacity,
            seq: 0,
        })
    }

    /// Bump the key's counter and reposition its ordering entry.
    fn touch(&mut self, key: &K) {
        self.seq += 1;
        if let Some(slot) = self.entries.get_mut(key) {
            self.order.remove(&(slot.hits, slot.seq));
            slot.hits += 1;
            slot.seq = self.seq;
            self.order.insert((slot.hits, slot.seq), key.clone());
        }
    }

    fn evict_least_frequent(&mut self) -> Option<(K, V)> {
        let (_, key) = self.order.pop_first()?;
        let slot = self.entries.remove(&key)?;
        Some((key, slot.value))
    }
}

impl<K, V> CacheStore<K, V> for FrequencyStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + PartialEq,
{
    fn insert(&mut self, key: K, value: V) -> Insertion<K, V> {
        if self.entries.contains_key(&key) {
            self.touch(&key);
            let replaced = self
                .entries
                .get_mut(&key)
                .map(|slot| std::mem::replace(&mut slot.value, value));
            return Insertion {
                replaced,
                evicted: None,
            };
        }
        let evicted = if self.entries.len() == self.capacity {
            self.evict_least_frequent()
        } else {
            None
        };
        self.seq += 1;
        self.order.insert((1, self.seq), key.clone());
        self.entries.insert(
            key,
            Slot {
                value,
                hits: 1,
                seq: self.seq,
            },
        );
        Insertion {
            replaced: None,
            evicted,
        }
    }

    fn get(&mut self, key: &K) -> Option<&V> {
        if !self.entries.contains_key(key) {
            return None;
        }
        self.touch(key);
        self.entries.get(key).map(|slot| &slot.value)
    }

    fn peek(&self, key: &K) -> Option<&V> {
        self.entries.get(key).map(|slot| &slot.value)
    }

    fn remove(&mut self, key: &K) -> Option<V> {
        let slot = self.entries.remove(key)?;
        self.order.remove(&(slot.hits, slot.seq));
        Some(slot.value)
    }

    fn clear(&mut self) {
        self.entries.clear();
        self.order.clear();
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
