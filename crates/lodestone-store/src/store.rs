//! The capacity-bounded key/value store contract

use std::hash::Hash;

/// Outcome of a [`CacheStore::insert`] call.
#[derive(Debug)]
pub struct Insertion<K, V> {
    /// Value previously stored under the inserted key, if any.
    pub replaced: Option<V>,
    /// Entry the policy evicted to make room, if any.
    pub evicted: Option<(K, V)>,
}

/// Capacity-bounded key/value store
///
/// All eviction policies implement this contract. Object-safe, so a policy
/// can be selected at runtime as `Box<dyn CacheStore<K, V> + Send>`.
///
/// Every operation is total; the only failure mode any store has is a
/// non-positive capacity at construction time. Bounded stores hold
/// `len() <= capacity()` after every mutation.
pub trait CacheStore<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone + PartialEq,
{
    /// Insert a value, reporting both the value it replaced and any entry
    /// the policy evicted to make room.
    ///
    /// Inserting at an existing key refreshes its access metadata and never
    /// evicts; inserting a new key into a full bounded store evicts exactly
    /// one entry, chosen by policy.
    fn insert(&mut self, key: K, value: V) -> Insertion<K, V>;

    /// Look up a value, refreshing the policy's access metadata on a hit.
    /// A miss has no side effect.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Look up a value without touching access metadata.
    fn peek(&self, key: &K) -> Option<&V>;

    /// Remove an entry and its policy metadata.
    fn remove(&mut self, key: &K) -> Option<V>;

    /// Drop every entry and all policy metadata.
    fn clear(&mut self);

    fn len(&self) -> usize;

    fn capacity(&self) -> usize;

    fn keys(&self) -> Box<dyn Iterator<Item = &K> + '_>;

    fn values(&self) -> Box<dyn Iterator<Item = &V> + '_>;

    fn entries(&self) -> Box<dyn Iterator<Item = (&K, &V)> + '_>;

    /// Insert a value, returning the one it replaced.
    fn put(&mut self, key: K, value: V) -> Option<V> {
        self.insert(key, value).replaced
    }

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn contains_key(&self, key: &K) -> bool {
        self.peek(key).is_some()
    }

    fn contains_value(&self, value: &V) -> bool {
        self.values().any(|v| v == value)
    }

    /// Like [`CacheStore::get`], falling back to `default` on a miss.
    fn get_or_default(&mut self, key: &K, default: V) -> V {
        self.get(key).cloned().unwrap_or(default)
    }

    /// Return the cached value, inserting `default()` on a miss.
    ///
    /// A hit refreshes access metadata exactly like [`CacheStore::get`]; a
    /// miss inserts exactly like [`CacheStore::put`], so the fresh entry is
    /// not additionally counted as accessed.
    fn get_or_insert_with(&mut self, key: K, default: &mut dyn FnMut() -> V) -> &V {
        if self.get(&key).is_none() {
            let value = default();
            self.insert(key.clone(), value);
        }
        match self.peek(&key) {
            Some(value) => value,
            // insert never evicts the key it just stored
            None => unreachable!("entry present after insert"),
        }
    }

    /// Bulk insert; each entry goes through the policy like [`CacheStore::put`].
    fn put_all(&mut self, entries: Vec<(K, V)>) {
        for (key, value) in entries {
            self.insert(key, value);
        }
    }

    /// Visit every entry without touching access metadata.
    fn for_each(&self, action: &mut dyn FnMut(&K, &V)) {
        for (key, value) in self.entries() {
            action(key, value);
        }
    }
}
