use std::hash::Hash;

use ahash::AHashMap;

/// One-to-one map that can be queried from either side
#[derive(Debug, Clone, Default)]
pub struct BidiMap<K, V> {
    forward: AHashMap<K, V>,
    reverse: AHashMap<V, K>,
}

impl<K, V> BidiMap<K, V>
where
    K: Copy + Eq + Hash,
    V: Copy + Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            forward: AHashMap::new(),
            reverse: AHashMap::new(),
        }
    }

    /// Insert a pair, dropping any existing pair that shares either side
    pub fn insert(&mut self, key: K, value: V) {
        if let Some(old_value) = self.forward.remove(&key) {
            self.reverse.remove(&old_value);
        }
        if let Some(old_key) = self.reverse.remove(&value) {
            self.forward.remove(&old_key);
        }
        self.forward.insert(key, value);
        self.reverse.insert(value, key);
    }

    #[inline]
    pub fn get_value(&self, key: &K) -> Option<&V> {
        self.forward.get(key)
    }

    #[inline]
    pub fn get_key(&self, value: &V) -> Option<&K> {
        self.reverse.get(value)
    }

    /// Remove every pair, keeping the allocated tables
    pub fn clear(&mut self) {
        self.forward.clear();
        self.reverse.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.forward.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.forward.is_empty()
    }
}
