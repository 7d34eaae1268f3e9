use crate::error::Error;

/// High level hash table
pub trait HashTable<K, V>: Sized {
    fn with_capacity(capacity: usize) -> Result<Self, Error>;
    /// Inserts or overwrites, returning the value that was replaced.
    fn insert(&mut self, key: K, value: V) -> Option<V>;
    fn get(&self, key: &K) -> Option<&V>;
    fn remove(&mut self, key: &K) -> Option<V>;
    fn delete(&mut self, key: &K) -> bool {
        self.remove(key).is_some()
    }
    fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// number of buckets
    fn capacity(&self) -> usize;
    fn clear(&mut self);
}
