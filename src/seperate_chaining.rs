use core::{
    fmt::{self, Debug, Display, Formatter},
    iter::Enumerate,
    slice,
};

use tracing::Level;

mod bucket;
use bucket::{Bucket, Chain};
pub use bucket::{Entry, EntryHandle};

use crate::{error::Error, traits::hash_table::HashTable, DEFAULT_CAPACITY};

/// This hashtable uses singly linked lists for its elements.
///
/// The number of buckets is fixed at construction. Chains grow without bound,
/// so the map never reports itself as full.
pub struct FixedBucketHashMap {
    buckets: Box<[Bucket]>,
    len: usize,
}

impl Default for FixedBucketHashMap {
    fn default() -> Self {
        Self::new()
    }
}

impl FixedBucketHashMap {
    /// Creates an empty map with [`DEFAULT_CAPACITY`] buckets.
    pub fn new() -> Self {
        Self::with_buckets(DEFAULT_CAPACITY)
    }

    /// Creates an empty map with `capacity` buckets.
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::ZeroCapacity);
        }
        Ok(Self::with_buckets(capacity))
    }

    fn with_buckets(capacity: usize) -> Self {
        debug_assert!(capacity != 0);
        Self {
            buckets: (0..capacity).map(|_| Bucket::default()).collect(),
            len: 0,
        }
    }

    pub fn capacity(&self) -> usize {
        self.buckets.len()
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The bucket `key` hashes to: `key` floor-mod the bucket count, so
    /// negative keys land in `[0, capacity)` as well.
    pub fn bucket_index(&self, key: i64) -> usize {
        // i128 holds every i64 and usize exactly
        i128::from(key).rem_euclid(self.capacity() as i128) as usize
    }

    pub fn get(&self, key: i64) -> Option<&Entry> {
        self.buckets[self.bucket_index(key)].get(key)
    }

    pub fn contains_key(&self, key: i64) -> bool {
        self.get(key).is_some()
    }

    /// Stores `value` under `key`, overwriting any previous value.
    pub fn put(&mut self, key: i64, value: impl Into<String>) {
        self.insert(key, value.into());
    }

    /// Like [`put`](Self::put) but hands back the value that was overwritten.
    pub fn insert(&mut self, key: i64, value: String) -> Option<String> {
        let index = self.bucket_index(key);
        let old = self.buckets[index].put(key, value);
        if old.is_none() {
            self.len += 1;
            tracing::event!(Level::TRACE, key, bucket = index, "appended entry");
        } else {
            tracing::event!(Level::TRACE, key, bucket = index, "overwrote entry");
        }
        old
    }

    /// Locates the entry for `key` and returns a handle naming it.
    pub fn entry_handle(&self, key: i64) -> Option<EntryHandle> {
        let index = self.bucket_index(key);
        self.buckets[index]
            .get(key)
            .map(|entry| EntryHandle::new(index, entry))
    }

    /// Unlinks the entry named by `handle` from its chain.
    ///
    /// Returns `None` when the handle does not name a live entry of this map.
    pub fn delete_entry(&mut self, handle: EntryHandle) -> Option<Entry> {
        let removed = self.buckets.get_mut(handle.index())?.unlink(&handle)?;
        self.len -= 1;
        tracing::event!(
            Level::TRACE,
            key = handle.key(),
            bucket = handle.index(),
            "unlinked entry"
        );
        Some(*removed)
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: i64) -> Option<String> {
        let handle = self.entry_handle(key)?;
        self.delete_entry(handle).map(Entry::into_value)
    }

    /// Removes `key`. `false` means the key was absent and nothing changed.
    pub fn delete(&mut self, key: i64) -> bool {
        self.remove(key).is_some()
    }

    /// Drops every entry, keeping the buckets.
    pub fn clear(&mut self) {
        self.buckets.iter_mut().for_each(Bucket::clear);
        self.len = 0;
    }

    /// First entry of the chain in bucket `index`.
    pub fn first_entry(&self, index: usize) -> Option<&Entry> {
        self.buckets.get(index)?.iter().next()
    }

    /// Length of the chain in bucket `index`, `None` if there is no such bucket.
    pub fn chain_len(&self, index: usize) -> Option<usize> {
        self.buckets.get(index).map(Bucket::len)
    }

    /// Every entry with its bucket index, buckets in index order and each
    /// chain front to back.
    pub fn traverse(&self) -> Traverse<'_> {
        Traverse {
            buckets: self.buckets.iter().enumerate(),
            current: None,
        }
    }
}

impl HashTable<i64, String> for FixedBucketHashMap {
    fn with_capacity(capacity: usize) -> Result<Self, Error> {
        FixedBucketHashMap::with_capacity(capacity)
    }
    fn insert(&mut self, key: i64, value: String) -> Option<String> {
        FixedBucketHashMap::insert(self, key, value)
    }
    fn get(&self, key: &i64) -> Option<&String> {
        FixedBucketHashMap::get(self, *key).map(|entry| &entry.value)
    }
    fn remove(&mut self, key: &i64) -> Option<String> {
        FixedBucketHashMap::remove(self, *key)
    }
    fn len(&self) -> usize {
        self.len
    }
    fn capacity(&self) -> usize {
        self.buckets.len()
    }
    fn clear(&mut self) {
        FixedBucketHashMap::clear(self)
    }
}

impl Extend<(i64, String)> for FixedBucketHashMap {
    fn extend<I: IntoIterator<Item = (i64, String)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

impl Debug for FixedBucketHashMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "FixedBucketHashMap {{ capacity: {}, size: {}, elements: {{",
            self.capacity(),
            self.len
        )?;
        let mut iter = self.traverse();
        if let Some((_, elem)) = iter.next() {
            write!(f, "{elem:?}")?;
        }
        for (_, elem) in iter {
            write!(f, ", {elem:?}")?;
        }
        write!(f, "}} }}")
    }
}

/// One line per non-empty bucket: `index:----->(key, "value")----->...`
impl Display for FixedBucketHashMap {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for (index, bucket) in self.buckets.iter().enumerate() {
            if bucket.is_empty() {
                continue;
            }
            write!(f, "{index}:")?;
            for entry in bucket.iter() {
                write!(f, "----->{entry}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

// ------------------------------------------ ITER ---------------------------------------------

pub struct Traverse<'a> {
    buckets: Enumerate<slice::Iter<'a, Bucket>>,
    current: Option<(usize, Chain<'a>)>,
}

impl<'a> Iterator for Traverse<'a> {
    type Item = (usize, &'a Entry);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((index, chain)) = self.current.as_mut() {
                if let Some(entry) = chain.next() {
                    return Some((*index, entry));
                }
            }
            // current chain is exhausted, move on to the next bucket
            let (index, bucket) = self.buckets.next()?;
            self.current = Some((index, bucket.iter()));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, Rng, SeedableRng};
    use std::collections::HashMap;

    fn map(capacity: usize) -> FixedBucketHashMap {
        FixedBucketHashMap::with_capacity(capacity).unwrap()
    }

    fn value(map: &FixedBucketHashMap, key: i64) -> Option<&str> {
        map.get(key).map(Entry::value)
    }

    #[test]
    fn default_capacity() {
        let a = FixedBucketHashMap::new();
        assert_eq!(a.capacity(), DEFAULT_CAPACITY);
        assert!(a.is_empty());
    }

    #[test]
    fn zero_capacity() {
        assert_eq!(
            FixedBucketHashMap::with_capacity(0).unwrap_err(),
            Error::ZeroCapacity
        );
    }

    #[test]
    fn collision_siblings_survive_delete() {
        let mut a = map(20);
        a.put(5, "a");
        a.put(25, "b");
        assert_eq!(a.bucket_index(25), 5);
        assert_eq!(value(&a, 5), Some("a"));
        assert_eq!(value(&a, 25), Some("b"));
        assert!(a.delete(5));
        assert!(a.get(5).is_none());
        assert_eq!(value(&a, 25), Some("b"));
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn put_overwrites() {
        let mut a = map(20);
        a.put(3, "x");
        a.put(3, "y");
        assert_eq!(a.len(), 1);
        assert_eq!(value(&a, 3), Some("y"));
        assert_eq!(a.insert(3, "z".into()), Some("y".to_string()));
    }

    #[test]
    fn delete_absent() {
        let mut a = FixedBucketHashMap::new();
        assert!(!a.delete(999));
        assert_eq!(a.len(), 0);
        a.put(19, "q");
        assert!(!a.delete(39));
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn negative_keys() {
        let a = map(20);
        assert_eq!(a.bucket_index(-1), 19);
        assert_eq!(a.bucket_index(-20), 0);
        assert_eq!(a.bucket_index(i64::MIN), 12);
        assert_eq!(a.bucket_index(i64::MAX), 7);

        let mut a = a;
        a.put(-1, "neg");
        a.put(19, "pos");
        assert_eq!(a.chain_len(19), Some(2));
        assert!(a.delete(-1));
        assert_eq!(value(&a, 19), Some("pos"));
    }

    #[test]
    fn delete_from_single_bucket() {
        let mut a = map(1);
        a.extend((0..10).map(|i| (i, i.to_string())));
        assert_eq!(a.chain_len(0), Some(10));
        for k in [0, 9, 5] {
            assert!(a.delete(k));
        }
        let keys = a.traverse().map(|(_, e)| e.key()).collect::<Vec<_>>();
        assert_eq!(keys, vec![1, 2, 3, 4, 6, 7, 8]);
        assert_eq!(a.len(), 7);
    }

    #[test]
    fn delete_entry_by_handle() {
        let mut a = map(20);
        a.put(7, "seven");
        a.put(27, "twenty seven");
        let handle = a.entry_handle(27).unwrap();
        assert_eq!(handle.index(), 7);
        assert_eq!(handle.key(), 27);

        let entry = a.delete_entry(handle).unwrap();
        assert_eq!(entry.into_pair(), (27, "twenty seven".to_string()));
        // stale handle
        assert!(a.delete_entry(handle).is_none());
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn stale_handle_after_put_back() {
        let mut a = map(20);
        a.put(7, "first");
        let handle = a.entry_handle(7).unwrap();
        assert!(a.delete_entry(handle).is_some());

        // the new node may land at the freed address
        a.put(7, "second");
        assert!(a.delete_entry(handle).is_none());
        assert_eq!(a.len(), 1);
        assert_eq!(a.get(7).map(Entry::value), Some("second"));
    }

    #[test]
    fn handle_from_other_map() {
        let mut a = map(20);
        let mut b = map(5);
        a.put(17, "a");
        b.put(17, "b");
        let handle = a.entry_handle(17).unwrap();
        assert!(b.delete_entry(handle).is_none());
        assert_eq!(value(&b, 17), Some("b"));
    }

    #[test]
    fn traverse_order() {
        let mut a = map(4);
        for k in [6, 1, 2, 5, 9] {
            a.put(k, k.to_string());
        }
        let seen = a
            .traverse()
            .map(|(i, e)| (i, e.key()))
            .collect::<Vec<_>>();
        assert_eq!(seen, vec![(1, 1), (1, 5), (1, 9), (2, 6), (2, 2)]);
        // restartable
        assert_eq!(a.traverse().count(), 5);
        assert_eq!(map(4).traverse().count(), 0);
    }

    #[test]
    fn clear_keeps_buckets() {
        let mut a = map(3);
        a.extend((0..9).map(|i| (i, String::new())));
        a.clear();
        assert!(a.is_empty());
        assert_eq!(a.capacity(), 3);
        assert_eq!(a.traverse().count(), 0);
        a.put(1, "again");
        assert_eq!(a.len(), 1);
    }

    #[test]
    fn display_and_debug() {
        let mut a = map(20);
        a.put(5, "a");
        a.put(25, "b");
        a.put(2, "c");
        assert_eq!(
            a.to_string(),
            "2:----->(2, \"c\")\n5:----->(5, \"a\")----->(25, \"b\")\n"
        );
        assert_eq!(
            format!("{a:?}"),
            "FixedBucketHashMap { capacity: 20, size: 3, elements: {(2, \"c\"), (5, \"a\", next_key: 25), (25, \"b\")} }"
        );
    }

    #[test]
    fn insert_and_remove() {
        const OPS: usize = 5000;
        let mut rng = StdRng::seed_from_u64(0x5eed);
        let mut a = map(20);
        let mut reference = HashMap::new();
        for _ in 0..OPS {
            let key = rng.gen_range(-200..200);
            if rng.gen_bool(0.6) {
                let v = rng.gen::<u32>().to_string();
                assert_eq!(a.insert(key, v.clone()), reference.insert(key, v));
            } else {
                assert_eq!(a.remove(key), reference.remove(&key));
            }
            assert_eq!(a.len(), reference.len());
        }
        for (index, entry) in a.traverse() {
            assert_eq!(a.bucket_index(entry.key()), index);
            assert_eq!(reference.get(&entry.key()).map(String::as_str), Some(entry.value()));
        }
        assert_eq!(a.traverse().count(), reference.len());
    }

    #[test]
    fn through_trait() {
        fn fill<T: HashTable<i64, String>>() -> T {
            let mut t = T::with_capacity(7).unwrap();
            for i in 0..20 {
                t.insert(i, i.to_string());
            }
            t
        }
        let mut t: FixedBucketHashMap = fill();
        assert_eq!(HashTable::len(&t), 20);
        assert_eq!(HashTable::get(&t, &13), Some(&"13".to_string()));
        assert!(HashTable::delete(&mut t, &13));
        assert!(!HashTable::contains_key(&t, &13));
        HashTable::clear(&mut t);
        assert!(HashTable::is_empty(&t));
    }
}
