use core::{
    fmt::{self, Debug, Display, Formatter},
    mem,
    sync::atomic::{AtomicU64, Ordering},
};

pub(crate) type Link = Option<Box<Entry>>;

/// Source of entry ids. Ids are never reused, so a freed node's address being
/// handed to a new entry cannot make an old handle match it.
static NEXT_ENTRY_ID: AtomicU64 = AtomicU64::new(0);

/// A stored key-value pair plus the link to the next entry of its chain.
pub struct Entry {
    pub(super) key: i64,
    pub(super) value: String,
    id: u64,
    next: Link,
}

impl Entry {
    fn new(key: i64, value: String) -> Self {
        Self {
            key,
            value,
            id: NEXT_ENTRY_ID.fetch_add(1, Ordering::Relaxed),
            next: None,
        }
    }

    pub fn key(&self) -> i64 {
        self.key
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    /// The entry after this one in the same bucket.
    pub fn next_entry(&self) -> Option<&Entry> {
        self.next.as_deref()
    }

    pub fn into_value(self) -> String {
        self.value
    }

    pub fn into_pair(self) -> (i64, String) {
        (self.key, self.value)
    }
}

impl Debug for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({:?}, {:?}", &self.key, &self.value)?;
        if let Some(next) = self.next_entry() {
            write!(f, ", next_key: {:?})", &next.key)
        } else {
            write!(f, ")")
        }
    }
}

impl Display for Entry {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {:?})", self.key, self.value)
    }
}

/// Names one live entry of a map by bucket and entry id.
///
/// Every entry gets a fresh id when it is appended, an overwrite keeps it.
/// Once the entry is unlinked the handle goes stale and deleting through it
/// again does nothing, even after the same key is put back.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct EntryHandle {
    index: usize,
    key: i64,
    id: u64,
}

impl EntryHandle {
    pub(crate) fn new(index: usize, entry: &Entry) -> Self {
        Self {
            index,
            key: entry.key,
            id: entry.id,
        }
    }

    /// bucket the entry lives in
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn key(&self) -> i64 {
        self.key
    }

    fn names(&self, entry: &Entry) -> bool {
        entry.id == self.id && entry.key == self.key
    }
}

/// Sentinel header of one bucket. It holds no pair, only the link to the
/// first entry of the chain.
#[derive(Default)]
pub(crate) struct Bucket {
    next: Link,
}

impl Bucket {
    pub fn is_empty(&self) -> bool {
        self.next.is_none()
    }

    pub fn iter(&self) -> Chain<'_> {
        Chain {
            node: self.next.as_deref(),
        }
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn get(&self, key: i64) -> Option<&Entry> {
        self.iter().find(|entry| entry.key == key)
    }

    fn get_mut(&mut self, key: i64) -> Option<&mut Entry> {
        let mut link = self.next.as_deref_mut();
        while let Some(entry) = link {
            if entry.key == key {
                return Some(entry);
            }
            link = entry.next.as_deref_mut();
        }
        None
    }

    /// Overwrites the value of `key` in place, or appends a new entry at the
    /// tail of the chain. Returns the overwritten value.
    pub fn put(&mut self, key: i64, value: String) -> Option<String> {
        if let Some(entry) = self.get_mut(key) {
            return Some(mem::replace(&mut entry.value, value));
        }
        let mut link = &mut self.next;
        while let Some(entry) = link {
            link = &mut entry.next;
        }
        *link = Some(Box::new(Entry::new(key, value)));
        None
    }

    /// Splices the entry named by `handle` out of the chain.
    ///
    /// The walk starts at the header: when the target is the first entry its
    /// predecessor link is the header's own.
    pub fn unlink(&mut self, handle: &EntryHandle) -> Option<Box<Entry>> {
        let mut link = &mut self.next;
        while link
            .as_deref()
            .map_or(false, |entry| !handle.names(entry))
        {
            link = &mut link.as_mut()?.next;
        }
        let mut removed = link.take()?;
        *link = removed.next.take();
        Some(removed)
    }

    pub fn clear(&mut self) {
        let mut head = self.next.take();
        while let Some(mut entry) = head {
            head = entry.next.take();
        }
    }
}

// chains can be long, dropping them recursively would overflow the stack
impl Drop for Bucket {
    fn drop(&mut self) {
        self.clear();
    }
}

/// Entries of one bucket in chain order.
pub struct Chain<'a> {
    node: Option<&'a Entry>,
}

impl<'a> Iterator for Chain<'a> {
    type Item = &'a Entry;
    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.node?;
        self.node = entry.next.as_deref();
        Some(entry)
    }
}
