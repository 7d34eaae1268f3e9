//! A separate chaining hash map with a fixed number of buckets.
//!
//! Keys are `i64`, values are `String`. Every bucket is a sentinel header
//! anchoring a singly linked chain of entries, and the bucket count chosen at
//! construction never changes.

#![forbid(unsafe_code)]

pub mod demo;
pub mod error;
pub mod seperate_chaining;
pub mod traits;

pub use error::Error;
pub use seperate_chaining::{Entry, EntryHandle, FixedBucketHashMap, Traverse};
pub use traits::hash_table::HashTable;

/// Bucket count used by [`FixedBucketHashMap::new`].
pub const DEFAULT_CAPACITY: usize = 20;
