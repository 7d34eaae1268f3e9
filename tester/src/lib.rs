//! Randomized operation tester for [`HashTable`](fixed_hash_map::HashTable)
//! implementations.
//!
//! A seeded generator produces insert/get/remove/len/clear operations together
//! with the results `std::collections::HashMap` gives for them. The table
//! under test replays the same operations and the first disagreement is
//! reported with the seed needed to reproduce it.

pub mod tester;

pub use tester::{test_hashtable, OperationFailure, TestFailure, TestParams};

/// Smallest key range the generator draws from. Keeping keys in a narrow
/// range makes repeated keys, collisions and successful removes common.
pub const MIN_KEYS: i64 = 16;
