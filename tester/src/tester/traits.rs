use rand::{Rng, SeedableRng};

/// deterministically applies an operation to a T returning the result
pub trait Operation<T> {
    type Result: Sized;
    fn apply(&self, target: &mut T) -> Self::Result;
}

// deterministically generates a sequence of valid operations
// each item pairs an operation with the result the reference gives for it
pub trait OperationGenerator<R>: Iterator + Sized
where
    R: Rng + SeedableRng,
{
    type ReferenceImpl;
    fn from_seed(seed: u64, key_range: i64) -> Self;
    fn data(self) -> Self::ReferenceImpl;
}

pub use impls::*;

mod impls {
    use super::*;
    use fixed_hash_map::HashTable;
    use rand::rngs::StdRng;
    use std::collections::HashMap;

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum HashTableOperation {
        Insert(i64, String),
        Remove(i64),
        Get(i64),
        Len,
        Clear,
    }

    #[derive(Clone, Debug, PartialEq, Eq)]
    pub enum Outcome {
        Value(Option<String>),
        Len(usize),
        Cleared,
    }

    impl<T: HashTable<i64, String>> Operation<T> for HashTableOperation {
        type Result = Outcome;

        fn apply(&self, table: &mut T) -> Self::Result {
            match self {
                Self::Insert(key, value) => Outcome::Value(table.insert(*key, value.clone())),
                Self::Get(key) => Outcome::Value(table.get(key).cloned()),
                Self::Remove(key) => Outcome::Value(table.remove(key)),
                Self::Len => Outcome::Len(table.len()),
                Self::Clear => {
                    table.clear();
                    Outcome::Cleared
                }
            }
        }
    }

    impl HashTableOperation {
        /// Applies the operation to the std map the expected results come from.
        fn apply_reference(&self, map: &mut HashMap<i64, String>) -> Outcome {
            match self {
                Self::Insert(key, value) => Outcome::Value(map.insert(*key, value.clone())),
                Self::Get(key) => Outcome::Value(map.get(key).cloned()),
                Self::Remove(key) => Outcome::Value(map.remove(key)),
                Self::Len => Outcome::Len(map.len()),
                Self::Clear => {
                    map.clear();
                    Outcome::Cleared
                }
            }
        }
    }

    pub struct HashTableOperationGenerator<R = StdRng>
    where
        R: Rng + SeedableRng,
    {
        rng: R,
        key_range: i64,
        data: HashMap<i64, String>,
    }

    impl<R> OperationGenerator<R> for HashTableOperationGenerator<R>
    where
        R: Rng + SeedableRng,
    {
        type ReferenceImpl = HashMap<i64, String>;

        fn from_seed(seed: u64, key_range: i64) -> Self {
            Self {
                rng: R::seed_from_u64(seed),
                key_range: key_range.max(crate::MIN_KEYS),
                data: HashMap::new(),
            }
        }

        fn data(self) -> Self::ReferenceImpl {
            self.data
        }
    }

    impl<R> Iterator for HashTableOperationGenerator<R>
    where
        R: Rng + SeedableRng,
    {
        type Item = (HashTableOperation, Outcome);

        fn next(&mut self) -> Option<Self::Item> {
            // keys straddle zero so negative keys get exercised too
            let half = self.key_range / 2;
            let key = self.rng.gen_range(-half..self.key_range - half);
            let op = match self.rng.gen_range(0..100) {
                0..=44 => HashTableOperation::Insert(key, self.rng.gen::<u32>().to_string()),
                45..=69 => HashTableOperation::Get(key),
                70..=94 => HashTableOperation::Remove(key),
                95..=98 => HashTableOperation::Len,
                _ => HashTableOperation::Clear,
            };
            let res = op.apply_reference(&mut self.data);
            Some((op, res))
        }
    }
}
