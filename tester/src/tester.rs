use std::{
    collections::HashMap,
    fmt::{self, Debug, Display, Formatter},
};

use fixed_hash_map::{Error, HashTable};
use rand::rngs::StdRng;

pub mod traits;
use traits::*;

type Generator = HashTableOperationGenerator<StdRng>;

/// how many operations before the failing one [`OperationFailure::playback`] shows
const PLAYBACK_WINDOW: usize = 5;

#[derive(Clone, Copy, Debug)]
pub struct TestParams {
    pub seed: u64,
    pub ops: usize,
    pub capacity: usize,
    pub key_range: i64,
}

impl TestParams {
    pub fn new(seed: u64, ops: usize, capacity: usize) -> Self {
        Self {
            seed,
            ops,
            capacity,
            key_range: (capacity as i64).saturating_mul(3),
        }
    }
}

/// Runs `params.ops` generated operations against a fresh `T` and checks
/// every result against `std::collections::HashMap`.
pub fn test_hashtable<T>(params: TestParams) -> Result<(), TestFailure<T>>
where
    T: HashTable<i64, String> + Debug,
{
    let mut target = T::with_capacity(params.capacity).map_err(TestFailure::Construct)?;
    let gen = Generator::from_seed(params.seed, params.key_range);

    let mut op_num = 0;
    for (op, expected) in gen.take(params.ops) {
        op_num += 1;
        let actual = op.apply(&mut target);
        if actual != expected {
            let mut replay = Generator::from_seed(params.seed, params.key_range);
            let operations: Vec<_> = (&mut replay).take(op_num).collect();
            return Err(TestFailure::Mismatch(OperationFailure {
                params,
                target,
                op_num,
                operations,
                actual,
                data: replay.data(),
            }));
        }
    }
    Ok(())
}

#[derive(Debug)]
pub enum TestFailure<T> {
    Construct(Error),
    Mismatch(OperationFailure<T>),
}

impl<T: Debug> Display for TestFailure<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Construct(e) => write!(f, "could not build table: {e}"),
            Self::Mismatch(failure) => write!(f, "{}", failure.playback()),
        }
    }
}

#[derive(Debug)]
pub struct OperationFailure<T> {
    pub params: TestParams,
    pub target: T,
    /// 1-based index of the failing operation
    pub op_num: usize,
    pub operations: Vec<(HashTableOperation, Outcome)>,
    pub actual: Outcome,
    /// reference contents right after the failing operation
    pub data: HashMap<i64, String>,
}

impl<T: Debug> OperationFailure<T> {
    pub fn failing_operation(&self) -> Option<&(HashTableOperation, Outcome)> {
        self.operations.last()
    }

    /// Describes the last few operations leading up to the failure.
    pub fn playback(&self) -> String {
        let mut out = format!(
            "seed {} capacity {}: operation {} of {} disagreed with the reference\n",
            self.params.seed, self.params.capacity, self.op_num, self.params.ops
        );
        let lower = self.op_num.saturating_sub(PLAYBACK_WINDOW + 1);
        for (ind, (op, res)) in self.operations.iter().enumerate().skip(lower) {
            out.push_str(&format!("--------- operation {} ----------\n", ind + 1));
            out.push_str(&format!("operation: {op:?}\n"));
            if ind + 1 == self.op_num {
                out.push_str(&format!("expected / actual : {:?}, {:?}\n", res, self.actual));
            } else {
                out.push_str(&format!("result: {res:?}\n"));
            }
        }
        out.push_str(&format!("table_state: {:?}\n", &self.target));
        out
    }
}
