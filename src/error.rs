/// Errors raised while building a map.
///
/// Looking up or deleting an absent key is not an error, those report through
/// `Option` and `bool`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    #[error("a hash map needs at least one bucket")]
    ZeroCapacity,
}
