//! Error types for arbor.

use thiserror::Error;

/// Convenient Result type alias.
///
/// Instead of writing `Result<T, Error>` everywhere, we can write `Result<T>`.
/// This is a common Rust pattern (see `std::io::Result`).
pub type Result<T> = std::result::Result<T, Error>;

/// All possible errors in arbor.
///
/// A duplicate key is not an error: `BTree::insert` reports it as
/// `Ok(false)`. Everything here is either a rejected request or a broken
/// tree.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Error {
    /// Requested node capacity is too small to split.
    #[error("Invalid node capacity {capacity}: must be at least {min}")]
    InvalidCapacity { capacity: usize, min: usize },

    /// Population asked for more unique keys than the range has left.
    #[error("Cannot add {requested} unique values: only {available} unused values remain")]
    PopulateExhausted { requested: usize, available: usize },

    /// The tree's structural invariants no longer hold.
    ///
    /// This indicates a bug in the split engine. The tree must not be used
    /// after this is returned.
    #[error("B-tree invariant violated: {0}")]
    InvariantViolation(String),
}
