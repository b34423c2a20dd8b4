//! Configuration for arbor trees.

use std::ops::Range;

use crate::common::{Error, Result};

/// Smallest node capacity a tree accepts.
///
/// With a capacity of 2 an index split would leave a node with a single
/// child and no separator, so every node must be able to hold at least
/// three entries.
pub const MIN_CAPACITY: usize = 3;

/// Capacity used by [`TreeConfig::default`].
pub const DEFAULT_CAPACITY: usize = 4;

/// Keys drawn by [`BTree::populate`](crate::BTree::populate).
///
/// Upper bound is exclusive, so 9999 distinct keys are available.
pub const POPULATE_RANGE: Range<i32> = 0..9999;

/// Construction parameters for a [`BTree`](crate::BTree).
///
/// # Example
/// ```
/// use arbor::{BTree, TreeConfig};
///
/// let tree = BTree::with_config(TreeConfig::new(5)).unwrap();
/// assert_eq!(tree.capacity(), 5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeConfig {
    /// Maximum keys per leaf and children per index node.
    pub capacity: usize,
}

impl TreeConfig {
    /// Create a config with the given node capacity.
    pub fn new(capacity: usize) -> Self {
        Self { capacity }
    }

    /// Check the config before a tree is built from it.
    ///
    /// # Errors
    /// `Error::InvalidCapacity` if `capacity < MIN_CAPACITY`.
    pub fn validate(&self) -> Result<()> {
        if self.capacity < MIN_CAPACITY {
            return Err(Error::InvalidCapacity {
                capacity: self.capacity,
                min: MIN_CAPACITY,
            });
        }
        Ok(())
    }
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        let config = TreeConfig::default();
        assert_eq!(config.capacity, DEFAULT_CAPACITY);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_capacity_below_minimum_rejected() {
        for capacity in 0..MIN_CAPACITY {
            match TreeConfig::new(capacity).validate() {
                Err(Error::InvalidCapacity { capacity: c, min }) => {
                    assert_eq!(c, capacity);
                    assert_eq!(min, MIN_CAPACITY);
                }
                other => panic!("Expected InvalidCapacity, got {:?}", other),
            }
        }
        assert!(TreeConfig::new(MIN_CAPACITY).validate().is_ok());
    }

    #[test]
    fn test_populate_range_size() {
        assert_eq!(POPULATE_RANGE.len(), 9999);
    }
}
