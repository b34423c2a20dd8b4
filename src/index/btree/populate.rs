//! Bulk population with random keys.

use log::debug;
use rand::Rng;

use super::tree::BTree;
use crate::common::config::POPULATE_RANGE;
use crate::common::{Error, Result};

/// How a [`BTree::populate`] call went.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PopulateReport {
    /// New keys stored.
    pub added: usize,
    /// Keys drawn, including ones that were already present.
    pub attempts: usize,
}

impl BTree {
    /// Insert `count` new keys drawn uniformly from [`POPULATE_RANGE`].
    ///
    /// Draws that hit an existing key are retried, so `attempts` may exceed
    /// `added`.
    ///
    /// # Errors
    /// - `Error::PopulateExhausted` if fewer than `count` keys of the range
    ///   are still unused. The tree is left unchanged.
    /// - `Error::InvariantViolation` from [`BTree::insert`].
    ///
    /// # Example
    /// ```
    /// use arbor::BTree;
    /// use rand::SeedableRng;
    ///
    /// let mut tree = BTree::new(4).unwrap();
    /// let mut rng = rand::rngs::StdRng::seed_from_u64(7);
    /// let report = tree.populate(100, &mut rng).unwrap();
    ///
    /// assert_eq!(report.added, 100);
    /// assert_eq!(tree.len(), 100);
    /// ```
    pub fn populate<R: Rng + ?Sized>(&mut self, count: usize, rng: &mut R) -> Result<PopulateReport> {
        let used = self
            .keys()
            .iter()
            .filter(|key| POPULATE_RANGE.contains(*key))
            .count();
        let available = POPULATE_RANGE.len() - used;
        if count > available {
            return Err(Error::PopulateExhausted {
                requested: count,
                available,
            });
        }

        let mut report = PopulateReport::default();
        while report.added < count {
            report.attempts += 1;
            if self.insert(rng.gen_range(POPULATE_RANGE))? {
                report.added += 1;
            }
        }

        debug!(
            "populated {} keys over {} attempts",
            report.added, report.attempts
        );
        Ok(report)
    }
}
