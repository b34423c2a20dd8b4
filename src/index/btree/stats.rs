//! Tree statistics.

use std::fmt;

use super::node::Node;
use super::path::Path;

/// Counts and leaf fill for a tree at one point in time.
///
/// Built from a full traversal by [`BTree::stats`](crate::BTree::stats).
/// Nothing is cached: each call walks the tree again.
///
/// # Example
/// ```
/// use arbor::BTree;
///
/// let mut tree = BTree::new(3).unwrap();
/// for key in [10, 20, 30, 5] {
///     tree.insert(key).unwrap();
/// }
///
/// let stats = tree.stats();
/// assert_eq!(stats.leaf_nodes, 2);
/// println!("{}", stats);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TreeStats {
    pub total_nodes: usize,
    pub index_nodes: usize,
    pub leaf_nodes: usize,

    /// Mean of each leaf's `keys / capacity`, as a percentage.
    ///
    /// Index nodes do not take part.
    pub mean_leaf_fill_percent: f64,

    /// Index levels above the leaf level.
    pub depth: usize,

    /// Keys stored across all leaves.
    pub total_keys: usize,
}

impl TreeStats {
    /// Aggregate over a pre-order traversal.
    ///
    /// Depth is the number of index nodes met before the first leaf, i.e.
    /// the length of the leftmost root-to-leaf path minus one.
    pub fn from_traversal(path: &Path<'_>) -> Self {
        let mut stats = TreeStats {
            total_nodes: 0,
            index_nodes: 0,
            leaf_nodes: 0,
            mean_leaf_fill_percent: 0.0,
            depth: 0,
            total_keys: 0,
        };
        let mut fill_sum = 0.0;

        for node in path.iter() {
            stats.total_nodes += 1;
            match node {
                Node::Index(_) => {
                    stats.index_nodes += 1;
                    if stats.leaf_nodes == 0 {
                        stats.depth += 1;
                    }
                }
                Node::Leaf(leaf) => {
                    stats.leaf_nodes += 1;
                    stats.total_keys += leaf.keys().len();
                    fill_sum += leaf.keys().len() as f64 / leaf.capacity() as f64;
                }
            }
        }

        if stats.leaf_nodes > 0 {
            stats.mean_leaf_fill_percent = fill_sum / stats.leaf_nodes as f64 * 100.0;
        }
        stats
    }
}

/// One decimal always, a second only when it is not zero: 75.0, 66.67.
fn percent_text(percent: f64) -> String {
    let text = format!("{:.2}", percent);
    match text.strip_suffix('0') {
        Some(trimmed) => trimmed.to_string(),
        None => text,
    }
}

impl fmt::Display for TreeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Number of total nodes is {}.", self.total_nodes)?;
        writeln!(f, "Number of index nodes is {}.", self.index_nodes)?;
        writeln!(
            f,
            "Number of leaf nodes is {} and they average {}% full.",
            self.leaf_nodes,
            percent_text(self.mean_leaf_fill_percent)
        )?;
        writeln!(f, "The depth of the tree is {} with", self.depth)?;
        writeln!(
            f,
            "\t{} levels of index nodes and 1 level of leaf nodes.",
            self.depth
        )?;
        writeln!(f)?;
        write!(f, "The total number of values in the tree is {}.", self.total_keys)
    }
}

#[cfg(test)]
mod tests {
    use super::percent_text;
    use crate::BTree;

    #[test]
    fn test_stats_empty_tree() {
        let tree = BTree::new(4).unwrap();
        let stats = tree.stats();

        assert_eq!(stats.total_nodes, 1);
        assert_eq!(stats.index_nodes, 0);
        assert_eq!(stats.leaf_nodes, 1);
        assert_eq!(stats.mean_leaf_fill_percent, 0.0);
        assert_eq!(stats.depth, 0);
        assert_eq!(stats.total_keys, 0);
    }

    #[test]
    fn test_stats_single_leaf() {
        let mut tree = BTree::new(4).unwrap();
        tree.insert(1).unwrap();
        tree.insert(2).unwrap();
        tree.insert(3).unwrap();

        let stats = tree.stats();
        assert_eq!(stats.total_nodes, 1);
        assert_eq!(stats.mean_leaf_fill_percent, 75.0);
        assert_eq!(stats.total_keys, 3);
    }

    #[test]
    fn test_stats_match_tree_counters() {
        let mut tree = BTree::new(3).unwrap();
        for key in 1..=8 {
            tree.insert(key).unwrap();
        }

        let stats = tree.stats();
        assert_eq!(stats.total_nodes, tree.node_count());
        assert_eq!(stats.index_nodes, tree.index_count());
        assert_eq!(stats.leaf_nodes, tree.leaf_count());
        assert_eq!(stats.depth, tree.depth());
        assert_eq!(stats.total_keys, tree.len());

        // Leaves [1 2] [3 4] [5 6] [7 8], all at 2/3
        assert_eq!(stats.leaf_nodes, 4);
        assert_eq!(stats.index_nodes, 3);
        assert_eq!(stats.depth, 2);
        assert!((stats.mean_leaf_fill_percent - 200.0 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_stats_display() {
        let mut tree = BTree::new(3).unwrap();
        for key in [10, 20, 30, 5] {
            tree.insert(key).unwrap();
        }

        let display = format!("{}", tree.stats());

        assert!(display.contains("Number of total nodes is 3."));
        assert!(display.contains("Number of index nodes is 1."));
        assert!(display.contains("Number of leaf nodes is 2 and they average 66.67% full."));
        assert!(display.contains("The depth of the tree is 1 with"));
        assert!(display.contains("1 levels of index nodes and 1 level of leaf nodes."));
        assert!(display.ends_with("The total number of values in the tree is 4."));
    }

    #[test]
    fn test_percent_text_drops_trailing_zero_only() {
        assert_eq!(percent_text(200.0 / 3.0), "66.67");
        assert_eq!(percent_text(75.0), "75.0");
        assert_eq!(percent_text(62.5), "62.5");
        assert_eq!(percent_text(100.0), "100.0");
        assert_eq!(percent_text(0.0), "0.0");
    }
}
