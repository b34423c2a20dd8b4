//! B-tree index over unique integer keys.
//!
//! # Components
//! - [`BTree`] - The tree: search, insert with split propagation, traversal
//! - [`Node`] / [`Leaf`] / [`Index`] - Node variants
//! - [`Path`] - Nodes visited by an operation, root first
//! - [`TreeStats`] - Node counts and leaf fill
//! - [`PopulateReport`] - Outcome of random bulk population

mod node;
mod path;
mod populate;
mod stats;
mod tree;

pub use node::{Index, Leaf, Node, NodeKind};
pub use path::Path;
pub use populate::PopulateReport;
pub use stats::TreeStats;
pub use tree::{BTree, Insertion, Search};
