//! arbor - An in-memory B-tree over unique integer keys.
//!
//! # Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                             arbor                               │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │        Shell (menu, input parsing, rendering)            │   │
//! │  │                  [external caller]                       │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              BTree (index/btree/)                        │   │
//! │  │   search → Path     insert → split engine → Path        │   │
//! │  │   traverse → Path   stats → TreeStats   populate        │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! │                              ↓                                  │
//! │  ┌─────────────────────────────────────────────────────────┐   │
//! │  │              Node = Leaf | Index                         │   │
//! │  └─────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Modules
//! - [`common`] - Shared primitives (Error, config)
//! - [`index`] - Index structures (B-tree)
//!
//! # Quick Start
//! ```
//! use arbor::BTree;
//!
//! let mut tree = BTree::new(3).unwrap();
//! for key in [10, 20, 30, 5] {
//!     tree.insert(key).unwrap();
//! }
//!
//! let search = tree.search(20);
//! assert!(search.found);
//! for node in search.path.iter() {
//!     println!("{}\n", node);
//! }
//! println!("{}", tree.stats());
//! ```

pub mod common;
pub mod index;

// Re-export commonly used items at crate root for convenience
pub use common::config::{DEFAULT_CAPACITY, MIN_CAPACITY, POPULATE_RANGE};
pub use common::{Error, Result, TreeConfig};

pub use index::btree::{
    BTree, Index, Insertion, Leaf, Node, NodeKind, Path, PopulateReport, Search, TreeStats,
};
