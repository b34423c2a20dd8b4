//! Index structures.
//!
//! Currently implements:
//! - [`btree`] - In-memory B-tree over `i32` keys

pub mod btree;
