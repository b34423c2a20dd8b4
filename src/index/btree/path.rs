//! Recorded sequences of visited nodes.

use std::fmt;

use super::node::{Leaf, Node};

/// Nodes visited by one tree operation, in visiting order.
///
/// For a search or insert this is root-to-leaf. For a traversal it is
/// every node in pre-order. A path borrows the tree, so it cannot outlive
/// the next mutation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path<'a> {
    nodes: Vec<&'a Node>,
}

impl<'a> Path<'a> {
    pub(crate) fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    pub(crate) fn push(&mut self, node: &'a Node) {
        self.nodes.push(node);
    }

    pub fn nodes(&self) -> &[&'a Node] {
        &self.nodes
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// The node the path starts at.
    pub fn first(&self) -> Option<&'a Node> {
        self.nodes.first().copied()
    }

    /// The leaf a root-to-leaf path ends at.
    pub fn leaf(&self) -> Option<&'a Leaf> {
        match self.nodes.last() {
            Some(Node::Leaf(leaf)) => Some(leaf),
            _ => None,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a Node> + '_ {
        self.nodes.iter().copied()
    }
}

impl fmt::Display for Path<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, node) in self.nodes.iter().enumerate() {
            if i > 0 {
                write!(f, "\n\n")?;
            }
            write!(f, "{}", node)?;
        }
        Ok(())
    }
}
