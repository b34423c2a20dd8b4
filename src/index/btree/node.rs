//! B-tree node types.
//!
//! A [`Node`] is either a [`Leaf`] holding keys directly or an [`Index`]
//! routing to child nodes. Both share a capacity: the most keys a leaf
//! (or children an index) may hold once an operation has finished.

use std::fmt;

/// Which variant a node is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Leaf,
    Index,
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeKind::Leaf => write!(f, "Leaf"),
            NodeKind::Index => write!(f, "Index"),
        }
    }
}

/// Result of adding an entry to a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum InsertStatus {
    /// Entry added, node within capacity.
    Inserted,
    /// Entry added, node now holds `capacity + 1` entries.
    NeedsSplit,
    /// Entry already present, node unchanged.
    Duplicate,
}

// ============================================================================
// NODE
// ============================================================================

/// A node in the tree.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Node {
    Leaf(Leaf),
    Index(Index),
}

impl Node {
    /// The node's variant tag.
    pub fn kind(&self) -> NodeKind {
        match self {
            Node::Leaf(_) => NodeKind::Leaf,
            Node::Index(_) => NodeKind::Index,
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Node::Leaf(_))
    }

    /// Maximum entries this node may hold.
    pub fn capacity(&self) -> usize {
        match self {
            Node::Leaf(leaf) => leaf.capacity,
            Node::Index(index) => index.capacity,
        }
    }

    /// Stored keys (leaf) or separator keys (index), ascending.
    pub fn keys(&self) -> &[i32] {
        match self {
            Node::Leaf(leaf) => &leaf.keys,
            Node::Index(index) => &index.keys,
        }
    }

    /// Entries counted against capacity.
    ///
    /// Leaves count keys; indexes count children, which is one more than
    /// their separator keys.
    pub fn occupancy(&self) -> usize {
        match self {
            Node::Leaf(leaf) => leaf.keys.len(),
            Node::Index(index) => index.children.len(),
        }
    }

    /// Occupancy as a percentage of capacity (0.0 to 100.0).
    pub fn fill_percent(&self) -> f64 {
        self.occupancy() as f64 / self.capacity() as f64 * 100.0
    }

    /// Smallest key stored in the subtree rooted here.
    ///
    /// Follows the first child down to a leaf. Returns `None` only for an
    /// empty leaf, which can only be the root of an empty tree.
    pub fn min_key(&self) -> Option<i32> {
        let mut node = self;
        loop {
            match node {
                Node::Leaf(leaf) => return leaf.min_key(),
                Node::Index(index) => node = index.children.first()?,
            }
        }
    }
}

impl fmt::Display for Node {
    /// Renders the node the way the interactive shell prints it:
    /// variant, occupancy, fill and keys. Index nodes lead with `**` for
    /// the first child's range, which has no separator.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Node Type: {}", self.kind())?;
        writeln!(f, "Number of values: {}", self.occupancy())?;
        writeln!(f, "Node is {:.1}% full.", self.fill_percent())?;
        writeln!(f, "Values:")?;

        let mut values: Vec<String> = Vec::with_capacity(self.keys().len() + 1);
        if let Node::Index(_) = self {
            values.push("**".to_string());
        }
        values.extend(self.keys().iter().map(|k| k.to_string()));
        write!(f, "{}", values.join(" "))
    }
}

// ============================================================================
// LEAF
// ============================================================================

/// Terminal node holding keys in ascending order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Leaf {
    capacity: usize,
    keys: Vec<i32>,
}

impl Leaf {
    pub(crate) fn new(capacity: usize) -> Self {
        Self {
            capacity,
            keys: Vec::new(),
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn keys(&self) -> &[i32] {
        &self.keys
    }

    pub fn min_key(&self) -> Option<i32> {
        self.keys.first().copied()
    }

    pub fn contains(&self, key: i32) -> bool {
        self.keys.binary_search(&key).is_ok()
    }

    /// Add `key` in sorted position.
    ///
    /// The key is stored even when it pushes the leaf past capacity; the
    /// caller must then [`split`](Self::split).
    pub(crate) fn insert(&mut self, key: i32) -> InsertStatus {
        match self.keys.binary_search(&key) {
            Ok(_) => InsertStatus::Duplicate,
            Err(pos) => {
                self.keys.insert(pos, key);
                if self.keys.len() > self.capacity {
                    InsertStatus::NeedsSplit
                } else {
                    InsertStatus::Inserted
                }
            }
        }
    }

    /// Move the upper half of the keys into a new sibling leaf.
    ///
    /// Splits at `len / 2`, so an odd count leaves the extra key in the
    /// sibling.
    pub(crate) fn split(&mut self) -> Leaf {
        let upper = self.keys.split_off(self.keys.len() / 2);
        Leaf {
            capacity: self.capacity,
            keys: upper,
        }
    }
}

// ============================================================================
// INDEX
// ============================================================================

/// Interior node routing searches to its children.
///
/// `keys[i]` is the smallest key under `children[i + 1]`. The first child
/// has no separator: it holds everything below `keys[0]`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Index {
    capacity: usize,
    keys: Vec<i32>,
    children: Vec<Node>,
}

impl Index {
    /// Build a two-child index from a node that just split.
    pub(crate) fn from_split(capacity: usize, lower: Node, separator: i32, upper: Node) -> Self {
        Self {
            capacity,
            keys: vec![separator],
            children: vec![lower, upper],
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn keys(&self) -> &[i32] {
        &self.keys
    }

    pub fn children(&self) -> &[Node] {
        &self.children
    }

    /// Smallest key under this index, found through its first child.
    pub fn min_key(&self) -> Option<i32> {
        self.children.first()?.min_key()
    }

    pub(crate) fn child_mut(&mut self, slot: usize) -> Option<&mut Node> {
        self.children.get_mut(slot)
    }

    /// Slot of the child whose range covers `key`.
    ///
    /// Scans separators left to right and stops at the first one greater
    /// than `key`; a key at or above every separator goes to the last child.
    pub fn child_slot(&self, key: i32) -> usize {
        self.keys
            .iter()
            .position(|&separator| separator > key)
            .unwrap_or(self.keys.len())
    }

    /// Register `child` at `slot`, keyed by `separator`.
    ///
    /// `slot` must be at least 1: the first child never gains a separator.
    /// A separator that is already present is refused and the index is left
    /// unchanged.
    pub(crate) fn insert_child(&mut self, slot: usize, separator: i32, child: Node) -> InsertStatus {
        if slot == 0 || slot > self.children.len() || self.keys.contains(&separator) {
            return InsertStatus::Duplicate;
        }
        debug_assert!(slot < 2 || self.keys[slot - 2] < separator);
        debug_assert!(slot > self.keys.len() || separator < self.keys[slot - 1]);

        self.keys.insert(slot - 1, separator);
        self.children.insert(slot, child);

        if self.children.len() > self.capacity {
            InsertStatus::NeedsSplit
        } else {
            InsertStatus::Inserted
        }
    }

    /// Move the upper half of the children into a new sibling index.
    ///
    /// Both halves rebuild their separators from their children's minimum
    /// keys. Returns `None` if some child has no minimum key, which means
    /// the tree is already broken.
    pub(crate) fn split(&mut self) -> Option<Index> {
        let upper = self.children.split_off(self.children.len() / 2);
        let upper_keys = separators(&upper)?;
        self.keys = separators(&self.children)?;
        Some(Index {
            capacity: self.capacity,
            keys: upper_keys,
            children: upper,
        })
    }
}

/// Minimum key of every child but the first.
fn separators(children: &[Node]) -> Option<Vec<i32>> {
    children.iter().skip(1).map(Node::min_key).collect()
}
