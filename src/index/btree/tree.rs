//! The B-tree: search, insertion with split propagation, and traversal.

use log::{debug, error, trace};

use super::node::{Index, InsertStatus, Leaf, Node};
use super::path::Path;
use super::stats::TreeStats;
use crate::common::{Error, Result, TreeConfig};

/// An in-memory B-tree over unique `i32` keys.
///
/// # Structure
/// ```text
///                  Index [** 20 40]
///                 /        |       \
///   Leaf [5 10]    Leaf [20 30]    Leaf [40 50 60]
/// ```
/// Every leaf sits at the same depth. An index with separators `[20, 40]`
/// sends keys `< 20` to its first child, `[20, 40)` to its second and
/// `>= 40` to its third.
///
/// # Growth
/// A node may hold `capacity` entries. Inserting into a full leaf splits it
/// in half and registers the upper half with the parent, which may split in
/// turn. When the root splits, a new root is placed above it and the tree
/// grows one level.
///
/// # Example
/// ```
/// use arbor::BTree;
///
/// let mut tree = BTree::new(3).unwrap();
/// assert!(tree.insert(10).unwrap());
/// assert!(!tree.insert(10).unwrap()); // duplicate
/// assert!(tree.contains(10));
/// ```
#[derive(Debug, Clone)]
pub struct BTree {
    /// Always present; an empty leaf until the first insert.
    root: Node,

    /// Max keys per leaf and children per index.
    capacity: usize,

    node_count: usize,
    leaf_count: usize,
    index_count: usize,

    /// Index levels above the leaves.
    depth: usize,

    /// Keys stored across all leaves.
    len: usize,
}

/// Outcome of [`BTree::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Search<'a> {
    /// Whether the leaf at the end of `path` holds the key.
    pub found: bool,
    /// Root-to-leaf nodes visited.
    pub path: Path<'a>,
}

/// Outcome of [`BTree::insert_traced`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Insertion<'a> {
    /// `false` if the key was already present.
    pub inserted: bool,
    /// Root-to-leaf path to the leaf now holding the key.
    ///
    /// For a duplicate this is the search path that found it.
    pub path: Path<'a>,
}

/// Child slots leading from the root to a leaf.
struct Located {
    found: bool,
    route: Vec<usize>,
}

/// Nodes created while an insert propagated splits upward.
#[derive(Default)]
struct Growth {
    leaves: usize,
    indexes: usize,
}

/// What inserting below one node did to it.
struct Placement {
    /// Upper half split off the node, with its minimum key.
    sibling: Option<(i32, Node)>,
    /// Whether the inserted key went to `sibling`.
    in_sibling: bool,
    /// Child slots below whichever half holds the key, deepest first.
    route_rev: Vec<usize>,
}

impl Placement {
    fn settled(route_rev: Vec<usize>) -> Self {
        Self {
            sibling: None,
            in_sibling: false,
            route_rev,
        }
    }
}

fn violation(detail: String) -> Error {
    error!("{}", detail);
    Error::InvariantViolation(detail)
}

impl BTree {
    /// Create an empty tree whose nodes hold up to `capacity` entries.
    ///
    /// # Errors
    /// `Error::InvalidCapacity` if `capacity` is below
    /// [`MIN_CAPACITY`](crate::common::config::MIN_CAPACITY).
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_config(TreeConfig::new(capacity))
    }

    /// Create an empty tree from a [`TreeConfig`].
    pub fn with_config(config: TreeConfig) -> Result<Self> {
        config.validate()?;
        debug!("creating B-tree with capacity {}", config.capacity);

        Ok(Self {
            root: Node::Leaf(Leaf::new(config.capacity)),
            capacity: config.capacity,
            node_count: 1,
            leaf_count: 1,
            index_count: 0,
            depth: 0,
            len: 0,
        })
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn root(&self) -> &Node {
        &self.root
    }

    /// Number of keys stored.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Index levels above the leaf level (0 while the root is a leaf).
    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn leaf_count(&self) -> usize {
        self.leaf_count
    }

    pub fn index_count(&self) -> usize {
        self.index_count
    }

    // ========================================================================
    // Search
    // ========================================================================

    /// Check whether `key` is stored.
    pub fn contains(&self, key: i32) -> bool {
        self.locate(key).found
    }

    /// Find the leaf that would hold `key`, recording the path to it.
    pub fn search(&self, key: i32) -> Search<'_> {
        let located = self.locate(key);
        Search {
            found: located.found,
            path: self.path_along(&located.route),
        }
    }

    fn locate(&self, key: i32) -> Located {
        let mut route = Vec::with_capacity(self.depth);
        let mut node = &self.root;

        loop {
            match node {
                Node::Index(index) => {
                    let slot = index.child_slot(key);
                    trace!("search {}: descending into child {} of {:?}", key, slot, index.keys());
                    route.push(slot);
                    node = &index.children()[slot];
                }
                Node::Leaf(leaf) => {
                    let found = leaf.contains(key);
                    trace!("search {}: reached leaf {:?}, found={}", key, leaf.keys(), found);
                    return Located { found, route };
                }
            }
        }
    }

    /// Materialize a root-to-leaf path from child slots.
    fn path_along(&self, route: &[usize]) -> Path<'_> {
        let mut path = Path::new();
        let mut node = &self.root;
        path.push(node);

        for &slot in route {
            match node {
                Node::Index(index) => match index.children().get(slot) {
                    Some(child) => {
                        node = child;
                        path.push(node);
                    }
                    None => break,
                },
                Node::Leaf(_) => break,
            }
        }
        path
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Insert `key`.
    ///
    /// Returns `Ok(false)` without changing the tree if `key` is already
    /// present.
    ///
    /// # Errors
    /// `Error::InvariantViolation` if the tree turns out to be inconsistent
    /// mid-insert. The tree must be discarded after that.
    pub fn insert(&mut self, key: i32) -> Result<bool> {
        Ok(self.insert_traced(key)?.inserted)
    }

    /// Insert `key` and return the path to the leaf that holds it.
    ///
    /// When splits occur, the path follows whichever half of each split
    /// node received the key.
    pub fn insert_traced(&mut self, key: i32) -> Result<Insertion<'_>> {
        let located = self.locate(key);
        if located.found {
            debug!("insert {}: already present", key);
            return Ok(Insertion {
                inserted: false,
                path: self.path_along(&located.route),
            });
        }

        let route = self.insert_along(key, &located.route)?;
        self.len += 1;

        Ok(Insertion {
            inserted: true,
            path: self.path_along(&route),
        })
    }

    /// Insert below the root following `route`; returns the route to the
    /// key afterwards.
    fn insert_along(&mut self, key: i32, route: &[usize]) -> Result<Vec<usize>> {
        let mut growth = Growth::default();
        let placement = match insert_below(&mut self.root, key, route, &mut growth) {
            Ok(placement) => placement,
            Err(err) => {
                // Splits below the failure may already have reshaped the tree
                self.recount();
                return Err(err);
            }
        };

        self.leaf_count += growth.leaves;
        self.index_count += growth.indexes;
        self.node_count += growth.leaves + growth.indexes;

        let mut route_rev = placement.route_rev;
        if let Some((separator, sibling)) = placement.sibling {
            self.grow_root(separator, sibling);
            route_rev.push(usize::from(placement.in_sibling));
        }
        route_rev.reverse();
        Ok(route_rev)
    }

    /// Reset every counter from a fresh walk of the tree.
    fn recount(&mut self) {
        let stats = self.stats();
        self.node_count = stats.total_nodes;
        self.leaf_count = stats.leaf_nodes;
        self.index_count = stats.index_nodes;
        self.depth = stats.depth;
        self.len = stats.total_keys;
    }

    /// Put a new index above the split root.
    fn grow_root(&mut self, separator: i32, sibling: Node) {
        let lower = std::mem::replace(&mut self.root, Node::Leaf(Leaf::new(self.capacity)));
        self.root = Node::Index(Index::from_split(self.capacity, lower, separator, sibling));
        self.depth += 1;
        self.index_count += 1;
        self.node_count += 1;
        debug!("root split at {}: depth now {}", separator, self.depth);
    }

    // ========================================================================
    // Traversal
    // ========================================================================

    /// Every node in pre-order: a node, then each of its children left to
    /// right.
    pub fn traverse(&self) -> Path<'_> {
        let mut path = Path::new();
        let mut stack = vec![&self.root];

        while let Some(node) = stack.pop() {
            path.push(node);
            if let Node::Index(index) = node {
                stack.extend(index.children().iter().rev());
            }
        }
        path
    }

    /// All stored keys in ascending order.
    pub fn keys(&self) -> Vec<i32> {
        let mut keys = Vec::with_capacity(self.len);
        for node in self.traverse().iter() {
            if let Node::Leaf(leaf) = node {
                keys.extend_from_slice(leaf.keys());
            }
        }
        keys
    }

    /// Aggregate node counts and leaf fill over the current structure.
    pub fn stats(&self) -> TreeStats {
        TreeStats::from_traversal(&self.traverse())
    }

    // ========================================================================
    // Validation
    // ========================================================================

    /// Check every structural invariant of the tree.
    ///
    /// Verifies capacity bounds, key ordering, separators, global key
    /// ordering between leaves, balance, and the tree's own counters.
    ///
    /// # Errors
    /// `Error::InvariantViolation` describing the first broken invariant.
    pub fn validate(&self) -> Result<()> {
        let mut tally = Tally::default();
        let leaf_depth = check_node(&self.root, None, None, true, &mut tally)?;

        if leaf_depth != self.depth {
            return Err(violation(format!(
                "leaves at depth {} but tree records depth {}",
                leaf_depth, self.depth
            )));
        }
        if tally.leaves != self.leaf_count || tally.indexes != self.index_count {
            return Err(violation(format!(
                "found {} leaves and {} indexes but tree records {} and {}",
                tally.leaves, tally.indexes, self.leaf_count, self.index_count
            )));
        }
        if self.node_count != self.leaf_count + self.index_count {
            return Err(violation(format!(
                "node count {} is not leaves + indexes",
                self.node_count
            )));
        }
        if tally.keys != self.len {
            return Err(violation(format!(
                "found {} keys but tree records {}",
                tally.keys, self.len
            )));
        }
        Ok(())
    }
}

/// Insert `key` under `node`, splitting on the way back up.
fn insert_below(
    node: &mut Node,
    key: i32,
    route: &[usize],
    growth: &mut Growth,
) -> Result<Placement> {
    match node {
        Node::Leaf(leaf) => match leaf.insert(key) {
            InsertStatus::Inserted => Ok(Placement::settled(Vec::new())),
            InsertStatus::Duplicate => Err(violation(format!(
                "search reported {} absent but its leaf already holds it",
                key
            ))),
            InsertStatus::NeedsSplit => {
                let sibling = leaf.split();
                let separator = sibling
                    .min_key()
                    .ok_or_else(|| violation("leaf split produced an empty sibling".to_string()))?;
                growth.leaves += 1;
                debug!(
                    "leaf split: {:?} | {:?} (separator {})",
                    leaf.keys(),
                    sibling.keys(),
                    separator
                );
                Ok(Placement {
                    sibling: Some((separator, Node::Leaf(sibling))),
                    in_sibling: key >= separator,
                    route_rev: Vec::new(),
                })
            }
        },
        Node::Index(index) => {
            let (&slot, rest) = route
                .split_first()
                .ok_or_else(|| violation("route ended above the leaf level".to_string()))?;
            let child = index
                .child_mut(slot)
                .ok_or_else(|| violation(format!("route slot {} out of bounds", slot)))?;

            let below = insert_below(child, key, rest, growth)?;
            let mut route_rev = below.route_rev;

            let Some((separator, sibling)) = below.sibling else {
                route_rev.push(slot);
                return Ok(Placement::settled(route_rev));
            };
            let sibling_slot = slot + 1;
            let slot = if below.in_sibling { sibling_slot } else { slot };

            match index.insert_child(sibling_slot, separator, sibling) {
                InsertStatus::Inserted => {
                    route_rev.push(slot);
                    Ok(Placement::settled(route_rev))
                }
                InsertStatus::Duplicate => Err(violation(format!(
                    "index {:?} refused separator {} at child {}",
                    index.keys(),
                    separator,
                    sibling_slot
                ))),
                InsertStatus::NeedsSplit => {
                    let upper = index.split().ok_or_else(|| {
                        violation("index split found a child with no keys".to_string())
                    })?;
                    let upper_min = upper.min_key().ok_or_else(|| {
                        violation("index split produced an empty sibling".to_string())
                    })?;
                    growth.indexes += 1;
                    debug!(
                        "index split: {:?} | {:?} (separator {})",
                        index.keys(),
                        upper.keys(),
                        upper_min
                    );

                    let in_sibling = key >= upper_min;
                    let lower_len = index.children().len();
                    let slot = match (in_sibling, slot.checked_sub(lower_len)) {
                        (true, Some(upper_slot)) => upper_slot,
                        (false, None) => slot,
                        _ => {
                            return Err(violation(format!(
                                "key {} in child {} disagrees with index split at {}",
                                key, slot, lower_len
                            )))
                        }
                    };
                    route_rev.push(slot);

                    Ok(Placement {
                        sibling: Some((upper_min, Node::Index(upper))),
                        in_sibling,
                        route_rev,
                    })
                }
            }
        }
    }
}

#[derive(Default)]
struct Tally {
    leaves: usize,
    indexes: usize,
    keys: usize,
}

/// Check the subtree at `node`, whose keys must all lie in `[lower, upper)`.
///
/// Returns the number of index levels from `node` down to its leaves.
fn check_node(
    node: &Node,
    lower: Option<i32>,
    upper: Option<i32>,
    is_root: bool,
    tally: &mut Tally,
) -> Result<usize> {
    let keys = node.keys();
    if node.occupancy() > node.capacity() {
        return Err(violation(format!(
            "{} node holds {} entries, capacity {}",
            node.kind(),
            node.occupancy(),
            node.capacity()
        )));
    }
    if keys.windows(2).any(|pair| pair[0] >= pair[1]) {
        return Err(violation(format!("{} keys not ascending: {:?}", node.kind(), keys)));
    }

    match node {
        Node::Leaf(leaf) => {
            if leaf.keys().is_empty() && !is_root {
                return Err(violation("non-root leaf is empty".to_string()));
            }
            let out_of_range = leaf
                .keys()
                .iter()
                .find(|&&k| lower.is_some_and(|lo| k < lo) || upper.is_some_and(|hi| k >= hi));
            if let Some(k) = out_of_range {
                return Err(violation(format!(
                    "key {} outside its leaf range [{:?}, {:?})",
                    k, lower, upper
                )));
            }
            tally.leaves += 1;
            tally.keys += leaf.keys().len();
            Ok(0)
        }
        Node::Index(index) => {
            let children = index.children();
            if children.len() < 2 || children.len() != keys.len() + 1 {
                return Err(violation(format!(
                    "index has {} children for {} separators",
                    children.len(),
                    keys.len()
                )));
            }
            tally.indexes += 1;

            let mut height = None;
            for (i, child) in children.iter().enumerate() {
                if i > 0 && child.min_key() != Some(keys[i - 1]) {
                    return Err(violation(format!(
                        "separator {} does not match child minimum {:?}",
                        keys[i - 1],
                        child.min_key()
                    )));
                }
                let child_lower = if i == 0 { lower } else { Some(keys[i - 1]) };
                let child_upper = keys.get(i).copied().or(upper);
                let child_height = check_node(child, child_lower, child_upper, false, tally)?;

                match height {
                    None => height = Some(child_height),
                    Some(h) if h != child_height => {
                        return Err(violation(format!(
                            "unbalanced index {:?}: children at heights {} and {}",
                            keys, h, child_height
                        )));
                    }
                    Some(_) => {}
                }
            }
            Ok(height.unwrap_or(0) + 1)
        }
    }
}
