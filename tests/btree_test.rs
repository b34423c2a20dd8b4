//! B-tree integration tests.
//!
//! These exercise the public API the way an interactive shell would:
//! build a tree, insert and search keys, render paths and statistics.

use arbor::{BTree, Error, Node, NodeKind, TreeConfig, MIN_CAPACITY};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

fn keys_along(path: &arbor::Path<'_>) -> Vec<Vec<i32>> {
    path.iter().map(|node| node.keys().to_vec()).collect()
}

// ============================================================================
// Construction
// ============================================================================

#[test]
fn test_capacity_validation() {
    for capacity in 0..MIN_CAPACITY {
        assert!(matches!(
            BTree::new(capacity),
            Err(Error::InvalidCapacity { .. })
        ));
    }
    assert!(BTree::new(MIN_CAPACITY).is_ok());
    assert_eq!(BTree::with_config(TreeConfig::default()).unwrap().capacity(), 4);
}

// ============================================================================
// Capacity 3 walkthrough
// ============================================================================

/// Fill one leaf, overflow it, and check the resulting two-level tree.
#[test]
fn test_first_split_walkthrough() {
    let mut tree = BTree::new(3).unwrap();

    for key in [10, 20, 30] {
        assert!(tree.insert(key).unwrap());
    }
    // Full, but no split yet
    assert!(tree.root().is_leaf());
    assert_eq!(tree.root().keys(), &[10, 20, 30]);

    assert!(tree.insert(5).unwrap());

    let Node::Index(root) = tree.root() else {
        panic!("root should be an index after the split");
    };
    assert_eq!(root.keys(), &[20]);
    assert_eq!(root.children().len(), 2);
    assert_eq!(root.children()[0].keys(), &[5, 10]);
    assert_eq!(root.children()[1].keys(), &[20, 30]);
    assert_eq!(tree.depth(), 1);

    let hit = tree.search(20);
    assert!(hit.found);
    assert_eq!(keys_along(&hit.path), vec![vec![20], vec![20, 30]]);
    assert_eq!(hit.path.nodes()[0].kind(), NodeKind::Index);
    assert_eq!(hit.path.nodes()[1].kind(), NodeKind::Leaf);

    let miss = tree.search(15);
    assert!(!miss.found);
    assert_eq!(keys_along(&miss.path), vec![vec![20], vec![5, 10]]);
    assert!(!tree.contains(15));
}

#[test]
fn test_first_split_stats() {
    let mut tree = BTree::new(3).unwrap();
    for key in [10, 20, 30, 5] {
        tree.insert(key).unwrap();
    }

    let stats = tree.stats();
    assert_eq!(stats.total_nodes, 3);
    assert_eq!(stats.index_nodes, 1);
    assert_eq!(stats.leaf_nodes, 2);
    assert!((stats.mean_leaf_fill_percent - 66.666_666).abs() < 1e-3);
    assert_eq!(stats.depth, 1);
    assert_eq!(stats.total_keys, 4);
    assert!(format!("{}", stats).contains("average 66.67% full"));
}

// ============================================================================
// Duplicates
// ============================================================================

#[test]
fn test_duplicate_insert_is_idempotent() {
    let mut tree = BTree::new(4).unwrap();

    assert!(tree.insert(7).unwrap());
    let before = tree.len();
    assert!(!tree.insert(7).unwrap());

    assert_eq!(tree.len(), before);
    assert_eq!(tree.stats().total_keys, 1);
}

#[test]
fn test_duplicates_after_splits() {
    let mut tree = BTree::new(3).unwrap();
    for key in 0..100 {
        tree.insert(key).unwrap();
    }
    let nodes = tree.node_count();

    for key in 0..100 {
        assert!(!tree.insert(key).unwrap());
    }

    assert_eq!(tree.len(), 100);
    assert_eq!(tree.node_count(), nodes);
    tree.validate().unwrap();
}

// ============================================================================
// Larger trees
// ============================================================================

/// Shuffled inserts at several capacities keep every invariant.
#[test]
fn test_shuffled_round_trip() {
    let mut rng = StdRng::seed_from_u64(0xB7EE);

    for capacity in [3, 4, 5, 8, 16] {
        let mut keys: Vec<i32> = (0..2_000).map(|k| k * 3).collect();
        keys.shuffle(&mut rng);

        let mut tree = BTree::new(capacity).unwrap();
        for &key in &keys {
            assert!(tree.insert(key).unwrap());
        }
        tree.validate().unwrap();

        for &key in &keys {
            assert!(tree.contains(key), "capacity {} lost {}", capacity, key);
            assert!(!tree.contains(key + 1));
        }

        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(tree.keys(), sorted);
    }
}

/// Every search path has one node per level and ends at a leaf.
#[test]
fn test_search_paths_are_balanced() {
    let mut tree = BTree::new(3).unwrap();
    for key in (0..500).rev() {
        tree.insert(key).unwrap();
    }

    for key in -10..510 {
        let search = tree.search(key);
        assert_eq!(search.path.len(), tree.depth() + 1);
        assert!(search.path.leaf().is_some());
        assert_eq!(search.found, (0..500).contains(&key));
    }
}

#[test]
fn test_traversal_visits_every_node_once() {
    let mut tree = BTree::new(4).unwrap();
    for key in 0..300 {
        tree.insert(key * 11 % 997).unwrap();
    }

    let walk = tree.traverse();
    assert_eq!(walk.len(), tree.node_count());

    // Pre-order: the root comes first and indexes precede their leaves
    assert!(std::ptr::eq(walk.first().unwrap(), tree.root()));
    assert_eq!(
        walk.iter().filter(|n| n.kind() == NodeKind::Leaf).count(),
        tree.leaf_count()
    );
}

// ============================================================================
// Rendering
// ============================================================================

#[test]
fn test_path_display() {
    let mut tree = BTree::new(3).unwrap();
    for key in [10, 20, 30, 5] {
        tree.insert(key).unwrap();
    }

    let rendered = format!("{}", tree.search(5).path);
    assert_eq!(
        rendered,
        "Node Type: Index\nNumber of values: 2\nNode is 66.7% full.\nValues:\n** 20\n\n\
         Node Type: Leaf\nNumber of values: 2\nNode is 66.7% full.\nValues:\n5 10"
    );
}

// ============================================================================
// Population
// ============================================================================

#[test]
fn test_populate_then_insert() {
    let mut tree = BTree::new(6).unwrap();
    let mut rng = StdRng::seed_from_u64(2016);

    let report = tree.populate(1_000, &mut rng).unwrap();
    assert_eq!(report.added, 1_000);

    // Keys outside the populate range never collide
    assert!(tree.insert(-1).unwrap());
    assert!(tree.insert(10_000).unwrap());
    assert_eq!(tree.len(), 1_002);
    tree.validate().unwrap();
}
