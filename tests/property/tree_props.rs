//! Every input block lands exactly once in the result tree.

use crumbtree::{build_forest, build_tree, Block, TreeNode};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;

// =============================================================================
// STRATEGIES
// =============================================================================

/// Short segments from a tiny alphabet so paths share prefixes often.
fn segment_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[abc]{1,2}").unwrap()
}

fn path_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(segment_strategy(), 1..5)
}

/// Blocks with pairwise distinct breadcrumb paths, in random order.
fn distinct_blocks_strategy() -> impl Strategy<Value = Vec<Arc<Block>>> {
    prop::collection::btree_set(path_strategy(), 1..25)
        .prop_map(|paths: BTreeSet<Vec<String>>| paths.into_iter().collect::<Vec<_>>())
        .prop_shuffle()
        .prop_map(|paths| {
            paths
                .into_iter()
                .enumerate()
                .map(|(i, path)| Arc::new(Block::new(format!("/{}", i), path, "")))
                .collect()
        })
}

fn all_nodes(forest: &[TreeNode]) -> Vec<&TreeNode> {
    forest.iter().flat_map(TreeNode::walk).collect()
}

// =============================================================================
// PROPERTIES
// =============================================================================

proptest! {
    #[test]
    fn prop_every_block_appears_exactly_once(blocks in distinct_blocks_strategy()) {
        let forest = build_forest(&blocks, &());
        let placed: Vec<&str> = all_nodes(&forest)
            .into_iter()
            .filter_map(|n| n.node.as_ref())
            .map(|b| b.href.as_str())
            .collect();

        prop_assert_eq!(placed.len(), blocks.len());
        let unique: HashSet<&str> = placed.iter().copied().collect();
        prop_assert_eq!(unique.len(), blocks.len());
    }

    #[test]
    fn prop_nodes_only_hold_input_blocks_at_their_path(blocks in distinct_blocks_strategy()) {
        let input: HashSet<&str> = blocks.iter().map(|b| b.href.as_str()).collect();
        let forest = build_forest(&blocks, &());
        for node in all_nodes(&forest) {
            if let Some(block) = &node.node {
                prop_assert!(input.contains(block.href.as_str()));
                prop_assert_eq!(&block.breadcrumbs, &node.breadcrumbs);
            }
        }
    }

    #[test]
    fn prop_children_extend_parent_by_one_segment(blocks in distinct_blocks_strategy()) {
        let root = build_tree(&[], &blocks, &());
        for node in root.walk() {
            let mut seen = HashSet::new();
            for child in &node.children {
                prop_assert_eq!(child.breadcrumbs.len(), node.breadcrumbs.len() + 1);
                prop_assert!(child.breadcrumbs.starts_with(&node.breadcrumbs));
                prop_assert!(seen.insert(child.label().to_string()), "duplicate sibling");
            }
        }
    }

    #[test]
    fn prop_first_child_holds_first_block(blocks in distinct_blocks_strategy()) {
        let forest = build_forest(&blocks, &());
        prop_assert_eq!(forest[0].label(), blocks[0].breadcrumbs[0].as_str());
    }
}
