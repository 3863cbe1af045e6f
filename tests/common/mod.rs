//! Shared test utilities and fixtures.

#![allow(dead_code)]

use crumbtree::{
    Block, Dataset, DatasetSource, Error, FuzzyIndex, HierarchicalIndex, RankingPolicy, Result,
    TreeNode,
};
use std::path::Path;

// Re-export canonical test utilities from crumbtree::testing
pub use crumbtree::testing::{docs_dataset, loaded_index, make_block, make_shared, matched_hrefs};

// ============================================================================
// INDEXES
// ============================================================================

/// Empty fuzzy index with the default ranking policy.
pub fn empty_index() -> HierarchicalIndex<FuzzyIndex> {
    HierarchicalIndex::new(FuzzyIndex::default(), RankingPolicy::default())
}

/// The two-block dataset from the end-to-end example.
pub fn hello_blocks() -> Vec<Block> {
    vec![
        Block::new("/a", vec!["A"], "hello world"),
        Block::new("/a/b", vec!["A", "B"], "goodbye"),
    ]
}

// ============================================================================
// TREE HELPERS
// ============================================================================

/// Labels of a list of sibling nodes.
pub fn labels(nodes: &[TreeNode]) -> Vec<&str> {
    nodes.iter().map(TreeNode::label).collect()
}

/// Find the node at `path` in a forest.
pub fn find<'a>(forest: &'a [TreeNode], path: &[&str]) -> Option<&'a TreeNode> {
    let (first, rest) = path.split_first()?;
    let mut node = forest.iter().find(|n| n.label() == *first)?;
    for segment in rest {
        node = node.children.iter().find(|n| n.label() == *segment)?;
    }
    Some(node)
}

// ============================================================================
// DATASET SOURCES
// ============================================================================

/// A source that always fails, like an unreachable origin.
#[derive(Debug, Clone, Default)]
pub struct FailingSource;

impl DatasetSource for FailingSource {
    async fn fetch(&self, origin: &str) -> Result<Dataset> {
        Err(Error::Fetch(format!("{} is unreachable", origin)))
    }
}

/// Write `dataset` as `content.json` under `dir`.
pub fn write_dataset(dir: &Path, dataset: &Dataset) {
    let json = serde_json::to_string(dataset).unwrap();
    std::fs::write(dir.join("content.json"), json).unwrap();
}
