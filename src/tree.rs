// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Rebuilding the breadcrumb hierarchy around a set of matches.
//!
//! The input is a ranked flat list of blocks. The output groups them under
//! their shared breadcrumb prefixes:
//!
//! ```text
//! ranked: A ["x","y"], B ["x"], C ["x","z"]
//!
//! (root)
//! └── x          node = B
//!     ├── x/y    node = A
//!     └── x/z    node = C
//! ```
//!
//! Children appear in the order their first descendant appears in the input.
//! That is what makes the tree ranked and not just grouped: "x/y" comes before
//! "x/z" because A outranked C.
//!
//! # Invariants
//!
//! - Every input block is the `node` of exactly one tree node, provided no two
//!   input blocks share a breadcrumb path. With a shared path, the first one
//!   in input order wins the node and the rest are unreachable.
//! - Nothing that wasn't in the input ever shows up as a `node`.
//!
//! # Cost
//!
//! Each level rescans its subset, so this is O(n²) in the number of matched
//! blocks. Result sets are tens of blocks. Don't swap this for a trie without
//! keeping first-seen child order.

use crate::types::{Block, TreeNode};
use std::collections::HashSet;
use std::sync::Arc;

/// Resolves a breadcrumb path to the href of the block living there.
///
/// The result tree asks this for every node, including intermediate grouping
/// nodes that no matched block sits on, so it should see every ingested block
/// and not just the matches.
pub trait PathLookup {
    fn href_for(&self, path: &[String]) -> Option<String>;
}

/// No external lookup: nodes only get an href from their own matched block.
impl PathLookup for () {
    fn href_for(&self, _path: &[String]) -> Option<String> {
        None
    }
}

/// Build the result tree rooted at `prefix` from `blocks`.
///
/// The top-level call passes `&[]` and keeps only the returned root's
/// `children`; the root itself is synthetic.
pub fn build_tree<L>(prefix: &[String], blocks: &[Arc<Block>], lookup: &L) -> TreeNode
where
    L: PathLookup + ?Sized,
{
    let depth = prefix.len();

    let node = blocks.iter().find(|block| block.is_at(prefix)).cloned();

    let descendants: Vec<Arc<Block>> = blocks
        .iter()
        .filter(|block| block.depth() > depth && block.starts_with(prefix))
        .cloned()
        .collect();

    let mut seen: HashSet<&str> = HashSet::new();
    let child_segments: Vec<&str> = descendants
        .iter()
        .map(|block| block.breadcrumbs[depth].as_str())
        .filter(|segment| seen.insert(*segment))
        .collect();

    let children = child_segments
        .into_iter()
        .map(|segment| {
            let mut child_prefix = prefix.to_vec();
            child_prefix.push(segment.to_string());
            build_tree(&child_prefix, &descendants, lookup)
        })
        .collect();

    let href = lookup
        .href_for(prefix)
        .or_else(|| node.as_ref().map(|block| block.href.clone()));

    TreeNode {
        breadcrumbs: prefix.to_vec(),
        href,
        node,
        children,
    }
}

/// The top-level result list: the children of the synthetic root.
pub fn build_forest<L>(blocks: &[Arc<Block>], lookup: &L) -> Vec<TreeNode>
where
    L: PathLookup + ?Sized,
{
    if blocks.is_empty() {
        return Vec::new();
    }
    build_tree(&[], blocks, lookup).children
}
