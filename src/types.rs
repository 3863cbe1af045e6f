// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The data that flows through the index.
//!
//! Two shapes matter. A [`Block`] is what gets ingested: one chunk of docs text
//! with a breadcrumb path saying where it lives. A [`TreeNode`] is what comes
//! back: matched blocks regrouped under their shared breadcrumb prefixes.
//!
//! # Invariants
//!
//! - **Block**: `href` is unique across a store. Ingesting a second block with
//!   the same href is a no-op (first write wins).
//! - **Block**: `breadcrumbs` is non-empty for anything that gets indexed.
//! - **TreeNode**: `node`, when present, is a block whose breadcrumbs equal the
//!   node's `breadcrumbs` exactly.
//!
//! Both serialize to the same JSON the browser side already consumes, so field
//! names here are part of the wire protocol.

use serde::{Deserialize, Deserializer, Serialize};
use std::sync::Arc;

// =============================================================================
// BLOCKS
// =============================================================================

/// An immutable, indexable unit of content.
///
/// Blocks are built once from the dataset, shared behind `Arc` for the
/// lifetime of the index, and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Unique stable identifier. Also the text index document key.
    pub href: String,
    /// Path segments from the root of the docs down to this block.
    pub breadcrumbs: Vec<String>,
    /// Searchable body text.
    #[serde(default)]
    pub content: String,
    /// Manual importance hint. Lower is more important; `None` behaves as `0`.
    #[serde(
        default,
        deserialize_with = "lenient_rank",
        skip_serializing_if = "Option::is_none"
    )]
    pub rank: Option<u32>,
}

impl Block {
    /// Create a block with default importance.
    pub fn new<S: Into<String>>(href: impl Into<String>, breadcrumbs: Vec<S>, content: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            breadcrumbs: breadcrumbs.into_iter().map(Into::into).collect(),
            content: content.into(),
            rank: None,
        }
    }

    /// Builder-style rank override.
    pub fn with_rank(mut self, rank: u32) -> Self {
        self.rank = Some(rank);
        self
    }

    /// The last breadcrumb segment, which is conventionally the block title.
    pub fn title(&self) -> &str {
        self.breadcrumbs.last().map(String::as_str).unwrap_or("")
    }

    /// Effective rank: missing ranks count as the default importance, `0`.
    #[inline]
    pub fn rank_or_default(&self) -> u32 {
        self.rank.unwrap_or(0)
    }

    /// Breadcrumb depth (number of segments).
    #[inline]
    pub fn depth(&self) -> usize {
        self.breadcrumbs.len()
    }

    /// Does this block live at or below `prefix`?
    #[inline]
    pub fn starts_with(&self, prefix: &[String]) -> bool {
        self.breadcrumbs.len() >= prefix.len()
            && self.breadcrumbs.iter().zip(prefix).all(|(a, b)| a == b)
    }

    /// Does this block live exactly at `path`?
    #[inline]
    pub fn is_at(&self, path: &[String]) -> bool {
        self.breadcrumbs.as_slice() == path
    }
}

/// Accept whatever the dataset throws at `rank` without failing.
///
/// The dataset is produced by a docs build, and historically ranks have shown
/// up as integers, floats and numeric strings. Integers and floats truncate
/// toward zero, numeric strings are parsed the same way, and everything else
/// (negatives, `null`, booleans, junk strings) means "no rank".
fn lenient_rank<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(coerce_rank))
}

fn coerce_rank(value: &serde_json::Value) -> Option<u32> {
    let as_float = match value {
        serde_json::Value::Number(n) => n.as_f64()?,
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    if !as_float.is_finite() || as_float < 0.0 {
        return None;
    }
    // f64 -> u32 `as` saturates, which is what we want for absurd ranks
    Some(as_float.trunc() as u32)
}

/// The dataset document: `{ "blocks": [...] }`.
///
/// Any other top-level keys the docs build emits are ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub blocks: Vec<Block>,
}

impl Dataset {
    /// Parse a dataset from JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> crate::Result<Self> {
        Ok(serde_json::from_slice(bytes)?)
    }
}

// =============================================================================
// RESULT TREE
// =============================================================================

/// One node of a query result tree.
///
/// Built fresh for every query and thrown away afterwards. Intermediate nodes
/// exist purely for grouping: they may have no `node` (nothing matched exactly
/// there) and may or may not have an `href` (depending on whether any ingested
/// block lives at that path).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub breadcrumbs: Vec<String>,
    pub href: Option<String>,
    pub node: Option<Arc<Block>>,
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    /// Depth-first iterator over this node and all descendants.
    pub fn walk(&self) -> impl Iterator<Item = &TreeNode> {
        let mut stack = vec![self];
        std::iter::from_fn(move || {
            let next = stack.pop()?;
            stack.extend(next.children.iter().rev());
            Some(next)
        })
    }

    /// All matched blocks in this subtree, in depth-first order.
    pub fn blocks(&self) -> impl Iterator<Item = &Arc<Block>> {
        self.walk().filter_map(|n| n.node.as_ref())
    }

    /// The last breadcrumb segment of this node.
    pub fn label(&self) -> &str {
        self.breadcrumbs.last().map(String::as_str).unwrap_or("")
    }
}
