// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The canonical set of ingested blocks.
//!
//! Two lookups: href → block (the primary key, first write wins) and
//! breadcrumb path → href (so result trees can link intermediate nodes).
//! Paths are keyed by their segments, not by a joined string, so a segment
//! containing the join separator can't alias a deeper path.

use crate::tree::PathLookup;
use crate::types::Block;
use std::collections::HashMap;
use std::sync::Arc;

/// Ingested blocks keyed by href, plus a path → href index.
#[derive(Debug, Default, Clone)]
pub struct BlockStore {
    by_href: HashMap<String, Arc<Block>>,
    by_path: HashMap<Vec<String>, String>,
    /// Hrefs in ingestion order, for deterministic iteration.
    order: Vec<String>,
}

impl BlockStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a block unless its href is already present.
    ///
    /// Returns the stored block when inserted, `None` for a duplicate href.
    /// The path index points at the most recently stored block on each path.
    pub fn insert(&mut self, block: Block) -> Option<Arc<Block>> {
        if self.by_href.contains_key(&block.href) {
            return None;
        }
        let block = Arc::new(block);
        self.by_path.insert(block.breadcrumbs.clone(), block.href.clone());
        self.order.push(block.href.clone());
        self.by_href.insert(block.href.clone(), Arc::clone(&block));
        Some(block)
    }

    pub fn get(&self, href: &str) -> Option<&Arc<Block>> {
        self.by_href.get(href)
    }

    pub fn contains(&self, href: &str) -> bool {
        self.by_href.contains_key(href)
    }

    /// Href of the block registered at exactly this breadcrumb path.
    pub fn href_at(&self, path: &[String]) -> Option<&str> {
        self.by_path.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.by_href.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_href.is_empty()
    }

    /// Blocks in ingestion order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Block>> {
        self.order.iter().filter_map(|href| self.by_href.get(href))
    }

    /// Deepest breadcrumb path length among stored blocks.
    pub fn max_depth(&self) -> usize {
        self.by_href.values().map(|b| b.depth()).max().unwrap_or(0)
    }
}

impl PathLookup for BlockStore {
    fn href_for(&self, path: &[String]) -> Option<String> {
        self.href_at(path).map(str::to_string)
    }
}
