// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The hierarchical index: lifecycle plus the search pipeline.
//!
//! ```text
//! init(blocks) ──▶ BlockStore (href → block, path → href)
//!              └─▶ TextIndex  (title, content)
//!
//! search(q) ──▶ TextIndex::query ──▶ rank() ──▶ build_forest() ──▶ Vec<TreeNode>
//! ```
//!
//! `init` runs exactly once per index. Later calls are no-ops, so a worker can
//! safely receive `init` more than once. There is no teardown: the index lives
//! until it's dropped, and memory only grows with the dataset.

use crate::config::SearchConfig;
use crate::error::{Error, Result};
use crate::rank::{rank, RankingPolicy};
use crate::store::BlockStore;
use crate::text::{AnyTextIndex, TextIndex};
use crate::tree::build_forest;
use crate::types::{Block, TreeNode};
use std::sync::Arc;

/// What a call to [`HierarchicalIndex::init`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// This call loaded the index.
    Loaded(IngestReport),
    /// The index was already initialized; nothing changed.
    AlreadyInitialized,
}

impl InitOutcome {
    pub fn loaded(&self) -> bool {
        matches!(self, InitOutcome::Loaded(_))
    }
}

/// Counts from a successful load.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct IngestReport {
    /// Blocks stored and indexed.
    pub ingested: usize,
    /// Blocks dropped because their href was already stored.
    pub duplicates: usize,
}

/// Block store + text index + ranking policy, initialized once.
#[derive(Debug)]
pub struct HierarchicalIndex<T> {
    text: T,
    store: BlockStore,
    policy: RankingPolicy,
    config: Option<SearchConfig>,
    initialized: bool,
}

impl HierarchicalIndex<AnyTextIndex> {
    /// Build an empty index from configuration.
    pub fn from_config(config: &SearchConfig) -> Self {
        let mut index = Self::new(config.build_index(), config.ranking);
        index.config = Some(config.clone());
        index
    }
}

impl<T: TextIndex> HierarchicalIndex<T> {
    /// An empty, uninitialized index over `text`.
    pub fn new(text: T, policy: RankingPolicy) -> Self {
        Self {
            text,
            store: BlockStore::new(),
            policy,
            config: None,
            initialized: false,
        }
    }

    /// Load `blocks`, once.
    ///
    /// Blocks are validated before anything is stored: an empty href or empty
    /// breadcrumbs fails the whole call and leaves the index uninitialized.
    /// Duplicate hrefs keep the first block and are otherwise ignored.
    pub fn init<I>(&mut self, blocks: I) -> Result<InitOutcome>
    where
        I: IntoIterator<Item = Block>,
    {
        if self.initialized {
            tracing::debug!("init called on an initialized index, ignoring");
            return Ok(InitOutcome::AlreadyInitialized);
        }

        let blocks: Vec<Block> = blocks.into_iter().collect();
        for block in &blocks {
            validate(block)?;
        }

        let title_strategy = self.text.title_strategy();
        let mut report = IngestReport::default();
        for block in blocks {
            let href = block.href.clone();
            match self.store.insert(block) {
                Some(stored) => {
                    let title = title_strategy.title_for(&stored.breadcrumbs);
                    self.text.add_document(&stored.href, &title, &stored.content);
                    report.ingested += 1;
                }
                None => {
                    tracing::debug!(href = %href, "duplicate href, keeping first block");
                    report.duplicates += 1;
                }
            }
        }

        self.initialized = true;
        tracing::info!(
            ingested = report.ingested,
            duplicates = report.duplicates,
            "search index initialized"
        );
        Ok(InitOutcome::Loaded(report))
    }

    /// Matches for `query`, best first, as a flat list.
    ///
    /// Empty when the index isn't initialized or the query has no terms.
    pub fn search_ranked(&self, query: &str) -> Vec<Arc<Block>> {
        if !self.initialized {
            return Vec::new();
        }
        let candidates: Vec<(Arc<Block>, f64)> = self
            .text
            .query(query)
            .into_iter()
            .filter_map(|hit| self.store.get(&hit.id).map(|block| (Arc::clone(block), hit.score)))
            .collect();
        let ranked = rank(candidates, self.policy);
        tracing::debug!(query, hits = ranked.len(), "query ranked");
        ranked
    }

    /// Matches for `query` regrouped into breadcrumb trees.
    pub fn search(&self, query: &str) -> Vec<TreeNode> {
        let ranked = self.search_ranked(query);
        build_forest(&ranked, &self.store)
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn store(&self) -> &BlockStore {
        &self.store
    }

    pub fn text_index(&self) -> &T {
        &self.text
    }

    pub fn policy(&self) -> RankingPolicy {
        self.policy
    }

    /// The configuration this index was built from, if it came from one.
    pub fn config(&self) -> Option<&SearchConfig> {
        self.config.as_ref()
    }

    /// Number of stored blocks.
    pub fn len(&self) -> usize {
        self.store.len()
    }

    pub fn is_empty(&self) -> bool {
        self.store.is_empty()
    }
}

fn validate(block: &Block) -> Result<()> {
    if block.href.is_empty() {
        return Err(Error::MalformedBlock {
            href: block.href.clone(),
            reason: "empty href",
        });
    }
    if block.breadcrumbs.is_empty() {
        return Err(Error::MalformedBlock {
            href: block.href.clone(),
            reason: "empty breadcrumbs",
        });
    }
    Ok(())
}
