// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit tests, integration tests and benches.
//!
//! Always compiled but hidden from documentation.

#![doc(hidden)]

use crate::index::HierarchicalIndex;
use crate::rank::RankingPolicy;
use crate::text::FuzzyIndex;
use crate::types::{Block, Dataset};
use std::sync::Arc;

/// A block at `path` with content derived from its href.
pub fn make_block(href: &str, path: &[&str]) -> Block {
    Block::new(href, path.to_vec(), format!("content of {}", href))
}

/// Same as [`make_block`], shared behind an `Arc` as the ranker and tree
/// builder expect.
pub fn make_shared(href: &str, path: &[&str]) -> Arc<Block> {
    Arc::new(make_block(href, path))
}

/// A small docs site: two sections, a nested page, and a low-priority
/// migration guide that mentions everything.
pub fn docs_dataset() -> Dataset {
    Dataset {
        blocks: vec![
            Block::new("/docs", vec!["Docs"], "introduction to the framework"),
            Block::new(
                "/docs/routing",
                vec!["Docs", "Routing"],
                "pages layouts and routing basics",
            ),
            Block::new(
                "/docs/routing#load",
                vec!["Docs", "Routing", "Load functions"],
                "load data before a page renders",
            ),
            Block::new(
                "/docs/forms",
                vec!["Docs", "Form actions"],
                "progressive enhancement for forms",
            ),
            Block::new(
                "/docs/migrating",
                vec!["Docs", "Migrating"],
                "load routing forms layouts pages all changed",
            )
            .with_rank(3),
            Block::new("/faq", vec!["FAQ"], "frequently asked questions about routing"),
        ],
    }
}

/// A fuzzy index with default ranking, already loaded with `blocks`.
pub fn loaded_index(blocks: Vec<Block>) -> HierarchicalIndex<FuzzyIndex> {
    let mut index = HierarchicalIndex::new(FuzzyIndex::default(), RankingPolicy::default());
    index
        .init(blocks)
        .expect("fixture blocks are well formed");
    index
}

/// The href of every matched block in a forest, depth-first.
pub fn matched_hrefs(forest: &[crate::types::TreeNode]) -> Vec<String> {
    forest
        .iter()
        .flat_map(|root| root.blocks().map(|b| b.href.clone()).collect::<Vec<_>>())
        .collect()
}
