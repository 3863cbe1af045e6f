// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for search query handling.
//!
//! Arbitrary queries against a fixed docs site, through both backends. The
//! pipeline must not panic, every returned tree node must be a real block, and
//! the ranked list must never hold the same href twice.

#![no_main]

use crumbtree::testing::docs_dataset;
use crumbtree::{AnyTextIndex, Backend, HierarchicalIndex, SearchConfig};
use libfuzzer_sys::fuzz_target;
use std::collections::HashSet;
use std::sync::OnceLock;

fn index_for(backend: Backend) -> HierarchicalIndex<AnyTextIndex> {
    let mut index = HierarchicalIndex::from_config(&SearchConfig::for_backend(backend));
    let _ = index.init(docs_dataset().blocks);
    index
}

fuzz_target!(|query: &[u8]| {
    static INDEXES: OnceLock<[HierarchicalIndex<AnyTextIndex>; 2]> = OnceLock::new();
    let indexes = INDEXES.get_or_init(|| [index_for(Backend::Fuzzy), index_for(Backend::Boolean)]);

    let query = String::from_utf8_lossy(query);
    // Cap query length to avoid timeout
    let query: String = query.chars().take(200).collect();

    for index in indexes {
        let ranked = index.search_ranked(&query);
        let mut seen = HashSet::new();
        for block in &ranked {
            assert!(seen.insert(block.href.as_str()), "duplicate hit {}", block.href);
            assert!(index.store().contains(&block.href));
        }

        let forest = index.search(&query);
        let matched: usize = forest.iter().map(|root| root.blocks().count()).sum();
        assert_eq!(matched, ranked.len(), "tree lost or invented blocks");
    }
});
