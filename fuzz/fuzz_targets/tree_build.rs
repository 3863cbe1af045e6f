// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for result tree construction.
//!
//! Arbitrary breadcrumb paths over a tiny alphabet, so segments repeat and
//! paths are often prefixes of each other. Matched blocks sit at distinct
//! paths, as they do after ingestion, and each must land in the forest exactly
//! once at the node whose path equals its breadcrumbs.

#![no_main]

use arbitrary::Arbitrary;
use crumbtree::{build_forest, Block, BlockStore};
use libfuzzer_sys::fuzz_target;
use std::sync::Arc;

#[derive(Debug, Arbitrary)]
struct Input {
    paths: Vec<Vec<u8>>,
}

fuzz_target!(|input: Input| {
    let mut store = BlockStore::new();
    for (i, raw) in input.paths.iter().take(64).enumerate() {
        // Small alphabet so paths collide and share prefixes
        let path: Vec<String> = raw
            .iter()
            .take(6)
            .map(|b| ((b'a' + b % 4) as char).to_string())
            .collect();
        if path.is_empty() || store.href_at(&path).is_some() {
            continue;
        }
        store.insert(Block::new(format!("/{}", i), path, ""));
    }
    let blocks: Vec<Arc<Block>> = store.iter().cloned().collect();

    let forest = build_forest(&blocks, &store);

    let placed: Vec<&str> = forest
        .iter()
        .flat_map(|root| root.blocks())
        .map(|block| block.href.as_str())
        .collect();
    assert_eq!(placed.len(), blocks.len());
    for block in &blocks {
        assert_eq!(placed.iter().filter(|h| **h == block.href).count(), 1);
    }
    for root in &forest {
        for node in root.walk() {
            if let Some(block) = &node.node {
                assert_eq!(block.breadcrumbs, node.breadcrumbs);
            }
        }
    }
});
