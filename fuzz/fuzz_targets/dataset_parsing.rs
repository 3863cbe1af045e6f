// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for dataset parsing and ingestion.
//!
//! `content.json` comes off the network. Whatever bytes arrive, parsing either
//! fails cleanly or yields blocks that init either accepts or rejects as
//! malformed. Nothing panics.

#![no_main]

use crumbtree::{Dataset, HierarchicalIndex, InitOutcome, SearchConfig};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(dataset) = Dataset::from_slice(data) else {
        return;
    };
    let total = dataset.blocks.len();

    let mut index = HierarchicalIndex::from_config(&SearchConfig::default());
    match index.init(dataset.blocks) {
        Ok(InitOutcome::Loaded(report)) => {
            assert!(index.is_initialized());
            // Every block is either stored or counted as a duplicate
            assert_eq!(report.ingested + report.duplicates, total);
            assert_eq!(report.ingested, index.len());
        }
        Ok(InitOutcome::AlreadyInitialized) => unreachable!("fresh index"),
        Err(_) => assert!(!index.is_initialized(), "failed init must not flip the flag"),
    }
});
