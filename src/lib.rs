// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Hierarchical full-text search over breadcrumb-addressed content blocks.
//!
//! Documentation sites chunk every page into blocks, each tagged with the
//! breadcrumb path it lives under (`["Docs", "Routing", "Load functions"]`).
//! This crate searches those blocks and hands the matches back as a tree, so
//! a UI can show each hit under the sections that contain it.
//!
//! # Architecture
//!
//! ```text
//!                 ┌───────────────────────────────────────────────┐
//!  Inbound ─────▶ │ gateway (SearchService / Worker)              │ ─────▶ Outbound
//!                 └───────────────┬───────────────────────────────┘
//!                                 │
//!                 ┌───────────────▼───────────────┐
//!                 │ index (HierarchicalIndex)     │  init once, then search
//!                 └───┬───────────────────┬───────┘
//!                     │                   │
//!            ┌────────▼───────┐   ┌───────▼────────┐
//!            │ store          │   │ text           │
//!            │ href → block   │   │ FuzzyIndex     │
//!            │ path → href    │   │ BooleanIndex   │
//!            └────────┬───────┘   └───────┬────────┘
//!                     │     hits          │
//!                     │   ┌───────────────▼┐
//!                     │   │ rank           │  score ÷ (rank+1)² or rank-first
//!                     │   └───────┬────────┘
//!                     │           │
//!                 ┌───▼───────────▼───┐
//!                 │ tree              │  regroup by breadcrumb prefix
//!                 └───────────────────┘
//! ```
//!
//! # Modules
//!
//! | Module     | Role                                                  |
//! |------------|-------------------------------------------------------|
//! | `types`    | `Block`, `Dataset`, `TreeNode`                        |
//! | `store`    | Blocks by href and by breadcrumb path                 |
//! | `text`     | Pluggable full-text backends behind `TextIndex`       |
//! | `rank`     | Relevance × manual importance                         |
//! | `tree`     | Flat ranked list → breadcrumb tree                    |
//! | `index`    | Exactly-once initialization and the search pipeline   |
//! | `gateway`  | Message protocol, dataset sources, worker thread      |
//! | `config`   | JSON configuration                                    |
//!
//! # Usage
//!
//! ```
//! use crumbtree::{Block, HierarchicalIndex, SearchConfig};
//!
//! let mut index = HierarchicalIndex::from_config(&SearchConfig::default());
//! index
//!     .init(vec![
//!         Block::new("/a", vec!["A"], "hello world"),
//!         Block::new("/a/b", vec!["A", "B"], "goodbye"),
//!     ])
//!     .unwrap();
//!
//! let tree = index.search("hello");
//! assert_eq!(tree.len(), 1);
//! assert_eq!(tree[0].href.as_deref(), Some("/a"));
//! assert!(tree[0].children.is_empty());
//! ```

pub mod config;
pub mod error;
pub mod gateway;
pub mod index;
pub mod rank;
pub mod store;
pub mod text;
pub mod tree;
pub mod types;
pub mod util;

pub mod testing;

#[cfg(feature = "wasm")]
mod wasm;

pub use config::{Backend, BoostOptions, SearchConfig};
pub use error::{Error, Result};
pub use gateway::{answer, DatasetSource, Inbound, Outbound, SearchService, StaticSource};
#[cfg(feature = "http")]
pub use gateway::HttpSource;
#[cfg(feature = "worker")]
pub use gateway::{AnySource, FileSource, Worker, WorkerHandle};
pub use index::{HierarchicalIndex, IngestReport, InitOutcome};
pub use rank::{rank, RankingPolicy};
pub use store::BlockStore;
pub use text::{AnyTextIndex, BooleanIndex, Combine, FuzzyIndex, Hit, TextIndex, TitleStrategy};
pub use tree::{build_forest, build_tree, PathLookup};
pub use types::{Block, Dataset, TreeNode};
pub use util::normalize;
