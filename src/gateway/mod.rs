// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The message boundary between the search index and its callers.
//!
//! Callers never touch the index directly. They send [`Inbound`] messages and
//! get [`Outbound`] replies, one per message, in order:
//!
//! ```text
//! init{origin} ──▶ DatasetSource::fetch ──▶ HierarchicalIndex::init ──▶ ready | error
//! query(text)  ──▶ HierarchicalIndex::search ─────────────────────────▶ results{results, query}
//! recents      ─────────────────────────────────────────────────────────▶ recents([])
//! ```
//!
//! [`SearchService`] is the handler. [`Worker`] runs one on a dedicated thread
//! (feature `worker`). There is no cancellation: a caller that has moved on
//! drops any `results` whose echoed `query` isn't its latest.

mod message;
mod service;
mod source;
#[cfg(feature = "worker")]
mod worker;

pub use message::{Inbound, Outbound};
pub use service::{answer, SearchService};
pub use source::{DatasetSource, StaticSource, DATASET_FILE};
#[cfg(feature = "http")]
pub use source::HttpSource;
#[cfg(feature = "worker")]
pub use source::{AnySource, FileSource};
#[cfg(feature = "worker")]
pub use worker::{Worker, WorkerHandle};
