// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! One error type for the whole crate.
//!
//! Most of the core cannot fail. Ranking, tree building and querying are total
//! functions over whatever got ingested. Errors come from the edges: a dataset
//! that violates the block contract, a dataset that can't be fetched or parsed,
//! a bad config file, or a worker whose channel has gone away.

use std::path::PathBuf;
use thiserror::Error;

/// Everything that can go wrong in crumbtree.
#[derive(Error, Debug)]
pub enum Error {
    /// A block broke the ingestion contract (empty href or empty breadcrumbs).
    #[error("malformed block {href:?}: {reason}")]
    MalformedBlock { href: String, reason: &'static str },

    /// The dataset wasn't valid `{ "blocks": [...] }` JSON.
    #[error("dataset parse error: {0}")]
    Dataset(#[from] serde_json::Error),

    /// Reading a dataset or config file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// HTTP fetch of the dataset failed (network or non-2xx status).
    #[error("dataset fetch failed: {0}")]
    Fetch(String),

    /// Configuration was rejected.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// The worker thread is gone; nothing will answer.
    #[error("search worker is closed")]
    WorkerClosed,
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    /// Was this raised while getting the dataset (as opposed to ingesting it)?
    ///
    /// The gateway reports these as a failed `ready` and keeps serving.
    pub fn is_dataset_failure(&self) -> bool {
        matches!(self, Error::Dataset(_) | Error::Io { .. } | Error::Fetch(_))
    }
}

#[cfg(feature = "http")]
impl From<reqwest::Error> for Error {
    fn from(err: reqwest::Error) -> Self {
        Error::Fetch(err.to_string())
    }
}
