// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Where `content.json` comes from.
//!
//! An origin is a base location. Every source resolves it to
//! `{origin}/content.json` its own way:
//!
//! - [`HttpSource`]: `GET {origin}/content.json` (feature `http`)
//! - [`FileSource`]: a directory holding `content.json`, or the file itself
//! - [`StaticSource`]: ignores the origin and hands out a fixed dataset
//! - [`AnySource`]: HTTP for `http(s)://` origins, files for everything else

use crate::error::{Error, Result};
use crate::types::Dataset;
#[cfg(feature = "worker")]
use std::path::{Path, PathBuf};

/// File name fetched relative to an origin.
pub const DATASET_FILE: &str = "content.json";

/// Fetches the dataset for an origin.
///
/// Futures are driven on the worker's single-threaded runtime, so they don't
/// need to be `Send`.
#[allow(async_fn_in_trait)]
pub trait DatasetSource {
    async fn fetch(&self, origin: &str) -> Result<Dataset>;
}

/// A fixed in-memory dataset.
#[derive(Debug, Clone, Default)]
pub struct StaticSource {
    dataset: Dataset,
}

impl StaticSource {
    pub fn new(dataset: Dataset) -> Self {
        Self { dataset }
    }
}

impl DatasetSource for StaticSource {
    async fn fetch(&self, _origin: &str) -> Result<Dataset> {
        Ok(self.dataset.clone())
    }
}

// =============================================================================
// FILES
// =============================================================================

/// Reads `content.json` from the local filesystem.
///
/// `file://` prefixes are stripped. If the origin is a directory the dataset
/// is `{origin}/content.json`, otherwise the origin is the dataset file.
#[cfg(feature = "worker")]
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

#[cfg(feature = "worker")]
impl FileSource {
    /// The dataset path an origin resolves to.
    pub async fn resolve(origin: &str) -> PathBuf {
        let path = Path::new(origin.strip_prefix("file://").unwrap_or(origin));
        match tokio::fs::metadata(path).await {
            Ok(meta) if meta.is_dir() => path.join(DATASET_FILE),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(feature = "worker")]
impl DatasetSource for FileSource {
    async fn fetch(&self, origin: &str) -> Result<Dataset> {
        let path = Self::resolve(origin).await;
        tracing::debug!(path = %path.display(), "reading dataset");
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| Error::Io { path, source })?;
        Dataset::from_slice(&bytes)
    }
}

// =============================================================================
// HTTP
// =============================================================================

/// Fetches `{origin}/content.json` over HTTP(S).
#[cfg(feature = "http")]
#[derive(Debug, Clone, Default)]
pub struct HttpSource {
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl HttpSource {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }

    pub fn dataset_url(origin: &str) -> String {
        format!("{}/{}", origin.trim_end_matches('/'), DATASET_FILE)
    }
}

#[cfg(feature = "http")]
impl DatasetSource for HttpSource {
    async fn fetch(&self, origin: &str) -> Result<Dataset> {
        let url = Self::dataset_url(origin);
        tracing::debug!(url = %url, "fetching dataset");
        let response = self.client.get(&url).send().await?.error_for_status()?;
        Ok(response.json::<Dataset>().await?)
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Picks a source from the shape of the origin.
#[cfg(feature = "worker")]
#[derive(Debug, Clone, Default)]
pub struct AnySource {
    #[cfg(feature = "http")]
    http: HttpSource,
    file: FileSource,
}

#[cfg(feature = "worker")]
impl AnySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_remote(origin: &str) -> bool {
        origin.starts_with("http://") || origin.starts_with("https://")
    }

    #[cfg(feature = "http")]
    async fn fetch_remote(&self, origin: &str) -> Result<Dataset> {
        self.http.fetch(origin).await
    }

    #[cfg(not(feature = "http"))]
    async fn fetch_remote(&self, origin: &str) -> Result<Dataset> {
        Err(Error::Fetch(format!(
            "{origin}: built without the `http` feature"
        )))
    }
}

#[cfg(feature = "worker")]
impl DatasetSource for AnySource {
    async fn fetch(&self, origin: &str) -> Result<Dataset> {
        if Self::is_remote(origin) {
            return self.fetch_remote(origin).await;
        }
        self.file.fetch(origin).await
    }
}
