// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! One inbound message in, one outbound message out.

use super::message::{Inbound, Outbound};
use super::source::DatasetSource;
use crate::error::Result;
use crate::index::{HierarchicalIndex, InitOutcome};
use crate::text::TextIndex;

/// Answer the messages that don't need the dataset source.
///
/// `query` and `recents` are pure functions of the index. `init` needs a
/// fetch, so it yields `None` here.
pub fn answer<T: TextIndex>(index: &HierarchicalIndex<T>, message: &Inbound) -> Option<Outbound> {
    match message {
        Inbound::Init { .. } => None,
        Inbound::Query(query) => Some(results(index, query.clone())),
        Inbound::Recents => Some(recents()),
    }
}

fn results<T: TextIndex>(index: &HierarchicalIndex<T>, query: String) -> Outbound {
    Outbound::Results {
        results: index.search(&query),
        query,
    }
}

fn recents() -> Outbound {
    Outbound::Recents(Vec::new())
}

/// The search index plus the source its dataset is fetched from.
#[derive(Debug)]
pub struct SearchService<T, S> {
    index: HierarchicalIndex<T>,
    source: S,
}

impl<T: TextIndex, S> SearchService<T, S> {
    pub fn new(index: HierarchicalIndex<T>, source: S) -> Self {
        Self { index, source }
    }

    pub fn index(&self) -> &HierarchicalIndex<T> {
        &self.index
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}

impl<T: TextIndex, S: DatasetSource> SearchService<T, S> {
    /// Process one message.
    ///
    /// `init` fetches only while the index is still empty and answers `ready`
    /// either way. A failed fetch answers `error` and leaves the index empty,
    /// so a later `init` can retry.
    pub async fn handle(&mut self, message: Inbound) -> Outbound {
        match message {
            Inbound::Init { origin } => match self.load(&origin).await {
                Ok(_) => Outbound::Ready,
                Err(err) => {
                    tracing::warn!(origin = %origin, error = %err, "dataset load failed");
                    Outbound::Error {
                        message: err.to_string(),
                    }
                }
            },
            Inbound::Query(query) => results(&self.index, query),
            Inbound::Recents => recents(),
        }
    }

    /// Fetch and ingest the dataset for `origin`, unless already loaded.
    pub async fn load(&mut self, origin: &str) -> Result<InitOutcome> {
        if self.index.is_initialized() {
            return Ok(InitOutcome::AlreadyInitialized);
        }
        let dataset = self.source.fetch(origin).await?;
        self.index.init(dataset.blocks)
    }
}
