// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Full-text index backends.
//!
//! The rest of the crate only needs two things from a text index: put a
//! document in, get scored document ids out. [`TextIndex`] is that seam.
//! Two backends sit behind it:
//!
//! | Backend        | Matching                         | Fields combine | Default title |
//! |----------------|----------------------------------|----------------|---------------|
//! | [`FuzzyIndex`]   | exact + prefix + fuzzy, BM25     | OR (sum)       | last segment  |
//! | [`BooleanIndex`] | exact + prefix expansion, tf-idf | AND per field  | full path     |
//!
//! Scores are backend-specific and unnormalized. Nothing downstream may assume
//! a scale; the ranker only ever compares scores from the same query.

mod boolean;
mod fuzzy;
pub mod levenshtein;

pub use boolean::{BooleanIndex, BooleanOptions};
pub use fuzzy::{FuzzyIndex, FuzzyOptions, FUZZY_WEIGHT, MAX_EDIT_DISTANCE, PREFIX_WEIGHT};

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// A scored document id returned by [`TextIndex::query`].
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub id: String,
    pub score: f64,
}

/// Which text a backend wants in its title field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TitleStrategy {
    /// Last breadcrumb segment ("Load functions").
    LastSegment,
    /// Every breadcrumb segment joined by spaces ("Docs Routing Load functions").
    FullPath,
}

impl TitleStrategy {
    /// Build the title text for a breadcrumb path.
    pub fn title_for(self, breadcrumbs: &[String]) -> String {
        match self {
            TitleStrategy::LastSegment => breadcrumbs.last().cloned().unwrap_or_default(),
            TitleStrategy::FullPath => breadcrumbs.join(" "),
        }
    }
}

/// How per-term matches combine into a document match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Combine {
    /// Any query term is enough; scores sum.
    #[default]
    Or,
    /// Every query term must match.
    And,
}

/// The full-text capability the hierarchical index is built on.
pub trait TextIndex {
    /// Add a document. Ids are expected to be unique; the lifecycle controller
    /// guarantees it by never submitting a duplicate href.
    fn add_document(&mut self, id: &str, title: &str, content: &str);

    /// Scored matches, best first. Ties come back in insertion order.
    fn query(&self, text: &str) -> Vec<Hit>;

    /// Number of documents indexed.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// What this backend wants in its title field.
    fn title_strategy(&self) -> TitleStrategy {
        TitleStrategy::LastSegment
    }
}

/// Runtime choice between backends, so configuration can pick one.
#[derive(Debug, Clone)]
pub enum AnyTextIndex {
    Fuzzy(FuzzyIndex),
    Boolean(BooleanIndex),
}

impl TextIndex for AnyTextIndex {
    fn add_document(&mut self, id: &str, title: &str, content: &str) {
        match self {
            AnyTextIndex::Fuzzy(index) => index.add_document(id, title, content),
            AnyTextIndex::Boolean(index) => index.add_document(id, title, content),
        }
    }

    fn query(&self, text: &str) -> Vec<Hit> {
        match self {
            AnyTextIndex::Fuzzy(index) => index.query(text),
            AnyTextIndex::Boolean(index) => index.query(text),
        }
    }

    fn len(&self) -> usize {
        match self {
            AnyTextIndex::Fuzzy(index) => index.len(),
            AnyTextIndex::Boolean(index) => index.len(),
        }
    }

    fn title_strategy(&self) -> TitleStrategy {
        match self {
            AnyTextIndex::Fuzzy(index) => index.title_strategy(),
            AnyTextIndex::Boolean(index) => index.title_strategy(),
        }
    }
}

/// Turn accumulated `(ordinal, score)` pairs into sorted hits.
///
/// Descending score, ascending ordinal on ties, so results never depend on
/// hash map iteration order.
pub(crate) fn into_hits(mut scored: Vec<(usize, f64)>, ids: &[String]) -> Vec<Hit> {
    scored.sort_by(|a, b| {
        b.1.partial_cmp(&a.1)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.0.cmp(&b.0))
    });
    scored
        .into_iter()
        .map(|(ordinal, score)| Hit {
            id: ids[ordinal].clone(),
            score,
        })
        .collect()
}
