// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Search configuration.
//!
//! Every field has a default, so `{}` is a valid config file and partial files
//! only override what they mention:
//!
//! ```json
//! {
//!   "backend": "fuzzy",
//!   "ranking": "squared-penalty",
//!   "prefix": true,
//!   "fuzzy": true,
//!   "fuzziness": 0.2,
//!   "maxEditDistance": 6,
//!   "boost": { "title": 3.0, "content": 1.0 },
//!   "combine": "or"
//! }
//! ```
//!
//! [`SearchConfig::for_backend`] gives each backend its natural pairing:
//! fuzzy with squared-penalty ranking and OR, boolean with rank-first ranking,
//! AND and a title boost of 2.

use crate::error::{Error, Result};
use crate::rank::RankingPolicy;
use crate::text::{
    AnyTextIndex, BooleanIndex, BooleanOptions, Combine, FuzzyIndex, FuzzyOptions, TitleStrategy,
    MAX_EDIT_DISTANCE,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Which text index implementation to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Prefix + fuzzy matching with BM25 scoring.
    #[default]
    Fuzzy,
    /// Field-weighted boolean matching with tf-idf scoring.
    Boolean,
}

/// Per-field score multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoostOptions {
    pub title: f64,
    pub content: f64,
}

impl Default for BoostOptions {
    fn default() -> Self {
        Self {
            title: 3.0,
            content: 1.0,
        }
    }
}

/// Everything that shapes how blocks are indexed and results ordered.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SearchConfig {
    pub backend: Backend,
    pub ranking: RankingPolicy,
    /// Match vocabulary terms that start with a query term.
    pub prefix: bool,
    /// Match vocabulary terms within a few edits of a query term.
    pub fuzzy: bool,
    /// Allowed edits as a fraction of query term length (fuzzy backend).
    pub fuzziness: f64,
    /// Hard cap on allowed edits (fuzzy backend).
    pub max_edit_distance: u8,
    pub boost: BoostOptions,
    pub combine: Combine,
    /// Override the backend's preferred title field text.
    pub title: Option<TitleStrategy>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self::for_backend(Backend::Fuzzy)
    }
}

impl SearchConfig {
    /// Defaults tuned for a particular backend.
    pub fn for_backend(backend: Backend) -> Self {
        match backend {
            Backend::Fuzzy => Self {
                backend,
                ranking: RankingPolicy::SquaredPenalty,
                prefix: true,
                fuzzy: true,
                fuzziness: 0.2,
                max_edit_distance: MAX_EDIT_DISTANCE,
                boost: BoostOptions::default(),
                combine: Combine::Or,
                title: None,
            },
            Backend::Boolean => Self {
                backend,
                ranking: RankingPolicy::RankFirst,
                prefix: true,
                fuzzy: true,
                fuzziness: 0.2,
                max_edit_distance: 1,
                boost: BoostOptions {
                    title: 2.0,
                    content: 1.0,
                },
                combine: Combine::And,
                title: None,
            },
        }
    }

    /// Parse a JSON config. Missing fields take the defaults of the backend
    /// the file names (or the fuzzy backend if it names none).
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        let backend = match value.get("backend") {
            Some(raw) => serde_json::from_value::<Backend>(raw.clone())
                .map_err(|e| Error::Config(format!("backend: {}", e)))?,
            None => Backend::default(),
        };

        let mut merged = serde_json::to_value(Self::for_backend(backend))
            .map_err(|e| Error::Config(e.to_string()))?;
        merge_json(&mut merged, value);
        let config: Self =
            serde_json::from_value(merged).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON config file.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Reject values that would make scoring meaningless.
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.fuzziness) {
            return Err(Error::Config(format!(
                "fuzziness must be within 0..=1, got {}",
                self.fuzziness
            )));
        }
        for (field, boost) in [("title", self.boost.title), ("content", self.boost.content)] {
            if !boost.is_finite() || boost <= 0.0 {
                return Err(Error::Config(format!(
                    "boost.{} must be a positive number, got {}",
                    field, boost
                )));
            }
        }
        Ok(())
    }

    /// Construct the configured text index.
    pub fn build_index(&self) -> AnyTextIndex {
        match self.backend {
            Backend::Fuzzy => {
                let defaults = FuzzyOptions::default();
                AnyTextIndex::Fuzzy(FuzzyIndex::new(FuzzyOptions {
                    prefix: self.prefix,
                    fuzzy: self.fuzzy,
                    fuzziness: self.fuzziness,
                    max_edit_distance: self.max_edit_distance,
                    title_boost: self.boost.title,
                    content_boost: self.boost.content,
                    combine: self.combine,
                    title: self.title.unwrap_or(defaults.title),
                }))
            }
            Backend::Boolean => {
                let defaults = BooleanOptions::default();
                AnyTextIndex::Boolean(BooleanIndex::new(BooleanOptions {
                    title_boost: self.boost.title,
                    content_boost: self.boost.content,
                    expand: self.prefix,
                    fuzzy: self.fuzzy && self.max_edit_distance > 0,
                    combine: self.combine,
                    title: self.title.unwrap_or(defaults.title),
                }))
            }
        }
    }
}

/// Overlay `patch` onto `base`, recursing into objects.
fn merge_json(base: &mut serde_json::Value, patch: serde_json::Value) {
    match (base, patch) {
        (serde_json::Value::Object(base), serde_json::Value::Object(patch)) => {
            for (key, value) in patch {
                match base.get_mut(&key) {
                    Some(existing) => merge_json(existing, value),
                    None => {
                        base.insert(key, value);
                    }
                }
            }
        }
        (base, patch) => *base = patch,
    }
}
