// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Prefix + fuzzy text index with BM25 scoring.
//!
//! Every query term expands into a weighted set of vocabulary terms:
//!
//! ```text
//! query term "rout"
//!   exact   "rout"       weight 1.0              (if indexed)
//!   prefix  "routing"    weight 0.375 × 4/7      (binary search in sorted vocab)
//!   prefix  "routes"     weight 0.375 × 4/6
//!   fuzzy   "root"       weight 0.45 × 4/(4+1)   (bounded Levenshtein scan)
//! ```
//!
//! Each expansion is scored with BM25+ in both fields, multiplied by the field
//! boost (title 3, content 1 by default) and by the expansion weight. A term
//! reached by prefix never also counts as fuzzy, so short prefixes don't get
//! double credit.
//!
//! The prefix and fuzzy discounts are small enough that an exact title hit
//! always beats a prefix or fuzzy title hit on the same document.

use super::levenshtein::bounded_distance;
use super::{into_hits, Combine, Hit, TextIndex, TitleStrategy};
use crate::util::tokenize;
use std::collections::{BTreeSet, HashMap, HashSet};

/// Weight applied to terms reached by prefix expansion.
pub const PREFIX_WEIGHT: f64 = 0.375;

/// Weight applied to terms reached by fuzzy expansion.
pub const FUZZY_WEIGHT: f64 = 0.45;

/// BM25 term frequency saturation.
const BM25_K1: f64 = 1.2;
/// BM25 length normalization.
const BM25_B: f64 = 0.7;
/// BM25+ lower bound so long fields still get credit for a match.
const BM25_DELTA: f64 = 0.5;

/// Default hard cap on edits per term, the same ceiling MiniSearch uses.
pub const MAX_EDIT_DISTANCE: u8 = 6;

const TITLE: usize = 0;
const CONTENT: usize = 1;

/// Knobs for [`FuzzyIndex`].
#[derive(Debug, Clone, PartialEq)]
pub struct FuzzyOptions {
    pub prefix: bool,
    pub fuzzy: bool,
    /// Allowed edits as a fraction of query term length.
    pub fuzziness: f64,
    /// Hard cap on allowed edits.
    pub max_edit_distance: u8,
    pub title_boost: f64,
    pub content_boost: f64,
    pub combine: Combine,
    pub title: TitleStrategy,
}

impl Default for FuzzyOptions {
    fn default() -> Self {
        Self {
            prefix: true,
            fuzzy: true,
            fuzziness: 0.2,
            max_edit_distance: MAX_EDIT_DISTANCE,
            title_boost: 3.0,
            content_boost: 1.0,
            combine: Combine::Or,
            title: TitleStrategy::LastSegment,
        }
    }
}

impl FuzzyOptions {
    /// Edit budget for a query term of `len` characters.
    pub fn max_distance(&self, len: usize) -> usize {
        if !self.fuzzy {
            return 0;
        }
        let scaled = (self.fuzziness * len as f64).round().max(0.0) as usize;
        scaled.min(self.max_edit_distance as usize)
    }
}

/// Per-field inverted index.
#[derive(Debug, Clone, Default)]
struct FieldIndex {
    /// term → [(doc ordinal, term frequency)], ordinals ascending
    postings: HashMap<String, Vec<(u32, u32)>>,
    /// field length in terms, per doc ordinal
    lengths: Vec<u32>,
    total_length: u64,
}

impl FieldIndex {
    fn add(&mut self, ordinal: u32, terms: &[String]) {
        let mut counts: HashMap<&str, u32> = HashMap::new();
        for term in terms {
            *counts.entry(term.as_str()).or_default() += 1;
        }
        for (term, tf) in counts {
            self.postings
                .entry(term.to_string())
                .or_default()
                .push((ordinal, tf));
        }
        self.lengths.push(terms.len() as u32);
        self.total_length += terms.len() as u64;
    }

    fn average_length(&self) -> f64 {
        if self.lengths.is_empty() {
            return 1.0;
        }
        (self.total_length as f64 / self.lengths.len() as f64).max(1.0)
    }
}

/// In-memory prefix/fuzzy full-text index over `title` and `content`.
#[derive(Debug, Clone, Default)]
pub struct FuzzyIndex {
    options: FuzzyOptions,
    ids: Vec<String>,
    fields: [FieldIndex; 2],
    vocabulary: BTreeSet<String>,
}

impl FuzzyIndex {
    pub fn new(options: FuzzyOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &FuzzyOptions {
        &self.options
    }

    /// Number of distinct terms across both fields.
    pub fn vocabulary_len(&self) -> usize {
        self.vocabulary.len()
    }

    /// Weighted vocabulary terms a single query term reaches.
    fn expand<'a>(&'a self, term: &'a str) -> Vec<(&'a str, f64)> {
        let mut expansions = Vec::new();
        let mut seen: HashSet<&str> = HashSet::new();
        let query_len = term.chars().count();

        if self.vocabulary.contains(term) {
            expansions.push((term, 1.0));
            seen.insert(term);
        }

        if self.options.prefix {
            let candidates = self
                .vocabulary
                .range::<str, _>((std::ops::Bound::Excluded(term), std::ops::Bound::Unbounded))
                .take_while(|candidate| candidate.starts_with(term));
            for candidate in candidates {
                let len = candidate.chars().count();
                expansions.push((candidate.as_str(), PREFIX_WEIGHT * query_len as f64 / len as f64));
                seen.insert(candidate.as_str());
            }
        }

        let max_distance = self.options.max_distance(query_len);
        if max_distance > 0 {
            let query_chars: Vec<char> = term.chars().collect();
            for candidate in &self.vocabulary {
                if seen.contains(candidate.as_str()) {
                    continue;
                }
                if let Some(distance) = bounded_distance(&query_chars, candidate, max_distance) {
                    let weight =
                        FUZZY_WEIGHT * query_len as f64 / (query_len + distance) as f64;
                    expansions.push((candidate.as_str(), weight));
                }
            }
        }

        expansions
    }

    fn bm25(&self, field: usize, tf: u32, df: usize, ordinal: u32) -> f64 {
        let index = &self.fields[field];
        let n = self.ids.len() as f64;
        let df = df as f64;
        let idf = (1.0 + (n - df + 0.5) / (df + 0.5)).ln();
        let tf = f64::from(tf);
        let length = f64::from(index.lengths[ordinal as usize]);
        let norm = 1.0 - BM25_B + BM25_B * length / index.average_length();
        idf * (BM25_DELTA + tf * (BM25_K1 + 1.0) / (tf + BM25_K1 * norm))
    }

    fn boost(&self, field: usize) -> f64 {
        match field {
            TITLE => self.options.title_boost,
            _ => self.options.content_boost,
        }
    }
}

impl TextIndex for FuzzyIndex {
    fn add_document(&mut self, id: &str, title: &str, content: &str) {
        let ordinal = self.ids.len() as u32;
        self.ids.push(id.to_string());

        let title_terms = tokenize(title);
        let content_terms = tokenize(content);
        self.vocabulary.extend(title_terms.iter().cloned());
        self.vocabulary.extend(content_terms.iter().cloned());
        self.fields[TITLE].add(ordinal, &title_terms);
        self.fields[CONTENT].add(ordinal, &content_terms);
    }

    fn query(&self, text: &str) -> Vec<Hit> {
        let mut terms = tokenize(text);
        let mut distinct = HashSet::new();
        terms.retain(|term| distinct.insert(term.clone()));
        if terms.is_empty() || self.ids.is_empty() {
            return Vec::new();
        }

        let mut scores: HashMap<usize, f64> = HashMap::new();
        let mut terms_matched: HashMap<usize, usize> = HashMap::new();

        for term in &terms {
            let mut term_scores: HashMap<usize, f64> = HashMap::new();
            for (expansion, weight) in self.expand(term) {
                for field in [TITLE, CONTENT] {
                    let Some(postings) = self.fields[field].postings.get(expansion) else {
                        continue;
                    };
                    let boost = self.boost(field);
                    for &(ordinal, tf) in postings {
                        let score = self.bm25(field, tf, postings.len(), ordinal);
                        *term_scores.entry(ordinal as usize).or_default() += weight * boost * score;
                    }
                }
            }
            for (ordinal, score) in term_scores {
                *scores.entry(ordinal).or_default() += score;
                *terms_matched.entry(ordinal).or_default() += 1;
            }
        }

        if self.options.combine == Combine::And {
            scores.retain(|ordinal, _| terms_matched.get(ordinal) == Some(&terms.len()));
        }

        into_hits(scores.into_iter().collect(), &self.ids)
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn title_strategy(&self) -> TitleStrategy {
        self.options.title
    }
}
