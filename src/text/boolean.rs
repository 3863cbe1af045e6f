// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Field-weighted boolean index (vector-space scoring).
//!
//! Each field is searched on its own. Within a field, `Combine::And` keeps
//! only documents where every query token matched that field. The surviving
//! per-field scores are multiplied by the field boost and summed.
//!
//! Token score per field is `sqrt(tf) × idf / sqrt(field_length)` with
//! `idf = 1 + ln(N / (df + 1))`. With `expand` on, a token also matches every
//! vocabulary term it prefixes, discounted by `len(token) / len(term)`.
//! Tokens that matched nothing exactly or by prefix fall back to single-edit
//! fuzzy matches at half weight.

use super::levenshtein::bounded_distance;
use super::{into_hits, Combine, Hit, TextIndex, TitleStrategy};
use crate::util::tokenize;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::ops::Bound;

/// Discount on single-edit fuzzy fallbacks.
const FUZZY_FALLBACK_WEIGHT: f64 = 0.5;

/// Fuzzy fallback only kicks in for tokens at least this long.
const FUZZY_MIN_TOKEN_LEN: usize = 4;

/// Knobs for [`BooleanIndex`].
#[derive(Debug, Clone, PartialEq)]
pub struct BooleanOptions {
    pub title_boost: f64,
    pub content_boost: f64,
    /// Prefix-expand query tokens against the vocabulary.
    pub expand: bool,
    /// Fall back to single-edit matches when a token matches nothing else.
    pub fuzzy: bool,
    pub combine: Combine,
    pub title: TitleStrategy,
}

impl Default for BooleanOptions {
    fn default() -> Self {
        Self {
            title_boost: 2.0,
            content_boost: 1.0,
            expand: true,
            fuzzy: true,
            combine: Combine::And,
            title: TitleStrategy::FullPath,
        }
    }
}

#[derive(Debug, Clone, Default)]
struct Field {
    /// term → doc ordinal → term frequency
    terms: HashMap<String, HashMap<u32, u32>>,
    lengths: Vec<u32>,
    vocabulary: BTreeSet<String>,
}

impl Field {
    fn add(&mut self, ordinal: u32, tokens: Vec<String>) {
        self.lengths.push(tokens.len() as u32);
        for token in tokens {
            *self
                .terms
                .entry(token.clone())
                .or_default()
                .entry(ordinal)
                .or_default() += 1;
            self.vocabulary.insert(token);
        }
    }

    /// Weighted field terms reached by one query token.
    fn expand<'a>(&'a self, token: &'a str, options: &BooleanOptions) -> Vec<(&'a str, f64)> {
        let mut expansions = Vec::new();
        if self.terms.contains_key(token) {
            expansions.push((token, 1.0));
        }

        if options.expand {
            let token_len = token.chars().count() as f64;
            let prefixed = self
                .vocabulary
                .range::<str, _>((Bound::Excluded(token), Bound::Unbounded))
                .take_while(|term| term.starts_with(token));
            for term in prefixed {
                expansions.push((term.as_str(), token_len / term.chars().count() as f64));
            }
        }

        let token_chars: Vec<char> = token.chars().collect();
        if expansions.is_empty() && options.fuzzy && token_chars.len() >= FUZZY_MIN_TOKEN_LEN {
            for term in &self.vocabulary {
                if bounded_distance(&token_chars, term, 1).is_some() {
                    expansions.push((term.as_str(), FUZZY_FALLBACK_WEIGHT));
                }
            }
        }

        expansions
    }

    /// Per-document score for `tokens` in this field, honoring `combine`.
    fn score(&self, tokens: &[String], num_docs: usize, options: &BooleanOptions) -> HashMap<u32, f64> {
        let mut scores: HashMap<u32, f64> = HashMap::new();
        let mut matched: HashMap<u32, usize> = HashMap::new();

        for token in tokens {
            let mut token_docs: HashSet<u32> = HashSet::new();
            for (term, weight) in self.expand(token, options) {
                let Some(postings) = self.terms.get(term) else {
                    continue;
                };
                let idf = 1.0 + (num_docs as f64 / (postings.len() as f64 + 1.0)).ln();
                for (&ordinal, &tf) in postings {
                    let length = f64::from(self.lengths[ordinal as usize].max(1));
                    let score = f64::from(tf).sqrt() * idf / length.sqrt();
                    *scores.entry(ordinal).or_default() += weight * score;
                    token_docs.insert(ordinal);
                }
            }
            for ordinal in token_docs {
                *matched.entry(ordinal).or_default() += 1;
            }
        }

        if options.combine == Combine::And {
            scores.retain(|ordinal, _| matched.get(ordinal) == Some(&tokens.len()));
        }
        scores
    }
}

/// Boolean/vector-space index over `title` and `content`.
#[derive(Debug, Clone, Default)]
pub struct BooleanIndex {
    options: BooleanOptions,
    ids: Vec<String>,
    title: Field,
    content: Field,
}

impl BooleanIndex {
    pub fn new(options: BooleanOptions) -> Self {
        Self {
            options,
            ..Self::default()
        }
    }

    pub fn options(&self) -> &BooleanOptions {
        &self.options
    }
}

impl TextIndex for BooleanIndex {
    fn add_document(&mut self, id: &str, title: &str, content: &str) {
        let ordinal = self.ids.len() as u32;
        self.ids.push(id.to_string());
        self.title.add(ordinal, tokenize(title));
        self.content.add(ordinal, tokenize(content));
    }

    fn query(&self, text: &str) -> Vec<Hit> {
        let mut tokens = tokenize(text);
        let mut distinct = HashSet::new();
        tokens.retain(|token| distinct.insert(token.clone()));
        if tokens.is_empty() || self.ids.is_empty() {
            return Vec::new();
        }

        let num_docs = self.ids.len();
        let mut totals: HashMap<usize, f64> = HashMap::new();
        for (field, boost) in [
            (&self.title, self.options.title_boost),
            (&self.content, self.options.content_boost),
        ] {
            for (ordinal, score) in field.score(&tokens, num_docs, &self.options) {
                *totals.entry(ordinal as usize).or_default() += boost * score;
            }
        }

        into_hits(totals.into_iter().collect(), &self.ids)
    }

    fn len(&self) -> usize {
        self.ids.len()
    }

    fn title_strategy(&self) -> TitleStrategy {
        self.options.title
    }
}
