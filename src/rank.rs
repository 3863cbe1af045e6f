// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Blending text relevance with the manual importance hint.
//!
//! Docs authors tag low-value pages (migration guides, changelogs) with a
//! `rank`. Lower rank = more important, missing rank = 0. Two policies:
//!
//! | Policy           | Sort key                                   |
//! |------------------|--------------------------------------------|
//! | `SquaredPenalty` | `raw / (rank + 1)²` descending (default)    |
//! | `RankFirst`      | rank ascending, then raw descending         |
//!
//! `SquaredPenalty` lets a strong textual match on a rank-1 page beat a weak
//! match on a rank-0 page (a 4× score gap is enough). `RankFirst` never does:
//! rank buckets are impermeable and scores only order within a bucket.
//!
//! Whatever the policy, ties resolve by title then href, so the output never
//! depends on the order candidates arrived in.

use crate::types::Block;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::sync::Arc;

/// How raw scores and ranks combine into the final order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RankingPolicy {
    /// `raw / (rank + 1)²`, descending.
    #[default]
    SquaredPenalty,
    /// Ascending rank, then descending raw score.
    RankFirst,
}

impl RankingPolicy {
    /// Final score under `SquaredPenalty`. Non-finite raw scores count as 0.
    pub fn penalized_score(raw: f64, rank: u32) -> f64 {
        let raw = if raw.is_finite() { raw } else { 0.0 };
        let divisor = (f64::from(rank) + 1.0).powi(2);
        raw / divisor
    }

    /// Order two scored candidates, best first.
    pub fn compare(self, a: (&Block, f64), b: (&Block, f64)) -> Ordering {
        let (block_a, raw_a) = a;
        let (block_b, raw_b) = b;
        let primary = match self {
            RankingPolicy::SquaredPenalty => {
                let score_a = Self::penalized_score(raw_a, block_a.rank_or_default());
                let score_b = Self::penalized_score(raw_b, block_b.rank_or_default());
                total_desc(score_a, score_b)
            }
            RankingPolicy::RankFirst => block_a
                .rank_or_default()
                .cmp(&block_b.rank_or_default())
                .then_with(|| total_desc(sanitize(raw_a), sanitize(raw_b))),
        };
        primary
            .then_with(|| block_a.title().cmp(block_b.title()))
            .then_with(|| block_a.href.cmp(&block_b.href))
    }
}

fn sanitize(score: f64) -> f64 {
    if score.is_finite() {
        score
    } else {
        0.0
    }
}

/// Descending order over already-sanitized scores.
fn total_desc(a: f64, b: f64) -> Ordering {
    b.total_cmp(&a)
}

/// Order candidates best first under `policy`.
pub fn rank(mut candidates: Vec<(Arc<Block>, f64)>, policy: RankingPolicy) -> Vec<Arc<Block>> {
    candidates.sort_by(|(a, raw_a), (b, raw_b)| policy.compare((&**a, *raw_a), (&**b, *raw_b)));
    candidates.into_iter().map(|(block, _)| block).collect()
}
