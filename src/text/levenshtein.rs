// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Edit distance with early exits.
//!
//! `|len(a) - len(b)|` is a lower bound on edit distance, so a length gap
//! larger than the budget rejects a candidate before any DP runs. Inside the
//! DP, once every cell of a row exceeds the budget the rest can only get worse.
//! Fuzzy expansion compares one query term against the whole vocabulary, so
//! most candidates die in one of those two checks.

/// Edit distance between `query` and `term` if it is at most `max`.
///
/// `query` is pre-split into chars because the same query term is compared
/// against every vocabulary entry.
pub fn bounded_distance(query: &[char], term: &str, max: usize) -> Option<usize> {
    let term: Vec<char> = term.chars().collect();
    let (m, n) = (query.len(), term.len());

    if m.abs_diff(n) > max {
        return None;
    }

    let mut prev_row: Vec<usize> = (0..=n).collect();
    let mut curr_row: Vec<usize> = vec![0; n + 1];

    for (i, &qc) in query.iter().enumerate() {
        curr_row[0] = i + 1;
        let mut min_in_row = curr_row[0];

        for (j, &tc) in term.iter().enumerate() {
            let cost = usize::from(qc != tc);
            curr_row[j + 1] = (prev_row[j] + cost)
                .min(prev_row[j + 1] + 1)
                .min(curr_row[j] + 1);
            min_in_row = min_in_row.min(curr_row[j + 1]);
        }

        if min_in_row > max {
            return None;
        }

        std::mem::swap(&mut prev_row, &mut curr_row);
    }

    let distance = prev_row[n];
    (distance <= max).then_some(distance)
}

/// Are these strings within `max` edits of each other?
pub fn levenshtein_within(a: &str, b: &str, max: usize) -> bool {
    let a: Vec<char> = a.chars().collect();
    bounded_distance(&a, b, max).is_some()
}
