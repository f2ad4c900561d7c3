// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Edit distance with early exits.
//!
//! `|len(a) - len(b)|` is a lower bound on edit distance, and so is the
//! minimum of any DP row. Either one exceeding the bound ends the comparison.

/// Fraction of the query term length that may be edited.
pub const FUZZY_EDIT_RATIO: f64 = 0.2;

/// Edits allowed for a query term of `len` characters: `floor(0.2 * len)`.
///
/// Terms shorter than five characters get zero, so `"ui"` never fuzzes into
/// `"uk"`. Five to nine characters get one edit, ten to fourteen get two.
#[inline]
pub fn max_edits(len: usize) -> usize {
    (len as f64 * FUZZY_EDIT_RATIO).floor() as usize
}

/// Edit distance between `a` and `b`, or `None` if it exceeds `max`.
///
/// Standard single-row Levenshtein over chars, abandoned as soon as the
/// row minimum passes `max`.
pub fn bounded_distance(a: &str, b: &str, max: usize) -> Option<usize> {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.len().abs_diff(b.len()) > max {
        return None;
    }
    if a.is_empty() || b.is_empty() {
        return Some(a.len().max(b.len()));
    }

    let mut row: Vec<usize> = (0..=b.len()).collect();
    for (i, &ac) in a.iter().enumerate() {
        let mut diag = row[0];
        row[0] = i + 1;
        let mut row_min = row[0];

        for (j, &bc) in b.iter().enumerate() {
            let above = row[j + 1];
            let cost = usize::from(ac != bc);
            row[j + 1] = (above + 1).min(row[j] + 1).min(diag + cost);
            diag = above;
            row_min = row_min.min(row[j + 1]);
        }

        if row_min > max {
            return None;
        }
    }

    let d = row[b.len()];
    (d <= max).then_some(d)
}

/// Are these strings within `max` edits of each other?
#[inline]
pub fn levenshtein_within(a: &str, b: &str, max: usize) -> bool {
    bounded_distance(a, b, max).is_some()
}
