// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Query term expansion: which vocabulary terms a query term stands for.
//!
//! Three ways in, each with its own weight:
//!
//! | Match  | Condition                                  | Weight                          |
//! |--------|--------------------------------------------|---------------------------------|
//! | Exact  | term == query                              | 1.0                             |
//! | Prefix | term starts with query, strictly longer    | `0.375 * q / (q + 0.3 * extra)` |
//! | Fuzzy  | `0 < distance <= floor(0.2 * q)`           | `0.45 * q / (q + d)`            |
//!
//! A term reachable more than one way keeps its best weight.

use std::collections::BTreeMap;

use crate::fuzzy::{bounded_distance, max_edits};
use crate::index::SearchIndex;
use crate::scoring::{fuzzy_weight, prefix_weight, EXACT_WEIGHT};

/// A vocabulary term and how strongly it stands in for the query term.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Expansion<'a> {
    pub term: &'a str,
    pub weight: f64,
}

fn keep_best<'a>(best: &mut BTreeMap<&'a str, f64>, term: &'a str, weight: f64) {
    best.entry(term)
        .and_modify(|w| *w = w.max(weight))
        .or_insert(weight);
}

/// Expand one (already tokenized) query term against the index vocabulary.
///
/// Results are in vocabulary order. Empty when nothing is close enough.
pub fn expand_term<'a>(index: &'a SearchIndex, query_term: &'a str) -> Vec<Expansion<'a>> {
    let q_len = query_term.chars().count();
    let mut best: BTreeMap<&'a str, f64> = BTreeMap::new();

    if let Some((term, _)) = index.vocabulary.get_key_value(query_term) {
        best.insert(term.as_str(), EXACT_WEIGHT);
    }

    for term in index.terms_with_prefix(query_term) {
        keep_best(&mut best, term, prefix_weight(q_len, term.chars().count()));
    }

    let budget = max_edits(q_len);
    if budget > 0 {
        for term in index.terms() {
            match bounded_distance(query_term, term, budget) {
                Some(d) if d > 0 => keep_best(&mut best, term, fuzzy_weight(q_len, d)),
                _ => {}
            }
        }
    }

    best.into_iter()
        .map(|(term, weight)| Expansion { term, weight })
        .collect()
}
