// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The math behind search ranking.
//!
//! Okapi BM25 with the usual parameters, applied per field. Every posting
//! contributes
//!
//! ```text
//! idf(query_term) * tf * (k1 + 1) / (tf + k1 * (1 - b + b * len / avg_len))
//!           * field_weight * expansion_weight
//! ```
//!
//! where `len` is the document's total token count across all five fields.
//!
//! # Key Invariant: Exact Matches Dominate Expansions
//!
//! Every expansion weight is strictly below the exact weight of 1.0:
//!
//! ```text
//! prefix  = 0.375 * q / (q + 0.3 * extra)   <= 0.375
//! fuzzy   = 0.45  * q / (q + d)             <  0.45
//! ```
//!
//! The idf in front is the query term's, counted over every document any of
//! its expansions reaches, so all expansions of one query term share it. For
//! the same posting an exact hit then scores more than twice what a prefix or
//! fuzzy hit does, however the document frequencies are skewed.
//!
//! # Field Weights
//!
//! | Field       | Weight |
//! |-------------|--------|
//! | Name        | 3.0    |
//! | Description | 2.0    |
//! | Tags        | 2.0    |
//! | Headings    | 1.5    |
//! | Body        | 1.0    |

use crate::types::Field;

// =============================================================================
// BM25 PARAMETERS
// =============================================================================

/// Term frequency saturation.
pub const BM25_K1: f64 = 1.2;

/// Length normalization strength.
pub const BM25_B: f64 = 0.75;

// =============================================================================
// EXPANSION WEIGHTS
// =============================================================================

/// Weight of a vocabulary term equal to the query term.
pub const EXACT_WEIGHT: f64 = 1.0;

/// Base weight of a vocabulary term that strictly extends the query term.
pub const PREFIX_WEIGHT: f64 = 0.375;

/// How fast prefix weight decays with the number of extra characters.
pub const PREFIX_LENGTH_PENALTY: f64 = 0.3;

/// Base weight of a vocabulary term within the edit budget.
pub const FUZZY_WEIGHT: f64 = 0.45;

/// Weight of one field's contribution.
#[inline]
pub fn field_weight(field: Field) -> f64 {
    match field {
        Field::Name => 3.0,
        Field::Description => 2.0,
        Field::Tags => 2.0,
        Field::Headings => 1.5,
        Field::Body => 1.0,
    }
}

/// Inverse document frequency: `ln((N - n + 0.5) / (n + 0.5) + 1)`.
///
/// The `+ 1` keeps it positive even when a term appears in every document.
#[inline]
pub fn idf(doc_count: usize, doc_freq: usize) -> f64 {
    let n = doc_count as f64;
    let df = doc_freq as f64;
    ((n - df + 0.5) / (df + 0.5) + 1.0).ln()
}

/// The saturating term-frequency part of BM25.
///
/// `avg_len` of zero (an index where every document is empty) is treated as
/// no length normalization at all.
#[inline]
pub fn bm25_tf(tf: u32, doc_len: u32, avg_len: f64) -> f64 {
    let tf = f64::from(tf);
    let norm = if avg_len > 0.0 {
        1.0 - BM25_B + BM25_B * f64::from(doc_len) / avg_len
    } else {
        1.0
    };
    tf * (BM25_K1 + 1.0) / (tf + BM25_K1 * norm)
}

/// Weight of a prefix expansion: the query is `query_len` chars and the
/// vocabulary term is `term_len` chars, strictly longer.
#[inline]
pub fn prefix_weight(query_len: usize, term_len: usize) -> f64 {
    let q = query_len as f64;
    let extra = term_len.saturating_sub(query_len) as f64;
    PREFIX_WEIGHT * q / (q + PREFIX_LENGTH_PENALTY * extra)
}

/// Weight of a fuzzy expansion at edit distance `distance`.
#[inline]
pub fn fuzzy_weight(query_len: usize, distance: usize) -> f64 {
    let q = query_len as f64;
    FUZZY_WEIGHT * q / (q + distance as f64)
}
