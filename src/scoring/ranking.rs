// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Result ranking: how scored documents get sorted.

use crate::types::DocId;
use std::cmp::Ordering;

/// A document with its accumulated score, before it is rendered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoredDoc {
    pub doc: DocId,
    pub score: f64,
}

/// Compare two scored documents for ranking.
///
/// Sort order:
/// 1. **Score** descending
/// 2. **Doc ID** ascending, so equal scores keep index insertion order
///
/// NaN never shows up in practice (every factor is finite and positive), but
/// it compares as equal rather than poisoning the sort.
pub fn compare_scored(a: &ScoredDoc, b: &ScoredDoc) -> Ordering {
    match b.score.partial_cmp(&a.score) {
        Some(ord) if ord != Ordering::Equal => ord,
        _ => a.doc.cmp(&b.doc),
    }
}

/// Sort in ranking order.
pub fn rank(docs: &mut [ScoredDoc]) {
    docs.sort_by(compare_scored);
}
