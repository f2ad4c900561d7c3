// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Scoring and ranking: how search results get their numbers.
//!
//! BM25 per posting, scaled by the weight of the field the posting came from
//! and by how good the vocabulary match was (exact beats prefix beats fuzzy).
//! Ranking is then a plain descending sort on the summed score, with doc id
//! as the tiebreaker so equal scores keep insertion order.

mod core;
pub mod ranking;

pub use core::*;
