// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Typo tolerance via bounded edit distance.
//!
//! The vocabulary of a skill library is small (tens of thousands of terms at
//! most), so a bounded Levenshtein against each candidate is plenty. The bound
//! is what keeps it cheap: most candidates die on the length check before the
//! DP allocates anything.

mod levenshtein;

pub use levenshtein::*;
