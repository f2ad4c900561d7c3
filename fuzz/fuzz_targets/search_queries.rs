// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for query handling.
//!
//! Arbitrary bytes go in as queries against the sample library. Search must
//! not panic, must respect the limit, must never surface a router, and must
//! return scores in descending order.

#![no_main]

use std::sync::OnceLock;

use libfuzzer_sys::fuzz_target;
use skillsearch::testing::sample_library;
use skillsearch::{build_index, search, SearchIndex, SearchOptions, SkillMap, SkillType};

fn library() -> &'static (SkillMap, SearchIndex) {
    static LIBRARY: OnceLock<(SkillMap, SearchIndex)> = OnceLock::new();
    LIBRARY.get_or_init(|| {
        let skills = sample_library();
        let index = build_index(&skills);
        (skills, index)
    })
}

fuzz_target!(|data: &[u8]| {
    let (skills, index) = library();
    let query = String::from_utf8_lossy(data);
    // Cap query length to avoid timeouts
    let query: String = query.chars().take(200).collect();

    let options = SearchOptions::with_limit(2);
    let results = search(index, &query, &options, Some(skills));

    assert!(results.len() <= 2);
    for result in &results {
        assert!(result.score.is_finite() && result.score > 0.0);
        assert_ne!(result.skill_type, SkillType::Router);
    }
    for pair in results.windows(2) {
        assert!(pair[0].score >= pair[1].score);
    }
});
