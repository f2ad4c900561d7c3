// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for persisted index loading.
//!
//! Corrupt or hostile JSON must yield `None`, never a panic, and anything that
//! does load must be searchable.

#![no_main]

use libfuzzer_sys::fuzz_target;
use skillsearch::{deserialize_index_json, search, SearchOptions};

fuzz_target!(|data: &[u8]| {
    let Ok(json) = std::str::from_utf8(data) else {
        return;
    };

    if let Some(index) = deserialize_index_json(json) {
        assert!(index.avg_doc_length().is_finite());
        let _ = search(&index, "swift navigation", &SearchOptions::default(), None);
    }
});
