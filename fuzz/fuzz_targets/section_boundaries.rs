// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for section parsing.
//!
//! Whatever the markdown looks like, sections must tile the document: the
//! first starts at line 0, each starts right after the previous one ends, and
//! the last ends on the final line.

#![no_main]

use libfuzzer_sys::fuzz_target;
use skillsearch::testing::make_skill;
use skillsearch::{filter_sections, parse_sections};

fuzz_target!(|data: &[u8]| {
    let content = String::from_utf8_lossy(data);
    let line_count = content.split('\n').count();
    let sections = parse_sections(&content);

    assert!(!sections.is_empty(), "sections are never empty");
    assert_eq!(sections[0].start_line, 0);
    assert_eq!(sections[sections.len() - 1].end_line, line_count - 1);

    for pair in sections.windows(2) {
        assert_eq!(pair[1].start_line, pair[0].end_line + 1, "gap or overlap");
    }
    for section in &sections {
        assert!(section.start_line <= section.end_line);
        assert!(section.level <= 2);
    }

    // Filtering by a section's own heading always finds it.
    let skill = make_skill("fuzz", "", &content);
    let heading = skill.sections[skill.sections.len() - 1].heading.clone();
    let filtered = filter_sections(&skill, Some(&[heading]));
    assert!(!filtered.sections.is_empty());
});
