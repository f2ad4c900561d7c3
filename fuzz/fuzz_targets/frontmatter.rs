// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Fuzz target for skill file parsing.
//!
//! Any text must parse into a skill with a non-empty name whose sections tile
//! the body.

#![no_main]

use libfuzzer_sys::fuzz_target;
use skillsearch::parse::{parse_skill, split_frontmatter};

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    let (_, body) = split_frontmatter(&text);
    assert!(body.len() <= text.len());

    let skill = parse_skill(&text, "fuzz-skill");
    assert!(!skill.name.is_empty());
    assert!(!skill.sections.is_empty());
});
