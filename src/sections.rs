// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Heading-based slicing of skill content.
//!
//! A full skill can run to tens of kilobytes. Most questions need one or two
//! sections, so [`filter_sections`] hands back just those, and
//! [`parse_sections`] is what decides where sections begin and end.
//!
//! Only `#` and `##` start a section. `###` and deeper stay inside their
//! parent, which keeps sections coarse enough to be self-contained.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::types::{Section, Skill, PREAMBLE_HEADING};

static HEADING: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(#{1,6})\s+(.+)$").expect("heading pattern is valid"));

/// `(level, heading text)` if the line opens a section.
fn section_heading(line: &str) -> Option<(u8, &str)> {
    let caps = HEADING.captures(line)?;
    let level = caps.get(1)?.as_str().len();
    if level > 2 {
        return None;
    }
    Some((level as u8, caps.get(2)?.as_str().trim()))
}

fn make_section(lines: &[&str], heading: &str, level: u8, start: usize, end: usize) -> Section {
    let char_count = lines[start..=end].join("\n").chars().count();
    Section {
        heading: heading.to_string(),
        level,
        start_line: start,
        end_line: end,
        char_count,
    }
}

/// Split markdown into sections.
///
/// Lines before the first heading become a level-0 [`PREAMBLE_HEADING`]
/// section. A document with no headings at all is one preamble section, so
/// the result is never empty.
///
/// ```
/// use skillsearch::parse_sections;
///
/// let sections = parse_sections("intro\n## Setup\nstep one\n### detail\n## Usage\ncall it");
/// let headings: Vec<&str> = sections.iter().map(|s| s.heading.as_str()).collect();
/// assert_eq!(headings, vec!["_preamble", "Setup", "Usage"]);
/// assert_eq!((sections[1].start_line, sections[1].end_line), (1, 3));
/// ```
pub fn parse_sections(content: &str) -> Vec<Section> {
    let lines: Vec<&str> = content.split('\n').collect();
    let mut sections = Vec::new();
    // (heading, level, start line) of the section being collected
    let mut current: Option<(&str, u8, usize)> = None;

    for (i, line) in lines.iter().enumerate() {
        let Some((level, heading)) = section_heading(line) else {
            continue;
        };
        match current {
            Some((h, l, start)) => sections.push(make_section(&lines, h, l, start, i - 1)),
            None if i > 0 => sections.push(make_section(&lines, PREAMBLE_HEADING, 0, 0, i - 1)),
            None => {}
        }
        current = Some((heading, level, i));
    }

    let last = lines.len() - 1;
    match current {
        Some((h, l, start)) => sections.push(make_section(&lines, h, l, start, last)),
        None => sections.push(make_section(&lines, PREAMBLE_HEADING, 0, 0, last)),
    }
    sections
}

/// A skill's content, possibly narrowed to some of its sections.
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredSkill<'a> {
    pub skill: &'a Skill,
    pub content: Cow<'a, str>,
    pub sections: Cow<'a, [Section]>,
}

impl FilteredSkill<'_> {
    /// True when no filtering happened and this is the whole skill.
    pub fn is_full(&self) -> bool {
        matches!(
            (&self.content, &self.sections),
            (Cow::Borrowed(_), Cow::Borrowed(_))
        )
    }
}

/// Narrow a skill to the sections whose heading contains any filter string,
/// case-insensitively.
///
/// No filter (or an empty one) returns the skill unchanged without copying.
/// Matched sections are joined with a blank line between them. Nothing
/// matching gives empty content and no sections.
pub fn filter_sections<'a>(skill: &'a Skill, filter: Option<&[String]>) -> FilteredSkill<'a> {
    let filter = match filter {
        Some(f) if !f.is_empty() => f,
        _ => {
            return FilteredSkill {
                skill,
                content: Cow::Borrowed(skill.content.as_str()),
                sections: Cow::Borrowed(skill.sections.as_slice()),
            }
        }
    };

    let needles: Vec<String> = filter.iter().map(|f| f.to_lowercase()).collect();
    let lines: Vec<&str> = skill.content.split('\n').collect();
    let mut matched = Vec::new();
    let mut parts = Vec::new();

    for section in &skill.sections {
        let heading = section.heading.to_lowercase();
        if !needles.iter().any(|n| heading.contains(n.as_str())) {
            continue;
        }
        let start = section.start_line.min(lines.len());
        let end = (section.end_line + 1).min(lines.len()).max(start);
        parts.push(lines[start..end].join("\n"));
        matched.push(section.clone());
    }

    FilteredSkill {
        skill,
        content: Cow::Owned(parts.join("\n\n")),
        sections: Cow::Owned(matched),
    }
}
