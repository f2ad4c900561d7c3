// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Building and extending the index.

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, info};

use super::{DocEntry, Posting, SearchIndex, SectionTerms};
use crate::tokenize::tokenize;
use crate::types::{DocId, Field, Skill, SkillMap};

/// Text of one field, as it is fed to the tokenizer.
fn field_text(skill: &Skill, field: Field) -> String {
    match field {
        Field::Name => skill.name.replace(['-', '_'], " "),
        Field::Description => skill.description.clone(),
        Field::Tags => skill.tags.join(" "),
        Field::Headings => skill
            .sections
            .iter()
            .filter(|s| s.level > 0)
            .map(|s| s.heading.as_str())
            .collect::<Vec<_>>()
            .join(" "),
        Field::Body => skill.content.clone(),
    }
}

/// Term sets per section: tokens of the heading plus the section's lines.
/// The preamble's placeholder heading contributes nothing.
///
/// Sections sharing a heading collapse into one entry that keeps the first
/// position and the last section's terms.
pub fn section_term_sets(skill: &Skill) -> Vec<SectionTerms> {
    let lines: Vec<&str> = skill.content.split('\n').collect();
    let mut out: Vec<SectionTerms> = Vec::with_capacity(skill.sections.len());

    for section in &skill.sections {
        let start = section.start_line.min(lines.len());
        let end = (section.end_line + 1).min(lines.len()).max(start);
        let heading = if section.level > 0 { section.heading.as_str() } else { "" };
        let text = format!("{} {}", heading, lines[start..end].join(" "));
        let terms: BTreeSet<String> = tokenize(&text).into_iter().collect();

        match out.iter_mut().find(|s| s.heading == section.heading) {
            Some(existing) => existing.terms = terms,
            None => out.push(SectionTerms {
                heading: section.heading.clone(),
                terms,
            }),
        }
    }
    out
}

/// Append one skill as the next document. Caller checks searchability and
/// uniqueness.
fn insert_skill(index: &mut SearchIndex, skill: &Skill) {
    let doc = DocId(index.docs.len() as u32);
    let mut length = 0u32;

    for field in Field::ALL {
        let tokens = tokenize(&field_text(skill, field));
        length += tokens.len() as u32;

        let mut counts: BTreeMap<String, u32> = BTreeMap::new();
        for token in tokens {
            *counts.entry(token).or_insert(0) += 1;
        }
        for (term, tf) in counts {
            index
                .vocabulary
                .entry(term)
                .or_default()
                .push(Posting { doc, field, tf });
        }
    }

    debug!(name = %skill.name, doc = doc.get(), length, "indexed skill");

    index.doc_ids.insert(skill.name.clone(), doc);
    index.docs.push(DocEntry {
        name: skill.name.clone(),
        length,
        skill_type: skill.skill_type,
        source: skill.source,
        category: skill.category.clone(),
        description: skill.description.clone(),
        sections: section_term_sets(skill),
    });
}

/// Build an index over every searchable skill, in name order.
///
/// ```
/// use skillsearch::{build_index, SkillMap};
///
/// let index = build_index(&SkillMap::new());
/// assert_eq!(index.doc_count(), 0);
/// assert_eq!(index.avg_doc_length(), 0.0);
/// ```
pub fn build_index(skills: &SkillMap) -> SearchIndex {
    let mut index = SearchIndex::default();
    for skill in skills.values() {
        if skill.skill_type.is_searchable() && !index.contains(&skill.name) {
            insert_skill(&mut index, skill);
        }
    }
    index.recompute_average();

    info!(
        docs = index.doc_count(),
        terms = index.term_count(),
        avg_len = index.avg_doc_length(),
        "built search index"
    );
    index
}

/// Add skills that are not in the index yet. Returns how many were added.
///
/// Names already present are left alone (first write wins) and routers are
/// skipped. The average length is recomputed exactly afterwards.
pub fn add_skills(index: &mut SearchIndex, skills: &SkillMap) -> usize {
    let before = index.doc_count();
    for skill in skills.values() {
        if skill.skill_type.is_searchable() && !index.contains(&skill.name) {
            insert_skill(index, skill);
        }
    }
    index.recompute_average();

    let added = index.doc_count() - before;
    if added > 0 {
        info!(added, docs = index.doc_count(), "extended search index");
    }
    added
}
