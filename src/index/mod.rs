// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The inverted index: term → postings, plus what ranking needs per document.
//!
//! The vocabulary is a `BTreeMap` so prefix expansion is a range scan and
//! every traversal (search, serialization, checksumming) sees terms in the
//! same order.
//!
//! # Invariants
//!
//! - Postings inside one term's list are sorted by `(doc, field)`, with at
//!   most one posting per pair.
//! - `docs[i].length` is the sum of the five field token counts of doc `i`.
//! - `avg_doc_length` is exactly `sum(length) / docs.len()` (0 when empty).
//! - No two docs share a name, and no doc is a router.

mod build;

pub use build::{add_skills, build_index, section_term_sets};

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::types::{DocId, Field, SkillSource, SkillType};

/// One (document, field) occurrence of a term.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Posting {
    pub doc: DocId,
    pub field: Field,
    /// Raw term frequency within the field.
    pub tf: u32,
}

/// Terms of one section, keyed by its heading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionTerms {
    pub heading: String,
    pub terms: BTreeSet<String>,
}

/// Per-document data kept in the index.
///
/// The stored fields (type, source, category, description) are enough to
/// filter and render a hit without the skill map.
#[derive(Debug, Clone, PartialEq)]
pub struct DocEntry {
    pub name: String,
    pub length: u32,
    pub skill_type: SkillType,
    pub source: SkillSource,
    pub category: Option<String>,
    pub description: String,
    /// Section term sets in section order. Headings are unique.
    pub sections: Vec<SectionTerms>,
}

impl DocEntry {
    /// Headings of sections containing any of `terms`, in section order.
    pub fn matching_sections(&self, terms: &[String]) -> Vec<String> {
        self.sections
            .iter()
            .filter(|s| terms.iter().any(|t| s.terms.contains(t)))
            .map(|s| s.heading.clone())
            .collect()
    }
}

/// Field-weighted BM25 index over a skill collection.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchIndex {
    pub(crate) vocabulary: BTreeMap<String, Vec<Posting>>,
    pub(crate) docs: Vec<DocEntry>,
    pub(crate) doc_ids: HashMap<String, DocId>,
    pub(crate) avg_doc_length: f64,
}

impl SearchIndex {
    /// Assemble an index from parts, recomputing the name lookup and the
    /// average length.
    ///
    /// Used by deserialization; the builder goes through [`build_index`].
    pub(crate) fn from_parts(
        vocabulary: BTreeMap<String, Vec<Posting>>,
        docs: Vec<DocEntry>,
    ) -> Self {
        let doc_ids = docs
            .iter()
            .enumerate()
            .map(|(i, d)| (d.name.clone(), DocId(i as u32)))
            .collect();
        let mut index = Self {
            vocabulary,
            docs,
            doc_ids,
            avg_doc_length: 0.0,
        };
        index.recompute_average();
        index
    }

    pub(crate) fn recompute_average(&mut self) {
        let total: u64 = self.docs.iter().map(|d| u64::from(d.length)).sum();
        self.avg_doc_length = if self.docs.is_empty() {
            0.0
        } else {
            total as f64 / self.docs.len() as f64
        };
    }

    pub fn doc_count(&self) -> usize {
        self.docs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.docs.is_empty()
    }

    pub fn avg_doc_length(&self) -> f64 {
        self.avg_doc_length
    }

    /// Number of distinct terms.
    pub fn term_count(&self) -> usize {
        self.vocabulary.len()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.doc_ids.contains_key(name)
    }

    pub fn doc_id(&self, name: &str) -> Option<DocId> {
        self.doc_ids.get(name).copied()
    }

    pub fn doc(&self, id: DocId) -> Option<&DocEntry> {
        self.docs.get(id.as_usize())
    }

    /// Documents in insertion order.
    pub fn docs(&self) -> &[DocEntry] {
        &self.docs
    }

    /// Document names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.docs.iter().map(|d| d.name.as_str())
    }

    pub fn postings(&self, term: &str) -> &[Posting] {
        self.vocabulary.get(term).map_or(&[], Vec::as_slice)
    }

    /// Number of documents containing `term` in any field.
    pub fn doc_freq(&self, term: &str) -> usize {
        let postings = self.postings(term);
        let mut count = 0;
        let mut last = None;
        for p in postings {
            if last != Some(p.doc) {
                count += 1;
                last = Some(p.doc);
            }
        }
        count
    }

    /// All terms, in sorted order.
    pub fn terms(&self) -> impl Iterator<Item = &str> {
        self.vocabulary.keys().map(String::as_str)
    }

    /// Terms that strictly extend `prefix`, in sorted order.
    pub fn terms_with_prefix<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        use std::ops::Bound;
        self.vocabulary
            .range::<str, _>((Bound::Excluded(prefix), Bound::Unbounded))
            .map(|(t, _)| t.as_str())
            .take_while(move |t| t.starts_with(prefix))
    }

    /// Section term sets for one document, by name.
    pub fn section_terms(&self, name: &str) -> Option<&[SectionTerms]> {
        self.doc_id(name)
            .and_then(|id| self.doc(id))
            .map(|d| d.sections.as_slice())
    }
}
