// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Portable index format.
//!
//! The index ships inside `bundle.json`, so the format is plain serde JSON
//! rather than anything clever. Two guards keep a stale or damaged index from
//! being trusted:
//!
//! - `serializationVersion`: missing or unknown means "built by something
//!   else", and loading yields `None` so the caller rebuilds from documents.
//! - `checksum`: CRC32 over the vocabulary, postings, and per-document
//!   lengths. A mismatch means the payload was edited or truncated.
//!
//! The average document length is not stored. It is recomputed from the
//! integer lengths on load, so a round trip reproduces scores bit for bit.
//!
//! ```text
//! {
//!   "engine": {
//!     "serializationVersion": 1,
//!     "checksum": 2840215377,
//!     "fields": ["name", "description", "tags", "headings", "body"],
//!     "docs": [{ "name": "...", "length": 42, "skillType": "reference", ... }],
//!     "postings": { "actor": [[0, "body", 2], [3, "name", 1]] }
//!   },
//!   "sectionTerms": { "doc-name": { "Heading": ["term", ...] } },
//!   "docCount": 4
//! }
//! ```

use std::collections::{BTreeMap, BTreeSet};

use crc32fast::Hasher as Crc32Hasher;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::index::{DocEntry, Posting, SearchIndex, SectionTerms};
use crate::types::{DocId, Field, SkillSource, SkillType};

/// Current format version. Bump on any change to the engine layout.
pub const SERIALIZATION_VERSION: u32 = 1;

/// Postings on the wire: `[doc, field, tf]`.
pub type WirePosting = (u32, Field, u32);

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SerializedDoc {
    pub name: String,
    pub length: u32,
    pub skill_type: SkillType,
    pub source: SkillSource,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub description: String,
    /// Section headings in order; `sectionTerms` is keyed by these.
    pub headings: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SerializedEngine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub serialization_version: Option<u32>,
    pub checksum: u32,
    pub fields: Vec<Field>,
    pub docs: Vec<SerializedDoc>,
    pub postings: BTreeMap<String, Vec<WirePosting>>,
}

/// The whole index as it appears in a bundle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SerializedIndex {
    pub engine: SerializedEngine,
    pub section_terms: BTreeMap<String, BTreeMap<String, Vec<String>>>,
    pub doc_count: usize,
}

fn engine_checksum(engine: &SerializedEngine) -> u32 {
    let mut hasher = Crc32Hasher::new();
    for field in &engine.fields {
        hasher.update(&[field.code()]);
    }
    for doc in &engine.docs {
        hasher.update(doc.name.as_bytes());
        hasher.update(&[0]);
        hasher.update(&doc.length.to_le_bytes());
    }
    for (term, postings) in &engine.postings {
        hasher.update(term.as_bytes());
        hasher.update(&[0]);
        for (doc, field, tf) in postings {
            hasher.update(&doc.to_le_bytes());
            hasher.update(&[field.code()]);
            hasher.update(&tf.to_le_bytes());
        }
    }
    hasher.finalize()
}

/// Convert an index into its portable form.
pub fn serialize_index(index: &SearchIndex) -> SerializedIndex {
    let docs = index
        .docs
        .iter()
        .map(|d| SerializedDoc {
            name: d.name.clone(),
            length: d.length,
            skill_type: d.skill_type,
            source: d.source,
            category: d.category.clone(),
            description: d.description.clone(),
            headings: d.sections.iter().map(|s| s.heading.clone()).collect(),
        })
        .collect();

    let postings = index
        .vocabulary
        .iter()
        .map(|(term, list)| {
            let wire = list.iter().map(|p| (p.doc.get(), p.field, p.tf)).collect();
            (term.clone(), wire)
        })
        .collect();

    let section_terms = index
        .docs
        .iter()
        .map(|d| {
            let sections = d
                .sections
                .iter()
                .map(|s| (s.heading.clone(), s.terms.iter().cloned().collect()))
                .collect();
            (d.name.clone(), sections)
        })
        .collect();

    let mut engine = SerializedEngine {
        serialization_version: Some(SERIALIZATION_VERSION),
        checksum: 0,
        fields: Field::ALL.to_vec(),
        docs,
        postings,
    };
    engine.checksum = engine_checksum(&engine);

    SerializedIndex {
        engine,
        section_terms,
        doc_count: index.doc_count(),
    }
}

/// Restore an index, or `None` if the data is from another format version,
/// fails its checksum, or is internally inconsistent.
pub fn deserialize_index(data: SerializedIndex) -> Option<SearchIndex> {
    let SerializedIndex {
        engine,
        mut section_terms,
        doc_count,
    } = data;

    match engine.serialization_version {
        Some(SERIALIZATION_VERSION) => {}
        Some(other) => {
            debug!(version = other, "unsupported index version");
            return None;
        }
        None => {
            debug!("index has no serialization version");
            return None;
        }
    }
    if engine.fields != Field::ALL {
        debug!(fields = ?engine.fields, "index field layout differs");
        return None;
    }
    let expected = engine_checksum(&engine);
    if engine.checksum != expected {
        warn!(
            stored = engine.checksum,
            computed = expected,
            "index checksum mismatch"
        );
        return None;
    }
    if doc_count != engine.docs.len() {
        warn!(doc_count, docs = engine.docs.len(), "index doc count mismatch");
        return None;
    }

    let n_docs = engine.docs.len() as u32;
    let mut vocabulary = BTreeMap::new();
    for (term, wire) in engine.postings {
        let mut postings = Vec::with_capacity(wire.len());
        for (doc, field, tf) in wire {
            if doc >= n_docs {
                warn!(term = %term, doc, "posting points past the last document");
                return None;
            }
            postings.push(Posting {
                doc: DocId(doc),
                field,
                tf,
            });
        }
        postings.sort_unstable_by_key(|p| (p.doc, p.field));
        vocabulary.insert(term, postings);
    }

    let docs = engine
        .docs
        .into_iter()
        .map(|d| {
            let mut terms_by_heading = section_terms.remove(&d.name).unwrap_or_default();
            let sections = d
                .headings
                .into_iter()
                .map(|heading| {
                    let terms: BTreeSet<String> = terms_by_heading
                        .remove(&heading)
                        .unwrap_or_default()
                        .into_iter()
                        .collect();
                    SectionTerms { heading, terms }
                })
                .collect();
            DocEntry {
                name: d.name,
                length: d.length,
                skill_type: d.skill_type,
                source: d.source,
                category: d.category,
                description: d.description,
                sections,
            }
        })
        .collect();

    Some(SearchIndex::from_parts(vocabulary, docs))
}

/// Restore an index straight from JSON text. Unparseable input is `None`.
pub fn deserialize_index_json(json: &str) -> Option<SearchIndex> {
    match serde_json::from_str::<SerializedIndex>(json) {
        Ok(data) => deserialize_index(data),
        Err(e) => {
            debug!(error = %e, "index JSON did not parse");
            None
        }
    }
}

/// Restore an index from an already-parsed JSON value (the bundle's
/// `searchIndex`). Anything that does not fit the current shape is `None`.
pub fn deserialize_index_value(value: serde_json::Value) -> Option<SearchIndex> {
    match serde_json::from_value::<SerializedIndex>(value) {
        Ok(data) => deserialize_index(data),
        Err(e) => {
            debug!(error = %e, "index value has an unexpected shape");
            None
        }
    }
}
