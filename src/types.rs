// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The building blocks: skills, sections, agents, and what a search hands back.
//!
//! Everything here is plain data with serde derives. The JSON shape is
//! camelCase because bundles are consumed by tooling outside this crate, and
//! that tooling was there first.
//!
//! # Invariants (the stuff that breaks if you ignore it)
//!
//! - **Section**: `start_line <= end_line + 1` and sections of one skill are
//!   contiguous and non-overlapping. The parser guarantees this; hand-built
//!   skills in tests should too.
//!
//! - **Skill**: `name` is the identity. Two skills with the same name are the
//!   same skill, and the first one in wins (see [`crate::add_skills`]).
//!
//! - **SkillType**: `Router` never enters the index, `Router` and `Meta` never
//!   enter the catalog. Ask [`SkillType::is_searchable`] and
//!   [`SkillType::is_catalogable`] instead of matching variants at call sites.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

// =============================================================================
// NEWTYPES
// =============================================================================

/// Dense document identifier inside one [`crate::SearchIndex`].
///
/// Assigned in insertion order, so sorting by `DocId` is sorting by "who got
/// indexed first". The ranker leans on that for stable tie ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[repr(transparent)]
#[serde(transparent)]
pub struct DocId(pub u32);

impl DocId {
    /// Get the underlying value.
    #[inline]
    pub fn get(self) -> u32 {
        self.0
    }

    /// Convert to usize for array indexing.
    #[inline]
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl From<u32> for DocId {
    fn from(id: u32) -> Self {
        DocId(id)
    }
}

impl From<DocId> for usize {
    fn from(id: DocId) -> Self {
        id.0 as usize
    }
}

// =============================================================================
// SKILL CLASSIFICATION
// =============================================================================

/// What kind of skill this is.
///
/// `Discipline` is the general-purpose default. `Router` skills exist only to
/// point at other skills (the catalog reads their references), so they are
/// kept out of search results. `Meta` skills describe the library itself.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillType {
    #[default]
    Discipline,
    Reference,
    Diagnostic,
    Router,
    Meta,
}

impl SkillType {
    pub const ALL: [SkillType; 5] = [
        SkillType::Discipline,
        SkillType::Reference,
        SkillType::Diagnostic,
        SkillType::Router,
        SkillType::Meta,
    ];

    /// Matches the serde `rename_all = "lowercase"` convention.
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillType::Discipline => "discipline",
            SkillType::Reference => "reference",
            SkillType::Diagnostic => "diagnostic",
            SkillType::Router => "router",
            SkillType::Meta => "meta",
        }
    }

    /// Can a skill of this type be inserted into the search index?
    #[inline]
    pub fn is_searchable(self) -> bool {
        !matches!(self, SkillType::Router)
    }

    /// Can a skill of this type be listed in the catalog?
    #[inline]
    pub fn is_catalogable(self) -> bool {
        !matches!(self, SkillType::Router | SkillType::Meta)
    }
}

impl fmt::Display for SkillType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SkillType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| format!("unknown skill type '{}'", s))
    }
}

/// Who wrote the content: first-party skills or vendor-provided docs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillSource {
    #[default]
    Axiom,
    Apple,
}

impl SkillSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkillSource::Axiom => "axiom",
            SkillSource::Apple => "apple",
        }
    }
}

impl fmt::Display for SkillSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkillSource {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "axiom" => Ok(SkillSource::Axiom),
            "apple" => Ok(SkillSource::Apple),
            other => Err(format!("unknown skill source '{}'", other)),
        }
    }
}

// =============================================================================
// DOCUMENT TYPES
// =============================================================================

/// Heading used for content that appears before the first `#`/`##` heading.
pub const PREAMBLE_HEADING: &str = "_preamble";

/// A heading-delimited slice of a skill's markdown body.
///
/// Line numbers index into `content.split('\n')` and are inclusive on both
/// ends. Level is 1 or 2 for real headings and 0 for the preamble; `###` and
/// deeper never start a section.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Section {
    pub heading: String,
    pub level: u8,
    pub start_line: usize,
    pub end_line: usize,
    pub char_count: usize,
}

/// A unit of retrievable documentation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Skill {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub skill_type: SkillType,
    #[serde(default)]
    pub source: SkillSource,
    /// Category slug from annotations (e.g. `"concurrency"`), not a label.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    /// Names of related skills. Weak references: they may not resolve.
    #[serde(default)]
    pub related: Vec<String>,
    #[serde(default)]
    pub sections: Vec<Section>,
}

/// An agent: a named prompt with optional model preference.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Agent {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub content: String,
}

/// A slash command exposed to the assistant as a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Command {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub content: String,
}

/// Skills keyed by name. Ordered so index construction is deterministic.
pub type SkillMap = BTreeMap<String, Skill>;

/// Agents keyed by name.
pub type AgentMap = BTreeMap<String, Agent>;

/// Commands keyed by name.
pub type CommandMap = BTreeMap<String, Command>;

// =============================================================================
// INDEX FIELDS
// =============================================================================

/// Which part of a skill a posting came from.
///
/// Each field is tokenized on its own and carries its own weight
/// (see [`crate::scoring::field_weight`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Field {
    Name,
    Description,
    Tags,
    Headings,
    Body,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::Name,
        Field::Description,
        Field::Tags,
        Field::Headings,
        Field::Body,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Description => "description",
            Field::Tags => "tags",
            Field::Headings => "headings",
            Field::Body => "body",
        }
    }

    /// Stable one-byte code, used when checksumming persisted postings.
    pub fn code(self) -> u8 {
        match self {
            Field::Name => 0,
            Field::Description => 1,
            Field::Tags => 2,
            Field::Headings => 3,
            Field::Body => 4,
        }
    }
}

// =============================================================================
// SEARCH API TYPES
// =============================================================================

/// Knobs for [`crate::search`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    pub limit: usize,
    pub skill_type: Option<SkillType>,
    /// Category slug, compared against the skill's `category`.
    pub category: Option<String>,
    pub source: Option<SkillSource>,
}

impl SearchOptions {
    pub const DEFAULT_LIMIT: usize = 10;

    pub fn with_limit(limit: usize) -> Self {
        Self {
            limit,
            ..Self::default()
        }
    }
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            limit: Self::DEFAULT_LIMIT,
            skill_type: None,
            category: None,
            source: None,
        }
    }
}

/// One ranked hit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub name: String,
    pub score: f64,
    pub skill_type: SkillType,
    pub source: SkillSource,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    pub description: String,
    /// Headings of sections containing at least one query term, in section order.
    pub matching_sections: Vec<String>,
}
