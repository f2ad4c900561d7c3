// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Field-weighted BM25 search over a library of markdown skills.
//!
//! A skill is a markdown document with frontmatter. This crate tokenizes
//! skills, builds an inverted index over five weighted fields, answers
//! keyword queries with typo and prefix tolerance, groups skills into a
//! category catalog, and slices skill bodies down to the sections a caller
//! asked for.
//!
//! # Architecture
//!
//! ```text
//!  plugin dir ──▶ parse ──▶ SkillMap ──▶ index::build_index ──▶ SearchIndex
//!  bundle.json ─▶ loader ───────┘              │                   │
//!                                              ▼                   ▼
//!                         catalog::build_catalog      persist (JSON, CRC32)
//!                                                                  │
//!  query ──▶ tokenize ──▶ search::expand ──▶ scoring (BM25) ──▶ ranked results
//! ```
//!
//! | Module     | Role                                                    |
//! |------------|---------------------------------------------------------|
//! | `tokenize` | camelCase split, stopwords, suffix stripping            |
//! | `index`    | postings per field, document lengths, section term sets |
//! | `search`   | term expansion, AND semantics, filters, ranking         |
//! | `scoring`  | BM25 constants, field weights, expansion weights        |
//! | `fuzzy`    | bounded Levenshtein distance                            |
//! | `persist`  | versioned, checksummed index format                     |
//! | `catalog`  | classifier chain from skills to category labels         |
//! | `sections` | heading-based section parsing and filtering             |
//! | `parse`    | frontmatter, skill-type inference, vendor docs          |
//! | `loader`   | plugin discovery, bundles, the live [`SkillLibrary`]    |
//! | `tools`    | assistant-facing tool handlers                          |
//!
//! # Usage
//!
//! ```
//! use skillsearch::{build_index, search, SearchOptions};
//! use skillsearch::testing::sample_library;
//!
//! let skills = sample_library();
//! let index = build_index(&skills);
//!
//! let results = search(&index, "navigation", &SearchOptions::default(), Some(&skills));
//! assert_eq!(results[0].name, "swiftui-nav");
//! ```

pub mod catalog;
pub mod config;
pub mod error;
pub mod fuzzy;
pub mod index;
pub mod loader;
pub mod parse;
pub mod persist;
pub mod scoring;
pub mod search;
pub mod sections;
pub mod testing;
pub mod tokenize;
pub mod tools;
pub mod types;

pub use catalog::{build_catalog, category_label, category_slug, Catalog, Classifier};
pub use config::{Config, Mode, Settings};
pub use error::{Error, Result, ResultExt};
pub use fuzzy::levenshtein_within;
pub use index::{add_skills, build_index, SearchIndex};
pub use loader::{LibrarySource, SkillLibrary};
pub use persist::{
    deserialize_index, deserialize_index_json, serialize_index, SerializedIndex,
    SERIALIZATION_VERSION,
};
pub use search::search;
pub use sections::{filter_sections, parse_sections, FilteredSkill};
pub use tokenize::{process_term, split_terms, tokenize};
pub use types::{
    Agent, AgentMap, Command, CommandMap, DocId, Field, SearchOptions, SearchResult, Section,
    Skill, SkillMap, SkillSource, SkillType,
};
