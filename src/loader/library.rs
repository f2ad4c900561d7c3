// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The live skill library.
//!
//! Readers never wait on a rebuild. All documents and the index sit in one
//! immutable [`LibraryState`] behind `RwLock<Arc<_>>`:
//!
//! - a query clones the `Arc` under a read lock held for a pointer copy, then
//!   searches without any lock;
//! - [`SkillLibrary::reload`] loads and indexes with no lock held, then swaps
//!   the `Arc` in one short write;
//! - [`SkillLibrary::add_skills`] copies the state on write, so snapshots
//!   already handed out keep seeing the old documents.

use std::path::PathBuf;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use super::bundle::load_bundle;
use super::discover::{load_plugin, PluginContents, VendorDocDirs};
use crate::catalog::{build_catalog, Catalog};
use crate::error::Result;
use crate::index::{self, build_index, SearchIndex};
use crate::search::search;
use crate::types::{Agent, Command, SearchOptions, SearchResult, Skill, SkillMap};

/// Where the library's documents come from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LibrarySource {
    /// A plugin directory read live (development mode).
    Plugin {
        root: PathBuf,
        vendor_docs: VendorDocDirs,
    },
    /// A pre-built `bundle.json` (production mode).
    Bundle(PathBuf),
    /// Documents handed in directly. Reloading keeps them as they are.
    Memory,
}

impl LibrarySource {
    fn load(&self) -> Result<Option<(PluginContents, SearchIndex)>> {
        match self {
            LibrarySource::Plugin { root, vendor_docs } => {
                let contents = load_plugin(root, vendor_docs)?;
                let index = build_index(&contents.skills);
                Ok(Some((contents, index)))
            }
            LibrarySource::Bundle(path) => load_bundle(path).map(Some),
            LibrarySource::Memory => Ok(None),
        }
    }
}

/// One consistent view of the documents and their index.
#[derive(Debug, Clone, Default)]
pub struct LibraryState {
    pub contents: PluginContents,
    pub index: SearchIndex,
}

impl LibraryState {
    pub fn skills(&self) -> &SkillMap {
        &self.contents.skills
    }

    pub fn skill(&self, name: &str) -> Option<&Skill> {
        self.contents.skills.get(name)
    }

    pub fn agent(&self, name: &str) -> Option<&Agent> {
        self.contents.agents.get(name)
    }

    pub fn command(&self, name: &str) -> Option<&Command> {
        self.contents.commands.get(name)
    }

    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
        search(&self.index, query, options, Some(&self.contents.skills))
    }

    pub fn catalog(&self, category: Option<&str>) -> Catalog {
        build_catalog(&self.contents.skills, &self.contents.agents, category)
    }
}

/// Shared, swappable access to skills, agents, commands, and the index.
#[derive(Debug)]
pub struct SkillLibrary {
    source: LibrarySource,
    state: RwLock<Arc<LibraryState>>,
}

impl SkillLibrary {
    /// Load everything from `source`.
    pub fn open(source: LibrarySource) -> Result<Self> {
        let state = match source.load()? {
            Some((contents, index)) => LibraryState { contents, index },
            None => LibraryState::default(),
        };
        Ok(Self::with_state(source, state))
    }

    /// A library over documents already in memory.
    pub fn from_contents(contents: PluginContents) -> Self {
        let index = build_index(&contents.skills);
        Self::with_state(LibrarySource::Memory, LibraryState { contents, index })
    }

    fn with_state(source: LibrarySource, state: LibraryState) -> Self {
        info!(
            skills = state.contents.skills.len(),
            commands = state.contents.commands.len(),
            agents = state.contents.agents.len(),
            indexed = state.index.doc_count(),
            "skill library ready"
        );
        Self {
            source,
            state: RwLock::new(Arc::new(state)),
        }
    }

    pub fn source(&self) -> &LibrarySource {
        &self.source
    }

    /// The current state. Holding it does not block reloads.
    pub fn snapshot(&self) -> Arc<LibraryState> {
        self.state.read().clone()
    }

    pub fn search(&self, query: &str, options: &SearchOptions) -> Vec<SearchResult> {
        self.snapshot().search(query, options)
    }

    pub fn skill(&self, name: &str) -> Option<Skill> {
        self.snapshot().skill(name).cloned()
    }

    pub fn agent(&self, name: &str) -> Option<Agent> {
        self.snapshot().agent(name).cloned()
    }

    pub fn command(&self, name: &str) -> Option<Command> {
        self.snapshot().command(name).cloned()
    }

    pub fn catalog(&self, category: Option<&str>) -> Catalog {
        self.snapshot().catalog(category)
    }

    /// Re-read the source and swap in the result. On error the current state
    /// stays in place.
    pub fn reload(&self) -> Result<()> {
        let Some((contents, index)) = self.source.load()? else {
            return Ok(());
        };
        let state = Arc::new(LibraryState { contents, index });
        info!(indexed = state.index.doc_count(), "reloaded skill library");
        *self.state.write() = state;
        Ok(())
    }

    /// Add skills whose names are not present yet. Returns how many were
    /// added to the document map.
    pub fn add_skills(&self, skills: &SkillMap) -> usize {
        let mut guard = self.state.write();
        let state = Arc::make_mut(&mut *guard);

        let mut added = 0;
        for (name, skill) in skills {
            if !state.contents.skills.contains_key(name) {
                state.contents.skills.insert(name.clone(), skill.clone());
                added += 1;
            }
        }
        index::add_skills(&mut state.index, skills);
        added
    }
}
