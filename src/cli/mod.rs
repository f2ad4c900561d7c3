// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! CLI definitions for the skillsearch command-line interface.
//!
//! `bundle` turns a plugin directory into `bundle.json`. `inspect` summarizes
//! a bundle. The remaining commands run the assistant tools against whichever
//! source `--mode` selects, so what you see here is what the assistant sees.

pub mod display;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use skillsearch::config::{Mode, Settings, DEFAULT_LOG_LEVEL};
use skillsearch::loader::VendorDocDirs;

#[derive(Parser)]
#[command(
    name = "skillsearch",
    about = "BM25 search, catalog, and section delivery for skill libraries",
    version
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Read a plugin directory (development) or a bundle (production)
    #[arg(long, global = true, value_enum, env = "SKILLSEARCH_MODE", default_value_t = Mode::Production)]
    pub mode: Mode,

    /// Plugin directory for development mode
    #[arg(long, global = true, env = "SKILLSEARCH_DEV_PATH")]
    pub dev_path: Option<PathBuf>,

    /// Bundle file for production mode
    #[arg(long, global = true, env = "SKILLSEARCH_BUNDLE")]
    pub bundle: Option<PathBuf>,

    /// Directory of vendor guide markdown to load alongside the plugin
    #[arg(long, global = true, env = "SKILLSEARCH_GUIDES_PATH")]
    pub guides: Option<PathBuf>,

    /// Directory of vendor diagnostic markdown to load alongside the plugin
    #[arg(long, global = true, env = "SKILLSEARCH_DIAGNOSTICS_PATH")]
    pub diagnostics: Option<PathBuf>,

    /// Log level or filter directive (trace, debug, info, warn, error)
    #[arg(long, global = true, env = "SKILLSEARCH_LOG", default_value = DEFAULT_LOG_LEVEL)]
    pub log_level: String,
}

impl GlobalArgs {
    pub fn vendor_docs(&self) -> VendorDocDirs {
        VendorDocDirs {
            guides: self.guides.clone(),
            diagnostics: self.diagnostics.clone(),
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            mode: self.mode,
            dev_path: self.dev_path.clone(),
            bundle_path: self.bundle.clone(),
            vendor_docs: self.vendor_docs(),
            log_level: Some(self.log_level.clone()),
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build bundle.json and bundle-stats.json from a plugin directory
    Bundle {
        /// Plugin directory containing skills/, commands/, and agents/
        plugin: PathBuf,

        /// Output directory
        #[arg(short, long, default_value = "dist")]
        output: PathBuf,

        /// Skill annotations to merge over frontmatter
        #[arg(long, default_value = "skill-annotations.json")]
        annotations: PathBuf,
    },

    /// Search skills and print ranked results
    Search {
        /// Search query
        query: String,

        /// Maximum number of results (clamped to 1..=50)
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Only skills of this type (discipline, reference, diagnostic, meta)
        #[arg(long = "type")]
        skill_type: Option<String>,

        /// Only skills in this category (slug or label)
        #[arg(long)]
        category: Option<String>,

        /// Only skills from this source (axiom, apple)
        #[arg(long)]
        source: Option<String>,

        /// Print results as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print the skill catalog
    Catalog {
        /// Restrict to one category (slug or label)
        category: Option<String>,

        /// Include descriptions
        #[arg(short, long)]
        descriptions: bool,

        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print skill content, optionally narrowed to sections
    Read {
        /// Skill names
        #[arg(required = true)]
        names: Vec<String>,

        /// Section heading filter (case-insensitive substring), repeatable
        #[arg(short, long = "section")]
        sections: Vec<String>,

        /// Only list each skill's sections and their sizes
        #[arg(long)]
        list_sections: bool,
    },

    /// Print an agent's instructions
    Agent {
        /// Agent name
        name: String,
    },

    /// Summarize a bundle file
    Inspect {
        /// Bundle file (defaults to --bundle)
        file: Option<PathBuf>,
    },
}
