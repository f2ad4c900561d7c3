// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Where documents come from and how loud to be about it.
//!
//! The binary fills this from flags with environment fallbacks
//! (`SKILLSEARCH_MODE`, `SKILLSEARCH_DEV_PATH`, `SKILLSEARCH_BUNDLE`,
//! `SKILLSEARCH_LOG`). Library users can build a [`Config`] directly.

use std::fmt;
use std::path::PathBuf;

use clap::ValueEnum;

use crate::error::{Error, Result};
use crate::loader::{LibrarySource, SkillLibrary, VendorDocDirs};

pub const DEFAULT_BUNDLE_PATH: &str = "dist/bundle.json";
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Where documents are read from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Read a plugin directory live.
    #[value(alias = "dev")]
    Development,
    /// Read a pre-built bundle.
    #[default]
    #[value(alias = "prod")]
    Production,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Mode::Development => "development",
            Mode::Production => "production",
        })
    }
}

/// Unresolved settings, as they arrive from flags or the environment.
#[derive(Debug, Clone, Default)]
pub struct Settings {
    pub mode: Mode,
    pub dev_path: Option<PathBuf>,
    pub bundle_path: Option<PathBuf>,
    pub vendor_docs: VendorDocDirs,
    pub log_level: Option<String>,
}

/// Resolved configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub mode: Mode,
    pub source: LibrarySource,
    pub log_level: String,
}

impl Config {
    /// Resolve settings. Development mode needs a plugin path.
    pub fn resolve(settings: Settings) -> Result<Self> {
        let source = match settings.mode {
            Mode::Development => {
                let root = settings.dev_path.ok_or_else(|| {
                    Error::invalid_argument(
                        "development mode needs a plugin path (--dev-path or SKILLSEARCH_DEV_PATH)",
                    )
                })?;
                LibrarySource::Plugin {
                    root,
                    vendor_docs: settings.vendor_docs,
                }
            }
            Mode::Production => LibrarySource::Bundle(
                settings
                    .bundle_path
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_BUNDLE_PATH)),
            ),
        };

        Ok(Self {
            mode: settings.mode,
            source,
            log_level: settings
                .log_level
                .filter(|l| !l.is_empty())
                .unwrap_or_else(|| DEFAULT_LOG_LEVEL.to_string()),
        })
    }

    pub fn open_library(&self) -> Result<SkillLibrary> {
        SkillLibrary::open(self.source.clone())
    }
}
