// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Getting documents into memory.
//!
//! Two sources, one result:
//!
//! - **Development**: read a plugin directory as it is on disk
//!   ([`load_plugin`]) and index it at startup.
//! - **Production**: read a bundle produced by [`generate_bundle`], which
//!   already carries a serialized index.
//!
//! Either way the documents end up in a [`SkillLibrary`].

pub mod bundle;
mod discover;
pub mod library;

pub use bundle::{
    generate_bundle, load_bundle, read_bundle, write_bundle, Bundle, BundleOptions, BundleStats,
    BUNDLE_FILE, STATS_FILE,
};
pub use discover::{
    load_agents, load_commands, load_plugin, load_skills, load_vendor_docs, PluginContents,
    VendorDocDirs,
};
pub use library::{LibrarySource, LibraryState, SkillLibrary};
