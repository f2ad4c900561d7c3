// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Pre-built bundles for production.
//!
//! A bundle is one JSON file holding every document, a catalog snapshot, and
//! the serialized search index, so a production start never touches the
//! plugin directory. Alongside it, `bundle-stats.json` records per-collection
//! counts and sizes for tracking bundle growth between releases.
//!
//! Loading trusts the embedded index only if it passes the version and
//! checksum guards in [`crate::persist`]. Anything else is rebuilt from the
//! documents with a warning, which costs startup time but never correctness.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::discover::{load_plugin, PluginContents, VendorDocDirs};
use crate::catalog::{build_catalog, Catalog};
use crate::error::{Error, Result, ResultExt};
use crate::index::{build_index, SearchIndex};
use crate::parse::{apply_annotations, read_annotations};
use crate::persist::{deserialize_index_value, serialize_index};
use crate::types::{AgentMap, CommandMap, SkillMap};

/// Written into every bundle this build produces.
pub const BUNDLE_VERSION: &str = env!("CARGO_PKG_VERSION");

pub const BUNDLE_FILE: &str = "bundle.json";
pub const STATS_FILE: &str = "bundle-stats.json";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bundle {
    pub version: String,
    pub generated_at: String,
    #[serde(default)]
    pub skills: SkillMap,
    #[serde(default)]
    pub commands: CommandMap,
    #[serde(default)]
    pub agents: AgentMap,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<Catalog>,
    /// Kept as raw JSON so an index from another format version still lets
    /// the rest of the bundle load.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub search_index: Option<serde_json::Value>,
}

impl Bundle {
    /// Assemble a bundle from loaded documents, building the index and
    /// catalog. `generated_at` is an RFC 3339 timestamp.
    pub fn from_contents(contents: PluginContents, generated_at: String) -> Result<Self> {
        let index = build_index(&contents.skills);
        let search_index = serde_json::to_value(serialize_index(&index))?;
        let catalog = build_catalog(&contents.skills, &contents.agents, None);

        Ok(Self {
            version: BUNDLE_VERSION.to_string(),
            generated_at,
            skills: contents.skills,
            commands: contents.commands,
            agents: contents.agents,
            catalog: Some(catalog),
            search_index: Some(search_index),
        })
    }

    /// Restore the embedded index, or rebuild it from `skills` when it is
    /// missing or unusable.
    pub fn search_index(&self) -> SearchIndex {
        let restored = self.search_index.clone().and_then(deserialize_index_value);
        match restored {
            Some(index) => {
                info!(docs = index.doc_count(), "search index loaded from bundle");
                index
            }
            None => {
                if self.search_index.is_some() {
                    warn!("bundled search index is incompatible, rebuilding");
                } else {
                    warn!("bundle has no search index, rebuilding");
                }
                build_index(&self.skills)
            }
        }
    }

    pub fn stats(&self) -> Result<BundleStats> {
        BundleStats::compute(self)
    }
}

/// Where a bundle's documents come from.
#[derive(Debug, Clone, Default)]
pub struct BundleOptions {
    /// `skill-annotations.json`. Missing is fine; malformed is an error.
    pub annotations: Option<PathBuf>,
    pub vendor_docs: VendorDocDirs,
}

/// Read a plugin directory and assemble its bundle.
pub fn generate_bundle(plugin: &Path, options: &BundleOptions) -> Result<Bundle> {
    let mut contents = load_plugin(plugin, &options.vendor_docs)?;

    match &options.annotations {
        Some(path) if path.is_file() => {
            let annotations = read_annotations(path).context(format!("reading {}", path.display()))?;
            let applied = apply_annotations(&mut contents.skills, &annotations);
            info!(applied, total = annotations.len(), "applied skill annotations");
        }
        Some(path) => warn!(path = %path.display(), "annotations file not found, using frontmatter only"),
        None => {}
    }

    Bundle::from_contents(contents, chrono::Utc::now().to_rfc3339())
}

/// Serialized size and count of one collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectionStats {
    pub count: usize,
    pub bytes: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStats {
    pub bytes: usize,
}

/// Contents of `bundle-stats.json`. Sizes are compact JSON bytes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BundleStats {
    pub total_bytes: usize,
    pub skills: CollectionStats,
    pub commands: CollectionStats,
    pub agents: CollectionStats,
    pub search_index: IndexStats,
    pub generated_at: String,
}

fn json_size<T: Serialize + ?Sized>(value: &T) -> Result<usize> {
    Ok(serde_json::to_vec(value)?.len())
}

fn collection<T: Serialize>(map: &std::collections::BTreeMap<String, T>) -> Result<CollectionStats> {
    let bytes = if map.is_empty() { 0 } else { json_size(map)? };
    Ok(CollectionStats {
        count: map.len(),
        bytes,
    })
}

impl BundleStats {
    pub fn compute(bundle: &Bundle) -> Result<Self> {
        let skills = collection(&bundle.skills)?;
        let commands = collection(&bundle.commands)?;
        let agents = collection(&bundle.agents)?;
        let search_index = IndexStats {
            bytes: match &bundle.search_index {
                Some(value) => json_size(value)?,
                None => 0,
            },
        };
        Ok(Self {
            total_bytes: skills.bytes + commands.bytes + agents.bytes + search_index.bytes,
            skills,
            commands,
            agents,
            search_index,
            generated_at: bundle.generated_at.clone(),
        })
    }
}

/// Write `bundle.json` (pretty) and `bundle-stats.json` into `out_dir`,
/// creating it if needed. Returns the path of the bundle file and its stats.
pub fn write_bundle(bundle: &Bundle, out_dir: &Path) -> Result<(PathBuf, BundleStats)> {
    fs::create_dir_all(out_dir).context(format!("creating {}", out_dir.display()))?;

    let bundle_path = out_dir.join(BUNDLE_FILE);
    fs::write(&bundle_path, serde_json::to_vec_pretty(bundle)?)
        .context(format!("writing {}", bundle_path.display()))?;

    let stats = bundle.stats()?;
    let stats_path = out_dir.join(STATS_FILE);
    fs::write(&stats_path, serde_json::to_vec_pretty(&stats)?)
        .context(format!("writing {}", stats_path.display()))?;

    info!(
        path = %bundle_path.display(),
        skills = stats.skills.count,
        total_bytes = stats.total_bytes,
        "wrote bundle"
    );
    Ok((bundle_path, stats))
}

/// Read a bundle file. A file that is not a bundle is [`Error::Bundle`].
pub fn read_bundle(path: &Path) -> Result<Bundle> {
    let text = fs::read_to_string(path).context(format!("reading {}", path.display()))?;
    let bundle: Bundle = serde_json::from_str(&text)
        .map_err(|e| Error::Bundle(format!("{}: {}", path.display(), e)))?;
    info!(
        version = %bundle.version,
        generated_at = %bundle.generated_at,
        skills = bundle.skills.len(),
        commands = bundle.commands.len(),
        agents = bundle.agents.len(),
        "read bundle"
    );
    Ok(bundle)
}

/// Read a bundle and hand back its documents and a usable index.
pub fn load_bundle(path: &Path) -> Result<(PluginContents, SearchIndex)> {
    let bundle = read_bundle(path)?;
    let index = bundle.search_index();
    let contents = PluginContents {
        skills: bundle.skills,
        commands: bundle.commands,
        agents: bundle.agents,
    };
    Ok((contents, index))
}
