// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Reading a plugin directory.
//!
//! Layout:
//!
//! ```text
//! <root>/skills/<dir>/SKILL.md
//! <root>/commands/*.md
//! <root>/agents/*.md
//! ```
//!
//! File reads and parsing run on rayon when the `parallel` feature is on.
//! Results are always collected in path order, so the same directory gives
//! the same maps regardless of thread scheduling.

use std::ffi::OsStr;
use std::fs;
use std::path::{Path, PathBuf};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, warn};

use crate::error::{Result, ResultExt};
use crate::parse::{parse_agent, parse_command, parse_skill, parse_vendor_doc, VendorDocKind};
use crate::types::{AgentMap, CommandMap, SkillMap};

/// Everything a plugin directory provides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PluginContents {
    pub skills: SkillMap,
    pub commands: CommandMap,
    pub agents: AgentMap,
}

/// Optional directories of vendor markdown to load next to the plugin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VendorDocDirs {
    pub guides: Option<PathBuf>,
    pub diagnostics: Option<PathBuf>,
}

impl VendorDocDirs {
    pub fn is_empty(&self) -> bool {
        self.guides.is_none() && self.diagnostics.is_none()
    }
}

/// A source file and the name to fall back on if its frontmatter has none.
struct SourceFile {
    path: PathBuf,
    fallback: String,
}

/// Read and parse each file, dropping files that cannot be read.
fn parse_all<T, F>(files: &[SourceFile], parse: F) -> Vec<T>
where
    T: Send,
    F: Fn(&str, &str) -> T + Sync,
{
    let read = |file: &SourceFile| match fs::read_to_string(&file.path) {
        Ok(text) => Some(parse(&text, &file.fallback)),
        Err(e) => {
            warn!(path = %file.path.display(), error = %e, "skipping unreadable file");
            None
        }
    };

    #[cfg(feature = "parallel")]
    let parsed: Vec<Option<T>> = files.par_iter().map(read).collect();
    #[cfg(not(feature = "parallel"))]
    let parsed: Vec<Option<T>> = files.iter().map(read).collect();

    parsed.into_iter().flatten().collect()
}

/// Markdown files directly inside `dir`, sorted by path.
fn markdown_files(dir: &Path) -> Result<Vec<SourceFile>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir).context(format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_file() || path.extension() != Some(OsStr::new("md")) {
            continue;
        }
        let Some(fallback) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };
        files.push(SourceFile { path, fallback });
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));
    Ok(files)
}

/// Insert by name, keeping the first of any duplicates.
fn insert_unique<T>(map: &mut std::collections::BTreeMap<String, T>, name: String, item: T, kind: &str) {
    if map.contains_key(&name) {
        warn!(kind, name = %name, "duplicate name, keeping the first definition");
        return;
    }
    debug!(kind, name = %name, "loaded");
    map.insert(name, item);
}

/// Load `skills/<dir>/SKILL.md` for every subdirectory. Directories without
/// a `SKILL.md` are skipped.
pub fn load_skills(root: &Path) -> Result<SkillMap> {
    let dir = root.join("skills");
    let mut files = Vec::new();
    for entry in fs::read_dir(&dir).context(format!("reading {}", dir.display()))? {
        let path = entry?.path();
        if !path.is_dir() {
            continue;
        }
        let skill_file = path.join("SKILL.md");
        let Some(fallback) = path.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
            continue;
        };
        if skill_file.is_file() {
            files.push(SourceFile {
                path: skill_file,
                fallback,
            });
        } else {
            debug!(dir = %fallback, "no SKILL.md, skipping");
        }
    }
    files.sort_by(|a, b| a.path.cmp(&b.path));

    let mut skills = SkillMap::new();
    for skill in parse_all(&files, parse_skill) {
        insert_unique(&mut skills, skill.name.clone(), skill, "skill");
    }
    info!(count = skills.len(), "loaded skills");
    Ok(skills)
}

/// Load `commands/*.md`. A missing directory is an empty map.
pub fn load_commands(root: &Path) -> Result<CommandMap> {
    let dir = root.join("commands");
    let mut commands = CommandMap::new();
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "no commands directory");
        return Ok(commands);
    }
    for command in parse_all(&markdown_files(&dir)?, parse_command) {
        insert_unique(&mut commands, command.name.clone(), command, "command");
    }
    info!(count = commands.len(), "loaded commands");
    Ok(commands)
}

/// Load `agents/*.md`. A missing directory is an empty map.
pub fn load_agents(root: &Path) -> Result<AgentMap> {
    let dir = root.join("agents");
    let mut agents = AgentMap::new();
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "no agents directory");
        return Ok(agents);
    }
    for agent in parse_all(&markdown_files(&dir)?, parse_agent) {
        insert_unique(&mut agents, agent.name.clone(), agent, "agent");
    }
    info!(count = agents.len(), "loaded agents");
    Ok(agents)
}

/// Load vendor guides and diagnostics. Unreadable directories are logged and
/// contribute nothing.
pub fn load_vendor_docs(dirs: &VendorDocDirs) -> SkillMap {
    let mut docs = SkillMap::new();
    let sources = [
        (dirs.guides.as_deref(), VendorDocKind::Guide),
        (dirs.diagnostics.as_deref(), VendorDocKind::Diagnostic),
    ];

    for (dir, kind) in sources {
        let Some(dir) = dir else { continue };
        let files = match markdown_files(dir) {
            Ok(files) => files,
            Err(e) => {
                warn!(dir = %dir.display(), error = %e, "cannot read vendor docs");
                continue;
            }
        };
        let total = files.len();
        for skill in parse_all(&files, |text, file| parse_vendor_doc(text, file, kind)) {
            insert_unique(&mut docs, skill.name.clone(), skill, "vendor doc");
        }
        info!(dir = %dir.display(), ?kind, total, "loaded vendor docs");
    }
    docs
}

/// Load a whole plugin directory, plus any vendor docs. Plugin skills win
/// over vendor docs with the same name.
pub fn load_plugin(root: &Path, vendor: &VendorDocDirs) -> Result<PluginContents> {
    let mut skills = load_skills(root)?;
    for (name, doc) in load_vendor_docs(vendor) {
        skills.entry(name).or_insert(doc);
    }
    Ok(PluginContents {
        skills,
        commands: load_commands(root)?,
        agents: load_agents(root)?,
    })
}
