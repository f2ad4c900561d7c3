// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Markdown sources to [`Skill`], [`Agent`], and [`Command`] values.
//!
//! Every source file is markdown with an optional YAML frontmatter block:
//!
//! ```text
//! ---
//! name: axiom-swift-concurrency
//! description: Swift 6 strict concurrency patterns
//! skill_type: discipline
//! mcp:
//!   category: concurrency
//!   tags: [actors, sendable]
//! ---
//! ## Overview
//! ...
//! ```
//!
//! Parsing comes in two strengths. [`read_frontmatter`] is strict and reports
//! a malformed block as [`Error::Frontmatter`]. The `parse_*` functions are
//! what the loader uses: a bad block is logged and treated as empty, so one
//! broken file never takes the library down with it.
//!
//! Vendor documentation has no frontmatter worth trusting. [`parse_vendor_doc`]
//! derives name, description, and tags from the file name and the markdown.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::{VENDOR_DIAGNOSTIC_PREFIX, VENDOR_GUIDE_PREFIX};
use crate::error::{Error, Result};
use crate::sections::parse_sections;
use crate::types::{Agent, Command, Skill, SkillMap, SkillSource, SkillType};

const DELIMITER: &str = "---";

/// Catalog metadata carried under the `mcp` key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct McpAnnotation {
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub related: Vec<String>,
}

/// The frontmatter keys this crate reads. Anything else is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct Frontmatter {
    pub name: Option<String>,
    pub description: Option<String>,
    pub skill_type: Option<String>,
    pub model: Option<String>,
    pub mcp: Option<McpAnnotation>,
}

impl Frontmatter {
    fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    fn description(&self) -> String {
        self.description.clone().unwrap_or_default()
    }
}

/// Split a document into `(yaml, body)`.
///
/// The block must open on the first line and close with a line that is
/// exactly `---`. One line break after the closing delimiter belongs to the
/// block. Without a complete block the whole text is the body.
///
/// ```
/// use skillsearch::parse::split_frontmatter;
///
/// let (yaml, body) = split_frontmatter("---\nname: x\n---\n## Body");
/// assert_eq!(yaml, Some("name: x\n"));
/// assert_eq!(body, "## Body");
///
/// assert_eq!(split_frontmatter("no block"), (None, "no block"));
/// ```
pub fn split_frontmatter(text: &str) -> (Option<&str>, &str) {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);

    let Some(rest) = text
        .strip_prefix("---\n")
        .or_else(|| text.strip_prefix("---\r\n"))
    else {
        return (None, text);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == DELIMITER {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return (Some(yaml), body);
        }
        offset += line.len();
    }
    (None, text)
}

fn parse_yaml(yaml: &str) -> std::result::Result<Frontmatter, serde_yaml::Error> {
    if yaml.trim().is_empty() {
        return Ok(Frontmatter::default());
    }
    serde_yaml::from_str(yaml)
}

/// Strict frontmatter parsing. `path` only labels the error.
pub fn read_frontmatter<'a>(path: &Path, text: &'a str) -> Result<(Frontmatter, &'a str)> {
    let (yaml, body) = split_frontmatter(text);
    let frontmatter = match yaml {
        Some(yaml) => parse_yaml(yaml).map_err(|e| Error::Frontmatter {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?,
        None => Frontmatter::default(),
    };
    Ok((frontmatter, body))
}

/// Lenient parsing: a malformed block is logged and read as empty.
fn frontmatter_or_default<'a>(text: &'a str, origin: &str) -> (Frontmatter, &'a str) {
    match read_frontmatter(Path::new(origin), text) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!(file = origin, error = %e, "ignoring malformed frontmatter");
            (Frontmatter::default(), split_frontmatter(text).1)
        }
    }
}

/// `"fix-build.md"` → `"fix-build"`. Names without the extension pass through.
pub fn name_from_filename(filename: &str) -> &str {
    filename.strip_suffix(".md").unwrap_or(filename)
}

/// Skill type from an explicit value, else from naming conventions.
///
/// An explicit value that is not a known type is logged and ignored.
///
/// ```
/// use skillsearch::parse::infer_skill_type;
/// use skillsearch::SkillType;
///
/// assert_eq!(infer_skill_type(None, "axiom-ios-build"), SkillType::Router);
/// assert_eq!(infer_skill_type(None, "axiom-lldb-ref"), SkillType::Reference);
/// assert_eq!(infer_skill_type(Some("meta"), "axiom-lldb-ref"), SkillType::Meta);
/// ```
pub fn infer_skill_type(explicit: Option<&str>, name: &str) -> SkillType {
    if let Some(value) = explicit.filter(|v| !v.is_empty()) {
        match value.parse() {
            Ok(t) => return t,
            Err(e) => warn!(skill = name, error = %e, "falling back to inferred skill type"),
        }
    }

    if name.starts_with("axiom-ios-") {
        SkillType::Router
    } else if name == "axiom-using-axiom" || name == "axiom-getting-started" {
        SkillType::Meta
    } else if name.ends_with("-ref") {
        SkillType::Reference
    } else if name.ends_with("-diag") {
        SkillType::Diagnostic
    } else {
        SkillType::Discipline
    }
}

/// Parse a `SKILL.md`. `fallback_name` is usually the skill's directory name.
pub fn parse_skill(text: &str, fallback_name: &str) -> Skill {
    let (frontmatter, body) = frontmatter_or_default(text, fallback_name);
    let name = frontmatter.name().unwrap_or(fallback_name).to_string();
    let skill_type = infer_skill_type(frontmatter.skill_type.as_deref(), &name);
    let mcp = frontmatter.mcp.clone().unwrap_or_default();

    Skill {
        description: frontmatter.description(),
        content: body.to_string(),
        skill_type,
        source: SkillSource::Axiom,
        category: mcp.category,
        tags: mcp.tags,
        related: mcp.related,
        sections: parse_sections(body),
        name,
    }
}

/// Parse a command file (`commands/<name>.md`).
pub fn parse_command(text: &str, filename: &str) -> Command {
    let (frontmatter, body) = frontmatter_or_default(text, filename);
    Command {
        name: frontmatter
            .name()
            .unwrap_or_else(|| name_from_filename(filename))
            .to_string(),
        description: frontmatter.description(),
        content: body.to_string(),
    }
}

/// Parse an agent file (`agents/<name>.md`).
pub fn parse_agent(text: &str, filename: &str) -> Agent {
    let (frontmatter, body) = frontmatter_or_default(text, filename);
    Agent {
        name: frontmatter
            .name()
            .unwrap_or_else(|| name_from_filename(filename))
            .to_string(),
        description: frontmatter.description(),
        model: frontmatter.model.clone().filter(|m| !m.is_empty()),
        content: body.to_string(),
    }
}

// =============================================================================
// VENDOR DOCUMENTATION
// =============================================================================

/// Which vendor collection a document came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VendorDocKind {
    Guide,
    Diagnostic,
}

impl VendorDocKind {
    pub fn prefix(self) -> &'static str {
        match self {
            VendorDocKind::Guide => VENDOR_GUIDE_PREFIX,
            VendorDocKind::Diagnostic => VENDOR_DIAGNOSTIC_PREFIX,
        }
    }

    pub fn skill_type(self) -> SkillType {
        match self {
            VendorDocKind::Guide => SkillType::Reference,
            VendorDocKind::Diagnostic => SkillType::Diagnostic,
        }
    }
}

fn vendor_stem(filename: &str) -> String {
    name_from_filename(filename)
        .to_lowercase()
        .chars()
        .map(|c| if c == ' ' || c == '_' { '-' } else { c })
        .collect()
}

/// `("LiquidGlass-SwiftUI.md", Guide)` → `"apple-guide-liquidglass-swiftui"`.
pub fn vendor_doc_name(filename: &str, kind: VendorDocKind) -> String {
    format!("{}{}", kind.prefix(), vendor_stem(filename))
}

fn is_heading(line: &str) -> bool {
    line.starts_with('#')
}

/// First prose line of the body, else the title heading's text.
fn vendor_description(body: &str) -> String {
    let mut title = None;
    for line in body.lines().map(str::trim) {
        if line.is_empty() {
            continue;
        }
        if is_heading(line) {
            if title.is_none() {
                title = Some(line.trim_start_matches('#').trim());
            }
            continue;
        }
        return line.to_string();
    }
    title.unwrap_or_default().to_string()
}

fn vendor_tags(filename: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for part in vendor_stem(filename).split(|c: char| !c.is_ascii_alphanumeric()) {
        if part.len() > 1 && !tags.iter().any(|t| t == part) {
            tags.push(part.to_string());
        }
    }
    tags
}

/// Parse one vendor markdown document into a skill with source `apple`.
pub fn parse_vendor_doc(text: &str, filename: &str, kind: VendorDocKind) -> Skill {
    let (frontmatter, body) = frontmatter_or_default(text, filename);
    let description = frontmatter
        .description
        .filter(|d| !d.is_empty())
        .unwrap_or_else(|| vendor_description(body));

    Skill {
        name: vendor_doc_name(filename, kind),
        description,
        content: body.to_string(),
        skill_type: kind.skill_type(),
        source: SkillSource::Apple,
        category: None,
        tags: vendor_tags(filename),
        related: vec![],
        sections: parse_sections(body),
    }
}

// =============================================================================
// ANNOTATIONS
// =============================================================================

/// Per-skill catalog metadata maintained outside the skill files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkillAnnotation {
    pub category: Option<String>,
    pub tags: Vec<String>,
    pub related: Vec<String>,
}

/// Contents of `skill-annotations.json`: skill name → annotation.
pub type SkillAnnotations = BTreeMap<String, SkillAnnotation>;

/// Read an annotations file.
pub fn read_annotations(path: &Path) -> Result<SkillAnnotations> {
    let text = std::fs::read_to_string(path)?;
    Ok(serde_json::from_str(&text)?)
}

/// Merge annotations over parsed skills. Returns how many skills changed.
///
/// A present category replaces the skill's; non-empty tag and related lists
/// replace the skill's lists. Annotations for unknown names are ignored.
pub fn apply_annotations(skills: &mut SkillMap, annotations: &SkillAnnotations) -> usize {
    let mut applied = 0;
    for (name, annotation) in annotations {
        let Some(skill) = skills.get_mut(name) else {
            continue;
        };
        if let Some(category) = &annotation.category {
            skill.category = Some(category.clone());
        }
        if !annotation.tags.is_empty() {
            skill.tags = annotation.tags.clone();
        }
        if !annotation.related.is_empty() {
            skill.related = annotation.related.clone();
        }
        applied += 1;
    }
    applied
}
