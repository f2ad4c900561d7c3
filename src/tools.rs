// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The four assistant-facing tools, rendered as markdown text.
//!
//! Arguments arrive as loosely-typed JSON. Two kinds of "no" come back:
//!
//! - bad arguments (missing `query`, `skills` not an array, unknown skill
//!   type) are [`Error::InvalidArgument`], because the caller has a bug;
//! - valid arguments naming something that does not exist get a normal text
//!   answer saying so, because that is information, not failure.

use std::str::FromStr;

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::catalog::category_label;
use crate::error::{Error, Result};
use crate::loader::LibraryState;
use crate::sections::filter_sections;
use crate::types::{SearchOptions, SkillSource, SkillType};

pub const MAX_SEARCH_LIMIT: usize = 50;
pub const MAX_READ_SKILLS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tool {
    GetCatalog,
    SearchSkills,
    ReadSkill,
    GetAgent,
}

impl Tool {
    pub const ALL: [Tool; 4] = [
        Tool::GetCatalog,
        Tool::SearchSkills,
        Tool::ReadSkill,
        Tool::GetAgent,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Tool::GetCatalog => "get_catalog",
            Tool::SearchSkills => "search_skills",
            Tool::ReadSkill => "read_skill",
            Tool::GetAgent => "get_agent",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Tool::GetCatalog => {
                "Skills grouped by category, plus the agent list. Optional `category` \
                 narrows to one category; `includeDescriptions` adds descriptions."
            }
            Tool::SearchSkills => {
                "Ranked keyword search over skills. Returns names, scores, and the \
                 sections that matched."
            }
            Tool::ReadSkill => {
                "Skill content, optionally narrowed to sections by heading substring. \
                 Up to 10 skills per call; `listSections` returns only the table of contents."
            }
            Tool::GetAgent => "An agent's instructions and model preference.",
        }
    }
}

impl FromStr for Tool {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Tool::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| Error::invalid_argument(format!("unknown tool '{}'", s)))
    }
}

/// Deserialize tool arguments, treating `null` as `{}`.
fn parse_args<T: DeserializeOwned>(tool: Tool, args: &Value) -> Result<T> {
    let args = if args.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        args.clone()
    };
    serde_json::from_value(args)
        .map_err(|e| Error::invalid_argument(format!("{}: {}", tool.as_str(), e)))
}

fn parse_enum<T: FromStr<Err = String>>(value: Option<&str>) -> Result<Option<T>> {
    value
        .map(|v| v.parse().map_err(Error::InvalidArgument))
        .transpose()
}

/// Run a tool by name against one library snapshot.
pub fn call_tool(state: &LibraryState, name: &str, args: &Value) -> Result<String> {
    let tool: Tool = name.parse()?;
    debug!(tool = tool.as_str(), "tool call");
    match tool {
        Tool::GetCatalog => get_catalog(state, args),
        Tool::SearchSkills => search_skills(state, args),
        Tool::ReadSkill => read_skill(state, args),
        Tool::GetAgent => get_agent(state, args),
    }
}

fn type_tag(skill_type: SkillType) -> String {
    if skill_type == SkillType::Discipline {
        String::new()
    } else {
        format!(" [{}]", skill_type)
    }
}

fn source_tag(source: SkillSource) -> &'static str {
    match source {
        SkillSource::Apple => " [Apple]",
        SkillSource::Axiom => "",
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CatalogArgs {
    category: Option<String>,
    include_descriptions: bool,
}

/// `get_catalog { category?, includeDescriptions? }`. The category may be
/// given as a label or a slug.
pub fn get_catalog(state: &LibraryState, args: &Value) -> Result<String> {
    let args: CatalogArgs = parse_args(Tool::GetCatalog, args)?;
    let filter = args
        .category
        .as_deref()
        .map(|c| category_label(c).unwrap_or(c));
    let catalog = state.catalog(filter);

    let mut lines: Vec<String> = Vec::new();
    lines.push("# Skills Catalog".to_string());
    lines.push(format!("{} skills, {} agents", catalog.total_skills, catalog.total_agents));
    lines.push(String::new());

    for category in catalog.categories.values() {
        lines.push(format!("## {} ({})", category.label, category.skills.len()));
        for skill in &category.skills {
            let tags = format!("{}{}", type_tag(skill.skill_type), source_tag(skill.source));
            if args.include_descriptions {
                lines.push(format!("- **{}**{}: {}", skill.name, tags, skill.description));
            } else {
                lines.push(format!("- {}{}", skill.name, tags));
            }
        }
        lines.push(String::new());
    }

    if !catalog.agents.is_empty() {
        lines.push(format!("## Agents ({})", catalog.agents.len()));
        for agent in &catalog.agents {
            if args.include_descriptions {
                lines.push(format!("- **{}**: {}", agent.name, agent.description));
            } else {
                lines.push(format!("- {}", agent.name));
            }
        }
        lines.push(String::new());
    }
    Ok(render(&lines))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchArgs {
    query: String,
    #[serde(default)]
    limit: Option<f64>,
    #[serde(default)]
    skill_type: Option<String>,
    #[serde(default)]
    category: Option<String>,
    #[serde(default)]
    source: Option<String>,
}

/// Clamp a requested result count into `1..=MAX_SEARCH_LIMIT`.
pub fn clamp_limit(limit: Option<f64>) -> usize {
    match limit {
        Some(l) if l.is_finite() => l.clamp(1.0, MAX_SEARCH_LIMIT as f64) as usize,
        _ => SearchOptions::DEFAULT_LIMIT,
    }
}

/// `search_skills { query, limit?, skillType?, category?, source? }`.
pub fn search_skills(state: &LibraryState, args: &Value) -> Result<String> {
    let args: SearchArgs = parse_args(Tool::SearchSkills, args)?;
    if args.query.trim().is_empty() {
        return Err(Error::invalid_argument(
            "search_skills: \"query\" must be a non-empty string",
        ));
    }

    let options = SearchOptions {
        limit: clamp_limit(args.limit),
        skill_type: parse_enum(args.skill_type.as_deref())?,
        category: args.category,
        source: parse_enum(args.source.as_deref())?,
    };
    let results = state.search(&args.query, &options);
    if results.is_empty() {
        return Ok(format!("No skills found for query: \"{}\"", args.query));
    }

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("# Search Results for \"{}\"", args.query));
    lines.push(format!("{} results", results.len()));
    lines.push(String::new());

    for result in &results {
        let category = result
            .category
            .as_deref()
            .map(|c| format!(" ({})", c))
            .unwrap_or_default();
        lines.push(format!(
            "### {}{}{}{}",
            result.name,
            type_tag(result.skill_type),
            source_tag(result.source),
            category
        ));
        lines.push(format!("Score: {:.2}", result.score));
        lines.push(result.description.clone());
        if !result.matching_sections.is_empty() {
            lines.push(format!("Matching sections: {}", result.matching_sections.join(", ")));
        }
        lines.push(String::new());
    }
    Ok(render(&lines))
}

#[derive(Debug, Deserialize)]
struct SkillRequest {
    name: String,
    #[serde(default)]
    sections: Option<Vec<String>>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReadArgs {
    skills: Vec<SkillRequest>,
    #[serde(default)]
    list_sections: bool,
}

fn not_found(lines: &mut Vec<String>, name: &str) {
    lines.push(format!("## {}", name));
    lines.push("Skill not found.".to_string());
    lines.push(String::new());
}

/// One line per entry, newline-terminated.
fn render(lines: &[String]) -> String {
    let mut text = lines.join("\n");
    text.push('\n');
    text
}

/// `read_skill { skills: [{ name, sections? }], listSections? }`.
pub fn read_skill(state: &LibraryState, args: &Value) -> Result<String> {
    let args: ReadArgs = parse_args(Tool::ReadSkill, args)?;
    if args.skills.is_empty() {
        return Err(Error::invalid_argument(
            "read_skill: \"skills\" must be a non-empty array",
        ));
    }
    if args.skills.len() > MAX_READ_SKILLS {
        return Ok(format!(
            "Too many skills requested ({}). Maximum is {} per call.",
            args.skills.len(),
            MAX_READ_SKILLS
        ));
    }

    let mut lines: Vec<String> = Vec::new();
    for request in &args.skills {
        let Some(skill) = state.skill(&request.name) else {
            not_found(&mut lines, &request.name);
            continue;
        };

        if args.list_sections {
            lines.push(format!("## {} (sections)", skill.name));
            lines.push(format!(
                "Type: {} | Total: {} chars",
                skill.skill_type,
                skill.content.chars().count()
            ));
            lines.push(String::new());
            lines.push("| Section | Chars |".to_string());
            lines.push("|---------|-------|".to_string());
            for section in &skill.sections {
                lines.push(format!("| {} | {} |", section.heading, section.char_count));
            }
            lines.push(String::new());
            continue;
        }

        let filtered = filter_sections(skill, request.sections.as_deref());
        if filtered.is_full() {
            lines.push(format!("## {}", skill.name));
        } else {
            let headings: Vec<&str> = filtered.sections.iter().map(|s| s.heading.as_str()).collect();
            lines.push(format!("## {} (filtered: {})", skill.name, headings.join(", ")));
        }
        lines.push(format!(
            "Type: {} | {} chars",
            skill.skill_type,
            filtered.content.chars().count()
        ));
        lines.push(String::new());
        lines.push(filtered.content.to_string());
        if !skill.related.is_empty() {
            lines.push(String::new());
            lines.push(format!("**Related Skills**: {}", skill.related.join(", ")));
        }
        lines.push(String::new());
    }
    Ok(render(&lines))
}

#[derive(Debug, Deserialize)]
struct AgentArgs {
    agent: String,
}

/// `get_agent { agent }`.
pub fn get_agent(state: &LibraryState, args: &Value) -> Result<String> {
    let args: AgentArgs = parse_args(Tool::GetAgent, args)?;
    if args.agent.is_empty() {
        return Err(Error::invalid_argument(
            "get_agent: \"agent\" must be a non-empty string",
        ));
    }

    let Some(agent) = state.agent(&args.agent) else {
        return Ok(format!(
            "Agent not found: \"{}\". Use {} to see available agents.",
            args.agent,
            Tool::GetCatalog.as_str()
        ));
    };

    let mut lines: Vec<String> = Vec::new();
    lines.push(format!("# Agent: {}", agent.name));
    lines.push(agent.description.clone());
    if let Some(model) = &agent.model {
        lines.push(format!("Model: {}", model));
    }
    lines.push(String::new());
    lines.push(agent.content.clone());
    Ok(lines.join("\n"))
}
