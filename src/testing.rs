//! Test utilities shared across unit and integration tests.
//!
//! This module is always compiled but hidden from documentation.
//! It provides canonical implementations of test helpers to avoid duplication.

#![doc(hidden)]

use crate::sections::parse_sections;
use crate::types::{Agent, AgentMap, Skill, SkillMap, SkillSource, SkillType};

/// Create a discipline skill from axiom with sections parsed from `content`.
///
/// This is the canonical implementation used across all tests.
pub fn make_skill(name: &str, description: &str, content: &str) -> Skill {
    Skill {
        name: name.to_string(),
        description: description.to_string(),
        content: content.to_string(),
        skill_type: SkillType::Discipline,
        source: SkillSource::Axiom,
        category: None,
        tags: vec![],
        related: vec![],
        sections: parse_sections(content),
    }
}

/// Create a skill of a given type.
pub fn make_typed_skill(name: &str, skill_type: SkillType, content: &str) -> Skill {
    Skill {
        skill_type,
        ..make_skill(name, &format!("Description of {}", name), content)
    }
}

/// Create a skill carrying a category slug.
pub fn make_skill_with_category(name: &str, category: &str) -> Skill {
    Skill {
        category: Some(category.to_string()),
        ..make_skill(name, &format!("Description of {}", name), "")
    }
}

/// Create an agent with an empty prompt.
pub fn make_agent(name: &str, description: &str) -> Agent {
    Agent {
        name: name.to_string(),
        description: description.to_string(),
        model: None,
        content: String::new(),
    }
}

/// Key skills by name.
pub fn skill_map(skills: impl IntoIterator<Item = Skill>) -> SkillMap {
    skills.into_iter().map(|s| (s.name.clone(), s)).collect()
}

/// Key agents by name.
pub fn agent_map(agents: impl IntoIterator<Item = Agent>) -> AgentMap {
    agents.into_iter().map(|a| (a.name.clone(), a)).collect()
}

/// A small library that exercises every search path: prefix, fuzzy,
/// camelCase splitting, AND combination, and a router that must stay hidden.
pub fn sample_library() -> SkillMap {
    let mut nav = make_skill(
        "swiftui-nav",
        "SwiftUI navigation patterns",
        "## NavigationStack\nUse NavigationStack for push navigation.\n## Deep Links\nHandle URLs.",
    );
    nav.category = Some("ui".into());
    nav.tags = vec!["navigation".into(), "swiftui".into()];

    let mut concurrency = make_skill(
        "swift-concurrency",
        "Swift concurrency with async await and actors",
        "## Actors\nActor isolation protects state.\n## Sendable\nMark types Sendable.",
    );
    concurrency.category = Some("concurrency".into());

    let mut lldb = make_typed_skill(
        "axiom-lldb-ref",
        SkillType::Reference,
        "## Breakpoints\nSet breakpoints in the debugger.",
    );
    lldb.source = SkillSource::Apple;
    lldb.category = Some("build".into());

    let router = make_typed_skill(
        "axiom-ios-ui",
        SkillType::Router,
        "Use /skill swiftui-nav for navigation.",
    );

    skill_map(vec![nav, concurrency, lldb, router])
}
