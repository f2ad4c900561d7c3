// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Grouping skills into a browsable taxonomy.
//!
//! Every catalogable skill lands in exactly one category. The category comes
//! from the first classifier in the chain that has an opinion:
//!
//! 1. **Annotation**: the skill's `category` slug, mapped to its label.
//!    Unknown slugs fall through.
//! 2. **Router reference**: a router skill (`axiom-ios-*`) whose body says
//!    `/skill axiom-foo` puts `axiom-foo` in the router's category. When two
//!    routers claim the same skill, the later one in [`ROUTER_CATEGORIES`]
//!    wins.
//! 3. **Name**: vendor prefixes first, then an ordered list of substring
//!    rules, then `"General"`. This one always answers.
//!
//! The catalog is recomputed on every call. It is cheap, and caching it would
//! mean invalidating it on every reload.

use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::types::{AgentMap, Skill, SkillMap, SkillSource, SkillType};

/// Catch-all label.
pub const GENERAL: &str = "General";

/// Annotation slug → display label.
pub const CATEGORY_SLUGS: [(&str, &str); 15] = [
    ("build", "Build & Environment"),
    ("ui", "UI & Design"),
    ("data", "Data & Persistence"),
    ("concurrency", "Concurrency & Async"),
    ("performance", "Performance"),
    ("networking", "Networking"),
    ("integration", "System Integration"),
    ("accessibility", "Accessibility"),
    ("ai", "Apple Intelligence"),
    ("ml", "Machine Learning"),
    ("vision", "Computer Vision"),
    ("graphics", "Graphics & Metal"),
    ("games", "Games"),
    ("testing", "Testing"),
    ("general", GENERAL),
];

/// Router skill → the category it routes for.
pub const ROUTER_CATEGORIES: [(&str, &str); 13] = [
    ("axiom-ios-build", "Build & Environment"),
    ("axiom-ios-ui", "UI & Design"),
    ("axiom-ios-data", "Data & Persistence"),
    ("axiom-ios-concurrency", "Concurrency & Async"),
    ("axiom-ios-performance", "Performance"),
    ("axiom-ios-networking", "Networking"),
    ("axiom-ios-integration", "System Integration"),
    ("axiom-ios-accessibility", "Accessibility"),
    ("axiom-ios-ai", "Apple Intelligence"),
    ("axiom-ios-ml", "Machine Learning"),
    ("axiom-ios-vision", "Computer Vision"),
    ("axiom-ios-graphics", "Graphics & Metal"),
    ("axiom-ios-testing", "Testing"),
];

/// Vendor guide filename fragments, tried in order.
const VENDOR_GUIDE_CATEGORIES: [(&str, &str); 21] = [
    ("swiftui", "UI & Design"),
    ("uikit", "UI & Design"),
    ("appkit", "UI & Design"),
    ("widgetkit", "System Integration"),
    ("swift-concurrency", "Concurrency & Async"),
    ("swift-inlinearray", "Performance"),
    ("swiftdata", "Data & Persistence"),
    ("storekit", "System Integration"),
    ("foundationmodels", "Apple Intelligence"),
    ("appintents", "System Integration"),
    ("mapkit", "System Integration"),
    ("swift-charts", "UI & Design"),
    ("implementing-visual", "Computer Vision"),
    ("implementing-assistive", "Accessibility"),
    ("widgets-for-visionos", "System Integration"),
    ("foundation-attributedstring", "UI & Design"),
    ("alarmkit", "System Integration"),
    ("webkit", "UI & Design"),
    ("toolbar", "UI & Design"),
    ("styled-text", "UI & Design"),
    ("liquid-glass", "UI & Design"),
];

pub const VENDOR_GUIDE_PREFIX: &str = "apple-guide-";
pub const VENDOR_DIAGNOSTIC_PREFIX: &str = "apple-diag-";

/// Substring rules over skill names. First rule with any matching fragment wins.
const NAME_RULES: &[(&[&str], &str)] = &[
    (&["build", "xcode", "spm"], "Build & Environment"),
    (
        &[
            "swiftui",
            "uikit",
            "layout",
            "liquid-glass",
            "hig",
            "typography",
            "textkit",
            "animation",
            "ui-recording",
            "ui-testing",
        ],
        "UI & Design",
    ),
    (
        &[
            "data",
            "sqlite",
            "grdb",
            "realm",
            "codable",
            "cloud",
            "storage",
            "migration",
            "icloud",
        ],
        "Data & Persistence",
    ),
    (
        &["concurrency", "async", "synchroniz", "isolated"],
        "Concurrency & Async",
    ),
    (
        &["performance", "energy", "memory", "profil", "hang", "display"],
        "Performance",
    ),
    (&["network", "url"], "Networking"),
    (&["accessibility"], "Accessibility"),
    (&["test", "xctest", "xctrace", "axe"], "Testing"),
    (&["vision", "photo", "camera"], "Computer Vision"),
    (&["foundation-model", "intelligence"], "Apple Intelligence"),
    (&["metal", "graphics"], "Graphics & Metal"),
    (&["debug"], "Build & Environment"),
    (&["triage", "app-store-connect"], "Build & Environment"),
    (
        &[
            "intent",
            "shortcut",
            "widget",
            "extension",
            "haptic",
            "storekit",
            "iap",
            "now-playing",
            "localization",
            "spotlight",
            "privacy",
            "deep-link",
            "app-store",
            "background-process",
        ],
        "System Integration",
    ),
];

static ROUTER_REFERENCE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/skill\s+(axiom-[A-Za-z0-9_-]+)").expect("router reference pattern is valid")
});

/// Display label for an annotation slug.
///
/// ```
/// assert_eq!(skillsearch::category_label("ui"), Some("UI & Design"));
/// assert_eq!(skillsearch::category_label("UI & Design"), None);
/// ```
pub fn category_label(slug: &str) -> Option<&'static str> {
    CATEGORY_SLUGS
        .iter()
        .find(|(s, _)| *s == slug)
        .map(|(_, label)| *label)
}

/// Annotation slug for a display label.
pub fn category_slug(label: &str) -> Option<&'static str> {
    CATEGORY_SLUGS
        .iter()
        .find(|(_, l)| *l == label)
        .map(|(slug, _)| *slug)
}

/// Skill names referenced as `/skill axiom-...` in router content.
pub fn router_references(content: &str) -> Vec<&str> {
    ROUTER_REFERENCE
        .captures_iter(content)
        .filter_map(|c| c.get(1).map(|m| m.as_str()))
        .collect()
}

/// Category from the name alone. Always answers.
pub fn category_from_name(name: &str) -> &'static str {
    if name.starts_with(VENDOR_DIAGNOSTIC_PREFIX) {
        return "Build & Environment";
    }
    if name.starts_with(VENDOR_GUIDE_PREFIX) {
        return VENDOR_GUIDE_CATEGORIES
            .iter()
            .find(|(fragment, _)| name.contains(fragment))
            .map_or(GENERAL, |(_, label)| *label);
    }
    NAME_RULES
        .iter()
        .find(|(fragments, _)| fragments.iter().any(|f| name.contains(f)))
        .map_or(GENERAL, |(_, label)| *label)
}

// =============================================================================
// CLASSIFIER CHAIN
// =============================================================================

/// Precomputed state the classifiers share: which router claimed which skill.
#[derive(Debug, Default)]
pub struct Classifier<'a> {
    router_labels: HashMap<&'a str, &'static str>,
}

type Rule = for<'a> fn(&Classifier<'a>, &Skill) -> Option<&'static str>;

fn by_annotation(_: &Classifier<'_>, skill: &Skill) -> Option<&'static str> {
    skill.category.as_deref().and_then(category_label)
}

fn by_router_reference(ctx: &Classifier<'_>, skill: &Skill) -> Option<&'static str> {
    ctx.router_labels.get(skill.name.as_str()).copied()
}

fn by_name(_: &Classifier<'_>, skill: &Skill) -> Option<&'static str> {
    Some(category_from_name(&skill.name))
}

const RULES: [Rule; 3] = [by_annotation, by_router_reference, by_name];

impl<'a> Classifier<'a> {
    /// Scan the router skills in `skills` for references.
    pub fn new(skills: &'a SkillMap) -> Self {
        let mut router_labels = HashMap::new();
        for (router, label) in ROUTER_CATEGORIES {
            let Some(skill) = skills.get(router) else {
                continue;
            };
            for reference in router_references(&skill.content) {
                if let Some((name, _)) = skills.get_key_value(reference) {
                    router_labels.insert(name.as_str(), label);
                }
            }
        }
        Self { router_labels }
    }

    /// The skill's category label.
    pub fn classify(&self, skill: &Skill) -> &'static str {
        RULES
            .iter()
            .find_map(|rule| rule(self, skill))
            .unwrap_or(GENERAL)
    }
}

// =============================================================================
// CATALOG
// =============================================================================

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillSummary {
    pub name: String,
    pub description: String,
    pub skill_type: SkillType,
    pub source: SkillSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCategory {
    pub label: String,
    pub skills: Vec<SkillSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AgentSummary {
    pub name: String,
    pub description: String,
}

/// Skills grouped by category label, plus the agent list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Catalog {
    pub categories: BTreeMap<String, CatalogCategory>,
    pub agents: Vec<AgentSummary>,
    /// Skills listed in `categories`.
    pub total_skills: usize,
    /// All agents, whether listed or not.
    pub total_agents: usize,
}

/// Build the catalog, optionally restricted to one category label.
///
/// A filtered catalog has at most one category and never lists agents.
pub fn build_catalog(skills: &SkillMap, agents: &AgentMap, filter: Option<&str>) -> Catalog {
    let classifier = Classifier::new(skills);
    let mut categories: BTreeMap<String, CatalogCategory> = BTreeMap::new();
    let mut total_skills = 0;

    for skill in skills.values() {
        if !skill.skill_type.is_catalogable() {
            continue;
        }
        let label = classifier.classify(skill);
        if filter.is_some_and(|f| f != label) {
            continue;
        }

        categories
            .entry(label.to_string())
            .or_insert_with(|| CatalogCategory {
                label: label.to_string(),
                skills: Vec::new(),
            })
            .skills
            .push(SkillSummary {
                name: skill.name.clone(),
                description: skill.description.clone(),
                skill_type: skill.skill_type,
                source: skill.source,
            });
        total_skills += 1;
    }

    for category in categories.values_mut() {
        category.skills.sort_by(|a, b| a.name.cmp(&b.name));
    }

    let agent_list = if filter.is_some() {
        Vec::new()
    } else {
        let mut list: Vec<AgentSummary> = agents
            .values()
            .map(|a| AgentSummary {
                name: a.name.clone(),
                description: a.description.clone(),
            })
            .collect();
        list.sort_by(|a, b| a.name.cmp(&b.name));
        list
    };

    Catalog {
        categories,
        agents: agent_list,
        total_skills,
        total_agents: agents.len(),
    }
}
