//! Tool handlers against a plugin loaded from disk.

use std::sync::Arc;

use serde_json::json;
use skillsearch::loader::{LibraryState, LibrarySource, SkillLibrary, VendorDocDirs};
use skillsearch::tools::{call_tool, Tool};

use crate::common::write_plugin;

fn plugin_state() -> (tempfile::TempDir, Arc<LibraryState>) {
    let dir = tempfile::tempdir().unwrap();
    write_plugin(dir.path());
    let library = SkillLibrary::open(LibrarySource::Plugin {
        root: dir.path().to_path_buf(),
        vendor_docs: VendorDocDirs::default(),
    })
    .unwrap();
    (dir, library.snapshot())
}

#[test]
fn every_tool_is_callable_by_name() {
    let (_dir, state) = plugin_state();
    let args = [
        json!({}),
        json!({ "query": "navigation" }),
        json!({ "skills": [{ "name": "axiom-swiftui-nav" }] }),
        json!({ "agent": "build-fixer" }),
    ];
    for (tool, args) in Tool::ALL.iter().zip(args) {
        let text = call_tool(&state, tool.as_str(), &args).unwrap();
        assert!(!text.is_empty(), "{}", tool.as_str());
    }
}

#[test]
fn read_skill_filters_sections_and_lists_related() {
    let (_dir, state) = plugin_state();
    let args = json!({ "skills": [{ "name": "axiom-swiftui-nav", "sections": ["deep"] }] });
    let text = call_tool(&state, "read_skill", &args).unwrap();

    assert!(text.starts_with("## axiom-swiftui-nav (filtered: Deep Links)\n"));
    assert!(text.contains("Handle URLs with onOpenURL."));
    assert!(!text.contains("push navigation"));
    assert!(text.contains("**Related Skills**: axiom-swift-concurrency"));
}

#[test]
fn read_skill_lists_sections() {
    let (_dir, state) = plugin_state();
    let args = json!({ "skills": [{ "name": "axiom-swift-concurrency" }], "listSections": true });
    let text = call_tool(&state, "read_skill", &args).unwrap();

    assert!(text.starts_with("## axiom-swift-concurrency (sections)\n"));
    assert!(text.contains("| Actors |"));
    assert!(text.contains("| Sendable |"));
}

#[test]
fn read_skill_mixes_found_and_missing() {
    let (_dir, state) = plugin_state();
    let args = json!({ "skills": [{ "name": "nope" }, { "name": "axiom-lldb-ref" }] });
    let text = call_tool(&state, "read_skill", &args).unwrap();

    assert!(text.starts_with("## nope\nSkill not found.\n"));
    assert!(text.contains("## axiom-lldb-ref\n"));
}

#[test]
fn read_skill_caps_the_batch() {
    let (_dir, state) = plugin_state();
    let skills: Vec<_> = (0..11).map(|i| json!({ "name": format!("s{i}") })).collect();
    let text = call_tool(&state, "read_skill", &json!({ "skills": skills })).unwrap();
    assert_eq!(text, "Too many skills requested (11). Maximum is 10 per call.");
}

#[test]
fn search_argument_validation() {
    let (_dir, state) = plugin_state();
    for args in [
        json!({}),
        json!({ "query": "   " }),
        json!({ "query": "swift", "skillType": "bogus" }),
        json!({ "query": "swift", "source": "elsewhere" }),
        json!({ "query": 42 }),
    ] {
        let err = call_tool(&state, "search_skills", &args).unwrap_err();
        assert!(err.is_invalid_argument(), "{args}");
    }
}

#[test]
fn search_limit_is_clamped() {
    let (_dir, state) = plugin_state();
    let text = call_tool(&state, "search_skills", &json!({ "query": "swift", "limit": 0 })).unwrap();
    assert!(text.contains("\n1 results\n"));

    let text = call_tool(&state, "search_skills", &json!({ "query": "swift", "limit": 500 })).unwrap();
    assert!(text.contains("### axiom-swiftui-nav"));
    assert!(text.contains("### axiom-swift-concurrency"));
}

#[test]
fn catalog_by_slug_hides_agents() {
    let (_dir, state) = plugin_state();
    let text = call_tool(&state, "get_catalog", &json!({ "category": "ui" })).unwrap();

    assert!(text.contains("## UI & Design (2)\n"));
    assert!(!text.contains("Concurrency"));
    assert!(!text.contains("## Agents"));
}

#[test]
fn agents_by_name() {
    let (_dir, state) = plugin_state();
    let text = call_tool(&state, "get_agent", &json!({ "agent": "build-fixer" })).unwrap();
    assert!(text.starts_with("# Agent: build-fixer\nFixes broken builds\nModel: haiku\n"));
    assert!(text.contains("You fix builds."));

    let text = call_tool(&state, "get_agent", &json!({ "agent": "ghost" })).unwrap();
    assert_eq!(
        text,
        "Agent not found: \"ghost\". Use get_catalog to see available agents."
    );
}
