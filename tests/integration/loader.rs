//! Reading plugin directories and vendor docs.

use skillsearch::loader::{load_plugin, VendorDocDirs};
use skillsearch::{build_catalog, SkillSource, SkillType};

use crate::common::{write_guides, write_plugin};

#[test]
fn plugin_layout_loads_every_collection() {
    let dir = tempfile::tempdir().unwrap();
    write_plugin(dir.path());

    let contents = load_plugin(dir.path(), &VendorDocDirs::default()).unwrap();

    assert_eq!(
        contents.skills.keys().collect::<Vec<_>>(),
        vec!["axiom-ios-ui", "axiom-lldb-ref", "axiom-swift-concurrency", "axiom-swiftui-nav"]
    );
    assert_eq!(contents.commands.keys().collect::<Vec<_>>(), vec!["audit-build"]);
    assert_eq!(contents.commands["audit-build"].description, "Audit the build settings");
    assert_eq!(contents.agents["build-fixer"].model.as_deref(), Some("haiku"));
    assert_eq!(contents.agents["build-fixer"].content.trim(), "You fix builds.");
}

#[test]
fn frontmatter_fields_and_inferred_types() {
    let dir = tempfile::tempdir().unwrap();
    write_plugin(dir.path());
    let skills = load_plugin(dir.path(), &VendorDocDirs::default()).unwrap().skills;

    let nav = &skills["axiom-swiftui-nav"];
    assert_eq!(nav.category.as_deref(), Some("ui"));
    assert_eq!(nav.tags, vec!["navigation", "swiftui"]);
    assert_eq!(nav.related, vec!["axiom-swift-concurrency"]);
    let headings: Vec<&str> = nav.sections.iter().map(|s| s.heading.as_str()).collect();
    assert_eq!(headings, vec!["SwiftUI Navigation", "NavigationStack", "Deep Links"]);

    assert_eq!(skills["axiom-ios-ui"].skill_type, SkillType::Router);
    assert_eq!(skills["axiom-lldb-ref"].skill_type, SkillType::Reference);
    assert_eq!(skills["axiom-swift-concurrency"].skill_type, SkillType::Discipline);
    assert!(skills.values().all(|s| s.source == SkillSource::Axiom));
}

#[test]
fn catalog_over_a_loaded_plugin() {
    let dir = tempfile::tempdir().unwrap();
    write_plugin(dir.path());
    let contents = load_plugin(dir.path(), &VendorDocDirs::default()).unwrap();

    let catalog = build_catalog(&contents.skills, &contents.agents, None);
    let ui: Vec<&str> = catalog.categories["UI & Design"]
        .skills
        .iter()
        .map(|s| s.name.as_str())
        .collect();

    // lldb has no annotation; the UI router claims it.
    assert_eq!(ui, vec!["axiom-lldb-ref", "axiom-swiftui-nav"]);
    assert_eq!(catalog.categories["Concurrency & Async"].skills.len(), 1);
    assert_eq!(catalog.total_skills, 3);
    assert_eq!(catalog.total_agents, 1);
}

#[test]
fn vendor_guides_load_as_apple_references() {
    let dir = tempfile::tempdir().unwrap();
    write_plugin(dir.path());
    write_guides(&dir.path().join("guides"));

    let vendor = VendorDocDirs {
        guides: Some(dir.path().join("guides")),
        diagnostics: None,
    };
    let contents = load_plugin(dir.path(), &vendor).unwrap();
    let guide = &contents.skills["apple-guide-swiftui-toolbar"];

    assert_eq!(guide.skill_type, SkillType::Reference);
    assert_eq!(guide.source, SkillSource::Apple);
    assert_eq!(guide.description, "Customize toolbars in SwiftUI apps.");
    assert_eq!(guide.tags, vec!["swiftui", "toolbar"]);

    let catalog = build_catalog(&contents.skills, &contents.agents, Some("UI & Design"));
    assert!(catalog.categories["UI & Design"]
        .skills
        .iter()
        .any(|s| s.name == "apple-guide-swiftui-toolbar"));
    assert!(catalog.agents.is_empty());
}

#[test]
fn plugin_skill_wins_over_vendor_doc_of_same_name() {
    let dir = tempfile::tempdir().unwrap();
    write_plugin(dir.path());
    crate::common::write(
        &dir.path().join("skills/shadow/SKILL.md"),
        "---\nname: apple-guide-swiftui-toolbar\ndescription: Plugin version\n---\nbody",
    );
    write_guides(&dir.path().join("guides"));

    let vendor = VendorDocDirs {
        guides: Some(dir.path().join("guides")),
        diagnostics: None,
    };
    let contents = load_plugin(dir.path(), &vendor).unwrap();
    let skill = &contents.skills["apple-guide-swiftui-toolbar"];
    assert_eq!(skill.description, "Plugin version");
    assert_eq!(skill.source, SkillSource::Axiom);
}

#[test]
fn broken_frontmatter_does_not_sink_the_plugin() {
    let dir = tempfile::tempdir().unwrap();
    write_plugin(dir.path());
    crate::common::write(
        &dir.path().join("skills/broken/SKILL.md"),
        "---\nname: [unclosed\n---\n## Still Here\nbody text",
    );

    let skills = load_plugin(dir.path(), &VendorDocDirs::default()).unwrap().skills;
    let broken = &skills["broken"];
    assert_eq!(broken.sections[0].heading, "Still Here");
}
