//! Shared test utilities and fixtures.

#![allow(dead_code)]

use std::fs;
use std::path::Path;
use std::sync::Arc;

use skillsearch::loader::{LibraryState, PluginContents, SkillLibrary};
use skillsearch::SearchResult;

use skillsearch::testing::{agent_map, make_agent, sample_library};

// ============================================================================
// PLUGIN FIXTURE
// ============================================================================

pub const NAV_SKILL: &str = "\
---
name: axiom-swiftui-nav
description: SwiftUI navigation with NavigationStack and deep links
mcp:
  category: ui
  tags: [navigation, swiftui]
  related: [axiom-swift-concurrency]
---
# SwiftUI Navigation

Navigation patterns for iOS apps.

## NavigationStack
Use NavigationStack for push navigation.

## Deep Links
Handle URLs with onOpenURL.
";

pub const CONCURRENCY_SKILL: &str = "\
---
name: axiom-swift-concurrency
description: Swift 6 concurrency with actors and Sendable
---
## Actors
Actor isolation protects mutable state.

## Sendable
Mark value types Sendable.
";

pub const LLDB_SKILL: &str = "\
---
name: axiom-lldb-ref
description: LLDB command reference
---
## Breakpoints
Set breakpoints before stepping.

## Expressions
Evaluate expressions with po.
";

pub const ROUTER_SKILL: &str = "\
---
name: axiom-ios-ui
description: Routes UI questions
---
Use /skill axiom-swiftui-nav for navigation.
Use /skill axiom-lldb-ref when debugging views.
";

pub const AUDIT_COMMAND: &str = "\
---
description: Audit the build settings
---
Run the build audit.
";

pub const BUILD_FIXER_AGENT: &str = "\
---
name: build-fixer
description: Fixes broken builds
model: haiku
---
You fix builds.
";

pub const TOOLBAR_GUIDE: &str = "\
# Toolbar features

Customize toolbars in SwiftUI apps.

## Placement
Use ToolbarItem placement to position items.
";

pub const ANNOTATIONS: &str = r#"{
  "axiom-swift-concurrency": { "category": "concurrency", "tags": ["actors", "isolation"] },
  "axiom-not-a-skill": { "category": "ui" }
}"#;

pub fn write(path: &Path, text: &str) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, text).unwrap();
}

/// Lay out a small plugin under `root`:
///
/// ```text
/// skills/{nav,concurrency,lldb,ios-ui}/SKILL.md
/// skills/drafts/            (no SKILL.md)
/// commands/audit-build.md
/// agents/build-fixer.md
/// ```
pub fn write_plugin(root: &Path) {
    write(&root.join("skills/nav/SKILL.md"), NAV_SKILL);
    write(&root.join("skills/concurrency/SKILL.md"), CONCURRENCY_SKILL);
    write(&root.join("skills/lldb/SKILL.md"), LLDB_SKILL);
    write(&root.join("skills/ios-ui/SKILL.md"), ROUTER_SKILL);
    fs::create_dir_all(root.join("skills/drafts")).unwrap();
    write(&root.join("commands/audit-build.md"), AUDIT_COMMAND);
    write(&root.join("agents/build-fixer.md"), BUILD_FIXER_AGENT);
}

/// A vendor guides directory with one guide.
pub fn write_guides(dir: &Path) {
    write(&dir.join("SwiftUI-Toolbar.md"), TOOLBAR_GUIDE);
}

// ============================================================================
// LIBRARY STATES
// ============================================================================

/// The sample library plus one agent, as a snapshot.
pub fn sample_state() -> Arc<LibraryState> {
    let mut agent = make_agent("build-fixer", "Fixes broken builds");
    agent.model = Some("haiku".into());
    agent.content = "You fix builds.".into();
    SkillLibrary::from_contents(PluginContents {
        skills: sample_library(),
        agents: agent_map(vec![agent]),
        ..PluginContents::default()
    })
    .snapshot()
}

pub fn names(results: &[SearchResult]) -> Vec<&str> {
    results.iter().map(|r| r.name.as_str()).collect()
}
