//! Type, source, and category filters, and their interaction with the limit.

use skillsearch::{build_index, search, SearchOptions, SkillSource, SkillType};

use skillsearch::testing::sample_library;

use crate::common::names;

fn with_category(category: &str) -> SearchOptions {
    SearchOptions {
        category: Some(category.to_string()),
        ..SearchOptions::default()
    }
}

#[test]
fn source_filter() {
    let index = build_index(&sample_library());
    let apple = SearchOptions {
        source: Some(SkillSource::Apple),
        ..SearchOptions::default()
    };
    let axiom = SearchOptions {
        source: Some(SkillSource::Axiom),
        ..SearchOptions::default()
    };

    assert_eq!(names(&search(&index, "set", &apple, None)), vec!["axiom-lldb-ref"]);
    assert!(search(&index, "set", &axiom, None).is_empty());
}

#[test]
fn type_filter_excludes_other_types() {
    let index = build_index(&sample_library());
    let options = SearchOptions {
        skill_type: Some(SkillType::Discipline),
        ..SearchOptions::default()
    };
    let results = search(&index, "breakpoints", &options, None);
    assert!(results.is_empty());
}

#[test]
fn category_by_slug_and_by_label() {
    let index = build_index(&sample_library());
    assert_eq!(
        names(&search(&index, "swift", &with_category("concurrency"), None)),
        vec!["swift-concurrency"]
    );
    assert_eq!(
        names(&search(&index, "swift", &with_category("Concurrency & Async"), None)),
        vec!["swift-concurrency"]
    );
    assert!(search(&index, "swift", &with_category("games"), None).is_empty());
}

#[test]
fn limit_caps_results() {
    let index = build_index(&sample_library());
    let all = search(&index, "swift", &SearchOptions::default(), None);
    let one = search(&index, "swift", &SearchOptions::with_limit(1), None);
    assert!(all.len() >= 2);
    assert_eq!(one.len(), 1);
    assert_eq!(one[0], all[0]);
}

#[test]
fn category_filter_runs_before_limit() {
    let index = build_index(&sample_library());
    let options = SearchOptions {
        limit: 1,
        ..with_category("concurrency")
    };
    assert_eq!(names(&search(&index, "swift", &options, None)), vec!["swift-concurrency"]);
}
