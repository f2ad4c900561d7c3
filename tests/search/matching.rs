//! Which documents a query reaches: camelCase, typos, prefixes, case, junk.

use skillsearch::{build_index, search, SearchOptions};

use skillsearch::testing::{make_skill, sample_library, skill_map};

use crate::common::names;

#[test]
fn camel_case_query_matches_split_terms() {
    let index = build_index(&sample_library());
    let results = search(&index, "NavigationStack", &SearchOptions::default(), None);
    assert_eq!(names(&results), vec!["swiftui-nav"]);
}

#[test]
fn two_edit_typo_in_long_term() {
    let index = build_index(&sample_library());
    let results = search(&index, "concurency", &SearchOptions::default(), None);
    assert_eq!(names(&results), vec!["swift-concurrency"]);
}

#[test]
fn duplicate_query_terms_count_once() {
    let index = build_index(&sample_library());
    let once = search(&index, "actor", &SearchOptions::default(), None);
    let twice = search(&index, "actor actor", &SearchOptions::default(), None);
    assert_eq!(once, twice);
}

#[test]
fn query_case_does_not_matter() {
    let index = build_index(&sample_library());
    let lower = search(&index, "swiftui", &SearchOptions::default(), None);
    let upper = search(&index, "SWIFTUI", &SearchOptions::default(), None);
    assert!(!lower.is_empty());
    assert_eq!(lower, upper);
}

#[test]
fn non_ascii_queries_are_harmless() {
    let index = build_index(&sample_library());
    assert!(search(&index, "日本語 🚀", &SearchOptions::default(), None).is_empty());
    assert!(search(&index, "\0\0\0", &SearchOptions::default(), None).is_empty());
}

#[test]
fn matching_sections_name_the_sections_with_the_term() {
    let index = build_index(&sample_library());
    let results = search(&index, "breakpoints", &SearchOptions::default(), None);
    assert_eq!(names(&results), vec!["axiom-lldb-ref"]);
    assert_eq!(results[0].matching_sections, vec!["Breakpoints"]);
}

#[test]
fn prefix_only_hits_report_no_sections() {
    let index = build_index(&sample_library());
    let results = search(&index, "navig", &SearchOptions::default(), None);
    assert_eq!(results[0].name, "swiftui-nav");
    assert!(results[0].matching_sections.is_empty());
}

#[test]
fn one_unmatched_term_empties_the_result() {
    let index = build_index(&sample_library());
    assert!(search(&index, "swift zzzzqqq", &SearchOptions::default(), None).is_empty());
}

#[test]
fn two_skill_walkthrough() {
    let skills = skill_map(vec![
        make_skill(
            "axiom-swift-concurrency",
            "Swift concurrency patterns and async await",
            "",
        ),
        make_skill("axiom-swiftui-nav", "SwiftUI navigation patterns", ""),
    ]);
    let index = build_index(&skills);
    assert_eq!(index.doc_count(), 2);

    let both = search(&index, "swift concurrency", &SearchOptions::default(), None);
    assert_eq!(both[0].name, "axiom-swift-concurrency");

    let swift = search(&index, "swift", &SearchOptions::default(), None);
    let mut found = names(&swift);
    found.sort_unstable();
    assert_eq!(found, vec!["axiom-swift-concurrency", "axiom-swiftui-nav"]);

    assert!(search(&index, "nonexistentterm", &SearchOptions::default(), None).is_empty());
}
