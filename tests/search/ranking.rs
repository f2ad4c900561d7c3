//! Ranking order: field weights, idf, term frequency, expansion weights, ties.

use skillsearch::{build_index, search, SearchOptions};

use skillsearch::testing::{make_skill, sample_library, skill_map};

use crate::common::names;

#[test]
fn name_match_outranks_body_match() {
    let skills = skill_map(vec![
        make_skill("widget-guide", "", ""),
        make_skill("other-doc", "", "widget"),
    ]);
    let index = build_index(&skills);

    let results = search(&index, "widget", &SearchOptions::default(), None);
    assert_eq!(names(&results), vec!["widget-guide", "other-doc"]);
}

#[test]
fn equal_scores_fall_back_to_index_order() {
    let skills = skill_map(vec![
        make_skill("zeta-doc", "", "actor"),
        make_skill("alpha-doc", "", "actor"),
    ]);
    let index = build_index(&skills);

    let results = search(&index, "actor", &SearchOptions::default(), None);
    assert_eq!(results[0].score, results[1].score);
    assert_eq!(names(&results), vec!["alpha-doc", "zeta-doc"]);
}

#[test]
fn shorter_prefix_extension_ranks_higher() {
    let skills = skill_map(vec![
        make_skill("one", "", "swiftui"),
        make_skill("two", "", "swiftdata"),
    ]);
    let index = build_index(&skills);

    let results = search(&index, "swift", &SearchOptions::default(), None);
    assert_eq!(names(&results), vec!["one", "two"]);
    assert!(results[0].score > results[1].score);
}

#[test]
fn repeated_term_ranks_higher_at_equal_length() {
    let skills = skill_map(vec![
        make_skill("once", "", "actor guide plain text"),
        make_skill("many", "", "actor actor actor guide"),
    ]);
    let index = build_index(&skills);

    let results = search(&index, "actor", &SearchOptions::default(), None);
    assert_eq!(names(&results), vec!["many", "once"]);
}

#[test]
fn rare_terms_weigh_more_than_common_ones() {
    let skills = skill_map(vec![
        make_skill("x-doc", "", "rare common"),
        make_skill("y-doc", "", "common filler"),
        make_skill("z-doc", "", "common filler"),
    ]);
    let index = build_index(&skills);

    let rare = search(&index, "rare", &SearchOptions::default(), None);
    let common = search(&index, "common", &SearchOptions::default(), None);
    let common_x = common.iter().find(|r| r.name == "x-doc").unwrap();

    assert_eq!(names(&rare), vec!["x-doc"]);
    assert_eq!(common.len(), 3);
    assert!(rare[0].score > common_x.score);
}

#[test]
fn every_score_is_positive() {
    let skills = sample_library();
    let index = build_index(&skills);
    for query in ["swift", "navigation", "breakpoints", "sendable actors"] {
        for result in search(&index, query, &SearchOptions::default(), Some(&skills)) {
            assert!(result.score > 0.0, "{query}: {}", result.name);
        }
    }
}

#[test]
fn rare_expansion_never_beats_common_exact_match() {
    let mut docs: Vec<_> = (0..30)
        .map(|i| make_skill(&format!("exact-{i:02}"), "", "actor kit"))
        .collect();
    docs.push(make_skill("plural-doc", "", "actors kit"));
    let index = build_index(&skill_map(docs));

    let options = SearchOptions {
        limit: 50,
        ..SearchOptions::default()
    };
    let results = search(&index, "actor", &options, None);
    assert_eq!(results.len(), 31);
    assert_eq!(results.last().unwrap().name, "plural-doc");

    let expansion_only = results.last().unwrap().score;
    for exact in &results[..30] {
        assert!(
            exact.score > expansion_only,
            "{}: {} <= {}",
            exact.name,
            exact.score,
            expansion_only
        );
    }
}
