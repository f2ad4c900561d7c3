//! Persistence properties over generated libraries.

use proptest::prelude::*;
use skillsearch::persist::{deserialize_index, deserialize_index_json, serialize_index};
use skillsearch::{build_index, search, SearchOptions, SkillMap};

use skillsearch::testing::{make_skill, skill_map};

const WORDS: &[&str] = &[
    "actor", "swift", "navigation", "stack", "layout", "memory", "network", "render", "profile",
    "cache", "widget", "gesture",
];

pub fn library() -> impl Strategy<Value = SkillMap> {
    prop::collection::vec(
        (
            prop::collection::vec(prop::sample::select(WORDS), 0..4),
            prop::collection::vec(prop::sample::select(WORDS), 0..20),
        ),
        1..8,
    )
    .prop_map(|docs| {
        skill_map(docs.into_iter().enumerate().map(|(i, (description, body))| {
            let body = format!("## {}\n{}", WORDS[i % WORDS.len()], body.join(" "));
            make_skill(&format!("doc-{i}"), &description.join(" "), &body)
        }))
    })
}

proptest! {
    #[test]
    fn round_trip_preserves_results(skills in library(), word in prop::sample::select(WORDS)) {
        let index = build_index(&skills);
        let json = serde_json::to_string(&serialize_index(&index)).unwrap();
        let restored = deserialize_index_json(&json).unwrap();

        prop_assert_eq!(restored.doc_count(), index.doc_count());
        prop_assert_eq!(restored.term_count(), index.term_count());
        prop_assert_eq!(restored.avg_doc_length(), index.avg_doc_length());
        prop_assert_eq!(
            search(&restored, word, &SearchOptions::default(), None),
            search(&index, word, &SearchOptions::default(), None)
        );
    }

    #[test]
    fn tampered_checksum_is_rejected(skills in library(), delta in 1u32..1000) {
        let mut data = serialize_index(&build_index(&skills));
        data.engine.checksum = data.engine.checksum.wrapping_add(delta);
        prop_assert!(deserialize_index(data).is_none());
    }

    #[test]
    fn tampered_document_length_is_rejected(skills in library(), delta in 1u32..50) {
        let mut data = serialize_index(&build_index(&skills));
        data.engine.docs[0].length += delta;
        prop_assert!(deserialize_index(data).is_none());
    }
}
