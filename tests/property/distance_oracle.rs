//! Bounded edit distance against strsim's unbounded Levenshtein.

use proptest::prelude::*;
use skillsearch::fuzzy::{bounded_distance, levenshtein_within, max_edits};

proptest! {
    #![proptest_config(ProptestConfig::with_cases(512))]

    #[test]
    fn bounded_agrees_with_oracle(a in "[a-d]{0,9}", b in "[a-d]{0,9}", max in 0usize..5) {
        let d = strsim::levenshtein(&a, &b);
        let expected = (d <= max).then_some(d);
        prop_assert_eq!(bounded_distance(&a, &b, max), expected);
        prop_assert_eq!(levenshtein_within(&a, &b, max), d <= max);
    }

    #[test]
    fn unicode_counts_chars_not_bytes(a in "[αβγ]{0,6}", b in "[αβγ]{0,6}") {
        let d = strsim::levenshtein(&a, &b);
        prop_assert_eq!(bounded_distance(&a, &b, 6), Some(d));
    }

    #[test]
    fn budget_grows_with_length(len in 0usize..40) {
        prop_assert!(max_edits(len) <= max_edits(len + 1));
        prop_assert!(max_edits(len) <= len / 5);
    }
}
