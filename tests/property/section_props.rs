//! Section parsing and filtering properties.

use proptest::prelude::*;
use skillsearch::{filter_sections, parse_sections};

use skillsearch::testing::make_skill;

fn markdown() -> impl Strategy<Value = String> {
    let line = prop_oneof![
        "[a-z ]{0,20}",
        "[a-z]{1,8}".prop_map(|h| format!("# {h}")),
        "[a-z]{1,8}".prop_map(|h| format!("## {h}")),
        "[a-z]{1,8}".prop_map(|h| format!("### {h}")),
    ];
    prop::collection::vec(line, 0..30).prop_map(|lines| lines.join("\n"))
}

proptest! {
    #[test]
    fn sections_tile_the_document(content in markdown()) {
        let line_count = content.split('\n').count();
        let sections = parse_sections(&content);

        prop_assert!(!sections.is_empty());
        prop_assert_eq!(sections[0].start_line, 0);
        prop_assert_eq!(sections[sections.len() - 1].end_line, line_count - 1);
        for pair in sections.windows(2) {
            prop_assert_eq!(pair[1].start_line, pair[0].end_line + 1);
        }
        for section in &sections {
            prop_assert!(section.level <= 2);
        }
    }

    #[test]
    fn char_counts_add_up(content in markdown()) {
        let sections = parse_sections(&content);
        let total: usize = sections.iter().map(|s| s.char_count).sum();
        // Each boundary between sections drops exactly one newline.
        prop_assert_eq!(total + sections.len() - 1, content.chars().count());
    }

    #[test]
    fn filtered_content_comes_from_the_skill(content in markdown(), needle in "[a-z]{1,3}") {
        let skill = make_skill("prop", "", &content);
        let filtered = filter_sections(&skill, Some(&[needle.clone()]));

        for section in filtered.sections.iter() {
            prop_assert!(section.heading.to_lowercase().contains(&needle));
        }
        for part in filtered.content.split("\n\n").filter(|p| !p.is_empty()) {
            prop_assert!(skill.content.contains(part));
        }
    }
}
