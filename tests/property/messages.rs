use fieldcheck::messages::parse_messages;
use proptest::prelude::*;
use std::collections::HashMap;

/// Strategy for one well-formed `rule:key` entry.
fn arb_entry() -> impl Strategy<Value = (String, String)> {
    ("[a-z_]{1,10}", "[a-z.]{1,16}")
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn parse_never_panics(raw in "\\PC{0,80}") {
        let _ = parse_messages(&raw);
    }

    #[test]
    fn entry_count_bounded_by_commas(raw in "\\PC{0,80}") {
        let table = parse_messages(&raw);
        prop_assert!(table.len() <= raw.split(',').count());
    }

    #[test]
    fn well_formed_tables_parse_exactly(entries in prop::collection::vec(arb_entry(), 0..8)) {
        let raw = entries
            .iter()
            .map(|(rule, key)| format!("{}:{}", rule, key))
            .collect::<Vec<_>>()
            .join(",");

        let mut expected = HashMap::new();
        for (rule, key) in &entries {
            expected.insert(rule.clone(), key.clone());
        }

        prop_assert_eq!(parse_messages(&raw), expected);
    }

    #[test]
    fn tables_without_separators_parse_empty(raw in "[a-z,]{0,40}") {
        prop_assert!(parse_messages(&raw).is_empty());
    }

    #[test]
    fn double_separator_entries_are_dropped(
        a in "[a-z]{1,5}",
        b in "[a-z]{1,5}",
        c in "[a-z]{1,5}",
    ) {
        let raw = format!("{}:{}:{}", a, b, c);
        prop_assert!(parse_messages(&raw).is_empty());
    }
}
