use fieldcheck::path::{flatten, resolve, rewrite_index, strip_index};
use fieldcheck::shape::{Field, Kind, Shape};
use proptest::prelude::*;
use std::sync::LazyLock;

static LEAF: LazyLock<Shape> = LazyLock::new(|| {
    Shape::new("Leaf").field(
        Field::new("name", Kind::Scalar)
            .external("display_name")
            .rules("required"),
    )
});

fn leaf_shape() -> &'static Shape {
    &LEAF
}

/// One shape exercising every flattening behavior: a transparent member,
/// a suppressed member, a plain nested record, a list, and a scalar.
static TREE: LazyLock<Shape> = LazyLock::new(|| {
    Shape::new("Tree")
        .field(Field::new("core", Kind::Struct(leaf_shape)).transparent())
        .field(Field::new("veiled", Kind::Struct(leaf_shape)).suppressed())
        .field(Field::new("child", Kind::Struct(leaf_shape)))
        .field(Field::new("rows", Kind::List(Box::new(Kind::Struct(leaf_shape)))))
        .field(Field::new("title", Kind::Scalar))
});

fn tree_shape() -> &'static Shape {
    &TREE
}

fn segs(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

/// Strategy for (struct_path, name_path, expected key) triples over the
/// tree fixture, covering transparent drops, suppression, and indexing.
fn arb_tree_path() -> impl Strategy<Value = (Vec<String>, Vec<String>, Option<String>)> {
    prop_oneof![
        Just((segs(&["title"]), segs(&["title"]), Some("title".to_string()))),
        Just((
            segs(&["core", "name"]),
            segs(&["core", "display_name"]),
            Some("display_name".to_string()),
        )),
        Just((
            segs(&["child", "name"]),
            segs(&["child", "display_name"]),
            Some("child.display_name".to_string()),
        )),
        Just((segs(&["veiled"]), segs(&["veiled"]), None)),
        Just((
            segs(&["veiled", "name"]),
            segs(&["veiled", "display_name"]),
            Some("display_name".to_string()),
        )),
        Just((segs(&["ghost"]), segs(&["ghost"]), None)),
        (0usize..64).prop_map(|i| {
            (
                vec![format!("rows[{i}]"), "name".to_string()],
                vec![format!("rows[{i}]"), "display_name".to_string()],
                Some(format!("rows.{i}.display_name")),
            )
        }),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn index_suffix_strips_and_rewrites(base in "[a-z_]{1,12}", n in 0u32..10_000) {
        let segment = format!("{base}[{n}]");
        prop_assert_eq!(strip_index(&segment), base.as_str());
        prop_assert_eq!(rewrite_index(&segment), format!("{base}.{n}"));
    }

    #[test]
    fn plain_segments_pass_through(segment in "[a-z_.]{0,20}") {
        prop_assert_eq!(strip_index(&segment), segment.as_str());
        prop_assert_eq!(rewrite_index(&segment), segment.as_str());
    }

    #[test]
    fn interior_brackets_are_not_suffixes(
        base in "[a-z]{1,6}",
        n in 0u32..100,
        tail in "[a-z]{1,4}",
    ) {
        let segment = format!("{base}[{n}]{tail}");
        prop_assert_eq!(strip_index(&segment), segment.as_str());
        prop_assert_eq!(rewrite_index(&segment), segment.as_str());
    }

    #[test]
    fn stripped_segment_prefixes_rewritten(segment in "\\PC{0,20}") {
        let stripped = strip_index(&segment);
        let rewritten = rewrite_index(&segment);
        prop_assert!(rewritten.starts_with(stripped.as_ref()));
    }

    #[test]
    fn resolve_never_panics(path in prop::collection::vec("\\PC{0,12}", 0..6)) {
        let _ = resolve(tree_shape(), &path);
    }

    #[test]
    fn resolve_ignores_which_index(i in 0usize..100, j in 0usize..100) {
        let a = resolve(tree_shape(), &[format!("rows[{i}]"), "name".to_string()])
            .map(Field::declared);
        let b = resolve(tree_shape(), &[format!("rows[{j}]"), "name".to_string()])
            .map(Field::declared);
        prop_assert_eq!(a, Some("name"));
        prop_assert_eq!(a, b);
    }

    #[test]
    fn flatten_never_panics(
        struct_path in prop::collection::vec("\\PC{0,12}", 0..6),
        name_path in prop::collection::vec("\\PC{0,12}", 0..6),
    ) {
        let _ = flatten(tree_shape(), &struct_path, &name_path);
    }

    #[test]
    fn known_paths_flatten_to_expected((struct_path, name_path, expected) in arb_tree_path()) {
        prop_assert_eq!(flatten(tree_shape(), &struct_path, &name_path), expected);
    }

    #[test]
    fn flatten_is_deterministic((struct_path, name_path, _) in arb_tree_path()) {
        let first = flatten(tree_shape(), &struct_path, &name_path);
        let second = flatten(tree_shape(), &struct_path, &name_path);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn flattened_keys_contain_no_brackets((struct_path, name_path, _) in arb_tree_path()) {
        if let Some(key) = flatten(tree_shape(), &struct_path, &name_path) {
            prop_assert!(!key.contains('['), "bracket survived in {:?}", key);
            prop_assert!(!key.contains(']'), "bracket survived in {:?}", key);
        }
    }

    #[test]
    fn short_name_path_omits_the_entry((struct_path, name_path, _) in arb_tree_path()) {
        let truncated = &name_path[..name_path.len() - 1];
        prop_assert_eq!(flatten(tree_shape(), &struct_path, truncated), None);
    }
}
