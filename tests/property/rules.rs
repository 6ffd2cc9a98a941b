use fieldcheck::engine::{Backend, RuleEngine};
use fieldcheck::rules::lookup_rule;
use proptest::prelude::*;
use serde_json::{Value, json};

/// Strategy for arbitrary JSON values nested up to `depth` levels.
fn arb_json(depth: u32) -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(|i| json!(i)),
        "[a-z]{0,8}".prop_map(Value::String),
    ];

    leaf.prop_recursive(depth, 64, 8, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::Array),
            prop::collection::vec(("[a-z][a-z0-9]{0,5}", inner), 0..5).prop_map(|pairs| {
                let map: serde_json::Map<String, Value> = pairs.into_iter().collect();
                Value::Object(map)
            }),
        ]
    })
}

/// Mirror of the zero-value test behind `required` and `omitempty`:
/// null, false, zero, and empty strings, sequences, and objects.
fn is_zero(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !*b,
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn required_fails_exactly_on_zero_values(value in arb_json(3)) {
        let required = lookup_rule("required").expect("builtin");
        prop_assert_eq!(required(&value, ""), Ok(!is_zero(&value)));
    }

    #[test]
    fn omitempty_suppresses_any_failure_on_zero_values(value in arb_json(2)) {
        let engine = RuleEngine::new();
        let bare = engine.check_value(&value, "required").expect("builtin");
        let guarded = engine.check_value(&value, "omitempty,required").expect("builtin");
        prop_assert!(guarded.is_empty());
        prop_assert_eq!(bare.is_empty(), !is_zero(&value));
    }

    #[test]
    fn oneof_agrees_with_membership(
        options in prop::collection::vec("[a-z]{1,6}", 1..6),
        pick in "[a-z]{1,6}",
    ) {
        let one_of = lookup_rule("oneof").expect("builtin");
        let param = options.join(" ");
        prop_assert_eq!(one_of(&json!(pick.clone()), &param), Ok(options.contains(&pick)));
    }

    #[test]
    fn oneof_matches_numbers_by_rendering(n in any::<i64>(), m in any::<i64>(), k in any::<i64>()) {
        let one_of = lookup_rule("oneof").expect("builtin");
        let param = format!("{} {}", n, m);
        prop_assert_eq!(one_of(&json!(k), &param), Ok(k == n || k == m));
    }

    #[test]
    fn gt_agrees_with_numeric_order(value in any::<i64>(), bound in any::<i64>()) {
        let gt = lookup_rule("gt").expect("builtin");
        let passed = gt(&json!(value), &bound.to_string()).expect("integer bound parses");
        prop_assert_eq!(passed, (value as f64) > (bound as f64));
    }

    #[test]
    fn order_rules_partition_numbers(value in any::<i64>(), bound in any::<i64>()) {
        let number = json!(value);
        let param = bound.to_string();
        let eval = |name: &str| {
            lookup_rule(name).expect("builtin")(&number, &param).expect("integer bound parses")
        };
        prop_assert_ne!(eval("gt"), eval("lte"));
        prop_assert_ne!(eval("lt"), eval("gte"));
    }

    #[test]
    fn len_counts_characters_not_bytes(s in "\\PC{0,40}") {
        let len = lookup_rule("len").expect("builtin");
        let chars = s.chars().count();
        let value = json!(s);
        prop_assert_eq!(len(&value, &chars.to_string()), Ok(true));
        prop_assert_eq!(len(&value, &(chars + 1).to_string()), Ok(false));
    }

    #[test]
    fn min_and_max_bound_sequence_length(elements in prop::collection::vec(arb_json(1), 0..8)) {
        let n = elements.len();
        let value = Value::Array(elements);
        let min = lookup_rule("min").expect("builtin");
        let max = lookup_rule("max").expect("builtin");
        prop_assert_eq!(min(&value, &n.to_string()), Ok(true));
        prop_assert_eq!(max(&value, &n.to_string()), Ok(true));
        prop_assert_eq!(min(&value, &(n + 1).to_string()), Ok(false));
        if n > 0 {
            prop_assert_eq!(max(&value, &(n - 1).to_string()), Ok(false));
        }
    }

    #[test]
    fn dive_reports_one_failure_per_zero_element(zeros in prop::collection::vec(any::<bool>(), 0..8)) {
        let engine = RuleEngine::new();
        let elements: Vec<Value> = zeros
            .iter()
            .map(|zero| if *zero { json!("") } else { json!("x") })
            .collect();
        let failed = engine
            .check_value(&Value::Array(elements), "dive,required")
            .expect("builtin");
        prop_assert_eq!(failed.len(), zeros.iter().filter(|zero| **zero).count());
        prop_assert!(failed.iter().all(|rule| rule == "required"));
    }

    #[test]
    fn evaluation_never_panics(value in arb_json(2), expr in "\\PC{0,40}") {
        let engine = RuleEngine::new();
        let _ = engine.check_value(&value, &expr);
    }

    #[test]
    fn evaluation_is_deterministic(value in arb_json(2), expr in "\\PC{0,30}") {
        let engine = RuleEngine::new();
        prop_assert_eq!(engine.check_value(&value, &expr), engine.check_value(&value, &expr));
    }
}
