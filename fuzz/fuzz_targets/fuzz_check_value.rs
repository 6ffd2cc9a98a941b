#![no_main]

use fieldcheck::engine::{Backend, RuleEngine};
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    if data.is_empty() {
        return;
    }

    // Use the first byte to determine the split point between the rule
    // expression and the JSON value.
    let split = data[0] as usize % data.len();
    let (expr_bytes, value_bytes) = data.split_at(split);
    let expr = String::from_utf8_lossy(expr_bytes);

    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(value_bytes) {
        let engine = RuleEngine::new();
        let _ = engine.check_value(&value, &expr);
    }
});
