#![no_main]

use fieldcheck::messages::parse_messages;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let raw = String::from_utf8_lossy(data);
    let table = parse_messages(&raw);

    // An entry survives only by splitting into exactly two parts, so the
    // separator can appear in neither side.
    for (rule, key) in &table {
        assert!(!rule.contains(':'), "separator survived in rule id {:?}", rule);
        assert!(!key.contains(':'), "separator survived in message key {:?}", key);
    }
    assert!(table.len() <= raw.split(',').count());
});
