//! Message-table parsing.
//!
//! A field's message table is a raw comma-separated string of
//! `rule:message.key` entries. Parsing is tolerant: an entry without
//! exactly one `:` is dropped while the rest still take effect, and a
//! duplicated rule id keeps its last entry.

use std::collections::HashMap;

/// Parses a raw message table into a rule-id-to-message-key map.
///
/// An empty or fully malformed table yields an empty map; callers fall
/// back to the raw rule id for anything not found here.
pub fn parse_messages(raw: &str) -> HashMap<String, String> {
    let mut table = HashMap::new();
    if raw.is_empty() {
        return table;
    }
    for entry in raw.split(',') {
        let parts: Vec<&str> = entry.split(':').collect();
        if parts.len() != 2 {
            continue;
        }
        table.insert(parts[0].to_string(), parts[1].to_string());
    }
    table
}
