use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Flattened validation output: external field path to message key.
///
/// Ordered map, so repeated runs over the same record serialize identically.
pub type FieldErrors = BTreeMap<String, String>;

/// Error kind for infrastructure failures.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InputErrorKind {
    NullRecord,
    UnsupportedKind,
    UnknownRule,
    UnknownModifier,
    InvalidParam,
    Encoding,
}

/// Produced when the input itself is unusable: a null record, a value of the
/// wrong kind, or a rule expression naming something unregistered.
///
/// Field validation failures are never an `InputError`; they land in
/// [`FieldErrors`]. An `InputError` aborts the whole call.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputError {
    pub kind: InputErrorKind,
    pub message: String,
}

impl InputError {
    /// The record serialized to null and cannot be walked.
    pub fn null_record(operation: &str) -> Self {
        InputError {
            kind: InputErrorKind::NullRecord,
            message: format!("{}: record is null", operation),
        }
    }

    /// The value's serialized form is not an object.
    pub fn unsupported_kind(operation: &str, value: &Value) -> Self {
        InputError {
            kind: InputErrorKind::UnsupportedKind,
            message: format!("{}: expected an object, got {}", operation, kind_name(value)),
        }
    }

    /// A rule expression named a rule with no registration.
    pub fn unknown_rule(name: &str) -> Self {
        InputError {
            kind: InputErrorKind::UnknownRule,
            message: format!("unknown rule '{}'", name),
        }
    }

    /// A modifier expression named a directive with no registration.
    pub fn unknown_modifier(name: &str) -> Self {
        InputError {
            kind: InputErrorKind::UnknownModifier,
            message: format!("unknown modifier '{}'", name),
        }
    }

    /// A rule parameter did not parse, e.g. `gt=abc`.
    pub fn invalid_param(rule: &str, param: &str) -> Self {
        InputError {
            kind: InputErrorKind::InvalidParam,
            message: format!("rule '{}' has invalid parameter '{}'", rule, param),
        }
    }

    /// A serde round trip failed.
    pub fn encoding(err: serde_json::Error) -> Self {
        InputError {
            kind: InputErrorKind::Encoding,
            message: err.to_string(),
        }
    }
}

impl fmt::Display for InputError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for InputError {}

fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
