//! Built-in rule implementations.
//!
//! A rule is a pure function from a serialized value and a raw parameter
//! string to pass/fail. The engine clones this table at construction;
//! extra rules are registered per engine instance before first use.

use crate::error::InputError;
use regex::Regex;
use serde_json::Value;
use std::sync::LazyLock;

/// A named rule implementation.
///
/// `Err` is reserved for infrastructure problems such as a malformed
/// parameter; a failing rule is `Ok(false)`.
pub type RuleFn = fn(&Value, &str) -> Result<bool, InputError>;

// ─── Registry ────────────────────────────────────────────────────────────────

/// The builtin rule set, keyed by the name used in rule expressions.
pub static BUILTIN_RULES: &[(&str, RuleFn)] = &[
    ("required", required),
    ("email", email),
    ("oneof", one_of),
    ("eq", eq),
    ("ne", ne),
    ("gt", gt),
    ("gte", gte),
    ("lt", lt),
    ("lte", lte),
    ("min", min),
    ("max", max),
    ("len", len),
];

/// Finds a builtin rule by name.
pub fn lookup_rule(name: &str) -> Option<RuleFn> {
    BUILTIN_RULES
        .iter()
        .find(|(rule, _)| *rule == name)
        .map(|(_, f)| *f)
}

// ─── Value predicates ────────────────────────────────────────────────────────

/// Zero-value test backing `required` and the `omitempty` control token:
/// null, false, zero, and empty strings, sequences, and objects.
pub(crate) fn is_empty(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !*b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f == 0.0),
        Value::String(s) => s.is_empty(),
        Value::Array(a) => a.is_empty(),
        Value::Object(o) => o.is_empty(),
    }
}

/// The comparable magnitude of a value: numbers compare by value, strings
/// by character count, sequences and objects by length.
fn size_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => Some(s.chars().count() as f64),
        Value::Array(a) => Some(a.len() as f64),
        Value::Object(o) => Some(o.len() as f64),
        _ => None,
    }
}

fn numeric_param(rule: &str, param: &str) -> Result<f64, InputError> {
    param
        .trim()
        .parse::<f64>()
        .map_err(|_| InputError::invalid_param(rule, param))
}

// ─── Builtin rules ───────────────────────────────────────────────────────────

static EMAIL: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

static DATE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$").unwrap());

fn required(value: &Value, _param: &str) -> Result<bool, InputError> {
    Ok(!is_empty(value))
}

fn email(value: &Value, _param: &str) -> Result<bool, InputError> {
    match value {
        Value::String(s) => Ok(EMAIL.is_match(s)),
        _ => Ok(false),
    }
}

fn one_of(value: &Value, param: &str) -> Result<bool, InputError> {
    let allowed: Vec<&str> = param.split_whitespace().collect();
    Ok(match value {
        Value::String(s) => allowed.contains(&s.as_str()),
        Value::Number(n) => allowed.contains(&n.to_string().as_str()),
        _ => false,
    })
}

fn compare(rule: &str, value: &Value, param: &str) -> Result<bool, InputError> {
    match value {
        Value::String(s) => Ok(s == param),
        Value::Number(n) => {
            let bound = numeric_param(rule, param)?;
            Ok(n.as_f64() == Some(bound))
        }
        Value::Bool(b) => Ok(param == if *b { "true" } else { "false" }),
        _ => Ok(false),
    }
}

fn eq(value: &Value, param: &str) -> Result<bool, InputError> {
    compare("eq", value, param)
}

fn ne(value: &Value, param: &str) -> Result<bool, InputError> {
    compare("ne", value, param).map(|equal| !equal)
}

fn gt(value: &Value, param: &str) -> Result<bool, InputError> {
    let bound = numeric_param("gt", param)?;
    Ok(size_of(value).is_some_and(|size| size > bound))
}

fn gte(value: &Value, param: &str) -> Result<bool, InputError> {
    let bound = numeric_param("gte", param)?;
    Ok(size_of(value).is_some_and(|size| size >= bound))
}

fn lt(value: &Value, param: &str) -> Result<bool, InputError> {
    let bound = numeric_param("lt", param)?;
    Ok(size_of(value).is_some_and(|size| size < bound))
}

fn lte(value: &Value, param: &str) -> Result<bool, InputError> {
    let bound = numeric_param("lte", param)?;
    Ok(size_of(value).is_some_and(|size| size <= bound))
}

fn min(value: &Value, param: &str) -> Result<bool, InputError> {
    let bound = numeric_param("min", param)?;
    Ok(size_of(value).is_some_and(|size| size >= bound))
}

fn max(value: &Value, param: &str) -> Result<bool, InputError> {
    let bound = numeric_param("max", param)?;
    Ok(size_of(value).is_some_and(|size| size <= bound))
}

fn len(value: &Value, param: &str) -> Result<bool, InputError> {
    let bound = numeric_param("len", param)?;
    Ok(size_of(value).is_some_and(|size| size == bound))
}

/// Loose `YYYY-MM-DD` check. Empty strings pass so optional date fields
/// stay composable with `required`. Not in [`BUILTIN_RULES`]; registered
/// by [`Validator::new`](crate::Validator::new) as a named custom rule.
pub fn date_string(value: &Value, _param: &str) -> Result<bool, InputError> {
    match value {
        Value::String(s) => Ok(s.is_empty() || DATE.is_match(s)),
        _ => Ok(false),
    }
}
