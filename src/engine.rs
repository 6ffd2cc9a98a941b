//! Rule evaluation.
//!
//! The [`Backend`] trait is the seam between rule evaluation and error
//! mapping: anything that can turn a serialized record into
//! [`Violation`]s can drive the validator. The shipped [`RuleEngine`]
//! walks a record's shape alongside its serialized value, evaluates each
//! field's rule expression, and reports every failure with parallel
//! declared-name and external-name paths.
//!
//! Rule expressions are comma-separated tokens. Three tokens are control
//! flow rather than rules: `omitempty` and `omitnil` stop evaluation when
//! the value is absent, and `dive` applies the remaining tokens to each
//! element of a sequence. Evaluation short-circuits at the first failing
//! rule per value.

use crate::error::InputError;
use crate::rules::{self, BUILTIN_RULES};
use crate::shape::{Field, Kind, Shape};
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

static NULL: Value = Value::Null;

// ─── Backend ─────────────────────────────────────────────────────────────────

/// One rule failure reported by a backend.
///
/// Both paths run from the record root, one segment per field hop, with
/// no segment for the record itself. `struct_path` uses declared names
/// and `name_path` external names; both keep literal index suffixes such
/// as `items[2]`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Violation {
    pub rule: String,
    pub struct_path: Vec<String>,
    pub name_path: Vec<String>,
}

/// A rule evaluation backend.
pub trait Backend {
    /// Evaluates every annotated field of `object` against `shape`.
    fn check_record(
        &self,
        shape: &Shape,
        object: &Map<String, Value>,
    ) -> Result<Vec<Violation>, InputError>;

    /// Evaluates one rule expression against a bare value, returning
    /// failed rule ids in evaluation order.
    fn check_value(&self, value: &Value, rules: &str) -> Result<Vec<String>, InputError>;
}

// ─── Naming policy ───────────────────────────────────────────────────────────

/// Derives a field's external lookup name.
///
/// The policy decides both which serialized key holds the field's value
/// and which segment the field contributes to `name_path`.
pub type NamingPolicy = fn(&Field) -> String;

/// Default policy: the explicit external name when annotated, otherwise
/// the declared name.
pub fn external_or_declared(field: &Field) -> String {
    field.external_or_declared().to_string()
}

// ─── Rule engine ─────────────────────────────────────────────────────────────

type Rule = Arc<dyn Fn(&Value, &str) -> Result<bool, InputError> + Send + Sync>;

/// One parsed token of a rule expression.
struct RuleToken<'a> {
    name: &'a str,
    param: &'a str,
}

fn parse_rule_expr(expr: &str) -> Vec<RuleToken<'_>> {
    expr.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| match token.split_once('=') {
            Some((name, param)) => RuleToken { name: name.trim(), param },
            None => RuleToken { name: token, param: "" },
        })
        .collect()
}

/// The built-in rule evaluation backend.
///
/// Construction seeds the builtin rule table; [`register`] adds or
/// replaces named rules. Registration is a construction-time concern:
/// once an engine is shared, it is immutable and safe across threads.
///
/// [`register`]: RuleEngine::register
#[derive(Clone)]
pub struct RuleEngine {
    rules: HashMap<String, Rule>,
    naming: NamingPolicy,
}

impl RuleEngine {
    pub fn new() -> Self {
        let mut table: HashMap<String, Rule> = HashMap::new();
        for (name, rule) in BUILTIN_RULES {
            table.insert((*name).to_string(), Arc::new(*rule) as Rule);
        }
        RuleEngine {
            rules: table,
            naming: external_or_declared,
        }
    }

    /// Registers a named rule, replacing any existing one of that name.
    pub fn register<F>(&mut self, name: &str, rule: F)
    where
        F: Fn(&Value, &str) -> Result<bool, InputError> + Send + Sync + 'static,
    {
        self.rules.insert(name.to_string(), Arc::new(rule));
    }

    /// Replaces the external-name derivation policy.
    pub fn with_naming(mut self, naming: NamingPolicy) -> Self {
        self.naming = naming;
        self
    }

    fn eval_rule(&self, name: &str, value: &Value, param: &str) -> Result<bool, InputError> {
        let rule = self
            .rules
            .get(name)
            .ok_or_else(|| InputError::unknown_rule(name))?;
        (rule.as_ref())(value, param)
    }

    /// Evaluates tokens against one value, reporting failed rule names
    /// through `report`. Stops at the first failure, at `omitempty` or
    /// `omitnil` on an absent value, and recurses per element at `dive`.
    fn eval_value(
        &self,
        tokens: &[RuleToken<'_>],
        value: &Value,
        report: &mut dyn FnMut(&str),
    ) -> Result<(), InputError> {
        for (i, token) in tokens.iter().enumerate() {
            match token.name {
                "omitnil" => {
                    if value.is_null() {
                        return Ok(());
                    }
                }
                "omitempty" => {
                    if rules::is_empty(value) {
                        return Ok(());
                    }
                }
                "dive" => {
                    if let Some(elements) = value.as_array() {
                        for element in elements {
                            self.eval_value(&tokens[i + 1..], element, report)?;
                        }
                    }
                    return Ok(());
                }
                name => {
                    if !self.eval_rule(name, value, token.param)? {
                        report(name);
                        return Ok(());
                    }
                }
            }
        }
        Ok(())
    }

    fn walk_object(
        &self,
        shape: &Shape,
        object: &Map<String, Value>,
        struct_path: &mut Vec<String>,
        name_path: &mut Vec<String>,
        out: &mut Vec<Violation>,
    ) -> Result<(), InputError> {
        for field in shape.fields() {
            if field.is_transparent() {
                // Embedded member: contributes a path segment, which the
                // flattener drops, but its values live on the same object.
                if let Kind::Struct(sub) = field.kind().innermost() {
                    struct_path.push(field.declared().to_string());
                    name_path.push((self.naming)(field));
                    self.walk_object(sub(), object, struct_path, name_path, out)?;
                    struct_path.pop();
                    name_path.pop();
                }
                continue;
            }
            let external = (self.naming)(field);
            let value = object.get(&external).unwrap_or(&NULL);
            struct_path.push(field.declared().to_string());
            name_path.push(external);
            self.check_field(field, value, struct_path, name_path, out)?;
            struct_path.pop();
            name_path.pop();
        }
        Ok(())
    }

    fn check_field(
        &self,
        field: &Field,
        value: &Value,
        struct_path: &mut Vec<String>,
        name_path: &mut Vec<String>,
        out: &mut Vec<Violation>,
    ) -> Result<(), InputError> {
        let tokens = parse_rule_expr(field.rule_expr());
        let mut dived = false;

        for (i, token) in tokens.iter().enumerate() {
            match token.name {
                "omitnil" => {
                    if value.is_null() {
                        return Ok(());
                    }
                }
                "omitempty" => {
                    if rules::is_empty(value) {
                        return Ok(());
                    }
                }
                "dive" => {
                    self.dive_field(field, &tokens[i + 1..], value, struct_path, name_path, out)?;
                    dived = true;
                    break;
                }
                name => {
                    if !self.eval_rule(name, value, token.param)? {
                        out.push(Violation {
                            rule: name.to_string(),
                            struct_path: struct_path.clone(),
                            name_path: name_path.clone(),
                        });
                        break;
                    }
                }
            }
        }

        // Nested records are walked whether or not the field itself has
        // rules; dive already walked the elements.
        if !dived
            && let Kind::Struct(sub) = field.kind().unwrap_once()
            && let Value::Object(object) = value
        {
            self.walk_object(sub(), object, struct_path, name_path, out)?;
        }
        Ok(())
    }

    /// Applies the tokens after `dive` to each element, rewriting the
    /// last path segment to carry the element index.
    fn dive_field(
        &self,
        field: &Field,
        rest: &[RuleToken<'_>],
        value: &Value,
        struct_path: &mut Vec<String>,
        name_path: &mut Vec<String>,
        out: &mut Vec<Violation>,
    ) -> Result<(), InputError> {
        let Some(elements) = value.as_array() else {
            return Ok(());
        };
        let external = name_path.last().cloned().unwrap_or_default();
        for (i, element) in elements.iter().enumerate() {
            if let Some(last) = struct_path.last_mut() {
                *last = format!("{}[{}]", field.declared(), i);
            }
            if let Some(last) = name_path.last_mut() {
                *last = format!("{}[{}]", external, i);
            }
            self.eval_value(rest, element, &mut |rule| {
                out.push(Violation {
                    rule: rule.to_string(),
                    struct_path: struct_path.clone(),
                    name_path: name_path.clone(),
                });
            })?;
            if let Kind::Struct(sub) = field.kind().innermost()
                && let Value::Object(object) = element
            {
                self.walk_object(sub(), object, struct_path, name_path, out)?;
            }
        }
        Ok(())
    }
}

impl Default for RuleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for RuleEngine {
    fn check_record(
        &self,
        shape: &Shape,
        object: &Map<String, Value>,
    ) -> Result<Vec<Violation>, InputError> {
        let mut out = Vec::new();
        let mut struct_path = Vec::new();
        let mut name_path = Vec::new();
        self.walk_object(shape, object, &mut struct_path, &mut name_path, &mut out)?;
        Ok(out)
    }

    fn check_value(&self, value: &Value, rules: &str) -> Result<Vec<String>, InputError> {
        let tokens = parse_rule_expr(rules);
        let mut failed = Vec::new();
        self.eval_value(&tokens, value, &mut |rule| failed.push(rule.to_string()))?;
        Ok(failed)
    }
}
