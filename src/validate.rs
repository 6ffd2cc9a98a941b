//! Struct and single-value validation entry points.
//!
//! [`Validator::check_record`] is the mapping pipeline: run the backend,
//! then for every reported failure resolve the annotated field, pick its
//! message key, optionally translate, flatten the path, and accumulate
//! into [`FieldErrors`]. [`Validator::check_value`] runs one rule
//! expression against a bare value with none of that machinery.

use crate::engine::{Backend, NamingPolicy, RuleEngine};
use crate::error::{FieldErrors, InputError};
use crate::messages::parse_messages;
use crate::path::{flatten, resolve};
use crate::rules;
use crate::shape::Record;
use serde::Serialize;
use serde_json::Value;

// ─── Translate ───────────────────────────────────────────────────────────────

/// Optional message-key translation hook.
///
/// Applied to the selected message key before it lands in
/// [`FieldErrors`], typically a lookup into a localization catalog.
/// Treated as a pure function; any closure `Fn(&str) -> String` works.
pub trait Translate {
    fn translate(&self, key: &str) -> String;
}

impl<F> Translate for F
where
    F: Fn(&str) -> String,
{
    fn translate(&self, key: &str) -> String {
        self(key)
    }
}

// ─── Validator ───────────────────────────────────────────────────────────────

/// Maps rule failures onto flattened external field paths.
pub struct Validator<B: Backend = RuleEngine> {
    backend: B,
}

impl Validator<RuleEngine> {
    /// A validator over the built-in engine, with `date_string` registered
    /// on top of the builtin rule set.
    pub fn new() -> Self {
        let mut backend = RuleEngine::new();
        backend.register("date_string", rules::date_string);
        Validator { backend }
    }

    /// Registers a custom named rule with the built-in engine.
    pub fn register_rule<F>(&mut self, name: &str, rule: F)
    where
        F: Fn(&Value, &str) -> Result<bool, InputError> + Send + Sync + 'static,
    {
        self.backend.register(name, rule);
    }

    /// Replaces the external-name derivation policy of the built-in engine.
    pub fn with_naming(mut self, naming: NamingPolicy) -> Self {
        self.backend = self.backend.with_naming(naming);
        self
    }
}

impl Default for Validator<RuleEngine> {
    fn default() -> Self {
        Self::new()
    }
}

impl<B: Backend> Validator<B> {
    /// A validator over a custom rule backend.
    pub fn with_backend(backend: B) -> Self {
        Validator { backend }
    }

    /// Validates `record`, mapping every failure to a flattened field path.
    ///
    /// The map is empty when the record is valid. A failure whose path
    /// does not resolve against the shape, or that terminates in a
    /// suppressed field, is omitted. A failure whose rule id has no entry
    /// in the field's message table falls back to the rule id itself.
    ///
    /// # Errors
    ///
    /// `Err` means the record could not be checked at all: it serialized
    /// to null or to a non-object, or a rule expression was unusable.
    /// A field failing a rule is never an error.
    pub fn check_record<T: Record>(
        &self,
        record: &T,
        translate: Option<&dyn Translate>,
    ) -> Result<FieldErrors, InputError> {
        let value = serde_json::to_value(record).map_err(InputError::encoding)?;
        let object = match &value {
            Value::Null => return Err(InputError::null_record("check_record")),
            Value::Object(object) => object,
            other => return Err(InputError::unsupported_kind("check_record", other)),
        };

        let shape = T::shape();
        let mut errors = FieldErrors::new();

        for violation in self.backend.check_record(shape, object)? {
            let Some(field) = resolve(shape, &violation.struct_path) else {
                continue;
            };
            let table = parse_messages(field.message_table());
            let mut message = table
                .get(&violation.rule)
                .cloned()
                .unwrap_or_else(|| violation.rule.clone());
            if let Some(translate) = translate {
                message = translate.translate(&message);
            }
            let Some(path) = flatten(shape, &violation.struct_path, &violation.name_path) else {
                continue;
            };
            errors.insert(path, message);
        }

        Ok(errors)
    }

    /// Runs one rule expression against a bare value, returning the
    /// failed rule ids in evaluation order. No path mapping, no message
    /// tables, no translation; callers own message selection here.
    ///
    /// # Errors
    ///
    /// `Err` means the expression itself was unusable: an unregistered
    /// rule name or a malformed parameter.
    pub fn check_value<V: Serialize>(
        &self,
        value: &V,
        rules: &str,
    ) -> Result<Vec<String>, InputError> {
        let value = serde_json::to_value(value).map_err(InputError::encoding)?;
        self.backend.check_value(&value, rules)
    }
}
