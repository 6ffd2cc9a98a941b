//! Record sanitization.
//!
//! Rewrites a record's string fields according to each field's modifier
//! directives before validation: trim whitespace, fold case, or apply a
//! registered custom modifier. The record is serialized, its value tree
//! is rewritten shape-aware, and the result is deserialized back in
//! place, so the pass works on any [`Record`] that also deserializes.

use crate::error::InputError;
use crate::shape::{Kind, Record, Shape};
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

type Modifier = Arc<dyn Fn(&str) -> String + Send + Sync>;

fn trim(s: &str) -> String {
    s.trim().to_string()
}

fn lcase(s: &str) -> String {
    s.to_lowercase()
}

fn ucase(s: &str) -> String {
    s.to_uppercase()
}

/// Builtin modifiers, keyed by directive name.
static BUILTIN_MODS: &[(&str, fn(&str) -> String)] =
    &[("trim", trim), ("lcase", lcase), ("ucase", ucase)];

/// Applies field modifier directives to records in place.
///
/// Like the rule engine, a sanitizer is configured once and then shared;
/// [`register`](Sanitizer::register) is a construction-time concern.
#[derive(Clone)]
pub struct Sanitizer {
    mods: HashMap<String, Modifier>,
}

impl Sanitizer {
    pub fn new() -> Self {
        let mut mods: HashMap<String, Modifier> = HashMap::new();
        for (name, modifier) in BUILTIN_MODS {
            mods.insert((*name).to_string(), Arc::new(*modifier) as Modifier);
        }
        Sanitizer { mods }
    }

    /// Registers a named modifier, replacing any builtin of that name.
    pub fn register<F>(&mut self, name: &str, modifier: F)
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.mods.insert(name.to_string(), Arc::new(modifier));
    }

    /// Rewrites `record` according to its shape's modifier directives.
    ///
    /// String fields get their directives applied left to right; sequence
    /// fields broadcast over their elements; nested records are walked
    /// with their own shapes. Fields without directives pass through.
    ///
    /// # Errors
    ///
    /// A null record, an unknown directive name, and a record that no
    /// longer deserializes after modification are infrastructure errors.
    pub fn apply<T>(&self, record: &mut T) -> Result<(), InputError>
    where
        T: Record + DeserializeOwned,
    {
        let mut value = serde_json::to_value(&*record).map_err(InputError::encoding)?;
        match &mut value {
            Value::Null => return Err(InputError::null_record("sanitize")),
            Value::Object(object) => self.apply_object(T::shape(), object)?,
            other => return Err(InputError::unsupported_kind("sanitize", other)),
        }
        *record = serde_json::from_value(value).map_err(InputError::encoding)?;
        Ok(())
    }

    fn apply_object(&self, shape: &Shape, object: &mut Map<String, Value>) -> Result<(), InputError> {
        for field in shape.fields() {
            if field.is_transparent() {
                if let Kind::Struct(sub) = field.kind().innermost() {
                    self.apply_object(sub(), object)?;
                }
                continue;
            }
            let Some(value) = object.get_mut(field.external_or_declared()) else {
                continue;
            };
            self.apply_value(field.mod_expr(), field.kind(), value)?;
        }
        Ok(())
    }

    fn apply_value(&self, mods: &str, kind: &Kind, value: &mut Value) -> Result<(), InputError> {
        match value {
            Value::String(s) => {
                for name in mods.split(',').map(str::trim).filter(|m| !m.is_empty()) {
                    let modifier = self
                        .mods
                        .get(name)
                        .ok_or_else(|| InputError::unknown_modifier(name))?;
                    let updated = (modifier.as_ref())(s.as_str());
                    *s = updated;
                }
            }
            Value::Array(elements) => {
                for element in elements {
                    self.apply_value(mods, kind, element)?;
                }
            }
            Value::Object(object) => {
                if let Kind::Struct(sub) = kind.innermost() {
                    self.apply_object(sub(), object)?;
                }
            }
            _ => {}
        }
        Ok(())
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        Self::new()
    }
}
