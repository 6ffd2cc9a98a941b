//! Struct validation with per-field error keys and localizable messages.
//!
//! Records are described by hand-registered [`Shape`]s carrying each
//! field's rules, wire name, and rule-to-message-key table. Validation
//! runs the rules and maps every failure to a flat external field path:
//!
//! ```text
//! Sanitizer::apply(&mut record)              record, trimmed and case-folded
//! Validator::check_record(&record, …)  →  {"address.street": "forms.street.required"}
//! Validator::check_value(&value, …)    →  ["required"]
//! ```
//!
//! # Quick Start
//!
//! ```rust
//! use fieldcheck::{Field, Kind, Record, Shape, Validator};
//! use serde::Serialize;
//! use std::sync::LazyLock;
//!
//! #[derive(Serialize)]
//! struct Signup {
//!     username: String,
//!     password: String,
//! }
//!
//! impl Record for Signup {
//!     fn shape() -> &'static Shape {
//!         static SHAPE: LazyLock<Shape> = LazyLock::new(|| {
//!             Shape::new("Signup")
//!                 .field(
//!                     Field::new("username", Kind::Scalar)
//!                         .rules("required,email")
//!                         .messages("required:signup.username.required,email:signup.username.invalid"),
//!                 )
//!                 .field(Field::new("password", Kind::Scalar).rules("required"))
//!         });
//!         &SHAPE
//!     }
//! }
//!
//! let form = Signup { username: String::new(), password: "hunter2".into() };
//! let errors = Validator::new().check_record(&form, None).expect("checkable record");
//! assert_eq!(errors["username"], "signup.username.required");
//! assert!(errors.get("password").is_none());
//! ```

pub mod engine;
pub mod error;
pub mod messages;
pub mod path;
pub mod rules;
pub mod shape;
pub mod transform;
pub mod validate;

pub use error::*;
pub use shape::*;

// Re-export the entry points at the crate root for convenience.
pub use engine::{Backend, NamingPolicy, RuleEngine, Violation};
pub use transform::Sanitizer;
pub use validate::{Translate, Validator};

/// Convenience entry point: validate with a fresh default validator and
/// no translation.
///
/// # Errors
///
/// Same infrastructure errors as [`Validator::check_record`]; field
/// failures land in the returned map, never in `Err`.
///
/// # Example
///
/// ```rust
/// use fieldcheck::{Field, Kind, Record, Shape};
/// use serde::Serialize;
/// use std::sync::LazyLock;
///
/// #[derive(Serialize)]
/// struct Profile {
///     nickname: String,
/// }
///
/// impl Record for Profile {
///     fn shape() -> &'static Shape {
///         static SHAPE: LazyLock<Shape> = LazyLock::new(|| {
///             Shape::new("Profile").field(Field::new("nickname", Kind::Scalar).rules("required"))
///         });
///         &SHAPE
///     }
/// }
///
/// let profile = Profile { nickname: "ada".into() };
/// match fieldcheck::check(&profile) {
///     Ok(errors) => assert!(errors.is_empty()),
///     Err(err) => eprintln!("uncheckable: {}", err),
/// }
/// ```
pub fn check<T: Record>(record: &T) -> Result<FieldErrors, InputError> {
    Validator::new().check_record(record, None)
}
