//! Record shape descriptions.
//!
//! A [`Shape`] is a hand-registered description of one record type: its
//! fields in declaration order, each carrying a declared name, an external
//! (wire) name, a rule expression, a message table, and a [`Kind`]. Shapes
//! are built once per concrete type, usually inside a `LazyLock`, and
//! handed out as `&'static` references through [`Record::shape`].

use serde::Serialize;

// ─── Kind ────────────────────────────────────────────────────────────────────

/// Produces the static shape of a nested record type.
///
/// A function rather than a direct reference so mutually recursive record
/// types can still be described.
pub type ShapeRef = fn() -> &'static Shape;

/// The declared type of a field, as far as traversal cares.
#[derive(Clone, Debug)]
pub enum Kind {
    /// A leaf value: string, number, boolean.
    Scalar,
    /// A nested record with its own shape.
    Struct(ShapeRef),
    /// An optional wrapper around another kind. One level of indirection.
    Optional(Box<Kind>),
    /// A sequence of elements of one kind. One level of indirection.
    List(Box<Kind>),
}

impl Kind {
    /// Strips one level of indirection, if any.
    pub fn unwrap_once(&self) -> &Kind {
        match self {
            Kind::Optional(inner) | Kind::List(inner) => inner,
            other => other,
        }
    }

    /// Strips every level of indirection down to the element kind.
    pub fn innermost(&self) -> &Kind {
        match self {
            Kind::Optional(inner) | Kind::List(inner) => inner.innermost(),
            other => other,
        }
    }
}

// ─── External names ──────────────────────────────────────────────────────────

/// How a field is named in serialized form and in output keys.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ExternalName {
    /// No annotation: the declared name doubles as the external name.
    #[default]
    Auto,
    /// An explicit wire name, e.g. a serde rename.
    Named(String),
    /// Excluded from external naming. Failures on the field itself are
    /// dropped from output; fields below it stay reachable.
    Suppressed,
}

// ─── Field ───────────────────────────────────────────────────────────────────

/// One field of a [`Shape`].
#[derive(Clone, Debug)]
pub struct Field {
    declared: String,
    external: ExternalName,
    rules: String,
    messages: String,
    mods: String,
    kind: Kind,
    transparent: bool,
}

impl Field {
    /// A field with no rules, no messages, and an automatic external name.
    pub fn new(declared: &str, kind: Kind) -> Self {
        Field {
            declared: declared.to_string(),
            external: ExternalName::Auto,
            rules: String::new(),
            messages: String::new(),
            mods: String::new(),
            kind,
            transparent: false,
        }
    }

    /// Sets an explicit external name, e.g. a serde rename.
    pub fn external(mut self, name: &str) -> Self {
        self.external = ExternalName::Named(name.to_string());
        self
    }

    /// Excludes the field from external naming.
    pub fn suppressed(mut self) -> Self {
        self.external = ExternalName::Suppressed;
        self
    }

    /// Sets the rule expression, e.g. `"required,email"`.
    pub fn rules(mut self, rules: &str) -> Self {
        self.rules = rules.to_string();
        self
    }

    /// Sets the raw message table, e.g. `"required:login.username.required"`.
    pub fn messages(mut self, messages: &str) -> Self {
        self.messages = messages.to_string();
        self
    }

    /// Sets the sanitizer directives, e.g. `"trim,lcase"`.
    pub fn mods(mut self, mods: &str) -> Self {
        self.mods = mods.to_string();
        self
    }

    /// Marks the field as promoted from an embedded member. Transparent
    /// fields contribute no segment to output keys, and their sub-fields
    /// resolve as if declared directly on the enclosing shape.
    pub fn transparent(mut self) -> Self {
        self.transparent = true;
        self
    }

    pub fn declared(&self) -> &str {
        &self.declared
    }

    pub fn external_name(&self) -> &ExternalName {
        &self.external
    }

    pub fn rule_expr(&self) -> &str {
        &self.rules
    }

    pub fn message_table(&self) -> &str {
        &self.messages
    }

    pub fn mod_expr(&self) -> &str {
        &self.mods
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn is_transparent(&self) -> bool {
        self.transparent
    }

    pub fn is_suppressed(&self) -> bool {
        self.external == ExternalName::Suppressed
    }

    /// The external name, or the declared name when the field carries no
    /// annotation. Suppressed fields also yield the declared name here;
    /// suppression is the flattener's concern, not naming's.
    pub fn external_or_declared(&self) -> &str {
        match &self.external {
            ExternalName::Named(name) => name,
            _ => &self.declared,
        }
    }
}

// ─── Shape ───────────────────────────────────────────────────────────────────

/// An ordered description of one record type's fields.
#[derive(Clone, Debug)]
pub struct Shape {
    name: String,
    fields: Vec<Field>,
}

impl Shape {
    /// An empty shape for the named record type.
    pub fn new(name: &str) -> Self {
        Shape {
            name: name.to_string(),
            fields: Vec::new(),
        }
    }

    /// Appends a field. Declaration order is preserved; promoted-name
    /// lookups prefer earlier fields.
    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    /// The record type's name, for diagnostics.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The fields in declaration order.
    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    /// Looks up a field by declared name. When the shape has no direct
    /// match, transparent members are searched recursively, so names
    /// promoted from embedded records resolve here too.
    pub fn field_by_name(&self, declared: &str) -> Option<&Field> {
        if let Some(field) = self.fields.iter().find(|f| f.declared == declared) {
            return Some(field);
        }
        self.fields
            .iter()
            .filter(|f| f.transparent)
            .find_map(|f| match f.kind.innermost() {
                Kind::Struct(sub) => sub().field_by_name(declared),
                _ => None,
            })
    }
}

// ─── Record ──────────────────────────────────────────────────────────────────

/// A validatable record: serializable, with a registered shape.
///
/// Implemented by hand per concrete type. Records pass through the
/// validator by value or by reference, and `Option<T>` is accepted so a
/// missing record surfaces as an infrastructure error instead of a panic.
pub trait Record: Serialize {
    fn shape() -> &'static Shape;
}

impl<T: Record> Record for &T {
    fn shape() -> &'static Shape {
        T::shape()
    }
}

impl<T: Record> Record for Option<T> {
    fn shape() -> &'static Shape {
        T::shape()
    }
}
