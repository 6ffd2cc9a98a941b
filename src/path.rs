//! Structural path resolution and flattening.
//!
//! Rule failures arrive as two parallel segment lists: a structural path
//! of declared field names, possibly index-suffixed (`items[2]`), and an
//! external-name path carrying wire names at the same positions.
//! Resolution walks the shape graph by declared name; flattening turns
//! the external-name path into the output key, dropping transparent
//! segments and rewriting index suffixes to a `.N` discriminator.

use crate::shape::{Field, Kind, Shape};
use regex::Regex;
use std::borrow::Cow;
use std::sync::LazyLock;

/// Trailing bracketed index, e.g. the `[2]` of `items[2]`.
static INDEX_SUFFIX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(\[(\d+)\])$").unwrap());

/// Synthetic descriptor returned for an empty path.
static EMPTY_FIELD: LazyLock<Field> = LazyLock::new(|| Field::new("", Kind::Scalar));

/// Removes a trailing index suffix: `items[2]` becomes `items`.
/// Segments without one pass through unchanged.
pub fn strip_index(segment: &str) -> Cow<'_, str> {
    INDEX_SUFFIX.replace(segment, "")
}

/// Rewrites a trailing index suffix to a dot discriminator: `items[2]`
/// becomes `items.2`, so consumers read a field name plus a position
/// without parsing brackets.
pub fn rewrite_index(segment: &str) -> Cow<'_, str> {
    INDEX_SUFFIX.replace(segment, ".$2")
}

/// Walks `path` from `root`, one declared-name segment per hop, and
/// returns the terminal field's descriptor.
///
/// Optional and list wrappers are unwrapped one level before each hop,
/// and index suffixes are ignored for lookup. `None` means some segment
/// did not resolve; callers treat that as "ignore this failure". An
/// empty path resolves to a synthetic descriptor with no tags.
pub fn resolve<'a>(root: &'a Shape, path: &[String]) -> Option<&'a Field> {
    if path.is_empty() {
        return Some(&EMPTY_FIELD);
    }
    let mut shape = root;
    let mut resolved: Option<&Field> = None;
    for segment in path {
        if let Some(prev) = resolved {
            match prev.kind().unwrap_once() {
                Kind::Struct(sub) => shape = sub(),
                _ => return None,
            }
        }
        resolved = Some(shape.field_by_name(&strip_index(segment))?);
    }
    resolved
}

/// Builds the external output key for one failure, or `None` to omit it.
///
/// Every prefix of `struct_path` is resolved against `root`: a
/// transparent field drops its segment, a suppressed terminal drops the
/// whole entry, and a suppressed intermediate drops only its segment.
/// Surviving positions take their `name_path` segment with the index
/// suffix rewritten, joined with `.`. An unresolvable prefix omits the
/// entry rather than guessing a name.
pub fn flatten(root: &Shape, struct_path: &[String], name_path: &[String]) -> Option<String> {
    let mut parts: Vec<Cow<'_, str>> = Vec::with_capacity(struct_path.len());
    for i in 0..struct_path.len() {
        let field = resolve(root, &struct_path[..=i])?;
        if field.is_transparent() {
            continue;
        }
        if field.is_suppressed() {
            if i + 1 == struct_path.len() {
                return None;
            }
            continue;
        }
        parts.push(rewrite_index(name_path.get(i)?));
    }
    if parts.is_empty() {
        return None;
    }
    Some(parts.join("."))
}
