//! Dotted property paths
//!
//! A path such as `"nested.prop1"` is walked one segment at a time. Reads stop
//! at the first null or missing segment and report absence; existence checks
//! walk declared types only, so [`has_path`] may be true while [`resolve`]
//! yields nothing for a particular instance.

use crate::bean::{Access, Bean, PropertyType, TypeDescriptor, Value};
use tracing::debug;

/// Separator between path segments
pub const SEPARATOR: char = '.';

/// Split a path into (parents, last). `None` for empty paths or empty segments.
fn split(path: &str) -> Option<(Vec<&str>, &str)> {
    let mut segments: Vec<&str> = path.split(SEPARATOR).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return None;
    }
    let last = segments.pop()?;
    Some((segments, last))
}

/// Read the value at `path`, keeping a null final value apart from an
/// unreachable one
///
/// `Access::Ok(Value::Null)` means every parent was reached and the last
/// property is null. `Absent` means a parent is null, missing, or not
/// readable, or the last segment is not declared.
pub fn read(root: &dyn Bean, path: &str) -> Access<Value> {
    let Some((parents, last)) = split(path) else {
        return Access::Absent;
    };
    let mut current = root;
    for segment in parents {
        current = match current.nested(segment) {
            Some(next) => next,
            None => return Access::Absent,
        };
    }
    let value = current.get(last);
    if let Access::Denied(reason) = &value {
        debug!(path, %reason, "read denied");
    }
    value
}

/// Read the value at `path`, or `None` if any segment is null, missing, or
/// refused by the accessor. Never yields `Some(Value::Null)`.
pub fn resolve(root: &dyn Bean, path: &str) -> Option<Value> {
    read(root, path).ok().filter(|value| !value.is_null())
}

/// Declared descriptor of the property at `path`, walking declared types only
fn declared_property<'a>(root: &'a TypeDescriptor, path: &str) -> Option<&'a PropertyType> {
    let (parents, last) = split(path)?;
    let mut current = root;
    for segment in parents {
        current = &**current.property(segment)?.property_type().bean_type()?;
    }
    current.property(last).map(|p| p.property_type())
}

/// Whether the declared shape of `root` exposes `path`
pub fn has_path(root: &dyn Bean, path: &str) -> bool {
    declared_property(root.descriptor(), path).is_some()
}

/// Declared type of the final segment of `path`
pub fn declared_type<'a>(root: &'a dyn Bean, path: &str) -> Option<&'a PropertyType> {
    declared_property(root.descriptor(), path)
}

/// Write `value` at `path`. A null or missing parent makes the write
/// [`Access::Absent`]; intermediate beans are never created.
pub fn assign(root: &mut dyn Bean, path: &str, value: Value) -> Access<()> {
    let Some((parents, last)) = split(path) else {
        return Access::Absent;
    };
    let mut current = root;
    for segment in parents {
        current = match current.nested_mut(segment) {
            Some(next) => next,
            None => return Access::Absent,
        };
    }
    current.set(last, value)
}
