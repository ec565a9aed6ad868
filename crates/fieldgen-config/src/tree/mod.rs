//! Path navigation over the configuration tree
//!
//! Read paths treat a missing key and a non-mapping value alike as absent.
//! The write path creates each missing level as an empty mapping.

use fieldgen_core::error::{FieldGenError, FieldGenResult};
use serde_yaml::{Mapping, Value};

/// Build a mapping key from a string segment
pub fn key(segment: &str) -> Value {
    Value::String(segment.to_string())
}

/// Follow `path` through nested mappings, returning the mapping at its end
pub fn mapping_at_path<'a>(doc: &'a Mapping, path: &[&str]) -> Option<&'a Mapping> {
    path.iter()
        .try_fold(doc, |current, segment| current.get(*segment)?.as_mapping())
}

/// Mutable counterpart of [`mapping_at_path`]
pub fn mapping_at_path_mut<'a>(doc: &'a mut Mapping, path: &[&str]) -> Option<&'a mut Mapping> {
    let mut current = doc;
    for segment in path {
        current = current.get_mut(*segment)?.as_mapping_mut()?;
    }
    Some(current)
}

/// Get-or-insert along `path`, one level at a time.
///
/// Missing levels become empty mappings and existing siblings are left alone.
/// An explicit null (a key written with no body) is upgraded to an empty
/// mapping. A level holding a scalar or sequence is an invalid configuration.
pub fn ensure_mapping_path<'a>(
    doc: &'a mut Mapping,
    path: &[&str],
) -> FieldGenResult<&'a mut Mapping> {
    let mut current = doc;
    for (depth, segment) in path.iter().enumerate() {
        let slot = current
            .entry(key(segment))
            .or_insert(Value::Mapping(Mapping::new()));
        if slot.is_null() {
            *slot = Value::Mapping(Mapping::new());
        }
        current = match slot {
            Value::Mapping(mapping) => mapping,
            other => {
                return Err(FieldGenError::invalid_config(format!(
                    "'{}' must be a mapping, found {}",
                    path[..=depth].join("."),
                    describe(other)
                )))
            },
        };
    }
    Ok(current)
}

/// Human-readable name of a value's kind, for error messages
pub fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Sequence(_) => "a sequence",
        Value::Mapping(_) => "a mapping",
        Value::Tagged(_) => "a tagged value",
    }
}
