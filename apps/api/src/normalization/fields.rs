//! Permissive field access over model-produced JSON objects.
//!
//! Missing or `null` fields are absent, never errors. Scalars are read as text and normalized.
//! Only a structure of the wrong kind (an object where a list belongs, say) is a `ParseError`.

use serde_json::{Map, Value};

use crate::normalization::text::{normalize_opt, normalize_text};
use crate::normalization::ParseError;

pub type Object = Map<String, Value>;

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

/// Normalized text of an optional scalar field.
pub fn optional_text(obj: &Object, key: &str) -> Option<String> {
    normalize_opt(obj.get(key).and_then(scalar_text).as_deref())
}

/// Normalized text of a field that defaults to `""` when absent.
pub fn required_text(obj: &Object, key: &str) -> String {
    optional_text(obj, key).unwrap_or_default()
}

/// Normalized list of strings. Non-scalar elements are skipped.
pub fn string_list(obj: &Object, key: &str) -> Result<Vec<String>, ParseError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => Ok(items
            .iter()
            .filter_map(scalar_text)
            .map(|s| normalize_text(&s))
            .collect()),
        Some(_) => Err(ParseError::shape(format!("`{key}` must be an array"))),
    }
}

/// List of objects; every element must be an object.
pub fn object_list<'a>(obj: &'a Object, key: &str) -> Result<Vec<&'a Object>, ParseError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                item.as_object()
                    .ok_or_else(|| ParseError::shape(format!("`{key}[{i}]` must be an object")))
            })
            .collect(),
        Some(_) => Err(ParseError::shape(format!("`{key}` must be an array"))),
    }
}

/// Optional nested object.
pub fn optional_object<'a>(obj: &'a Object, key: &str) -> Result<Option<&'a Object>, ParseError> {
    match obj.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Object(inner)) => Ok(Some(inner)),
        Some(_) => Err(ParseError::shape(format!("`{key}` must be an object"))),
    }
}

/// The document root, which must be an object.
pub fn root_object(value: &Value) -> Result<&Object, ParseError> {
    value
        .as_object()
        .ok_or_else(|| ParseError::shape("root must be a JSON object"))
}
