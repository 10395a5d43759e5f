//! Text conversion for pattern matching.

use serde_json::Value;
use std::borrow::Cow;

/// Render a value as the text a pattern is matched against.
///
/// Strings are returned as-is, numbers and booleans in their display form and
/// `null` as `"null"`. Arrays and objects are rendered as compact JSON.
pub fn stringify(value: &Value) -> Cow<'_, str> {
    match value {
        Value::String(s) => Cow::Borrowed(s.as_str()),
        Value::Null => Cow::Borrowed("null"),
        Value::Bool(b) => Cow::Borrowed(if *b { "true" } else { "false" }),
        Value::Number(n) => Cow::Owned(n.to_string()),
        other => Cow::Owned(other.to_string()),
    }
}
