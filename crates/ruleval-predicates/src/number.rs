//! Numeric predicates.

use serde_json::Value;

/// Convert a value to a number.
///
/// JSON numbers convert directly. Strings are trimmed and parsed as a decimal
/// number; the result must be finite, so `"NaN"` and `"inf"` do not convert.
/// Every other value yields `None`.
pub fn to_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_numeric(s),
        _ => None,
    }
}

/// Check whether a value is a number or a numeric string.
pub fn is_numeric(value: &Value) -> bool {
    to_number(value).is_some()
}

/// Check whether a number is finite with no fractional part.
pub fn is_integer(number: f64) -> bool {
    number.is_finite() && number.fract() == 0.0
}

fn parse_numeric(s: &str) -> Option<f64> {
    let s = s.trim();
    // `f64::from_str` also accepts the words "inf", "infinity" and "nan"
    if s.is_empty() || s.bytes().any(|b| b.is_ascii_alphabetic() && b != b'e' && b != b'E') {
        return None;
    }
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}
