//! Built-in predicates over any [`FieldValue`]: `required`, `len`, `min`, `max`.
//!
//! String lengths count Unicode scalar values, not bytes.

use crate::foundation::FieldValue;

/// `required`: the value is present and not empty.
///
/// `Null`, `""` and empty lists fail. Numbers, booleans and timestamps
/// always pass; wrap them in `Option` to make them optional.
#[must_use]
pub fn required(value: &FieldValue<'_>) -> bool {
    match value {
        FieldValue::Null => false,
        FieldValue::Str(s) => !s.is_empty(),
        FieldValue::List(len) => *len > 0,
        FieldValue::Bool(_)
        | FieldValue::Int(_)
        | FieldValue::UInt(_)
        | FieldValue::Float(_)
        | FieldValue::DateTime(_) => true,
    }
}

/// Parses a `len` parameter.
#[must_use]
pub fn parse_count(param: &str) -> Option<usize> {
    param.trim().parse().ok()
}

/// Parses a `min` / `max` parameter.
#[must_use]
pub fn parse_bound(param: &str) -> Option<f64> {
    param.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

/// `len=n`: string length in chars, or list length, equals `n`.
#[must_use]
pub fn len(value: &FieldValue<'_>, param: &str) -> bool {
    let Some(expected) = parse_count(param) else {
        return false;
    };
    match value {
        FieldValue::Str(s) => s.chars().count() == expected,
        FieldValue::List(len) => *len == expected,
        _ => false,
    }
}

/// `min=n`: the value (or string/list length) is at least `n`.
#[must_use]
pub fn min(value: &FieldValue<'_>, param: &str) -> bool {
    match (value.magnitude(), parse_bound(param)) {
        (Some(actual), Some(bound)) => actual >= bound,
        _ => false,
    }
}

/// `max=n`: the value (or string/list length) is at most `n`.
#[must_use]
pub fn max(value: &FieldValue<'_>, param: &str) -> bool {
    match (value.magnitude(), parse_bound(param)) {
        (Some(actual), Some(bound)) => actual <= bound,
        _ => false,
    }
}
