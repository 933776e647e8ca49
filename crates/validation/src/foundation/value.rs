//! Runtime field values handed to predicates.
//!
//! A record never exposes its fields through reflection. Instead each field
//! is lowered into a [`FieldValue`] that borrows from the record for the
//! duration of one validation pass.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use std::fmt;

// ============================================================================
// VALUE KIND
// ============================================================================

/// The runtime kind of a [`FieldValue`].
///
/// Rules declare which kinds they accept. A field of any other kind fails
/// the rule with [`FailureKind::TypeMismatch`](crate::foundation::FailureKind).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    /// An absent optional value.
    Null,
    /// `bool`.
    Bool,
    /// Signed integers.
    Int,
    /// Unsigned integers.
    UInt,
    /// Floating point numbers.
    Float,
    /// Text.
    Str,
    /// A point in time.
    DateTime,
    /// A sequence; only its length is visible to rules.
    List,
}

impl ValueKind {
    /// Every kind, for rules that accept anything.
    pub const ALL: &'static [ValueKind] = &[
        ValueKind::Null,
        ValueKind::Bool,
        ValueKind::Int,
        ValueKind::UInt,
        ValueKind::Float,
        ValueKind::Str,
        ValueKind::DateTime,
        ValueKind::List,
    ];

    /// Lowercase name used in failure messages.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            ValueKind::Null => "null",
            ValueKind::Bool => "bool",
            ValueKind::Int => "int",
            ValueKind::UInt => "uint",
            ValueKind::Float => "float",
            ValueKind::Str => "string",
            ValueKind::DateTime => "datetime",
            ValueKind::List => "list",
        }
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// FIELD VALUE
// ============================================================================

/// A borrowed view of one field's current value.
///
/// # Examples
///
/// ```
/// use validation::foundation::{FieldValue, ValueKind};
///
/// let name = String::from("alice");
/// assert_eq!(FieldValue::from(&name).kind(), ValueKind::Str);
/// assert_eq!(FieldValue::from(None::<&str>), FieldValue::Null);
/// assert_eq!(FieldValue::from(&[1, 2, 3][..]), FieldValue::List(3));
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldValue<'a> {
    /// An absent optional value.
    Null,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// An unsigned integer.
    UInt(u64),
    /// A floating point number.
    Float(f64),
    /// Borrowed text.
    Str(&'a str),
    /// A UTC timestamp.
    DateTime(DateTime<Utc>),
    /// The length of a sequence.
    List(usize),
}

impl FieldValue<'_> {
    /// Returns the kind of this value.
    #[must_use]
    pub const fn kind(&self) -> ValueKind {
        match self {
            FieldValue::Null => ValueKind::Null,
            FieldValue::Bool(_) => ValueKind::Bool,
            FieldValue::Int(_) => ValueKind::Int,
            FieldValue::UInt(_) => ValueKind::UInt,
            FieldValue::Float(_) => ValueKind::Float,
            FieldValue::Str(_) => ValueKind::Str,
            FieldValue::DateTime(_) => ValueKind::DateTime,
            FieldValue::List(_) => ValueKind::List,
        }
    }

    /// Returns true for [`FieldValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, FieldValue::Null)
    }

    /// Returns the text, if this is a string value.
    #[must_use]
    pub const fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the timestamp, if this is a datetime value.
    #[must_use]
    pub const fn as_datetime(&self) -> Option<DateTime<Utc>> {
        match self {
            FieldValue::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    /// Numeric view used by `min`/`max`: the value itself for numbers, the
    /// length in chars for strings, the element count for lists.
    #[must_use]
    pub fn magnitude(&self) -> Option<f64> {
        match self {
            FieldValue::Int(n) => Some(*n as f64),
            FieldValue::UInt(n) => Some(*n as f64),
            FieldValue::Float(n) => Some(*n),
            FieldValue::Str(s) => Some(s.chars().count() as f64),
            FieldValue::List(len) => Some(*len as f64),
            FieldValue::Null | FieldValue::Bool(_) | FieldValue::DateTime(_) => None,
        }
    }
}

impl fmt::Display for FieldValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Null => f.write_str("null"),
            FieldValue::Bool(b) => write!(f, "{b}"),
            FieldValue::Int(n) => write!(f, "{n}"),
            FieldValue::UInt(n) => write!(f, "{n}"),
            FieldValue::Float(n) => write!(f, "{n}"),
            FieldValue::Str(s) => write!(f, "{s:?}"),
            FieldValue::DateTime(dt) => write!(f, "{}", dt.to_rfc3339()),
            FieldValue::List(len) => write!(f, "[{len} items]"),
        }
    }
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl<'a> From<&'a str> for FieldValue<'a> {
    fn from(value: &'a str) -> Self {
        FieldValue::Str(value)
    }
}

impl<'a> From<&'a String> for FieldValue<'a> {
    fn from(value: &'a String) -> Self {
        FieldValue::Str(value.as_str())
    }
}

impl<'a> From<&'a &str> for FieldValue<'a> {
    fn from(value: &'a &str) -> Self {
        FieldValue::Str(*value)
    }
}

impl From<bool> for FieldValue<'_> {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&bool> for FieldValue<'_> {
    fn from(value: &bool) -> Self {
        FieldValue::Bool(*value)
    }
}

macro_rules! impl_from_number {
    ($variant:ident, $target:ty: $($t:ty),+) => {
        $(
            impl From<$t> for FieldValue<'_> {
                fn from(value: $t) -> Self {
                    FieldValue::$variant(<$target>::from(value))
                }
            }

            impl From<&$t> for FieldValue<'_> {
                fn from(value: &$t) -> Self {
                    FieldValue::$variant(<$target>::from(*value))
                }
            }
        )+
    };
}

impl_from_number!(Int, i64: i8, i16, i32, i64);
impl_from_number!(UInt, u64: u8, u16, u32, u64);
impl_from_number!(Float, f64: f32, f64);

impl From<usize> for FieldValue<'_> {
    fn from(value: usize) -> Self {
        FieldValue::UInt(value as u64)
    }
}

impl From<&usize> for FieldValue<'_> {
    fn from(value: &usize) -> Self {
        FieldValue::UInt(*value as u64)
    }
}

impl From<DateTime<Utc>> for FieldValue<'_> {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::DateTime(value)
    }
}

impl From<&DateTime<Utc>> for FieldValue<'_> {
    fn from(value: &DateTime<Utc>) -> Self {
        FieldValue::DateTime(*value)
    }
}

impl From<&NaiveDateTime> for FieldValue<'_> {
    fn from(value: &NaiveDateTime) -> Self {
        FieldValue::DateTime(value.and_utc())
    }
}

impl From<&NaiveDate> for FieldValue<'_> {
    fn from(value: &NaiveDate) -> Self {
        FieldValue::DateTime(value.and_time(chrono::NaiveTime::MIN).and_utc())
    }
}

impl<'a, T> From<&'a [T]> for FieldValue<'a> {
    fn from(value: &'a [T]) -> Self {
        FieldValue::List(value.len())
    }
}

impl<'a, T> From<&'a Vec<T>> for FieldValue<'a> {
    fn from(value: &'a Vec<T>) -> Self {
        FieldValue::List(value.len())
    }
}

impl<'a, T> From<Option<T>> for FieldValue<'a>
where
    T: Into<FieldValue<'a>>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(FieldValue::Null, Into::into)
    }
}

impl<'a, T> From<&'a Option<T>> for FieldValue<'a>
where
    &'a T: Into<FieldValue<'a>>,
{
    fn from(value: &'a Option<T>) -> Self {
        value.as_ref().map_or(FieldValue::Null, Into::into)
    }
}

// ============================================================================
// TESTS
// ============================================================================
