//! Predicate library
//!
//! Pure functions behind every registered rule. None of them panic or
//! error: malformed input (wrong field kind, unparsable parameter) makes
//! them return `false`.
//!
//! | rule             | function            |
//! |------------------|---------------------|
//! | `stringContains` | [`string_contains`] |
//! | `dateAfter`      | [`date_after`]      |
//! | `dateBefore`     | [`date_before`]     |
//! | `required`       | [`required`]        |
//! | `len`            | [`len`]             |
//! | `min` / `max`    | [`min`] / [`max`]   |
//! | `email` / `url`  | [`is_email`] / [`is_url`] |

use std::sync::Arc;

use crate::foundation::FieldValue;

pub mod builtin;
pub mod string;
pub mod temporal;

pub use builtin::{len, max, min, parse_bound, parse_count, required};
pub use string::{is_email, is_url, string_contains};
pub use temporal::{
    DEFAULT_CLOCK_SKEW_MS, DateRules, NOW_KEYWORD, date_after, date_before, parse_any,
};

/// A registered rule body: field value and parameter in, verdict out.
///
/// The parameter is `""` when the declaration has none.
pub type Predicate = Arc<dyn Fn(&FieldValue<'_>, &str) -> bool + Send + Sync>;

/// Tells whether a parameter is well-formed for a rule.
///
/// Only consulted after a predicate returned `false`, to classify the
/// failure as [`FailureKind::MalformedParameter`](crate::foundation::FailureKind).
pub type ParamCheckFn = Arc<dyn Fn(&str) -> bool + Send + Sync>;

/// Rule names registered by default.
pub mod names {
    /// Substring containment.
    pub const STRING_CONTAINS: &str = "stringContains";
    /// Date on or after a bound.
    pub const DATE_AFTER: &str = "dateAfter";
    /// Date on or before a bound.
    pub const DATE_BEFORE: &str = "dateBefore";
    /// Value present and non-empty.
    pub const REQUIRED: &str = "required";
    /// Exact length.
    pub const LEN: &str = "len";
    /// Lower bound on value or length.
    pub const MIN: &str = "min";
    /// Upper bound on value or length.
    pub const MAX: &str = "max";
    /// Email address format.
    pub const EMAIL: &str = "email";
    /// HTTP(S) URL format.
    pub const URL: &str = "url";
}
