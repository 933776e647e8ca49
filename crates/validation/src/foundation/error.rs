//! Error types for validation failures
//!
//! A validation pass produces one [`ValidationFailure`] per failing
//! (field, rule) pair and aggregates them into a single [`ValidationError`].
//! Defects in the rule declarations themselves are [`ConfigError`]s.
//!
//! String fields use `Cow<'static, str>` so that field and rule names taken
//! from static declarations never allocate.

use std::borrow::Cow;
use std::fmt;

// ============================================================================
// FAILURE KIND
// ============================================================================

/// Why a rule evaluated to false.
///
/// Predicates only ever answer yes or no. The registry classifies a "no"
/// after the fact so callers can tell a genuine violation from a bad
/// declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum FailureKind {
    /// The field value breaks the rule.
    #[default]
    Violated,
    /// The rule parameter could not be understood (e.g. an unparsable date).
    MalformedParameter,
    /// The field's runtime kind is not one the rule accepts.
    TypeMismatch,
}

impl FailureKind {
    /// Stable snake_case code for logs and serialized reports.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            FailureKind::Violated => "violated",
            FailureKind::MalformedParameter => "malformed_parameter",
            FailureKind::TypeMismatch => "type_mismatch",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// VALIDATION FAILURE
// ============================================================================

/// One (field, rule) pair that evaluated to false.
///
/// # Examples
///
/// ```
/// use validation::foundation::{FailureKind, ValidationFailure};
///
/// let failure = ValidationFailure::new("Date4", "dateAfter")
///     .with_param("2000-01-01")
///     .with_message("must be on or after 2000-01-01");
///
/// assert_eq!(failure.field(), "Date4");
/// assert_eq!(failure.kind(), FailureKind::Violated);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationFailure {
    field: Cow<'static, str>,
    rule: Cow<'static, str>,
    param: Option<Cow<'static, str>>,
    kind: FailureKind,
    message: Cow<'static, str>,
}

impl ValidationFailure {
    /// Creates a [`FailureKind::Violated`] failure with a generic message.
    pub fn new(field: impl Into<Cow<'static, str>>, rule: impl Into<Cow<'static, str>>) -> Self {
        Self {
            field: field.into(),
            rule: rule.into(),
            param: None,
            kind: FailureKind::Violated,
            message: Cow::Borrowed("validation failed"),
        }
    }

    /// Records the rule parameter that was in effect.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(mut self, param: impl Into<Cow<'static, str>>) -> Self {
        self.param = Some(param.into());
        self
    }

    /// Sets the failure kind.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_kind(mut self, kind: FailureKind) -> Self {
        self.kind = kind;
        self
    }

    /// Sets the human-readable message.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// The failing field.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The failing rule name.
    #[must_use]
    pub fn rule(&self) -> &str {
        &self.rule
    }

    /// The rule parameter, if one was declared.
    #[must_use]
    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }

    /// Why the rule failed.
    #[must_use]
    pub fn kind(&self) -> FailureKind {
        self.kind
    }

    /// Human-readable description.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Converts the failure to a JSON value for structured logging.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "field": self.field,
            "rule": self.rule,
            "param": self.param,
            "kind": self.kind.code(),
            "message": self.message,
        })
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.rule)?;
        if let Some(param) = &self.param {
            write!(f, "={param}")?;
        }
        write!(f, ": {}", self.message)?;
        if self.kind != FailureKind::Violated {
            write!(f, " ({})", self.kind)?;
        }
        Ok(())
    }
}

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// Every failure found in one validation pass.
///
/// Never empty when returned from a validation call: a pass with no
/// failures yields `Ok(())` instead.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationError {
    failures: Vec<ValidationFailure>,
}

impl ValidationError {
    /// Creates an empty collection.
    #[must_use]
    pub fn new() -> Self {
        Self {
            failures: Vec::new(),
        }
    }

    /// Adds a failure.
    pub fn add(&mut self, failure: ValidationFailure) {
        self.failures.push(failure);
    }

    /// Moves every failure of `other` into this collection.
    pub fn merge(&mut self, other: ValidationError) {
        self.failures.extend(other.failures);
    }

    /// Returns the number of failures.
    #[must_use]
    pub fn len(&self) -> usize {
        self.failures.len()
    }

    /// Returns true if nothing failed.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.failures.is_empty()
    }

    /// All failures, in evaluation order.
    #[must_use]
    pub fn failures(&self) -> &[ValidationFailure] {
        &self.failures
    }

    /// Iterates over the failures.
    pub fn iter(&self) -> std::slice::Iter<'_, ValidationFailure> {
        self.failures.iter()
    }

    /// Returns true if `rule` failed on `field`.
    #[must_use]
    pub fn has_failure(&self, field: &str, rule: &str) -> bool {
        self.failures
            .iter()
            .any(|f| f.field() == field && f.rule() == rule)
    }

    /// Failures recorded against one field.
    pub fn for_field<'a>(
        &'a self,
        field: &'a str,
    ) -> impl Iterator<Item = &'a ValidationFailure> + 'a {
        self.failures.iter().filter(move |f| f.field() == field)
    }

    /// Distinct failing field names, in first-seen order.
    #[must_use]
    pub fn fields(&self) -> Vec<&str> {
        let mut fields: Vec<&str> = Vec::new();
        for failure in &self.failures {
            if !fields.contains(&failure.field()) {
                fields.push(failure.field());
            }
        }
        fields
    }

    /// `Ok(())` when empty, `Err(self)` otherwise.
    #[must_use = "result must be used"]
    pub fn into_result(self) -> Result<(), ValidationError> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }

    /// Consumes the collection and returns the failures.
    #[must_use]
    pub fn into_failures(self) -> Vec<ValidationFailure> {
        self.failures
    }

    /// Converts the whole report to JSON for structured logging.
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::Value::Array(
            self.failures
                .iter()
                .map(ValidationFailure::to_json_value)
                .collect(),
        )
    }
}

impl FromIterator<ValidationFailure> for ValidationError {
    fn from_iter<I: IntoIterator<Item = ValidationFailure>>(iter: I) -> Self {
        Self {
            failures: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for ValidationError {
    type Item = ValidationFailure;
    type IntoIter = std::vec::IntoIter<ValidationFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValidationError {
    type Item = &'a ValidationFailure;
    type IntoIter = std::slice::Iter<'a, ValidationFailure>;

    fn into_iter(self) -> Self::IntoIter {
        self.failures.iter()
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "validation failed with {} error(s)", self.failures.len())?;
        for (i, failure) in self.failures.iter().enumerate() {
            write!(f, "\n  {}. {}", i + 1, failure)?;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// CONFIGURATION ERRORS
// ============================================================================

/// A defect in a record type's rule declarations.
///
/// These are programming errors, not user input problems, and are never
/// reported as a [`ValidationFailure`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// A declaration names a rule that was never registered.
    #[error("field '{field}' declares unknown rule '{rule}'")]
    UnknownRule {
        /// Field carrying the declaration.
        field: String,
        /// The unregistered rule name.
        rule: String,
    },

    /// A tag could not be parsed into rules.
    #[error("malformed rule tag '{tag}': {reason}")]
    MalformedTag {
        /// The offending tag text.
        tag: String,
        /// What is wrong with it.
        reason: &'static str,
    },
}

/// Everything [`Validator::try_validate`](crate::Validator::try_validate) can report.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The record breaks one or more rules.
    #[error(transparent)]
    Invalid(#[from] ValidationError),

    /// The record type's declarations are broken.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl Error {
    /// The validation report, if this is a validation failure.
    #[must_use]
    pub fn as_invalid(&self) -> Option<&ValidationError> {
        match self {
            Error::Invalid(errors) => Some(errors),
            Error::Config(_) => None,
        }
    }

    /// Returns true for configuration defects.
    #[must_use]
    pub fn is_config(&self) -> bool {
        matches!(self, Error::Config(_))
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> ValidationError {
        [
            ValidationFailure::new("name", "stringContains").with_param("example"),
            ValidationFailure::new("start", "dateAfter")
                .with_param("soon")
                .with_kind(FailureKind::MalformedParameter),
            ValidationFailure::new("name", "min").with_param("3"),
        ]
        .into_iter()
        .collect()
    }

    #[test]
    fn test_failure_defaults() {
        let failure = ValidationFailure::new("email", "required");
        assert_eq!(failure.field(), "email");
        assert_eq!(failure.rule(), "required");
        assert_eq!(failure.param(), None);
        assert_eq!(failure.kind(), FailureKind::Violated);
    }

    #[test]
    fn test_static_names_do_not_allocate() {
        let failure = ValidationFailure::new("email", "required");
        assert!(matches!(failure.field, Cow::Borrowed(_)));
        assert!(matches!(failure.rule, Cow::Borrowed(_)));
    }

    #[test]
    fn test_failure_display() {
        let failure = ValidationFailure::new("start", "dateAfter")
            .with_param("soon")
            .with_kind(FailureKind::MalformedParameter)
            .with_message("bad date");
        assert_eq!(
            failure.to_string(),
            "[start] dateAfter=soon: bad date (malformed_parameter)"
        );
    }

    #[test]
    fn test_collection_queries() {
        let errors = sample();
        assert_eq!(errors.len(), 3);
        assert!(errors.has_failure("name", "stringContains"));
        assert!(errors.has_failure("start", "dateAfter"));
        assert!(!errors.has_failure("start", "stringContains"));
        assert_eq!(errors.fields(), vec!["name", "start"]);
        assert_eq!(errors.for_field("name").count(), 2);
    }

    #[test]
    fn test_into_result() {
        assert!(ValidationError::new().into_result().is_ok());
        assert!(sample().into_result().is_err());
    }

    #[test]
    fn test_into_failures_keeps_order() {
        let rules: Vec<_> = sample()
            .into_failures()
            .into_iter()
            .map(|f| f.rule().to_string())
            .collect();
        assert_eq!(rules, vec!["stringContains", "dateAfter", "min"]);
    }

    #[test]
    fn test_merge() {
        let mut errors = sample();
        errors.merge(sample());
        assert_eq!(errors.len(), 6);
    }

    #[test]
    fn test_display_lists_every_failure() {
        let text = sample().to_string();
        assert!(text.starts_with("validation failed with 3 error(s)"));
        assert!(text.contains("[name] stringContains=example"));
        assert!(text.contains("[start] dateAfter=soon"));
    }

    #[test]
    fn test_json_report() {
        let json = sample().to_json_value();
        assert_eq!(json[1]["kind"], "malformed_parameter");
        assert_eq!(json[0]["param"], "example");
        assert_eq!(json[0]["field"], "name");
    }

    #[test]
    fn test_error_wraps_both_sides() {
        let invalid: Error = sample().into();
        assert!(invalid.as_invalid().is_some());
        assert!(!invalid.is_config());

        let config: Error = ConfigError::UnknownRule {
            field: "name".into(),
            rule: "nope".into(),
        }
        .into();
        assert!(config.is_config());
        assert_eq!(config.to_string(), "field 'name' declares unknown rule 'nope'");
    }
}
