//! Rule registry
//!
//! An immutable table from rule name to [`RuleDef`]. It is assembled by a
//! [`RegistryBuilder`], which rejects duplicate and ill-formed names, and
//! never changes afterwards. Lookups need no locking.

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::config::ValidatorConfig;
use crate::foundation::{
    ConfigError, Error, FailureKind, FieldRules, FieldValue, Rule, ValidationError,
    ValidationFailure, ValueKind, parse_tag,
};
use crate::predicates::{self, ParamCheckFn, Predicate, names};

// ============================================================================
// RULE DEFINITION
// ============================================================================

/// A registered rule: its predicate plus the metadata used to classify
/// failures.
#[derive(Clone)]
pub struct RuleDef {
    name: Cow<'static, str>,
    predicate: Predicate,
    accepts: Cow<'static, [ValueKind]>,
    param_check: Option<ParamCheckFn>,
    message: Cow<'static, str>,
}

impl RuleDef {
    /// Creates a rule that accepts every value kind.
    pub fn new<F>(name: impl Into<Cow<'static, str>>, predicate: F) -> Self
    where
        F: Fn(&FieldValue<'_>, &str) -> bool + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            predicate: Arc::new(predicate),
            accepts: Cow::Borrowed(ValueKind::ALL),
            param_check: None,
            message: Cow::Borrowed("validation failed"),
        }
    }

    /// Restricts the rule to the given value kinds.
    ///
    /// A `Null` value skips any rule that does not list [`ValueKind::Null`],
    /// so optional fields only fail rules when present. Any other kind not
    /// listed fails with [`FailureKind::TypeMismatch`].
    #[must_use = "builder methods must be chained or built"]
    pub fn accepts(mut self, kinds: &'static [ValueKind]) -> Self {
        self.accepts = Cow::Borrowed(kinds);
        self
    }

    /// Sets the check used to classify a failure as a malformed parameter.
    #[must_use = "builder methods must be chained or built"]
    pub fn param_check<C>(mut self, check: C) -> Self
    where
        C: Fn(&str) -> bool + Send + Sync + 'static,
    {
        self.param_check = Some(Arc::new(check));
        self
    }

    /// Sets the message reported when the rule is violated.
    #[must_use = "builder methods must be chained or built"]
    pub fn message(mut self, message: impl Into<Cow<'static, str>>) -> Self {
        self.message = message.into();
        self
    }

    /// The rule name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Value kinds the rule applies to.
    #[must_use]
    pub fn accepted_kinds(&self) -> &[ValueKind] {
        &self.accepts
    }

    /// Runs the predicate directly, without kind or null handling.
    #[must_use]
    pub fn test(&self, value: &FieldValue<'_>, param: &str) -> bool {
        (self.predicate)(value, param)
    }

    /// Evaluates the rule. `None` means it passed.
    #[must_use]
    pub fn evaluate(&self, value: &FieldValue<'_>, param: &str) -> Option<FailureKind> {
        let kind = value.kind();
        if !self.accepts.contains(&kind) {
            return if kind == ValueKind::Null {
                None
            } else {
                Some(FailureKind::TypeMismatch)
            };
        }

        if self.test(value, param) {
            None
        } else if self.param_check.as_ref().is_some_and(|check| !check(param)) {
            Some(FailureKind::MalformedParameter)
        } else {
            Some(FailureKind::Violated)
        }
    }

    fn failure(
        &self,
        field: Cow<'static, str>,
        rule: &Rule,
        value: &FieldValue<'_>,
        kind: FailureKind,
    ) -> ValidationFailure {
        let message: Cow<'static, str> = match kind {
            FailureKind::Violated => self.message.clone(),
            FailureKind::TypeMismatch => {
                format!("rule does not apply to {} values", value.kind()).into()
            }
            FailureKind::MalformedParameter => format!(
                "parameter {:?} is not valid for this rule",
                rule.param_or_empty()
            )
            .into(),
        };

        let failure = ValidationFailure::new(field, self.name.clone())
            .with_kind(kind)
            .with_message(message);
        match rule.param() {
            Some(param) => failure.with_param(param.to_string()),
            None => failure,
        }
    }
}

impl fmt::Debug for RuleDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleDef")
            .field("name", &self.name)
            .field("accepts", &self.accepts)
            .field("param_check", &self.param_check.is_some())
            .field("predicate", &"<function>")
            .finish()
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

/// The immutable rule table.
///
/// Obtain one from [`Validator::get`](crate::Validator::get) or build it
/// directly with [`Registry::builder`].
#[derive(Debug, Clone)]
pub struct Registry {
    rules: HashMap<Cow<'static, str>, RuleDef>,
}

impl Registry {
    /// Starts an empty builder.
    #[must_use]
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Builds the default rule set for `config`.
    pub fn with_defaults(config: &ValidatorConfig) -> Result<Self, RegistryError> {
        RegistryBuilder::with_defaults(config).build()
    }

    /// Looks up a rule.
    #[must_use]
    pub fn rule(&self, name: &str) -> Option<&RuleDef> {
        self.rules.get(name)
    }

    /// Returns true if `name` is registered.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.rules.contains_key(name)
    }

    /// Registered rule names, sorted.
    #[must_use]
    pub fn rule_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.rules.keys().map(AsRef::as_ref).collect();
        names.sort_unstable();
        names
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Returns true if no rules are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Evaluates one rule against one value. `Ok(true)` means it passed.
    ///
    /// # Examples
    ///
    /// ```
    /// use validation::get;
    ///
    /// let registry = get();
    /// assert_eq!(registry.check("stringContains", "an example", "example"), Ok(true));
    /// assert_eq!(registry.check("min", 3, "5"), Ok(false));
    /// assert!(registry.check("noSuchRule", 3, "").is_err());
    /// ```
    pub fn check<'a>(
        &self,
        name: &str,
        value: impl Into<FieldValue<'a>>,
        param: &str,
    ) -> Result<bool, ConfigError> {
        let def = self.rules.get(name).ok_or_else(|| ConfigError::UnknownRule {
            field: String::new(),
            rule: name.to_string(),
        })?;
        Ok(def.evaluate(&value.into(), param).is_none())
    }

    /// Validates a single value against a tag, outside of any record.
    pub fn validate_value<'a>(
        &self,
        field: impl Into<Cow<'static, str>>,
        value: impl Into<FieldValue<'a>>,
        tag: &str,
    ) -> Result<(), Error> {
        let field = field.into();
        let value = value.into();
        let mut errors = ValidationError::new();
        for rule in parse_tag(tag)? {
            if let Some(failure) = self.apply(&field, &rule, &value)? {
                errors.add(failure);
            }
        }
        Ok(errors.into_result()?)
    }

    /// Validates declared fields, collecting every failure.
    pub fn validate_fields(&self, fields: &[FieldRules<'_>]) -> Result<(), Error> {
        let mut errors = ValidationError::new();
        for field in fields {
            let name = Cow::Borrowed(field.name);
            for rule in parse_tag(field.tag)? {
                if let Some(failure) = self.apply(&name, &rule, &field.value)? {
                    errors.add(failure);
                }
            }
        }

        if !errors.is_empty() {
            debug!(
                failures = errors.len(),
                fields = ?errors.fields(),
                "record failed validation"
            );
        }
        Ok(errors.into_result()?)
    }

    fn apply(
        &self,
        field: &Cow<'static, str>,
        rule: &Rule,
        value: &FieldValue<'_>,
    ) -> Result<Option<ValidationFailure>, ConfigError> {
        let def = self
            .rules
            .get(rule.name())
            .ok_or_else(|| ConfigError::UnknownRule {
                field: field.to_string(),
                rule: rule.name().to_string(),
            })?;

        let outcome = def.evaluate(value, rule.param_or_empty());
        trace!(field = %field, rule = %rule, passed = outcome.is_none(), "rule evaluated");
        Ok(outcome.map(|kind| def.failure(field.clone(), rule, value, kind)))
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Collects rule definitions and checks them before producing a [`Registry`].
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    rules: Vec<RuleDef>,
}

impl RegistryBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Creates a builder seeded with the built-in rules and the custom
    /// `stringContains`, `dateAfter` and `dateBefore` rules.
    #[must_use]
    pub fn with_defaults(config: &ValidatorConfig) -> Self {
        use ValueKind::{DateTime, Float, Int, List, Str, UInt};

        let after = config.date_rules();
        let before = after.clone();
        let after_params = after.clone();
        let before_params = after.clone();

        Self::new()
            .register(
                RuleDef::new(names::REQUIRED, |v, _| predicates::required(v))
                    .message("is required"),
            )
            .register(
                RuleDef::new(names::LEN, predicates::len)
                    .accepts(&[Str, List])
                    .param_check(|p| predicates::parse_count(p).is_some())
                    .message("must have exactly the given length"),
            )
            .register(
                RuleDef::new(names::MIN, predicates::min)
                    .accepts(&[Int, UInt, Float, Str, List])
                    .param_check(|p| predicates::parse_bound(p).is_some())
                    .message("is below the minimum"),
            )
            .register(
                RuleDef::new(names::MAX, predicates::max)
                    .accepts(&[Int, UInt, Float, Str, List])
                    .param_check(|p| predicates::parse_bound(p).is_some())
                    .message("is above the maximum"),
            )
            .register(
                RuleDef::new(names::EMAIL, |v, _| v.as_str().is_some_and(predicates::is_email))
                    .accepts(&[Str])
                    .message("must be a valid email address"),
            )
            .register(
                RuleDef::new(names::URL, |v, _| v.as_str().is_some_and(predicates::is_url))
                    .accepts(&[Str])
                    .message("must be a valid http(s) URL"),
            )
            .register(
                RuleDef::new(names::STRING_CONTAINS, |v, p| {
                    v.as_str().is_some_and(|s| predicates::string_contains(s, p))
                })
                .accepts(&[Str])
                .message("must contain the given substring"),
            )
            .register(
                RuleDef::new(names::DATE_AFTER, move |v, p| {
                    v.as_datetime().is_some_and(|t| after.is_after(t, p))
                })
                .accepts(&[DateTime])
                .param_check(move |p| after_params.is_valid_param(p))
                .message("must be on or after the given date"),
            )
            .register(
                RuleDef::new(names::DATE_BEFORE, move |v, p| {
                    v.as_datetime().is_some_and(|t| before.is_before(t, p))
                })
                .accepts(&[DateTime])
                .param_check(move |p| before_params.is_valid_param(p))
                .message("must be on or before the given date"),
            )
    }

    /// Adds a rule definition.
    #[must_use = "builder methods must be chained or built"]
    pub fn register(mut self, def: RuleDef) -> Self {
        self.rules.push(def);
        self
    }

    /// Adds several rule definitions.
    #[must_use = "builder methods must be chained or built"]
    pub fn register_all(mut self, defs: impl IntoIterator<Item = RuleDef>) -> Self {
        self.rules.extend(defs);
        self
    }

    /// Checks every name and produces the registry.
    pub fn build(self) -> Result<Registry, RegistryError> {
        let mut rules = HashMap::with_capacity(self.rules.len());
        for def in self.rules {
            check_name(def.name())?;
            if rules.contains_key(def.name()) {
                return Err(RegistryError::DuplicateRule(def.name().to_string()));
            }
            rules.insert(def.name.clone(), def);
        }

        debug!(rules = rules.len(), "rule registry built");
        Ok(Registry { rules })
    }
}

fn check_name(name: &str) -> Result<(), RegistryError> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.contains([',', '=']) {
        "name contains a tag separator"
    } else if name.chars().any(char::is_whitespace) {
        "name contains whitespace"
    } else {
        return Ok(());
    };

    Err(RegistryError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

// ============================================================================
// ERRORS
// ============================================================================

/// Errors raised while building a registry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    /// Two definitions share a name.
    #[error("rule '{0}' is already registered")]
    DuplicateRule(String),

    /// A name cannot be referenced from a tag.
    #[error("invalid rule name '{name}': {reason}")]
    InvalidName {
        /// The rejected name.
        name: String,
        /// Why it was rejected.
        reason: &'static str,
    },
}

// ============================================================================
// TESTS
// ============================================================================
