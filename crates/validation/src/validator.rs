//! The validator: a registry built once, on first use.

use std::sync::{LazyLock, OnceLock};

use tracing::{debug, error};

use crate::config::ValidatorConfig;
use crate::foundation::{Error, Validatable, ValidationError};
use crate::registry::{Registry, RegistryBuilder, RuleDef};

/// Validates records against their declared rules.
///
/// The rule registry is built lazily, exactly once, the first time
/// [`get`](Self::get) or a validation method runs, even when several
/// threads get there at the same moment. After that the validator is
/// read-only and can be shared freely (`&Validator` or `Arc<Validator>`).
///
/// # Examples
///
/// ```
/// use validation::{Validator, validatable};
///
/// struct Post {
///     title: String,
///     likes: u32,
/// }
///
/// validatable!(Post {
///     title => "required,max=80",
///     likes => "max=1000",
/// });
///
/// let validator = Validator::new();
/// let post = Post { title: String::new(), likes: 5000 };
///
/// let err = validator.validate(&post).unwrap_err();
/// assert!(err.has_failure("title", "required"));
/// assert!(err.has_failure("likes", "max"));
/// ```
#[derive(Debug)]
pub struct Validator {
    config: ValidatorConfig,
    extra_rules: Vec<RuleDef>,
    registry: OnceLock<Registry>,
}

impl Validator {
    /// Creates a validator with the default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(ValidatorConfig::default())
    }

    /// Creates a validator with the given configuration.
    #[must_use]
    pub fn with_config(config: ValidatorConfig) -> Self {
        Self {
            config,
            extra_rules: Vec::new(),
            registry: OnceLock::new(),
        }
    }

    /// Starts a builder for adding ad-hoc rules.
    #[must_use]
    pub fn builder() -> ValidatorBuilder {
        ValidatorBuilder::default()
    }

    /// The configuration this validator was built with.
    #[must_use]
    pub fn config(&self) -> &ValidatorConfig {
        &self.config
    }

    /// Returns true once the registry has been built.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.registry.get().is_some()
    }

    /// Direct access to the rule registry, building it if needed.
    ///
    /// Prefer [`validate`](Self::validate); this is for checking single
    /// values or inspecting the registered rules.
    ///
    /// # Panics
    ///
    /// Panics if the rule set fails to register (duplicate or invalid
    /// names). That is a programming error with no sensible recovery.
    pub fn get(&self) -> &Registry {
        self.registry.get_or_init(|| self.init())
    }

    fn init(&self) -> Registry {
        match RegistryBuilder::with_defaults(&self.config)
            .register_all(self.extra_rules.iter().cloned())
            .build()
        {
            Ok(registry) => {
                debug!(
                    rules = registry.len(),
                    clock_skew_ms = self.config.clock_skew_ms,
                    "validator initialized"
                );
                registry
            }
            Err(e) => {
                error!(error = %e, "failed to register validation rules");
                panic!("failed to register validation rules: {e}");
            }
        }
    }

    /// Validates a record and reports every failing (field, rule) pair.
    ///
    /// # Panics
    ///
    /// Panics if the record declares an unknown rule or a malformed tag;
    /// use [`try_validate`](Self::try_validate) to get those as values.
    pub fn validate<T>(&self, record: &T) -> Result<(), ValidationError>
    where
        T: Validatable + ?Sized,
    {
        match self.try_validate(record) {
            Ok(()) => Ok(()),
            Err(Error::Invalid(errors)) => Err(errors),
            Err(Error::Config(e)) => {
                error!(error = %e, "invalid rule declaration");
                panic!("invalid rule declaration: {e}");
            }
        }
    }

    /// Like [`validate`](Self::validate), but returns declaration defects
    /// as [`Error::Config`] instead of panicking.
    pub fn try_validate<T>(&self, record: &T) -> Result<(), Error>
    where
        T: Validatable + ?Sized,
    {
        self.get().validate_fields(&record.fields())
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// BUILDER
// ============================================================================

/// Builds a [`Validator`] with extra rules registered alongside the defaults.
///
/// # Examples
///
/// ```
/// use validation::{FieldValue, RuleDef, Validator, ValidatorConfig};
///
/// let validator = Validator::builder()
///     .config(ValidatorConfig::new().with_clock_skew_ms(500))
///     .rule(RuleDef::new("lowercase", |v: &FieldValue<'_>, _: &str| {
///         v.as_str().is_some_and(|s| s.chars().all(|c| !c.is_uppercase()))
///     }))
///     .build();
///
/// assert_eq!(validator.get().check("lowercase", "abc", ""), Ok(true));
/// ```
#[derive(Debug, Default)]
pub struct ValidatorBuilder {
    config: ValidatorConfig,
    extra_rules: Vec<RuleDef>,
}

impl ValidatorBuilder {
    /// Sets the configuration.
    #[must_use = "builder methods must be chained or built"]
    pub fn config(mut self, config: ValidatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Registers an additional rule. Name collisions surface when the
    /// registry is first built.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule(mut self, def: RuleDef) -> Self {
        self.extra_rules.push(def);
        self
    }

    /// Finishes the builder. The registry itself is still built lazily.
    #[must_use]
    pub fn build(self) -> Validator {
        Validator {
            config: self.config,
            extra_rules: self.extra_rules,
            registry: OnceLock::new(),
        }
    }
}

// ============================================================================
// PROCESS-WIDE DEFAULT
// ============================================================================

static DEFAULT: LazyLock<Validator> = LazyLock::new(Validator::new);

/// Validates `record` with the process-wide default [`Validator`].
///
/// # Examples
///
/// ```
/// use validation::{validatable, validate};
///
/// struct Note {
///     body: String,
/// }
///
/// validatable!(Note { body => "stringContains=TODO" });
///
/// assert!(validate(&Note { body: "TODO: ship".into() }).is_ok());
/// assert!(validate(&Note { body: "done".into() }).is_err());
/// ```
pub fn validate<T>(record: &T) -> Result<(), ValidationError>
where
    T: Validatable + ?Sized,
{
    DEFAULT.validate(record)
}

/// The process-wide default registry.
pub fn get() -> &'static Registry {
    DEFAULT.get()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::{FieldRules, FieldValue};

    struct Broken;

    impl Validatable for Broken {
        fn fields(&self) -> Vec<FieldRules<'_>> {
            vec![FieldRules::new("name", "x", "required,sparkly")]
        }
    }

    #[test]
    fn test_lazy_initialization() {
        let validator = Validator::new();
        assert!(!validator.is_initialized());
        let first: *const Registry = validator.get();
        assert!(validator.is_initialized());
        let second: *const Registry = validator.get();
        assert_eq!(first, second);
    }

    #[test]
    fn test_try_validate_reports_unknown_rule() {
        let err = Validator::new().try_validate(&Broken).unwrap_err();
        assert!(err.is_config());
    }

    #[test]
    #[should_panic(expected = "invalid rule declaration")]
    fn test_validate_panics_on_unknown_rule() {
        let _ = Validator::new().validate(&Broken);
    }

    #[test]
    #[should_panic(expected = "failed to register validation rules")]
    fn test_collision_aborts_initialization() {
        let validator = Validator::builder()
            .rule(RuleDef::new("dateAfter", |_: &FieldValue<'_>, _: &str| true))
            .build();
        let _ = validator.get();
    }

    #[test]
    fn test_builder_keeps_config() {
        let validator = Validator::builder()
            .config(ValidatorConfig::new().with_clock_skew_ms(7))
            .build();
        assert_eq!(validator.config().clock_skew_ms, 7);
    }
}
