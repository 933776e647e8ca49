//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use validation::prelude::*;
//! ```

pub use crate::config::ValidatorConfig;
pub use crate::foundation::{
    ConfigError, Error, FailureKind, FieldRules, FieldValue, Rule, Validatable, ValidationError,
    ValidationFailure, ValidationResult, ValueKind,
};
pub use crate::registry::{Registry, RuleDef};
pub use crate::validatable;
pub use crate::validator::{Validator, get, validate};
