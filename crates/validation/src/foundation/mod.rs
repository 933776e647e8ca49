//! Core validation types and traits
//!
//! - **Values**: [`FieldValue`], [`ValueKind`]
//! - **Declarations**: [`Rule`], [`parse_tag`], [`FieldRules`], [`Validatable`]
//! - **Errors**: [`ValidationFailure`], [`ValidationError`], [`ConfigError`], [`Error`]

pub mod error;
pub mod rule;
pub mod traits;
pub mod value;

pub use error::{ConfigError, Error, FailureKind, ValidationError, ValidationFailure};
pub use rule::{Rule, parse_tag};
pub use traits::{FieldRules, Validatable};
pub use value::{FieldValue, ValueKind};

/// A validation result carrying every failure of one pass.
pub type ValidationResult<T> = Result<T, ValidationError>;
