//! # validation
//!
//! Declarative struct-field validation backed by a registry of named rules.
//!
//! ## Quick Start
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use validation::{validatable, validate};
//!
//! struct Event {
//!     name: String,
//!     starts: chrono::DateTime<Utc>,
//! }
//!
//! validatable!(Event {
//!     name => "required,stringContains=example",
//!     starts => "dateAfter=2000-01-01,dateBefore=2030-01-01",
//! });
//!
//! let event = Event {
//!     name: "an example event".to_string(),
//!     starts: Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap(),
//! };
//! assert!(validate(&event).is_ok());
//! ```
//!
//! ## Rules
//!
//! Tags list rules separated by commas, each `name` or `name=param`:
//!
//! - **Custom**: `stringContains=sub`, `dateAfter=<date|now>`, `dateBefore=<date|now>`
//! - **Built-in**: `required`, `len=n`, `min=n`, `max=n`, `email`, `url`
//!
//! `now` is widened by a 100ms clock-skew tolerance (configurable through
//! [`ValidatorConfig`]) so that a timestamp taken just before validation
//! satisfies both `dateAfter=now` and `dateBefore=now`.
//!
//! ## Entry points
//!
//! - [`Validator`]: an explicitly constructed validator whose registry is
//!   built once on first use. Share it by reference.
//! - [`validate`] / [`get`]: the same over a process-wide default instance.

pub mod config;
pub mod foundation;
mod macros;
pub mod predicates;
pub mod prelude;
pub mod registry;
pub mod validator;

pub use config::ValidatorConfig;
pub use foundation::{
    ConfigError, Error, FailureKind, FieldRules, FieldValue, Rule, Validatable, ValidationError,
    ValidationFailure, ValueKind,
};
pub use registry::{Registry, RegistryBuilder, RegistryError, RuleDef};
pub use validator::{Validator, ValidatorBuilder, get, validate};
