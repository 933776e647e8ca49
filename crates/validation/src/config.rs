//! Validator configuration

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};

use crate::predicates::{DEFAULT_CLOCK_SKEW_MS, DateRules, NOW_KEYWORD};

/// Settings fixed when a [`Validator`](crate::Validator) is built.
///
/// Missing fields fall back to their defaults when deserializing.
///
/// # Examples
///
/// ```
/// use validation::ValidatorConfig;
///
/// let config = ValidatorConfig::from_json(r#"{ "clock_skew_ms": 250 }"#).unwrap();
/// assert_eq!(config.clock_skew_ms, 250);
/// assert_eq!(config.now_keyword, "now");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Tolerance, in milliseconds, applied to the `now` keyword by
    /// `dateAfter` (subtracted) and `dateBefore` (added).
    pub clock_skew_ms: u64,
    /// Parameter value that resolves to the evaluation instant.
    pub now_keyword: String,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            clock_skew_ms: DEFAULT_CLOCK_SKEW_MS as u64,
            now_keyword: NOW_KEYWORD.to_string(),
        }
    }
}

impl ValidatorConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the clock-skew tolerance.
    pub fn with_clock_skew_ms(mut self, millis: u64) -> Self {
        self.clock_skew_ms = millis;
        self
    }

    /// Sets the `now` keyword.
    pub fn with_now_keyword(mut self, keyword: impl Into<String>) -> Self {
        self.now_keyword = keyword.into();
        self
    }

    /// Reads a configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// The tolerance as a signed duration, saturating at `i64::MAX` ms.
    pub fn clock_skew(&self) -> TimeDelta {
        let millis = i64::try_from(self.clock_skew_ms).unwrap_or(i64::MAX);
        TimeDelta::try_milliseconds(millis).unwrap_or(TimeDelta::MAX)
    }

    /// The date rule evaluator for this configuration.
    pub fn date_rules(&self) -> DateRules {
        DateRules::new(self.clock_skew(), self.now_keyword.clone())
    }
}
