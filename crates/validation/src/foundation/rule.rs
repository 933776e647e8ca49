//! Rule declarations and the tag syntax that carries them.
//!
//! A tag is a comma-separated list of rules. Each rule is a name, optionally
//! followed by `=` and a parameter:
//!
//! ```text
//! required,stringContains=example,dateAfter=2000-01-01
//! ```
//!
//! The parameter runs up to the next comma, so it cannot itself contain one.

use std::borrow::Cow;
use std::fmt;

use crate::foundation::ConfigError;

/// One rule reference: a registered rule name plus its parameter.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Rule {
    name: Cow<'static, str>,
    param: Option<Cow<'static, str>>,
}

impl Rule {
    /// Creates a rule without a parameter.
    pub fn new(name: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            param: None,
        }
    }

    /// Creates a rule with a parameter.
    pub fn with_param(
        name: impl Into<Cow<'static, str>>,
        param: impl Into<Cow<'static, str>>,
    ) -> Self {
        Self {
            name: name.into(),
            param: Some(param.into()),
        }
    }

    /// The rule name used for registry lookup.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared parameter, if any.
    #[must_use]
    pub fn param(&self) -> Option<&str> {
        self.param.as_deref()
    }

    /// The parameter as predicates see it: absent parameters read as `""`.
    #[must_use]
    pub fn param_or_empty(&self) -> &str {
        self.param.as_deref().unwrap_or("")
    }

    /// Parses a single `name[=param]` segment.
    pub fn parse(segment: &str) -> Result<Self, ConfigError> {
        let segment = segment.trim();
        let (name, param) = match segment.split_once('=') {
            Some((name, param)) => (name.trim(), Some(param)),
            None => (segment, None),
        };

        if name.is_empty() {
            return Err(ConfigError::MalformedTag {
                tag: segment.to_string(),
                reason: "rule name is empty",
            });
        }

        Ok(Self {
            name: Cow::Owned(name.to_string()),
            param: param.map(|p| Cow::Owned(p.to_string())),
        })
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.param {
            Some(param) => write!(f, "{}={}", self.name, param),
            None => f.write_str(&self.name),
        }
    }
}

/// Parses a full tag into its ordered rules.
///
/// An empty (or all-whitespace) tag declares no rules. Empty segments such
/// as `"required,,email"` are rejected.
///
/// # Examples
///
/// ```
/// use validation::foundation::parse_tag;
///
/// let rules = parse_tag("required,dateAfter=now").unwrap();
/// assert_eq!(rules.len(), 2);
/// assert_eq!(rules[1].name(), "dateAfter");
/// assert_eq!(rules[1].param(), Some("now"));
///
/// assert!(parse_tag("required,,email").is_err());
/// ```
pub fn parse_tag(tag: &str) -> Result<Vec<Rule>, ConfigError> {
    if tag.trim().is_empty() {
        return Ok(Vec::new());
    }

    tag.split(',')
        .map(|segment| {
            if segment.trim().is_empty() {
                Err(ConfigError::MalformedTag {
                    tag: tag.to_string(),
                    reason: "empty rule between commas",
                })
            } else {
                Rule::parse(segment)
            }
        })
        .collect()
}
