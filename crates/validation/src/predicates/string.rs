//! String predicates: `stringContains`, `email`, `url`.

use std::sync::LazyLock;

static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$"
    ).unwrap()
});

static URL_REGEX: LazyLock<regex::Regex> =
    LazyLock::new(|| regex::Regex::new(r"^https?://[^\s/$.?#].[^\s]*$").unwrap());

/// `stringContains`: true iff `needle` occurs in `value` as a contiguous,
/// case-sensitive substring. An empty needle is always contained.
///
/// # Examples
///
/// ```
/// use validation::predicates::string_contains;
///
/// assert!(string_contains("This is an example string", "example"));
/// assert!(!string_contains("This is an example string", "Example"));
/// assert!(string_contains("anything", ""));
/// ```
#[must_use]
pub fn string_contains(value: &str, needle: &str) -> bool {
    value.contains(needle)
}

/// `email`: a pragmatic address check, not a full RFC 5322 parser.
#[must_use]
pub fn is_email(value: &str) -> bool {
    EMAIL_REGEX.is_match(value)
}

/// `url`: an absolute `http` or `https` URL.
#[must_use]
pub fn is_url(value: &str) -> bool {
    URL_REGEX.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_string_contains() {
        assert!(string_contains("This is an example string", "example"));
        assert!(string_contains("example", "example"));
        assert!(!string_contains("This is not a valid string", "example"));
        assert!(!string_contains("", "x"));
        assert!(string_contains("", ""));
    }

    #[test]
    fn test_string_contains_is_codepoint_exact() {
        assert!(string_contains("naïve café", "é"));
        assert!(!string_contains("naive cafe", "é"));
        assert!(!string_contains("ABC", "abc"));
    }

    #[test]
    fn test_email() {
        assert!(is_email("user@example.com"));
        assert!(!is_email("invalid"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("user@"));
    }

    #[test]
    fn test_url() {
        assert!(is_url("http://example.com"));
        assert!(is_url("https://example.com/path"));
        assert!(!is_url("invalid"));
        assert!(!is_url("ftp://example.com"));
    }
}
