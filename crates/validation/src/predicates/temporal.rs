//! Date comparison rules: `dateAfter` and `dateBefore`.
//!
//! The bound is either a date string, parsed by [`parse_any`], or the
//! `now` keyword. `now` is widened by a clock-skew tolerance in the
//! permissive direction: `dateAfter=now` compares against `now - skew` and
//! `dateBefore=now` against `now + skew`, so a field stamped with the
//! current instant just before validation passes both.
//!
//! Both comparisons are inclusive.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta, Utc};

/// Default tolerance applied to the `now` keyword, in milliseconds.
pub const DEFAULT_CLOCK_SKEW_MS: i64 = 100;

/// Default keyword resolving to the evaluation instant.
pub const NOW_KEYWORD: &str = "now";

// ============================================================================
// PERMISSIVE PARSER
// ============================================================================

const NAIVE_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
    "%Y/%m/%d %H:%M:%S%.f",
    "%Y/%m/%d %H:%M",
    "%m/%d/%Y %H:%M:%S%.f",
    "%m/%d/%Y %H:%M",
];

const OFFSET_DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S%.f %z",
    "%Y-%m-%d %H:%M:%S%.f%z",
    "%Y-%m-%dT%H:%M:%S%.f%z",
];

const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%m/%d/%Y",
    "%d %B %Y",
    "%B %d, %Y",
    "%B %d %Y",
    "%d-%b-%Y",
];

/// Parses a date or timestamp without being told its format.
///
/// Accepts RFC 3339, RFC 2822, common `Y-M-D` / `M/D/Y` layouts with or
/// without a time part, and month names.
///
/// All-digit input is read by length: 4 digits is a year, 6 `YYYYMM`,
/// 8 `YYYYMMDD`, 12 `YYYYMMDDhhmm` and 14 `YYYYMMDDhhmmss`. 10, 13, 16 and
/// 19 digits are unix timestamps in seconds, milliseconds, microseconds and
/// nanoseconds. Any other length is rejected. Values without an offset are
/// taken as UTC.
///
/// # Examples
///
/// ```
/// use validation::predicates::parse_any;
///
/// assert!(parse_any("2030-01-01").is_some());
/// assert!(parse_any("2030-01-01T10:00:00+02:00").is_some());
/// assert!(parse_any("January 2, 2006").is_some());
/// assert!(parse_any("1700000000").is_some());
/// assert!(parse_any("next tuesday").is_none());
/// ```
pub fn parse_any(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }

    if input.bytes().all(|b| b.is_ascii_digit()) {
        return parse_digits(input);
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(input) {
        return Some(dt.with_timezone(&Utc));
    }

    OFFSET_DATETIME_FORMATS
        .iter()
        .find_map(|fmt| DateTime::parse_from_str(input, fmt).ok())
        .map(|dt| dt.with_timezone(&Utc))
        .or_else(|| {
            NAIVE_DATETIME_FORMATS
                .iter()
                .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
                .map(|dt| dt.and_utc())
        })
        .or_else(|| {
            DATE_FORMATS
                .iter()
                .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
                .map(|d| d.and_time(chrono::NaiveTime::MIN).and_utc())
        })
}

fn parse_digits(input: &str) -> Option<DateTime<Utc>> {
    let midnight = |d: NaiveDate| d.and_time(chrono::NaiveTime::MIN).and_utc();
    let field = |range: std::ops::Range<usize>| input.get(range)?.parse::<u32>().ok();

    match input.len() {
        4 => NaiveDate::from_ymd_opt(input.parse().ok()?, 1, 1).map(midnight),
        6 => NaiveDate::from_ymd_opt(input[..4].parse().ok()?, field(4..6)?, 1).map(midnight),
        8 => NaiveDate::parse_from_str(input, "%Y%m%d").ok().map(midnight),
        12 => NaiveDateTime::parse_from_str(input, "%Y%m%d%H%M")
            .ok()
            .map(|dt| dt.and_utc()),
        14 => NaiveDateTime::parse_from_str(input, "%Y%m%d%H%M%S")
            .ok()
            .map(|dt| dt.and_utc()),
        10 => DateTime::from_timestamp(input.parse().ok()?, 0),
        13 => DateTime::from_timestamp_millis(input.parse().ok()?),
        16 => DateTime::from_timestamp_micros(input.parse().ok()?),
        19 => Some(DateTime::from_timestamp_nanos(input.parse().ok()?)),
        _ => None,
    }
}

// ============================================================================
// DATE RULES
// ============================================================================

/// Evaluates `dateAfter` / `dateBefore` with a given skew and keyword.
///
/// The registry builds one of these from
/// [`ValidatorConfig`](crate::ValidatorConfig); the free functions
/// [`date_after`] and [`date_before`] use [`DateRules::default`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DateRules {
    skew: TimeDelta,
    now_keyword: Cow<'static, str>,
}

impl DateRules {
    /// Creates an evaluator with an explicit skew and `now` keyword.
    pub fn new(skew: TimeDelta, now_keyword: impl Into<Cow<'static, str>>) -> Self {
        Self {
            skew,
            now_keyword: now_keyword.into(),
        }
    }

    /// The tolerance applied to the `now` keyword.
    #[must_use]
    pub fn skew(&self) -> TimeDelta {
        self.skew
    }

    /// The keyword resolving to the evaluation instant.
    #[must_use]
    pub fn now_keyword(&self) -> &str {
        &self.now_keyword
    }

    fn is_now(&self, param: &str) -> bool {
        param.trim() == self.now_keyword
    }

    /// Lower bound for `dateAfter`; `None` if the parameter is unparsable.
    ///
    /// A skew reaching past the representable range clamps to the earliest
    /// instant.
    #[must_use]
    pub fn after_bound(&self, param: &str) -> Option<DateTime<Utc>> {
        if self.is_now(param) {
            Some(
                Utc::now()
                    .checked_sub_signed(self.skew)
                    .unwrap_or(DateTime::<Utc>::MIN_UTC),
            )
        } else {
            parse_any(param)
        }
    }

    /// Upper bound for `dateBefore`; `None` if the parameter is unparsable.
    ///
    /// Clamps to the latest instant when the skew overflows.
    #[must_use]
    pub fn before_bound(&self, param: &str) -> Option<DateTime<Utc>> {
        if self.is_now(param) {
            Some(
                Utc::now()
                    .checked_add_signed(self.skew)
                    .unwrap_or(DateTime::<Utc>::MAX_UTC),
            )
        } else {
            parse_any(param)
        }
    }

    /// True iff `value` is on or after the bound.
    #[must_use]
    pub fn is_after(&self, value: DateTime<Utc>, param: &str) -> bool {
        self.after_bound(param).is_some_and(|bound| value >= bound)
    }

    /// True iff `value` is on or before the bound.
    #[must_use]
    pub fn is_before(&self, value: DateTime<Utc>, param: &str) -> bool {
        self.before_bound(param).is_some_and(|bound| value <= bound)
    }

    /// True if `param` is the keyword or a parsable date.
    #[must_use]
    pub fn is_valid_param(&self, param: &str) -> bool {
        self.is_now(param) || parse_any(param).is_some()
    }
}

impl Default for DateRules {
    fn default() -> Self {
        Self::new(
            TimeDelta::milliseconds(DEFAULT_CLOCK_SKEW_MS),
            Cow::Borrowed(NOW_KEYWORD),
        )
    }
}

/// `dateAfter`: true iff `value >= bound`.
///
/// `param == "now"` resolves to the current time minus 100ms. Any other
/// parameter goes through [`parse_any`]; an unparsable one yields `false`.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use validation::predicates::date_after;
///
/// let t = Utc.with_ymd_and_hms(2022, 1, 1, 0, 0, 0).unwrap();
/// assert!(date_after(t, "2000-01-01"));
/// assert!(!date_after(t, "2030-01-01"));
/// assert!(!date_after(t, "not a date"));
/// ```
#[must_use]
pub fn date_after(value: DateTime<Utc>, param: &str) -> bool {
    DateRules::default().is_after(value, param)
}

/// `dateBefore`: true iff `value <= bound`.
///
/// `param == "now"` resolves to the current time plus 100ms. Any other
/// parameter goes through [`parse_any`]; an unparsable one yields `false`.
#[must_use]
pub fn date_before(value: DateTime<Utc>, param: &str) -> bool {
    DateRules::default().is_before(value, param)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rstest::rstest;

    fn ymd(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap()
    }

    #[rstest]
    #[case("2030-01-01", ymd(2030, 1, 1))]
    #[case("2030/01/01", ymd(2030, 1, 1))]
    #[case("2030.01.01", ymd(2030, 1, 1))]
    #[case("01/31/2030", ymd(2030, 1, 31))]
    #[case("20300101", ymd(2030, 1, 1))]
    #[case("31 January 2030", ymd(2030, 1, 31))]
    #[case("January 31, 2030", ymd(2030, 1, 31))]
    #[case("31-Jan-2030", ymd(2030, 1, 31))]
    #[case("  2030-01-01  ", ymd(2030, 1, 1))]
    #[case("2030-01-01T00:00:00Z", ymd(2030, 1, 1))]
    #[case("2030-01-01T02:00:00+02:00", ymd(2030, 1, 1))]
    #[case("2030-01-01 00:00:00", ymd(2030, 1, 1))]
    #[case("2030-01-01 00:00:00.000", ymd(2030, 1, 1))]
    #[case("2030-01-01T00:00", ymd(2030, 1, 1))]
    #[case("Tue, 01 Jan 2030 00:00:00 +0000", ymd(2030, 1, 1))]
    #[case("1893456000", ymd(2030, 1, 1))]
    #[case("1893456000000", ymd(2030, 1, 1))]
    #[case("2030", ymd(2030, 1, 1))]
    #[case("203001", ymd(2030, 1, 1))]
    #[case("203002011530", Utc.with_ymd_and_hms(2030, 2, 1, 15, 30, 0).unwrap())]
    #[case("20300101000000", ymd(2030, 1, 1))]
    fn test_parse_any_formats(#[case] input: &str, #[case] expected: DateTime<Utc>) {
        assert_eq!(parse_any(input), Some(expected));
    }

    #[rstest]
    #[case("")]
    #[case("now")]
    #[case("tomorrow")]
    #[case("2030-13-01")]
    #[case("2030-02-30")]
    #[case("99999999")]
    #[case("203013")]
    #[case("12345")]
    #[case("123456789")]
    fn test_parse_any_rejects(#[case] input: &str) {
        assert_eq!(parse_any(input), None);
    }

    #[test]
    fn test_date_after_fixed_bound_is_inclusive() {
        assert!(date_after(ymd(2000, 1, 1), "2000-01-01"));
        assert!(date_after(ymd(2022, 1, 1), "2000-01-01"));
        assert!(!date_after(ymd(1999, 1, 1), "2000-01-01"));
    }

    #[test]
    fn test_date_before_fixed_bound_is_inclusive() {
        assert!(date_before(ymd(2030, 1, 1), "2030-01-01"));
        assert!(date_before(ymd(2022, 1, 1), "2030-01-01"));
        assert!(!date_before(ymd(2040, 1, 1), "2030-01-01"));
    }

    #[test]
    fn test_bare_year_bound() {
        assert!(date_before(ymd(2022, 1, 1), "2030"));
        assert!(!date_after(ymd(2022, 1, 1), "2030"));
        assert!(date_after(ymd(2030, 6, 1), "203006"));
    }

    #[test]
    fn test_oversized_skew_clamps_bounds() {
        let rules = DateRules::new(TimeDelta::MAX, NOW_KEYWORD);
        assert_eq!(rules.after_bound("now"), Some(DateTime::<Utc>::MIN_UTC));
        assert_eq!(rules.before_bound("now"), Some(DateTime::<Utc>::MAX_UTC));
        assert!(rules.is_after(ymd(1900, 1, 1), "now"));
        assert!(rules.is_before(ymd(2200, 1, 1), "now"));
    }

    #[test]
    fn test_unparsable_bound_fails_both() {
        let t = ymd(2022, 1, 1);
        assert!(!date_after(t, "someday"));
        assert!(!date_before(t, "someday"));
        assert!(!date_after(t, ""));
        assert!(!date_before(t, ""));
    }

    #[test]
    fn test_now_with_skew() {
        let now = Utc::now();
        assert!(date_after(now, "now"));
        assert!(date_before(now, "now"));
        assert!(date_after(now - TimeDelta::milliseconds(50), "now"));
        assert!(date_before(now + TimeDelta::milliseconds(50), "now"));
    }

    #[test]
    fn test_now_outside_skew() {
        let now = Utc::now();
        assert!(!date_after(now - TimeDelta::seconds(1), "now"));
        assert!(!date_before(now + TimeDelta::seconds(1), "now"));
        assert!(!date_after(now - TimeDelta::minutes(1), "now"));
        assert!(!date_before(now + TimeDelta::minutes(1), "now"));
    }

    #[test]
    fn test_custom_skew_and_keyword() {
        let rules = DateRules::new(TimeDelta::seconds(5), "today");
        let now = Utc::now();
        assert!(rules.is_after(now - TimeDelta::seconds(2), "today"));
        assert!(rules.is_before(now + TimeDelta::seconds(2), "today"));
        assert!(!rules.is_after(now, "now"));
        assert!(rules.is_valid_param("today"));
        assert!(!rules.is_valid_param("now"));
    }

    #[test]
    fn test_valid_param() {
        let rules = DateRules::default();
        assert!(rules.is_valid_param("now"));
        assert!(rules.is_valid_param("2000-01-01"));
        assert!(!rules.is_valid_param("soon"));
        assert_eq!(rules.skew(), TimeDelta::milliseconds(100));
        assert_eq!(rules.now_keyword(), "now");
    }
}
