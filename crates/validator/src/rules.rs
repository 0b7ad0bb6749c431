//! The rule library
//!
//! Every rule is a small tagged configuration ([`Rule`]) interpreted by a
//! single dispatch function, [`Rule::check`]. Rules are pure: the same value
//! always produces the same [`RuleOutcome`].
//!
//! Messages are rendered centrally from the rule kind and its parameters so
//! that the displayed text stays identical wherever a rule is used.
//!
//! # Examples
//!
//! ```rust
//! use printdesk_validator::prelude::*;
//!
//! let outcome = min_length(3).check(&FieldValue::from("ab"));
//! assert!(!outcome.valid);
//! assert_eq!(outcome.message, "Must be at least 3 characters");
//! ```

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::value::FieldValue;

const BYTES_PER_MB: f64 = 1024.0 * 1024.0;

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid")
});

// ============================================================================
// VALIDATE TRAIT
// ============================================================================

/// The core trait for anything that checks a value.
///
/// Returns `Ok(())` when the input passes and the first failure otherwise.
pub trait Validate {
    /// The type of input being validated.
    type Input: ?Sized;

    /// Validates the input value.
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;
}

// ============================================================================
// RULE
// ============================================================================

/// A validity predicate with its configuration.
///
/// Serialized with an internal `kind` tag so schemas can be written by hand:
///
/// ```json
/// [{ "kind": "required" }, { "kind": "minLength", "min": 3 }]
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Rule {
    /// Value is present and not the empty string.
    Required,
    /// Value looks like `local@domain.tld`.
    Email,
    /// Value has at least `min` characters (or elements).
    MinLength {
        /// Inclusive lower bound.
        min: usize,
    },
    /// Value has at most `max` characters (or elements).
    MaxLength {
        /// Inclusive upper bound.
        max: usize,
    },
    /// File MIME type is one of `allowed`.
    FileType {
        /// Accepted MIME types, in display order.
        allowed: Vec<String>,
    },
    /// File is no larger than `max_mb` mebibytes.
    FileSize {
        /// Size limit in MB (1 MB = 1024 * 1024 bytes).
        max_mb: f64,
    },
    /// Value converts to a number and is not the empty string.
    Number,
    /// Numeric value is at least `min`.
    Min {
        /// Inclusive lower bound.
        min: f64,
    },
    /// Numeric value is at most `max`.
    Max {
        /// Inclusive upper bound.
        max: f64,
    },
}

/// Result record of applying one rule to one value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleOutcome {
    /// Whether the value satisfied the rule.
    pub valid: bool,
    /// The rule's user-facing message, present whether or not it passed.
    pub message: String,
}

impl Rule {
    /// Applies the rule to a value.
    #[must_use]
    pub fn check(&self, value: &FieldValue) -> RuleOutcome {
        RuleOutcome {
            valid: self.is_satisfied_by(value),
            message: self.message(),
        }
    }

    /// Evaluates the predicate without rendering a message.
    #[must_use]
    pub fn is_satisfied_by(&self, value: &FieldValue) -> bool {
        match self {
            Self::Required => !value.is_missing() && !value.is_empty_text(),
            Self::Email => value.as_text().is_some_and(|s| EMAIL_REGEX.is_match(s)),
            Self::MinLength { min } => value.length().is_some_and(|len| len >= *min),
            Self::MaxLength { max } => value.length().is_some_and(|len| len <= *max),
            Self::FileType { allowed } => value
                .as_file()
                .is_some_and(|file| allowed.iter().any(|t| *t == file.mime_type)),
            Self::FileSize { max_mb } => value
                .as_file()
                .is_some_and(|file| (file.size as f64) <= max_mb * BYTES_PER_MB),
            Self::Number => !value.is_empty_text() && !value.to_number().is_nan(),
            // NaN compares false, so unconvertible values fail both bounds.
            Self::Min { min } => value.to_number() >= *min,
            Self::Max { max } => value.to_number() <= *max,
        }
    }

    /// Schema name of the rule, as used in the `kind` tag.
    #[must_use]
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::MinLength { .. } => "minLength",
            Self::MaxLength { .. } => "maxLength",
            Self::FileType { .. } => "fileType",
            Self::FileSize { .. } => "fileSize",
            Self::Number => "number",
            Self::Min { .. } => "min",
            Self::Max { .. } => "max",
        }
    }

    /// Machine-readable error code.
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Required => "required",
            Self::Email => "email",
            Self::MinLength { .. } => "min_length",
            Self::MaxLength { .. } => "max_length",
            Self::FileType { .. } => "file_type",
            Self::FileSize { .. } => "file_size",
            Self::Number => "number",
            Self::Min { .. } => "min",
            Self::Max { .. } => "max",
        }
    }

    /// Parameters the message is rendered from.
    #[must_use]
    pub fn params(&self) -> Vec<(&'static str, String)> {
        match self {
            Self::Required | Self::Email | Self::Number => Vec::new(),
            Self::MinLength { min } => vec![("min", min.to_string())],
            Self::MaxLength { max } => vec![("max", max.to_string())],
            Self::FileType { allowed } => vec![("allowed", allowed.join(", "))],
            Self::FileSize { max_mb } => vec![("max_mb", format_number(*max_mb))],
            Self::Min { min } => vec![("min", format_number(*min))],
            Self::Max { max } => vec![("max", format_number(*max))],
        }
    }

    /// The user-facing failure message.
    #[must_use]
    pub fn message(&self) -> String {
        match self {
            Self::Required => "This field is required".to_owned(),
            Self::Email => "Please enter a valid email address".to_owned(),
            Self::MinLength { min } => format!("Must be at least {min} characters"),
            Self::MaxLength { max } => format!("Must be no more than {max} characters"),
            Self::FileType { allowed } => format!("File must be one of: {}", allowed.join(", ")),
            Self::FileSize { max_mb } => {
                format!("File size must be less than {}MB", format_number(*max_mb))
            }
            Self::Number => "Please enter a valid number".to_owned(),
            Self::Min { min } => format!("Must be at least {}", format_number(*min)),
            Self::Max { max } => format!("Must be no more than {}", format_number(*max)),
        }
    }

    /// Builds the structured error for a failure of this rule.
    #[must_use]
    pub fn to_error(&self) -> ValidationError {
        self.params().into_iter().fold(
            ValidationError::new(self.code(), self.message()),
            |err, (key, value)| err.with_param(key, value),
        )
    }

    /// Checks that the rule's own configuration is usable.
    ///
    /// # Errors
    ///
    /// Returns a description of the problem when a parameter is out of range.
    pub fn check_config(&self) -> Result<(), String> {
        match self {
            Self::FileType { allowed } if allowed.is_empty() => {
                Err("allowed must list at least one MIME type".to_owned())
            }
            Self::FileSize { max_mb } if !(max_mb.is_finite() && *max_mb > 0.0) => {
                Err(format!("maxMb must be a positive number, got {max_mb}"))
            }
            Self::Min { min: bound } | Self::Max { max: bound } if !bound.is_finite() => {
                Err(format!("bound must be a finite number, got {}", format_number(*bound)))
            }
            _ => Ok(()),
        }
    }
}

impl Validate for Rule {
    type Input = FieldValue;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        if self.is_satisfied_by(input) {
            Ok(())
        } else {
            Err(self.to_error())
        }
    }
}

/// An ordered rule list stops at the first failing rule.
impl Validate for [Rule] {
    type Input = FieldValue;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        self.iter().try_for_each(|rule| rule.validate(input))
    }
}

/// Formats a number the way browsers print it in template strings.
///
/// Digits are the shortest that round-trip. Magnitudes in `[1e-6, 1e21)`
/// are written out in full, anything else in exponent form (`1e+21`,
/// `1.5e-7`).
#[must_use]
pub fn format_number(value: f64) -> String {
    if value == 0.0 {
        // Covers -0.0, which browsers print as "0".
        return "0".to_owned();
    }
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }

    let scientific = format!("{:e}", value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i32>() else {
        return value.to_string();
    };
    let digits: String = mantissa.chars().filter(|c| *c != '.').collect();
    let k = digits.len() as i32;
    // Decimal point position: value = 0.digits * 10^n
    let n = exponent + 1;

    let body = if k <= n && n <= 21 {
        format!("{digits}{}", "0".repeat((n - k) as usize))
    } else if 0 < n && n <= 21 {
        let (int, frac) = digits.split_at(n as usize);
        format!("{int}.{frac}")
    } else if -6 < n && n <= 0 {
        format!("0.{}{digits}", "0".repeat((-n) as usize))
    } else {
        let (lead, rest) = digits.split_at(1);
        let sign = if exponent < 0 { '-' } else { '+' };
        if rest.is_empty() {
            format!("{lead}e{sign}{}", exponent.abs())
        } else {
            format!("{lead}.{rest}e{sign}{}", exponent.abs())
        }
    };

    if value < 0.0 { format!("-{body}") } else { body }
}

// ============================================================================
// FACTORIES
// ============================================================================

/// Value must be present and non-empty.
#[must_use]
pub const fn required() -> Rule {
    Rule::Required
}

/// Value must be an email address.
#[must_use]
pub const fn email() -> Rule {
    Rule::Email
}

/// Value must have at least `min` characters.
#[must_use]
pub const fn min_length(min: usize) -> Rule {
    Rule::MinLength { min }
}

/// Value must have at most `max` characters.
#[must_use]
pub const fn max_length(max: usize) -> Rule {
    Rule::MaxLength { max }
}

/// File MIME type must be one of `allowed`.
#[must_use]
pub fn file_type<I, S>(allowed: I) -> Rule
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    Rule::FileType {
        allowed: allowed.into_iter().map(Into::into).collect(),
    }
}

/// File must be no larger than `max_mb` MB.
#[must_use]
pub fn file_size(max_mb: impl Into<f64>) -> Rule {
    Rule::FileSize {
        max_mb: max_mb.into(),
    }
}

/// Value must be numeric.
#[must_use]
pub const fn number() -> Rule {
    Rule::Number
}

/// Numeric value must be at least `min`.
#[must_use]
pub fn min(min: impl Into<f64>) -> Rule {
    Rule::Min { min: min.into() }
}

/// Numeric value must be at most `max`.
#[must_use]
pub fn max(max: impl Into<f64>) -> Rule {
    Rule::Max { max: max.into() }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::FileInfo;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn text(s: &str) -> FieldValue {
        FieldValue::from(s)
    }

    #[rstest]
    #[case(text("a"), true)]
    #[case(text(" "), true)]
    #[case(FieldValue::from(0), true)]
    #[case(FieldValue::from(false), true)]
    #[case(text(""), false)]
    #[case(FieldValue::Missing, false)]
    fn test_required(#[case] value: FieldValue, #[case] valid: bool) {
        let outcome = required().check(&value);
        assert_eq!(outcome.valid, valid);
        assert_eq!(outcome.message, "This field is required");
    }

    #[rstest]
    #[case("ann@example.com", true)]
    #[case("a.b+c@shop.co.uk", true)]
    #[case("ann@example", false)]
    #[case("ann example@x.com", false)]
    #[case("@example.com", false)]
    #[case("ann@@example.com", false)]
    #[case("", false)]
    fn test_email(#[case] input: &str, #[case] valid: bool) {
        assert_eq!(email().check(&text(input)).valid, valid);
    }

    #[test]
    fn test_email_rejects_non_text() {
        assert!(!email().is_satisfied_by(&FieldValue::Missing));
        assert!(!email().is_satisfied_by(&FieldValue::from(5)));
    }

    #[rstest]
    #[case("abc", true)]
    #[case("ab", false)]
    #[case("日本語", true)]
    fn test_min_length(#[case] input: &str, #[case] valid: bool) {
        let outcome = min_length(3).check(&text(input));
        assert_eq!(outcome.valid, valid);
        assert_eq!(outcome.message, "Must be at least 3 characters");
    }

    #[test]
    fn test_length_rules_fail_without_length() {
        assert!(!min_length(0).is_satisfied_by(&FieldValue::Missing));
        assert!(!max_length(10).is_satisfied_by(&FieldValue::Missing));
        assert!(!max_length(10).is_satisfied_by(&FieldValue::from(3)));
    }

    #[test]
    fn test_max_length() {
        let rule = max_length(5);
        assert!(rule.is_satisfied_by(&text("hello")));
        assert!(!rule.is_satisfied_by(&text("hello!")));
        assert_eq!(rule.message(), "Must be no more than 5 characters");
    }

    #[test]
    fn test_file_type() {
        let rule = file_type(["model/stl", "application/sla"]);
        let stl = FieldValue::from(FileInfo::new("a.stl", "model/stl", 10));
        let png = FieldValue::from(FileInfo::new("a.png", "image/png", 10));

        assert!(rule.is_satisfied_by(&stl));
        assert!(!rule.is_satisfied_by(&png));
        assert!(!rule.is_satisfied_by(&text("model/stl")));
        assert_eq!(
            rule.message(),
            "File must be one of: model/stl, application/sla"
        );
    }

    #[test]
    fn test_file_size_boundary() {
        let rule = file_size(5);
        let exact = FieldValue::from(FileInfo::new("a.stl", "model/stl", 5 * 1024 * 1024));
        let over = FieldValue::from(FileInfo::new("a.stl", "model/stl", 5 * 1024 * 1024 + 1));
        let big = FieldValue::from(FileInfo::new("a.stl", "model/stl", 6_000_000));

        assert!(rule.is_satisfied_by(&exact));
        assert!(!rule.is_satisfied_by(&over));

        let outcome = rule.check(&big);
        assert!(!outcome.valid);
        assert_eq!(outcome.message, "File size must be less than 5MB");
    }

    #[test]
    fn test_file_size_fractional_limit() {
        assert_eq!(
            file_size(2.5).message(),
            "File size must be less than 2.5MB"
        );
    }

    #[rstest]
    #[case(text("42"), true)]
    #[case(text("4.2e1"), true)]
    #[case(text("  "), true)]
    #[case(FieldValue::from(7), true)]
    #[case(text(""), false)]
    #[case(text("forty"), false)]
    #[case(FieldValue::Missing, false)]
    fn test_number(#[case] value: FieldValue, #[case] valid: bool) {
        assert_eq!(number().check(&value).valid, valid);
    }

    #[test]
    fn test_min_max_bounds() {
        assert!(min(18).is_satisfied_by(&text("18")));
        assert!(!min(18).is_satisfied_by(&text("15")));
        assert!(!min(18).is_satisfied_by(&text("abc")));
        assert!(max(100).is_satisfied_by(&text("100")));
        assert!(!max(100).is_satisfied_by(&text("100.5")));
        assert!(!max(100).is_satisfied_by(&FieldValue::Missing));
        assert_eq!(min(18).message(), "Must be at least 18");
        assert_eq!(max(0.5).message(), "Must be no more than 0.5");
    }

    #[test]
    fn test_rule_list_stops_at_first_failure() {
        let rules = [required(), min_length(3), email()];
        let err = rules[..].validate(&text("")).unwrap_err();
        assert_eq!(err.code, "required");

        let err = rules[..].validate(&text("ab")).unwrap_err();
        assert_eq!(err.code, "min_length");
        assert_eq!(err.param("min"), Some("3"));
    }

    #[test]
    fn test_to_error_carries_params() {
        let err = file_type(["a/b", "c/d"]).to_error();
        assert_eq!(err.code, "file_type");
        assert_eq!(err.param("allowed"), Some("a/b, c/d"));
    }

    #[test]
    fn test_serde_tagged_roundtrip_names() {
        let rules: Vec<Rule> = serde_json::from_str(
            r#"[
                {"kind": "required"},
                {"kind": "minLength", "min": 3},
                {"kind": "fileSize", "maxMb": 50},
                {"kind": "fileType", "allowed": ["model/stl"]}
            ]"#,
        )
        .unwrap();

        assert_eq!(
            rules,
            vec![
                required(),
                min_length(3),
                file_size(50),
                file_type(["model/stl"])
            ]
        );
        assert_eq!(rules[1].kind(), "minLength");
    }

    #[test]
    fn test_check_config() {
        assert!(file_size(0).check_config().is_err());
        assert!(file_size(f64::NAN).check_config().is_err());
        assert!(file_type(Vec::<String>::new()).check_config().is_err());
        assert!(min(f64::NAN).check_config().is_err());
        assert!(min_length(3).check_config().is_ok());
    }

    #[rstest]
    #[case(min(f64::INFINITY))]
    #[case(min(f64::NEG_INFINITY))]
    #[case(max(f64::NEG_INFINITY))]
    #[case(max(f64::INFINITY))]
    fn test_check_config_rejects_infinite_bounds(#[case] rule: Rule) {
        let err = rule.check_config().unwrap_err();
        assert!(err.contains("finite"), "{err}");
    }

    #[test]
    fn test_check_config_accepts_finite_bounds() {
        assert!(min(-1e300).check_config().is_ok());
        assert!(max(0).check_config().is_ok());
    }

    #[rstest]
    #[case(5.0, "5")]
    #[case(2.5, "2.5")]
    #[case(-3.0, "-3")]
    #[case(0.1, "0.1")]
    #[case(f64::INFINITY, "Infinity")]
    #[case(f64::NEG_INFINITY, "-Infinity")]
    #[case(-0.0, "0")]
    #[case(123_456.789, "123456.789")]
    #[case(1e20, "100000000000000000000")]
    #[case(1e21, "1e+21")]
    #[case(1.5e22, "1.5e+22")]
    #[case(-2e25, "-2e+25")]
    #[case(0.000_001, "0.000001")]
    #[case(1e-7, "1e-7")]
    #[case(1.25e-7, "1.25e-7")]
    fn test_format_number(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_number(value), expected);
    }
}
