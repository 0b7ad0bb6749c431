//! Error types for validation failures and schema loading
//!
//! A failed rule is data, not a fault: [`ValidationError`] carries a machine
//! code, the rendered English message and the parameters it was rendered
//! from. [`SchemaError`] covers the things that can actually go wrong while
//! loading schemas and form payloads.
//!
//! String fields use `Cow<'static, str>` so that static codes and messages
//! do not allocate.

use std::borrow::Cow;
use std::fmt;
use std::path::PathBuf;

// ============================================================================
// VALIDATION ERROR
// ============================================================================

/// A single rule failure.
///
/// # Examples
///
/// ```rust
/// use printdesk_validator::ValidationError;
///
/// let error = ValidationError::new("min_length", "Must be at least 3 characters")
///     .with_field("username")
///     .with_param("min", "3");
///
/// assert_eq!(error.param("min"), Some("3"));
/// assert_eq!(error.field.as_deref(), Some("username"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Error code for programmatic handling and i18n.
    ///
    /// Examples: "required", "min_length", "file_size"
    pub code: Cow<'static, str>,

    /// Human-readable error message in English.
    pub message: Cow<'static, str>,

    /// Form field the error was recorded against, if known.
    pub field: Option<Cow<'static, str>>,

    /// Parameters the message was rendered from, in insertion order.
    pub params: Vec<(Cow<'static, str>, Cow<'static, str>)>,
}

impl ValidationError {
    /// Creates a new validation error with a code and message.
    pub fn new(code: impl Into<Cow<'static, str>>, message: impl Into<Cow<'static, str>>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            field: None,
            params: Vec::new(),
        }
    }

    /// Sets the field name for this error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_field(mut self, field: impl Into<Cow<'static, str>>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Adds a parameter to the error.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_param(
        mut self,
        key: impl Into<Cow<'static, str>>,
        value: impl Into<Cow<'static, str>>,
    ) -> Self {
        self.params.push((key.into(), value.into()));
        self
    }

    /// Looks up a parameter value by key.
    #[must_use]
    pub fn param(&self, key: &str) -> Option<&str> {
        self.params
            .iter()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(field) = &self.field {
            write!(f, "[{}] {}: {}", field, self.code, self.message)
        } else {
            write!(f, "{}: {}", self.code, self.message)
        }
    }
}

impl std::error::Error for ValidationError {}

// ============================================================================
// SCHEMA ERROR
// ============================================================================

/// Errors raised while loading schemas or turning payloads into form data.
#[derive(Debug, thiserror::Error)]
pub enum SchemaError {
    /// The schema file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// JSON could not be parsed into a schema or form.
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML could not be parsed into a schema.
    #[error("invalid TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// The file extension does not map to a known format.
    #[error("unsupported schema format for {0} (expected .json or .toml)")]
    UnsupportedFormat(PathBuf),

    /// Form data must be a JSON object keyed by field name.
    #[error("form data must be a JSON object, got {0}")]
    NotAnObject(&'static str),

    /// A rule was configured with parameters it cannot work with.
    #[error("field '{field}': invalid rule '{rule}': {reason}")]
    InvalidRule {
        /// Field the rule belongs to.
        field: String,
        /// Rule kind, as written in the schema.
        rule: &'static str,
        /// What is wrong with it.
        reason: String,
    },
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_simple_error() {
        let error = ValidationError::new("required", "This field is required");
        assert_eq!(error.code, "required");
        assert_eq!(error.message, "This field is required");
        assert_eq!(error.to_string(), "required: This field is required");
    }

    #[test]
    fn test_error_with_field_display() {
        let error = ValidationError::new("email", "Please enter a valid email address")
            .with_field("contact");
        assert_eq!(
            error.to_string(),
            "[contact] email: Please enter a valid email address"
        );
    }

    #[test]
    fn test_error_params_keep_order() {
        let error = ValidationError::new("file_type", "File must be one of: a, b")
            .with_param("allowed", "a, b")
            .with_param("actual", "c");

        assert_eq!(error.param("allowed"), Some("a, b"));
        assert_eq!(error.param("actual"), Some("c"));
        assert_eq!(error.param("missing"), None);
        assert_eq!(error.params[0].0, "allowed");
    }

    #[test]
    fn test_zero_alloc_static_strings() {
        let error = ValidationError::new("required", "This field is required");
        assert!(matches!(error.code, Cow::Borrowed(_)));
        assert!(matches!(error.message, Cow::Borrowed(_)));
    }

    #[test]
    fn test_schema_error_messages() {
        let err = SchemaError::NotAnObject("array");
        assert_eq!(err.to_string(), "form data must be a JSON object, got array");

        let err = SchemaError::InvalidRule {
            field: "upload".into(),
            rule: "fileSize",
            reason: "maxMb must be greater than 0".into(),
        };
        assert!(err.to_string().contains("field 'upload'"));
    }
}
