//! Candidate values fed to the rule library
//!
//! Browser forms hand over loosely typed values: strings from inputs, numbers
//! from JSON payloads, `File` objects from upload fields, or nothing at all.
//! [`FieldValue`] models those shapes explicitly and provides the two
//! coercions the rules depend on: a length and a numeric reading that follows
//! the browser's `Number(...)` conversion.

use serde::{Deserialize, Serialize};

/// Metadata of an uploaded file, as exposed by the browser `File` API.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FileInfo {
    /// Original file name.
    #[serde(default)]
    pub name: String,
    /// MIME type reported by the browser, e.g. `model/stl`.
    #[serde(rename = "type")]
    pub mime_type: String,
    /// Size in bytes.
    pub size: u64,
}

impl FileInfo {
    /// Creates file metadata.
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            size,
        }
    }
}

/// A single form value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum FieldValue {
    /// No value was supplied (`undefined` / `null`).
    #[default]
    Missing,
    /// Text input.
    Text(String),
    /// Numeric input.
    Number(f64),
    /// Checkbox-style input.
    Bool(bool),
    /// File upload.
    File(FileInfo),
    /// Multi-value input (multi-select, repeated keys).
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Returns true for [`FieldValue::Missing`].
    #[must_use]
    pub fn is_missing(&self) -> bool {
        matches!(self, Self::Missing)
    }

    /// Returns true for the empty string. Whitespace is not trimmed.
    #[must_use]
    pub fn is_empty_text(&self) -> bool {
        matches!(self, Self::Text(s) if s.is_empty())
    }

    /// Returns the text, if this is a text value.
    #[must_use]
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s),
            _ => None,
        }
    }

    /// Returns the file metadata, if this is a file value.
    #[must_use]
    pub fn as_file(&self) -> Option<&FileInfo> {
        match self {
            Self::File(f) => Some(f),
            _ => None,
        }
    }

    /// Length of the value, for values that have one.
    ///
    /// Text is measured in UTF-16 code units, as browsers measure
    /// `input.value.length`, so an emoji outside the BMP counts as 2. Lists
    /// are measured by element count.
    /// Missing values, numbers, booleans and files have no length.
    #[must_use]
    pub fn length(&self) -> Option<usize> {
        match self {
            Self::Text(s) => Some(s.encode_utf16().count()),
            Self::List(items) => Some(items.len()),
            Self::Missing | Self::Number(_) | Self::Bool(_) | Self::File(_) => None,
        }
    }

    /// Numeric reading of the value, `NaN` when it does not convert.
    ///
    /// Mirrors the browser's `Number(value)`: text is trimmed, blank text is
    /// `0`, booleans are `0`/`1`, a single-element list converts its element.
    #[must_use]
    pub fn to_number(&self) -> f64 {
        match self {
            Self::Missing | Self::File(_) => f64::NAN,
            Self::Number(n) => *n,
            Self::Bool(b) => f64::from(u8::from(*b)),
            Self::Text(s) => parse_number(s),
            Self::List(items) => match items.as_slice() {
                [] => 0.0,
                [single] => single.to_number(),
                _ => f64::NAN,
            },
        }
    }
}

/// Parses text the way a browser converts a string to a number.
///
/// Accepts decimal and exponent notation, `Infinity` with an optional sign,
/// and unsigned `0x`/`0o`/`0b` integer literals. Blank input is `0`.
#[must_use]
pub fn parse_number(input: &str) -> f64 {
    let s = input.trim();
    if s.is_empty() {
        return 0.0;
    }

    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }

    let radix = match s.get(..2) {
        Some("0x" | "0X") => Some(16),
        Some("0o" | "0O") => Some(8),
        Some("0b" | "0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix).map_or(f64::NAN, |n| n as f64);
    }

    // `f64::from_str` also accepts "inf" and "nan", which browsers reject.
    let numeric_chars = s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'));
    if !numeric_chars {
        return f64::NAN;
    }

    s.parse::<f64>().unwrap_or(f64::NAN)
}

// ============================================================================
// CONVERSIONS
// ============================================================================

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        Self::Number(f64::from(value))
    }
}

impl From<u64> for FieldValue {
    fn from(value: u64) -> Self {
        Self::Number(value as f64)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<FileInfo> for FieldValue {
    fn from(value: FileInfo) -> Self {
        Self::File(value)
    }
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::Missing, Into::into)
    }
}

impl<T: Into<FieldValue>> From<Vec<T>> for FieldValue {
    fn from(value: Vec<T>) -> Self {
        Self::List(value.into_iter().map(Into::into).collect())
    }
}

impl From<&serde_json::Value> for FieldValue {
    /// Objects carrying a string `type` and a numeric `size` become files;
    /// any other object is kept as its JSON text.
    fn from(value: &serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Self::Missing,
            Value::Bool(b) => Self::Bool(*b),
            Value::Number(n) => n.as_f64().map_or(Self::Missing, Self::Number),
            Value::String(s) => Self::Text(s.clone()),
            Value::Array(items) => Self::List(items.iter().map(Self::from).collect()),
            Value::Object(_) => serde_json::from_value::<FileInfo>(value.clone())
                .map_or_else(|_| Self::Text(value.to_string()), Self::File),
        }
    }
}

impl From<serde_json::Value> for FieldValue {
    fn from(value: serde_json::Value) -> Self {
        Self::from(&value)
    }
}

// ============================================================================
// TESTS
// ============================================================================
