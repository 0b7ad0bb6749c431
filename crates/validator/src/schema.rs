//! Validation schemas and form data
//!
//! A [`Schema`] maps each field name to its ordered rule list. Field order is
//! preserved so reports list fields the way the form declares them.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::SchemaError;
use crate::rules::Rule;
use crate::value::FieldValue;

static MISSING: FieldValue = FieldValue::Missing;

// ============================================================================
// SCHEMA
// ============================================================================

/// Field name → ordered rules.
///
/// # Examples
///
/// ```rust
/// use printdesk_validator::prelude::*;
///
/// let schema = Schema::new()
///     .field("name", [required()])
///     .field("age", [number(), min(18)]);
///
/// assert_eq!(schema.len(), 2);
/// assert_eq!(schema.rules("age").map(<[Rule]>::len), Some(2));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Schema {
    fields: IndexMap<String, Vec<Rule>>,
}

impl Schema {
    /// Creates an empty schema.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds (or replaces) a field, builder style.
    #[must_use = "builder methods must be chained or built"]
    pub fn field(mut self, name: impl Into<String>, rules: impl IntoIterator<Item = Rule>) -> Self {
        self.insert(name, rules);
        self
    }

    /// Adds (or replaces) a field.
    pub fn insert(&mut self, name: impl Into<String>, rules: impl IntoIterator<Item = Rule>) {
        self.fields
            .insert(name.into(), rules.into_iter().collect());
    }

    /// Rules for a field, if the schema declares it.
    #[must_use]
    pub fn rules(&self, name: &str) -> Option<&[Rule]> {
        self.fields.get(name).map(Vec::as_slice)
    }

    /// Iterates fields in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Rule])> {
        self.fields
            .iter()
            .map(|(name, rules)| (name.as_str(), rules.as_slice()))
    }

    /// Number of declared fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if no fields are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Parses a JSON schema and checks rule parameters.
    pub fn from_json_str(input: &str) -> Result<Self, SchemaError> {
        let schema: Self = serde_json::from_str(input)?;
        schema.check_rules()?;
        Ok(schema)
    }

    /// Parses a TOML schema and checks rule parameters.
    pub fn from_toml_str(input: &str) -> Result<Self, SchemaError> {
        let schema: Self = toml::from_str(input)?;
        schema.check_rules()?;
        Ok(schema)
    }

    /// Loads a schema file, picking the format from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SchemaError> {
        let path = path.as_ref();
        let parse: fn(&str) -> Result<Self, SchemaError> =
            match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => Self::from_json_str,
                Some("toml") => Self::from_toml_str,
                _ => return Err(SchemaError::UnsupportedFormat(path.to_path_buf())),
            };

        let contents = std::fs::read_to_string(path).map_err(|source| SchemaError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&contents)
    }

    /// Verifies every rule's own configuration.
    pub fn check_rules(&self) -> Result<(), SchemaError> {
        for (field, rules) in &self.fields {
            for rule in rules {
                rule.check_config()
                    .map_err(|reason| SchemaError::InvalidRule {
                        field: field.clone(),
                        rule: rule.kind(),
                        reason,
                    })?;
            }
        }
        Ok(())
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = (&'a String, &'a Vec<Rule>);
    type IntoIter = indexmap::map::Iter<'a, String, Vec<Rule>>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

// ============================================================================
// FORM DATA
// ============================================================================

/// Current values of a form, keyed by field name.
///
/// Reading a field that was never set yields [`FieldValue::Missing`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FormData {
    values: IndexMap<String, FieldValue>,
}

impl FormData {
    /// Creates empty form data.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a value, builder style.
    #[must_use = "builder methods must be chained or built"]
    pub fn with(mut self, name: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.insert(name, value);
        self
    }

    /// Sets a value.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<FieldValue>) {
        self.values.insert(name.into(), value.into());
    }

    /// Value of a field; absent keys read as missing.
    #[must_use]
    pub fn get(&self, name: &str) -> &FieldValue {
        self.values.get(name).unwrap_or(&MISSING)
    }

    /// Returns true if the field was set, even to a missing value.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }

    /// Number of set fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if nothing was set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Builds form data from a JSON object.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, SchemaError> {
        match value {
            serde_json::Value::Object(map) => Ok(map
                .iter()
                .map(|(name, value)| (name.clone(), FieldValue::from(value)))
                .collect()),
            other => Err(SchemaError::NotAnObject(json_type_name(other))),
        }
    }

    /// Parses a JSON object into form data.
    pub fn from_json_str(input: &str) -> Result<Self, SchemaError> {
        let value: serde_json::Value = serde_json::from_str(input)?;
        Self::from_json(&value)
    }
}

impl<K, V> FromIterator<(K, V)> for FormData
where
    K: Into<String>,
    V: Into<FieldValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ============================================================================
// TESTS
// ============================================================================
