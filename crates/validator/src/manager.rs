//! Per-form validation state
//!
//! A [`ValidationManager`] belongs to exactly one form. It is created when the
//! form mounts, mutated by each validate call, and dropped (or [`reset`]) when
//! the form goes away. Nothing here is global.
//!
//! Each field moves through `untouched → touched-valid ⇄ touched-invalid`.
//! There is no terminal state.
//!
//! [`reset`]: ValidationManager::reset

use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::SchemaError;
use crate::rules::Rule;
use crate::schema::{FormData, Schema};
use crate::value::FieldValue;

/// Tracks touched fields and the current error of each field.
///
/// # Examples
///
/// ```rust
/// use printdesk_validator::prelude::*;
///
/// let mut form = ValidationManager::new();
/// let rules = [required(), min_length(3)];
///
/// assert!(!form.validate_field("name", &FieldValue::from("ab"), &rules));
/// assert_eq!(form.field_error("name"), Some("Must be at least 3 characters"));
///
/// assert!(form.validate_field("name", &FieldValue::from("abc"), &rules));
/// assert_eq!(form.field_error("name"), None);
/// assert!(form.is_field_touched("name"));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ValidationManager {
    errors: IndexMap<String, Option<String>>,
    touched: IndexSet<String>,
}

impl ValidationManager {
    /// Creates a manager with no recorded state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Validates one field and records the outcome.
    ///
    /// Rules run in order and stop at the first failure, whose message
    /// becomes the field's error. When every rule passes the field's error is
    /// cleared. Other fields are left alone.
    ///
    /// Returns whether the field is now valid.
    pub fn validate_field(&mut self, field: &str, value: &FieldValue, rules: &[Rule]) -> bool {
        self.touched.insert(field.to_owned());

        let failed = rules.iter().find(|rule| !rule.is_satisfied_by(value));
        let error = failed.map(Rule::message);

        match failed {
            Some(rule) => debug!(field, rule = rule.kind(), "field invalid"),
            None => debug!(field, rules = rules.len(), "field valid"),
        }

        let valid = error.is_none();
        self.errors.insert(field.to_owned(), error);
        valid
    }

    /// Validates every field of the schema against the form data.
    ///
    /// Previously recorded errors are discarded first, including those of
    /// fields the schema does not mention. Touched state is kept. A failure
    /// in one field never stops the others from being evaluated.
    ///
    /// Returns true iff every field passed.
    pub fn validate_form(&mut self, data: &FormData, schema: &Schema) -> bool {
        self.errors.clear();

        let mut valid = true;
        for (field, rules) in schema.iter() {
            if !self.validate_field(field, data.get(field), rules) {
                valid = false;
            }
        }

        info!(
            fields = schema.len(),
            errors = self.error_count(),
            valid,
            "form validated"
        );
        valid
    }

    /// Validates a JSON object as form data.
    ///
    /// # Errors
    ///
    /// Returns [`SchemaError::NotAnObject`] when `data` is not a JSON object.
    /// Invalid field values are not errors; they are recorded like any other.
    pub fn validate_json(
        &mut self,
        data: &serde_json::Value,
        schema: &Schema,
    ) -> Result<bool, SchemaError> {
        let form = FormData::from_json(data)?;
        Ok(self.validate_form(&form, schema))
    }

    /// Current error message of a field, if it has one.
    #[must_use]
    pub fn field_error(&self, field: &str) -> Option<&str> {
        self.errors.get(field).and_then(Option::as_deref)
    }

    /// Whether the field has been validated since the last reset.
    #[must_use]
    pub fn is_field_touched(&self, field: &str) -> bool {
        self.touched.contains(field)
    }

    /// Clears all errors and touched state.
    pub fn reset(&mut self) {
        self.errors.clear();
        self.touched.clear();
    }

    /// Iterates `(field, message)` for every field currently in error.
    pub fn errors(&self) -> impl Iterator<Item = (&str, &str)> {
        self.errors
            .iter()
            .filter_map(|(field, error)| Some((field.as_str(), error.as_deref()?)))
    }

    /// Number of fields currently in error.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.errors.values().filter(|e| e.is_some()).count()
    }

    /// Returns true when no field is currently in error.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.error_count() == 0
    }

    /// Snapshot of the current state, suitable for serialization.
    #[must_use]
    pub fn report(&self) -> FormReport {
        FormReport {
            valid: self.is_valid(),
            errors: self
                .errors()
                .map(|(field, message)| (field.to_owned(), message.to_owned()))
                .collect(),
        }
    }

    /// Consumes the manager, moving the recorded errors into a report.
    #[must_use]
    pub fn into_report(self) -> FormReport {
        let valid = self.is_valid();
        FormReport {
            valid,
            errors: self
                .errors
                .into_iter()
                .filter_map(|(field, error)| Some((field, error?)))
                .collect(),
        }
    }
}

/// Serializable summary of a validation pass.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormReport {
    /// True when no field is in error.
    pub valid: bool,
    /// Field → message, for fields in error only.
    pub errors: IndexMap<String, String>,
}
