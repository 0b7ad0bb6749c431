//! # printdesk-validator
//!
//! Form validation for the PrintDesk job submission UI.
//!
//! ## Quick Start
//!
//! ```rust
//! use printdesk_validator::prelude::*;
//!
//! let schema = Schema::new()
//!     .field("name", [required()])
//!     .field("age", [number(), min(18)]);
//! let data = FormData::new().with("name", "Ann").with("age", "15");
//!
//! let mut form = ValidationManager::new();
//! assert!(!form.validate_form(&data, &schema));
//! assert_eq!(form.field_error("name"), None);
//! assert_eq!(form.field_error("age"), Some("Must be at least 18"));
//! ```
//!
//! ## Building blocks
//!
//! - [`Rule`](rules::Rule): tagged rule configuration with a single dispatch
//!   ([`Rule::check`](rules::Rule::check)); factories such as
//!   [`min_length`](rules::min_length) mirror the rule names.
//! - [`ValidationManager`](manager::ValidationManager): touched/error state of
//!   one form.
//! - [`Schema`](schema::Schema) / [`FormData`](schema::FormData): ordered
//!   field maps, loadable from JSON or TOML.
//! - [`FieldValue`](value::FieldValue): the candidate value, with browser-like
//!   numeric coercion.

pub mod error;
pub mod manager;
pub mod prelude;
pub mod rules;
pub mod schema;
pub mod value;

pub use error::{SchemaError, ValidationError};
pub use manager::{FormReport, ValidationManager};
pub use rules::{Rule, RuleOutcome, Validate};
pub use schema::{FormData, Schema};
pub use value::{FieldValue, FileInfo};
