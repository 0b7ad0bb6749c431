//! Prelude module for convenient imports.
//!
//! `use printdesk_validator::prelude::*;` brings in the manager, the schema
//! types, the value model and every rule factory.
//!
//! # Examples
//!
//! ```rust
//! use printdesk_validator::prelude::*;
//!
//! let upload = [required(), file_type(["model/stl"]), file_size(50)];
//! let title = [required(), min_length(3), max_length(80)];
//! # let _ = (upload, title);
//! ```

pub use crate::error::{SchemaError, ValidationError};
pub use crate::manager::{FormReport, ValidationManager};
pub use crate::rules::{
    Rule, RuleOutcome, Validate, email, file_size, file_type, max, max_length, min, min_length,
    number, required,
};
pub use crate::schema::{FormData, Schema};
pub use crate::value::{FieldValue, FileInfo};
