use std::process::ExitCode;

use anyhow::{Context, Result};
use printdesk_validator::{Schema, ValidationManager};
use tracing::info;

use crate::cli::ValidateArgs;

pub fn validate(args: &ValidateArgs) -> Result<ExitCode> {
    let schema = Schema::from_path(&args.schema)
        .with_context(|| format!("loading schema {}", args.schema.display()))?;
    let raw = std::fs::read_to_string(&args.data)
        .with_context(|| format!("reading form data {}", args.data.display()))?;
    let data: serde_json::Value = serde_json::from_str(&raw)
        .with_context(|| format!("parsing form data {}", args.data.display()))?;

    let mut form = ValidationManager::new();
    let valid = form
        .validate_json(&data, &schema)
        .context("form data rejected")?;
    let report = form.report();
    info!(fields = schema.len(), errors = report.errors.len(), "validation finished");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else if valid {
        println!("valid");
    } else {
        for (field, message) in &report.errors {
            println!("{field}: {message}");
        }
    }
    Ok(super::exit_code(valid))
}
