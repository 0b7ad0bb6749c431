use std::process::ExitCode;

use anyhow::{Context, Result};
use printdesk_theme::Theme;
use tracing::{error, info};

use crate::cli::ThemeArgs;

pub fn theme(args: &ThemeArgs) -> Result<ExitCode> {
    let mut theme = Theme::default();
    if let Some(path) = &args.tokens {
        let overrides = Theme::from_path(path)
            .with_context(|| format!("loading tokens {}", path.display()))?;
        theme.merge(overrides);
    }
    theme.validate().context("merged theme is invalid")?;

    let missing = theme.missing_required_variables();
    if !missing.is_empty() {
        error!(?missing, "theme does not define the required variables");
        return Ok(ExitCode::FAILURE);
    }

    let css = theme.to_css();
    match &args.out {
        Some(path) => {
            std::fs::write(path, &css)
                .with_context(|| format!("writing stylesheet {}", path.display()))?;
            info!(path = %path.display(), variables = theme.css_variables().len(), "stylesheet written");
        }
        None => print!("{css}"),
    }
    Ok(ExitCode::SUCCESS)
}
