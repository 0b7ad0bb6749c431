//! Command-line arguments.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// PrintDesk front-end tooling: form validation, theme export and UI checks.
#[derive(Parser, Debug)]
#[command(name = "printdesk", version, about, long_about = None)]
pub struct Cli {
    /// Config file (TOML). Defaults to `printdesk.toml` when present.
    #[arg(long, global = true, env = "PRINTDESK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable debug logging. `RUST_LOG` takes precedence.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Validate form data against a schema.
    Validate(ValidateArgs),
    /// Export the design tokens as CSS custom properties.
    Theme(ThemeArgs),
    /// Run the CSS health check against a running server.
    Health(CheckArgs),
    /// Run the responsive suite against a running server.
    Responsive(CheckArgs),
}

#[derive(Args, Debug)]
pub struct ValidateArgs {
    /// Schema file (`.json` or `.toml`).
    #[arg(long)]
    pub schema: PathBuf,

    /// Form data as a JSON object.
    #[arg(long)]
    pub data: PathBuf,

    /// Print the report as JSON.
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct ThemeArgs {
    /// Token overrides (`.json` or `.toml`) merged over the built-in theme.
    #[arg(long)]
    pub tokens: Option<PathBuf>,

    /// Write the stylesheet here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Server under test, e.g. `http://localhost:5000`.
    #[arg(long)]
    pub base_url: Option<String>,

    /// WebDriver endpoint, e.g. `http://localhost:9515`.
    #[arg(long)]
    pub webdriver: Option<String>,

    /// Report path.
    #[arg(long)]
    pub out: Option<PathBuf>,
}
