//! `printdesk`: form validation, theme export and UI checks for the print
//! job pages.

mod cli;
mod commands;
mod config;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command};
use crate::config::ToolConfig;

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match &cli.command {
        Command::Validate(args) => commands::validate(args),
        Command::Theme(args) => commands::theme(args),
        Command::Health(args) => {
            let config = ToolConfig::load(cli.config.as_deref())?;
            commands::health(config, args).await
        }
        Command::Responsive(args) => {
            let config = ToolConfig::load(cli.config.as_deref())?;
            commands::responsive(config, args).await
        }
    }
}
