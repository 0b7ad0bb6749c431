use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use printdesk_uicheck::health::run_health_check;
use printdesk_uicheck::responsive::run_responsive_tests;
use printdesk_uicheck::{BrowserOptions, CheckError, HealthReport, WebDriverPage, write_report};
use tracing::{error, info, warn};

use crate::cli::CheckArgs;
use crate::config::ToolConfig;

const HEALTH_REPORT: &str = "health-report.json";
const RESPONSIVE_REPORT: &str = "test-results.json";

fn apply_flags(config: ToolConfig, args: &CheckArgs) -> ToolConfig {
    config
        .with_base_url(args.base_url.as_deref())
        .with_webdriver(args.webdriver.as_deref())
}

fn report_path(args: &CheckArgs, default: &str) -> PathBuf {
    args.out.clone().unwrap_or_else(|| PathBuf::from(default))
}

async fn write(path: &Path, report: &(impl serde::Serialize + Sync)) -> Result<()> {
    write_report(path, report)
        .await
        .with_context(|| format!("writing report {}", path.display()))
}

pub async fn health(config: ToolConfig, args: &CheckArgs) -> Result<ExitCode> {
    let config = apply_flags(config, args);
    let out = report_path(args, HEALTH_REPORT);
    info!(base_url = %config.health.base_url, "starting CSS health check");

    let report = match WebDriverPage::connect(&config.webdriver_url, &BrowserOptions::default()).await {
        Ok(page) => run_health_check(&page, &config.health).await,
        Err(err) => {
            error!(webdriver = %config.webdriver_url, error = %err, "cannot start browser session");
            HealthReport::aborted(err)
        }
    };
    write(&out, &report).await?;

    let summary = &report.summary;
    println!("CSS files accessible: {}", summary.css_files_accessible);
    println!("Performance healthy:  {}", summary.performance_healthy);
    println!("Accessibility score:  {:.1}/4", summary.accessibility_score);
    if report.has_failures() {
        warn!("health check found issues");
    } else {
        info!("CSS architecture is healthy");
    }
    Ok(super::exit_code(!report.has_failures()))
}

pub async fn responsive(config: ToolConfig, args: &CheckArgs) -> Result<ExitCode> {
    let config = apply_flags(config, args);
    let out = report_path(args, RESPONSIVE_REPORT);
    info!(
        base_url = %config.responsive.base_url,
        breakpoints = config.responsive.breakpoints.len(),
        "starting responsive suite"
    );

    let page = WebDriverPage::connect(&config.webdriver_url, &BrowserOptions::default())
        .await
        .with_context(|| format!("cannot start browser session at {}", config.webdriver_url))?;

    let report = match run_responsive_tests(&page, &config.responsive).await {
        Ok(report) => report,
        Err(CheckError::CssLoadingFailed(reason)) => {
            error!(%reason, "CSS did not load, skipping breakpoints");
            return Ok(ExitCode::FAILURE);
        }
        Err(err) => return Err(err).context("responsive suite aborted"),
    };
    write(&out, &report).await?;

    let summary = &report.summary;
    println!(
        "{}/{} breakpoints passed ({:.1}%)",
        summary.passed, summary.total, summary.success_rate
    );
    Ok(super::exit_code(!report.has_failures()))
}
