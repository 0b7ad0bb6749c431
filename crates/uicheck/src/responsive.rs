//! Responsive breakpoint suite.
//!
//! After a stylesheet pre-check, every breakpoint gets a tab bar scrolling
//! test and a modal stacking test. A failing breakpoint is recorded and the
//! suite moves on; only the pre-check can abort the run.

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::{Breakpoint, ResponsiveConfig};
use crate::driver::{NavigateOptions, PageDriver};
use crate::error::{CheckError, DriverError};
use crate::scripts::{self, ElementStyle, RootProperties, ScrollMetrics};
use crate::report::{TestStatus, rfc3339_millis};

const SCROLL_TEST_OFFSET: u32 = 100;
const AFTER_SCROLL: Duration = Duration::from_millis(500);
const AFTER_CLICK: Duration = Duration::from_millis(300);
const AFTER_MODAL_OPEN: Duration = Duration::from_millis(500);
const AFTER_MODAL_CLOSE: Duration = Duration::from_millis(300);
const CONSOLE_GRACE: Duration = Duration::from_secs(1);
const BETWEEN_BREAKPOINTS: Duration = Duration::from_secs(1);

// ============================================================================
// RESULT TYPES
// ============================================================================

/// The root custom properties read by the stylesheet pre-check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CssVariables {
    /// `--color-primary`.
    pub primary_color: String,
    /// `--spacing-md`.
    pub spacing_md: String,
    /// `--radius-md`.
    pub radius_md: String,
}

impl CssVariables {
    fn from_properties(props: &RootProperties) -> Self {
        let read = |name: &str| props.get(name).cloned().unwrap_or_default();
        Self {
            primary_color: read("--color-primary"),
            spacing_md: read("--spacing-md"),
            radius_md: read("--radius-md"),
        }
    }
}

/// Outcome of the stylesheet pre-check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CssLoadingResult {
    /// PASS or FAIL.
    pub status: TestStatus,
    /// Root custom properties, when the page was read.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub css_variables: Option<CssVariables>,
    /// Console errors mentioning CSS.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<usize>,
    /// Why the check failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Tab bar behaviour at one breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TabScrolling {
    /// Content overflows the container.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub can_scroll: Option<bool>,
    /// Content width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scroll_width: Option<f64>,
    /// Container width.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_width: Option<f64>,
    /// PASS or FAIL.
    pub status: TestStatus,
    /// Clicking a tab worked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interaction_test: Option<TestStatus>,
    /// Why the test failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl TabScrolling {
    fn failed(error: impl ToString) -> Self {
        Self {
            can_scroll: None,
            scroll_width: None,
            client_width: None,
            status: TestStatus::Fail,
            interaction_test: None,
            error: Some(error.to_string()),
        }
    }
}

/// Modal stacking at one breakpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModalResult {
    /// PASS, FAIL or SKIPPED.
    pub status: TestStatus,
    /// Computed z-index of the opened modal.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_index: Option<String>,
    /// Why the test failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ModalResult {
    const fn skipped() -> Self {
        Self {
            status: TestStatus::Skipped,
            z_index: None,
            error: None,
        }
    }

    fn failed(error: impl ToString) -> Self {
        Self {
            status: TestStatus::Fail,
            z_index: None,
            error: Some(error.to_string()),
        }
    }
}

/// Results for one breakpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BreakpointResult {
    /// Breakpoint name.
    pub breakpoint: String,
    /// `WIDTHxHEIGHT`.
    pub viewport: String,
    /// Tab bar test.
    pub tab_scrolling: TabScrolling,
    /// Modal test, absent when it was not run.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub modal: Option<ModalResult>,
}

impl BreakpointResult {
    /// The breakpoint's tab bar test passed.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.tab_scrolling.status == TestStatus::Pass
    }
}

/// Pass/fail counts of a run.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponsiveSummary {
    /// Breakpoints tested.
    pub total: usize,
    /// Breakpoints whose tab test passed.
    pub passed: usize,
    /// Breakpoints whose tab test failed.
    pub failed: usize,
    /// `passed / total` as a percentage with one decimal, 0 when empty.
    pub success_rate: f64,
}

impl ResponsiveSummary {
    /// Counts the results.
    #[must_use]
    pub fn from_results(results: &[BreakpointResult]) -> Self {
        let passed = results.iter().filter(|r| r.passed()).count();
        let failed = results
            .iter()
            .filter(|r| r.tab_scrolling.status == TestStatus::Fail)
            .count();
        let success_rate = if results.is_empty() {
            0.0
        } else {
            (passed as f64 / results.len() as f64 * 1000.0).round() / 10.0
        };
        Self {
            total: results.len(),
            passed,
            failed,
            success_rate,
        }
    }
}

/// Complete suite output, written to `test-results.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResponsiveReport {
    /// When the run started.
    #[serde(serialize_with = "rfc3339_millis")]
    pub timestamp: DateTime<Utc>,
    /// Counts.
    pub summary: ResponsiveSummary,
    /// Per-breakpoint results in test order.
    pub results: Vec<BreakpointResult>,
}

impl ResponsiveReport {
    /// Builds the report and its summary.
    #[must_use]
    pub fn new(timestamp: DateTime<Utc>, results: Vec<BreakpointResult>) -> Self {
        Self {
            timestamp,
            summary: ResponsiveSummary::from_results(&results),
            results,
        }
    }

    /// The run should fail CI.
    #[must_use]
    pub const fn has_failures(&self) -> bool {
        self.summary.failed > 0
    }
}

// ============================================================================
// TESTS
// ============================================================================

/// Checks that the main stylesheet is served and that the dashboard exposes
/// the theme's required custom properties.
///
/// Fails when the stylesheet is not served with 200, or when
/// `--color-primary` or `--spacing-md` is empty.
pub async fn test_css_loading(driver: &dyn PageDriver, config: &ResponsiveConfig) -> CssLoadingResult {
    info!("testing CSS loading");

    match css_loading(driver, config).await {
        Ok((variables, errors)) => {
            info!(primary = %variables.primary_color, "CSS variables loaded");
            if errors == 0 {
                info!("no CSS console errors");
            } else {
                warn!(errors, "CSS console errors found");
            }
            CssLoadingResult {
                status: TestStatus::Pass,
                css_variables: Some(variables),
                errors: Some(errors),
                error: None,
            }
        }
        Err(error) => {
            warn!(%error, "CSS loading test failed");
            CssLoadingResult {
                status: TestStatus::Fail,
                css_variables: None,
                errors: None,
                error: Some(error),
            }
        }
    }
}

async fn css_loading(
    driver: &dyn PageDriver,
    config: &ResponsiveConfig,
) -> Result<(CssVariables, usize), String> {
    let css_url = config.url(&config.main_css).map_err(|e| e.to_string())?;
    let asset = driver
        .fetch_asset(&css_url, config.navigation_timeout())
        .await
        .map_err(|e| e.to_string())?;
    if asset.status != 200 {
        return Err(format!("CSS loading failed ({})", asset.status));
    }
    info!(status = asset.status, "main.css loaded");

    let dashboard = config.url(&config.dashboard_path).map_err(|e| e.to_string())?;
    driver
        .navigate(&dashboard, NavigateOptions::network_idle(config.navigation_timeout()))
        .await
        .map_err(|e| e.to_string())?;

    let script = scripts::root_properties(&printdesk_theme::REQUIRED_VARIABLES);
    let value = driver.evaluate(&script).await.map_err(|e| e.to_string())?;
    let props: RootProperties = scripts::decode(&script, value).map_err(|e| e.to_string())?;
    let variables = CssVariables::from_properties(&props);

    if variables.primary_color.is_empty() || variables.spacing_md.is_empty() {
        return Err("CSS variables not found - architecture may have issues".to_owned());
    }

    driver.pause(CONSOLE_GRACE).await;
    let errors = driver
        .console_errors()
        .await
        .map_err(|e| e.to_string())?
        .iter()
        .filter(|message| message.contains("css"))
        .count();

    Ok((variables, errors))
}

/// Checks that the tab bar scrolls horizontally when it overflows and that
/// a tab can be clicked.
pub async fn test_tab_scrolling(
    driver: &dyn PageDriver,
    config: &ResponsiveConfig,
    breakpoint: &Breakpoint,
) -> BreakpointResult {
    info!(breakpoint = %breakpoint.name, viewport = %breakpoint.label(), "testing tab scrolling");

    let tab_scrolling = match tab_scrolling(driver, config, breakpoint).await {
        Ok(result) => result,
        Err(error) => {
            warn!(breakpoint = %breakpoint.name, %error, "tab scrolling test failed");
            TabScrolling::failed(error)
        }
    };

    BreakpointResult {
        breakpoint: breakpoint.name.clone(),
        viewport: breakpoint.label(),
        tab_scrolling,
        modal: None,
    }
}

async fn tab_scrolling(
    driver: &dyn PageDriver,
    config: &ResponsiveConfig,
    breakpoint: &Breakpoint,
) -> Result<TabScrolling, String> {
    let selectors = &config.selectors;
    let dashboard = config.url(&config.dashboard_path).map_err(|e| e.to_string())?;

    driver
        .navigate(&dashboard, NavigateOptions::network_idle(config.navigation_timeout()))
        .await
        .map_err(|e| e.to_string())?;
    driver
        .wait_for_selector(&selectors.tabs_container, config.selector_timeout())
        .await
        .map_err(|e| e.to_string())?;

    let metrics = read_scroll_metrics(driver, &selectors.tabs_container)
        .await
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "Tab container not found".to_owned())?;
    info!(
        breakpoint = %breakpoint.name,
        container = metrics.client_width,
        content = metrics.scroll_width,
        "tab bar measured"
    );

    if metrics.can_scroll() {
        driver
            .evaluate(&scripts::scroll_to(&selectors.tabs_container, SCROLL_TEST_OFFSET))
            .await
            .map_err(|e| e.to_string())?;
        driver.pause(AFTER_SCROLL).await;

        let scrolled = read_scroll_metrics(driver, &selectors.tabs_container)
            .await
            .map_err(|e| e.to_string())?
            .map_or(0.0, |m| m.scroll_left);
        if scrolled <= 0.0 {
            return Err("Horizontal scrolling not working".to_owned());
        }
        info!(breakpoint = %breakpoint.name, scrolled, "horizontal scroll working");

        let overflow = driver
            .evaluate(&scripts::overflow_x(&selectors.tabs_container))
            .await
            .map_err(|e| e.to_string())?;
        if matches!(overflow.as_str(), Some("auto" | "scroll")) {
            info!(breakpoint = %breakpoint.name, "scroll indicators enabled");
        } else {
            warn!(breakpoint = %breakpoint.name, "scroll indicators may be hidden");
        }
    } else {
        info!(breakpoint = %breakpoint.name, "all tabs fit, no scrolling needed");
    }

    let mut result = TabScrolling {
        can_scroll: Some(metrics.can_scroll()),
        scroll_width: Some(metrics.scroll_width),
        client_width: Some(metrics.client_width),
        status: TestStatus::Pass,
        interaction_test: None,
        error: None,
    };

    let tabs = driver
        .query_count(&selectors.tabs)
        .await
        .map_err(|e| e.to_string())?;
    if tabs > 0 {
        driver
            .click(&selectors.tabs, 0)
            .await
            .map_err(|e| e.to_string())?;
        driver.pause(AFTER_CLICK).await;
        info!(breakpoint = %breakpoint.name, tabs, "tab interaction working");
        result.interaction_test = Some(TestStatus::Pass);
    }

    Ok(result)
}

async fn read_scroll_metrics(
    driver: &dyn PageDriver,
    selector: &str,
) -> Result<Option<ScrollMetrics>, DriverError> {
    let script = scripts::scroll_metrics(selector);
    let value = driver.evaluate(&script).await?;
    scripts::decode(&script, value)
}

/// Opens the first modal trigger on the current page and checks the modal
/// is visible and stacked above the page, then closes it.
pub async fn test_modal_interactions(
    driver: &dyn PageDriver,
    config: &ResponsiveConfig,
    breakpoint: &Breakpoint,
) -> ModalResult {
    info!(breakpoint = %breakpoint.name, "testing modal interactions");

    match modal_interactions(driver, config).await {
        Ok(result) => result,
        Err(error) => {
            warn!(breakpoint = %breakpoint.name, %error, "modal test failed");
            ModalResult::failed(error)
        }
    }
}

async fn modal_interactions(
    driver: &dyn PageDriver,
    config: &ResponsiveConfig,
) -> Result<ModalResult, String> {
    let selectors = &config.selectors;

    let triggers = driver
        .query_count(&selectors.modal_triggers)
        .await
        .map_err(|e| e.to_string())?;
    if triggers == 0 {
        info!("no modal triggers found, skipping modal test");
        return Ok(ModalResult::skipped());
    }

    driver
        .click(&selectors.modal_triggers, 0)
        .await
        .map_err(|e| e.to_string())?;
    driver.pause(AFTER_MODAL_OPEN).await;

    let script = scripts::element_style(&selectors.modal);
    let value = driver.evaluate(&script).await.map_err(|e| e.to_string())?;
    let style: ElementStyle = scripts::decode::<Option<ElementStyle>>(&script, value)
        .map_err(|e| e.to_string())?
        .ok_or_else(|| "Modal did not appear after trigger click".to_owned())?;

    let stacked = style
        .z_index_value()
        .is_some_and(|z| z >= config.min_modal_z_index);
    if !(style.is_visible && stacked) {
        return Err(format!("Modal z-index issue (z-index: {})", style.z_index));
    }
    info!(z_index = %style.z_index, "modal properly stacked");

    if driver
        .query_count(&selectors.modal_close)
        .await
        .map_err(|e| e.to_string())?
        > 0
    {
        driver
            .click(&selectors.modal_close, 0)
            .await
            .map_err(|e| e.to_string())?;
    } else {
        driver
            .press_key("Escape")
            .await
            .map_err(|e| e.to_string())?;
    }
    driver.pause(AFTER_MODAL_CLOSE).await;
    info!("modal closed");

    Ok(ModalResult {
        status: TestStatus::Pass,
        z_index: Some(style.z_index),
        error: None,
    })
}

/// Runs the whole suite and closes the driver.
///
/// # Errors
///
/// [`CheckError::CssLoadingFailed`] when the stylesheet pre-check fails; no
/// breakpoint is tested then. [`CheckError::Driver`] when the viewport cannot
/// be resized.
pub async fn run_responsive_tests(
    driver: &dyn PageDriver,
    config: &ResponsiveConfig,
) -> Result<ResponsiveReport, CheckError> {
    info!(base_url = %config.base_url, "starting responsive UI test suite");
    let outcome = run_breakpoints(driver, config).await;

    if let Err(error) = driver.close().await {
        warn!(%error, "closing browser session failed");
    }

    let report = outcome?;
    info!(
        total = report.summary.total,
        passed = report.summary.passed,
        failed = report.summary.failed,
        success_rate = report.summary.success_rate,
        "responsive suite finished"
    );
    for result in report.results.iter().filter(|r| !r.passed()) {
        warn!(
            breakpoint = %result.breakpoint,
            viewport = %result.viewport,
            error = result.tab_scrolling.error.as_deref().unwrap_or_default(),
            "breakpoint failed"
        );
    }
    Ok(report)
}

async fn run_breakpoints(
    driver: &dyn PageDriver,
    config: &ResponsiveConfig,
) -> Result<ResponsiveReport, CheckError> {
    let timestamp = Utc::now();

    let css = test_css_loading(driver, config).await;
    if css.status == TestStatus::Fail {
        return Err(CheckError::CssLoadingFailed(css.error.unwrap_or_default()));
    }

    let mut results = Vec::with_capacity(config.breakpoints.len());
    for breakpoint in &config.breakpoints {
        info!(breakpoint = %breakpoint.name, "testing breakpoint");
        driver.set_viewport(breakpoint.viewport()).await?;

        let mut result = test_tab_scrolling(driver, config, breakpoint).await;
        result.modal = Some(test_modal_interactions(driver, config, breakpoint).await);
        results.push(result);

        driver.pause(BETWEEN_BREAKPOINTS).await;
    }

    Ok(ResponsiveReport::new(timestamp, results))
}
