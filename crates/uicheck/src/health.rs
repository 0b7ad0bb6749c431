//! CSS health check.
//!
//! Verifies that the stylesheets are served, that pages load without layout
//! shifts or slow stylesheets, and scores basic accessibility features per
//! page. Every step records its own failure; the run always completes.

use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use tracing::{info, warn};

use crate::config::HealthConfig;
use crate::driver::{NavigateOptions, PageDriver};
use crate::error::DriverError;
use crate::scripts::{self, AccessibilitySnapshot, CssLoadError, CssTiming, PerformanceSnapshot};
use crate::report::rfc3339_millis;

// ============================================================================
// RESULT TYPES
// ============================================================================

/// HTTP status of a stylesheet fetch, or `"ERROR"` when the fetch failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    /// Server answered with this status.
    Http(u16),
    /// No answer.
    Error,
}

impl Serialize for FetchStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Http(code) => serializer.serialize_u16(*code),
            Self::Error => serializer.serialize_str("ERROR"),
        }
    }
}

/// Health of one stylesheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CssFileCheck {
    /// Path as configured.
    pub file: String,
    /// Fetch status.
    pub status: FetchStatus,
    /// Body size in bytes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    /// Body size in KiB, rounded.
    #[serde(rename = "sizeKB", skip_serializing_if = "Option::is_none")]
    pub size_kb: Option<u64>,
    /// Served with status 200.
    pub accessible: bool,
    /// Smaller than the per-file limit.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub within_size_limit: Option<bool>,
    /// Why the fetch failed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Layout stability and stylesheet timing of one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformanceCheck {
    /// Endpoint path.
    pub url: String,
    /// Cumulative layout shift.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cls_score: Option<f64>,
    /// Number of unexpected shifts.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub layout_shifts: Option<usize>,
    /// Per-stylesheet timings.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub css_load_times: Vec<CssTiming>,
    /// Mean stylesheet load time in ms, rounded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub avg_css_load_time: Option<u64>,
    /// Stylesheets that failed to load.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub css_errors: Vec<CssLoadError>,
    /// CLS below threshold.
    pub cls_healthy: bool,
    /// Mean load time below threshold.
    pub css_load_healthy: bool,
    /// Why the page could not be measured.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl PerformanceCheck {
    /// Both layout stability and stylesheet timing are healthy.
    #[must_use]
    pub const fn is_healthy(&self) -> bool {
        self.cls_healthy && self.css_load_healthy
    }
}

/// Accessibility feature score of one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityCheck {
    /// Endpoint path.
    pub url: String,
    /// Detected features, e.g. `Skip Links`.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub features: Vec<String>,
    /// Labelled inputs / all inputs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_labels_ratio: Option<f64>,
    /// At least one heading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub has_headings: Option<bool>,
    /// Elements with ARIA attributes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aria_elements: Option<u64>,
    /// Number of detected features, 0 to 4.
    pub score: usize,
    /// Why the page could not be checked.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Roll-up of a health report.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthSummary {
    /// `accessible/total`.
    pub css_files_accessible: String,
    /// `healthy/total`.
    pub performance_healthy: String,
    /// Mean accessibility score, 0 when no page was checked.
    pub accessibility_score: f64,
    /// The run completed, every stylesheet is accessible and every page is
    /// healthy.
    pub overall_healthy: bool,
}

/// Complete health check output, written to `health-report.json`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
    /// When the run started.
    #[serde(serialize_with = "rfc3339_millis")]
    pub timestamp: DateTime<Utc>,
    /// Stylesheet results in configured order.
    pub css_files: Vec<CssFileCheck>,
    /// Per-endpoint performance results.
    pub performance: Vec<PerformanceCheck>,
    /// Per-endpoint accessibility results.
    pub accessibility: Vec<AccessibilityCheck>,
    /// Roll-up.
    pub summary: HealthSummary,
    /// Run-level failure, e.g. no browser session.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl HealthReport {
    /// An empty report stamped now.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timestamp: Utc::now(),
            css_files: Vec::new(),
            performance: Vec::new(),
            accessibility: Vec::new(),
            summary: HealthSummary::default(),
            error: None,
        }
    }

    /// A report for a run that could not start.
    #[must_use]
    pub fn aborted(error: impl ToString) -> Self {
        let mut report = Self::new();
        report.error = Some(error.to_string());
        report.summarize();
        report
    }

    /// Recomputes [`HealthReport::summary`] from the results.
    pub fn summarize(&mut self) {
        let accessible = self.css_files.iter().filter(|f| f.accessible).count();
        let healthy = self.performance.iter().filter(|p| p.is_healthy()).count();

        let accessibility_score = if self.accessibility.is_empty() {
            0.0
        } else {
            let total: usize = self.accessibility.iter().map(|a| a.score).sum();
            total as f64 / self.accessibility.len() as f64
        };

        self.summary = HealthSummary {
            css_files_accessible: format!("{accessible}/{}", self.css_files.len()),
            performance_healthy: format!("{healthy}/{}", self.performance.len()),
            accessibility_score,
            overall_healthy: self.error.is_none()
                && accessible == self.css_files.len()
                && healthy == self.performance.len(),
        };
    }

    /// The run should fail CI.
    ///
    /// True when a stylesheet is inaccessible, a page is unhealthy, or the
    /// run itself could not complete.
    #[must_use]
    pub fn has_failures(&self) -> bool {
        self.error.is_some()
            || self.css_files.iter().any(|f| !f.accessible)
            || self.performance.iter().any(|p| !p.is_healthy())
    }
}

impl Default for HealthReport {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// CHECKS
// ============================================================================

/// Fetches every configured stylesheet and records status and size.
pub async fn check_css_files(driver: &dyn PageDriver, config: &HealthConfig) -> Vec<CssFileCheck> {
    info!(files = config.css_files.len(), "checking CSS files");

    let mut results = Vec::with_capacity(config.css_files.len());
    for file in &config.css_files {
        let fetched = match config.url(file) {
            Ok(url) => driver
                .fetch_asset(&url, config.navigation_timeout())
                .await
                .map_err(|e| e.to_string()),
            Err(e) => Err(e.to_string()),
        };

        let result = match fetched {
            Ok(asset) => {
                let accessible = asset.status == 200;
                if accessible {
                    info!(file = %file, size = asset.size_bytes, "CSS file accessible");
                } else {
                    warn!(file = %file, status = asset.status, "CSS file not accessible");
                }
                CssFileCheck {
                    file: file.clone(),
                    status: FetchStatus::Http(asset.status),
                    size: Some(asset.size_bytes),
                    size_kb: Some(round_kb(asset.size_bytes)),
                    accessible,
                    within_size_limit: Some(asset.size_bytes < config.thresholds.css_file_size),
                    error: None,
                }
            }
            Err(error) => {
                warn!(file = %file, %error, "CSS file fetch failed");
                CssFileCheck {
                    file: file.clone(),
                    status: FetchStatus::Error,
                    size: None,
                    size_kb: None,
                    accessible: false,
                    within_size_limit: None,
                    error: Some(error),
                }
            }
        };
        results.push(result);
    }
    results
}

/// Loads `endpoint`, lets it settle, then measures layout shifts and
/// stylesheet load times.
pub async fn monitor_layout_shifts(
    driver: &dyn PageDriver,
    config: &HealthConfig,
    endpoint: &str,
) -> PerformanceCheck {
    info!(endpoint, "monitoring layout shifts");

    match measure_performance(driver, config, endpoint).await {
        Ok(snapshot) => {
            let cls = snapshot.cls();
            let avg = snapshot.avg_css_load_time();
            let check = PerformanceCheck {
                url: endpoint.to_owned(),
                cls_score: Some(cls),
                layout_shifts: Some(snapshot.unexpected_shifts().count()),
                avg_css_load_time: Some(avg.round() as u64),
                cls_healthy: cls < config.thresholds.layout_shift_score,
                css_load_healthy: avg < config.thresholds.css_load_time_ms,
                css_load_times: snapshot.css_load_times,
                css_errors: snapshot.css_errors,
                error: None,
            };

            if check.cls_healthy {
                info!(endpoint, cls, "layout stable");
            } else {
                warn!(endpoint, cls, "layout shift above threshold");
            }
            if check.css_load_healthy {
                info!(endpoint, avg_ms = avg, "CSS load time ok");
            } else {
                warn!(endpoint, avg_ms = avg, "CSS load time slow");
            }
            for error in &check.css_errors {
                warn!(endpoint, url = %error.url, "{}", error.error);
            }
            check
        }
        Err(error) => {
            warn!(endpoint, %error, "performance monitoring failed");
            PerformanceCheck {
                url: endpoint.to_owned(),
                error: Some(error),
                ..PerformanceCheck::default()
            }
        }
    }
}

async fn measure_performance(
    driver: &dyn PageDriver,
    config: &HealthConfig,
    endpoint: &str,
) -> Result<PerformanceSnapshot, String> {
    let url = config.url(endpoint).map_err(|e| e.to_string())?;
    driver
        .navigate(&url, NavigateOptions::network_idle(config.navigation_timeout()))
        .await
        .map_err(|e| e.to_string())?;
    driver.pause(config.settle_time()).await;

    let script = scripts::performance();
    let value = driver
        .evaluate(&script)
        .await
        .map_err(|e| e.to_string())?;
    scripts::decode(&script, value).map_err(|e: DriverError| e.to_string())
}

/// Loads `endpoint` and scores its accessibility features.
pub async fn check_accessibility(
    driver: &dyn PageDriver,
    config: &HealthConfig,
    endpoint: &str,
) -> AccessibilityCheck {
    info!(endpoint, "checking accessibility");

    match measure_accessibility(driver, config, endpoint).await {
        Ok(snapshot) => {
            let features = accessibility_features(&snapshot);
            info!(
                endpoint,
                score = features.len(),
                labels = snapshot.form_labels_ratio,
                "accessibility features: {}",
                if features.is_empty() {
                    "none detected".to_owned()
                } else {
                    features.join(", ")
                }
            );
            AccessibilityCheck {
                url: endpoint.to_owned(),
                score: features.len(),
                features,
                form_labels_ratio: Some(snapshot.form_labels_ratio),
                has_headings: Some(snapshot.has_headings),
                aria_elements: Some(snapshot.aria_elements),
                error: None,
            }
        }
        Err(error) => {
            warn!(endpoint, %error, "accessibility check failed");
            AccessibilityCheck {
                url: endpoint.to_owned(),
                error: Some(error),
                ..AccessibilityCheck::default()
            }
        }
    }
}

async fn measure_accessibility(
    driver: &dyn PageDriver,
    config: &HealthConfig,
    endpoint: &str,
) -> Result<AccessibilitySnapshot, String> {
    let url = config.url(endpoint).map_err(|e| e.to_string())?;
    driver
        .navigate(&url, NavigateOptions::network_idle(config.navigation_timeout()))
        .await
        .map_err(|e| e.to_string())?;

    let script = scripts::accessibility();
    let value = driver
        .evaluate(&script)
        .await
        .map_err(|e| e.to_string())?;
    scripts::decode(&script, value).map_err(|e: DriverError| e.to_string())
}

/// Names of the accessibility features present in a snapshot.
#[must_use]
pub fn accessibility_features(snapshot: &AccessibilitySnapshot) -> Vec<String> {
    let checks = [
        ("Skip Links", snapshot.has_skip_links),
        ("Form Labels", snapshot.form_labels_ratio >= 0.8),
        ("Heading Structure", snapshot.has_headings),
        ("ARIA Attributes", snapshot.aria_elements > 0),
    ];
    checks
        .into_iter()
        .filter(|(_, present)| *present)
        .map(|(name, _)| name.to_owned())
        .collect()
}

/// Runs the full health check and closes the driver.
///
/// Stylesheets are checked first, then each endpoint for performance and
/// accessibility. The summary is filled in before returning.
pub async fn run_health_check(driver: &dyn PageDriver, config: &HealthConfig) -> HealthReport {
    info!(base_url = %config.base_url, "starting CSS health check");
    let mut report = HealthReport::new();

    report.css_files = check_css_files(driver, config).await;
    for endpoint in &config.endpoints {
        let performance = monitor_layout_shifts(driver, config, endpoint).await;
        let accessibility = check_accessibility(driver, config, endpoint).await;
        report.performance.push(performance);
        report.accessibility.push(accessibility);
    }

    if let Err(error) = driver.close().await {
        warn!(%error, "closing browser session failed");
    }

    report.summarize();
    info!(
        css_files = %report.summary.css_files_accessible,
        performance = %report.summary.performance_healthy,
        accessibility = report.summary.accessibility_score,
        healthy = report.summary.overall_healthy,
        "health check finished"
    );
    report
}

fn round_kb(bytes: u64) -> u64 {
    (bytes as f64 / 1024.0).round() as u64
}
