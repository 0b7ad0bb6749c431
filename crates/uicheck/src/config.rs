//! Check run configuration.
//!
//! Both configs deserialize with every field optional, falling back to the
//! defaults below, so a config file only needs the values it changes.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::driver::Viewport;
use crate::error::ConfigError;

/// Server the checks run against when nothing else is configured.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000";

const NAVIGATION_TIMEOUT_MS: u64 = 10_000;

/// Joins a base URL and an absolute path, e.g. `/dashboard`.
pub fn page_url(base_url: &str, path: &str) -> Result<String, ConfigError> {
    let joined = format!("{}{path}", base_url.trim_end_matches('/'));
    Url::parse(&joined)
        .map(String::from)
        .map_err(|source| ConfigError::InvalidUrl {
            url: joined,
            source,
        })
}

// ============================================================================
// HEALTH CHECK
// ============================================================================

/// Pass/fail limits for the health check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Thresholds {
    /// Average stylesheet load time must stay below this (ms).
    pub css_load_time_ms: f64,
    /// Cumulative layout shift must stay below this.
    pub layout_shift_score: f64,
    /// Page weight budget in bytes. Carried in config; no check enforces it.
    pub total_page_size: u64,
    /// A stylesheet is within limits when smaller than this (bytes).
    pub css_file_size: u64,
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            css_load_time_ms: 1000.0,
            layout_shift_score: 0.1,
            total_page_size: 2_000_000,
            css_file_size: 500_000,
        }
    }
}

/// Configuration of [`run_health_check`](crate::health::run_health_check).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HealthConfig {
    /// Server root, e.g. `http://localhost:5000`.
    pub base_url: String,
    /// Pages checked for layout stability and accessibility.
    pub endpoints: Vec<String>,
    /// Stylesheets that must be reachable.
    pub css_files: Vec<String>,
    /// Pass/fail limits.
    pub thresholds: Thresholds,
    /// Navigation and asset fetch timeout (ms).
    pub navigation_timeout_ms: u64,
    /// Wait after load before sampling layout shifts (ms).
    pub settle_ms: u64,
}

impl Default for HealthConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            endpoints: ["/dashboard", "/submit", "/login"]
                .map(String::from)
                .to_vec(),
            css_files: [
                "/static/css/main.css",
                "/static/css/base/variables.css",
                "/static/css/base/reset.css",
                "/static/css/components/tabs.css",
                "/static/css/components/buttons.css",
                "/static/css/components/cards.css",
                "/static/css/components/modals.css",
                "/static/css/components/forms.css",
                "/static/css/layouts/grid.css",
                "/static/css/layouts/containers.css",
            ]
            .map(String::from)
            .to_vec(),
            thresholds: Thresholds::default(),
            navigation_timeout_ms: NAVIGATION_TIMEOUT_MS,
            settle_ms: 2_000,
        }
    }
}

impl HealthConfig {
    /// Navigation and asset fetch timeout.
    #[must_use]
    pub const fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    /// Settle time before sampling layout shifts.
    #[must_use]
    pub const fn settle_time(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }

    /// Absolute URL of a path on the configured server.
    pub fn url(&self, path: &str) -> Result<String, ConfigError> {
        page_url(&self.base_url, path)
    }
}

// ============================================================================
// RESPONSIVE SUITE
// ============================================================================

/// A named viewport size.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Name used in logs and reports, e.g. `tablet-portrait`.
    pub name: String,
    /// Viewport width.
    pub width: u32,
    /// Viewport height.
    pub height: u32,
}

impl Breakpoint {
    /// Creates a breakpoint.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
        }
    }

    /// Viewport of this breakpoint.
    #[must_use]
    pub const fn viewport(&self) -> Viewport {
        Viewport {
            width: self.width,
            height: self.height,
        }
    }

    /// `WIDTHxHEIGHT`.
    #[must_use]
    pub fn label(&self) -> String {
        format!("{}x{}", self.width, self.height)
    }
}

/// Selectors for the elements the responsive suite exercises.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    /// Horizontally scrolling tab bar.
    pub tabs_container: String,
    /// Individual tabs.
    pub tabs: String,
    /// Buttons that open a modal.
    pub modal_triggers: String,
    /// The modal itself.
    pub modal: String,
    /// Close control inside the modal.
    pub modal_close: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            tabs_container: ".tabs-v0".to_owned(),
            tabs: ".tab-v0-active, .tab-v0-inactive".to_owned(),
            modal_triggers: "[data-modal-trigger], .btn-v0-danger, .btn-v0-warning".to_owned(),
            modal: "#confirmation-modal, .modal, [role=\"dialog\"]".to_owned(),
            modal_close: ".modal-close, [data-modal-close]".to_owned(),
        }
    }
}

/// Configuration of [`run_responsive_tests`](crate::responsive::run_responsive_tests).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResponsiveConfig {
    /// Server root.
    pub base_url: String,
    /// Page holding the tabs and modals.
    pub dashboard_path: String,
    /// Stylesheet that must load before anything else runs.
    pub main_css: String,
    /// Viewports, tested in order.
    pub breakpoints: Vec<Breakpoint>,
    /// Element selectors.
    pub selectors: Selectors,
    /// An open modal must stack at or above this z-index.
    pub min_modal_z_index: f64,
    /// Navigation timeout (ms).
    pub navigation_timeout_ms: u64,
    /// Wait for the tab bar (ms).
    pub selector_timeout_ms: u64,
}

impl Default for ResponsiveConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            dashboard_path: "/dashboard".to_owned(),
            main_css: "/static/css/main.css".to_owned(),
            breakpoints: vec![
                Breakpoint::new("mobile-portrait", 320, 568),
                Breakpoint::new("mobile-landscape", 568, 320),
                Breakpoint::new("tablet-portrait", 768, 1024),
                Breakpoint::new("tablet-landscape", 1024, 768),
                Breakpoint::new("desktop", 1440, 900),
                Breakpoint::new("desktop-xl", 1920, 1080),
            ],
            selectors: Selectors::default(),
            min_modal_z_index: 400.0,
            navigation_timeout_ms: NAVIGATION_TIMEOUT_MS,
            selector_timeout_ms: 5_000,
        }
    }
}

impl ResponsiveConfig {
    /// Navigation timeout.
    #[must_use]
    pub const fn navigation_timeout(&self) -> Duration {
        Duration::from_millis(self.navigation_timeout_ms)
    }

    /// Tab bar wait timeout.
    #[must_use]
    pub const fn selector_timeout(&self) -> Duration {
        Duration::from_millis(self.selector_timeout_ms)
    }

    /// Absolute URL of a path on the configured server.
    pub fn url(&self, path: &str) -> Result<String, ConfigError> {
        page_url(&self.base_url, path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_page_url_joins_without_double_slash() {
        assert_eq!(
            page_url("http://localhost:5000/", "/dashboard").unwrap(),
            "http://localhost:5000/dashboard"
        );
        assert_eq!(
            page_url("http://example.test/app", "/static/css/main.css").unwrap(),
            "http://example.test/app/static/css/main.css"
        );
    }

    #[test]
    fn test_page_url_rejects_garbage() {
        let err = page_url("localhost", "/x").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { ref url, .. } if url == "localhost/x"));
    }

    #[test]
    fn test_health_defaults() {
        let config = HealthConfig::default();
        assert_eq!(config.endpoints, vec!["/dashboard", "/submit", "/login"]);
        assert_eq!(config.css_files.len(), 10);
        assert_eq!(config.navigation_timeout(), Duration::from_secs(10));
        assert_eq!(config.settle_time(), Duration::from_secs(2));
        assert_eq!(config.thresholds.css_file_size, 500_000);
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config: ResponsiveConfig =
            serde_json::from_str(r#"{"base_url": "http://staging:8080", "min_modal_z_index": 1000}"#)
                .unwrap();
        assert_eq!(config.base_url, "http://staging:8080");
        assert_eq!(config.min_modal_z_index, 1000.0);
        assert_eq!(config.breakpoints.len(), 6);
        assert_eq!(config.breakpoints[0].label(), "320x568");
        assert_eq!(config.selectors.tabs_container, ".tabs-v0");
    }
}
