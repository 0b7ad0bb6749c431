#![forbid(unsafe_code)]
#![warn(missing_docs)]

//! # Printdesk UI Check
//!
//! Browser checks for the print job pages, run out of band against a live
//! server:
//!
//! - [`health`]: stylesheet availability, layout stability and
//!   accessibility features, reported as `health-report.json`
//! - [`responsive`]: tab bar scrolling and modal stacking at each breakpoint,
//!   reported as `test-results.json`
//!
//! All browser access goes through the [`PageDriver`] port.
//! [`WebDriverPage`] implements it over the W3C WebDriver protocol; tests
//! substitute a scripted fake.
//!
//! ```rust,no_run
//! use printdesk_uicheck::{BrowserOptions, HealthConfig, WebDriverPage, health};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let page = WebDriverPage::connect("http://localhost:9515", &BrowserOptions::default()).await?;
//! let report = health::run_health_check(&page, &HealthConfig::default()).await;
//! if report.has_failures() {
//!     eprintln!("{}", report.summary.performance_healthy);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod driver;
pub mod error;
pub mod health;
pub mod report;
pub mod responsive;
pub mod scripts;
pub mod webdriver;

pub use config::{Breakpoint, HealthConfig, ResponsiveConfig, Selectors, Thresholds};
pub use driver::{
    AssetResponse, NavigateOptions, NavigationResponse, PageDriver, Script, Viewport, WaitUntil,
};
pub use error::{CheckError, ConfigError, DriverError};
pub use health::HealthReport;
pub use report::{TestStatus, write_report};
pub use responsive::ResponsiveReport;
pub use webdriver::{BrowserOptions, WebDriverPage};
