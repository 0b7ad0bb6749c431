//! Page driver port.
//!
//! Every browser interaction the checks need goes through [`PageDriver`].
//! Backends (WebDriver, test fakes) implement it; the checks never see a
//! concrete browser.

use std::borrow::Cow;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::DriverError;

/// When a navigation counts as finished.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WaitUntil {
    /// The `load` event fired.
    Load,
    /// The `DOMContentLoaded` event fired.
    DomContentLoaded,
    /// The network has been mostly quiet for a moment.
    #[default]
    NetworkIdle,
}

/// Options for [`PageDriver::navigate`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Load milestone to wait for.
    pub wait_until: WaitUntil,
    /// Upper bound for the whole navigation.
    pub timeout: Duration,
}

impl NavigateOptions {
    /// Waits for network idle, bounded by `timeout`.
    #[must_use]
    pub const fn network_idle(timeout: Duration) -> Self {
        Self {
            wait_until: WaitUntil::NetworkIdle,
            timeout,
        }
    }
}

/// Result of a navigation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NavigationResponse {
    /// HTTP status of the main document, when the backend exposes it.
    pub status: Option<u16>,
}

/// Result of fetching a static asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AssetResponse {
    /// HTTP status code.
    pub status: u16,
    /// Body length in bytes.
    pub size_bytes: u64,
}

/// Browser viewport size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

/// A named in-page script.
///
/// `source` is a function body; `args` are available to it as
/// `arguments[0..]`. The body may return a promise.
#[derive(Debug, Clone, PartialEq)]
pub struct Script {
    /// Script name, used in errors and by test fakes.
    pub name: Cow<'static, str>,
    /// Function body.
    pub source: Cow<'static, str>,
    /// Positional arguments.
    pub args: Vec<Value>,
}

impl Script {
    /// Creates a script with no arguments.
    pub fn new(name: impl Into<Cow<'static, str>>, source: impl Into<Cow<'static, str>>) -> Self {
        Self {
            name: name.into(),
            source: source.into(),
            args: Vec::new(),
        }
    }

    /// Appends a positional argument.
    #[must_use = "builder methods must be chained or built"]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }
}

/// Single-page browser session.
///
/// Methods take `&self`; a driver serves one sequential run at a time.
#[async_trait]
pub trait PageDriver: Send + Sync {
    /// Loads `url` in the page.
    async fn navigate(
        &self,
        url: &str,
        options: NavigateOptions,
    ) -> Result<NavigationResponse, DriverError>;

    /// Fetches a static asset and reports its status and size.
    async fn fetch_asset(&self, url: &str, timeout: Duration)
    -> Result<AssetResponse, DriverError>;

    /// Resizes the viewport so the page's `innerWidth`/`innerHeight`
    /// match `viewport`. Backends that can only size the outer window
    /// must compensate for the browser chrome.
    async fn set_viewport(&self, viewport: Viewport) -> Result<(), DriverError>;

    /// Runs a script in the current page and returns its JSON result.
    async fn evaluate(&self, script: &Script) -> Result<Value, DriverError>;

    /// Waits until `selector` matches at least one element.
    async fn wait_for_selector(&self, selector: &str, timeout: Duration)
    -> Result<(), DriverError>;

    /// Number of elements matching `selector`.
    async fn query_count(&self, selector: &str) -> Result<usize, DriverError>;

    /// Clicks the `index`-th element matching `selector`.
    async fn click(&self, selector: &str, index: usize) -> Result<(), DriverError>;

    /// Presses and releases a key, e.g. `Escape`.
    async fn press_key(&self, key: &str) -> Result<(), DriverError>;

    /// Console error messages seen so far.
    ///
    /// Backends that cannot capture the console report none.
    async fn console_errors(&self) -> Result<Vec<String>, DriverError> {
        Ok(Vec::new())
    }

    /// Waits without touching the page.
    async fn pause(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    /// Ends the session.
    async fn close(&self) -> Result<(), DriverError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_driver_is_object_safe() {
        fn _takes_ref(_: &dyn PageDriver) {}
        fn _takes_box(_: Box<dyn PageDriver>) {}
    }

    #[test]
    fn test_script_args_are_positional() {
        let script = Script::new("scrollTo", "return arguments[1];")
            .arg(".tabs-v0")
            .arg(100);
        assert_eq!(script.args, vec![Value::from(".tabs-v0"), Value::from(100)]);
    }
}
