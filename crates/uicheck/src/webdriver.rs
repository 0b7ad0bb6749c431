//! W3C WebDriver page driver.
//!
//! Talks JSON over HTTP to a WebDriver server such as `chromedriver`:
//!
//! ```text
//! POST   /session                          new headless browser
//! POST   /session/{id}/url                 navigate
//! POST   /session/{id}/execute/sync        evaluate a script
//! POST   /session/{id}/window/rect         resize the outer window
//! POST   /session/{id}/elements            query
//! POST   /session/{id}/element/{el}/click  click
//! POST   /session/{id}/actions             key press
//! DELETE /session/{id}                     close
//! ```
//!
//! Static assets are fetched with a plain HTTP GET, outside the browser.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::debug;
use url::Url;

use crate::driver::{
    AssetResponse, NavigateOptions, NavigationResponse, PageDriver, Script, Viewport,
};
use crate::error::DriverError;

/// Key under which WebDriver returns element references.
const ELEMENT_KEY: &str = "element-6066-11e4-a52e-4f735466cecf";

const POLL_INTERVAL: Duration = Duration::from_millis(100);

const INNER_SIZE_SCRIPT: &str = "return [window.innerWidth, window.innerHeight];";

/// Browser launch options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserOptions {
    /// WebDriver `browserName` capability.
    pub browser_name: String,
    /// Command line switches passed to the browser.
    pub args: Vec<String>,
    /// Upper bound for a single WebDriver command.
    pub command_timeout: Duration,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            browser_name: "chrome".to_owned(),
            args: ["--headless", "--no-sandbox", "--disable-setuid-sandbox"]
                .map(String::from)
                .to_vec(),
            command_timeout: Duration::from_secs(60),
        }
    }
}

impl BrowserOptions {
    fn capabilities(&self) -> Value {
        json!({
            "capabilities": {
                "alwaysMatch": {
                    "browserName": self.browser_name,
                    "goog:chromeOptions": { "args": self.args },
                }
            }
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewSession {
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct WireError {
    error: String,
    #[serde(default)]
    message: String,
}

impl WireError {
    fn into_driver_error(self) -> DriverError {
        match self.error.as_str() {
            "no such element" => DriverError::SelectorNotFound(self.message),
            "timeout" | "script timeout" => DriverError::Timeout(self.message),
            "javascript error" => DriverError::script("script", self.message),
            "unknown command" | "unsupported operation" => DriverError::Unsupported(self.message),
            _ => DriverError::Protocol(format!("{}: {}", self.error, self.message)),
        }
    }
}

/// A browser session driven over the WebDriver protocol.
#[derive(Debug)]
pub struct WebDriverPage {
    client: Client,
    session_url: String,
    session_id: String,
}

impl WebDriverPage {
    /// Starts a new browser session on the WebDriver server at `endpoint`.
    pub async fn connect(endpoint: &str, options: &BrowserOptions) -> Result<Self, DriverError> {
        let base = Url::parse(endpoint)
            .map_err(|e| DriverError::Protocol(format!("invalid WebDriver url '{endpoint}': {e}")))?;
        let root = base.as_str().trim_end_matches('/').to_owned();

        let client = Client::builder()
            .timeout(options.command_timeout)
            .build()?;

        let response = client
            .post(format!("{root}/session"))
            .json(&options.capabilities())
            .send()
            .await?;
        let value = unwrap_response(response).await?;
        let session: NewSession = serde_json::from_value(value)
            .map_err(|e| DriverError::Protocol(format!("unexpected new session reply: {e}")))?;

        debug!(session = %session.session_id, browser = %options.browser_name, "WebDriver session started");
        Ok(Self {
            client,
            session_url: format!("{root}/session/{}", session.session_id),
            session_id: session.session_id,
        })
    }

    /// WebDriver session id.
    #[must_use]
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    async fn command(
        &self,
        method: Method,
        path: &str,
        body: Option<Value>,
    ) -> Result<Value, DriverError> {
        let mut request = self
            .client
            .request(method, format!("{}{path}", self.session_url));
        if let Some(body) = body {
            request = request.json(&body);
        }
        unwrap_response(request.send().await?).await
    }

    async fn resize_window(&self, width: u32, height: u32) -> Result<(), DriverError> {
        self.command(
            Method::POST,
            "/window/rect",
            Some(json!({ "width": width, "height": height })),
        )
        .await?;
        Ok(())
    }

    async fn find_elements(&self, selector: &str) -> Result<Vec<String>, DriverError> {
        let value = self
            .command(
                Method::POST,
                "/elements",
                Some(json!({ "using": "css selector", "value": selector })),
            )
            .await?;

        let Value::Array(elements) = value else {
            return Err(DriverError::Protocol(format!(
                "expected element list for '{selector}'"
            )));
        };
        elements
            .iter()
            .map(|el| {
                el.get(ELEMENT_KEY)
                    .and_then(Value::as_str)
                    .map(str::to_owned)
                    .ok_or_else(|| DriverError::Protocol("element reference missing".to_owned()))
            })
            .collect()
    }
}

/// Unwraps a WebDriver `{"value": ...}` envelope, mapping error replies.
async fn unwrap_response(response: reqwest::Response) -> Result<Value, DriverError> {
    let status = response.status();
    let body: Value = response.json().await?;
    let value = match body {
        Value::Object(mut map) => map.remove("value").unwrap_or(Value::Null),
        other => other,
    };

    if status.is_success() {
        return Ok(value);
    }
    match serde_json::from_value::<WireError>(value) {
        Ok(wire) => Err(wire.into_driver_error()),
        Err(_) => Err(DriverError::Protocol(format!("HTTP {status} without error body"))),
    }
}

/// Outer size that yields `target` when the browser chrome takes
/// `target - inner` pixels.
fn compensate(target: u32, inner: u32) -> u32 {
    target.saturating_mul(2).saturating_sub(inner).max(1)
}

/// WebDriver code point for a named key.
fn key_code(key: &str) -> Option<String> {
    let code = match key {
        "Escape" => '\u{E00C}',
        "Enter" => '\u{E007}',
        "Tab" => '\u{E004}',
        "Backspace" => '\u{E003}',
        "ArrowLeft" => '\u{E012}',
        "ArrowRight" => '\u{E014}',
        _ => {
            let mut chars = key.chars();
            return match (chars.next(), chars.next()) {
                (Some(c), None) => Some(c.to_string()),
                _ => None,
            };
        }
    };
    Some(code.to_string())
}

#[async_trait]
impl PageDriver for WebDriverPage {
    /// WebDriver finishes navigation per the session's page load strategy,
    /// so `wait_until` is not distinguished and no status is reported.
    async fn navigate(
        &self,
        url: &str,
        options: NavigateOptions,
    ) -> Result<NavigationResponse, DriverError> {
        debug!(url, "navigate");
        let navigation = self.command(Method::POST, "/url", Some(json!({ "url": url })));
        match tokio::time::timeout(options.timeout, navigation).await {
            Err(_) => Err(DriverError::Timeout(format!(
                "navigating to {url} after {}ms",
                options.timeout.as_millis()
            ))),
            Ok(Err(DriverError::Timeout(reason))) => Err(DriverError::Timeout(reason)),
            Ok(Err(err)) => Err(DriverError::navigation(url, err)),
            Ok(Ok(_)) => Ok(NavigationResponse { status: None }),
        }
    }

    async fn fetch_asset(&self, url: &str, timeout: Duration) -> Result<AssetResponse, DriverError> {
        let response = self
            .client
            .get(url)
            .timeout(timeout)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    DriverError::Timeout(format!("fetching {url}"))
                } else {
                    DriverError::Http(e)
                }
            })?;
        let status = response.status().as_u16();
        let body = response.bytes().await?;
        debug!(url, status, size = body.len(), "asset fetched");
        Ok(AssetResponse {
            status,
            size_bytes: body.len() as u64,
        })
    }

    /// `window/rect` sizes the outer window. The inner size is read back
    /// and the window grown by the browser chrome once, so the page sees
    /// the requested CSS viewport.
    async fn set_viewport(&self, viewport: Viewport) -> Result<(), DriverError> {
        self.resize_window(viewport.width, viewport.height).await?;

        let inner = self
            .command(
                Method::POST,
                "/execute/sync",
                Some(json!({ "script": INNER_SIZE_SCRIPT, "args": [] })),
            )
            .await?;
        let (inner_width, inner_height) = serde_json::from_value::<(u32, u32)>(inner)
            .map_err(|e| DriverError::Protocol(format!("unexpected inner size reply: {e}")))?;

        if (inner_width, inner_height) != (viewport.width, viewport.height) {
            let width = compensate(viewport.width, inner_width);
            let height = compensate(viewport.height, inner_height);
            debug!(inner_width, inner_height, width, height, "compensating for browser chrome");
            self.resize_window(width, height).await?;
        }
        Ok(())
    }

    async fn evaluate(&self, script: &Script) -> Result<Value, DriverError> {
        debug!(script = %script.name, "evaluate");
        let result = self
            .command(
                Method::POST,
                "/execute/sync",
                Some(json!({ "script": script.source, "args": script.args })),
            )
            .await;
        match result {
            Err(DriverError::Script { message, .. }) => {
                Err(DriverError::script(script.name.clone(), message))
            }
            other => other,
        }
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), DriverError> {
        let started = Instant::now();
        loop {
            if !self.find_elements(selector).await?.is_empty() {
                return Ok(());
            }
            if started.elapsed() >= timeout {
                return Err(DriverError::Timeout(format!(
                    "waiting for '{selector}' after {}ms",
                    timeout.as_millis()
                )));
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }
    }

    async fn query_count(&self, selector: &str) -> Result<usize, DriverError> {
        Ok(self.find_elements(selector).await?.len())
    }

    async fn click(&self, selector: &str, index: usize) -> Result<(), DriverError> {
        let elements = self.find_elements(selector).await?;
        let element = elements
            .get(index)
            .ok_or_else(|| DriverError::SelectorNotFound(format!("{selector} [{index}]")))?;
        self.command(Method::POST, &format!("/element/{element}/click"), Some(json!({})))
            .await?;
        Ok(())
    }

    async fn press_key(&self, key: &str) -> Result<(), DriverError> {
        let code = key_code(key).ok_or_else(|| DriverError::Unsupported(format!("key '{key}'")))?;
        let actions = json!({
            "actions": [{
                "type": "key",
                "id": "keyboard",
                "actions": [
                    { "type": "keyDown", "value": code },
                    { "type": "keyUp", "value": code },
                ],
            }]
        });
        self.command(Method::POST, "/actions", Some(actions)).await?;
        Ok(())
    }

    async fn close(&self) -> Result<(), DriverError> {
        self.command(Method::DELETE, "", None).await?;
        debug!(session = %self.session_id, "WebDriver session closed");
        Ok(())
    }
}
