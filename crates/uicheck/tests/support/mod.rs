//! Scripted in-memory page driver.

#![allow(dead_code)]

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use printdesk_uicheck::{
    AssetResponse, DriverError, NavigateOptions, NavigationResponse, PageDriver, Script, Viewport,
};
use serde_json::Value;

/// Answers come from tables keyed by URL, script name or selector. Every call
/// is appended to a log so tests can assert on the sequence.
#[derive(Default)]
pub struct FakePage {
    assets: HashMap<String, AssetResponse>,
    broken_urls: HashSet<String>,
    answers: Mutex<HashMap<String, VecDeque<Value>>>,
    counts: HashMap<String, usize>,
    missing_selectors: HashSet<String>,
    console: Vec<String>,
    log: Mutex<Vec<String>>,
}

impl FakePage {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serves `url` with `status` and a body of `size` bytes.
    pub fn asset(mut self, url: &str, status: u16, size: u64) -> Self {
        self.assets.insert(
            url.to_owned(),
            AssetResponse {
                status,
                size_bytes: size,
            },
        );
        self
    }

    /// Navigating to or fetching `url` fails.
    pub fn broken(mut self, url: &str) -> Self {
        self.broken_urls.insert(url.to_owned());
        self
    }

    /// Queues an answer for a script. The last answer repeats.
    pub fn answer(self, name: &str, answer: Value) -> Self {
        self.answers
            .lock()
            .unwrap()
            .entry(name.to_owned())
            .or_default()
            .push_back(answer);
        self
    }

    /// `selector` matches `n` elements.
    pub fn count(mut self, selector: &str, n: usize) -> Self {
        self.counts.insert(selector.to_owned(), n);
        self
    }

    /// `wait_for_selector` on `selector` times out.
    pub fn missing(mut self, selector: &str) -> Self {
        self.missing_selectors.insert(selector.to_owned());
        self
    }

    pub fn console_error(mut self, message: &str) -> Self {
        self.console.push(message.to_owned());
        self
    }

    /// Calls made so far.
    pub fn calls(&self) -> Vec<String> {
        self.log.lock().unwrap().clone()
    }

    /// Calls starting with `prefix`.
    pub fn calls_to(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }

    fn record(&self, call: String) {
        self.log.lock().unwrap().push(call);
    }
}

#[async_trait]
impl PageDriver for FakePage {
    async fn navigate(
        &self,
        url: &str,
        _options: NavigateOptions,
    ) -> Result<NavigationResponse, DriverError> {
        self.record(format!("navigate {url}"));
        if self.broken_urls.contains(url) {
            return Err(DriverError::navigation(url, "net::ERR_CONNECTION_REFUSED"));
        }
        Ok(NavigationResponse { status: Some(200) })
    }

    async fn fetch_asset(&self, url: &str, _timeout: Duration) -> Result<AssetResponse, DriverError> {
        self.record(format!("fetch {url}"));
        if self.broken_urls.contains(url) {
            return Err(DriverError::Protocol("connection refused".into()));
        }
        Ok(self.assets.get(url).copied().unwrap_or(AssetResponse {
            status: 404,
            size_bytes: 0,
        }))
    }

    async fn set_viewport(&self, viewport: Viewport) -> Result<(), DriverError> {
        self.record(format!("viewport {}x{}", viewport.width, viewport.height));
        Ok(())
    }

    async fn evaluate(&self, script: &Script) -> Result<Value, DriverError> {
        self.record(format!("evaluate {}", script.name));
        let mut answers = self.answers.lock().unwrap();
        let Some(queue) = answers.get_mut(script.name.as_ref()) else {
            return Err(DriverError::script(script.name.clone(), "no scripted answer"));
        };
        let answer = if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        };
        Ok(answer.unwrap_or(Value::Null))
    }

    async fn wait_for_selector(&self, selector: &str, timeout: Duration) -> Result<(), DriverError> {
        self.record(format!("wait {selector}"));
        if self.missing_selectors.contains(selector) {
            return Err(DriverError::Timeout(format!(
                "waiting for '{selector}' after {}ms",
                timeout.as_millis()
            )));
        }
        Ok(())
    }

    async fn query_count(&self, selector: &str) -> Result<usize, DriverError> {
        Ok(self.counts.get(selector).copied().unwrap_or(0))
    }

    async fn click(&self, selector: &str, index: usize) -> Result<(), DriverError> {
        self.record(format!("click {selector} [{index}]"));
        if index >= self.counts.get(selector).copied().unwrap_or(0) {
            return Err(DriverError::SelectorNotFound(selector.to_owned()));
        }
        Ok(())
    }

    async fn press_key(&self, key: &str) -> Result<(), DriverError> {
        self.record(format!("key {key}"));
        Ok(())
    }

    async fn console_errors(&self) -> Result<Vec<String>, DriverError> {
        Ok(self.console.clone())
    }

    async fn pause(&self, _duration: Duration) {}

    async fn close(&self) -> Result<(), DriverError> {
        self.record("close".to_owned());
        Ok(())
    }
}
