//! Named in-page scripts and their decoded results.
//!
//! Each one is a named [`Script`]. Its JSON answer is decoded with
//! [`decode`] into one of the snapshot types below.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::driver::Script;
use crate::error::DriverError;

// ============================================================================
// NAMES
// ============================================================================

/// Layout shifts, stylesheet timings and stylesheet failures.
pub const PERFORMANCE: &str = "performanceSnapshot";
/// Skip links, labels, headings and ARIA usage.
pub const ACCESSIBILITY: &str = "accessibilitySnapshot";
/// Computed custom properties on `:root`.
pub const ROOT_PROPERTIES: &str = "rootProperties";
/// Scroll width, client width and scroll offset of an element.
pub const SCROLL_METRICS: &str = "scrollMetrics";
/// Sets an element's horizontal scroll offset.
pub const SCROLL_TO: &str = "scrollTo";
/// Computed `overflow-x` of an element.
pub const OVERFLOW_X: &str = "overflowX";
/// Computed stacking and visibility of an element.
pub const ELEMENT_STYLE: &str = "elementStyle";

// ============================================================================
// SOURCES
// ============================================================================

const PERFORMANCE_SOURCE: &str = r#"
return new Promise((resolve) => {
  const layoutShifts = [];
  let observer = null;
  try {
    observer = new PerformanceObserver((list) => {
      for (const entry of list.getEntries()) {
        layoutShifts.push({
          value: entry.value,
          hadRecentInput: entry.hadRecentInput,
          sources: (entry.sources || []).map((s) => (s.node && s.node.tagName) || 'unknown'),
        });
      }
    });
    observer.observe({ type: 'layout-shift', buffered: true });
  } catch (e) {
    observer = null;
  }
  const cssLoadTimes = performance.getEntriesByType('resource')
    .filter((e) => e.initiatorType === 'link' && e.name.includes('.css'))
    .map((e) => ({ url: e.name, loadTime: e.responseEnd - e.requestStart, size: e.transferSize || 0 }));
  const cssErrors = Array.from(document.querySelectorAll('link[rel="stylesheet"]'))
    .filter((link) => !link.sheet)
    .map((link) => ({ url: link.href, error: 'Failed to load CSS file' }));
  setTimeout(() => {
    if (observer) observer.disconnect();
    resolve({ layoutShifts, cssLoadTimes, cssErrors });
  }, 100);
});
"#;

const ACCESSIBILITY_SOURCE: &str = r##"
const inputs = Array.from(document.querySelectorAll('input, select, textarea'));
const labelled = inputs.filter((input) =>
  (input.id && document.querySelector(`label[for="${input.id}"]`)) ||
  input.closest('label') ||
  input.getAttribute('aria-label') ||
  input.getAttribute('aria-labelledby'));
return {
  hasSkipLinks: document.querySelectorAll('a[href="#main-content"], .sr-only').length > 0,
  formLabelsRatio: inputs.length > 0 ? labelled.length / inputs.length : 1,
  hasHeadings: document.querySelectorAll('h1, h2, h3, h4, h5, h6').length > 0,
  buttonCount: document.querySelectorAll('button, .btn, .btn-v0-primary, .btn-v0-secondary').length,
  ariaElements: document.querySelectorAll('[role], [aria-label], [aria-labelledby], [aria-describedby]').length,
};
"##;

const ROOT_PROPERTIES_SOURCE: &str = r"
const style = getComputedStyle(document.documentElement);
const out = {};
for (const name of arguments[0]) {
  out[name] = style.getPropertyValue(name).trim();
}
return out;
";

const SCROLL_METRICS_SOURCE: &str = r"
const el = document.querySelector(arguments[0]);
if (!el) return null;
return { scrollWidth: el.scrollWidth, clientWidth: el.clientWidth, scrollLeft: el.scrollLeft };
";

const SCROLL_TO_SOURCE: &str = r"
const el = document.querySelector(arguments[0]);
if (!el) return null;
el.scrollLeft = arguments[1];
return el.scrollLeft;
";

const OVERFLOW_X_SOURCE: &str = r"
const el = document.querySelector(arguments[0]);
return el ? getComputedStyle(el).overflowX : null;
";

const ELEMENT_STYLE_SOURCE: &str = r"
const el = document.querySelector(arguments[0]);
if (!el) return null;
const style = getComputedStyle(el);
const rect = el.getBoundingClientRect();
return {
  zIndex: style.zIndex,
  display: style.display,
  visibility: style.visibility,
  isVisible: rect.width > 0 && rect.height > 0,
};
";

// ============================================================================
// CONSTRUCTORS
// ============================================================================

/// Snapshot of layout shifts and stylesheet loading on the current page.
#[must_use]
pub fn performance() -> Script {
    Script::new(PERFORMANCE, PERFORMANCE_SOURCE)
}

/// Accessibility feature counts on the current page.
#[must_use]
pub fn accessibility() -> Script {
    Script::new(ACCESSIBILITY, ACCESSIBILITY_SOURCE)
}

/// Computed values of the named custom properties on `:root`.
#[must_use]
pub fn root_properties(names: &[&str]) -> Script {
    Script::new(ROOT_PROPERTIES, ROOT_PROPERTIES_SOURCE).arg(names.to_vec())
}

/// Scroll metrics of the first element matching `selector`.
#[must_use]
pub fn scroll_metrics(selector: &str) -> Script {
    Script::new(SCROLL_METRICS, SCROLL_METRICS_SOURCE).arg(selector)
}

/// Scrolls the first element matching `selector` to `left` pixels.
#[must_use]
pub fn scroll_to(selector: &str, left: u32) -> Script {
    Script::new(SCROLL_TO, SCROLL_TO_SOURCE)
        .arg(selector)
        .arg(left)
}

/// Computed `overflow-x` of the first element matching `selector`.
#[must_use]
pub fn overflow_x(selector: &str) -> Script {
    Script::new(OVERFLOW_X, OVERFLOW_X_SOURCE).arg(selector)
}

/// Stacking and visibility of the first element matching `selector`.
#[must_use]
pub fn element_style(selector: &str) -> Script {
    Script::new(ELEMENT_STYLE, ELEMENT_STYLE_SOURCE).arg(selector)
}

/// Decodes a script answer, naming the script on failure.
pub fn decode<T: DeserializeOwned>(script: &Script, value: Value) -> Result<T, DriverError> {
    serde_json::from_value(value).map_err(|err| DriverError::script(script.name.clone(), err))
}

// ============================================================================
// SNAPSHOTS
// ============================================================================

/// One `layout-shift` performance entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutShift {
    /// Shift score.
    pub value: f64,
    /// True when the shift followed user input.
    #[serde(default)]
    pub had_recent_input: bool,
    /// Tag names of the shifted nodes.
    #[serde(default)]
    pub sources: Vec<String>,
}

/// Load timing of one stylesheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CssTiming {
    /// Stylesheet URL.
    pub url: String,
    /// `responseEnd - requestStart` in milliseconds.
    pub load_time: f64,
    /// Transfer size in bytes.
    #[serde(default)]
    pub size: u64,
}

/// A stylesheet that failed to load.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CssLoadError {
    /// Stylesheet URL.
    pub url: String,
    /// Description.
    pub error: String,
}

/// Answer of the [`performance`] script.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PerformanceSnapshot {
    /// All observed layout shifts.
    pub layout_shifts: Vec<LayoutShift>,
    /// Timings of stylesheets loaded via `<link>`.
    pub css_load_times: Vec<CssTiming>,
    /// Stylesheets without a parsed sheet.
    pub css_errors: Vec<CssLoadError>,
}

impl PerformanceSnapshot {
    /// Shifts not caused by user input.
    pub fn unexpected_shifts(&self) -> impl Iterator<Item = &LayoutShift> {
        self.layout_shifts.iter().filter(|s| !s.had_recent_input)
    }

    /// Cumulative layout shift: sum of the unexpected shifts.
    #[must_use]
    pub fn cls(&self) -> f64 {
        self.unexpected_shifts().map(|s| s.value).sum()
    }

    /// Mean stylesheet load time, 0 when nothing was timed.
    #[must_use]
    pub fn avg_css_load_time(&self) -> f64 {
        if self.css_load_times.is_empty() {
            return 0.0;
        }
        let total: f64 = self.css_load_times.iter().map(|t| t.load_time).sum();
        total / self.css_load_times.len() as f64
    }
}

/// Answer of the [`accessibility`] script.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccessibilitySnapshot {
    /// Skip link or screen-reader-only content present.
    pub has_skip_links: bool,
    /// Labelled inputs / all inputs, 1 when there are no inputs.
    pub form_labels_ratio: f64,
    /// At least one heading present.
    pub has_headings: bool,
    /// Number of buttons.
    pub button_count: u64,
    /// Elements carrying a role or ARIA labelling attribute.
    pub aria_elements: u64,
}

/// Answer of the [`scroll_metrics`] script.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollMetrics {
    /// Content width.
    pub scroll_width: f64,
    /// Visible width.
    pub client_width: f64,
    /// Current horizontal offset.
    #[serde(default)]
    pub scroll_left: f64,
}

impl ScrollMetrics {
    /// Content is wider than the container.
    #[must_use]
    pub fn can_scroll(&self) -> bool {
        self.scroll_width > self.client_width
    }
}

/// Answer of the [`element_style`] script.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementStyle {
    /// Computed `z-index`, e.g. `"1000"` or `"auto"`.
    pub z_index: String,
    /// Computed `display`.
    #[serde(default)]
    pub display: String,
    /// Computed `visibility`.
    #[serde(default)]
    pub visibility: String,
    /// Bounding box has a non-zero area.
    pub is_visible: bool,
}

impl ElementStyle {
    /// Numeric z-index; `auto` and other keywords have none.
    #[must_use]
    pub fn z_index_value(&self) -> Option<f64> {
        self.z_index.trim().parse().ok()
    }
}

/// Answer of the [`root_properties`] script, in request order.
pub type RootProperties = IndexMap<String, String>;
