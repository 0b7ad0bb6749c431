//! Responsive suite runs against a scripted page.

mod support;

use pretty_assertions::assert_eq;
use printdesk_uicheck::config::Breakpoint;
use printdesk_uicheck::scripts;
use printdesk_uicheck::responsive::{self, test_modal_interactions, test_tab_scrolling};
use printdesk_uicheck::{CheckError, ResponsiveConfig, TestStatus};
use serde_json::json;
use support::FakePage;

const MAIN_CSS: &str = "http://localhost:5000/static/css/main.css";
const DASHBOARD: &str = "http://localhost:5000/dashboard";
const TABS: &str = ".tab-v0-active, .tab-v0-inactive";
const TRIGGERS: &str = "[data-modal-trigger], .btn-v0-danger, .btn-v0-warning";
const CLOSE: &str = ".modal-close, [data-modal-close]";

fn config() -> ResponsiveConfig {
    ResponsiveConfig {
        breakpoints: vec![
            Breakpoint::new("mobile-portrait", 320, 568),
            Breakpoint::new("desktop", 1440, 900),
        ],
        ..ResponsiveConfig::default()
    }
}

fn themed_page() -> FakePage {
    FakePage::new().asset(MAIN_CSS, 200, 8_000).answer(
        scripts::ROOT_PROPERTIES,
        json!({"--color-primary": "#007AFF", "--spacing-md": "16px", "--radius-md": "12px"}),
    )
}

fn no_overflow() -> serde_json::Value {
    json!({"scrollWidth": 800, "clientWidth": 800, "scrollLeft": 0})
}

#[tokio::test]
async fn css_loading_passes_with_theme_variables() {
    let page = themed_page().console_error("Failed to load resource: main.css");

    let result = responsive::test_css_loading(&page, &config()).await;

    assert_eq!(result.status, TestStatus::Pass);
    assert_eq!(result.errors, Some(1));
    let vars = result.css_variables.unwrap();
    assert_eq!(vars.primary_color, "#007AFF");
    assert_eq!(vars.radius_md, "12px");
    assert_eq!(page.calls_to("navigate"), vec![format!("navigate {DASHBOARD}")]);
}

#[tokio::test]
async fn css_loading_fails_without_primary_color() {
    let page = FakePage::new().asset(MAIN_CSS, 200, 8_000).answer(
        scripts::ROOT_PROPERTIES,
        json!({"--color-primary": "", "--spacing-md": "16px", "--radius-md": ""}),
    );

    let result = responsive::test_css_loading(&page, &config()).await;

    assert_eq!(result.status, TestStatus::Fail);
    assert_eq!(
        result.error.as_deref(),
        Some("CSS variables not found - architecture may have issues")
    );
}

#[tokio::test]
async fn failed_css_aborts_without_breakpoints() {
    let page = FakePage::new().asset(MAIN_CSS, 500, 0);

    let err = responsive::run_responsive_tests(&page, &config())
        .await
        .unwrap_err();

    assert!(matches!(err, CheckError::CssLoadingFailed(ref msg) if msg == "CSS loading failed (500)"));
    assert!(page.calls_to("viewport").is_empty());
    assert_eq!(page.calls().last().map(String::as_str), Some("close"));
}

#[tokio::test]
async fn tabs_that_fit_pass_and_are_clicked() {
    let page = FakePage::new()
        .answer(scripts::SCROLL_METRICS, no_overflow())
        .count(TABS, 3);
    let breakpoint = Breakpoint::new("desktop", 1440, 900);

    let result = test_tab_scrolling(&page, &config(), &breakpoint).await;

    assert!(result.passed());
    assert_eq!(result.viewport, "1440x900");
    assert_eq!(result.tab_scrolling.can_scroll, Some(false));
    assert_eq!(result.tab_scrolling.interaction_test, Some(TestStatus::Pass));
    assert_eq!(page.calls_to("click"), vec![format!("click {TABS} [0]")]);
    assert!(page.calls_to("evaluate scrollTo").is_empty());
}

#[tokio::test]
async fn overflowing_tabs_must_scroll() {
    let page = FakePage::new()
        .answer(
            scripts::SCROLL_METRICS,
            json!({"scrollWidth": 900, "clientWidth": 320, "scrollLeft": 0}),
        )
        .answer(
            scripts::SCROLL_METRICS,
            json!({"scrollWidth": 900, "clientWidth": 320, "scrollLeft": 100}),
        )
        .answer(scripts::SCROLL_TO, json!(100))
        .answer(scripts::OVERFLOW_X, json!("auto"));
    let breakpoint = Breakpoint::new("mobile-portrait", 320, 568);

    let result = test_tab_scrolling(&page, &config(), &breakpoint).await;

    assert!(result.passed());
    assert_eq!(result.tab_scrolling.can_scroll, Some(true));
    assert_eq!(result.tab_scrolling.interaction_test, None);
    assert_eq!(page.calls_to("evaluate scrollTo").len(), 1);
}

#[tokio::test]
async fn stuck_scroll_fails() {
    let page = FakePage::new()
        .answer(
            scripts::SCROLL_METRICS,
            json!({"scrollWidth": 900, "clientWidth": 320, "scrollLeft": 0}),
        )
        .answer(scripts::SCROLL_TO, json!(0))
        .answer(scripts::OVERFLOW_X, json!("hidden"));
    let breakpoint = Breakpoint::new("mobile-portrait", 320, 568);

    let result = test_tab_scrolling(&page, &config(), &breakpoint).await;

    assert_eq!(result.tab_scrolling.status, TestStatus::Fail);
    assert_eq!(
        result.tab_scrolling.error.as_deref(),
        Some("Horizontal scrolling not working")
    );
    assert_eq!(result.tab_scrolling.can_scroll, None);
}

#[tokio::test]
async fn missing_tab_bar_fails() {
    let page = FakePage::new().missing(".tabs-v0");
    let breakpoint = Breakpoint::new("desktop", 1440, 900);

    let result = test_tab_scrolling(&page, &config(), &breakpoint).await;

    assert_eq!(result.tab_scrolling.status, TestStatus::Fail);
    assert!(result.tab_scrolling.error.unwrap().contains(".tabs-v0"));
}

#[tokio::test]
async fn modal_skipped_without_triggers() {
    let page = FakePage::new();
    let result = test_modal_interactions(&page, &config(), &Breakpoint::new("desktop", 1440, 900)).await;
    assert_eq!(result.status, TestStatus::Skipped);
}

#[tokio::test]
async fn modal_passes_and_closes_with_button() {
    let page = FakePage::new()
        .count(TRIGGERS, 2)
        .count(CLOSE, 1)
        .answer(
            scripts::ELEMENT_STYLE,
            json!({"zIndex": "1000", "display": "flex", "visibility": "visible", "isVisible": true}),
        );

    let result = test_modal_interactions(&page, &config(), &Breakpoint::new("desktop", 1440, 900)).await;

    assert_eq!(result.status, TestStatus::Pass);
    assert_eq!(result.z_index.as_deref(), Some("1000"));
    assert_eq!(
        page.calls_to("click"),
        vec![format!("click {TRIGGERS} [0]"), format!("click {CLOSE} [0]")]
    );
    assert!(page.calls_to("key").is_empty());
}

#[tokio::test]
async fn modal_closes_with_escape_without_button() {
    let page = FakePage::new().count(TRIGGERS, 1).answer(
        scripts::ELEMENT_STYLE,
        json!({"zIndex": "400", "isVisible": true}),
    );

    let result = test_modal_interactions(&page, &config(), &Breakpoint::new("desktop", 1440, 900)).await;

    assert_eq!(result.status, TestStatus::Pass);
    assert_eq!(page.calls_to("key"), vec!["key Escape"]);
}

#[tokio::test]
async fn modal_below_threshold_fails() {
    let page = FakePage::new().count(TRIGGERS, 1).answer(
        scripts::ELEMENT_STYLE,
        json!({"zIndex": "auto", "isVisible": true}),
    );

    let result = test_modal_interactions(&page, &config(), &Breakpoint::new("desktop", 1440, 900)).await;

    assert_eq!(result.status, TestStatus::Fail);
    assert_eq!(result.error.as_deref(), Some("Modal z-index issue (z-index: auto)"));
}

#[tokio::test]
async fn modal_that_never_opens_fails() {
    let page = FakePage::new()
        .count(TRIGGERS, 1)
        .answer(scripts::ELEMENT_STYLE, serde_json::Value::Null);

    let result = test_modal_interactions(&page, &config(), &Breakpoint::new("desktop", 1440, 900)).await;

    assert_eq!(
        result.error.as_deref(),
        Some("Modal did not appear after trigger click")
    );
}

#[tokio::test]
async fn full_run_covers_every_breakpoint_in_order() {
    let page = themed_page()
        .answer(scripts::SCROLL_METRICS, no_overflow())
        .count(TABS, 1);

    let report = responsive::run_responsive_tests(&page, &config()).await.unwrap();

    assert_eq!(page.calls_to("viewport"), vec!["viewport 320x568", "viewport 1440x900"]);
    assert_eq!(report.summary.total, 2);
    assert_eq!(report.summary.passed, 2);
    assert_eq!(report.summary.success_rate, 100.0);
    assert!(!report.has_failures());
    assert!(
        report
            .results
            .iter()
            .all(|r| r.modal.as_ref().map(|m| m.status) == Some(TestStatus::Skipped))
    );
    assert_eq!(page.calls().last().map(String::as_str), Some("close"));

    let value = serde_json::to_value(&report).unwrap();
    assert_eq!(value["summary"]["successRate"], json!(100.0));
    assert_eq!(value["results"][0]["tabScrolling"]["status"], json!("PASS"));
}

#[tokio::test]
async fn one_failing_breakpoint_does_not_stop_the_rest() {
    let page = themed_page()
        .answer(
            scripts::SCROLL_METRICS,
            json!({"scrollWidth": 900, "clientWidth": 320, "scrollLeft": 0}),
        )
        .answer(scripts::SCROLL_TO, json!(0))
        .answer(scripts::OVERFLOW_X, json!("auto"));

    let report = responsive::run_responsive_tests(&page, &config()).await.unwrap();

    assert_eq!(report.summary.total, 2);
    assert_eq!(report.summary.failed, 2);
    assert_eq!(report.summary.success_rate, 0.0);
    assert!(report.has_failures());
}
