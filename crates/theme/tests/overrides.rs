//! Loading override documents on top of the built-in tokens.

use pretty_assertions::assert_eq;
use printdesk_theme::{Theme, ThemeError};

#[test]
fn test_toml_override_flows_into_aliases() {
    let overrides = Theme::from_toml_str(
        r##"
        [colors]
        system-blue = "#0A84FF"

        [spacing]
        4 = "18px"

        [aliases]
        color-accent = "colors.apple-orange.600"
        "##,
    )
    .unwrap();

    let mut theme = Theme::default();
    theme.merge(overrides);
    let vars = theme.css_variables();

    assert_eq!(vars["--color-primary"], "#0A84FF");
    assert_eq!(vars["--spacing-md"], "18px");
    assert_eq!(vars["--color-accent"], "#FF9500");
    assert_eq!(vars["--color-danger"], "#FF3B30");
}

#[test]
fn test_invalid_color_is_rejected() {
    let err = Theme::from_json_str(r#"{"colors": {"apple-blue": {"600": "bluish"}}}"#).unwrap_err();

    match err {
        ThemeError::InvalidColor { token, value } => {
            assert_eq!(token, "apple-blue.600");
            assert_eq!(value, "bluish");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_malformed_documents() {
    assert!(matches!(
        Theme::from_json_str("{\"colors\": 3}"),
        Err(ThemeError::Json(_))
    ));
    assert!(matches!(
        Theme::from_toml_str("colors = ["),
        Err(ThemeError::Toml(_))
    ));
}

#[test]
fn test_round_trip_through_json_keeps_order() {
    let theme = Theme::default();
    let json = serde_json::to_string(&theme).unwrap();
    let back = Theme::from_json_str(&json).unwrap();

    assert_eq!(back, theme);
    assert_eq!(back.to_css(), theme.to_css());
}
