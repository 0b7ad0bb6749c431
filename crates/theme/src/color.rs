//! Color token syntax

use std::sync::LazyLock;

use regex::Regex;

use crate::error::ThemeError;

static HEX_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^#(?:[0-9a-fA-F]{3}|[0-9a-fA-F]{6}|[0-9a-fA-F]{8})$").expect("hex pattern is valid")
});

static RGBA_COLOR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^rgba?\(\s*\d{1,3}\s*,\s*\d{1,3}\s*,\s*\d{1,3}\s*(?:,\s*(?:0|1|0?\.\d+)\s*)?\)$",
    )
    .expect("rgba pattern is valid")
});

/// Returns true for `#rgb`, `#rrggbb`, `#rrggbbaa`, `rgb(...)` and `rgba(...)`.
#[must_use]
pub fn is_valid(value: &str) -> bool {
    HEX_COLOR.is_match(value) || RGBA_COLOR.is_match(value)
}

pub(crate) fn check(token: &str, value: &str) -> Result<(), ThemeError> {
    if is_valid(value) {
        Ok(())
    } else {
        Err(ThemeError::InvalidColor {
            token: token.to_owned(),
            value: value.to_owned(),
        })
    }
}
