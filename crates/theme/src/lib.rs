//! # Printdesk Theme
//!
//! Design tokens for the print job pages and their rendering as CSS custom
//! properties.
//!
//! ```rust
//! use printdesk_theme::Theme;
//!
//! let theme = Theme::default();
//! let css = theme.to_css();
//!
//! assert!(css.starts_with(":root {"));
//! assert!(css.contains("--color-primary: #007AFF;"));
//! ```
//!
//! Overrides are partial documents merged over the defaults:
//!
//! ```rust
//! use printdesk_theme::Theme;
//!
//! let mut theme = Theme::default();
//! theme.merge(Theme::from_toml_str("[radius]\napple-lg = \"14px\"")?);
//! assert_eq!(theme.css_variables()["--radius-md"], "14px");
//! # Ok::<(), printdesk_theme::ThemeError>(())
//! ```

pub mod color;
mod css;
mod defaults;
pub mod error;
pub mod tokens;

pub use css::REQUIRED_VARIABLES;
pub use error::ThemeError;
pub use tokens::{ColorToken, FontSize, Theme};
