//! Design token model
//!
//! Tokens are grouped the way the stylesheet architecture groups them:
//! colors, spacing, radii, shadows, typography, blur and motion. Every group
//! is an ordered map so rendered CSS is stable across runs.

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ThemeError;

/// A color token: either a single value or a palette of numbered shades.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ColorToken {
    /// One color, e.g. `system-blue`.
    Single(String),
    /// Shade → color, e.g. `apple-blue.600`.
    Palette(IndexMap<String, String>),
}

/// One step of the type scale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FontSize {
    /// Font size, e.g. `17px`.
    pub size: String,
    /// Line height, e.g. `22px`.
    pub line_height: String,
    /// Numeric font weight, e.g. `600`.
    pub font_weight: String,
}

impl FontSize {
    /// Creates a type scale step.
    pub fn new(
        size: impl Into<String>,
        line_height: impl Into<String>,
        font_weight: impl Into<String>,
    ) -> Self {
        Self {
            size: size.into(),
            line_height: line_height.into(),
            font_weight: font_weight.into(),
        }
    }
}

/// The complete set of design tokens.
///
/// [`Theme::default`] holds the built-in tokens. Deserializing fills absent
/// groups with empty maps instead, so a partial document can be used as an
/// override with [`Theme::merge`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Color tokens.
    #[serde(default)]
    pub colors: IndexMap<String, ColorToken>,
    /// Spacing scale (8-point grid).
    #[serde(default)]
    pub spacing: IndexMap<String, String>,
    /// Border radii.
    #[serde(default)]
    pub radius: IndexMap<String, String>,
    /// Box shadows.
    #[serde(default)]
    pub shadow: IndexMap<String, String>,
    /// Font stacks, first choice first.
    #[serde(default)]
    pub font_family: IndexMap<String, Vec<String>>,
    /// Type scale.
    #[serde(default)]
    pub font_size: IndexMap<String, FontSize>,
    /// Backdrop blur radii.
    #[serde(default)]
    pub blur: IndexMap<String, String>,
    /// Transition timing functions.
    #[serde(default)]
    pub easing: IndexMap<String, String>,
    /// Transition durations.
    #[serde(default)]
    pub duration: IndexMap<String, String>,
    /// Semantic CSS variable (without `--`) → token path, e.g.
    /// `color-primary` → `colors.system-blue`.
    #[serde(default)]
    pub aliases: IndexMap<String, String>,
}

impl Theme {
    /// Parses a theme from JSON.
    ///
    /// Color syntax is checked here. Aliases may point at tokens defined
    /// elsewhere, so they are only checked by [`validate`](Self::validate)
    /// once the document has been merged.
    pub fn from_json_str(input: &str) -> Result<Self, ThemeError> {
        let theme: Self = serde_json::from_str(input)?;
        theme.check_colors()?;
        Ok(theme)
    }

    /// Parses a theme from TOML. See [`from_json_str`](Self::from_json_str).
    pub fn from_toml_str(input: &str) -> Result<Self, ThemeError> {
        let theme: Self = toml::from_str(input)?;
        theme.check_colors()?;
        Ok(theme)
    }

    /// Loads a token file, picking the format from the extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ThemeError> {
        let path = path.as_ref();
        let parse: fn(&str) -> Result<Self, ThemeError> =
            match path.extension().and_then(|ext| ext.to_str()) {
                Some("json") => Self::from_json_str,
                Some("toml") => Self::from_toml_str,
                _ => return Err(ThemeError::UnsupportedFormat(path.to_path_buf())),
            };

        let contents = std::fs::read_to_string(path).map_err(|source| ThemeError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        parse(&contents)
    }

    /// Overlays `overrides` on top of this theme.
    ///
    /// Keys present in `overrides` win. Palettes merge shade by shade.
    pub fn merge(&mut self, overrides: Theme) {
        for (name, token) in overrides.colors {
            match (self.colors.get_mut(&name), token) {
                (Some(ColorToken::Palette(base)), ColorToken::Palette(shades)) => {
                    base.extend(shades);
                }
                (_, token) => {
                    self.colors.insert(name, token);
                }
            }
        }
        self.spacing.extend(overrides.spacing);
        self.radius.extend(overrides.radius);
        self.shadow.extend(overrides.shadow);
        self.font_family.extend(overrides.font_family);
        self.font_size.extend(overrides.font_size);
        self.blur.extend(overrides.blur);
        self.easing.extend(overrides.easing);
        self.duration.extend(overrides.duration);
        self.aliases.extend(overrides.aliases);
    }

    /// Looks up a token by dotted path, e.g. `colors.apple-blue.600`,
    /// `spacing.0.5` or `radius.apple-lg`.
    #[must_use]
    pub fn resolve(&self, path: &str) -> Option<&str> {
        let (group, key) = path.split_once('.')?;
        match group {
            "colors" => self.resolve_color(key),
            "spacing" => self.spacing.get(key).map(String::as_str),
            "radius" => self.radius.get(key).map(String::as_str),
            "shadow" => self.shadow.get(key).map(String::as_str),
            "blur" => self.blur.get(key).map(String::as_str),
            "easing" => self.easing.get(key).map(String::as_str),
            "duration" => self.duration.get(key).map(String::as_str),
            "fontSize" => self.font_size.get(key).map(|f| f.size.as_str()),
            _ => None,
        }
    }

    fn resolve_color(&self, key: &str) -> Option<&str> {
        if let Some(ColorToken::Single(value)) = self.colors.get(key) {
            return Some(value);
        }
        let (name, shade) = key.rsplit_once('.')?;
        match self.colors.get(name)? {
            ColorToken::Palette(shades) => shades.get(shade).map(String::as_str),
            ColorToken::Single(_) => None,
        }
    }

    /// Checks color syntax and that every alias points at a real token.
    pub fn validate(&self) -> Result<(), ThemeError> {
        self.check_colors()?;
        for (alias, path) in &self.aliases {
            if self.resolve(path).is_none() {
                return Err(ThemeError::UnknownToken {
                    alias: alias.clone(),
                    path: path.clone(),
                });
            }
        }
        Ok(())
    }

    fn check_colors(&self) -> Result<(), ThemeError> {
        for (name, token) in &self.colors {
            match token {
                ColorToken::Single(value) => crate::color::check(name, value)?,
                ColorToken::Palette(shades) => {
                    for (shade, value) in shades {
                        crate::color::check(&format!("{name}.{shade}"), value)?;
                    }
                }
            }
        }
        Ok(())
    }
}
