//! Theme errors

use std::path::PathBuf;

/// Errors raised while loading or checking a theme.
#[derive(Debug, thiserror::Error)]
pub enum ThemeError {
    /// JSON could not be parsed into a theme.
    #[error("invalid theme JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML could not be parsed into a theme.
    #[error("invalid theme TOML: {0}")]
    Toml(#[from] toml::de::Error),

    /// A color token is not a hex or rgb(a) color.
    #[error("color token '{token}' has invalid value '{value}'")]
    InvalidColor {
        /// Token name, e.g. `apple-blue.600`.
        token: String,
        /// The rejected value.
        value: String,
    },

    /// An alias points at a token that does not exist.
    #[error("alias '--{alias}' refers to unknown token '{path}'")]
    UnknownToken {
        /// Alias name without the leading `--`.
        alias: String,
        /// Token path it was meant to resolve.
        path: String,
    },

    /// A token file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File that failed.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Token files must be `.json` or `.toml`.
    #[error("unsupported token file format: {0}")]
    UnsupportedFormat(PathBuf),
}
