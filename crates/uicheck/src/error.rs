//! Error types for page automation and check runs.
//!
//! Page drivers map their backend failures into [`DriverError`]. Check
//! functions catch those per step and record them in the report; only
//! [`CheckError`] escapes a run.

use std::path::PathBuf;

/// Error raised by a [`PageDriver`](crate::PageDriver) operation.
#[derive(Debug, thiserror::Error)]
pub enum DriverError {
    /// The page could not be loaded.
    #[error("navigation to {url} failed: {reason}")]
    Navigation {
        /// Address that was requested.
        url: String,
        /// Backend description of the failure.
        reason: String,
    },

    /// An operation did not finish in time.
    #[error("timed out {0}")]
    Timeout(String),

    /// No element matched a selector.
    #[error("no element matches '{0}'")]
    SelectorNotFound(String),

    /// An in-page script threw or returned something unexpected.
    #[error("script '{name}' failed: {message}")]
    Script {
        /// Script name.
        name: String,
        /// What went wrong.
        message: String,
    },

    /// Transport failure talking to the browser or the server.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend answered with something outside its protocol.
    #[error("protocol error: {0}")]
    Protocol(String),

    /// The backend cannot perform this operation.
    #[error("unsupported: {0}")]
    Unsupported(String),
}

impl DriverError {
    /// Convenience constructor for [`DriverError::Navigation`].
    pub fn navigation(url: impl Into<String>, reason: impl ToString) -> Self {
        Self::Navigation {
            url: url.into(),
            reason: reason.to_string(),
        }
    }

    /// Convenience constructor for [`DriverError::Script`].
    pub fn script(name: impl Into<String>, message: impl ToString) -> Self {
        Self::Script {
            name: name.into(),
            message: message.to_string(),
        }
    }
}

/// Invalid check configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A base URL plus path does not form a valid URL.
    #[error("invalid url '{url}': {source}")]
    InvalidUrl {
        /// The rejected URL.
        url: String,
        /// Parser error.
        #[source]
        source: url::ParseError,
    },
}

/// Error that ends a check run.
#[derive(Debug, thiserror::Error)]
pub enum CheckError {
    /// The stylesheet pre-check failed, so the responsive run was aborted.
    #[error("responsive run aborted: {0}")]
    CssLoadingFailed(String),

    /// A driver step outside any recorded check failed.
    #[error(transparent)]
    Driver(#[from] DriverError),

    /// Bad configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Writing a report failed.
    #[error("cannot write report {path}: {source}")]
    Io {
        /// Report path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// Report serialization failed.
    #[error("cannot serialize report: {0}")]
    Json(#[from] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_display_navigation() {
        let err = DriverError::navigation("http://localhost:5000/login", "connection refused");
        assert_eq!(
            err.to_string(),
            "navigation to http://localhost:5000/login failed: connection refused"
        );
    }

    #[test]
    fn test_display_script() {
        let err = DriverError::script("scrollMetrics", "undefined is not a function");
        assert_eq!(
            err.to_string(),
            "script 'scrollMetrics' failed: undefined is not a function"
        );
    }

    #[test]
    fn test_display_timeout() {
        let err = DriverError::Timeout("waiting for '.tabs-v0' after 5000ms".into());
        assert_eq!(err.to_string(), "timed out waiting for '.tabs-v0' after 5000ms");
    }

    #[test]
    fn test_check_error_is_transparent_over_driver() {
        let err: CheckError = DriverError::SelectorNotFound(".modal".into()).into();
        assert_eq!(err.to_string(), "no element matches '.modal'");
    }
}
