//! Layered tool configuration: defaults, then a TOML file, then
//! `PRINTDESK_*` environment variables. CLI flags are applied by the commands.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use printdesk_uicheck::{HealthConfig, ResponsiveConfig};
use serde::{Deserialize, Serialize};

/// File picked up from the working directory when `--config` is not given.
pub const DEFAULT_CONFIG_FILE: &str = "printdesk.toml";

/// Local chromedriver.
pub const DEFAULT_WEBDRIVER_URL: &str = "http://localhost:9515";

const ENV_PREFIX: &str = "PRINTDESK_";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// WebDriver endpoint used by `health` and `responsive`.
    pub webdriver_url: String,
    pub health: HealthConfig,
    pub responsive: ResponsiveConfig,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            webdriver_url: DEFAULT_WEBDRIVER_URL.to_owned(),
            health: HealthConfig::default(),
            responsive: ResponsiveConfig::default(),
        }
    }
}

impl ToolConfig {
    /// Loads the layered configuration.
    ///
    /// An explicit `path` must exist; the default file is optional.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = match path {
            Some(path) if !path.is_file() => {
                bail!("config file {} does not exist", path.display())
            }
            Some(path) => Some(path.to_path_buf()),
            None => Some(PathBuf::from(DEFAULT_CONFIG_FILE)).filter(|p| p.is_file()),
        };

        let mut figment = Figment::from(Serialized::defaults(Self::default()));
        if let Some(file) = &file {
            tracing::debug!(path = %file.display(), "loading config file");
            figment = figment.merge(Toml::file(file));
        }
        figment
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()
            .context("invalid configuration")
    }

    /// Applies `--base-url` to both check configs.
    pub fn with_base_url(mut self, base_url: Option<&str>) -> Self {
        if let Some(base_url) = base_url {
            self.health.base_url = base_url.to_owned();
            self.responsive.base_url = base_url.to_owned();
        }
        self
    }

    /// Applies `--webdriver`.
    pub fn with_webdriver(mut self, url: Option<&str>) -> Self {
        if let Some(url) = url {
            self.webdriver_url = url.to_owned();
        }
        self
    }
}
