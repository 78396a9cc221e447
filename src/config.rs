use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::constants;
use crate::error::{CatalogError, Result};

#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub server: ServerConfig,
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    pub name: String,
    /// Absolute origin without trailing slash, e.g. `https://example.com`.
    pub base_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: constants::DEFAULT_SITE_NAME.to_string(),
            base_url: constants::DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: constants::DEFAULT_PORT,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    pub enabled: bool,
    pub port: u16,
}

impl Default for MetricsConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            port: constants::DEFAULT_METRICS_PORT,
        }
    }
}

impl Config {
    /// Load `config.toml` (or `$CALC_CONFIG`), then apply environment overrides.
    ///
    /// A missing file is not an error; defaults are used instead.
    pub fn load() -> Result<Self> {
        let config_path =
            env::var(constants::ENV_CONFIG_PATH).unwrap_or_else(|_| "config.toml".to_string());
        let mut config = Self::from_file_or_default(&config_path)?;
        config.apply_env_overrides()?;
        config.validate()?;
        info!(
            base_url = %config.site.base_url,
            site_name = %config.site.name,
            "Configuration loaded"
        );
        Ok(config)
    }

    pub fn from_file_or_default(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(path = %path.display(), "No config file, using defaults");
            return Ok(Self::default());
        }
        let config_content = fs::read_to_string(path).map_err(|e| {
            CatalogError::Config(format!(
                "Failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::from_toml_str(&config_content)
    }

    pub fn from_toml_str(source: &str) -> Result<Self> {
        let mut config: Config = toml::from_str(source)?;
        config.site.base_url = trim_base_url(&config.site.base_url);
        Ok(config)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(base_url) = env::var(constants::ENV_BASE_URL) {
            self.site.base_url = trim_base_url(&base_url);
        }
        if let Ok(name) = env::var(constants::ENV_SITE_NAME) {
            self.site.name = name;
        }
        if let Ok(port) = env::var(constants::ENV_PORT) {
            self.server.port = port
                .parse()
                .map_err(|_| CatalogError::Config(format!("PORT '{}' is not a valid port", port)))?;
        }
        if let Ok(port) = env::var(constants::ENV_METRICS_PORT) {
            self.metrics.port = port.parse().map_err(|_| {
                CatalogError::Config(format!("metrics port '{}' is not a valid port", port))
            })?;
            self.metrics.enabled = true;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        let base = &self.site.base_url;
        if !(base.starts_with("http://") || base.starts_with("https://")) {
            return Err(CatalogError::Config(format!(
                "site.base_url '{}' must be an absolute http(s) URL",
                base
            )));
        }
        if self.site.name.trim().is_empty() {
            return Err(CatalogError::Config("site.name must not be empty".to_string()));
        }
        Ok(())
    }
}

/// Strip a single trailing slash so `{base_url}{path}` never doubles it.
fn trim_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    trimmed.strip_suffix('/').unwrap_or(trimmed).to_string()
}
