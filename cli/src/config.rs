//! qrshow runtime configuration handling

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use qrshow_core::{QrOptions, DEFAULT_BASE_URL};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

pub const ENV_BASE_URL: &str = "QRSHOW_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "QRSHOW_TIMEOUT_SECS";
pub const ENV_LOG_LEVEL: &str = "QRSHOW_LOG_LEVEL";

/// Top-level configuration structure persisted to disk or environment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QrshowConfig {
    /// Service root, e.g. `http://qrcode.show`
    pub base_url: String,
    /// Whole-request timeout; `0` disables it
    pub timeout_secs: u64,
    /// Logging configuration
    pub logging: LoggingOptions,
    /// Rendering options applied to every request unless overridden
    pub defaults: QrOptions,
}

impl Default for QrshowConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_secs: 30,
            logging: LoggingOptions::default(),
            defaults: QrOptions::default(),
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// `EnvFilter` directive, e.g. `warn` or `qrshow=debug`
    pub level: String,
    /// Colorize log output
    pub color: bool,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            color: false,
        }
    }
}

impl QrshowConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let mut config = if let Some(path) = explicit_path {
            Self::from_file(path)?
        } else if let Some(path) = Self::discover_file()? {
            tracing::debug!("Using configuration file: {}", path.display());
            Self::from_file(&path)?
        } else {
            Self::default()
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd = env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        let path = cwd.join("qrshow.toml");
        if path.exists() {
            return Ok(Some(path));
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let path = PathBuf::from(xdg_config).join("qrshow").join("config.toml");
            if path.exists() {
                return Ok(Some(path));
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;
        Self::from_toml_str(&contents)
    }

    pub fn from_toml_str(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply `QRSHOW_*` overrides looked up through `lookup`.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_BASE_URL).filter(|v| !v.is_empty()) {
            self.base_url = url;
        }
        if let Some(secs) = lookup(ENV_TIMEOUT_SECS) {
            self.timeout_secs = secs
                .trim()
                .parse()
                .map_err(|_| Error::Config(format!("Invalid {ENV_TIMEOUT_SECS} '{secs}'")))?;
        }
        if let Some(level) = lookup(ENV_LOG_LEVEL).filter(|v| !v.is_empty()) {
            self.logging.level = level;
        }
        Ok(())
    }

    pub fn timeout(&self) -> Option<Duration> {
        (self.timeout_secs > 0).then(|| Duration::from_secs(self.timeout_secs))
    }
}
