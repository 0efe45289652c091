//! Dashboard configuration loaded from TOML.
//!
//! Every field has a default, so a missing file or a partial file is fine.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::tickers::DEFAULT_TICKERS;

pub const APP_DIR: &str = "oraculum";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Scheme, host and port of the score API, without the `/api/v1` prefix.
    pub api_base_url: String,
    pub request_timeout_secs: u64,
    /// Ticker list used when the ticker field has never been edited.
    pub default_tickers: Vec<String>,
    /// Where CSV exports are written.
    pub export_dir: PathBuf,
    pub log_dir: PathBuf,
    pub settings_path: PathBuf,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        let base = app_dir();
        Self {
            api_base_url: "http://127.0.0.1:8000".to_string(),
            request_timeout_secs: 30,
            default_tickers: DEFAULT_TICKERS.iter().map(|s| s.to_string()).collect(),
            export_dir: PathBuf::from("."),
            log_dir: base.join("logs"),
            settings_path: base.join("settings.json"),
        }
    }
}

impl DashboardConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(content: &str, origin: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: origin.to_path_buf(),
            source,
        })
    }

    /// Load `path`, or defaults when it does not exist.
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => Self::from_toml_str(&content, path),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(source) => Err(ConfigError::Read {
                path: path.to_path_buf(),
                source,
            }),
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }

    pub fn default_ticker_text(&self) -> String {
        self.default_tickers.join(",")
    }
}

/// `<config dir>/oraculum`, or `./oraculum` when the platform has none.
pub fn app_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// Default location of the config file.
pub fn default_config_path() -> PathBuf {
    app_dir().join("config.toml")
}
