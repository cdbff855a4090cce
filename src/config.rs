//! osm configuration, loaded from a TOML file
//!
//! ```toml
//! date_format = "%Y-%m-%d"
//! datetime_format = "%Y-%m-%d %H:%M:%S"
//! busy_timeout_ms = 5000
//!
//! [logging]
//! filter = "osm=info"
//! log_dir = ".osm/logs"
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::debug;

use crate::database::DefaultConverter;
use crate::utils::time_format::{FORMAT_DATE, FORMAT_DATETIME};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrmConfig {
    /// chrono layout for date columns
    pub date_format: String,

    /// chrono layout for datetime columns (RFC 3339 is always accepted too)
    pub datetime_format: String,

    /// How long to wait on a locked database
    pub busy_timeout_ms: u64,

    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// EnvFilter directives, overridden by RUST_LOG
    pub filter: String,

    /// Write a daily rolling log file here when set
    pub log_dir: Option<PathBuf>,
}

impl Default for OrmConfig {
    fn default() -> Self {
        Self {
            date_format: FORMAT_DATE.to_string(),
            datetime_format: FORMAT_DATETIME.to_string(),
            busy_timeout_ms: 5000,
            logging: LoggingConfig::default(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "osm=warn".to_string(),
            log_dir: None,
        }
    }
}

impl OrmConfig {
    /// Load config from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        if !path.exists() {
            debug!("No config at {}, using defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Converter using this config's date layouts
    pub fn converter(&self) -> DefaultConverter {
        DefaultConverter::new(&self.date_format, &self.datetime_format)
    }
}
