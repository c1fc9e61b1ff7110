//! Run configuration
//!
//! The source list and path settings are an explicit structure handed to the
//! run rather than process-wide constants, so tests can inject fake sources.
//! Defaults reproduce the historical hardcoded values; a missing config file
//! simply means "run with defaults".

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;
use url::Url;

use crate::errors::{AppError, AppResult};

pub mod defaults;
pub mod duration_serde;

use defaults::*;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Ordered list of source URLs; a `.gz` suffix marks gzip content
    #[serde(default = "default_sources")]
    pub sources: Vec<String>,
    #[serde(default)]
    pub storage: StorageConfig,
    #[serde(default)]
    pub ingestion: IngestionConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the merged XML artifact; the compressed copy gets `.gz` appended
    #[serde(default = "default_output_path")]
    pub output_path: PathBuf,
    #[serde(default = "default_write_compressed")]
    pub write_compressed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestionConfig {
    /// Line-delimited file of allowed channel identifiers
    #[serde(default = "default_allowlist_path")]
    pub allowlist_path: PathBuf,
    /// HTTP connection timeout; transfers themselves are unbounded
    #[serde(
        default = "default_connect_timeout",
        with = "duration_serde::duration"
    )]
    pub connect_timeout: Duration,
}

fn default_sources() -> Vec<String> {
    DEFAULT_SOURCES.iter().map(|url| url.to_string()).collect()
}

fn default_output_path() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

fn default_write_compressed() -> bool {
    DEFAULT_WRITE_COMPRESSED
}

fn default_allowlist_path() -> PathBuf {
    PathBuf::from(DEFAULT_ALLOWLIST_PATH)
}

fn default_connect_timeout() -> Duration {
    Duration::from_secs(DEFAULT_CONNECT_TIMEOUT_SECS)
}

impl Default for Config {
    fn default() -> Self {
        Self {
            sources: default_sources(),
            storage: StorageConfig::default(),
            ingestion: IngestionConfig::default(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            output_path: default_output_path(),
            write_compressed: default_write_compressed(),
        }
    }
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            allowlist_path: default_allowlist_path(),
            connect_timeout: default_connect_timeout(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file, falling back to defaults when
    /// the file does not exist
    pub fn load_from_file(path: &str) -> AppResult<Self> {
        let config: Self = if Path::new(path).exists() {
            let content = std::fs::read_to_string(path).map_err(|e| {
                AppError::configuration(format!("Failed to read config file {path}: {e}"))
            })?;
            toml::from_str(&content).map_err(|e| {
                AppError::configuration(format!("Invalid configuration in {path}: {e}"))
            })?
        } else {
            info!("Config file {path} not found, using defaults");
            Self::default()
        };

        config.validate()?;
        Ok(config)
    }

    /// Validate the loaded configuration
    pub fn validate(&self) -> AppResult<()> {
        if self.sources.is_empty() {
            return Err(AppError::configuration("At least one source URL is required"));
        }
        for source in &self.sources {
            Url::parse(source).map_err(|e| {
                AppError::configuration(format!("Invalid source URL '{source}': {e}"))
            })?;
        }
        Ok(())
    }

    /// Path of the gzip-compressed output artifact
    pub fn compressed_output_path(&self) -> PathBuf {
        let mut path = self.storage.output_path.clone().into_os_string();
        path.push(".gz");
        PathBuf::from(path)
    }
}
