//! Configuration Management
//!
//! Read-only configuration for cabtech. The file is owned by the user; the
//! library never writes it.

use crate::logging::LogLevel;
use crate::sdk::DEFAULT_PAGE_SIZE;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable consulted when no endpoint is configured
pub const ENDPOINT_ENV: &str = "CABTECH_ENDPOINT";

/// User configuration
#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    /// Base URL used by the REST client
    #[serde(default)]
    pub endpoint: Option<String>,
    /// Page size hint for paginated describes
    #[serde(default)]
    pub page_size: Option<u32>,
    /// Log level for file logging
    #[serde(default)]
    pub log_level: Option<LogLevel>,
}

impl Config {
    /// Get the config file path
    pub fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("cabtech").join("config.json"))
    }

    /// Load configuration from the default location
    pub fn load() -> Self {
        match Self::config_path() {
            Some(path) => Self::load_from(&path),
            None => Self::default(),
        }
    }

    /// Load configuration from `path`; missing or malformed files yield defaults
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            return Self::default();
        }

        match std::fs::read_to_string(path) {
            Ok(content) => serde_json::from_str(&content).unwrap_or_else(|e| {
                tracing::warn!("Ignoring malformed config {:?}: {}", path, e);
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    /// Get effective endpoint (config > environment)
    pub fn effective_endpoint(&self) -> Option<String> {
        self.endpoint
            .clone()
            .or_else(|| std::env::var(ENDPOINT_ENV).ok())
            .filter(|e| !e.is_empty())
    }

    /// Get effective page size (config > default of 50)
    pub fn effective_page_size(&self) -> u32 {
        self.page_size
            .filter(|size| *size > 0)
            .unwrap_or(DEFAULT_PAGE_SIZE)
    }

    /// Get effective log level (config > off)
    pub fn effective_log_level(&self) -> LogLevel {
        self.log_level.unwrap_or_default()
    }
}
