//! Opt-in file logging
//!
//! The library only emits `tracing` events. Scripts that want them on disk call
//! [`init`] once at startup and keep the returned guard alive.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::fmt::writer::MakeWriterExt;

/// Log level for file logging
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    #[default]
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    pub fn to_tracing_level(self) -> Option<Level> {
        match self {
            LogLevel::Off => None,
            LogLevel::Error => Some(Level::ERROR),
            LogLevel::Warn => Some(Level::WARN),
            LogLevel::Info => Some(Level::INFO),
            LogLevel::Debug => Some(Level::DEBUG),
            LogLevel::Trace => Some(Level::TRACE),
        }
    }
}

/// Default log file location
pub fn default_log_path() -> PathBuf {
    if let Some(config_dir) = dirs::config_dir() {
        return config_dir.join("cabtech").join("cabtech.log");
    }
    if let Some(home) = dirs::home_dir() {
        return home.join(".cabtech").join("cabtech.log");
    }
    PathBuf::from("cabtech.log")
}

/// Install a global subscriber appending to `log_path`
///
/// Returns `Ok(None)` for [`LogLevel::Off`]. Fails if the file cannot be opened
/// or a global subscriber is already installed.
pub fn init(level: LogLevel, log_path: &Path) -> Result<Option<WorkerGuard>> {
    let Some(tracing_level) = level.to_tracing_level() else {
        return Ok(None);
    };

    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create log directory {:?}", parent))?;
    }

    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    let (non_blocking, guard) = tracing_appender::non_blocking(file);

    tracing_subscriber::fmt()
        .with_max_level(tracing_level)
        .with_writer(non_blocking.with_max_level(tracing_level))
        .with_ansi(false)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(true)
        .with_line_number(true)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;

    tracing::info!("cabtech {} logging at {:?}", crate::VERSION, level);
    tracing::info!("Log file: {:?}", log_path);

    Ok(Some(guard))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_off_installs_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cabtech.log");
        let guard = init(LogLevel::Off, &path).unwrap();
        assert!(guard.is_none());
        assert!(!path.exists());
    }

    #[test]
    fn test_level_mapping() {
        assert_eq!(LogLevel::Error.to_tracing_level(), Some(Level::ERROR));
        assert_eq!(LogLevel::Trace.to_tracing_level(), Some(Level::TRACE));
        assert_eq!(LogLevel::default(), LogLevel::Off);
    }

    #[test]
    fn test_default_log_path_file_name() {
        assert!(default_log_path().ends_with("cabtech.log"));
    }
}
