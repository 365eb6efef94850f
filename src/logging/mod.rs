//! Diagnostic logging to disk.
//!
//! The terminal is owned by the UI, so `tracing` output goes to a daily file
//! named `libdeck_<date>.log` in the configured log directory (default:
//! `~/.local/share/libdeck/logs/`).

use crate::config::LoggingConfig;
use anyhow::{Context, Result};
use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;
use tracing_subscriber::filter::LevelFilter;

pub fn log_file_path(config: &LoggingConfig) -> PathBuf {
    let date = chrono::Local::now().format("%Y-%m-%d");
    config.log_dir.join(format!("libdeck_{}.log", date))
}

/// Install the global subscriber. No-op when logging is disabled.
pub fn init(config: &LoggingConfig) -> Result<()> {
    if !config.enabled {
        return Ok(());
    }

    let level = config.level.parse::<LevelFilter>().unwrap_or(LevelFilter::INFO);

    std::fs::create_dir_all(&config.log_dir)
        .with_context(|| format!("Failed to create log directory {}", config.log_dir.display()))?;
    let path = log_file_path(config);
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .with_context(|| format!("Failed to open log file {}", path.display()))?;

    tracing_subscriber::fmt()
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(true)
        .with_max_level(level)
        .try_init()
        .map_err(|e| anyhow::anyhow!("Failed to install log subscriber: {}", e))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        let config = LoggingConfig {
            enabled: false,
            log_dir: dir.path().join("logs"),
            level: "debug".into(),
        };
        init(&config).unwrap();
        assert!(!config.log_dir.exists());
    }

    #[test]
    fn test_log_file_name() {
        let config = LoggingConfig {
            enabled: true,
            log_dir: PathBuf::from("/var/log/libdeck"),
            level: "info".into(),
        };
        let path = log_file_path(&config);
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("libdeck_") && name.ends_with(".log"));
        assert_eq!(path.parent().unwrap(), PathBuf::from("/var/log/libdeck"));
    }
}
