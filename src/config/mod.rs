pub mod model;

use std::path::{Path, PathBuf};
use thiserror::Error;

pub use model::{AppConfig, DebugConfig, DiagnosticsConfig, LoggingConfig, TelemetryConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config from {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Display text is matched by the crash page's recovery panel.
    #[error("failed to initialize config")]
    Parse(#[from] toml::de::Error),
}

impl ConfigError {
    /// The underlying error text, which the display message leaves out for
    /// parse failures.
    pub fn cause(&self) -> String {
        match self {
            ConfigError::Read { source, .. } => source.to_string(),
            ConfigError::Parse(e) => e.to_string(),
        }
    }
}

pub fn config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("libdeck")
        .join("config.toml")
}

pub fn load_config() -> Result<AppConfig, ConfigError> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let mut config: AppConfig = toml::from_str(&contents)?;
    config.data_dir = expand_home(&config.data_dir);
    config.telemetry.analytics_path = expand_home(&config.telemetry.analytics_path);
    config.diagnostics.report_dir = expand_home(&config.diagnostics.report_dir);
    config.logging.log_dir = expand_home(&config.logging.log_dir);
    Ok(config)
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_config_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(cfg.bridge.timeout_ms, AppConfig::default().bridge.timeout_ms);
    }

    #[test]
    fn test_malformed_file_reports_config_init_failure() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "data_dir = [not toml").unwrap();
        let err = load_config_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert_eq!(err.to_string(), "failed to initialize config");
        // Location survives for logs and crash reports
        assert!(err.cause().contains("line 1"), "{}", err.cause());
    }

    #[test]
    fn test_expand_home() {
        assert_eq!(expand_home(Path::new("/abs/path")), PathBuf::from("/abs/path"));
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_home(Path::new("~/logs")), home.join("logs"));
        }
    }
}
