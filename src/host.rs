//! Privileged host commands.

use crate::config::AppConfig;
use anyhow::{Context, Result};
use std::path::Path;
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostCommand {
    /// Delete all local application data. Irreversible.
    ResetSpacedrive,
}

impl HostCommand {
    pub fn name(&self) -> &'static str {
        match self {
            HostCommand::ResetSpacedrive => "reset_spacedrive",
        }
    }
}

/// Run `command`. `config_file` is the settings file the app was started
/// with; a reset removes it along with the data directory.
pub fn invoke(command: HostCommand, config: &AppConfig, config_file: &Path) -> Result<()> {
    info!(command = command.name(), "invoking host command");
    match command {
        HostCommand::ResetSpacedrive => reset_data(&config.data_dir, config_file),
    }
}

fn reset_data(data_dir: &Path, config_file: &Path) -> Result<()> {
    if data_dir.exists() {
        warn!(dir = %data_dir.display(), "removing all local application data");
        std::fs::remove_dir_all(data_dir)
            .with_context(|| format!("Failed to remove {}", data_dir.display()))?;
    }
    if config_file.exists() {
        warn!(file = %config_file.display(), "removing settings");
        std::fs::remove_file(config_file)
            .with_context(|| format!("Failed to remove {}", config_file.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::app::crash::CONFIG_INIT_FAILURE;
    use crate::config;

    #[test]
    fn test_reset_removes_data_dir() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("libdeck");
        let config_file = dir.path().join("config.toml");
        std::fs::create_dir_all(data_dir.join("libraries")).unwrap();
        std::fs::write(data_dir.join("libraries").join("a.sdlibrary"), "x").unwrap();
        let config = AppConfig {
            data_dir: data_dir.clone(),
            ..AppConfig::default()
        };

        invoke(HostCommand::ResetSpacedrive, &config, &config_file).unwrap();
        assert!(!data_dir.exists());
        // Nothing left to remove is not an error
        invoke(HostCommand::ResetSpacedrive, &config, &config_file).unwrap();
    }

    #[test]
    fn test_reset_recovers_from_broken_config() {
        let dir = tempfile::tempdir().unwrap();
        let data_dir = dir.path().join("data").join("libdeck");
        let config_file = dir.path().join("config").join("libdeck").join("config.toml");
        std::fs::create_dir_all(&data_dir).unwrap();
        std::fs::create_dir_all(config_file.parent().unwrap()).unwrap();
        std::fs::write(&config_file, "data_dir = [broken").unwrap();

        let err = config::load_config_from(&config_file).unwrap_err();
        assert_eq!(err.to_string(), CONFIG_INIT_FAILURE);

        let config = AppConfig {
            data_dir: data_dir.clone(),
            ..AppConfig::default()
        };
        invoke(HostCommand::ResetSpacedrive, &config, &config_file).unwrap();

        assert!(!data_dir.exists());
        assert!(!config_file.exists());
        // The reload after a reset starts cleanly
        assert!(config::load_config_from(&config_file).is_ok());
    }

    #[test]
    fn test_command_name() {
        assert_eq!(HostCommand::ResetSpacedrive.name(), "reset_spacedrive");
    }
}
