//! Configuration data model.
//!
//! All structs derive `Serialize`/`Deserialize` for TOML persistence.
//! Every field has a sensible default so the application works out of the box.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    #[serde(default)]
    pub bridge: BridgeConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub debug: DebugConfig,
    #[serde(default)]
    pub telemetry: TelemetryConfig,
    #[serde(default)]
    pub diagnostics: DiagnosticsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub recovery: RecoveryConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            bridge: BridgeConfig::default(),
            ui: UiConfig::default(),
            debug: DebugConfig::default(),
            telemetry: TelemetryConfig::default(),
            diagnostics: DiagnosticsConfig::default(),
            logging: LoggingConfig::default(),
            recovery: RecoveryConfig::default(),
        }
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("libdeck")
}

/// Transport settings for library procedures.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BridgeConfig {
    /// Upper bound for a single procedure call, in milliseconds.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for BridgeConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    10_000
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_tick_ms")]
    pub tick_ms: u64,
    /// Seconds a status-line message stays visible.
    #[serde(default = "default_status_ttl")]
    pub status_ttl_secs: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_ms: default_tick_ms(),
            status_ttl_secs: default_status_ttl(),
        }
    }
}

fn default_tick_ms() -> u64 {
    50
}

fn default_status_ttl() -> u64 {
    5
}

/// Debug switches. `enabled` adds the stack-trace hint to crash pages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugConfig {
    #[serde(default)]
    pub enabled: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TelemetryConfig {
    #[serde(default = "default_true")]
    pub share_usage: bool,
    #[serde(default = "default_analytics_path")]
    pub analytics_path: PathBuf,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            share_usage: true,
            analytics_path: default_analytics_path(),
        }
    }
}

fn default_analytics_path() -> PathBuf {
    default_data_dir().join("analytics.jsonl")
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_report_dir")]
    pub report_dir: PathBuf,
}

impl Default for DiagnosticsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            report_dir: default_report_dir(),
        }
    }
}

fn default_report_dir() -> PathBuf {
    default_data_dir().join("reports")
}

/// Diagnostic log output. The terminal belongs to the UI, so logs go to files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default = "default_log_dir")]
    pub log_dir: PathBuf,
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            log_dir: default_log_dir(),
            level: default_log_level(),
        }
    }
}

fn default_log_dir() -> PathBuf {
    default_data_dir().join("logs")
}

fn default_log_level() -> String {
    "info".into()
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RecoveryConfig {
    /// Ask before wiping local data from the crash page.
    #[serde(default = "default_true")]
    pub confirm_reset: bool,
}

impl Default for RecoveryConfig {
    fn default() -> Self {
        Self {
            confirm_reset: true,
        }
    }
}

fn default_true() -> bool {
    true
}
