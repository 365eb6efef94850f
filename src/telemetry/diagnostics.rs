//! Crash report capture.
//!
//! Reports are written to timestamped files named `crash_<date>_<time>.log`
//! in the configured report directory (default:
//! `~/.local/share/libdeck/reports/`). Capture is a side channel: failures are
//! logged and otherwise ignored.

use crate::config::DiagnosticsConfig;
use anyhow::{Context, Result};
use chrono::Local;
use std::path::PathBuf;
use tracing::{error, info, warn};

pub struct Diagnostics {
    enabled: bool,
    report_dir: PathBuf,
}

impl Diagnostics {
    pub fn new(config: &DiagnosticsConfig) -> Self {
        Self {
            enabled: config.enabled,
            report_dir: config.report_dir.clone(),
        }
    }

    /// Record an error for later inspection.
    pub fn capture(&self, error: &str) {
        error!(target: "diagnostics", %error, "captured exception");
        if !self.enabled {
            return;
        }
        match self.write_report(error) {
            Ok(path) => info!(path = %path.display(), "crash report written"),
            Err(e) => warn!(error = %e, "could not write crash report"),
        }
    }

    fn write_report(&self, error: &str) -> Result<PathBuf> {
        std::fs::create_dir_all(&self.report_dir).with_context(|| {
            format!("Failed to create report directory {}", self.report_dir.display())
        })?;

        let now = Local::now();
        let filename = format!("crash_{}.log", now.format("%Y-%m-%d_%H-%M-%S%.3f"));
        let path = self.report_dir.join(filename);
        let body = format!(
            "libdeck {}\nos: {} ({})\ntime: {}\n\n{}\n",
            env!("CARGO_PKG_VERSION"),
            std::env::consts::OS,
            std::env::consts::ARCH,
            now.to_rfc3339(),
            error,
        );
        std::fs::write(&path, body)
            .with_context(|| format!("Failed to write crash report to {}", path.display()))?;
        Ok(path)
    }
}
