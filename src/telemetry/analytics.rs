//! Usage analytics.
//!
//! Events are handed to a background writer over an unbounded channel and
//! appended as JSON lines. Tracking never blocks and never reports failure to
//! the caller.

use crate::config::TelemetryConfig;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use tokio::io::AsyncWriteExt;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum AnalyticsEvent {
    LibraryDelete,
    LibraryCreate,
}

#[derive(Serialize)]
struct Envelope<'a> {
    timestamp: DateTime<Utc>,
    event: &'a AnalyticsEvent,
}

pub fn encode_line(event: &AnalyticsEvent, timestamp: DateTime<Utc>) -> serde_json::Result<String> {
    serde_json::to_string(&Envelope { timestamp, event })
}

pub struct AnalyticsSink {
    tx: Option<mpsc::UnboundedSender<AnalyticsEvent>>,
    writer: Option<JoinHandle<()>>,
}

impl AnalyticsSink {
    /// Start the background writer, or a no-op sink when sharing is off.
    pub fn spawn(config: &TelemetryConfig) -> Self {
        if !config.share_usage {
            return Self::disabled();
        }
        let (tx, rx) = mpsc::unbounded_channel();
        let writer = tokio::spawn(run_writer(config.analytics_path.clone(), rx));
        Self {
            tx: Some(tx),
            writer: Some(writer),
        }
    }

    pub fn disabled() -> Self {
        Self {
            tx: None,
            writer: None,
        }
    }

    pub fn track(&self, event: AnalyticsEvent) {
        match &self.tx {
            Some(tx) => {
                if tx.send(event).is_err() {
                    debug!(?event, "analytics writer has stopped; dropping event");
                }
            }
            None => debug!(?event, "usage sharing disabled; dropping event"),
        }
    }

    /// Close the channel and wait for queued events to be written.
    pub async fn shutdown(mut self) {
        self.tx.take();
        if let Some(writer) = self.writer.take() {
            let _ = writer.await;
        }
    }
}

async fn run_writer(path: PathBuf, mut rx: mpsc::UnboundedReceiver<AnalyticsEvent>) {
    if let Some(parent) = path.parent() {
        if let Err(e) = tokio::fs::create_dir_all(parent).await {
            warn!(error = %e, dir = %parent.display(), "cannot create analytics directory");
        }
    }
    let mut file = match tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&path)
        .await
    {
        Ok(file) => file,
        Err(e) => {
            warn!(error = %e, path = %path.display(), "analytics disabled: cannot open output");
            // Drain so senders never notice.
            while rx.recv().await.is_some() {}
            return;
        }
    };

    while let Some(event) = rx.recv().await {
        let line = match encode_line(&event, Utc::now()) {
            Ok(line) => line,
            Err(e) => {
                warn!(error = %e, "cannot encode analytics event");
                continue;
            }
        };
        if let Err(e) = file.write_all(format!("{}\n", line).as_bytes()).await {
            warn!(error = %e, "cannot write analytics event");
        }
    }
    let _ = file.flush().await;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_wire_shape() {
        assert_eq!(
            serde_json::to_value(AnalyticsEvent::LibraryDelete).unwrap(),
            serde_json::json!({ "type": "libraryDelete" })
        );
        assert_eq!(
            serde_json::to_value(AnalyticsEvent::LibraryCreate).unwrap(),
            serde_json::json!({ "type": "libraryCreate" })
        );
    }

    #[test]
    fn test_encode_line_wraps_event() {
        let ts = "2026-01-02T03:04:05Z".parse::<DateTime<Utc>>().unwrap();
        let line = encode_line(&AnalyticsEvent::LibraryDelete, ts).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["event"], serde_json::json!({ "type": "libraryDelete" }));
        assert_eq!(value["timestamp"], "2026-01-02T03:04:05Z");
    }

    #[tokio::test]
    async fn test_sink_appends_one_line_per_event() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("analytics.jsonl");
        let sink = AnalyticsSink::spawn(&TelemetryConfig {
            share_usage: true,
            analytics_path: path.clone(),
        });
        sink.track(AnalyticsEvent::LibraryDelete);
        sink.shutdown().await;

        let contents = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = contents.lines().collect();
        assert_eq!(lines.len(), 1);
        assert!(lines[0].contains(r#""event":{"type":"libraryDelete"}"#));
    }

    #[tokio::test]
    async fn test_disabled_sink_writes_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("analytics.jsonl");
        let sink = AnalyticsSink::spawn(&TelemetryConfig {
            share_usage: false,
            analytics_path: path.clone(),
        });
        sink.track(AnalyticsEvent::LibraryDelete);
        sink.shutdown().await;
        assert!(!path.exists());
    }
}
