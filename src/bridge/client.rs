use crate::app::event::{AppEvent, RequestId};
use crate::bridge::store::LibraryStore;
use crate::bridge::{BridgeError, LibraryId};
use crate::config::AppConfig;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tracing::{debug, warn};

/// Issues bridge procedures on background tasks. Every call produces exactly
/// one reply event, including on timeout.
pub struct BridgeClient {
    store: Arc<LibraryStore>,
    timeout: Duration,
    event_tx: mpsc::UnboundedSender<AppEvent>,
}

impl BridgeClient {
    pub fn new(config: &AppConfig, event_tx: mpsc::UnboundedSender<AppEvent>) -> Self {
        Self {
            store: Arc::new(LibraryStore::new(&config.data_dir)),
            timeout: Duration::from_millis(config.bridge.timeout_ms),
            event_tx,
        }
    }

    pub fn list(&self) {
        let store = self.store.clone();
        let tx = self.event_tx.clone();
        let timeout = self.timeout;
        tokio::spawn(async move {
            let result = call("library.list", timeout, store.list()).await;
            let _ = tx.send(AppEvent::LibrariesLoaded { result });
        });
    }

    pub fn create(&self, name: String) {
        let store = self.store.clone();
        let tx = self.event_tx.clone();
        let timeout = self.timeout;
        tokio::spawn(async move {
            let result = call("library.create", timeout, store.create(&name)).await;
            let _ = tx.send(AppEvent::LibraryCreated { result });
        });
    }

    pub fn delete(&self, request: RequestId, library: LibraryId) {
        let store = self.store.clone();
        let tx = self.event_tx.clone();
        let timeout = self.timeout;
        tokio::spawn(async move {
            let result = call("library.delete", timeout, store.delete(library)).await;
            let _ = tx.send(AppEvent::DeleteSettled { request, result });
        });
    }
}

async fn call<T, F>(procedure: &'static str, timeout: Duration, fut: F) -> Result<T, BridgeError>
where
    F: Future<Output = Result<T, BridgeError>>,
{
    debug!(procedure, "bridge call");
    let result = match tokio::time::timeout(timeout, fut).await {
        Ok(result) => result,
        Err(_) => Err(BridgeError::Timeout {
            procedure,
            after: timeout,
        }),
    };
    if let Err(ref e) = result {
        warn!(procedure, error = %e, "bridge call failed");
    }
    result
}
