//! Bridge layer: the transport that executes `library.*` procedures.
//!
//! Procedures run on background tasks against the on-disk [`store::LibraryStore`]
//! and report back to the UI loop as [`AppEvent`](crate::app::event::AppEvent)s.

pub mod client;
pub mod store;

use chrono::{DateTime, Utc};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;
use uuid::Uuid;

/// Opaque library reference handed around the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct LibraryId(Uuid);

impl LibraryId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for LibraryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for LibraryId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LibraryInfo {
    pub id: LibraryId,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Error)]
pub enum BridgeError {
    #[error("library not found: {0}")]
    NotFound(LibraryId),

    #[error("invalid library name")]
    InvalidName,

    #[error("{procedure} timed out after {}ms", after.as_millis())]
    Timeout {
        procedure: &'static str,
        after: Duration,
    },

    #[error("could not decode {}: {source}", path.display())]
    Decode {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("could not encode library metadata: {0}")]
    Encode(#[from] toml::ser::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
