//! On-disk library metadata.
//!
//! Each library is a `<uuid>.sdlibrary` TOML file plus an optional `<uuid>.db`
//! database under `<data_dir>/libraries/`. Deleting a library removes those two
//! files only; the files a library indexes are never touched.

use crate::bridge::{BridgeError, LibraryId, LibraryInfo};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

const LIBRARY_EXT: &str = "sdlibrary";
const DATABASE_EXT: &str = "db";
const METADATA_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct LibraryFile {
    version: u32,
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    date_created: DateTime<Utc>,
}

pub struct LibraryStore {
    root: PathBuf,
}

impl LibraryStore {
    pub fn new(data_dir: &Path) -> Self {
        Self {
            root: data_dir.join("libraries"),
        }
    }

    fn metadata_path(&self, id: LibraryId) -> PathBuf {
        self.root.join(format!("{}.{}", id, LIBRARY_EXT))
    }

    fn database_path(&self, id: LibraryId) -> PathBuf {
        self.root.join(format!("{}.{}", id, DATABASE_EXT))
    }

    /// `library.list`: every library in the store, oldest first.
    pub async fn list(&self) -> Result<Vec<LibraryInfo>, BridgeError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut libraries = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) != Some(LIBRARY_EXT) {
                continue;
            }
            let Some(id) = path
                .file_stem()
                .and_then(|s| s.to_str())
                .and_then(|s| s.parse::<LibraryId>().ok())
            else {
                debug!(path = %path.display(), "skipping library file with a non-uuid name");
                continue;
            };

            let contents = tokio::fs::read_to_string(&path).await?;
            let file: LibraryFile = toml::from_str(&contents)
                .map_err(|source| BridgeError::Decode { path: path.clone(), source })?;
            libraries.push(LibraryInfo {
                id,
                name: file.name,
                description: file.description,
                created_at: file.date_created,
            });
        }

        libraries.sort_by(|a, b| a.created_at.cmp(&b.created_at).then_with(|| a.name.cmp(&b.name)));
        Ok(libraries)
    }

    /// `library.create`: write metadata and an empty database for a new library.
    pub async fn create(&self, name: &str) -> Result<LibraryInfo, BridgeError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(BridgeError::InvalidName);
        }

        tokio::fs::create_dir_all(&self.root).await?;
        let id = LibraryId::new();
        let file = LibraryFile {
            version: METADATA_VERSION,
            name: name.to_string(),
            description: None,
            date_created: Utc::now(),
        };
        tokio::fs::write(self.metadata_path(id), toml::to_string_pretty(&file)?).await?;
        tokio::fs::write(self.database_path(id), b"").await?;
        info!(%id, name, "library created");

        Ok(LibraryInfo {
            id,
            name: file.name,
            description: file.description,
            created_at: file.date_created,
        })
    }

    /// `library.delete`: remove a library's metadata and database.
    pub async fn delete(&self, id: LibraryId) -> Result<(), BridgeError> {
        match tokio::fs::remove_file(self.metadata_path(id)).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => return Err(BridgeError::NotFound(id)),
            Err(e) => return Err(e.into()),
        }
        match tokio::fs::remove_file(self.database_path(id)).await {
            Ok(()) => {}
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => return Err(e.into()),
        }
        info!(%id, "library deleted");
        Ok(())
    }
}
