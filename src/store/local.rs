use async_trait::async_trait;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::sync::RwLock;

use crate::error::AppResult;
use crate::models::{sort_newest_first, LogEntry};
use crate::store::LogStore;

/// Local log store: in-process entries mirrored to a JSON file.
///
/// The file holds the whole sequence of entries as one JSON array and is
/// read on first access. Without a path the store lives in memory only.
pub struct LocalLogStore {
    path: Option<PathBuf>,
    entries: RwLock<Option<Vec<LogEntry>>>,
}

impl LocalLogStore {
    /// Store backed by the JSON file at `path`
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            entries: RwLock::new(None),
        }
    }

    /// Store that does not survive the process, for tests
    pub fn in_memory() -> Self {
        Self {
            path: None,
            entries: RwLock::new(Some(Vec::new())),
        }
    }

    async fn ensure_loaded(&self) {
        if self.entries.read().await.is_some() {
            return;
        }

        let mut entries = self.entries.write().await;
        if entries.is_none() {
            *entries = Some(match &self.path {
                Some(path) => load_file(path).await,
                None => Vec::new(),
            });
        }
    }

    async fn persist(&self, entries: &[LogEntry]) -> AppResult<()> {
        let Some(path) = &self.path else {
            return Ok(());
        };

        let json = serde_json::to_vec(entries)?;
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, path).await?;
        Ok(())
    }
}

async fn load_file(path: &Path) -> Vec<LogEntry> {
    let bytes = match tokio::fs::read(path).await {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == ErrorKind::NotFound => return Vec::new(),
        Err(e) => {
            tracing::error!("Failed to read log file {}: {}", path.display(), e);
            return Vec::new();
        }
    };

    match serde_json::from_slice(&bytes) {
        Ok(entries) => entries,
        Err(e) => {
            tracing::error!("Log file {} is not a valid log array: {}", path.display(), e);
            Vec::new()
        }
    }
}

#[async_trait]
impl LogStore for LocalLogStore {
    async fn append(&self, entry: LogEntry) -> AppResult<()> {
        self.ensure_loaded().await;

        // Held across the file write so writes land in order
        let mut guard = self.entries.write().await;
        let entries = guard.get_or_insert_with(Vec::new);

        if entries.iter().any(|e| e.id == entry.id) {
            tracing::warn!("Log entry {} already stored, skipping", entry.id);
            return Ok(());
        }
        entries.push(entry);

        self.persist(entries).await
    }

    async fn list(&self) -> AppResult<Vec<LogEntry>> {
        self.ensure_loaded().await;

        let mut entries = self.entries.read().await.clone().unwrap_or_default();
        sort_newest_first(&mut entries);
        Ok(entries)
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<LogEntry>> {
        self.ensure_loaded().await;

        let guard = self.entries.read().await;
        Ok(guard
            .as_ref()
            .and_then(|entries| entries.iter().find(|e| e.id == id))
            .cloned())
    }

    async fn clear_all(&self) -> AppResult<()> {
        let mut guard = self.entries.write().await;
        *guard = Some(Vec::new());

        if let Some(path) = &self.path {
            match tokio::fs::remove_file(path).await {
                Err(e) if e.kind() != ErrorKind::NotFound => return Err(e.into()),
                _ => {}
            }
        }
        Ok(())
    }

    fn name(&self) -> &'static str {
        "local"
    }
}
