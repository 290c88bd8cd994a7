use async_trait::async_trait;
use std::sync::Arc;

use crate::error::{AppError, AppResult};
use crate::models::LogEntry;
use crate::store::LogStore;

/// Local store plus an optional remote store.
///
/// Writes go to both, the remote one in the background. Reads ask the remote first and fall back to the local
/// store when the remote errors or has nothing; results are never merged.
#[derive(Clone)]
pub struct TieredLogStore {
    local: Arc<dyn LogStore>,
    remote: Option<Arc<dyn LogStore>>,
}

impl TieredLogStore {
    pub fn new(local: Arc<dyn LogStore>, remote: Option<Arc<dyn LogStore>>) -> Self {
        Self { local, remote }
    }

    pub fn local_only(local: Arc<dyn LogStore>) -> Self {
        Self::new(local, None)
    }

    fn backends(&self) -> impl Iterator<Item = &Arc<dyn LogStore>> {
        std::iter::once(&self.local).chain(self.remote.iter())
    }
}

#[async_trait]
impl LogStore for TieredLogStore {
    /// Writes the local store inline and hands the remote write to a
    /// background task, so a slow remote never holds up the caller.
    /// The result is the local store's; remote failures are only traced.
    async fn append(&self, entry: LogEntry) -> AppResult<()> {
        if let Some(remote) = &self.remote {
            let remote = Arc::clone(remote);
            let entry = entry.clone();
            tokio::spawn(async move {
                if let Err(e) = remote.append(entry.clone()).await {
                    tracing::error!(
                        "Failed to write log entry {} to {} store: {}",
                        entry.id,
                        remote.name(),
                        e
                    );
                }
            });
        }

        let id = entry.id.clone();
        self.local.append(entry).await.inspect_err(|e| {
            tracing::error!(
                "Failed to write log entry {} to {} store: {}",
                id,
                self.local.name(),
                e
            );
        })
    }

    async fn list(&self) -> AppResult<Vec<LogEntry>> {
        if let Some(remote) = &self.remote {
            match remote.list().await {
                Ok(entries) if !entries.is_empty() => return Ok(entries),
                Ok(_) => tracing::debug!("Remote log store is empty, reading local store"),
                Err(e) => tracing::warn!("Remote log store read failed, reading local store: {}", e),
            }
        }

        self.local.list().await
    }

    async fn get_by_id(&self, id: &str) -> AppResult<Option<LogEntry>> {
        if let Some(remote) = &self.remote {
            match remote.get_by_id(id).await {
                Ok(Some(entry)) => return Ok(Some(entry)),
                Ok(None) => {}
                Err(e) => tracing::warn!("Remote log lookup failed, reading local store: {}", e),
            }
        }

        self.local.get_by_id(id).await
    }

    /// Clears every backend; fails if any of them could not be cleared
    async fn clear_all(&self) -> AppResult<()> {
        let mut failed = Vec::new();

        for backend in self.backends() {
            if let Err(e) = backend.clear_all().await {
                tracing::error!("Failed to clear {} log store: {}", backend.name(), e);
                failed.push(backend.name());
            }
        }

        if failed.is_empty() {
            Ok(())
        } else {
            Err(AppError::Persistence(format!(
                "Failed to clear log stores: {}",
                failed.join(", ")
            )))
        }
    }

    fn name(&self) -> &'static str {
        "tiered"
    }
}
