pub mod local;
pub mod mongo;
pub mod tiered;

pub use local::LocalLogStore;
pub use mongo::MongoLogStore;
pub use tiered::TieredLogStore;

use async_trait::async_trait;

use crate::error::AppResult;
use crate::models::LogEntry;

/// Log store trait for abstracting persistence backends
#[async_trait]
pub trait LogStore: Send + Sync {
    /// Append an entry. Entries are never modified afterwards.
    async fn append(&self, entry: LogEntry) -> AppResult<()>;

    /// All entries, newest first
    async fn list(&self) -> AppResult<Vec<LogEntry>>;

    /// Point lookup by entry id
    async fn get_by_id(&self, id: &str) -> AppResult<Option<LogEntry>>;

    /// Remove every entry
    async fn clear_all(&self) -> AppResult<()>;

    /// Short backend name used in log messages
    fn name(&self) -> &'static str;
}
