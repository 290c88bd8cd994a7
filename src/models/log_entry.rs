use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use utoipa::ToSchema;
use uuid::Uuid;

/// Request half of a log entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LoggedRequest {
    pub headers: BTreeMap<String, String>,
    /// Empty object for bodyless methods
    pub body: serde_json::Value,
}

/// Immutable record of one executed request/response exchange
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct LogEntry {
    pub id: String,
    #[serde(with = "time::serde::rfc3339")]
    #[schema(value_type = String)]
    pub timestamp: OffsetDateTime,
    /// Catalog identifier; not checked against the catalog
    pub endpoint: String,
    pub method: String,
    pub path: String,
    pub request: LoggedRequest,
    pub response: serde_json::Value,
    pub status: u16,
    /// Milliseconds between dispatch and full body receipt
    pub duration: u64,
}

impl LogEntry {
    /// Create an entry stamped with a fresh id and the current instant
    pub fn new(
        endpoint: impl Into<String>,
        method: impl Into<String>,
        path: impl Into<String>,
        request: LoggedRequest,
        response: serde_json::Value,
        status: u16,
        duration: u64,
    ) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            timestamp: OffsetDateTime::now_utc(),
            endpoint: endpoint.into(),
            method: method.into(),
            path: path.into(),
            request,
            response,
            status,
            duration,
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Order entries newest first
pub fn sort_newest_first(entries: &mut [LogEntry]) {
    entries.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
}
