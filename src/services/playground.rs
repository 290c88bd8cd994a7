use std::sync::Arc;

use crate::error::AppResult;
use crate::models::{LogEntry, LoggedRequest};
use crate::services::{build_request, BuiltRequest, Execution, FieldValues, RequestExecutor};
use crate::store::LogStore;

/// Result of sending a playground request that produced a status code
#[derive(Debug, Clone)]
pub struct SendOutcome {
    pub request: BuiltRequest,
    pub execution: Execution,
    /// Entry written to the log store for this exchange
    pub entry: LogEntry,
}

/// Builds, executes and logs playground requests
pub struct Playground {
    base_url: String,
    executor: RequestExecutor,
    store: Arc<dyn LogStore>,
}

impl Playground {
    pub fn new(base_url: impl Into<String>, executor: RequestExecutor, store: Arc<dyn LogStore>) -> Self {
        Self {
            base_url: base_url.into(),
            executor,
            store,
        }
    }

    pub fn store(&self) -> &Arc<dyn LogStore> {
        &self.store
    }

    /// Build the request without sending it
    pub fn preview(&self, endpoint_id: &str, values: &FieldValues) -> AppResult<BuiltRequest> {
        build_request(&self.base_url, endpoint_id, values)
    }

    /// Build, send and log a request.
    ///
    /// Transport failures are returned as errors and leave no log entry.
    /// Log store failures are reported through tracing and never change the
    /// returned outcome.
    pub async fn send(&self, endpoint_id: &str, values: &FieldValues) -> AppResult<SendOutcome> {
        let request = self.preview(endpoint_id, values)?;
        let execution = self.executor.execute(&request).await?;

        tracing::info!(
            endpoint = %request.endpoint,
            method = %request.method,
            path = %request.path,
            status = execution.status,
            duration_ms = execution.duration_ms,
            "Playground request completed"
        );

        let entry = LogEntry::new(
            request.endpoint.clone(),
            request.method.as_str(),
            request.path.clone(),
            LoggedRequest {
                headers: request.headers.clone(),
                body: request
                    .body
                    .clone()
                    .unwrap_or_else(|| serde_json::Value::Object(Default::default())),
            },
            execution.logged_response(),
            execution.status,
            execution.duration_ms,
        );
        self.record(entry.clone()).await;

        Ok(SendOutcome {
            request,
            execution,
            entry,
        })
    }

    /// Append to the log store, best effort
    pub async fn record(&self, entry: LogEntry) {
        let id = entry.id.clone();
        if let Err(e) = self.store.append(entry).await {
            tracing::error!("Failed to persist log entry {}: {}", id, e);
        }
    }
}
