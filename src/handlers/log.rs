use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;
use utoipa::{IntoParams, ToSchema};

use crate::error::{AppError, AppResult};
use crate::models::LogEntry;
use crate::state::AppState;

// ============ Request/Response DTOs ============

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct LogQueryParams {
    /// Only entries at or after this RFC 3339 instant
    pub since: Option<String>,
    #[param(minimum = 1)]
    pub limit: Option<usize>,
}

impl LogQueryParams {
    fn since(&self) -> AppResult<Option<OffsetDateTime>> {
        self.since
            .as_deref()
            .map(|raw| {
                OffsetDateTime::parse(raw, &Rfc3339).map_err(|_| {
                    AppError::Validation(format!("since must be an RFC 3339 timestamp, got {:?}", raw))
                })
            })
            .transpose()
    }
}

/// Log list response, newest first
#[derive(Debug, Serialize, ToSchema)]
pub struct LogListResponse {
    pub data: Vec<LogEntry>,
    /// Entries matching the query before `limit` is applied
    pub total: usize,
}

/// Keep entries at or after `since`
pub fn filter_recent(entries: Vec<LogEntry>, since: Option<OffsetDateTime>) -> Vec<LogEntry> {
    entries
        .into_iter()
        .filter(|e| since.is_none_or(|since| e.timestamp >= since))
        .collect()
}

// ============ Handlers ============

/// List logged requests, newest first
#[utoipa::path(
    get,
    path = "/api/logs",
    params(LogQueryParams),
    responses(
        (status = 200, description = "Logged requests", body = LogListResponse),
        (status = 400, description = "Invalid query")
    ),
    tag = "Logs"
)]
pub async fn list_logs(
    State(state): State<AppState>,
    Query(params): Query<LogQueryParams>,
) -> AppResult<Json<LogListResponse>> {
    let since = params.since()?;
    if params.limit == Some(0) {
        return Err(AppError::Validation("limit must be at least 1".to_string()));
    }

    let entries = state.log_store.list().await?;
    let mut data = filter_recent(entries, since);
    let total = data.len();
    if let Some(limit) = params.limit {
        data.truncate(limit);
    }

    Ok(Json(LogListResponse { data, total }))
}

/// Get one logged request
#[utoipa::path(
    get,
    path = "/api/logs/{id}",
    params(
        ("id" = String, Path, description = "Log entry ID")
    ),
    responses(
        (status = 200, description = "Log entry found", body = LogEntry),
        (status = 404, description = "Log entry not found")
    ),
    tag = "Logs"
)]
pub async fn get_log(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> AppResult<Json<LogEntry>> {
    let entry = state
        .log_store
        .get_by_id(&id)
        .await?
        .ok_or_else(|| AppError::NotFound("Log entry".to_string()))?;

    Ok(Json(entry))
}

/// Delete every logged request
#[utoipa::path(
    delete,
    path = "/api/logs",
    responses(
        (status = 204, description = "Logs cleared"),
        (status = 500, description = "A log store could not be cleared")
    ),
    tag = "Logs"
)]
pub async fn clear_logs(State(state): State<AppState>) -> AppResult<StatusCode> {
    state.log_store.clear_all().await?;
    tracing::info!("Log store cleared");

    Ok(StatusCode::NO_CONTENT)
}
