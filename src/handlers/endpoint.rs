use std::collections::HashMap;

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::error::{AppError, AppResult};
use crate::models::{catalog, find_endpoint, EndpointDescriptor};
use crate::services::{BuiltRequest, SendOutcome};
use crate::state::AppState;

// ============ Request/Response DTOs ============

/// Field values entered for an endpoint
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct FieldsRequest {
    #[serde(default)]
    pub fields: HashMap<String, String>,
}

/// Which of the caller-visible states a completed exchange is in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SendState {
    Success,
    /// Completed with a status of 300 or above
    HttpError,
}

/// Result of sending a request to the upstream API
#[derive(Debug, Serialize, ToSchema)]
pub struct SendResponse {
    pub state: SendState,
    pub status: u16,
    /// False when the body was not valid JSON
    pub parsed: bool,
    pub response: serde_json::Value,
    pub duration_ms: u64,
    pub request: BuiltRequest,
    pub log_id: String,
}

impl From<SendOutcome> for SendResponse {
    fn from(o: SendOutcome) -> Self {
        Self {
            state: if o.execution.is_success() {
                SendState::Success
            } else {
                SendState::HttpError
            },
            status: o.execution.status,
            parsed: o.execution.is_parsed(),
            response: o.entry.response,
            duration_ms: o.execution.duration_ms,
            request: o.request,
            log_id: o.entry.id,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct EndpointListResponse {
    pub data: Vec<EndpointDescriptor>,
    pub total: usize,
}

// ============ Handlers ============

/// List the endpoint catalog
#[utoipa::path(
    get,
    path = "/api/endpoints",
    responses(
        (status = 200, description = "Endpoint catalog", body = EndpointListResponse)
    ),
    tag = "Endpoints"
)]
pub async fn list_endpoints() -> Json<EndpointListResponse> {
    let data = catalog();
    let total = data.len();
    Json(EndpointListResponse { data, total })
}

/// Get one endpoint descriptor
#[utoipa::path(
    get,
    path = "/api/endpoints/{id}",
    params(
        ("id" = String, Path, description = "Endpoint ID")
    ),
    responses(
        (status = 200, description = "Endpoint found", body = EndpointDescriptor),
        (status = 404, description = "Unknown endpoint")
    ),
    tag = "Endpoints"
)]
pub async fn get_endpoint(Path(id): Path<String>) -> AppResult<Json<EndpointDescriptor>> {
    let endpoint = find_endpoint(&id).ok_or(AppError::UnknownEndpoint(id))?;
    Ok(Json(endpoint))
}

/// Build a request without sending it
#[utoipa::path(
    post,
    path = "/api/endpoints/{id}/preview",
    params(
        ("id" = String, Path, description = "Endpoint ID")
    ),
    request_body = FieldsRequest,
    responses(
        (status = 200, description = "Built request", body = BuiltRequest),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Unknown endpoint")
    ),
    tag = "Playground"
)]
pub async fn preview_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<FieldsRequest>,
) -> AppResult<Json<BuiltRequest>> {
    let request = state.playground.preview(&id, &payload.fields)?;
    Ok(Json(request))
}

/// Send a request to the upstream API and log the exchange
#[utoipa::path(
    post,
    path = "/api/endpoints/{id}/send",
    params(
        ("id" = String, Path, description = "Endpoint ID")
    ),
    request_body = FieldsRequest,
    responses(
        (status = 200, description = "Exchange completed, see state for the upstream outcome", body = SendResponse),
        (status = 400, description = "Validation error"),
        (status = 404, description = "Unknown endpoint"),
        (status = 502, description = "Upstream could not be reached")
    ),
    tag = "Playground"
)]
pub async fn send_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(payload): Json<FieldsRequest>,
) -> AppResult<Json<SendResponse>> {
    let outcome = state.playground.send(&id, &payload.fields).await?;
    Ok(Json(outcome.into()))
}
