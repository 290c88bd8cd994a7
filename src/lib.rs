// Library crate for the API playground
// Exports modules for use by the server binary and tests

pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod services;
pub mod state;
pub mod store;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{
    clear_logs, get_endpoint, get_log, list_endpoints, list_logs, preview_request, send_request,
};
use crate::state::AppState;

/// Build the application router with the given state
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(|| async { "Hello, API Playground!" }))
        // Endpoint catalog
        .route("/api/endpoints", get(list_endpoints))
        .route("/api/endpoints/{id}", get(get_endpoint))
        // Playground
        .route("/api/endpoints/{id}/preview", post(preview_request))
        .route("/api/endpoints/{id}/send", post(send_request))
        // Request logs
        .route("/api/logs", get(list_logs).delete(clear_logs))
        .route("/api/logs/{id}", get(get_log))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
