use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

/// Application error type that can be returned from handlers
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // Request building errors
    #[error("Unknown endpoint: {0}")]
    UnknownEndpoint(String),

    // Resource errors
    #[error("{0} not found")]
    NotFound(String),

    // Validation errors
    #[error("Validation error: {0}")]
    Validation(String),

    // The HTTP exchange could not complete (no status code obtained)
    #[error("Transport failure: {0}")]
    Transport(String),

    // Log store errors
    #[error("Persistence error: {0}")]
    Persistence(String),

    // Internal errors
    #[error("Internal server error")]
    Internal(String),
}

/// JSON error response body
#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    details: Option<String>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message, details) = match &self {
            // 404 Not Found
            AppError::UnknownEndpoint(id) => (
                StatusCode::NOT_FOUND,
                "Unknown endpoint",
                Some(id.clone()),
            ),
            AppError::NotFound(resource) => {
                (StatusCode::NOT_FOUND, "Not found", Some(resource.clone()))
            }

            // 400 Bad Request
            AppError::Validation(msg) => (
                StatusCode::BAD_REQUEST,
                "Validation error",
                Some(msg.clone()),
            ),

            // 502 Bad Gateway
            AppError::Transport(msg) => {
                tracing::warn!("Transport failure: {}", msg);
                (
                    StatusCode::BAD_GATEWAY,
                    "Transport failure",
                    Some(msg.clone()),
                )
            }

            // 500 Internal Server Error
            AppError::Persistence(msg) => {
                tracing::error!("Persistence error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Persistence error", None)
            }
            AppError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error",
                    None,
                )
            }
        };

        let body = Json(ErrorResponse {
            error: error_message.to_string(),
            details,
        });

        (status, body).into_response()
    }
}

// Convenient conversions from common error types

impl From<mongodb::error::Error> for AppError {
    fn from(err: mongodb::error::Error) -> Self {
        AppError::Persistence(format!("MongoDB error: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Persistence(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Persistence(format!("Serialization error: {}", err))
    }
}

/// Result type alias for handlers
pub type AppResult<T> = Result<T, AppError>;
