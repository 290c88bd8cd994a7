use axum::{
    extract::Path,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

/// Mock of the upstream API.
///
/// `GET /v2/repositories/{id}` answers by id: `missing` -> 404 JSON,
/// `plain` -> 200 text, `broken` -> 500 text, anything else -> 200 JSON.
fn upstream_router() -> Router {
    Router::new()
        .route("/v2/repositories", post(index_repository))
        .route("/v2/repositories/{id}", get(repository_info))
        .route("/v2/query", post(query))
}

async fn index_repository(headers: HeaderMap, Json(body): Json<Value>) -> Json<Value> {
    Json(json!({
        "message": "Repository indexing started",
        "statusEndpoint": "https://api.greptile.com/v2/repositories/123/status",
        "received": body,
        "githubToken": header(&headers, "x-github-token"),
    }))
}

async fn repository_info(Path(id): Path<String>) -> Response {
    match id.as_str() {
        "missing" => (StatusCode::NOT_FOUND, Json(json!({"error": "not found"}))).into_response(),
        "plain" => (StatusCode::OK, "plain text response").into_response(),
        "broken" => (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded").into_response(),
        _ => Json(json!({
            "repository": id,
            "remote": "github",
            "branch": "main",
            "private": false,
            "status": "completed",
            "filesProcessed": 42,
            "numFiles": 42,
            "sha": "abc123def456"
        }))
        .into_response(),
    }
}

async fn query(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if header(&headers, "authorization").is_none() {
        return (StatusCode::UNAUTHORIZED, Json(json!({"error": "unauthorized"}))).into_response();
    }

    let repository = body["repositories"][0]["repository"].clone();
    Json(json!({
        "message": format!("Answer to: {}", body["messages"][0]["content"].as_str().unwrap_or("")),
        "sources": [{
            "repository": repository,
            "remote": "github",
            "branch": "main",
            "filepath": "src/auth.rs",
            "linestart": 10,
            "lineend": 20,
            "summary": "Token validation"
        }]
    }))
    .into_response()
}

fn header(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .map(str::to_string)
}

/// Serve the mock upstream on a random local port and return its base URL
pub async fn spawn_upstream() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind mock upstream");
    let addr = listener.local_addr().expect("Mock upstream has no address");

    tokio::spawn(async move {
        axum::serve(listener, upstream_router()).await.ok();
    });

    format!("http://{}", addr)
}

/// Base URL of a local port with nothing listening on it
#[allow(dead_code)]
pub async fn closed_port_url() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind probe listener");
    let addr = listener.local_addr().expect("Probe listener has no address");
    drop(listener);

    format!("http://{}", addr)
}
