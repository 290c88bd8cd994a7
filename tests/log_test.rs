mod common;

use axum::http::StatusCode;
use serde_json::json;
use time::format_description::well_known::Rfc3339;
use time::{Duration, OffsetDateTime};

use api_playground::services::demo::demo_entries;
use api_playground::store::LocalLogStore;
use api_playground::store::LogStore;
use common::TestApp;

async fn send_repository_info(app: &TestApp, repository_id: &str) -> String {
    let body: serde_json::Value = app
        .server
        .post("/api/endpoints/get-repository-info/send")
        .json(&json!({"fields": {"repositoryId": repository_id}}))
        .await
        .json();

    body["log_id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_two_sends_are_listed_and_retrievable() {
    let app = TestApp::new().await;

    let first = send_repository_info(&app, "one").await;
    let second = send_repository_info(&app, "two").await;
    assert_ne!(first, second);

    let response = app.server.get("/api/logs").await;
    response.assert_status(StatusCode::OK);
    let body: serde_json::Value = response.json();
    assert_eq!(body["total"], 2);

    for id in [&first, &second] {
        app.server
            .get(&format!("/api/logs/{}", id))
            .await
            .assert_status(StatusCode::OK);
    }
}

#[tokio::test]
async fn test_list_is_newest_first() {
    let app = TestApp::new().await;
    for entry in demo_entries(OffsetDateTime::now_utc()) {
        app.state.log_store.append(entry).await.unwrap();
    }

    let body: serde_json::Value = app.server.get("/api/logs").await.json();
    let timestamps: Vec<OffsetDateTime> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| OffsetDateTime::parse(e["timestamp"].as_str().unwrap(), &Rfc3339).unwrap())
        .collect();

    assert_eq!(timestamps.len(), 20);
    for pair in timestamps.windows(2) {
        assert!(pair[0] >= pair[1]);
    }
}

#[tokio::test]
async fn test_list_since_and_limit() {
    let app = TestApp::new().await;
    let now = OffsetDateTime::now_utc();
    for entry in demo_entries(now) {
        app.state.log_store.append(entry).await.unwrap();
    }
    let since = (now - Duration::days(1)).format(&Rfc3339).unwrap();

    let body: serde_json::Value = app
        .server
        .get("/api/logs")
        .add_query_param("since", &since)
        .await
        .json();
    let recent = body["total"].as_u64().unwrap();
    assert!(recent > 0 && recent < 20);

    let body: serde_json::Value = app
        .server
        .get("/api/logs")
        .add_query_param("limit", 5)
        .await
        .json();
    // total counts every match, data is capped
    assert_eq!(body["data"].as_array().unwrap().len(), 5);
    assert_eq!(body["total"], 20);

    let body: serde_json::Value = app
        .server
        .get("/api/logs")
        .add_query_param("since", &since)
        .add_query_param("limit", 1)
        .await
        .json();
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["total"], recent);
}

#[tokio::test]
async fn test_list_rejects_bad_since() {
    let app = TestApp::new().await;

    let response = app
        .server
        .get("/api/logs")
        .add_query_param("since", "last tuesday")
        .await;

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_missing_log() {
    let app = TestApp::new().await;

    let response = app.server.get("/api/logs/does-not-exist").await;

    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_clear_logs() {
    let app = TestApp::new().await;
    let id = send_repository_info(&app, "one").await;
    send_repository_info(&app, "two").await;

    app.server
        .delete("/api/logs")
        .await
        .assert_status(StatusCode::NO_CONTENT);

    let body: serde_json::Value = app.server.get("/api/logs").await.json();
    assert_eq!(body["total"], 0);
    app.server
        .get(&format!("/api/logs/{}", id))
        .await
        .assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_logs_persist_to_local_file() {
    let app = TestApp::new().await;
    let id = send_repository_info(&app, "persisted").await;

    // A second store over the same file sees the entry
    let reopened = LocalLogStore::new(&app.state.config.log_store_path);
    let entry = reopened.get_by_id(&id).await.unwrap().unwrap();
    assert_eq!(entry.path, "/v2/repositories/persisted");
    assert_eq!(entry.status, 200);
}
