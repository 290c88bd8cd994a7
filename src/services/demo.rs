use std::collections::BTreeMap;

use serde_json::{json, Value};
use time::{Duration, OffsetDateTime};

use crate::error::AppResult;
use crate::models::{EndpointKind, LogEntry, LoggedRequest};
use crate::store::LogStore;

const DEMO_ENTRY_COUNT: usize = 20;

/// Sample log entries spread over the week before `now`.
///
/// Deterministic: the same `now` always yields the same entries.
pub fn demo_entries(now: OffsetDateTime) -> Vec<LogEntry> {
    (0..DEMO_ENTRY_COUNT)
        .map(|i| {
            let kind = EndpointKind::ALL[i % EndpointKind::ALL.len()];
            let endpoint = kind.descriptor();
            let status = match i % 7 {
                3 => 400,
                5 => 500,
                _ => 200,
            };

            let mut headers = BTreeMap::from([
                ("Authorization".to_string(), "Bearer mock-token".to_string()),
                ("Content-Type".to_string(), "application/json".to_string()),
            ]);
            if kind != EndpointKind::GetRepositoryInfo {
                headers.insert("X-GitHub-Token".to_string(), "mock-github-token".to_string());
            }

            let (body, success) = sample_exchange(kind);
            let response = match status {
                400 => json!({"error": "Bad request: Invalid parameters", "code": 400}),
                500 => json!({"error": "Server error: Failed to process request", "code": 500}),
                _ => success,
            };

            LogEntry {
                id: format!("mock-{}", i),
                timestamp: now - Duration::minutes((i as i64) * 497 + 13),
                endpoint: endpoint.id.to_string(),
                method: endpoint.method.to_string(),
                path: endpoint.path.replace("{repositoryId}", "123"),
                request: LoggedRequest { headers, body },
                response,
                status,
                duration: 100 + ((i as u64) * 137) % 900,
            }
        })
        .collect()
}

fn sample_exchange(kind: EndpointKind) -> (Value, Value) {
    match kind {
        EndpointKind::IndexRepository => (
            json!({
                "remote": "github",
                "repository": "user/repo",
                "branch": "main",
                "reload": true,
                "notify": true
            }),
            json!({
                "message": "Repository indexing started",
                "statusEndpoint": "https://api.greptile.com/v2/repositories/123/status"
            }),
        ),
        EndpointKind::GetRepositoryInfo => (
            json!({}),
            json!({
                "repository": "user/repo",
                "remote": "github",
                "branch": "main",
                "private": true,
                "status": "completed",
                "filesProcessed": 123,
                "numFiles": 123,
                "sha": "abc123def456"
            }),
        ),
        EndpointKind::QueryRepo => (
            json!({
                "messages": [{"id": "msg1", "content": "How does authentication work?", "role": "user"}],
                "repositories": [{"remote": "github", "branch": "main", "repository": "user/repo"}],
                "sessionId": "session123",
                "stream": true,
                "genius": true
            }),
            json!({
                "message": "This is the response to your query",
                "sources": [{
                    "repository": "user/repo",
                    "remote": "github",
                    "branch": "main",
                    "filepath": "src/main.js",
                    "linestart": 10,
                    "lineend": 20,
                    "summary": "Function that handles authentication"
                }]
            }),
        ),
    }
}

/// Write the demo entries if the store holds nothing yet.
///
/// Returns the number of entries written.
pub async fn seed_if_empty(store: &dyn LogStore) -> AppResult<usize> {
    if !store.list().await?.is_empty() {
        return Ok(0);
    }

    let entries = demo_entries(OffsetDateTime::now_utc());
    let count = entries.len();
    for entry in entries {
        store.append(entry).await?;
    }

    tracing::info!("Seeded {} demo log entries", count);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::LocalLogStore;
    use time::macros::datetime;

    #[test]
    fn test_demo_entries_cover_all_endpoints() {
        let entries = demo_entries(datetime!(2024-06-01 12:00:00 UTC));
        assert_eq!(entries.len(), DEMO_ENTRY_COUNT);

        for kind in EndpointKind::ALL {
            assert!(entries.iter().any(|e| e.endpoint == kind.id()));
        }
        assert!(entries.iter().any(|e| e.status == 400));
        assert!(entries.iter().any(|e| e.status == 500));
        assert!(entries.iter().all(|e| !e.path.contains('{')));
    }

    #[test]
    fn test_demo_entries_are_within_a_week() {
        let now = datetime!(2024-06-01 12:00:00 UTC);
        for entry in demo_entries(now) {
            assert!(entry.timestamp < now);
            assert!(now - entry.timestamp < Duration::days(7));
        }
    }

    #[tokio::test]
    async fn test_seed_only_when_empty() {
        let store = LocalLogStore::in_memory();

        assert_eq!(seed_if_empty(&store).await.unwrap(), DEMO_ENTRY_COUNT);
        assert_eq!(seed_if_empty(&store).await.unwrap(), 0);
        assert_eq!(store.list().await.unwrap().len(), DEMO_ENTRY_COUNT);
    }
}
