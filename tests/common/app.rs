use std::sync::Arc;

use axum_test::TestServer;
use tempfile::TempDir;

use api_playground::build_router;
use api_playground::config::Config;
use api_playground::state::AppState;
use api_playground::store::{LocalLogStore, LogStore, TieredLogStore};

use super::spawn_upstream;

/// Test configuration pointing at the given upstream API
pub fn test_config(api_base_url: &str, log_dir: &TempDir) -> Config {
    Config {
        api_base_url: api_base_url.to_string(),
        log_store_path: log_dir.path().join("api_logs.json"),
        host: "127.0.0.1".to_string(),
        port: 0,
        ..Config::default()
    }
}

/// Test application wrapper
#[allow(dead_code)]
pub struct TestApp {
    pub server: TestServer,
    pub state: AppState,
    pub upstream_url: String,
    // Removed when the app is dropped
    pub log_dir: TempDir,
}

#[allow(dead_code)]
impl TestApp {
    /// Create a new test application in front of a fresh mock upstream
    pub async fn new() -> Self {
        let upstream_url = spawn_upstream().await;
        Self::with_upstream(&upstream_url).await
    }

    /// Create a new test application in front of the given upstream URL
    pub async fn with_upstream(upstream_url: &str) -> Self {
        Self::build(upstream_url, None).await
    }

    /// Create a new test application whose log store has the given remote tier
    pub async fn with_remote_store(remote: Arc<dyn LogStore>) -> Self {
        let upstream_url = spawn_upstream().await;
        Self::build(&upstream_url, Some(remote)).await
    }

    async fn build(upstream_url: &str, remote: Option<Arc<dyn LogStore>>) -> Self {
        let log_dir = tempfile::tempdir().expect("Failed to create log directory");
        let config = test_config(upstream_url, &log_dir);

        // No MongoDB in tests; a remote tier is a stand-in when given
        let local: Arc<dyn LogStore> = Arc::new(LocalLogStore::new(&config.log_store_path));
        let store: Arc<dyn LogStore> = Arc::new(TieredLogStore::new(local, remote));

        let state = AppState::with_store(config, store).expect("Failed to create test app state");

        let router = build_router(state.clone());
        let server = TestServer::new(router).expect("Failed to create test server");

        Self {
            server,
            state,
            upstream_url: upstream_url.to_string(),
            log_dir,
        }
    }
}
