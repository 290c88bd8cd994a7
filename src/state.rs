use std::sync::Arc;

use crate::config::Config;
use crate::services::{demo, ExecutorConfig, Playground, RequestExecutor};
use crate::store::{LocalLogStore, LogStore, MongoLogStore, TieredLogStore};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub playground: Arc<Playground>,
    pub log_store: Arc<dyn LogStore>,
}

impl AppState {
    /// Create a new AppState from configuration, connecting to MongoDB when configured
    pub async fn new(config: Config) -> Result<Self, AppStateError> {
        let local: Arc<dyn LogStore> = Arc::new(LocalLogStore::new(&config.log_store_path));

        // The remote store is optional; the playground keeps working on the local file without it
        let remote: Option<Arc<dyn LogStore>> = match &config.mongodb_url {
            Some(url) => match MongoLogStore::connect(url, &config.mongodb_database).await {
                Ok(store) => {
                    tracing::info!("Remote log store connected");
                    Some(Arc::new(store) as Arc<dyn LogStore>)
                }
                Err(e) => {
                    tracing::error!("Remote log store unavailable, using local store only: {}", e);
                    None
                }
            },
            None => None,
        };

        let log_store: Arc<dyn LogStore> = Arc::new(TieredLogStore::new(local, remote));
        let state = Self::with_store(config, log_store)?;

        if state.config.seed_demo_logs {
            if let Err(e) = demo::seed_if_empty(state.log_store.as_ref()).await {
                tracing::error!("Failed to seed demo logs: {}", e);
            }
        }

        Ok(state)
    }

    /// Create AppState with a custom log store (for testing)
    pub fn with_store(config: Config, log_store: Arc<dyn LogStore>) -> Result<Self, AppStateError> {
        let executor = RequestExecutor::with_config(ExecutorConfig {
            timeout: config.request_timeout,
        })
        .map_err(|e| AppStateError::HttpClient(e.to_string()))?;

        let playground = Arc::new(Playground::new(
            config.api_base_url.clone(),
            executor,
            log_store.clone(),
        ));

        Ok(Self {
            config,
            playground,
            log_store,
        })
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AppStateError {
    #[error("HTTP client error: {0}")]
    HttpClient(String),
}
