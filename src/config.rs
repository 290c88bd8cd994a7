use std::env;
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "https://api.greptile.com";

#[derive(Debug, Clone)]
pub struct Config {
    // Upstream API
    pub api_base_url: String,
    pub request_timeout: Option<Duration>,

    // Log storage
    pub log_store_path: PathBuf,
    pub mongodb_url: Option<String>,
    pub mongodb_database: String,
    pub seed_demo_logs: bool,

    // Server
    pub host: String,
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if exists

        Ok(Self {
            // Upstream API
            api_base_url: env::var("API_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
            request_timeout: match env::var("REQUEST_TIMEOUT_SECONDS") {
                Ok(raw) => Some(Duration::from_secs(
                    raw.parse()
                        .map_err(|_| ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))?,
                )),
                Err(_) => None,
            },

            // Log storage
            log_store_path: env::var("LOG_STORE_PATH")
                .unwrap_or_else(|_| "api_logs.json".to_string())
                .into(),
            mongodb_url: env::var("MONGODB_URL").ok().filter(|url| !url.is_empty()),
            mongodb_database: env::var("MONGODB_DATABASE")
                .unwrap_or_else(|_| "api_playground".to_string()),
            seed_demo_logs: env::var("SEED_DEMO_LOGS")
                .unwrap_or_else(|_| "false".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("SEED_DEMO_LOGS"))?,

            // Server
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| ConfigError::Invalid("PORT"))?,
        })
    }

    /// Get server address as "host:port"
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout: None,
            log_store_path: PathBuf::from("api_logs.json"),
            mongodb_url: None,
            mongodb_database: "api_playground".to_string(),
            seed_demo_logs: false,
            host: "0.0.0.0".to_string(),
            port: 3000,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid environment variable: {0}")]
    Invalid(&'static str),
}
