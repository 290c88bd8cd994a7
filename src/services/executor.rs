use reqwest::Client;
use std::time::{Duration, Instant};

use crate::error::{AppError, AppResult};
use crate::services::BuiltRequest;

/// Configuration for request execution
#[derive(Debug, Clone, Default)]
pub struct ExecutorConfig {
    /// No timeout is applied when unset
    pub timeout: Option<Duration>,
}

/// Body of a completed exchange
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    Json(serde_json::Value),
    /// Body text that did not parse as JSON
    Raw(String),
}

/// Outcome of an HTTP exchange that produced a status code
#[derive(Debug, Clone)]
pub struct Execution {
    pub status: u16,
    pub body: ResponseBody,
    pub duration_ms: u64,
}

impl Execution {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    pub fn is_parsed(&self) -> bool {
        matches!(self.body, ResponseBody::Json(_))
    }

    /// Response value as stored in a log entry.
    ///
    /// Unparsed text is kept as a plain string on success and wrapped in an
    /// `{"error": text}` object otherwise.
    pub fn logged_response(&self) -> serde_json::Value {
        match &self.body {
            ResponseBody::Json(value) => value.clone(),
            ResponseBody::Raw(text) if self.is_success() => serde_json::Value::String(text.clone()),
            ResponseBody::Raw(text) => serde_json::json!({ "error": text }),
        }
    }
}

/// Sends built requests to the upstream API
#[derive(Clone)]
pub struct RequestExecutor {
    client: Client,
}

impl RequestExecutor {
    /// Create a new RequestExecutor with default config
    pub fn new() -> AppResult<Self> {
        Self::with_config(ExecutorConfig::default())
    }

    /// Create a new RequestExecutor with custom config
    pub fn with_config(config: ExecutorConfig) -> AppResult<Self> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { client })
    }

    /// Execute a built request.
    ///
    /// Any status code counts as a completed execution; only a failure to
    /// obtain a status and the full body is an error.
    pub async fn execute(&self, request: &BuiltRequest) -> AppResult<Execution> {
        let mut builder = self.client.request(request.method.into(), &request.url);

        for (key, value) in &request.headers {
            builder = builder.header(key, value);
        }

        if let Some(body) = &request.body {
            builder = builder.body(body.to_string());
        }

        let start = Instant::now();
        let response = builder
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("HTTP request failed: {}", e)))?;
        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| AppError::Transport(format!("Failed to read response body: {}", e)))?;
        let duration_ms = start.elapsed().as_millis() as u64;

        let body = match serde_json::from_str(&text) {
            Ok(value) => ResponseBody::Json(value),
            Err(_) => ResponseBody::Raw(text),
        };

        Ok(Execution {
            status,
            body,
            duration_ms,
        })
    }
}
