use crate::error::BenchError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// User agent sent with every request unless overridden
pub const DEFAULT_USER_AGENT: &str = concat!("bench/", env!("CARGO_PKG_VERSION"));
/// Per-request timeout applied when none is configured
pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Benchmark settings, read-only to the engine once a run starts.
///
/// Built either programmatically (chainable setters) or from a TOML
/// file. Validation happens in [`crate::Runner::new`], before any
/// network activity.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BenchConfig {
    /// Target URL, must carry a scheme and host
    pub url: String,
    /// HTTP method, case-insensitive
    pub method: String,
    /// Optional request body sent with every request
    pub body: Option<String>,
    /// Optional content-type header for the body
    pub content_type: Option<String>,
    /// Total number of requests to perform
    pub requests: u64,
    /// Maximum number of requests in flight at once
    pub concurrency: u64,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// User agent header value
    pub user_agent: String,
}

impl Default for BenchConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: "GET".to_string(),
            body: None,
            content_type: None,
            requests: 1,
            concurrency: 1,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl BenchConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, BenchError> {
        let contents = std::fs::read_to_string(path)?;
        let config: BenchConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    pub fn with_method(mut self, method: impl Into<String>) -> Self {
        self.method = method.into();
        self
    }

    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn with_requests(mut self, requests: u64) -> Self {
        self.requests = requests;
        self
    }

    pub fn with_concurrency(mut self, concurrency: u64) -> Self {
        self.concurrency = concurrency;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_ms = timeout.as_millis() as u64;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}
