//! HTTP client provider port, used by the webhook dispatcher and the HTTP/SSE
//! MCP transports.

use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};

/// HTTP client configuration.
///
/// Controls connection pooling, timeouts, and other HTTP client behavior.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HttpClientConfig {
    /// Maximum idle connections per host.
    pub max_idle_per_host: usize,
    /// Idle connection timeout.
    pub idle_timeout: Duration,
    /// TCP keep-alive duration.
    pub keepalive: Duration,
    /// Total timeout for requests.
    pub timeout: Duration,
    /// User agent string.
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            max_idle_per_host: 10,
            idle_timeout: Duration::from_secs(90),
            keepalive: Duration::from_secs(60),
            timeout: Duration::from_secs(30),
            user_agent: "gobbyd/http-client".to_owned(),
        }
    }
}

/// Port for a managed, reusable HTTP client.
pub trait HttpClientProvider: Send + Sync {
    /// Returns a reference to the underlying client.
    fn client(&self) -> &Client;

    /// Returns the configuration the client was built from.
    fn config(&self) -> &HttpClientConfig;

    /// Builds a one-off client with a custom timeout for a specific call.
    fn client_with_timeout(
        &self,
        timeout: Duration,
    ) -> Result<Client, Box<dyn std::error::Error + Send + Sync>>;
}
