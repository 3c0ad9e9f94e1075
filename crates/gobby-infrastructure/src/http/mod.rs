//! Shared, reusable `reqwest` client implementing
//! [`HttpClientProvider`](gobby_domain::ports::HttpClientProvider), consumed
//! by the webhook dispatcher and the HTTP/SSE MCP transports so every
//! outbound call shares one connection pool.

use gobby_domain::ports::{HttpClientConfig, HttpClientProvider};
use reqwest::Client;

/// Builds and owns the process-wide [`reqwest::Client`].
pub struct ReqwestHttpClientProvider {
    client: Client,
    config: HttpClientConfig,
}

impl ReqwestHttpClientProvider {
    /// Builds a client from `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying TLS backend fails to initialize.
    pub fn new(config: HttpClientConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .pool_max_idle_per_host(config.max_idle_per_host)
            .pool_idle_timeout(config.idle_timeout)
            .tcp_keepalive(config.keepalive)
            .timeout(config.timeout)
            .user_agent(config.user_agent.clone())
            .build()?;
        Ok(Self { client, config })
    }
}

impl Default for ReqwestHttpClientProvider {
    fn default() -> Self {
        Self::new(HttpClientConfig::default()).expect("default reqwest client config is always valid")
    }
}

impl HttpClientProvider for ReqwestHttpClientProvider {
    fn client(&self) -> &Client {
        &self.client
    }

    fn config(&self) -> &HttpClientConfig {
        &self.config
    }

    fn client_with_timeout(
        &self,
        timeout: std::time::Duration,
    ) -> Result<Client, Box<dyn std::error::Error + Send + Sync>> {
        Client::builder()
            .pool_max_idle_per_host(self.config.max_idle_per_host)
            .pool_idle_timeout(self.config.idle_timeout)
            .tcp_keepalive(self.config.keepalive)
            .timeout(timeout)
            .user_agent(self.config.user_agent.clone())
            .build()
            .map_err(|e| Box::new(e) as Box<dyn std::error::Error + Send + Sync>)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_provider_builds() {
        let provider = ReqwestHttpClientProvider::default();
        assert_eq!(provider.config().max_idle_per_host, 10);
    }

    #[test]
    fn client_with_timeout_builds_independently() {
        let provider = ReqwestHttpClientProvider::default();
        let custom = provider.client_with_timeout(std::time::Duration::from_secs(5));
        assert!(custom.is_ok());
    }
}
