//! Port consumed by the `webhook` workflow action.
//!
//! The workflow engine only needs to fire a single outbound call and,
//! optionally, read back pieces of the response; resolving `webhook_id`
//! against configured endpoints, retry/backoff policy, and async dispatch
//! are the webhook dispatcher's job, not the workflow engine's.

use async_trait::async_trait;
use gobby_domain::error::Result;
use serde_json::Value;

/// Which endpoint a `webhook` action call targets.
#[derive(Debug, Clone)]
pub enum WebhookTarget {
    /// A literal URL given directly in the action's parameters.
    Url(String),
    /// A configured endpoint, resolved by name.
    EndpointId(String),
}

/// Result of a single webhook call, as far as the workflow engine cares.
#[derive(Debug, Clone)]
pub struct WebhookCallResult {
    /// HTTP status code.
    pub status: u16,
    /// Parsed JSON response body, or `Value::Null` if not JSON.
    pub body: Value,
    /// Response headers, rendered as a JSON object of strings.
    pub headers: Value,
}

/// Executes a single outbound webhook call on behalf of the workflow engine.
#[async_trait]
pub trait WebhookExecutor: Send + Sync {
    /// Performs one `method` call against `target` with `payload`, retrying
    /// up to `retry` times on failure.
    async fn execute(
        &self,
        target: WebhookTarget,
        method: &str,
        payload: Option<Value>,
        retry: Option<u32>,
    ) -> Result<WebhookCallResult>;
}
