//! Webhook Dispatcher (C9): builds payloads, matches endpoints by event
//! type, dispatches sync (blocking) or async (fire-and-forget), and
//! aggregates a blocking decision for the hook pipeline.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gobby_application::{WebhookCallResult, WebhookExecutor, WebhookTarget};
use gobby_domain::error::{Error, Result};
use gobby_domain::ports::HttpClientProvider;
use gobby_domain::value_objects::{HookDecision, HookEvent};
use gobby_infrastructure::config::expand_env_vars;
use serde_json::{json, Value};
use tokio::sync::RwLock;

use super::config::WebhookEndpointConfig;

/// Outcome of one endpoint's webhook call.
#[derive(Debug, Clone)]
pub struct WebhookResult {
    /// Name of the endpoint that was called.
    pub endpoint_name: String,
    /// `true` if the call completed with a 2xx status.
    pub success: bool,
    /// HTTP status code, if a response was received at all.
    pub status_code: Option<u16>,
    /// Parsed JSON response body, or the raw string if not valid JSON.
    pub response_body: Option<Value>,
    /// Error description, set when `success` is `false`.
    pub error: Option<String>,
    /// Response headers, as a JSON object of strings.
    pub headers: Value,
}

/// Dispatches outbound HTTP calls to configured webhook endpoints.
pub struct WebhookDispatcher {
    endpoints: RwLock<Vec<WebhookEndpointConfig>>,
    http: Arc<dyn HttpClientProvider>,
}

impl WebhookDispatcher {
    /// Builds a dispatcher over `endpoints`, sharing `http`'s connection pool.
    #[must_use]
    pub fn new(endpoints: Vec<WebhookEndpointConfig>, http: Arc<dyn HttpClientProvider>) -> Self {
        Self {
            endpoints: RwLock::new(endpoints),
            http,
        }
    }

    /// Replaces the configured endpoint list, e.g. after a config hot-reload.
    pub async fn set_endpoints(&self, endpoints: Vec<WebhookEndpointConfig>) {
        *self.endpoints.write().await = endpoints;
    }

    async fn matching_endpoints(&self, event: &HookEvent, blocking_only: bool) -> Vec<WebhookEndpointConfig> {
        self.endpoints
            .read()
            .await
            .iter()
            .filter(|e| e.matches(event.event_type) && e.can_block == blocking_only)
            .cloned()
            .collect()
    }

    fn build_payload(event: &HookEvent) -> Value {
        json!({
            "event_type": event.event_type,
            "session_id": event.session_id,
            "source": event.source,
            "timestamp": event.timestamp,
            "data": event.data,
        })
    }

    async fn call_endpoint(&self, endpoint: &WebhookEndpointConfig, payload: &Value) -> WebhookResult {
        let url = expand_env_vars(&endpoint.url);
        let client = self
            .http
            .client_with_timeout(endpoint.timeout)
            .unwrap_or_else(|_| self.http.client().clone());

        let mut attempt = 0;
        loop {
            let mut request = client.post(&url).header("Content-Type", "application/json");
            for (key, value) in &endpoint.headers {
                request = request.header(key.as_str(), expand_env_vars(value));
            }

            match request.json(payload).send().await {
                Ok(response) => {
                    let status = response.status();
                    let headers = headers_to_json(response.headers());
                    let text = response.text().await.unwrap_or_default();
                    let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));

                    if status.is_success() {
                        return WebhookResult {
                            endpoint_name: endpoint.name.clone(),
                            success: true,
                            status_code: Some(status.as_u16()),
                            response_body: Some(body),
                            error: None,
                            headers,
                        };
                    }
                    if attempt >= endpoint.retry_count {
                        return WebhookResult {
                            endpoint_name: endpoint.name.clone(),
                            success: false,
                            status_code: Some(status.as_u16()),
                            response_body: Some(body),
                            error: Some(format!("non-2xx response: {status}")),
                            headers,
                        };
                    }
                }
                Err(e) => {
                    if attempt >= endpoint.retry_count {
                        return WebhookResult {
                            endpoint_name: endpoint.name.clone(),
                            success: false,
                            status_code: None,
                            response_body: None,
                            error: Some(e.to_string()),
                            headers: Value::Null,
                        };
                    }
                }
            }

            let backoff = endpoint.retry_delay * 2u32.pow(attempt);
            tokio::time::sleep(backoff).await;
            attempt += 1;
        }
    }

    /// Synchronously dispatches to enabled endpoints matching `event`'s
    /// type and `can_block == blocking_only`, collecting every result.
    pub async fn dispatch_sync(&self, event: &HookEvent, blocking_only: bool) -> Vec<WebhookResult> {
        let endpoints = self.matching_endpoints(event, blocking_only).await;
        if endpoints.is_empty() {
            return Vec::new();
        }
        let payload = Self::build_payload(event);
        let calls = endpoints.iter().map(|endpoint| self.call_endpoint(endpoint, &payload));
        futures::future::join_all(calls).await
    }

    /// Fire-and-forget dispatch to non-blocking endpoints matching `event`.
    /// Schedules each call on the current Tokio runtime; if no runtime is
    /// reachable from this thread, logs and drops without raising.
    pub fn dispatch_async(self: &Arc<Self>, event: HookEvent) {
        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let dispatcher = Arc::clone(self);
                handle.spawn(async move {
                    let results = dispatcher.dispatch_sync(&event, false).await;
                    for result in &results {
                        if !result.success {
                            tracing::warn!(
                                endpoint = result.endpoint_name,
                                error = ?result.error,
                                "async webhook dispatch failed"
                            );
                        }
                    }
                });
            }
            Err(_) => {
                tracing::warn!(
                    event_type = ?event.event_type,
                    "no Tokio runtime reachable, dropping async webhook dispatch"
                );
            }
        }
    }

    /// Reduces `results` to a single gating decision: any endpoint whose
    /// parsed body carries `{"decision": "block"}` or `{"decision": "ask"}`
    /// wins, `block` taking precedence over `ask`.
    #[must_use]
    pub fn get_blocking_decision(results: &[WebhookResult]) -> (HookDecision, Option<String>) {
        let mut ask: Option<&WebhookResult> = None;
        for result in results {
            let Some(body) = &result.response_body else { continue };
            let Some(decision) = body.get("decision").and_then(Value::as_str) else { continue };
            let reason = body
                .get("reason")
                .and_then(Value::as_str)
                .map(ToOwned::to_owned);
            match decision {
                "block" => return (HookDecision::Block, reason),
                "ask" if ask.is_none() => ask = Some(result),
                _ => {}
            }
        }
        match ask {
            Some(result) => (
                HookDecision::Ask,
                result
                    .response_body
                    .as_ref()
                    .and_then(|b| b.get("reason"))
                    .and_then(Value::as_str)
                    .map(ToOwned::to_owned),
            ),
            None => (HookDecision::Allow, None),
        }
    }

    /// Graceful shutdown hook; the shared HTTP client owns no per-dispatcher
    /// resources to release, but this gives callers a single, stable place
    /// to await before the Store and health monitor are closed.
    pub async fn close(&self) {
        tracing::debug!("webhook dispatcher closed");
    }
}

fn headers_to_json(headers: &reqwest::header::HeaderMap) -> Value {
    let mut map = serde_json::Map::new();
    for (key, value) in headers {
        if let Ok(value) = value.to_str() {
            map.insert(key.as_str().to_owned(), Value::String(value.to_owned()));
        }
    }
    Value::Object(map)
}

#[async_trait]
impl WebhookExecutor for WebhookDispatcher {
    async fn execute(
        &self,
        target: WebhookTarget,
        method: &str,
        payload: Option<Value>,
        retry: Option<u32>,
    ) -> Result<WebhookCallResult> {
        let (url, timeout, headers, retry_count, retry_delay, endpoint_name) = match target {
            WebhookTarget::Url(url) => (
                expand_env_vars(&url),
                Duration::from_secs(30),
                std::collections::HashMap::new(),
                retry.unwrap_or(0),
                Duration::from_millis(500),
                url,
            ),
            WebhookTarget::EndpointId(id) => {
                let endpoints = self.endpoints.read().await;
                let endpoint = endpoints
                    .iter()
                    .find(|e| e.name == id)
                    .ok_or_else(|| Error::not_found(format!("webhook endpoint '{id}'")))?;
                (
                    expand_env_vars(&endpoint.url),
                    endpoint.timeout,
                    endpoint.headers.clone(),
                    retry.unwrap_or(endpoint.retry_count),
                    endpoint.retry_delay,
                    endpoint.name.clone(),
                )
            }
        };

        let client = self
            .http
            .client_with_timeout(timeout)
            .unwrap_or_else(|_| self.http.client().clone());

        let mut attempt = 0;
        loop {
            let mut request = client.request(parse_method(method), &url);
            for (key, value) in &headers {
                request = request.header(key.as_str(), expand_env_vars(value));
            }
            if let Some(payload) = &payload {
                request = request.json(payload);
            }

            match request.send().await {
                Ok(response) => {
                    let status = response.status().as_u16();
                    let response_headers = headers_to_json(response.headers());
                    let text = response.text().await.unwrap_or_default();
                    let body = serde_json::from_str::<Value>(&text).unwrap_or(Value::String(text));
                    return Ok(WebhookCallResult {
                        status,
                        body,
                        headers: response_headers,
                    });
                }
                Err(e) => {
                    if attempt >= retry_count {
                        return Err(Error::webhook_failure(endpoint_name, e.to_string()));
                    }
                    tokio::time::sleep(retry_delay * 2u32.pow(attempt)).await;
                    attempt += 1;
                }
            }
        }
    }
}

fn parse_method(method: &str) -> reqwest::Method {
    method.parse().unwrap_or(reqwest::Method::POST)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(decision: Option<&str>) -> WebhookResult {
        WebhookResult {
            endpoint_name: "test".to_owned(),
            success: true,
            status_code: Some(200),
            response_body: decision.map(|d| json!({ "decision": d, "reason": "because" })),
            error: None,
            headers: Value::Null,
        }
    }

    #[test]
    fn blocking_decision_defaults_to_allow() {
        let (decision, reason) = WebhookDispatcher::get_blocking_decision(&[result(None)]);
        assert_eq!(decision, HookDecision::Allow);
        assert!(reason.is_none());
    }

    #[test]
    fn block_wins_over_ask() {
        let (decision, reason) =
            WebhookDispatcher::get_blocking_decision(&[result(Some("ask")), result(Some("block"))]);
        assert_eq!(decision, HookDecision::Block);
        assert_eq!(reason.as_deref(), Some("because"));
    }

    #[test]
    fn ask_wins_over_allow() {
        let (decision, _) = WebhookDispatcher::get_blocking_decision(&[result(None), result(Some("ask"))]);
        assert_eq!(decision, HookDecision::Ask);
    }
}
