//! Streamable-HTTP MCP transport: a JSON-RPC 2.0 POST per call, with a
//! session initialized by an `initialize` handshake.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use gobby_domain::error::{Error, Result};
use gobby_domain::ports::{McpConnection, McpSession};
use serde_json::{Value, json};

struct HttpRpc {
    name: String,
    url: String,
    headers: Vec<(String, String)>,
    client: reqwest::Client,
}

impl HttpRpc {
    async fn call(&self, method: &str, params: Value) -> Result<Value> {
        let body = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let mut builder = self.client.post(&self.url);
        for (key, value) in &self.headers {
            builder = builder.header(key, value);
        }
        let response = builder
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::transport_connect(self.name.clone(), e.to_string()))?;
        let parsed: Value = response
            .json()
            .await
            .map_err(|e| Error::transport_connect(self.name.clone(), e.to_string()))?;
        if let Some(error) = parsed.get("error") {
            return Err(Error::call_failed(
                self.name.clone(),
                method.to_owned(),
                error.to_string(),
            ));
        }
        Ok(parsed.get("result").cloned().unwrap_or(Value::Null))
    }
}

/// One HTTP-transport MCP server: base URL plus custom headers.
pub struct HttpConnection {
    rpc: Arc<HttpRpc>,
    connected: AtomicBool,
}

impl HttpConnection {
    /// Builds a connection for `name` at `url` with the given extra headers.
    #[must_use]
    pub fn new(name: String, url: String, headers: Vec<(String, String)>) -> Self {
        Self {
            rpc: Arc::new(HttpRpc {
                name,
                url,
                headers,
                client: reqwest::Client::new(),
            }),
            connected: AtomicBool::new(false),
        }
    }
}

struct HttpSession {
    rpc: Arc<HttpRpc>,
}

#[async_trait]
impl McpSession for HttpSession {
    async fn call_tool(
        &self,
        tool_name: &str,
        arguments: Value,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        let params = json!({ "name": tool_name, "arguments": arguments });
        let call = self.rpc.call("tools/call", params);
        match timeout {
            Some(duration) => tokio::time::timeout(duration, call).await.map_err(|_| {
                Error::call_failed(self.rpc.name.clone(), tool_name.to_owned(), "timed out".to_owned())
            })?,
            None => call.await,
        }
    }

    async fn read_resource(&self, uri: &str) -> Result<Value> {
        self.rpc.call("resources/read", json!({ "uri": uri })).await
    }

    async fn list_tools(&self) -> Result<Value> {
        self.rpc.call("tools/list", json!({})).await
    }
}

#[async_trait]
impl McpConnection for HttpConnection {
    async fn connect(&self) -> Result<Box<dyn McpSession>> {
        self.rpc
            .call(
                "initialize",
                json!({ "protocolVersion": "2024-11-05", "capabilities": {} }),
            )
            .await?;
        self.connected.store(true, Ordering::SeqCst);
        Ok(Box::new(HttpSession {
            rpc: Arc::clone(&self.rpc),
        }))
    }

    async fn disconnect(&self) -> Result<()> {
        self.connected.store(false, Ordering::SeqCst);
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    async fn health_check(&self, timeout: Duration) -> Result<()> {
        tokio::time::timeout(timeout, self.rpc.call("ping", json!({})))
            .await
            .map_err(|_| Error::transport_connect(self.rpc.name.clone(), "health check timed out".to_owned()))??;
        Ok(())
    }
}
