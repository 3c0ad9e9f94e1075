//! WebSocket MCP transport: a single duplex socket speaking JSON-RPC 2.0.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use gobby_domain::error::{Error, Result};
use gobby_domain::ports::{McpConnection, McpSession};
use serde_json::{Value, json};
use tokio::net::TcpStream;
use tokio::sync::{Mutex, oneshot};
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream, tungstenite::Message};

type PendingReplies = Arc<Mutex<HashMap<i64, oneshot::Sender<Value>>>>;
type WsSink = futures_util::stream::SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// A single WebSocket-transport MCP server.
pub struct WebSocketConnection {
    name: String,
    url: String,
    sink: Mutex<Option<Arc<Mutex<WsSink>>>>,
    pending: PendingReplies,
}

impl WebSocketConnection {
    /// Builds a connection that dials `url` on `connect`.
    #[must_use]
    pub fn new(name: String, url: String) -> Self {
        Self {
            name,
            url,
            sink: Mutex::new(None),
            pending: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}

struct WebSocketSession {
    name: String,
    sink: Arc<Mutex<WsSink>>,
    pending: PendingReplies,
    next_id: AtomicI64,
}

impl WebSocketSession {
    async fn call(&self, method: &str, params: Value, timeout: Option<Duration>) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        let text = serde_json::to_string(&request)
            .map_err(|e| Error::call_failed(self.name.clone(), method.to_owned(), e.to_string()))?;

        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(id, tx);

        if let Err(e) = self.sink.lock().await.send(Message::Text(text.into())).await {
            self.pending.lock().await.remove(&id);
            return Err(Error::transport_connect(self.name.clone(), e.to_string()));
        }

        let wait = async { rx.await.map_err(|_| Error::transport_closed(self.name.clone())) };
        let response = match timeout {
            Some(duration) => tokio::time::timeout(duration, wait).await.map_err(|_| {
                Error::call_failed(self.name.clone(), method.to_owned(), "timed out".to_owned())
            })??,
            None => wait.await?,
        };

        if let Some(error) = response.get("error") {
            return Err(Error::call_failed(self.name.clone(), method.to_owned(), error.to_string()));
        }
        Ok(response.get("result").cloned().unwrap_or(Value::Null))
    }
}

#[async_trait]
impl McpSession for WebSocketSession {
    async fn call_tool(&self, tool_name: &str, arguments: Value, timeout: Option<Duration>) -> Result<Value> {
        self.call("tools/call", json!({ "name": tool_name, "arguments": arguments }), timeout)
            .await
    }

    async fn read_resource(&self, uri: &str) -> Result<Value> {
        self.call("resources/read", json!({ "uri": uri }), None).await
    }

    async fn list_tools(&self) -> Result<Value> {
        self.call("tools/list", json!({}), None).await
    }
}

#[async_trait]
impl McpConnection for WebSocketConnection {
    async fn connect(&self) -> Result<Box<dyn McpSession>> {
        let (stream, _response) = tokio_tungstenite::connect_async(&self.url)
            .await
            .map_err(|e| Error::transport_connect(self.name.clone(), e.to_string()))?;
        let (sink, mut stream_read) = stream.split();
        let sink = Arc::new(Mutex::new(sink));

        let reader_pending = Arc::clone(&self.pending);
        let name = self.name.clone();
        tokio::spawn(async move {
            while let Some(message) = stream_read.next().await {
                match message {
                    Ok(Message::Text(text)) => dispatch_response(&reader_pending, &name, &text).await,
                    Ok(Message::Close(_)) | Err(_) => break,
                    Ok(_) => {}
                }
            }
        });

        *self.sink.lock().await = Some(Arc::clone(&sink));

        Ok(Box::new(WebSocketSession {
            name: self.name.clone(),
            sink,
            pending: Arc::clone(&self.pending),
            next_id: AtomicI64::new(1),
        }))
    }

    async fn disconnect(&self) -> Result<()> {
        let mut guard = self.sink.lock().await;
        if let Some(sink) = guard.take() {
            let _ = sink.lock().await.close().await;
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.sink.try_lock().map(|guard| guard.is_some()).unwrap_or(false)
    }

    async fn health_check(&self, timeout: Duration) -> Result<()> {
        let guard = self.sink.lock().await;
        let sink = guard
            .as_ref()
            .ok_or_else(|| Error::not_connected(self.name.clone()))?;
        tokio::time::timeout(timeout, sink.lock().await.send(Message::Ping(Vec::new().into())))
            .await
            .map_err(|_| Error::transport_connect(self.name.clone(), "health check timed out".to_owned()))?
            .map_err(|e| Error::transport_connect(self.name.clone(), e.to_string()))
    }
}

async fn dispatch_response(pending: &PendingReplies, name: &str, text: &str) {
    let Ok(value) = serde_json::from_str::<Value>(text) else {
        tracing::warn!(server = %name, "websocket mcp: non-JSON message ignored");
        return;
    };
    let Some(id) = value.get("id").and_then(serde_json::Value::as_i64) else {
        return;
    };
    if let Some(tx) = pending.lock().await.remove(&id) {
        let _ = tx.send(value);
    }
}
