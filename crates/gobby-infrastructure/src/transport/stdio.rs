//! Stdio MCP transport: a spawned child process speaking line-delimited
//! JSON-RPC 2.0 over its stdin/stdout.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicI64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use gobby_domain::error::{Error, Result};
use gobby_domain::ports::{McpConnection, McpSession};
use serde_json::{Value, json};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::process::{Child, ChildStdin};
use tokio::sync::{Mutex, oneshot};

type PendingReplies = Arc<Mutex<HashMap<i64, oneshot::Sender<Value>>>>;

/// A spawned MCP server child process, configured with command/args/env.
pub struct StdioConnection {
    name: String,
    command: String,
    args: Vec<String>,
    env: HashMap<String, String>,
    child: Mutex<Option<Child>>,
}

impl StdioConnection {
    /// Builds a connection that spawns `command args...` with `env` merged
    /// into the child's environment on `connect`.
    #[must_use]
    pub fn new(name: String, command: String, args: Vec<String>, env: HashMap<String, String>) -> Self {
        Self {
            name,
            command,
            args,
            env,
            child: Mutex::new(None),
        }
    }
}

struct StdioSession {
    name: String,
    stdin: Arc<Mutex<ChildStdin>>,
    pending: PendingReplies,
    next_id: AtomicI64,
}

impl StdioSession {
    async fn call(&self, method: &str, params: Value, timeout: Option<Duration>) -> Result<Value> {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = json!({
            "jsonrpc": "2.0",
            "id": id,
            "method": method,
            "params": params,
        });
        let mut line = serde_json::to_string(&request)
            .map_err(|e| Error::call_failed(self.name.clone(), method.to_owned(), e.to_string()))?;
        line.push('\n');

        let (tx, rx) = oneshot::channel();
        self.pending.lock().await.insert(id, tx);

        {
            let mut stdin = self.stdin.lock().await;
            if let Err(e) = stdin.write_all(line.as_bytes()).await {
                self.pending.lock().await.remove(&id);
                return Err(Error::transport_connect(self.name.clone(), e.to_string()));
            }
            if let Err(e) = stdin.flush().await {
                self.pending.lock().await.remove(&id);
                return Err(Error::transport_connect(self.name.clone(), e.to_string()));
            }
        }

        let wait = async {
            rx.await
                .map_err(|_| Error::transport_closed(self.name.clone()))
        };
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
impl McpSession for StdioSession {
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
impl McpConnection for StdioConnection {
    async fn connect(&self) -> Result<Box<dyn McpSession>> {
        let mut cmd = tokio::process::Command::new(&self.command);
        cmd.args(&self.args)
            .envs(&self.env)
            .stdin(std::process::Stdio::piped())
            .stdout(std::process::Stdio::piped())
            .stderr(std::process::Stdio::null());

        let mut child = cmd
            .spawn()
            .map_err(|e| Error::transport_connect(self.name.clone(), e.to_string()))?;

        let stdin = child
            .stdin
            .take()
            .ok_or_else(|| Error::transport_connect(self.name.clone(), "child stdin not piped".to_owned()))?;
        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::transport_connect(self.name.clone(), "child stdout not piped".to_owned()))?;

        let pending: PendingReplies = Arc::new(Mutex::new(HashMap::new()));
        let reader_pending = Arc::clone(&pending);
        let name = self.name.clone();
        tokio::spawn(async move {
            let mut reader = BufReader::new(stdout).lines();
            loop {
                match reader.next_line().await {
                    Ok(Some(line)) => dispatch_response(&reader_pending, &name, &line).await,
                    Ok(None) | Err(_) => break,
                }
            }
        });

        *self.child.lock().await = Some(child);

        Ok(Box::new(StdioSession {
            name: self.name.clone(),
            stdin: Arc::new(Mutex::new(stdin)),
            pending,
            next_id: AtomicI64::new(1),
        }))
    }

    async fn disconnect(&self) -> Result<()> {
        let mut guard = self.child.lock().await;
        if let Some(mut child) = guard.take() {
            let _ = child.start_kill();
            let _ = child.wait().await;
        }
        Ok(())
    }

    fn is_connected(&self) -> bool {
        self.child
            .try_lock()
            .map(|guard| guard.is_some())
            .unwrap_or(false)
    }

    async fn health_check(&self, _timeout: Duration) -> Result<()> {
        let mut guard = self.child.lock().await;
        match guard.as_mut() {
            Some(child) => match child.try_wait() {
                Ok(None) => Ok(()),
                Ok(Some(status)) => Err(Error::transport_closed(format!("{} exited: {status}", self.name))),
                Err(e) => Err(Error::transport_connect(self.name.clone(), e.to_string())),
            },
            None => Err(Error::not_connected(self.name.clone())),
        }
    }
}

async fn dispatch_response(pending: &PendingReplies, name: &str, line: &str) {
    let Ok(value) = serde_json::from_str::<Value>(line) else {
        tracing::warn!(server = %name, %line, "stdio mcp: non-JSON line ignored");
        return;
    };
    let Some(id) = value.get("id").and_then(serde_json::Value::as_i64) else {
        tracing::trace!(server = %name, "stdio mcp: notification (no id)");
        return;
    };
    if let Some(tx) = pending.lock().await.remove(&id) {
        let _ = tx.send(value);
    }
}
