//! `McpConnectionPool` — owns one [`McpConnection`] per enabled, configured
//! MCP server, a background health monitor, and the cached tool catalog.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use gobby_domain::constants::daemon::{DEFAULT_MCP_HEALTH_INTERVAL_SECS, DEFAULT_MCP_HEALTH_TIMEOUT_SECS};
use gobby_domain::entities::{McpServerConfig, McpTool, McpTransport};
use gobby_domain::error::{Error, Result};
use gobby_domain::ports::{McpConnection, McpServerRepository, McpSession, ToolProxy};
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};

use super::health::{ConnectionHealth, ConnectionState, HealthReport};
use super::http::HttpConnection;
use super::stdio::StdioConnection;
use super::websocket::WebSocketConnection;

struct PooledServer {
    config: McpServerConfig,
    connection: Arc<dyn McpConnection>,
    session: Mutex<Option<Box<dyn McpSession>>>,
    health: Mutex<ConnectionHealth>,
}

/// Owns live connections to every enabled MCP server for a project, routes
/// `call_tool`/`read_resource`, and runs a background health monitor.
pub struct McpConnectionPool {
    project_id: String,
    repository: Arc<dyn McpServerRepository>,
    servers: RwLock<HashMap<String, Arc<PooledServer>>>,
    health_interval: Duration,
    health_timeout: Duration,
}

fn build_connection(config: &McpServerConfig) -> Result<Arc<dyn McpConnection>> {
    match config.transport {
        McpTransport::Http | McpTransport::Sse => {
            let url = config
                .url
                .clone()
                .ok_or_else(|| Error::invalid_argument(format!("{} has no url", config.name)))?;
            let headers = value_to_header_pairs(config.headers.as_ref());
            Ok(Arc::new(HttpConnection::new(config.name.clone(), url, headers)))
        }
        McpTransport::Websocket => {
            let url = config
                .url
                .clone()
                .ok_or_else(|| Error::invalid_argument(format!("{} has no url", config.name)))?;
            Ok(Arc::new(WebSocketConnection::new(config.name.clone(), url)))
        }
        McpTransport::Stdio => {
            let command = config
                .command
                .clone()
                .ok_or_else(|| Error::invalid_argument(format!("{} has no command", config.name)))?;
            let args = value_to_string_vec(config.args.as_ref());
            let env = value_to_string_map(config.env.as_ref());
            Ok(Arc::new(StdioConnection::new(config.name.clone(), command, args, env)))
        }
    }
}

fn value_to_header_pairs(value: Option<&Value>) -> Vec<(String, String)> {
    value
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .map(|(k, v)| (k.clone(), v.as_str().unwrap_or_default().to_owned()))
                .collect()
        })
        .unwrap_or_default()
}

fn value_to_string_map(value: Option<&Value>) -> HashMap<String, String> {
    value
        .and_then(Value::as_object)
        .map(|map| {
            map.iter()
                .map(|(k, v)| (k.clone(), v.as_str().unwrap_or_default().to_owned()))
                .collect()
        })
        .unwrap_or_default()
}

fn value_to_string_vec(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| items.iter().map(|v| v.as_str().unwrap_or_default().to_owned()).collect())
        .unwrap_or_default()
}

impl McpConnectionPool {
    /// Builds an empty pool for `project_id`. Call [`Self::connect_all`] to
    /// populate it from the repository's enabled server configs.
    #[must_use]
    pub fn new(project_id: String, repository: Arc<dyn McpServerRepository>) -> Self {
        Self {
            project_id,
            repository,
            servers: RwLock::new(HashMap::new()),
            health_interval: Duration::from_secs(DEFAULT_MCP_HEALTH_INTERVAL_SECS),
            health_timeout: Duration::from_secs(DEFAULT_MCP_HEALTH_TIMEOUT_SECS),
        }
    }

    /// Connects every enabled, stored server config concurrently.
    ///
    /// A connection failure is recorded (state `failed`, health
    /// `unhealthy`) but never aborts the rest of the pool.
    ///
    /// # Errors
    ///
    /// Returns an error only if listing server configs from the store fails.
    pub async fn connect_all(&self) -> Result<()> {
        let configs = self.repository.list_servers(&self.project_id).await?;
        let tasks = configs
            .into_iter()
            .filter(|c| c.enabled)
            .map(|config| self.connect_one(config));
        futures::future::join_all(tasks).await;
        Ok(())
    }

    async fn connect_one(&self, config: McpServerConfig) {
        let name = config.name.clone();
        let connection = match build_connection(&config) {
            Ok(connection) => connection,
            Err(e) => {
                tracing::warn!(server = %name, error = %e, "mcp pool: invalid server config");
                return;
            }
        };

        let mut health = ConnectionHealth::new(name.clone());
        let session = match connection.connect().await {
            Ok(session) => {
                health.state = ConnectionState::Connected;
                health.record_success(None);
                Some(session)
            }
            Err(e) => {
                health.state = ConnectionState::Failed;
                health.record_failure(e.to_string());
                None
            }
        };

        self.servers.write().await.insert(
            name,
            Arc::new(PooledServer {
                config,
                connection,
                session: Mutex::new(session),
                health: Mutex::new(health),
            }),
        );
    }

    /// Disconnects every connected server concurrently and clears the pool.
    pub async fn disconnect_all(&self) {
        let servers = self.servers.write().await.drain().map(|(_, s)| s).collect::<Vec<_>>();
        let tasks = servers.iter().map(|server| async {
            if let Err(e) = server.connection.disconnect().await {
                tracing::warn!(server = %server.config.name, error = %e, "mcp pool: disconnect failed");
            }
        });
        futures::future::join_all(tasks).await;
    }

    /// Validates `config`, connects, fetches the tool list, and persists the
    /// server plus its fresh tool schemas to the store (cascading
    /// replacement of any previously cached tools).
    ///
    /// # Errors
    ///
    /// Returns an error if the config is invalid, connecting fails, or the
    /// store write fails.
    pub async fn add_server(&self, config: McpServerConfig) -> Result<Vec<McpTool>> {
        config.validate()?;
        let connection = build_connection(&config)?;
        let session = connection.connect().await?;
        let tool_list = session.list_tools().await?;
        let tools = parse_tool_list(&config.id, &tool_list);

        self.repository.insert_server(&config).await?;
        self.repository.replace_tools(&config.id, &tools).await?;

        let mut health = ConnectionHealth::new(config.name.clone());
        health.state = ConnectionState::Connected;
        health.record_success(None);

        self.servers.write().await.insert(
            config.name.clone(),
            Arc::new(PooledServer {
                config,
                connection,
                session: Mutex::new(Some(session)),
                health: Mutex::new(health),
            }),
        );

        Ok(tools)
    }

    /// Disconnects (best-effort) and removes `name` from the pool and store,
    /// cascading to its cached tools and tool embeddings.
    ///
    /// # Errors
    ///
    /// Returns an error if the store deletion fails.
    pub async fn remove_server(&self, name: &str) -> Result<()> {
        if let Some(server) = self.servers.write().await.remove(name) {
            if let Err(e) = server.connection.disconnect().await {
                tracing::warn!(server = %name, error = %e, "mcp pool: disconnect on removal failed");
            }
        }
        self.repository.delete_server(&self.project_id, name).await
    }

    /// Snapshots per-server connection state and health.
    pub async fn get_health_report(&self) -> HealthReport {
        let servers = self.servers.read().await;
        let mut report = Vec::with_capacity(servers.len());
        for server in servers.values() {
            report.push(server.health.lock().await.clone());
        }
        HealthReport { servers: report }
    }

    /// Runs the background health monitor until cancelled. Ticks at
    /// `health_interval`, probing every connection with `health_check`
    /// bounded by `health_timeout`, and reconnecting any connection whose
    /// health becomes unhealthy.
    pub async fn run_health_monitor(self: Arc<Self>) {
        let mut ticker = tokio::time::interval(self.health_interval);
        loop {
            ticker.tick().await;
            let servers = self.servers.read().await.values().cloned().collect::<Vec<_>>();
            for server in servers {
                let outcome = server.connection.health_check(self.health_timeout).await;
                let mut health = server.health.lock().await;
                match outcome {
                    Ok(()) => health.record_success(None),
                    Err(e) => health.record_failure(e.to_string()),
                }
                let needs_reconnect = matches!(health.health, super::health::HealthState::Unhealthy);
                drop(health);
                if needs_reconnect {
                    self.reconnect(&server).await;
                }
            }
        }
    }

    async fn reconnect(&self, server: &Arc<PooledServer>) {
        let _ = server.connection.disconnect().await;
        let mut session_guard = server.session.lock().await;
        match server.connection.connect().await {
            Ok(session) => {
                *session_guard = Some(session);
                server.health.lock().await.state = ConnectionState::Connected;
            }
            Err(e) => {
                *session_guard = None;
                server.health.lock().await.state = ConnectionState::Failed;
                tracing::warn!(server = %server.config.name, error = %e, "mcp pool: reconnect failed");
            }
        }
    }

    async fn get_server(&self, name: &str) -> Result<Arc<PooledServer>> {
        self.servers
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| Error::unknown_server(name.to_owned()))
    }

    fn is_closed_stream_error(error: &Error) -> bool {
        matches!(error, Error::TransportClosed { .. })
    }
}

fn parse_tool_list(server_id: &str, value: &Value) -> Vec<McpTool> {
    let now = chrono::Utc::now().to_rfc3339();
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .map(|item| McpTool {
                    id: uuid::Uuid::new_v4().to_string(),
                    mcp_server_id: server_id.to_owned(),
                    name: item.get("name").and_then(Value::as_str).unwrap_or_default().to_owned(),
                    description: item.get("description").and_then(Value::as_str).map(ToOwned::to_owned),
                    input_schema: item.get("inputSchema").cloned(),
                    created_at: now.clone(),
                    updated_at: now.clone(),
                })
                .collect()
        })
        .unwrap_or_default()
}

#[async_trait]
impl ToolProxy for McpConnectionPool {
    async fn call_tool(
        &self,
        server_name: &str,
        tool_name: &str,
        arguments: Value,
        timeout: Option<Duration>,
    ) -> Result<Value> {
        let server = self.get_server(server_name).await?;

        if !server.connection.is_connected() {
            self.reconnect(&server).await;
            if !server.connection.is_connected() {
                return Err(Error::not_connected(server_name.to_owned()));
            }
        }

        let first_attempt = {
            let session_guard = server.session.lock().await;
            let session = session_guard
                .as_ref()
                .ok_or_else(|| Error::not_connected(server_name.to_owned()))?;
            session.call_tool(tool_name, arguments.clone(), timeout).await
        };

        let result = match first_attempt {
            Err(e) if Self::is_closed_stream_error(&e) => {
                self.reconnect(&server).await;
                let session_guard = server.session.lock().await;
                let session = session_guard
                    .as_ref()
                    .ok_or_else(|| Error::not_connected(server_name.to_owned()))?;
                session.call_tool(tool_name, arguments, timeout).await
            }
            other => other,
        };

        let mut health = server.health.lock().await;
        match &result {
            Ok(_) => health.record_success(None),
            Err(e) => health.record_failure(e.to_string()),
        }
        result.map_err(|e| Error::call_failed(server_name.to_owned(), tool_name.to_owned(), e.to_string()))
    }

    async fn read_resource(&self, server_name: &str, uri: &str) -> Result<Value> {
        let server = self.get_server(server_name).await?;

        if !server.connection.is_connected() {
            self.reconnect(&server).await;
            if !server.connection.is_connected() {
                return Err(Error::not_connected(server_name.to_owned()));
            }
        }

        let first_attempt = {
            let session_guard = server.session.lock().await;
            let session = session_guard
                .as_ref()
                .ok_or_else(|| Error::not_connected(server_name.to_owned()))?;
            session.read_resource(uri).await
        };

        let result = match first_attempt {
            Err(e) if Self::is_closed_stream_error(&e) => {
                self.reconnect(&server).await;
                let session_guard = server.session.lock().await;
                let session = session_guard
                    .as_ref()
                    .ok_or_else(|| Error::not_connected(server_name.to_owned()))?;
                session.read_resource(uri).await
            }
            other => other,
        };

        let mut health = server.health.lock().await;
        match &result {
            Ok(_) => health.record_success(None),
            Err(e) => health.record_failure(e.to_string()),
        }
        result
    }

    async fn list_tools(&self, server_name: &str) -> Result<Value> {
        let server = self.get_server(server_name).await?;
        let session_guard = server.session.lock().await;
        let session = session_guard
            .as_ref()
            .ok_or_else(|| Error::not_connected(server_name.to_owned()))?;
        session.list_tools().await
    }
}
