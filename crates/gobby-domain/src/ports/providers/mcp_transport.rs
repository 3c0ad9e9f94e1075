//! MCP connection port shared by the HTTP, stdio, and WebSocket transports.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// A single live RPC session against an MCP server, however it was
/// transported.
#[async_trait]
pub trait McpSession: Send + Sync {
    /// Invokes `tool_name` with `arguments`, optionally bounded by `timeout`.
    async fn call_tool(
        &self,
        tool_name: &str,
        arguments: Value,
        timeout: Option<Duration>,
    ) -> Result<Value>;

    /// Reads a resource by URI.
    async fn read_resource(&self, uri: &str) -> Result<Value>;

    /// Lists the tools currently advertised by the server.
    async fn list_tools(&self) -> Result<Value>;
}

/// Port implemented by each of the three leaf transports (HTTP, stdio,
/// WebSocket). The transport pool holds one per configured, enabled server.
#[async_trait]
pub trait McpConnection: Send + Sync {
    /// Establishes the underlying transport and performs the MCP
    /// `initialize` handshake, returning the live session.
    async fn connect(&self) -> Result<Box<dyn McpSession>>;

    /// Tears down the underlying transport.
    async fn disconnect(&self) -> Result<()>;

    /// `true` iff the connection is established and its session is live.
    fn is_connected(&self) -> bool;

    /// Performs a bounded liveness probe against the server.
    async fn health_check(&self, timeout: Duration) -> Result<()>;
}
