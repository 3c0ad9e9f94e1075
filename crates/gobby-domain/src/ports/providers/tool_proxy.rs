//! Tool-proxy port consumed by the workflow engine's `call_mcp_tool` action
//! and the HTTP MCP-proxy surface.
//!
//! This sits one level above [`super::McpConnection`]/[`super::McpSession`]:
//! where those model a single transport connection, `ToolProxy` models the
//! whole pool, keyed by server name, so callers never hold a connection
//! directly.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::Result;

/// Routes tool calls and resource reads to the right pooled MCP connection.
#[async_trait]
pub trait ToolProxy: Send + Sync {
    /// Invokes `tool_name` on `server_name` with `arguments`.
    async fn call_tool(
        &self,
        server_name: &str,
        tool_name: &str,
        arguments: Value,
        timeout: Option<Duration>,
    ) -> Result<Value>;

    /// Reads a resource by URI from `server_name`.
    async fn read_resource(&self, server_name: &str, uri: &str) -> Result<Value>;

    /// Returns the cached tool list for `server_name`.
    async fn list_tools(&self, server_name: &str) -> Result<Value>;
}
