//! MCP server/tool configuration persistence port.

use async_trait::async_trait;

use crate::entities::{McpServerConfig, McpTool};
use crate::error::Result;

/// Port for persisted MCP server configuration and their cached tool lists.
#[async_trait]
pub trait McpServerRepository: Send + Sync {
    /// Lists all server configs for a project.
    async fn list_servers(&self, project_id: &str) -> Result<Vec<McpServerConfig>>;

    /// Fetches a server config by `(project_id, name)`.
    async fn get_server(&self, project_id: &str, name: &str) -> Result<Option<McpServerConfig>>;

    /// Inserts a new server config.
    async fn insert_server(&self, config: &McpServerConfig) -> Result<()>;

    /// Deletes a server config, cascading to its tools and tool embeddings.
    async fn delete_server(&self, project_id: &str, name: &str) -> Result<()>;

    /// Replaces the cached tool list for a server (delete-then-insert).
    async fn replace_tools(&self, server_id: &str, tools: &[McpTool]) -> Result<()>;

    /// Lists the cached tools for a server.
    async fn list_tools(&self, server_id: &str) -> Result<Vec<McpTool>>;
}
