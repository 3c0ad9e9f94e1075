use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

use crate::error::Error;

/// Wire transport used to reach an MCP server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum McpTransport {
    /// Streamable HTTP with an `initialize` handshake.
    Http,
    /// A spawned child process speaking MCP over stdin/stdout.
    Stdio,
    /// A single duplex WebSocket connection.
    Websocket,
    /// Server-sent events.
    Sse,
}

impl McpTransport {
    /// Canonical lowercase string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Http => "http",
            Self::Stdio => "stdio",
            Self::Websocket => "websocket",
            Self::Sse => "sse",
        }
    }
}

impl std::str::FromStr for McpTransport {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "http" => Ok(Self::Http),
            "stdio" => Ok(Self::Stdio),
            "websocket" => Ok(Self::Websocket),
            "sse" => Ok(Self::Sse),
            other => Err(format!("Unsupported MCP transport: {other}")),
        }
    }
}

/// Configuration and persisted registration of an MCP server scoped to a project.
///
/// Unique on `(name, project_id)`. Deleting the owning project cascades to servers,
/// their tools, tool embeddings, and any cached metrics.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct McpServerConfig {
    /// UUID primary key.
    pub id: String,
    /// Server name, unique within the owning project.
    pub name: String,
    /// Owning project.
    pub project_id: String,
    /// Wire transport.
    pub transport: McpTransport,
    /// Base URL, required for `http`/`websocket`/`sse`.
    pub url: Option<String>,
    /// Command to spawn, required for `stdio`.
    pub command: Option<String>,
    /// Arguments passed to the spawned command.
    pub args: Option<Value>,
    /// Environment variables set for the spawned command or merged into HTTP requests.
    pub env: Option<Value>,
    /// Extra HTTP headers, supports `${ENV}` substitution.
    pub headers: Option<Value>,
    /// Whether this server participates in `connect_all`.
    pub enabled: bool,
    /// Human-readable description.
    pub description: Option<String>,
    /// Creation timestamp, ISO-8601 UTC.
    pub created_at: String,
    /// Last-update timestamp, ISO-8601 UTC.
    pub updated_at: String,
}

impl McpServerConfig {
    /// Validates the transport-specific requirements of this configuration.
    ///
    /// `http`/`websocket`/`sse` require `url`; `stdio` requires `command`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::invalid_argument`] when the required field for the
    /// configured transport is missing.
    pub fn validate(&self) -> Result<(), Error> {
        match self.transport {
            McpTransport::Http | McpTransport::Websocket | McpTransport::Sse => {
                if self.url.as_deref().unwrap_or_default().is_empty() {
                    return Err(Error::invalid_argument(format!(
                        "MCP server '{}' uses transport '{}' but has no url",
                        self.name,
                        self.transport.as_str()
                    )));
                }
            }
            McpTransport::Stdio => {
                if self.command.as_deref().unwrap_or_default().is_empty() {
                    return Err(Error::invalid_argument(format!(
                        "MCP server '{}' uses transport 'stdio' but has no command",
                        self.name
                    )));
                }
            }
        }
        Ok(())
    }
}

/// A tool exposed by an [`McpServerConfig`], cached locally after discovery.
///
/// Unique on `(mcp_server_id, name)`; cascades on server deletion.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct McpTool {
    /// UUID primary key.
    pub id: String,
    /// Owning MCP server.
    pub mcp_server_id: String,
    /// Tool name as reported by the server.
    pub name: String,
    /// Tool description as reported by the server.
    pub description: Option<String>,
    /// JSON Schema describing the tool's input arguments.
    pub input_schema: Option<Value>,
    /// Creation timestamp, ISO-8601 UTC.
    pub created_at: String,
    /// Last-update timestamp, ISO-8601 UTC.
    pub updated_at: String,
}

/// Cached embedding for a [`McpTool`], used for semantic tool routing.
///
/// `text_hash` is the content hash of the text that produced `embedding`, so a
/// changed tool description can be detected and re-embedded.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct McpToolEmbedding {
    /// Owning tool (one embedding row per tool).
    pub tool_id: String,
    /// Embedding vector.
    pub embedding: Vec<f32>,
    /// Content hash of the text the embedding was computed from.
    pub text_hash: String,
    /// Creation timestamp, ISO-8601 UTC.
    pub created_at: String,
}

crate::impl_table_schema!(McpServerConfig, "mcp_servers",
    columns: [
        ("id", Text, pk),
        ("name", Text),
        ("project_id", Text),
        ("transport", Text),
        ("url", Text, nullable),
        ("command", Text, nullable),
        ("args", Json, nullable),
        ("env", Json, nullable),
        ("headers", Json, nullable),
        ("enabled", Boolean),
        ("description", Text, nullable),
        ("created_at", Text),
        ("updated_at", Text),
    ],
    indexes: [
        "idx_mcp_servers_project" => ["project_id"],
    ],
    foreign_keys: [
        ("project_id", "projects", "id"),
    ],
    unique_constraints: [
        ["name", "project_id"],
    ],
);

crate::impl_table_schema!(McpTool, "mcp_tools",
    columns: [
        ("id", Text, pk),
        ("mcp_server_id", Text),
        ("name", Text),
        ("description", Text, nullable),
        ("input_schema", Json, nullable),
        ("created_at", Text),
        ("updated_at", Text),
    ],
    indexes: [
        "idx_mcp_tools_server" => ["mcp_server_id"],
    ],
    foreign_keys: [
        ("mcp_server_id", "mcp_servers", "id"),
    ],
    unique_constraints: [
        ["mcp_server_id", "name"],
    ],
);

crate::impl_table_schema!(McpToolEmbedding, "mcp_tool_embeddings",
    columns: [
        ("tool_id", Text, pk),
        ("embedding", Blob),
        ("text_hash", Text),
        ("created_at", Text),
    ],
    foreign_keys: [
        ("tool_id", "mcp_tools", "id"),
    ],
);
