//! External Provider Ports
//!
//! Ports for external services the domain depends on but does not implement:
//! outbound HTTP, LLM completion, MCP server connections, the tool-call
//! proxy, template rendering, process spawning, and transcript parsing.

/// HTTP client provider port.
pub mod http;
/// LLM text-completion provider port.
pub mod llm;
/// MCP connection/session ports shared by the HTTP, stdio, and WebSocket transports.
pub mod mcp_transport;
/// Process-spawning port for sub-agent CLI invocations.
pub mod spawner;
/// Template-rendering port for workflow action parameter interpolation.
pub mod template;
/// Pool-level tool-call routing port consumed by the workflow engine.
pub mod tool_proxy;
/// Transcript-parsing port consumed by summarization/handoff actions.
pub mod transcript;

pub use http::{HttpClientConfig, HttpClientProvider};
pub use llm::LlmProvider;
pub use mcp_transport::{McpConnection, McpSession};
pub use spawner::{SpawnedProcess, Spawner};
pub use template::TemplateEngine;
pub use tool_proxy::ToolProxy;
pub use transcript::{HandoffContext, TranscriptProcessor, TranscriptTurn};
