//! MCP transport pool: per-server connections (HTTP, stdio, WebSocket), health
//! tracking, and the pooled [`gobby_domain::ports::ToolProxy`] implementation.

mod health;
mod http;
mod pool;
mod stdio;
mod websocket;

pub use health::{ConnectionHealth, ConnectionState, HealthReport, HealthState};
pub use http::HttpConnection;
pub use pool::McpConnectionPool;
pub use stdio::StdioConnection;
pub use websocket::WebSocketConnection;
