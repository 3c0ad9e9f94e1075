//!
//! **Documentation**: [docs/modules/providers.md](../../../../docs/modules/providers.md)
//!
//! Retry configuration constants for outbound provider requests (webhooks,
//! MCP HTTP transport reconnects).

/// Default retry count for outbound webhook/HTTP requests.
pub const HTTP_RETRY_COUNT: usize = 3;

/// Default retry backoff for outbound webhook/HTTP requests (milliseconds).
pub const HTTP_RETRY_BACKOFF_MS: u64 = 500;

/// Default retry count for MCP transport reconnect attempts.
pub const MCP_RECONNECT_RETRY_COUNT: usize = 5;

/// Default backoff between MCP transport reconnect attempts (seconds).
pub const MCP_RECONNECT_BACKOFF_SECS: u64 = 2;
