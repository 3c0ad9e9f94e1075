//! Daemon-wide defaults referenced by config validation and the hook pipeline.

/// Default daemon HTTP port.
pub const DEFAULT_DAEMON_PORT: u16 = 8765;

/// Default daemon health-check interval, in seconds.
pub const DEFAULT_HEALTH_CHECK_INTERVAL_SECS: u64 = 30;

/// Default MCP connection-pool health-monitor tick interval, in seconds.
pub const DEFAULT_MCP_HEALTH_INTERVAL_SECS: u64 = 60;

/// Default per-health-check timeout, in seconds.
pub const DEFAULT_MCP_HEALTH_TIMEOUT_SECS: u64 = 5;

/// Consecutive MCP call failures at which a connection is marked `degraded`.
pub const MCP_DEGRADED_THRESHOLD: u32 = 3;

/// Consecutive MCP call failures at which a connection is marked `unhealthy`.
pub const MCP_UNHEALTHY_THRESHOLD: u32 = 5;

/// Default memory access-count debounce window, in seconds.
pub const DEFAULT_MEMORY_ACCESS_DEBOUNCE_SECS: i64 = 60;

/// Default active-session pause timeout, in minutes.
pub const DEFAULT_ACTIVE_SESSION_PAUSE_MINUTES: i64 = 60;

/// Default stale-session expiry timeout, in hours.
pub const DEFAULT_STALE_SESSION_TIMEOUT_HOURS: i64 = 24;

/// Fixed UUID of the synthetic project that orphaned sessions are reassigned to.
pub const ORPHANED_PROJECT_ID: &str = "00000000-0000-0000-0000-000000000000";
