//! Connection and health state tracking for the MCP transport pool.

use gobby_domain::constants::daemon::{MCP_DEGRADED_THRESHOLD, MCP_UNHEALTHY_THRESHOLD};

/// Lifecycle state of a single [`super::McpConnection`](gobby_domain::ports::McpConnection).
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConnectionState {
    /// Never connected, or cleanly disconnected.
    Disconnected,
    /// `connect()` in flight.
    Connecting,
    /// Session established and live.
    Connected,
    /// The last `connect()` attempt failed.
    Failed,
}

/// Health band derived from consecutive operation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthState {
    /// No recent failures.
    Healthy,
    /// `consecutive_failures` has reached [`MCP_DEGRADED_THRESHOLD`].
    Degraded,
    /// `consecutive_failures` has reached [`MCP_UNHEALTHY_THRESHOLD`].
    Unhealthy,
}

/// Health tracking for one connection, updated after every operation.
#[derive(Debug, Clone, serde::Serialize)]
pub struct ConnectionHealth {
    /// Server name this health record belongs to.
    pub name: String,
    /// Current connection lifecycle state.
    pub state: ConnectionState,
    /// Current health band.
    pub health: HealthState,
    /// Timestamp (RFC 3339) of the last health check or call outcome.
    pub last_health_check: Option<String>,
    /// Failures since the last success.
    pub consecutive_failures: u32,
    /// Message from the most recent failure, if any.
    pub last_error: Option<String>,
    /// Response time of the most recent successful call, in milliseconds.
    pub response_time_ms: Option<f64>,
}

impl ConnectionHealth {
    /// A fresh, healthy record for a connection that has not yet been used.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            state: ConnectionState::Disconnected,
            health: HealthState::Healthy,
            last_health_check: None,
            consecutive_failures: 0,
            last_error: None,
            response_time_ms: None,
        }
    }

    /// Records a successful operation: clears failures, marks healthy.
    pub fn record_success(&mut self, response_time_ms: Option<f64>) {
        self.consecutive_failures = 0;
        self.last_error = None;
        self.health = HealthState::Healthy;
        self.response_time_ms = response_time_ms;
        self.last_health_check = Some(chrono::Utc::now().to_rfc3339());
    }

    /// Records a failed operation, transitioning the health band at the
    /// degraded/unhealthy thresholds.
    pub fn record_failure(&mut self, error: impl Into<String>) {
        self.consecutive_failures += 1;
        self.last_error = Some(error.into());
        self.last_health_check = Some(chrono::Utc::now().to_rfc3339());
        if self.consecutive_failures >= MCP_UNHEALTHY_THRESHOLD {
            self.health = HealthState::Unhealthy;
        } else if self.consecutive_failures >= MCP_DEGRADED_THRESHOLD {
            self.health = HealthState::Degraded;
        }
    }
}

/// Snapshot of [`ConnectionHealth`] for every configured server, returned by
/// `McpConnectionPool::get_health_report`.
#[derive(Debug, Clone, serde::Serialize)]
pub struct HealthReport {
    /// Per-server health snapshots.
    pub servers: Vec<ConnectionHealth>,
}

#[cfg(test)]
mod tests {
    use super::{ConnectionHealth, HealthState};

    #[test]
    fn degrades_at_three_consecutive_failures() {
        let mut health = ConnectionHealth::new("srv");
        for _ in 0..3 {
            health.record_failure("boom");
        }
        assert_eq!(health.health, HealthState::Degraded);
        assert_eq!(health.consecutive_failures, 3);
    }

    #[test]
    fn becomes_unhealthy_at_five_consecutive_failures() {
        let mut health = ConnectionHealth::new("srv");
        for _ in 0..5 {
            health.record_failure("boom");
        }
        assert_eq!(health.health, HealthState::Unhealthy);
    }

    #[test]
    fn success_resets_failure_count() {
        let mut health = ConnectionHealth::new("srv");
        health.record_failure("boom");
        health.record_failure("boom");
        health.record_success(Some(12.0));
        assert_eq!(health.consecutive_failures, 0);
        assert_eq!(health.health, HealthState::Healthy);
    }
}
