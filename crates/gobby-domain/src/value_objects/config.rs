//! Configuration Value Objects
//!
//! The validated configuration object the daemon consumes at startup.
//! Loading, `${VAR}`/`${VAR:-default}` substitution, and file-watching for
//! reload all happen outside the domain layer; this module only describes
//! the shape once it has been parsed and validated.

use serde::{Deserialize, Serialize};

/// Top-level daemon configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DaemonConfig {
    /// Port the daemon's control surface listens on.
    pub daemon_port: u16,
    /// Interval, in seconds, between self health checks.
    pub daemon_health_check_interval: u64,
    /// Path to the embedded relational store file.
    pub database_path: String,
    /// WebSocket broadcast configuration.
    pub websocket: WebSocketConfig,
    /// Configured LLM provider backends, keyed by name.
    pub llm_providers: std::collections::HashMap<String, LlmProviderConfig>,
    /// Memory subsystem tuning.
    pub memory: MemoryConfig,
    /// Webhook and plugin extension configuration.
    pub hook_extensions: HookExtensionsConfig,
    /// Session lifecycle sweeper tuning.
    pub session_lifecycle: SessionLifecycleConfig,
    /// Task expansion/validation tuning.
    pub gobby_tasks: GobbyTasksConfig,
}

/// WebSocket event-broadcast configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebSocketConfig {
    /// Whether the WebSocket broadcast endpoint is enabled.
    pub enabled: bool,
    /// Port the WebSocket endpoint listens on.
    pub port: u16,
    /// Event type names that are forwarded to subscribers.
    pub broadcast_events: Vec<String>,
}

/// Configuration for a single LLM provider backend.
#[derive(Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmProviderConfig {
    /// Provider kind, e.g. `"anthropic"`, `"openai"`, `"ollama"`.
    pub provider: String,
    /// Model identifier specific to the provider.
    pub model: String,
    /// API key, if the provider requires one.
    pub api_key: Option<String>,
    /// Custom API endpoint, for self-hosted or proxy deployments.
    pub base_url: Option<String>,
}

impl std::fmt::Debug for LlmProviderConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LlmProviderConfig")
            .field("provider", &self.provider)
            .field("model", &self.model)
            .field("api_key", &self.api_key.as_ref().map(|_| "REDACTED"))
            .field("base_url", &self.base_url)
            .finish()
    }
}

/// Memory subsystem tuning: recall scoring, importance decay, access debounce.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MemoryConfig {
    /// Monthly importance decay rate, applied multiplicatively.
    pub importance_decay_rate_per_month: f64,
    /// Floor below which importance never decays further.
    pub importance_floor: f64,
    /// Minimum seconds between `access_count`/`last_accessed_at` updates for the same memory.
    pub access_debounce_secs: u64,
    /// Default result limit for `recall` when the caller does not specify one.
    pub default_recall_limit: usize,
}

/// Webhook and plugin hook-extension configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HookExtensionsConfig {
    /// Webhook dispatcher configuration.
    pub webhooks: WebhooksConfig,
    /// Plugin host configuration.
    pub plugins: PluginsConfig,
}

/// Webhook dispatcher configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebhooksConfig {
    /// Whether the webhook dispatcher is enabled.
    pub enabled: bool,
    /// Configured webhook endpoints.
    pub endpoints: Vec<WebhookEndpointConfig>,
    /// Default request timeout in seconds, used when an endpoint omits one.
    pub default_timeout: f64,
    /// Whether non-blocking webhooks are dispatched asynchronously (fire-and-forget).
    pub async_dispatch: bool,
}

/// A single configured webhook endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WebhookEndpointConfig {
    /// Unique name for this endpoint.
    pub name: String,
    /// Target URL, supports `${ENV}` substitution.
    pub url: String,
    /// Event types this endpoint receives; empty means all events.
    pub events: Vec<String>,
    /// Extra HTTP headers, supports `${ENV}` substitution.
    pub headers: std::collections::HashMap<String, String>,
    /// Request timeout in seconds, clamped to `[1, 60]`.
    pub timeout: f64,
    /// Retry attempts on failure, clamped to `[0, 10]`.
    pub retry_count: u32,
    /// Delay between retries in seconds, clamped to `[0.1, 30]`.
    pub retry_delay: f64,
    /// Whether this endpoint's response can block or ask about the triggering action.
    pub can_block: bool,
    /// Whether this endpoint is currently active.
    pub enabled: bool,
}

/// Plugin host configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PluginsConfig {
    /// Whether the plugin host is enabled.
    pub enabled: bool,
    /// Directories to load plugins from; supports `~` expansion.
    pub plugin_dirs: Vec<String>,
    /// Whether plugin directories are scanned automatically on startup.
    pub auto_discover: bool,
}

/// Session lifecycle sweeper tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionLifecycleConfig {
    /// Minutes of inactivity before an active session is marked paused.
    pub active_session_pause_minutes: u64,
    /// Hours of inactivity before a session is marked expired.
    pub stale_session_timeout_hours: u64,
    /// Interval, in minutes, between expiry sweeps.
    pub expire_check_interval_minutes: u64,
    /// Interval, in minutes, between transcript-processing sweeps.
    pub transcript_processing_interval_minutes: u64,
    /// Maximum sessions processed per transcript-processing sweep.
    pub transcript_processing_batch_size: usize,
}

/// Task expansion/validation tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct GobbyTasksConfig {
    /// Task-expansion tuning.
    pub expansion: TaskExpansionConfig,
    /// Task-validation tuning.
    pub validation: TaskValidationConfig,
}

/// Task-expansion tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskExpansionConfig {
    /// Whether automatic task expansion into subtasks is enabled.
    pub enabled: bool,
    /// Complexity score at or above which a task is a candidate for expansion.
    pub complexity_threshold: f64,
    /// Maximum subtasks produced by a single expansion.
    pub max_subtasks: usize,
}

/// Task-validation tuning.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaskValidationConfig {
    /// Whether validation against acceptance criteria is enabled.
    pub enabled: bool,
    /// Whether validation is delegated to an external validator tool by default.
    pub use_external_validator_by_default: bool,
    /// Consecutive failed validations after which a task is escalated to a human.
    pub max_fail_count_before_escalation: u32,
}
