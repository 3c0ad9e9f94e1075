//!
//! **Documentation**: [docs/modules/domain.md](../../../../docs/modules/domain.md#value-objects)
//!
//! Immutable value objects: the validated configuration surface the daemon
//! consumes, and auto-resolved project identity.

/// Validated daemon configuration.
pub mod config;
/// Wire types for the hook pipeline event/response boundary.
pub mod hook;
/// Auto-resolved project identity derived from the git repository.
pub mod project_context;

pub use config::{
    DaemonConfig, GobbyTasksConfig, HookExtensionsConfig, LlmProviderConfig, MemoryConfig,
    PluginsConfig, SessionLifecycleConfig, TaskExpansionConfig, TaskValidationConfig,
    WebSocketConfig, WebhookEndpointConfig, WebhooksConfig,
};
pub use hook::{HookDecision, HookEvent, HookEventType, HookResponse};
pub use project_context::ProjectContext;
