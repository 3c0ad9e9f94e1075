//! Event Publisher Domain Port
//!
//! Defines the business contract for publishing domain events. This
//! abstraction lets services publish events without coupling to a specific
//! broadcast implementation.

use crate::error::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Service lifecycle state for managed services.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum ServiceState {
    /// Service is starting up.
    Starting,
    /// Service is running normally.
    Running,
    /// Service is stopping.
    Stopping,
    /// Service is stopped.
    Stopped,
    /// Service failed with error.
    Failed {
        /// Reason for failure.
        reason: String,
    },
}

impl Default for ServiceState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// Domain-level occurrences that other parts of the system can react to.
///
/// Published on the in-process broadcaster; subscribers include the
/// webhook dispatcher, the plugin host, and connected WebSocket clients.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DomainEvent {
    /// A session was registered (created or resumed) for a project.
    SessionRegistered {
        /// The session's internal id.
        session_id: String,
        /// Owning project.
        project_id: String,
    },
    /// A session's lifecycle status changed.
    SessionStatusChanged {
        /// The session's internal id.
        session_id: String,
        /// New status, e.g. `"paused"`, `"expired"`, `"completed"`.
        status: String,
    },
    /// A task was created.
    TaskCreated {
        /// The task's internal id.
        task_id: String,
        /// Owning project.
        project_id: String,
    },
    /// A task's lifecycle status changed.
    TaskStatusChanged {
        /// The task's internal id.
        task_id: String,
        /// New status, e.g. `"in_progress"`, `"completed"`, `"cancelled"`.
        status: String,
    },
    /// A task was closed against a commit.
    TaskClosed {
        /// The task's internal id.
        task_id: String,
        /// Session that closed the task.
        session_id: String,
        /// Short commit hash, if known.
        commit_sha: Option<String>,
    },
    /// A memory was saved.
    MemorySaved {
        /// The memory's internal id.
        memory_id: String,
        /// Owning project, or `None` for a global memory.
        project_id: Option<String>,
    },
    /// A workflow state transitioned to a new step.
    WorkflowStepTransitioned {
        /// Owning session.
        session_id: String,
        /// Workflow name driving the session.
        workflow_name: String,
        /// Name of the step entered.
        step: String,
    },
    /// An MCP server's connection health changed.
    McpServerHealthChanged {
        /// The MCP server's internal id.
        mcp_server_id: String,
        /// Whether the server is currently reachable.
        healthy: bool,
    },
    /// A webhook delivery was attempted.
    WebhookDelivered {
        /// Configured webhook name.
        webhook_name: String,
        /// HTTP status code, if the request completed.
        status_code: Option<u16>,
    },
    /// A managed service's lifecycle state changed.
    ServiceStateChanged {
        /// Name of the service.
        name: String,
        /// New state.
        state: ServiceState,
        /// Previous state, if known.
        previous_state: Option<ServiceState>,
    },
}

/// Domain port for publishing system events.
///
/// Services use this trait to publish events that other parts of the system
/// can react to, without coupling to the broadcaster's implementation.
///
/// # Example
///
/// ```rust,no_run
/// use gobby_domain::events::{DomainEvent, EventPublisher};
///
/// async fn notify_task_created(
///     publisher: &dyn EventPublisher,
///     task_id: String,
///     project_id: String,
/// ) -> gobby_domain::Result<()> {
///     publisher.publish(DomainEvent::TaskCreated { task_id, project_id }).await?;
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publish an event to all subscribers.
    ///
    /// Returns `Ok(())` once the event has been sent, which does not
    /// guarantee that any subscriber received it.
    async fn publish(&self, event: DomainEvent) -> Result<()>;

    /// Returns `true` if at least one subscriber is currently listening.
    fn has_subscribers(&self) -> bool;
}

/// Shared event publisher handle.
pub type SharedEventPublisher = Arc<dyn EventPublisher>;
