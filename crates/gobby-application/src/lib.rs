//! Application Layer
//!
//! Business logic sitting between the domain's ports and the daemon's
//! transport/orchestration layers, built per Clean Architecture's
//! dependency direction: this crate depends on `gobby-domain` only, never
//! on `gobby-infrastructure` or `gobby-providers`.
//!
//! ## Contents
//!
//! - `registries`: thin services over the session, task, and memory
//!   repository ports — the bookkeeping a front-end CLI session,
//!   a unit of work, or a recalled memory needs beyond raw persistence.
//! - `workflow`: the workflow engine — per-session `WorkflowState`, the
//!   `ActionContext` shared by every action handler, and the action
//!   catalog itself (`inject_context`, `call_mcp_tool`, `webhook`, ...).

/// Session, task, and memory registries.
pub mod registries;
/// The workflow engine and its action catalog.
pub mod workflow;

pub use registries::{MemoryRegistry, RememberOutcome, SessionRegistry, TaskRegistry};
pub use workflow::{ActionContext, WebhookCallResult, WebhookExecutor, WebhookTarget};
