//! # Daemon core
//!
//! The hook pipeline that every front-end CLI event runs through, and the
//! three extension points layered around it: outbound webhook dispatch,
//! compiled-in plugins, and WebSocket event broadcast.
//!
//! This crate wires `gobby-application`'s registries and workflow engine
//! to the transport-facing concerns the daemon needs but the application
//! layer must stay ignorant of (HTTP, plugin discovery, pub/sub fan-out).
//! It depends on `gobby-providers` only so its `linkme::distributed_slice`
//! inventories (storage backends, plugins) are linked into the final
//! binary — never to call into providers' internals directly.
//!
//! | Module | Provides |
//! |--------|----------|
//! | [`hooks`] | The C8 hook pipeline: readiness, session/project resolution, event-specific handlers |
//! | [`webhook`] | C9: configured HTTP endpoints, sync (blocking) and async dispatch |
//! | [`plugin`] | C10: compiled-in, manifest-enabled pipeline extensions |
//! | [`broadcast`] | C11: fan-out of hook events to WebSocket subscribers |

/// Event broadcast to WebSocket subscribers (C11).
pub mod broadcast;
/// The hook pipeline and its supporting pieces (C8).
pub mod hooks;
/// Compiled-in plugin discovery and execution (C10).
pub mod plugin;
/// Outbound webhook dispatch (C9).
pub mod webhook;

pub use broadcast::Broadcaster;
pub use hooks::{DaemonReadiness, HookPipeline, HookPipelineDeps, ProjectResolver, SessionIdCache};
pub use plugin::{Plugin, PluginHost};
pub use webhook::{WebhookDispatcher, WebhookEndpointConfig};
