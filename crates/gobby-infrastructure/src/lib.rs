//! # Infrastructure layer
//!
//! Concrete technical capabilities consumed by the domain's port traits:
//! MCP transport connections, YAML configuration loading with hot-reload,
//! structured logging, and template rendering for the workflow engine.
//!
//! This crate depends only on `gobby-domain` — never on `gobby-application`
//! — so application use-cases can be wired against these implementations
//! without a dependency cycle.
//!
//! | Module | Provides |
//! |--------|----------|
//! | [`config`] | `~/.gobby/config.yaml` loading, `${VAR}` substitution, hot-reload |
//! | [`logging`] | `tracing` subscriber setup, wired into the domain log facade |
//! | [`transport`] | MCP connection pool (HTTP, stdio, WebSocket) implementing `ToolProxy` |
//! | [`template`] | Handlebars-backed `TemplateEngine` |
//! | [`http`] | Shared `reqwest` client implementing `HttpClientProvider` |

pub mod config;
pub mod http;
pub mod logging;
pub mod template;
pub mod transport;

pub use http::ReqwestHttpClientProvider;
pub use template::HandlebarsTemplateEngine;
pub use transport::{ConnectionHealth, ConnectionState, HealthReport, HealthState, McpConnectionPool};
