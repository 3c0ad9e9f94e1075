//! Routes `gobby_domain::{trace,debug,info,warn,error}!` macro calls into
//! this process's `tracing` subscriber.
//!
//! The domain layer has no dependency on `tracing`; it calls
//! [`gobby_domain::infra::logging::set_log_fn`] once at startup with
//! [`forward`], registered from [`super::init_logging`].

use gobby_domain::ports::LogLevel;

/// Forwards a domain-facade log call to `tracing`.
pub fn forward(level: LogLevel, context: &str, message: &str, detail: Option<&dyn std::fmt::Display>) {
    match (level, detail) {
        (LogLevel::Error, Some(d)) => tracing::error!(context, %d, "{message}"),
        (LogLevel::Error, None) => tracing::error!(context, "{message}"),
        (LogLevel::Warn, Some(d)) => tracing::warn!(context, %d, "{message}"),
        (LogLevel::Warn, None) => tracing::warn!(context, "{message}"),
        (LogLevel::Info, Some(d)) => tracing::info!(context, %d, "{message}"),
        (LogLevel::Info, None) => tracing::info!(context, "{message}"),
        (LogLevel::Debug, Some(d)) => tracing::debug!(context, %d, "{message}"),
        (LogLevel::Debug, None) => tracing::debug!(context, "{message}"),
        (LogLevel::Trace, Some(d)) => tracing::trace!(context, %d, "{message}"),
        (LogLevel::Trace, None) => tracing::trace!(context, "{message}"),
    }
}
