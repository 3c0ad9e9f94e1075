//! Structured logging: a single [`init_tracing`] entry point, and the shim
//! that routes the domain layer's log facade macros into `tracing`.

mod facade;
mod setup;

pub use facade::forward;
pub use setup::{LoggingGuard, init_tracing};
