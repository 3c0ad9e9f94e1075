//! Infrastructure Ports
//!
//! Ports for infrastructure services that provide technical capabilities to
//! the domain: database access, service lifecycle/health, and logging.

/// Database executor port, abstracting over the concrete SQL driver.
pub mod database;
/// Service lifecycle and health-check port.
pub mod lifecycle;
/// Operation logging port (level + context + message + optional detail).
pub mod logging;

pub use database::{DatabaseExecutor, DatabaseProvider, SqlParam, SqlRow};
pub use lifecycle::{
    DependencyHealth, DependencyHealthCheck, ExtendedHealthResponse, LifecycleManaged,
    PortServiceState, ShutdownCoordinator,
};
pub use logging::{LogLevel, OperationLogger};
