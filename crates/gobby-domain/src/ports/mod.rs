//! Domain Port Interfaces
//!
//! Defines all boundary contracts between domain and external layers. Ports
//! are organized by their purpose and enable dependency injection with clear
//! separation of concerns, following the Dependency Inversion Principle:
//! high-level modules (domain) define interfaces, low-level modules
//! (providers, infrastructure) implement them.
//!
//! ## Organization
//!
//! - **infrastructure/** — database execution, service lifecycle/health, logging
//! - **providers/** — outbound HTTP, LLM completion, MCP connections
//! - **repositories/** — persistence ports for each domain entity

/// Infrastructure service ports
pub mod infrastructure;
/// External service provider ports
pub mod providers;
/// Repository ports for data persistence
pub mod repositories;

// ============================================================================
// Canonical re-exports — the ONE import surface for all port traits/types.
// Consumers MUST use `use gobby_domain::ports::{...};` only.
// ============================================================================

// --- Infrastructure ---
pub use infrastructure::{
    DatabaseExecutor, DatabaseProvider, DependencyHealth, DependencyHealthCheck,
    ExtendedHealthResponse, LifecycleManaged, LogLevel, OperationLogger, PortServiceState,
    ShutdownCoordinator, SqlParam, SqlRow,
};

// --- Providers ---
pub use providers::{
    HandoffContext, HttpClientConfig, HttpClientProvider, LlmProvider, McpConnection, McpSession,
    SpawnedProcess, Spawner, TemplateEngine, ToolProxy, TranscriptProcessor, TranscriptTurn,
};

// --- Repositories ---
pub use repositories::{
    McpServerRepository, MemoryRepository, RankedMemory, RegisterSession, SessionRepository,
    TaskFilters, TaskRepository, TerminalPickupMetadata, WorkflowRepository,
};
