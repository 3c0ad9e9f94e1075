//! SQLite backend for the daemon's embedded relational store.
//!
//! Implements [`SchemaDdlGenerator`](gobby_domain::schema::SchemaDdlGenerator) and
//! [`DatabaseProvider`](gobby_domain::ports::DatabaseProvider) for SQLite, plus the
//! five repository ports ([`SessionRepository`](gobby_domain::ports::SessionRepository),
//! [`TaskRepository`](gobby_domain::ports::TaskRepository),
//! [`MemoryRepository`](gobby_domain::ports::MemoryRepository),
//! [`WorkflowRepository`](gobby_domain::ports::WorkflowRepository),
//! [`McpServerRepository`](gobby_domain::ports::McpServerRepository)) backed by it.

mod ddl;
mod executor;
mod macros;
mod mcp_repository;
mod memory_repository;
pub mod migrator;
mod provider;
mod query_helpers;
mod row_convert;
mod row_helpers;
mod session_repository;
mod task_repository;
mod workflow_repository;

pub use ddl::SqliteSchemaDdlGenerator;
pub use executor::SqliteExecutor;
pub use mcp_repository::SqliteMcpServerRepository;
pub use memory_repository::SqliteMemoryRepository;
pub use provider::SqliteDatabaseProvider;
pub use session_repository::SqliteSessionRepository;
pub use task_repository::SqliteTaskRepository;
pub use workflow_repository::SqliteWorkflowRepository;
