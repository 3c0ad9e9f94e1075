//!
//! **Documentation**: [docs/modules/providers.md](../../../../docs/modules/providers.md#database)
//!
//! Database providers: the embedded relational store and its repositories.
//!
//! Each backend implements [`gobby_domain::schema::SchemaDdlGenerator`] to
//! produce dialect-specific DDL from the canonical
//! [`gobby_domain::schema::Schema`], and registers itself into
//! [`gobby_domain::registry::database::DATABASE_PROVIDERS`] via
//! [`linkme::distributed_slice`].
//!
//! - **sqlite** — the only backend today; embedded, file-backed, WAL mode.

pub mod sqlite;

pub use sqlite::{
    SqliteDatabaseProvider, SqliteExecutor, SqliteMcpServerRepository, SqliteMemoryRepository,
    SqliteSchemaDdlGenerator, SqliteSessionRepository, SqliteTaskRepository,
    SqliteWorkflowRepository,
};
