//! # Domain Layer
//!
//! Core business logic and domain types for the gobby daemon.
//! Contains only pure domain entities, value objects, and business rules.
#![allow(missing_docs)]
//!
//! ## Architecture
//!
//! | Component | Description |
//! |-----------|-------------|
//! | [`entities`] | Core business entities with identity |
//! | [`value_objects`] | Immutable value objects |
//! | [`ports`] | External provider port interfaces |
//! | [`constants`] | Domain constants |
//! | [`error`] | Domain error types |
//!
//! ## Clean Architecture Principles
//!
//! - **Entities** are at the center with business rules
//! - **Value Objects** are immutable and compared by value
//! - **No external dependencies** - only standard library and core traits
//! - **Pure business logic** - no infrastructure or application concerns
//!
//! ## Example
//!
//! ```
//! use gobby_domain::entities::Project;
//!
//! let project = Project {
//!     id: "proj-1".to_string(),
//!     name: "gobby".to_string(),
//!     repo_path: "/home/user/gobby".to_string(),
//!     github_repo: Some("acme/gobby".to_string()),
//!     linear_team_id: None,
//!     created_at: "2026-01-01T00:00:00Z".to_string(),
//!     updated_at: "2026-01-01T00:00:00Z".to_string(),
//! };
//! assert!(!Project::is_orphaned_id(&project.id));
//! ```

/// Common macros
#[macro_use]
pub mod macros;

/// Domain-level constants
pub mod constants;
/// Core business entities with identity
pub mod entities;
/// Domain error types
pub mod error;
/// Domain event interfaces
pub mod events;
/// Logging facade that infra registers into at startup
pub mod infra;
/// External provider port interfaces
pub mod ports;
/// Provider auto-registration registry
pub mod registry;
/// Generic schema definitions for persistence (backend-agnostic model)
pub mod schema;
/// Shared test utilities, available to every crate in the workspace
pub mod test_utils;
/// Common utilities
pub mod utils;
/// Immutable value objects
pub mod value_objects;

// Re-export commonly used types for convenience
pub use constants::*;
pub use entities::*;
pub use error::{Error, Result};
pub use events::{DomainEvent, EventPublisher, ServiceState};
pub use schema::{ForeignKeyDef, HasTableSchema, Schema, SchemaDdlGenerator, UniqueConstraintDef};
pub use value_objects::*;
