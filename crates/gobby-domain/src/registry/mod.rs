//! Provider Registry System
//!
//! Auto-registration infrastructure for providers, using the `linkme` crate
//! for compile-time registration of implementations that can be discovered
//! and instantiated at runtime.
//!
//! ## Usage
//!
//! Providers register via `#[linkme::distributed_slice(DATABASE_PROVIDERS)]`
//! in `gobby-providers`; `gobby-infrastructure` resolves a provider by name
//! at startup, driven by configuration.

/// Database connection provider registry.
pub mod database;

pub use database::{DATABASE_PROVIDERS, DatabaseProviderEntry, resolve_database_provider};
