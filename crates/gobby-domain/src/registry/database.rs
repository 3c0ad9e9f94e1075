//! Database Provider Registry
//!
//! Auto-registration for Store connection factories using `linkme`
//! distributed slices. Providers register themselves via
//! `#[linkme::distributed_slice(DATABASE_PROVIDERS)]` and are resolved at
//! runtime by name (e.g. `"sqlite"`).

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::ports::infrastructure::database::DatabaseProvider;

/// Registry entry for a [`DatabaseProvider`].
pub struct DatabaseProviderEntry {
    /// Unique provider name, e.g. `"sqlite"`.
    pub name: &'static str,
    /// Factory producing a provider instance.
    pub build: fn() -> Arc<dyn DatabaseProvider>,
}

#[linkme::distributed_slice]
/// Registered database providers.
pub static DATABASE_PROVIDERS: [DatabaseProviderEntry] = [..];

/// Resolves a registered database provider by name.
///
/// # Errors
///
/// Returns [`Error::config`] when no provider with this name has been
/// registered.
pub fn resolve_database_provider(name: &str) -> Result<Arc<dyn DatabaseProvider>> {
    for entry in DATABASE_PROVIDERS {
        if entry.name == name {
            return Ok((entry.build)());
        }
    }

    let available: Vec<&str> = DATABASE_PROVIDERS.iter().map(|entry| entry.name).collect();
    Err(Error::config(format!(
        "Unknown database provider '{name}'. Available: {available:?}"
    )))
}
