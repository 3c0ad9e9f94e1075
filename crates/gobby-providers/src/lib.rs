//! Provider implementations for the gobby daemon.
//!
//! This crate implements the outbound ports defined in `gobby-domain`:
//! the embedded SQLite relational store ([`database`]), plus shared
//! constants used across provider adapters ([`constants`]).
//!
//! Providers register themselves into `gobby-domain`'s
//! [`linkme::distributed_slice`] registries at load time; consumers never
//! construct a concrete provider type directly, they resolve one by name
//! through `gobby_domain::registry`.

/// Shared constants for provider adapters.
pub mod constants;
/// Database providers: the embedded SQLite relational store.
pub mod database;
