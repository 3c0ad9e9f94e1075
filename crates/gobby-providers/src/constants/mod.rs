//!
//! **Documentation**: [docs/modules/providers.md](../../../../docs/modules/providers.md)
//!
//! Provider Constants
//!
//! Constants specific to provider implementations. These are separated from
//! domain constants (which live in gobby-domain) and infrastructure constants.

/// Database constants (`SQL`, etc.)
pub mod database;
/// HTTP client constants
pub mod http;
/// Retry configuration constants
pub mod retry;

pub use self::database::*;
pub use self::http::*;
pub use self::retry::*;
