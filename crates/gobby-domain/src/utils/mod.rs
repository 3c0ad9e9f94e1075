//! Cross-crate utility modules for the gobby workspace.

/// Glob-based artifact lookup used by the workflow engine.
pub mod fs;
/// ID generation, deterministic correlation (UUID v5), content hashing, and masking.
pub mod id;
/// Error-detail logging verbosity.
pub mod logging;
/// Canonical path utilities — strict, no fallbacks.
pub mod path;
/// MCP text extraction utilities.
pub mod text;
/// Canonical time utilities — strict, no fallbacks.
pub mod time;

pub use fs::find_latest_matching;
pub use id::{compute_content_hash, correlate_id, mask_id};
