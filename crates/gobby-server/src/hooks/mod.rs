//! Hook Pipeline (C8): the daemon's critical path, and the supporting
//! pieces it's built from.

mod cache;
mod handlers;
mod pipeline;
mod project;
mod readiness;

pub use cache::SessionIdCache;
pub use pipeline::{HookPipeline, HookPipelineDeps};
pub use project::ProjectResolver;
pub use readiness::DaemonReadiness;
