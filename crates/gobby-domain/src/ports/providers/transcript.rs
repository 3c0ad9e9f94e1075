//! Transcript-processing port.
//!
//! Parsing the front-end's transcript format is explicitly out of scope for
//! the core (see the specification's "OUT of scope" list); this module
//! declares only the interface the workflow engine consumes from it.

use async_trait::async_trait;

use crate::error::Result;

/// A single turn extracted from a session transcript.
#[derive(Debug, Clone)]
pub struct TranscriptTurn {
    /// `"user"` or `"assistant"`.
    pub role: String,
    /// Turn text content.
    pub content: String,
}

/// A compact handoff blob summarizing recent session activity.
#[derive(Debug, Clone, Default)]
pub struct HandoffContext {
    /// The task the session was last working on, if any.
    pub active_task: Option<String>,
    /// Short commit hashes made during the session window.
    pub recent_commits: Vec<String>,
    /// Files touched during the session.
    pub modified_files: Vec<String>,
    /// The original prompt that started the session, if recoverable.
    pub initial_goal: Option<String>,
    /// Free-text summary of recent activity.
    pub recent_activity: Option<String>,
}

/// Extracts structured data from a session's transcript file.
#[async_trait]
pub trait TranscriptProcessor: Send + Sync {
    /// Extracts turns from the transcript at `jsonl_path`.
    async fn extract_turns(&self, jsonl_path: &str) -> Result<Vec<TranscriptTurn>>;

    /// Builds a compact handoff context from the transcript at `jsonl_path`.
    async fn extract_handoff_context(&self, jsonl_path: &str) -> Result<HandoffContext>;
}
