//! Session Registry port.
//!
//! Tracks front-end CLI sessions across machines and projects, keyed on the
//! composite `(external_id, machine_id, source)`.

use async_trait::async_trait;

use crate::entities::{Session, SessionStatus};
use crate::error::Result;

/// Fields accepted by [`SessionRepository::register`].
///
/// All fields beyond the composite key are optional; omitted fields keep
/// their existing value on conflict and fall back to a column default on
/// insert.
#[derive(Debug, Clone, Default)]
pub struct RegisterSession {
    /// Front-end-assigned session identifier.
    pub external_id: String,
    /// Identifier of the machine the front-end is running on.
    pub machine_id: String,
    /// Originating front-end, e.g. `"claude-code"`, `"codex"`.
    pub source: String,
    /// Owning project.
    pub project_id: String,
    /// Parent session, for handoff lineage.
    pub parent_session_id: Option<String>,
    /// Human title.
    pub title: Option<String>,
    /// Model identifier reported by the front-end.
    pub model: Option<String>,
}

/// Mutation applied by [`SessionRepository::update_terminal_pickup_metadata`].
#[derive(Debug, Clone, Default)]
pub struct TerminalPickupMetadata {
    /// Workflow driving the session at pickup time.
    pub workflow_name: Option<String>,
    /// Identifier of the agent run that picked the session up.
    pub agent_run_id: Option<String>,
    /// Whether handoff context has already been injected.
    pub context_injected: Option<bool>,
    /// The prompt the session was originally started with.
    pub original_prompt: Option<String>,
}

/// Port for front-end session persistence and lifecycle bookkeeping.
#[async_trait]
pub trait SessionRepository: Send + Sync {
    /// Upserts by `(external_id, machine_id, source)`. On conflict, updates
    /// fields, resets `status` to `active`, and touches `updated_at`. On
    /// insert, allocates a project-scoped `seq_num`.
    async fn register(&self, fields: RegisterSession) -> Result<Session>;

    /// Fetches a session by primary key.
    async fn get(&self, id: &str) -> Result<Option<Session>>;

    /// Looks up a session by its composite natural key.
    async fn find_by_external_id(
        &self,
        external_id: &str,
        machine_id: &str,
        project_id: &str,
        source: &str,
    ) -> Result<Option<Session>>;

    /// Looks up the current session for `(external_id, machine_id, source)`
    /// without requiring `project_id`.
    async fn find_current(
        &self,
        external_id: &str,
        machine_id: &str,
        source: &str,
    ) -> Result<Option<Session>>;

    /// Returns the most recently updated session in `(machine_id, project_id)`
    /// matching `status`, optionally filtered by `source`. Used for
    /// session-handoff lookups on `clear` events only.
    async fn find_parent(
        &self,
        machine_id: &str,
        project_id: &str,
        status: SessionStatus,
        source: Option<&str>,
    ) -> Result<Option<Session>>;

    /// Returns direct children of `parent_id` (lineage, one level deep).
    async fn find_children(&self, parent_id: &str) -> Result<Vec<Session>>;

    /// Updates `status`, returning the mutated row or `None` if not found.
    async fn update_status(&self, id: &str, status: SessionStatus) -> Result<Option<Session>>;

    /// Updates `title`, returning the mutated row or `None` if not found.
    async fn update_title(&self, id: &str, title: &str) -> Result<Option<Session>>;

    /// Updates `model`, returning the mutated row or `None` if not found.
    async fn update_model(&self, id: &str, model: &str) -> Result<Option<Session>>;

    /// Updates `summary_path`/`summary_markdown`, returning the mutated row
    /// or `None` if not found.
    async fn update_summary(
        &self,
        id: &str,
        summary_path: Option<&str>,
        summary_markdown: Option<&str>,
    ) -> Result<Option<Session>>;

    /// Updates `compact_markdown`, returning the mutated row or `None` if
    /// not found.
    async fn update_compact_markdown(
        &self,
        id: &str,
        compact_markdown: &str,
    ) -> Result<Option<Session>>;

    /// Updates `parent_session_id`, returning the mutated row or `None` if
    /// not found.
    async fn update_parent_session_id(
        &self,
        id: &str,
        parent_session_id: &str,
    ) -> Result<Option<Session>>;

    /// Updates terminal-pickup metadata, returning the mutated row or `None`
    /// if not found.
    async fn update_terminal_pickup_metadata(
        &self,
        id: &str,
        metadata: TerminalPickupMetadata,
    ) -> Result<Option<Session>>;

    /// Sets `active → paused` for rows idle longer than `timeout_minutes`.
    /// Returns the number of rows updated.
    async fn pause_inactive_active_sessions(&self, timeout_minutes: i64) -> Result<u64>;

    /// Sets any non-`expired`, non-`completed` row to `expired` if idle
    /// longer than `timeout_hours`.
    async fn expire_stale_sessions(&self, timeout_hours: i64) -> Result<u64>;

    /// Returns expired sessions with an unprocessed transcript.
    async fn get_pending_transcript_sessions(&self, limit: usize) -> Result<Vec<Session>>;

    /// Resolves `#N` against `(project_id, seq_num)`, otherwise treats
    /// `reference` as a session UUID.
    async fn resolve_session_reference(
        &self,
        reference: &str,
        project_id: Option<&str>,
    ) -> Result<Option<Session>>;
}
