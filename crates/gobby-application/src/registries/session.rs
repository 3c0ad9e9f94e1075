//! Session Registry — thin business logic over [`SessionRepository`].

use std::sync::Arc;

use gobby_domain::entities::{Session, SessionStatus};
use gobby_domain::error::Result;
use gobby_domain::ports::{RegisterSession, SessionRepository, TerminalPickupMetadata};

/// Tracks front-end CLI sessions across machines and projects.
///
/// Delegates persistence to the injected [`SessionRepository`]; adds no
/// state of its own beyond what the port already models.
pub struct SessionRegistry {
    repository: Arc<dyn SessionRepository>,
}

impl SessionRegistry {
    /// Builds a registry over `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn SessionRepository>) -> Self {
        Self { repository }
    }

    /// Upserts a session by its composite natural key.
    pub async fn register(&self, fields: RegisterSession) -> Result<Session> {
        self.repository.register(fields).await
    }

    /// Fetches a session by primary key.
    pub async fn get(&self, id: &str) -> Result<Option<Session>> {
        self.repository.get(id).await
    }

    /// Looks up a session by `(external_id, machine_id, project_id, source)`.
    pub async fn find_by_external_id(
        &self,
        external_id: &str,
        machine_id: &str,
        project_id: &str,
        source: &str,
    ) -> Result<Option<Session>> {
        self.repository
            .find_by_external_id(external_id, machine_id, project_id, source)
            .await
    }

    /// Looks up the current session without requiring `project_id`.
    pub async fn find_current(
        &self,
        external_id: &str,
        machine_id: &str,
        source: &str,
    ) -> Result<Option<Session>> {
        self.repository
            .find_current(external_id, machine_id, source)
            .await
    }

    /// Finds a handoff parent for a `clear` event.
    pub async fn find_parent(
        &self,
        machine_id: &str,
        project_id: &str,
        status: SessionStatus,
        source: Option<&str>,
    ) -> Result<Option<Session>> {
        self.repository
            .find_parent(machine_id, project_id, status, source)
            .await
    }

    /// Returns direct children of `parent_id`.
    pub async fn find_children(&self, parent_id: &str) -> Result<Vec<Session>> {
        self.repository.find_children(parent_id).await
    }

    /// Transitions a session's status.
    pub async fn update_status(&self, id: &str, status: SessionStatus) -> Result<Option<Session>> {
        self.repository.update_status(id, status).await
    }

    /// Sets a session's title.
    pub async fn update_title(&self, id: &str, title: &str) -> Result<Option<Session>> {
        self.repository.update_title(id, title).await
    }

    /// Sets a session's model identifier.
    pub async fn update_model(&self, id: &str, model: &str) -> Result<Option<Session>> {
        self.repository.update_model(id, model).await
    }

    /// Sets a session's rendered summary.
    pub async fn update_summary(
        &self,
        id: &str,
        summary_path: Option<&str>,
        summary_markdown: Option<&str>,
    ) -> Result<Option<Session>> {
        self.repository
            .update_summary(id, summary_path, summary_markdown)
            .await
    }

    /// Sets a session's compact handoff markdown.
    pub async fn update_compact_markdown(
        &self,
        id: &str,
        compact_markdown: &str,
    ) -> Result<Option<Session>> {
        self.repository
            .update_compact_markdown(id, compact_markdown)
            .await
    }

    /// Relinks a session to a new parent.
    pub async fn update_parent_session_id(
        &self,
        id: &str,
        parent_session_id: &str,
    ) -> Result<Option<Session>> {
        self.repository
            .update_parent_session_id(id, parent_session_id)
            .await
    }

    /// Records terminal-pickup metadata.
    pub async fn update_terminal_pickup_metadata(
        &self,
        id: &str,
        metadata: TerminalPickupMetadata,
    ) -> Result<Option<Session>> {
        self.repository
            .update_terminal_pickup_metadata(id, metadata)
            .await
    }

    /// Pauses active sessions idle longer than `timeout_minutes`. Returns
    /// the number of rows affected.
    pub async fn pause_inactive_sessions(&self, timeout_minutes: i64) -> Result<u64> {
        self.repository
            .pause_inactive_active_sessions(timeout_minutes)
            .await
    }

    /// Expires sessions idle longer than `timeout_hours`. Returns the
    /// number of rows affected.
    pub async fn expire_stale_sessions(&self, timeout_hours: i64) -> Result<u64> {
        self.repository.expire_stale_sessions(timeout_hours).await
    }

    /// Returns expired sessions still awaiting transcript processing.
    pub async fn pending_transcript_sessions(&self, limit: usize) -> Result<Vec<Session>> {
        self.repository.get_pending_transcript_sessions(limit).await
    }

    /// Resolves a `#N` sequence reference or a raw session id.
    pub async fn resolve_reference(
        &self,
        reference: &str,
        project_id: Option<&str>,
    ) -> Result<Option<Session>> {
        self.repository
            .resolve_session_reference(reference, project_id)
            .await
    }
}
