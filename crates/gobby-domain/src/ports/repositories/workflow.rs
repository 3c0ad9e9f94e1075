//! Workflow execution state persistence port.

use async_trait::async_trait;

use crate::entities::WorkflowState;
use crate::error::Result;

/// Port for per-session workflow state persistence.
#[async_trait]
pub trait WorkflowRepository: Send + Sync {
    /// Fetches the workflow state for a session, if one exists.
    async fn get(&self, session_id: &str) -> Result<Option<WorkflowState>>;

    /// Inserts a freshly constructed workflow state.
    async fn create(&self, state: &WorkflowState) -> Result<()>;

    /// Persists the whole state, bumping `version`. Last-writer-wins: this
    /// does not check the caller's expected version.
    async fn save(&self, state: &WorkflowState) -> Result<WorkflowState>;

    /// Deletes the workflow state for a session (e.g. on session archival).
    async fn delete(&self, session_id: &str) -> Result<()>;
}
