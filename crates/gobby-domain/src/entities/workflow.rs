use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

/// Per-session workflow execution state, one row per session (`session_id` is both
/// primary key and foreign key).
///
/// `variables` and `artifacts` are mutated by workflow actions (`set_variable`,
/// `increment_variable`, `capture_artifact`, ...); `observations` accumulates
/// free-text notes recorded along the way. `version` is bumped on every persisted
/// write so callers can detect a stale read, though the engine itself applies
/// last-writer-wins semantics rather than rejecting conflicting writes.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WorkflowState {
    /// Session this state belongs to.
    pub session_id: String,
    /// Name of the workflow definition driving this session.
    pub workflow_name: String,
    /// Name of the current step within the workflow.
    pub step: String,
    /// Timestamp the current step was entered, ISO-8601 UTC.
    pub step_entered_at: String,
    /// Number of actions executed since entering the current step.
    pub step_action_count: i64,
    /// Number of actions executed across the session's whole lifetime.
    pub total_action_count: i64,
    /// Named artifact paths captured by `capture_artifact`.
    pub artifacts: Value,
    /// Free-text observations recorded during the session.
    pub observations: Value,
    /// Whether a reflection/summary step is pending before the next transition.
    pub reflection_pending: bool,
    /// Whether handoff/parent context has already been injected.
    pub context_injected: bool,
    /// Named scalar variables set by `set_variable`/`increment_variable`.
    pub variables: Value,
    /// Task list associated with the active workflow run.
    pub task_list: Value,
    /// Index of the task currently being worked on within `task_list`.
    pub current_task_index: Option<i64>,
    /// Files modified since the current task was picked up.
    pub files_modified_this_task: Value,
    /// Optimistic write counter, incremented on every persisted update.
    pub version: i64,
    /// Creation timestamp, ISO-8601 UTC.
    pub created_at: String,
    /// Last-update timestamp, ISO-8601 UTC.
    pub updated_at: String,
}

impl WorkflowState {
    /// A fresh workflow state for a newly started session.
    #[must_use]
    pub fn new(session_id: impl Into<String>, workflow_name: impl Into<String>, now: &str) -> Self {
        Self {
            session_id: session_id.into(),
            workflow_name: workflow_name.into(),
            step: "start".to_owned(),
            step_entered_at: now.to_owned(),
            step_action_count: 0,
            total_action_count: 0,
            artifacts: Value::Object(serde_json::Map::new()),
            observations: Value::Array(Vec::new()),
            reflection_pending: false,
            context_injected: false,
            variables: Value::Object(serde_json::Map::new()),
            task_list: Value::Array(Vec::new()),
            current_task_index: None,
            files_modified_this_task: Value::Array(Vec::new()),
            version: 0,
            created_at: now.to_owned(),
            updated_at: now.to_owned(),
        }
    }
}

crate::impl_table_schema!(WorkflowState, "workflow_states",
    columns: [
        ("session_id", Text, pk),
        ("workflow_name", Text),
        ("step", Text),
        ("step_entered_at", Text),
        ("step_action_count", Integer),
        ("total_action_count", Integer),
        ("artifacts", Json),
        ("observations", Json),
        ("reflection_pending", Boolean),
        ("context_injected", Boolean),
        ("variables", Json),
        ("task_list", Json),
        ("current_task_index", Integer, nullable),
        ("files_modified_this_task", Json),
        ("version", Integer),
        ("created_at", Text),
        ("updated_at", Text),
    ],
    foreign_keys: [
        ("session_id", "sessions", "id"),
    ],
);
