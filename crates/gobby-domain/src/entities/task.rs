use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

/// Lifecycle status of a [`Task`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created but not yet started.
    Open,
    /// Actively being worked on by a session.
    InProgress,
    /// Cannot proceed until a dependency or external condition resolves.
    Blocked,
    /// Finished successfully.
    Completed,
    /// No longer needed.
    Cancelled,
}

impl TaskStatus {
    /// Canonical lowercase string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::InProgress => "in_progress",
            Self::Blocked => "blocked",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }
}

impl std::str::FromStr for TaskStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "open" => Ok(Self::Open),
            "in_progress" => Ok(Self::InProgress),
            "blocked" => Ok(Self::Blocked),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            other => Err(format!("Unknown task status: {other}")),
        }
    }
}

/// Outcome of the most recent validation pass against acceptance criteria.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskValidationStatus {
    /// Not yet validated.
    Pending,
    /// Validation criteria were satisfied.
    Valid,
    /// Validation criteria were not satisfied.
    Invalid,
}

impl TaskValidationStatus {
    /// Canonical lowercase string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Valid => "valid",
            Self::Invalid => "invalid",
        }
    }
}

impl std::str::FromStr for TaskValidationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "valid" => Ok(Self::Valid),
            "invalid" => Ok(Self::Invalid),
            other => Err(format!("Unknown task validation status: {other}")),
        }
    }
}

/// A unit of work tracked across sessions within a project.
///
/// `path_cache` is the hierarchical traversal of `parent_task_id` rendered as a stable
/// string (e.g. `"/root-seq/child-seq"`); it is recomputed for the whole subtree whenever
/// `parent_task_id` changes. `seq_num` is allocated once at creation, per project, and is
/// never reused even if the task is later deleted.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Task {
    /// UUID primary key (see migration 53 for the legacy `gt-XXXXXX` rewrite).
    pub id: String,
    /// Owning project.
    pub project_id: String,
    /// Parent task, for subtask hierarchies.
    pub parent_task_id: Option<String>,
    /// Session that created this task.
    pub created_in_session_id: Option<String>,
    /// Session that closed this task.
    pub closed_in_session_id: Option<String>,
    /// Short commit hash the task was closed against.
    pub closed_commit_sha: Option<String>,
    /// Timestamp the task was closed, ISO-8601 UTC.
    pub closed_at: Option<String>,
    /// Short human title.
    pub title: String,
    /// Longer free-text description.
    pub description: Option<String>,
    /// Implementation details / notes.
    pub details: Option<String>,
    /// Current lifecycle status.
    pub status: TaskStatus,
    /// Priority, 0 (lowest) through 4 (highest).
    pub priority: i32,
    /// Free-form task category (e.g. `"bug"`, `"feature"`, `"chore"`).
    pub task_type: String,
    /// Assignee identifier, if any.
    pub assignee: Option<String>,
    /// Arbitrary labels.
    pub labels: Value,
    /// Outcome of the most recent validation pass.
    pub validation_status: Option<TaskValidationStatus>,
    /// Free-text feedback from the most recent validation pass.
    pub validation_feedback: Option<String>,
    /// Structured acceptance criteria checked by validation.
    pub validation_criteria: Option<Value>,
    /// Number of consecutive failed validation attempts.
    pub validation_fail_count: i32,
    /// Whether validation is delegated to an external validator tool.
    pub use_external_validator: bool,
    /// Estimated complexity score, if computed.
    pub complexity_score: Option<f64>,
    /// Estimated subtask count, if computed.
    pub estimated_subtasks: Option<i32>,
    /// Context captured when this task was expanded from a parent.
    pub expansion_context: Option<Value>,
    /// Name of the workflow that created this task.
    pub workflow_name: Option<String>,
    /// Structured verification results.
    pub verification: Option<Value>,
    /// Explicit ordering hint among sibling tasks.
    pub sequence_order: Option<i32>,
    /// Short commit hashes associated with this task.
    pub commits: Option<Value>,
    /// Dense, monotonic, per-project sequence number allocated at creation.
    pub seq_num: Option<i64>,
    /// Stable string traversal of `parent_task_id` links.
    pub path_cache: String,
    /// Timestamp the task was escalated to a human, if any.
    pub escalated_at: Option<String>,
    /// Reason the task was escalated.
    pub escalation_reason: Option<String>,
    /// Linked GitHub issue number.
    pub github_issue_number: Option<i64>,
    /// Linked GitHub pull request number.
    pub github_pr_number: Option<i64>,
    /// Linked Linear issue id.
    pub linear_issue_id: Option<String>,
    /// Creation timestamp, ISO-8601 UTC.
    pub created_at: String,
    /// Last-update timestamp, ISO-8601 UTC.
    pub updated_at: String,
}

/// Dependency kind in a `task_dependencies` edge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TaskDependencyType {
    /// `depends_on` must be completed before this task can start.
    Blocks,
    /// Informational relation with no ordering constraint.
    RelatesTo,
}

impl TaskDependencyType {
    /// Canonical lowercase string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Blocks => "blocks",
            Self::RelatesTo => "relates_to",
        }
    }
}

impl std::str::FromStr for TaskDependencyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "blocks" => Ok(Self::Blocks),
            "relates_to" => Ok(Self::RelatesTo),
            other => Err(format!("Unknown task dependency type: {other}")),
        }
    }
}

/// Row of the `task_dependencies` join table: `(task_id, depends_on)` is the unique key.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TaskDependency {
    /// The dependent task.
    pub task_id: String,
    /// The task that must be satisfied first.
    pub depends_on: String,
    /// Nature of the dependency.
    pub dep_type: TaskDependencyType,
}

crate::impl_table_schema!(Task, "tasks",
    columns: [
        ("id", Text, pk),
        ("project_id", Text),
        ("parent_task_id", Text, nullable),
        ("created_in_session_id", Text, nullable),
        ("closed_in_session_id", Text, nullable),
        ("closed_commit_sha", Text, nullable),
        ("closed_at", Text, nullable),
        ("title", Text),
        ("description", Text, nullable),
        ("details", Text, nullable),
        ("status", Text),
        ("priority", Integer),
        ("task_type", Text),
        ("assignee", Text, nullable),
        ("labels", Json),
        ("validation_status", Text, nullable),
        ("validation_feedback", Text, nullable),
        ("validation_criteria", Json, nullable),
        ("validation_fail_count", Integer),
        ("use_external_validator", Boolean),
        ("complexity_score", Real, nullable),
        ("estimated_subtasks", Integer, nullable),
        ("expansion_context", Json, nullable),
        ("workflow_name", Text, nullable),
        ("verification", Json, nullable),
        ("sequence_order", Integer, nullable),
        ("commits", Json, nullable),
        ("seq_num", Integer, nullable),
        ("path_cache", Text),
        ("escalated_at", Text, nullable),
        ("escalation_reason", Text, nullable),
        ("github_issue_number", Integer, nullable),
        ("github_pr_number", Integer, nullable),
        ("linear_issue_id", Text, nullable),
        ("created_at", Text),
        ("updated_at", Text),
    ],
    indexes: [
        "idx_tasks_project" => ["project_id"],
        "idx_tasks_parent" => ["parent_task_id"],
        "idx_tasks_status" => ["status"],
    ],
    foreign_keys: [
        ("project_id", "projects", "id"),
        ("parent_task_id", "tasks", "id"),
    ],
);

crate::impl_table_schema!(TaskDependency, "task_dependencies",
    columns: [
        ("task_id", Text),
        ("depends_on", Text),
        ("dep_type", Text),
    ],
    foreign_keys: [
        ("task_id", "tasks", "id"),
        ("depends_on", "tasks", "id"),
    ],
);
