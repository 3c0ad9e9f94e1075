use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

/// Lifecycle status of a [`Session`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// The front-end CLI is actively driving this session.
    Active,
    /// No activity for longer than the configured pause timeout.
    Paused,
    /// A handoff summary has been generated and the session is ready to be resumed elsewhere.
    HandoffReady,
    /// No activity for longer than the configured stale timeout; transcript may still be pending.
    Expired,
    /// The session ended normally.
    Completed,
    /// The session has been archived and is excluded from default listings.
    Archived,
}

impl SessionStatus {
    /// Canonical lowercase string form, as stored in the database.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Active => "active",
            Self::Paused => "paused",
            Self::HandoffReady => "handoff_ready",
            Self::Expired => "expired",
            Self::Completed => "completed",
            Self::Archived => "archived",
        }
    }
}

impl std::str::FromStr for SessionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "active" => Ok(Self::Active),
            "paused" => Ok(Self::Paused),
            "handoff_ready" => Ok(Self::HandoffReady),
            "expired" => Ok(Self::Expired),
            "completed" => Ok(Self::Completed),
            "archived" => Ok(Self::Archived),
            other => Err(format!("Unknown session status: {other}")),
        }
    }
}

/// Cumulative token/cost usage recorded against a session.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, JsonSchema)]
pub struct SessionUsage {
    /// Input tokens consumed.
    pub input_tokens: i64,
    /// Output tokens generated.
    pub output_tokens: i64,
    /// Tokens spent creating prompt-cache entries.
    pub cache_creation_tokens: i64,
    /// Tokens served from the prompt cache.
    pub cache_read_tokens: i64,
    /// Total estimated cost in USD, scaled by the provider's pricing.
    pub total_cost_usd: f64,
}

/// A single front-end CLI session, identified externally by `(external_id, machine_id, source)`.
///
/// Sessions are upserted on `session-start`, mutated by lifecycle sweepers
/// (pause/expire), and terminated on `session-end`.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Session {
    /// Internal UUID primary key.
    pub id: String,
    /// Front-end-supplied session identifier. Unique together with `machine_id` and `source`.
    pub external_id: String,
    /// Identifier of the machine the front-end is running on.
    pub machine_id: String,
    /// Front-end CLI that created this session (e.g. `"claude"`, `"codex"`).
    pub source: String,
    /// Owning project.
    pub project_id: String,
    /// Dense, monotonic, per-project sequence number allocated at creation.
    pub seq_num: i64,
    /// Human-readable title, synthesized by the workflow engine or set by the user.
    pub title: Option<String>,
    /// Current lifecycle status.
    pub status: SessionStatus,
    /// Path to the raw transcript file, if the front-end exposes one.
    pub jsonl_path: Option<String>,
    /// Path to a rendered Markdown summary file.
    pub summary_path: Option<String>,
    /// Rendered Markdown summary content.
    pub summary_markdown: Option<String>,
    /// Compact handoff context rendered for resumption in a new session.
    pub compact_markdown: Option<String>,
    /// Git branch checked out at session start, if known.
    pub git_branch: Option<String>,
    /// Parent session, set on `clear` events that carry forward handoff context.
    pub parent_session_id: Option<String>,
    /// Depth of agent delegation nesting; 0 for a top-level session.
    pub agent_depth: i64,
    /// Id of the agent session that spawned this one, if delegated.
    pub spawned_by_agent_id: Option<String>,
    /// Name of the workflow driving this session, if any.
    pub workflow_name: Option<String>,
    /// Identifier correlating a resumed/spawned session back to its originating run.
    pub agent_run_id: Option<String>,
    /// Whether handoff/parent context has already been injected into the prompt.
    pub context_injected: bool,
    /// The original user prompt that started this session, if captured.
    pub original_prompt: Option<String>,
    /// Whether the transcript has been processed by the lifecycle sweeper.
    pub transcript_processed: bool,
    /// Working-directory-relative terminal context captured at session start.
    pub terminal_context: Option<String>,
    /// Cumulative token/cost usage.
    pub usage: SessionUsage,
    /// Model identifier in use for this session, if known.
    pub model: Option<String>,
    /// Creation timestamp, ISO-8601 UTC.
    pub created_at: String,
    /// Last-update timestamp, ISO-8601 UTC.
    pub updated_at: String,
}

crate::impl_table_schema!(Session, "sessions",
    columns: [
        ("id", Text, pk),
        ("external_id", Text),
        ("machine_id", Text),
        ("source", Text),
        ("project_id", Text),
        ("seq_num", Integer),
        ("title", Text, nullable),
        ("status", Text),
        ("jsonl_path", Text, nullable),
        ("summary_path", Text, nullable),
        ("summary_markdown", Text, nullable),
        ("compact_markdown", Text, nullable),
        ("git_branch", Text, nullable),
        ("parent_session_id", Text, nullable),
        ("agent_depth", Integer),
        ("spawned_by_agent_id", Text, nullable),
        ("workflow_name", Text, nullable),
        ("agent_run_id", Text, nullable),
        ("context_injected", Boolean),
        ("original_prompt", Text, nullable),
        ("transcript_processed", Boolean),
        ("terminal_context", Text, nullable),
        ("input_tokens", Integer),
        ("output_tokens", Integer),
        ("cache_creation_tokens", Integer),
        ("cache_read_tokens", Integer),
        ("total_cost_usd", Real),
        ("model", Text, nullable),
        ("created_at", Text),
        ("updated_at", Text),
    ],
    indexes: [
        "idx_sessions_project" => ["project_id"],
        "idx_sessions_parent" => ["parent_session_id"],
        "idx_sessions_status" => ["status"],
    ],
    foreign_keys: [
        ("project_id", "projects", "id"),
    ],
    unique_constraints: [
        ["external_id", "machine_id", "source"],
    ],
);
