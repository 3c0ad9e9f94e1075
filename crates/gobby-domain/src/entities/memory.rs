use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use serde_with::skip_serializing_none;

/// Category of a recalled [`Memory`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum MemoryType {
    /// An observed fact about the codebase or environment.
    Fact,
    /// A stated preference (style, tooling, workflow) to honor in future sessions.
    Preference,
    /// A recurring pattern worth remembering (an idiom, an anti-pattern, a gotcha).
    Pattern,
    /// Ambient context not captured by the other categories.
    Context,
}

impl MemoryType {
    /// Canonical lowercase string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Fact => "fact",
            Self::Preference => "preference",
            Self::Pattern => "pattern",
            Self::Context => "context",
        }
    }
}

impl std::str::FromStr for MemoryType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fact" => Ok(Self::Fact),
            "preference" => Ok(Self::Preference),
            "pattern" => Ok(Self::Pattern),
            "context" => Ok(Self::Context),
            other => Err(format!("Unknown memory type: {other}")),
        }
    }
}

/// A single recallable unit of long-term knowledge, optionally scoped to a project.
///
/// `importance` decays over time (per a configured monthly rate, floored at a configured
/// minimum) and is boosted back up on recall. `access_count`/`last_accessed_at` are updated
/// on recall, debounced to at most once per configured window.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Memory {
    /// UUID primary key.
    pub id: String,
    /// Owning project, or `None` for a global memory.
    pub project_id: Option<String>,
    /// Category of memory.
    pub memory_type: MemoryType,
    /// The memory's content.
    pub content: String,
    /// What produced this memory (e.g. `"extraction"`, `"manual"`).
    pub source_type: Option<String>,
    /// Session that produced this memory, if any.
    pub source_session_id: Option<String>,
    /// Importance score in `[0, 1]`.
    pub importance: f64,
    /// Number of times this memory has been recalled.
    pub access_count: i64,
    /// Timestamp of the most recent recall, ISO-8601 UTC.
    pub last_accessed_at: Option<String>,
    /// Embedding vector, if semantic recall is enabled.
    pub embedding: Option<Vec<f32>>,
    /// Free-form tags.
    pub tags: Value,
    /// Creation timestamp, ISO-8601 UTC.
    pub created_at: String,
    /// Last-update timestamp, ISO-8601 UTC.
    pub updated_at: String,
}

/// Row of the `memory_crossrefs` table: `(source_id, target_id)` is the primary key.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MemoryCrossref {
    /// The referencing memory.
    pub source_id: String,
    /// The referenced memory.
    pub target_id: String,
    /// Similarity score between the two memories.
    pub similarity: f64,
}

/// Discriminator on the `session_memories` join table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionMemoryAction {
    /// The memory was created by this session.
    Created,
    /// The memory was recalled into this session's context.
    Recalled,
}

impl SessionMemoryAction {
    /// Canonical lowercase string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::Recalled => "recalled",
        }
    }
}

impl std::str::FromStr for SessionMemoryAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "recalled" => Ok(Self::Recalled),
            other => Err(format!("Unknown session-memory action: {other}")),
        }
    }
}

/// Discriminator on the `session_tasks` join table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum SessionTaskAction {
    /// The task was created by this session.
    Created,
    /// The task was worked on by this session.
    WorkedOn,
    /// The task was closed by this session.
    Closed,
}

impl SessionTaskAction {
    /// Canonical lowercase string form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Created => "created",
            Self::WorkedOn => "worked_on",
            Self::Closed => "closed",
        }
    }
}

impl std::str::FromStr for SessionTaskAction {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "created" => Ok(Self::Created),
            "worked_on" => Ok(Self::WorkedOn),
            "closed" => Ok(Self::Closed),
            other => Err(format!("Unknown session-task action: {other}")),
        }
    }
}

crate::impl_table_schema!(Memory, "memories",
    columns: [
        ("id", Text, pk),
        ("project_id", Text, nullable),
        ("memory_type", Text),
        ("content", Text),
        ("source_type", Text, nullable),
        ("source_session_id", Text, nullable),
        ("importance", Real),
        ("access_count", Integer),
        ("last_accessed_at", Text, nullable),
        ("embedding", Blob, nullable),
        ("tags", Json),
        ("created_at", Text),
        ("updated_at", Text),
    ],
    indexes: [
        "idx_memories_project" => ["project_id"],
        "idx_memories_type" => ["memory_type"],
    ],
    foreign_keys: [
        ("project_id", "projects", "id"),
        ("source_session_id", "sessions", "id"),
    ],
);

crate::impl_table_schema!(MemoryCrossref, "memory_crossrefs",
    columns: [
        ("source_id", Text),
        ("target_id", Text),
        ("similarity", Real),
    ],
    foreign_keys: [
        ("source_id", "memories", "id"),
        ("target_id", "memories", "id"),
    ],
);
