//! Memory/Skill Registry port.

use async_trait::async_trait;

use crate::entities::{Memory, SessionMemoryAction};
use crate::error::Result;

/// A memory ranked by [`MemoryRepository::recall`], carrying the combined
/// score it was ordered by.
#[derive(Debug, Clone)]
pub struct RankedMemory {
    /// The recalled memory.
    pub memory: Memory,
    /// `importance × similarity` when an embedding match was available,
    /// otherwise `importance × recency`.
    pub score: f64,
}

/// Port for long-term memory persistence and recall.
#[async_trait]
pub trait MemoryRepository: Send + Sync {
    /// Returns `true` if a memory with this exact `content` already exists
    /// in `project_id` (or globally, if `project_id` is `None`).
    async fn content_exists(&self, content: &str, project_id: Option<&str>) -> Result<bool>;

    /// Inserts a new memory. Callers must check [`content_exists`] first to
    /// get idempotent `remember` semantics.
    ///
    /// [`content_exists`]: MemoryRepository::content_exists
    async fn store(&self, memory: &Memory) -> Result<Memory>;

    /// Fetches a memory by id.
    async fn get(&self, id: &str) -> Result<Option<Memory>>;

    /// Returns memories in `project_id` (or global memories, if `None`)
    /// ordered by combined score, filtered to `importance >= importance_floor`.
    async fn recall(
        &self,
        query: &str,
        project_id: Option<&str>,
        limit: usize,
        importance_floor: f64,
    ) -> Result<Vec<RankedMemory>>;

    /// Bumps `access_count` and sets `last_accessed_at = now`, but only if
    /// the last recorded access is older than the debounce window.
    async fn record_access(&self, id: &str, debounce_secs: i64) -> Result<()>;

    /// Applies monthly importance decay, floored at `floor`.
    async fn decay_importance(&self, monthly_rate: f64, floor: f64) -> Result<u64>;

    /// Records a `(source_id, target_id)` cross-reference with a similarity
    /// score.
    async fn add_crossref(&self, source_id: &str, target_id: &str, similarity: f64)
        -> Result<()>;

    /// Records a join-table row on `session_memories`.
    async fn record_session_memory(
        &self,
        session_id: &str,
        memory_id: &str,
        action: SessionMemoryAction,
    ) -> Result<()>;
}
