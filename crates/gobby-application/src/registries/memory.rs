//! Memory/Skill Registry — thin business logic over [`MemoryRepository`].
//!
//! Adds the one piece of logic the port itself leaves to its caller:
//! idempotent `remember` semantics (skip the insert if identical content
//! already exists).

use std::sync::Arc;

use gobby_domain::entities::{Memory, SessionMemoryAction};
use gobby_domain::error::Result;
use gobby_domain::ports::{MemoryRepository, RankedMemory};

/// Outcome of [`MemoryRegistry::remember`].
#[derive(Debug, Clone)]
pub enum RememberOutcome {
    /// A new memory was stored.
    Saved(Memory),
    /// Identical content already existed; nothing was stored.
    Duplicate,
}

/// Tracks long-term memories and skills, scoped to a project or global.
pub struct MemoryRegistry {
    repository: Arc<dyn MemoryRepository>,
}

impl MemoryRegistry {
    /// Builds a registry over `repository`.
    #[must_use]
    pub fn new(repository: Arc<dyn MemoryRepository>) -> Self {
        Self { repository }
    }

    /// Stores `memory` unless identical content already exists for its
    /// project scope.
    pub async fn remember(&self, memory: Memory) -> Result<RememberOutcome> {
        if self
            .repository
            .content_exists(&memory.content, memory.project_id.as_deref())
            .await?
        {
            return Ok(RememberOutcome::Duplicate);
        }
        let stored = self.repository.store(&memory).await?;
        Ok(RememberOutcome::Saved(stored))
    }

    /// Fetches a memory by id.
    pub async fn get(&self, id: &str) -> Result<Option<Memory>> {
        self.repository.get(id).await
    }

    /// Recalls memories ranked by combined score, recording the access on
    /// each one (debounced).
    pub async fn recall(
        &self,
        query: &str,
        project_id: Option<&str>,
        limit: usize,
        importance_floor: f64,
        access_debounce_secs: i64,
    ) -> Result<Vec<RankedMemory>> {
        let results = self
            .repository
            .recall(query, project_id, limit, importance_floor)
            .await?;
        for ranked in &results {
            self.repository
                .record_access(&ranked.memory.id, access_debounce_secs)
                .await?;
        }
        Ok(results)
    }

    /// Applies monthly importance decay, floored at `floor`. Returns the
    /// number of rows affected.
    pub async fn decay_importance(&self, monthly_rate: f64, floor: f64) -> Result<u64> {
        self.repository.decay_importance(monthly_rate, floor).await
    }

    /// Records a cross-reference between two memories.
    pub async fn add_crossref(
        &self,
        source_id: &str,
        target_id: &str,
        similarity: f64,
    ) -> Result<()> {
        self.repository
            .add_crossref(source_id, target_id, similarity)
            .await
    }

    /// Records a `session_memories` join row.
    pub async fn record_session_memory(
        &self,
        session_id: &str,
        memory_id: &str,
        action: SessionMemoryAction,
    ) -> Result<()> {
        self.repository
            .record_session_memory(session_id, memory_id, action)
            .await
    }
}
