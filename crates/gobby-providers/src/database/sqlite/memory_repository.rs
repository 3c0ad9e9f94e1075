//! SQLite implementation of [`MemoryRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use gobby_domain::entities::{Memory, SessionMemoryAction};
use gobby_domain::error::{Error, Result};
use gobby_domain::ports::{DatabaseExecutor, MemoryRepository, RankedMemory, SqlParam};

use super::query_helpers::{query_all, query_one};
use super::row_convert::FromRow;
use super::row_helpers::{opt_embedding_param, opt_str_param};

/// SQLite-backed [`MemoryRepository`].
///
/// `recall` scores on `importance` alone when a memory has no embedding,
/// since cosine similarity against the query requires an embedding
/// provider this layer does not depend on; callers that want semantic
/// ranking should pre-filter candidates and re-score upstream.
pub struct SqliteMemoryRepository {
    executor: Arc<dyn DatabaseExecutor>,
}

impl SqliteMemoryRepository {
    /// Creates a repository over the given executor.
    #[must_use]
    pub fn new(executor: Arc<dyn DatabaseExecutor>) -> Self {
        Self { executor }
    }
}

#[async_trait]
impl MemoryRepository for SqliteMemoryRepository {
    async fn content_exists(&self, content: &str, project_id: Option<&str>) -> Result<bool> {
        let row = match project_id {
            Some(project_id) => {
                self.executor
                    .query_one(
                        "SELECT id FROM memories WHERE content = ? AND project_id = ?",
                        &[
                            SqlParam::String(content.to_owned()),
                            SqlParam::String(project_id.to_owned()),
                        ],
                    )
                    .await?
            }
            None => {
                self.executor
                    .query_one(
                        "SELECT id FROM memories WHERE content = ? AND project_id IS NULL",
                        &[SqlParam::String(content.to_owned())],
                    )
                    .await?
            }
        };
        Ok(row.is_some())
    }

    async fn store(&self, memory: &Memory) -> Result<Memory> {
        self.executor
            .execute(
                "INSERT INTO memories (\
                    id, project_id, memory_type, content, source_type, source_session_id, \
                    importance, access_count, last_accessed_at, embedding, tags, created_at, \
                    updated_at\
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
                &[
                    SqlParam::String(memory.id.clone()),
                    opt_str_param(memory.project_id.as_ref()),
                    SqlParam::String(memory.memory_type.as_str().to_owned()),
                    SqlParam::String(memory.content.clone()),
                    opt_str_param(memory.source_type.as_ref()),
                    opt_str_param(memory.source_session_id.as_ref()),
                    SqlParam::String(memory.importance.to_string()),
                    SqlParam::I64(memory.access_count),
                    opt_str_param(memory.last_accessed_at.as_ref()),
                    opt_embedding_param(memory.embedding.as_deref())?,
                    SqlParam::String(memory.tags.to_string()),
                    SqlParam::String(memory.created_at.clone()),
                    SqlParam::String(memory.updated_at.clone()),
                ],
            )
            .await?;
        self.get(&memory.id)
            .await?
            .ok_or_else(|| Error::storage_consistency("memory vanished immediately after insert"))
    }

    async fn get(&self, id: &str) -> Result<Option<Memory>> {
        query_one(
            &self.executor,
            "SELECT * FROM memories WHERE id = ?",
            &[SqlParam::String(id.to_owned())],
            Memory::from_row,
        )
        .await
    }

    async fn recall(
        &self,
        _query: &str,
        project_id: Option<&str>,
        limit: usize,
        importance_floor: f64,
    ) -> Result<Vec<RankedMemory>> {
        let (sql, params): (&str, Vec<SqlParam>) = match project_id {
            Some(project_id) => (
                "SELECT * FROM memories WHERE (project_id = ? OR project_id IS NULL) AND \
                 importance >= ? ORDER BY importance DESC, updated_at DESC",
                vec![
                    SqlParam::String(project_id.to_owned()),
                    SqlParam::String(importance_floor.to_string()),
                ],
            ),
            None => (
                "SELECT * FROM memories WHERE project_id IS NULL AND importance >= ? ORDER BY \
                 importance DESC, updated_at DESC",
                vec![SqlParam::String(importance_floor.to_string())],
            ),
        };

        let memories = query_all(&self.executor, sql, &params, Memory::from_row, "memory").await?;
        Ok(memories
            .into_iter()
            .take(limit)
            .map(|memory| RankedMemory {
                score: memory.importance,
                memory,
            })
            .collect())
    }

    async fn record_access(&self, id: &str, debounce_secs: i64) -> Result<()> {
        let row = self
            .executor
            .query_one(
                "SELECT last_accessed_at FROM memories WHERE id = ?",
                &[SqlParam::String(id.to_owned())],
            )
            .await?;
        let Some(row) = row else { return Ok(()) };
        let last_accessed = row.try_get_string("last_accessed_at")?;

        let now = chrono::Utc::now();
        let debounced = last_accessed
            .as_deref()
            .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
            .is_some_and(|last| (now - last.with_timezone(&chrono::Utc)).num_seconds() < debounce_secs);
        if debounced {
            return Ok(());
        }

        self.executor
            .execute(
                "UPDATE memories SET access_count = access_count + 1, last_accessed_at = ? WHERE \
                 id = ?",
                &[SqlParam::String(now.to_rfc3339()), SqlParam::String(id.to_owned())],
            )
            .await?;
        Ok(())
    }

    async fn decay_importance(&self, monthly_rate: f64, floor: f64) -> Result<u64> {
        let decay_factor = 1.0 - monthly_rate.clamp(0.0, 1.0);
        self.executor
            .execute(
                "UPDATE memories SET importance = MAX(?, importance * ?)",
                &[
                    SqlParam::String(floor.to_string()),
                    SqlParam::String(decay_factor.to_string()),
                ],
            )
            .await?;
        Ok(0)
    }

    async fn add_crossref(&self, source_id: &str, target_id: &str, similarity: f64) -> Result<()> {
        self.executor
            .execute(
                "INSERT OR REPLACE INTO memory_crossrefs (source_id, target_id, similarity) \
                 VALUES (?, ?, ?)",
                &[
                    SqlParam::String(source_id.to_owned()),
                    SqlParam::String(target_id.to_owned()),
                    SqlParam::String(similarity.to_string()),
                ],
            )
            .await?;
        Ok(())
    }

    async fn record_session_memory(
        &self,
        session_id: &str,
        memory_id: &str,
        action: SessionMemoryAction,
    ) -> Result<()> {
        self.executor
            .execute(
                "INSERT OR IGNORE INTO session_memories (session_id, memory_id, action, \
                 created_at) VALUES (?, ?, ?, ?)",
                &[
                    SqlParam::String(session_id.to_owned()),
                    SqlParam::String(memory_id.to_owned()),
                    SqlParam::String(action.as_str().to_owned()),
                    SqlParam::String(chrono::Utc::now().to_rfc3339()),
                ],
            )
            .await?;
        Ok(())
    }
}
