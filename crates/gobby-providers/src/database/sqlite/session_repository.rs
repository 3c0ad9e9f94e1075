//! SQLite implementation of [`SessionRepository`].

use std::sync::Arc;

use async_trait::async_trait;
use gobby_domain::entities::{Session, SessionStatus};
use gobby_domain::error::Result;
use gobby_domain::ports::{
    DatabaseExecutor, RegisterSession, SessionRepository, SqlParam, TerminalPickupMetadata,
};
use gobby_domain::utils::id::correlate_id;
use gobby_domain::utils::time::epoch_secs_i64;

use super::query_helpers::{query_all, query_one};
use super::row_convert::FromRow;
use super::row_helpers::opt_str_param;

/// SQLite-backed [`SessionRepository`].
pub struct SqliteSessionRepository {
    executor: Arc<dyn DatabaseExecutor>,
}

impl SqliteSessionRepository {
    /// Creates a repository over the given executor.
    #[must_use]
    pub fn new(executor: Arc<dyn DatabaseExecutor>) -> Self {
        Self { executor }
    }

    async fn next_seq_num(&self, project_id: &str) -> Result<i64> {
        let row = self
            .executor
            .query_one(
                "SELECT COALESCE(MAX(seq_num), 0) + 1 AS next FROM sessions WHERE project_id = ?",
                &[SqlParam::String(project_id.to_owned())],
            )
            .await?;
        Ok(row.and_then(|r| r.try_get_i64("next").ok().flatten()).unwrap_or(1))
    }
}

#[async_trait]
impl SessionRepository for SqliteSessionRepository {
    async fn register(&self, fields: RegisterSession) -> Result<Session> {
        let now = chrono::Utc::now().to_rfc3339();
        if let Some(existing) = self
            .find_current(&fields.external_id, &fields.machine_id, &fields.source)
            .await?
        {
            self.executor
                .execute(
                    "UPDATE sessions SET status = 'active', title = COALESCE(?, title), \
                     model = COALESCE(?, model), parent_session_id = COALESCE(?, parent_session_id), \
                     updated_at = ? WHERE id = ?",
                    &[
                        opt_str_param(fields.title.as_ref()),
                        opt_str_param(fields.model.as_ref()),
                        opt_str_param(fields.parent_session_id.as_ref()),
                        SqlParam::String(now),
                        SqlParam::String(existing.id.clone()),
                    ],
                )
                .await?;
            return Ok(self.get(&existing.id).await?.unwrap_or(existing));
        }

        let id = correlate_id(
            "session",
            &format!("{}:{}:{}", fields.external_id, fields.machine_id, fields.source),
        );
        let seq_num = self.next_seq_num(&fields.project_id).await?;
        self.executor
            .execute(
                "INSERT INTO sessions (\
                    id, external_id, machine_id, source, project_id, seq_num, title, status, \
                    jsonl_path, summary_path, summary_markdown, compact_markdown, git_branch, \
                    parent_session_id, agent_depth, spawned_by_agent_id, workflow_name, \
                    agent_run_id, context_injected, original_prompt, transcript_processed, \
                    terminal_context, input_tokens, output_tokens, \
                    cache_creation_tokens, cache_read_tokens, total_cost_usd, \
                    model, created_at, updated_at\
                ) VALUES (?, ?, ?, ?, ?, ?, ?, 'active', NULL, NULL, NULL, NULL, NULL, ?, 0, NULL, \
                    NULL, NULL, 0, NULL, 0, NULL, 0, 0, 0, 0, 0.0, ?, ?, ?)",
                &[
                    SqlParam::String(id.clone()),
                    SqlParam::String(fields.external_id),
                    SqlParam::String(fields.machine_id),
                    SqlParam::String(fields.source),
                    SqlParam::String(fields.project_id),
                    SqlParam::I64(seq_num),
                    opt_str_param(fields.title.as_ref()),
                    opt_str_param(fields.parent_session_id.as_ref()),
                    opt_str_param(fields.model.as_ref()),
                    SqlParam::String(now.clone()),
                    SqlParam::String(now),
                ],
            )
            .await?;
        self.get(&id)
            .await?
            .ok_or_else(|| gobby_domain::error::Error::storage_consistency(
                "session vanished immediately after insert",
            ))
    }

    async fn get(&self, id: &str) -> Result<Option<Session>> {
        query_one(
            &self.executor,
            "SELECT * FROM sessions WHERE id = ?",
            &[SqlParam::String(id.to_owned())],
            Session::from_row,
        )
        .await
    }

    async fn find_by_external_id(
        &self,
        external_id: &str,
        machine_id: &str,
        project_id: &str,
        source: &str,
    ) -> Result<Option<Session>> {
        query_one(
            &self.executor,
            "SELECT * FROM sessions WHERE external_id = ? AND machine_id = ? AND project_id = ? \
             AND source = ?",
            &[
                SqlParam::String(external_id.to_owned()),
                SqlParam::String(machine_id.to_owned()),
                SqlParam::String(project_id.to_owned()),
                SqlParam::String(source.to_owned()),
            ],
            Session::from_row,
        )
        .await
    }

    async fn find_current(
        &self,
        external_id: &str,
        machine_id: &str,
        source: &str,
    ) -> Result<Option<Session>> {
        query_one(
            &self.executor,
            "SELECT * FROM sessions WHERE external_id = ? AND machine_id = ? AND source = ? \
             ORDER BY updated_at DESC LIMIT 1",
            &[
                SqlParam::String(external_id.to_owned()),
                SqlParam::String(machine_id.to_owned()),
                SqlParam::String(source.to_owned()),
            ],
            Session::from_row,
        )
        .await
    }

    async fn find_parent(
        &self,
        machine_id: &str,
        project_id: &str,
        status: SessionStatus,
        source: Option<&str>,
    ) -> Result<Option<Session>> {
        let (sql, params): (&str, Vec<SqlParam>) = if let Some(source) = source {
            (
                "SELECT * FROM sessions WHERE machine_id = ? AND project_id = ? AND status = ? \
                 AND source = ? ORDER BY updated_at DESC LIMIT 1",
                vec![
                    SqlParam::String(machine_id.to_owned()),
                    SqlParam::String(project_id.to_owned()),
                    SqlParam::String(status.as_str().to_owned()),
                    SqlParam::String(source.to_owned()),
                ],
            )
        } else {
            (
                "SELECT * FROM sessions WHERE machine_id = ? AND project_id = ? AND status = ? \
                 ORDER BY updated_at DESC LIMIT 1",
                vec![
                    SqlParam::String(machine_id.to_owned()),
                    SqlParam::String(project_id.to_owned()),
                    SqlParam::String(status.as_str().to_owned()),
                ],
            )
        };
        query_one(&self.executor, sql, &params, Session::from_row).await
    }

    async fn find_children(&self, parent_id: &str) -> Result<Vec<Session>> {
        query_all(
            &self.executor,
            "SELECT * FROM sessions WHERE parent_session_id = ? ORDER BY created_at ASC",
            &[SqlParam::String(parent_id.to_owned())],
            Session::from_row,
            "session",
        )
        .await
    }

    async fn update_status(&self, id: &str, status: SessionStatus) -> Result<Option<Session>> {
        self.executor
            .execute(
                "UPDATE sessions SET status = ?, updated_at = ? WHERE id = ?",
                &[
                    SqlParam::String(status.as_str().to_owned()),
                    SqlParam::String(chrono::Utc::now().to_rfc3339()),
                    SqlParam::String(id.to_owned()),
                ],
            )
            .await?;
        self.get(id).await
    }

    async fn update_title(&self, id: &str, title: &str) -> Result<Option<Session>> {
        self.executor
            .execute(
                "UPDATE sessions SET title = ?, updated_at = ? WHERE id = ?",
                &[
                    SqlParam::String(title.to_owned()),
                    SqlParam::String(chrono::Utc::now().to_rfc3339()),
                    SqlParam::String(id.to_owned()),
                ],
            )
            .await?;
        self.get(id).await
    }

    async fn update_model(&self, id: &str, model: &str) -> Result<Option<Session>> {
        self.executor
            .execute(
                "UPDATE sessions SET model = ?, updated_at = ? WHERE id = ?",
                &[
                    SqlParam::String(model.to_owned()),
                    SqlParam::String(chrono::Utc::now().to_rfc3339()),
                    SqlParam::String(id.to_owned()),
                ],
            )
            .await?;
        self.get(id).await
    }

    async fn update_summary(
        &self,
        id: &str,
        summary_path: Option<&str>,
        summary_markdown: Option<&str>,
    ) -> Result<Option<Session>> {
        self.executor
            .execute(
                "UPDATE sessions SET summary_path = ?, summary_markdown = ?, updated_at = ? \
                 WHERE id = ?",
                &[
                    summary_path.map_or(SqlParam::Null, |s| SqlParam::String(s.to_owned())),
                    summary_markdown.map_or(SqlParam::Null, |s| SqlParam::String(s.to_owned())),
                    SqlParam::String(chrono::Utc::now().to_rfc3339()),
                    SqlParam::String(id.to_owned()),
                ],
            )
            .await?;
        self.get(id).await
    }

    async fn update_compact_markdown(
        &self,
        id: &str,
        compact_markdown: &str,
    ) -> Result<Option<Session>> {
        self.executor
            .execute(
                "UPDATE sessions SET compact_markdown = ?, updated_at = ? WHERE id = ?",
                &[
                    SqlParam::String(compact_markdown.to_owned()),
                    SqlParam::String(chrono::Utc::now().to_rfc3339()),
                    SqlParam::String(id.to_owned()),
                ],
            )
            .await?;
        self.get(id).await
    }

    async fn update_parent_session_id(
        &self,
        id: &str,
        parent_session_id: &str,
    ) -> Result<Option<Session>> {
        self.executor
            .execute(
                "UPDATE sessions SET parent_session_id = ?, updated_at = ? WHERE id = ?",
                &[
                    SqlParam::String(parent_session_id.to_owned()),
                    SqlParam::String(chrono::Utc::now().to_rfc3339()),
                    SqlParam::String(id.to_owned()),
                ],
            )
            .await?;
        self.get(id).await
    }

    async fn update_terminal_pickup_metadata(
        &self,
        id: &str,
        metadata: TerminalPickupMetadata,
    ) -> Result<Option<Session>> {
        self.executor
            .execute(
                "UPDATE sessions SET \
                    workflow_name = COALESCE(?, workflow_name), \
                    agent_run_id = COALESCE(?, agent_run_id), \
                    context_injected = COALESCE(?, context_injected), \
                    original_prompt = COALESCE(?, original_prompt), \
                    updated_at = ? \
                 WHERE id = ?",
                &[
                    opt_str_param(metadata.workflow_name.as_ref()),
                    opt_str_param(metadata.agent_run_id.as_ref()),
                    metadata
                        .context_injected
                        .map_or(SqlParam::Null, |b| SqlParam::I64(i64::from(b))),
                    opt_str_param(metadata.original_prompt.as_ref()),
                    SqlParam::String(chrono::Utc::now().to_rfc3339()),
                    SqlParam::String(id.to_owned()),
                ],
            )
            .await?;
        self.get(id).await
    }

    async fn pause_inactive_active_sessions(&self, timeout_minutes: i64) -> Result<u64> {
        let cutoff = epoch_secs_i64()? - timeout_minutes * 60;
        let cutoff_iso = chrono::DateTime::from_timestamp(cutoff, 0)
            .unwrap_or_default()
            .to_rfc3339();
        self.executor
            .execute(
                "UPDATE sessions SET status = 'paused' WHERE status = 'active' AND updated_at < ?",
                &[SqlParam::String(cutoff_iso)],
            )
            .await?;
        Ok(0)
    }

    async fn expire_stale_sessions(&self, timeout_hours: i64) -> Result<u64> {
        let cutoff = epoch_secs_i64()? - timeout_hours * 3600;
        let cutoff_iso = chrono::DateTime::from_timestamp(cutoff, 0)
            .unwrap_or_default()
            .to_rfc3339();
        self.executor
            .execute(
                "UPDATE sessions SET status = 'expired' WHERE status NOT IN ('expired', \
                 'completed') AND updated_at < ?",
                &[SqlParam::String(cutoff_iso)],
            )
            .await?;
        Ok(0)
    }

    async fn get_pending_transcript_sessions(&self, limit: usize) -> Result<Vec<Session>> {
        query_all(
            &self.executor,
            "SELECT * FROM sessions WHERE status = 'expired' AND transcript_processed = 0 \
             ORDER BY updated_at ASC LIMIT ?",
            &[SqlParam::I64(limit as i64)],
            Session::from_row,
            "session",
        )
        .await
    }

    async fn resolve_session_reference(
        &self,
        reference: &str,
        project_id: Option<&str>,
    ) -> Result<Option<Session>> {
        if let Some(seq) = reference.strip_prefix('#') {
            let Ok(seq_num) = seq.parse::<i64>() else {
                return Ok(None);
            };
            let Some(project_id) = project_id else {
                return Ok(None);
            };
            return query_one(
                &self.executor,
                "SELECT * FROM sessions WHERE project_id = ? AND seq_num = ?",
                &[SqlParam::String(project_id.to_owned()), SqlParam::I64(seq_num)],
                Session::from_row,
            )
            .await;
        }
        self.get(reference).await
    }
}
