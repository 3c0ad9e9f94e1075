//! Versioned migration chain (C2): an ordered `(version, description, action)`
//! list applied idempotently against a `schema_version` table.
//!
//! Version 1 is the declarative baseline schema — every `CREATE TABLE IF NOT
//! EXISTS`/`CREATE INDEX IF NOT EXISTS` statement the canonical
//! [`Schema`](gobby_domain::schema::Schema) generates — rather than a replay
//! of historical `ALTER TABLE` steps: this daemon has no prior released
//! schema to stay compatible with. Versions 2-4 are the three data-rewrite
//! migrations every `gobby` deployment that predates UUID task ids must
//! still apply, reproduced from `migrations.py`'s `_migrate_task_ids_to_uuid`/
//! `_backfill_seq_num`/`_backfill_path_cache`.

use futures::future::BoxFuture;
use gobby_domain::error::{Error, Result};
use gobby_domain::schema::{Schema, SchemaDdlGenerator};
use sqlx::{Row, SqlitePool};

use super::ddl::SqliteSchemaDdlGenerator;

/// One migration step.
pub enum MigrationAction {
    /// Statements to run, each further split on `;` and trimmed before
    /// execution; empty statements are skipped.
    Sql(fn() -> Vec<String>),
    /// A data-rewrite step given direct pool access, for changes `;`-split
    /// SQL cannot express (conditional per-row rewrites, ID remapping).
    Rewrite(fn(SqlitePool) -> BoxFuture<'static, Result<()>>),
}

/// A single entry in the migration chain.
pub struct Migration {
    /// Monotonic version number; migrations apply in ascending order.
    pub version: u32,
    /// Human-readable description, logged when the migration runs.
    pub description: &'static str,
    /// The SQL or data-rewrite action to apply.
    pub action: MigrationAction,
}

fn baseline_schema_sql() -> Vec<String> {
    SqliteSchemaDdlGenerator.generate_ddl(&Schema::definition())
}

/// The full ordered migration chain.
#[must_use]
pub fn migrations() -> Vec<Migration> {
    vec![
        Migration {
            version: 1,
            description: "Create baseline schema (all tables and indexes)",
            action: MigrationAction::Sql(baseline_schema_sql),
        },
        Migration {
            version: 2,
            description: "Convert legacy gt-XXXXXX task ids to UUIDs",
            action: MigrationAction::Rewrite(|pool| Box::pin(migrate_task_ids_to_uuid(pool))),
        },
        Migration {
            version: 3,
            description: "Backfill seq_num for existing tasks",
            action: MigrationAction::Rewrite(|pool| Box::pin(backfill_seq_num(pool))),
        },
        Migration {
            version: 4,
            description: "Backfill path_cache for existing tasks",
            action: MigrationAction::Rewrite(|pool| Box::pin(backfill_path_cache(pool))),
        },
    ]
}

/// Applies every pending migration to `pool`, in order, recording each
/// applied version in `schema_version`. Returns the number applied.
///
/// # Errors
///
/// Returns an error, and stops applying further migrations, if any
/// migration fails. The caller should treat this as fatal to startup.
pub async fn run(pool: &SqlitePool) -> Result<u32> {
    ensure_schema_version_table(pool).await?;
    let current = current_version(pool).await?;

    let mut applied = 0u32;
    for migration in migrations() {
        if migration.version <= current {
            continue;
        }
        tracing::info!(version = migration.version, description = migration.description, "applying migration");

        match migration.action {
            MigrationAction::Sql(generate) => apply_sql(pool, migration.version, &generate()).await?,
            MigrationAction::Rewrite(rewrite) => rewrite(pool.clone()).await.inspect_err(|e| {
                tracing::error!(version = migration.version, error = %e, "migration failed");
            })?,
        }

        record_version(pool, migration.version).await?;
        applied += 1;
    }

    if applied > 0 {
        tracing::info!(applied, version = current_version(pool).await?, "migrations applied");
    }
    Ok(applied)
}

async fn apply_sql(pool: &SqlitePool, version: u32, statements: &[String]) -> Result<()> {
    for block in statements {
        for statement in block.split(';') {
            let statement = statement.trim();
            if statement.is_empty() {
                continue;
            }
            sqlx::query(statement)
                .execute(pool)
                .await
                .map_err(|e| Error::database_with_source(format!("migration {version} statement"), e))?;
        }
    }
    Ok(())
}

async fn ensure_schema_version_table(pool: &SqlitePool) -> Result<()> {
    sqlx::query(
        "CREATE TABLE IF NOT EXISTS schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL DEFAULT (datetime('now'))
        )",
    )
    .execute(pool)
    .await
    .map_err(|e| Error::database_with_source("create schema_version table", e))?;
    Ok(())
}

async fn current_version(pool: &SqlitePool) -> Result<u32> {
    let row = sqlx::query("SELECT MAX(version) as version FROM schema_version")
        .fetch_one(pool)
        .await
        .map_err(|e| Error::database_with_source("read schema_version", e))?;
    let version: Option<i64> = row.try_get("version").unwrap_or(None);
    Ok(u32::try_from(version.unwrap_or(0)).unwrap_or(0))
}

async fn record_version(pool: &SqlitePool, version: u32) -> Result<()> {
    sqlx::query("INSERT INTO schema_version (version) VALUES (?)")
        .bind(i64::from(version))
        .execute(pool)
        .await
        .map_err(|e| Error::database_with_source("record schema_version", e))?;
    Ok(())
}

const LEGACY_ID_REFERRING_COLUMNS: &[(&str, &str)] = &[
    ("task_dependencies", "task_id"),
    ("task_dependencies", "depends_on"),
    ("session_tasks", "task_id"),
    ("task_validation_history", "task_id"),
    ("task_selection_history", "task_id"),
    ("worktrees", "task_id"),
];

fn rewrite_legacy_task_id(old_id: &str) -> String {
    let short_hash = old_id.strip_prefix("gt-").unwrap_or(old_id);
    let new_uuid = uuid::Uuid::new_v4().to_string();
    let mut parts: Vec<&str> = new_uuid.split('-').collect();
    let last_segment = parts[4];
    let rewritten_last = format!("{short_hash}{}", &last_segment[short_hash.len().min(last_segment.len())..]);
    parts[4] = &rewritten_last;
    parts.join("-")
}

/// Converts legacy `gt-XXXXXX` task ids to UUIDs, embedding the old short
/// hash at the start of the UUID's last segment for traceability, and
/// rewrites every referring column with foreign keys disabled.
async fn migrate_task_ids_to_uuid(pool: SqlitePool) -> Result<()> {
    let rows = sqlx::query("SELECT id FROM tasks WHERE id LIKE 'gt-%'")
        .fetch_all(&pool)
        .await
        .map_err(|e| Error::database_with_source("list legacy task ids", e))?;
    if rows.is_empty() {
        return Ok(());
    }

    let mapping: Vec<(String, String)> = rows
        .iter()
        .filter_map(|row| row.try_get::<String, _>("id").ok())
        .map(|old_id| {
            let new_id = rewrite_legacy_task_id(&old_id);
            (old_id, new_id)
        })
        .collect();

    sqlx::query("PRAGMA foreign_keys = OFF")
        .execute(&pool)
        .await
        .map_err(|e| Error::database_with_source("disable foreign keys", e))?;

    let rewrite_result = rewrite_task_id_references(&pool, &mapping).await;

    sqlx::query("PRAGMA foreign_keys = ON")
        .execute(&pool)
        .await
        .map_err(|e| Error::database_with_source("re-enable foreign keys", e))?;

    rewrite_result
}

async fn rewrite_task_id_references(pool: &SqlitePool, mapping: &[(String, String)]) -> Result<()> {
    for (old_id, new_id) in mapping {
        sqlx::query("UPDATE tasks SET id = ? WHERE id = ?")
            .bind(new_id)
            .bind(old_id)
            .execute(pool)
            .await
            .map_err(|e| Error::database_with_source("rewrite task primary key", e))?;
    }
    for (old_id, new_id) in mapping {
        sqlx::query("UPDATE tasks SET parent_task_id = ? WHERE parent_task_id = ?")
            .bind(new_id)
            .bind(old_id)
            .execute(pool)
            .await
            .map_err(|e| Error::database_with_source("rewrite task parent reference", e))?;
    }
    for (table, column) in LEGACY_ID_REFERRING_COLUMNS {
        for (old_id, new_id) in mapping {
            let sql = format!("UPDATE {table} SET {column} = ? WHERE {column} = ?");
            sqlx::query(&sql)
                .bind(new_id)
                .bind(old_id)
                .execute(pool)
                .await
                .map_err(|e| Error::database_with_source(format!("rewrite {table}.{column} reference"), e))?;
        }
    }
    Ok(())
}

/// Assigns `seq_num` per project, ordered by `(created_at, id)`, continuing
/// from `max(existing seq_num)+1` so a partial prior run is idempotent.
async fn backfill_seq_num(pool: SqlitePool) -> Result<()> {
    let projects = sqlx::query("SELECT DISTINCT project_id FROM tasks WHERE seq_num IS NULL")
        .fetch_all(&pool)
        .await
        .map_err(|e| Error::database_with_source("list projects needing seq_num backfill", e))?;

    for project_row in projects {
        let Ok(project_id) = project_row.try_get::<String, _>("project_id") else {
            continue;
        };

        let tasks = sqlx::query(
            "SELECT id FROM tasks WHERE project_id = ? AND seq_num IS NULL ORDER BY created_at ASC, id ASC",
        )
        .bind(&project_id)
        .fetch_all(&pool)
        .await
        .map_err(|e| Error::database_with_source("list tasks needing seq_num backfill", e))?;

        let max_seq_row = sqlx::query("SELECT MAX(seq_num) as max_seq FROM tasks WHERE project_id = ?")
            .bind(&project_id)
            .fetch_one(&pool)
            .await
            .map_err(|e| Error::database_with_source("read max seq_num", e))?;
        let max_seq: Option<i64> = max_seq_row.try_get("max_seq").unwrap_or(None);
        let mut next_seq = max_seq.unwrap_or(0) + 1;

        for task_row in tasks {
            let Ok(id) = task_row.try_get::<String, _>("id") else {
                continue;
            };
            sqlx::query("UPDATE tasks SET seq_num = ? WHERE id = ?")
                .bind(next_seq)
                .bind(&id)
                .execute(&pool)
                .await
                .map_err(|e| Error::database_with_source("write backfilled seq_num", e))?;
            next_seq += 1;
        }
    }
    Ok(())
}

/// Backfills `path_cache` by traversing the parent chain with a recursive
/// CTE, so roots are assigned before children.
async fn backfill_path_cache(pool: SqlitePool) -> Result<()> {
    let rows = sqlx::query(
        "WITH RECURSIVE task_depth AS (
            SELECT id, 0 as depth FROM tasks
            WHERE parent_task_id IS NULL AND seq_num IS NOT NULL AND path_cache = ''

            UNION ALL

            SELECT t.id, td.depth + 1 FROM tasks t
            JOIN task_depth td ON t.parent_task_id = td.id
            WHERE t.seq_num IS NOT NULL AND t.path_cache = ''
        )
        SELECT id FROM task_depth ORDER BY depth ASC",
    )
    .fetch_all(&pool)
    .await
    .map_err(|e| Error::database_with_source("select path_cache backfill candidates", e))?;

    for row in rows {
        let Ok(id) = row.try_get::<String, _>("id") else {
            continue;
        };

        let task_row = sqlx::query("SELECT parent_task_id, seq_num FROM tasks WHERE id = ?")
            .bind(&id)
            .fetch_one(&pool)
            .await
            .map_err(|e| Error::database_with_source("read task for path_cache backfill", e))?;
        let parent_id: Option<String> = task_row.try_get("parent_task_id").unwrap_or(None);
        let seq_num: i64 = task_row.try_get("seq_num").unwrap_or_default();

        let path = match parent_id {
            Some(parent_id) => {
                let parent_row = sqlx::query("SELECT path_cache FROM tasks WHERE id = ?")
                    .bind(&parent_id)
                    .fetch_one(&pool)
                    .await
                    .map_err(|e| Error::database_with_source("read parent path_cache", e))?;
                let parent_path: String = parent_row.try_get("path_cache").unwrap_or_default();
                format!("{parent_path}/{seq_num}")
            }
            None => format!("/{seq_num}"),
        };

        sqlx::query("UPDATE tasks SET path_cache = ? WHERE id = ?")
            .bind(&path)
            .bind(&id)
            .execute(&pool)
            .await
            .map_err(|e| Error::database_with_source("write backfilled path_cache", e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rewrite_preserves_short_hash_in_last_segment() {
        let new_id = rewrite_legacy_task_id("gt-ab12cd");
        let last_segment = new_id.rsplit('-').next().unwrap();
        assert!(last_segment.starts_with("ab12cd"));
        assert_eq!(new_id.split('-').count(), 5);
    }

    #[tokio::test]
    async fn run_is_idempotent_on_an_empty_database() {
        let pool = sqlx::SqlitePool::connect("sqlite::memory:").await.unwrap();
        let first = run(&pool).await.unwrap();
        assert!(first > 0);
        let second = run(&pool).await.unwrap();
        assert_eq!(second, 0);
    }

    #[tokio::test]
    async fn backfills_seq_num_and_path_cache_for_legacy_rows() {
        let pool = sqlx::SqlitePool::connect("sqlite::memory:").await.unwrap();
        ensure_schema_version_table(&pool).await.unwrap();
        apply_sql(&pool, 1, &baseline_schema_sql()).await.unwrap();

        sqlx::query(
            "INSERT INTO projects (id, name, repo_path, created_at, updated_at) VALUES ('p1', 'proj', '/tmp/proj', '2024-01-01', '2024-01-01')",
        )
        .execute(&pool)
        .await
        .unwrap();
        sqlx::query(
            "INSERT INTO tasks (id, project_id, title, status, priority, task_type, labels, validation_fail_count, use_external_validator, path_cache, created_at, updated_at)
             VALUES ('t1', 'p1', 'root', 'open', 2, 'task', '[]', 0, 0, '', '2024-01-01', '2024-01-01')",
        )
        .execute(&pool)
        .await
        .unwrap();

        backfill_seq_num(pool.clone()).await.unwrap();
        backfill_path_cache(pool.clone()).await.unwrap();

        let row = sqlx::query("SELECT seq_num, path_cache FROM tasks WHERE id = 't1'")
            .fetch_one(&pool)
            .await
            .unwrap();
        let seq_num: i64 = row.try_get("seq_num").unwrap();
        let path_cache: String = row.try_get("path_cache").unwrap();
        assert_eq!(seq_num, 1);
        assert_eq!(path_cache, "/1");
    }
}
