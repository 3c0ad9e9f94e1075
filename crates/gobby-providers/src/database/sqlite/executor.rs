//! SQLite implementation of the database executor port.
//!
//! Uses the domain port [`DatabaseExecutor`] and [`SqlRow`]; repositories
//! depend on these traits and never touch sqlx directly.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use gobby_domain::error::{Error, Result};
use gobby_domain::ports::infrastructure::database::{DatabaseExecutor, SqlParam, SqlRow};
use sqlx::Column;
use sqlx::Row;
use sqlx::sqlite::SqliteRow;

/// Row adapter that copies column values out of a SQLite row so it can be
/// returned as `Arc<dyn SqlRow>` without holding a reference to the connection.
#[derive(Debug)]
struct SqliteMappedRow {
    strings: HashMap<String, Option<String>>,
    i64s: HashMap<String, Option<i64>>,
    f64s: HashMap<String, Option<f64>>,
}

impl SqliteMappedRow {
    fn from_sqlite_row(row: &SqliteRow) -> Self {
        let mut strings = HashMap::new();
        let mut i64s = HashMap::new();
        let mut f64s = HashMap::new();
        for (i, col) in row.columns().iter().enumerate() {
            let name = col.name().to_owned();
            if let Ok(v) = row.try_get::<String, _>(i) {
                strings.insert(name, Some(v));
            } else if let Ok(v) = row.try_get::<i64, _>(i) {
                i64s.insert(name, Some(v));
            } else if let Ok(v) = row.try_get::<f64, _>(i) {
                f64s.insert(name, Some(v));
            } else if let Ok(opt) = row.try_get::<Option<String>, _>(i) {
                strings.insert(name, opt);
            } else if let Ok(opt) = row.try_get::<Option<i64>, _>(i) {
                i64s.insert(name, opt);
            } else if let Ok(opt) = row.try_get::<Option<f64>, _>(i) {
                f64s.insert(name, opt);
            } else {
                strings.insert(name, None);
            }
        }
        Self {
            strings,
            i64s,
            f64s,
        }
    }
}

impl SqlRow for SqliteMappedRow {
    fn try_get_string(&self, name: &str) -> Result<Option<String>> {
        Ok(self
            .strings
            .get(name)
            .cloned()
            .flatten()
            .or_else(|| self.i64s.get(name).and_then(|n| n.map(|v| v.to_string()))))
    }

    fn try_get_i64(&self, name: &str) -> Result<Option<i64>> {
        Ok(self.i64s.get(name).copied().flatten().or_else(|| {
            self.strings
                .get(name)
                .and_then(|s| s.as_ref().and_then(|s| s.parse().ok()))
        }))
    }

    fn try_get_f64(&self, name: &str) -> Result<Option<f64>> {
        Ok(self.f64s.get(name).copied().flatten().or_else(|| {
            self.strings
                .get(name)
                .and_then(|s| s.as_ref().and_then(|s| s.parse().ok()))
        }))
    }
}

/// SQLite implementation of [`DatabaseExecutor`], backed by a pooled connection.
#[derive(Clone)]
pub struct SqliteExecutor {
    pool: sqlx::SqlitePool,
}

impl SqliteExecutor {
    /// Creates an executor over the given pool.
    #[must_use]
    pub fn new(pool: sqlx::SqlitePool) -> Self {
        Self { pool }
    }

    /// Returns the underlying pool, for code that needs direct sqlx access
    /// (schema bootstrap, `PRAGMA` statements).
    #[must_use]
    pub fn pool(&self) -> &sqlx::SqlitePool {
        &self.pool
    }
}

#[async_trait]
impl DatabaseExecutor for SqliteExecutor {
    async fn execute(&self, sql: &str, params: &[SqlParam]) -> Result<()> {
        let mut q = sqlx::query(sql);
        for p in params {
            q = match p {
                SqlParam::String(s) => q.bind(s.as_str()),
                SqlParam::I64(n) => q.bind(*n),
                SqlParam::Null => q.bind(Option::<String>::None),
            };
        }
        q.execute(&self.pool)
            .await
            .map_err(|e| Error::database_with_source(format!("SQL execute failed: {sql}"), e))?;
        Ok(())
    }

    async fn query_one(&self, sql: &str, params: &[SqlParam]) -> Result<Option<Arc<dyn SqlRow>>> {
        let mut q = sqlx::query(sql);
        for p in params {
            q = match p {
                SqlParam::String(s) => q.bind(s.as_str()),
                SqlParam::I64(n) => q.bind(*n),
                SqlParam::Null => q.bind(Option::<String>::None),
            };
        }
        let row = q
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| Error::database_with_source(format!("SQL query_one failed: {sql}"), e))?;
        Ok(row.map(|r| Arc::new(SqliteMappedRow::from_sqlite_row(&r)) as Arc<dyn SqlRow>))
    }

    async fn query_all(&self, sql: &str, params: &[SqlParam]) -> Result<Vec<Arc<dyn SqlRow>>> {
        let mut q = sqlx::query(sql);
        for p in params {
            q = match p {
                SqlParam::String(s) => q.bind(s.as_str()),
                SqlParam::I64(n) => q.bind(*n),
                SqlParam::Null => q.bind(Option::<String>::None),
            };
        }
        let rows = q
            .fetch_all(&self.pool)
            .await
            .map_err(|e| Error::database_with_source(format!("SQL query_all failed: {sql}"), e))?;
        Ok(rows
            .iter()
            .map(|r| Arc::new(SqliteMappedRow::from_sqlite_row(r)) as Arc<dyn SqlRow>)
            .collect())
    }
}
