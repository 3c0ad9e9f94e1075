//! Generic query/execute helpers shared by every repository in this module.

use std::sync::Arc;

use gobby_domain::error::{Error, Result};
use gobby_domain::ports::infrastructure::database::{DatabaseExecutor, SqlParam, SqlRow};

/// Runs `sql`, converting the first row (if any) with `convert`.
pub async fn query_one<T, F>(
    executor: &Arc<dyn DatabaseExecutor>,
    sql: &str,
    params: &[SqlParam],
    convert: F,
) -> Result<Option<T>>
where
    F: FnOnce(&dyn SqlRow) -> Result<T>,
{
    match executor.query_one(sql, params).await? {
        Some(row) => Ok(Some(convert(row.as_ref())?)),
        None => Ok(None),
    }
}

/// Runs `sql`, converting every returned row with `convert`.
pub async fn query_all<T, F>(
    executor: &Arc<dyn DatabaseExecutor>,
    sql: &str,
    params: &[SqlParam],
    convert: F,
    entity_name: &str,
) -> Result<Vec<T>>
where
    F: Fn(&dyn SqlRow) -> Result<T>,
{
    let rows = executor.query_all(sql, params).await?;
    let mut result = Vec::with_capacity(rows.len());
    for row in rows {
        result.push(
            convert(row.as_ref())
                .map_err(|e| Error::database_with_source(format!("decode {entity_name}"), e))?,
        );
    }
    Ok(result)
}
