//! Typed accessors over [`SqlRow`], shared by every `row_to_*` conversion.

use gobby_domain::error::{Error, Result};
use gobby_domain::ports::infrastructure::database::{SqlParam, SqlRow};

/// Helper to get a required string field.
pub fn req_str(row: &dyn SqlRow, col: &str) -> Result<String> {
    row.try_get_string(col)?
        .ok_or_else(|| Error::database(format!("missing column {col}")))
}

/// Helper to get a required i64 field.
pub fn req_i64(row: &dyn SqlRow, col: &str) -> Result<i64> {
    row.try_get_i64(col)?
        .ok_or_else(|| Error::database(format!("missing column {col}")))
}

/// Helper to get a required f64 field.
pub fn req_f64(row: &dyn SqlRow, col: &str) -> Result<f64> {
    row.try_get_f64(col)?
        .ok_or_else(|| Error::database(format!("missing column {col}")))
}

/// Helper to get an optional string field.
pub fn opt_str(row: &dyn SqlRow, col: &str) -> Result<Option<String>> {
    row.try_get_string(col)
}

/// Helper to get an optional i64 field.
pub fn opt_i64(row: &dyn SqlRow, col: &str) -> Result<Option<i64>> {
    row.try_get_i64(col)
}

/// Helper to get a required boolean, stored as `0`/`1`.
pub fn req_bool(row: &dyn SqlRow, col: &str) -> Result<bool> {
    Ok(req_i64(row, col)? != 0)
}

/// Helper to parse a required `FromStr` column (status/type enums).
pub fn req_parsed<T>(row: &dyn SqlRow, col: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = req_str(row, col)?;
    raw.parse()
        .map_err(|e| Error::database(format!("invalid value in column {col}: {e}")))
}

/// Helper to decode a required JSON column.
pub fn req_json(row: &dyn SqlRow, col: &str) -> Result<serde_json::Value> {
    let raw = req_str(row, col)?;
    serde_json::from_str(&raw).map_err(|e| Error::database(format!("invalid JSON in {col}: {e}")))
}

/// Helper to decode an optional JSON column.
pub fn opt_json(row: &dyn SqlRow, col: &str) -> Result<Option<serde_json::Value>> {
    match opt_str(row, col)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| Error::database(format!("invalid JSON in {col}: {e}"))),
        None => Ok(None),
    }
}

/// Helper to decode an embedding stored as JSON `Vec<f32>`, if present.
pub fn opt_embedding(row: &dyn SqlRow, col: &str) -> Result<Option<Vec<f32>>> {
    match opt_str(row, col)? {
        Some(raw) => serde_json::from_str(&raw)
            .map(Some)
            .map_err(|e| Error::database(format!("invalid embedding JSON in {col}: {e}"))),
        None => Ok(None),
    }
}

/// Helper to convert `Option<&String>` to [`SqlParam`].
pub fn opt_str_param(value: Option<&String>) -> SqlParam {
    match value {
        Some(v) => SqlParam::String(v.clone()),
        None => SqlParam::Null,
    }
}

/// Helper to convert `Option<i64>` to [`SqlParam`].
pub fn opt_i64_param(value: Option<i64>) -> SqlParam {
    match value {
        Some(v) => SqlParam::I64(v),
        None => SqlParam::Null,
    }
}

/// Helper to convert a bool to its stored `0`/`1` [`SqlParam`].
pub fn bool_param(value: bool) -> SqlParam {
    SqlParam::I64(i64::from(value))
}

/// Helper to convert an `f64` to [`SqlParam`]. `SqlParam` has no dedicated
/// real-number variant; SQLite's REAL column affinity coerces a numeric
/// string back into floating point on storage.
pub fn f64_param(value: f64) -> SqlParam {
    SqlParam::String(value.to_string())
}

/// Helper to convert `Option<f64>` to [`SqlParam`].
pub fn opt_f64_param(value: Option<f64>) -> SqlParam {
    match value {
        Some(v) => f64_param(v),
        None => SqlParam::Null,
    }
}

/// Helper to convert an optional JSON value to [`SqlParam`].
pub fn opt_json_param(value: Option<&serde_json::Value>) -> Result<SqlParam> {
    match value {
        Some(v) => Ok(SqlParam::String(serde_json::to_string(v)?)),
        None => Ok(SqlParam::Null),
    }
}

/// Helper to convert a JSON value to [`SqlParam`].
pub fn json_param(value: &serde_json::Value) -> Result<SqlParam> {
    Ok(SqlParam::String(serde_json::to_string(value)?))
}

/// Helper to convert an optional embedding to [`SqlParam`].
pub fn opt_embedding_param(value: Option<&[f32]>) -> Result<SqlParam> {
    match value {
        Some(v) => Ok(SqlParam::String(serde_json::to_string(v)?)),
        None => Ok(SqlParam::Null),
    }
}
