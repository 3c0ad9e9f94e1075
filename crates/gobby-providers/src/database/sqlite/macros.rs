//! Macros for the SQLite provider (row conversion).

/// Generates a `FromRow` impl from a list of `(field, extractor)` pairs.
///
/// Column name is the field name. Extractors: `req_str`, `req_i64`, `req_f64`,
/// `req_bool`, `req_parsed`, `opt_str`, `opt_i64`. Use a manual `impl FromRow`
/// for anything that needs computed fields, JSON, or embeddings.
#[macro_export]
macro_rules! from_row_simple {
    ($type:ty, { $($field:ident : $ext:ident),* $(,)? }) => {
        impl $crate::database::sqlite::row_convert::FromRow for $type {
            fn from_row(row: &dyn gobby_domain::ports::SqlRow) -> gobby_domain::error::Result<Self> {
                Ok(Self {
                    $($field: $ext(row, stringify!($field))?),*
                })
            }
        }
    };
}
