//! SQLite DDL generation from the canonical [`Schema`].

use gobby_domain::schema::{
    ColumnType, ForeignKeyDef, IndexDef, Schema, SchemaDdlGenerator, TableDef, UniqueConstraintDef,
};

/// Generates SQLite DDL from the canonical daemon schema.
#[derive(Debug, Clone, Default)]
pub struct SqliteSchemaDdlGenerator;

impl SchemaDdlGenerator for SqliteSchemaDdlGenerator {
    fn generate_ddl(&self, schema: &Schema) -> Vec<String> {
        let mut stmts = Vec::new();
        for table in &schema.tables {
            let uniques: Vec<&UniqueConstraintDef> = schema
                .unique_constraints
                .iter()
                .filter(|u| u.table == table.name)
                .collect();
            let fks: Vec<&ForeignKeyDef> = schema
                .foreign_keys
                .iter()
                .filter(|fk| fk.from_table == table.name)
                .collect();
            stmts.push(table_to_sqlite_ddl(table, &uniques, &fks));
        }
        for idx in &schema.indexes {
            stmts.push(index_to_sqlite_ddl(idx));
        }
        stmts
    }
}

fn column_type_sqlite(ty: &ColumnType) -> &'static str {
    match ty {
        ColumnType::Text | ColumnType::Json | ColumnType::Uuid => "TEXT",
        ColumnType::Integer | ColumnType::Boolean | ColumnType::Timestamp => "INTEGER",
        ColumnType::Real => "REAL",
        ColumnType::Blob => "BLOB",
    }
}

fn table_to_sqlite_ddl(
    table: &TableDef,
    unique_constraints: &[&UniqueConstraintDef],
    foreign_keys: &[&ForeignKeyDef],
) -> String {
    let pk_cols: Vec<&str> = table
        .columns
        .iter()
        .filter(|c| c.primary_key)
        .map(|c| c.name.as_str())
        .collect();
    let is_composite_pk = pk_cols.len() > 1;

    let cols: Vec<String> = table
        .columns
        .iter()
        .map(|c| {
            let mut s = format!("{} {}", c.name, column_type_sqlite(&c.type_));
            if c.primary_key && !is_composite_pk {
                s.push_str(" PRIMARY KEY");
                if c.auto_increment && matches!(c.type_, ColumnType::Integer) {
                    s.push_str(" AUTOINCREMENT");
                }
            }
            if c.unique && !c.primary_key {
                s.push_str(" UNIQUE");
            }
            // Composite PK columns need NOT NULL spelled out; SQLite only
            // implies it for a single-column PRIMARY KEY.
            if c.not_null && (!c.primary_key || is_composite_pk) {
                s.push_str(" NOT NULL");
            }
            if let Some(fk) = foreign_keys.iter().find(|fk| fk.from_column == c.name) {
                use std::fmt::Write;
                let _ = write!(s, " REFERENCES {}({})", fk.to_table, fk.to_column);
            }
            s
        })
        .collect();
    let mut parts = cols;
    if is_composite_pk {
        parts.push(format!("PRIMARY KEY({})", pk_cols.join(", ")));
    }
    for u in unique_constraints {
        parts.push(format!("UNIQUE({})", u.columns.join(", ")));
    }
    format!(
        "CREATE TABLE IF NOT EXISTS {} ({})",
        table.name,
        parts.join(", ")
    )
}

fn index_to_sqlite_ddl(idx: &IndexDef) -> String {
    format!(
        "CREATE INDEX IF NOT EXISTS {} ON {}({})",
        idx.name,
        idx.table,
        idx.columns.join(", ")
    )
}
