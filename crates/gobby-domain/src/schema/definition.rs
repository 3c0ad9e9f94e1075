//!
//! **Documentation**: [docs/modules/domain.md](../../../../docs/modules/domain.md)
//!
use super::types::{
    ForeignKeyDef, FtsDef, HasTableSchema, IndexDef, Schema, TableDef, UniqueConstraintDef,
};

// Join/history tables with no dedicated entity type.
use super::{session_memories, session_tasks, task_selection_history, task_validation_history, worktrees};

struct SchemaEntry {
    table: fn() -> TableDef,
    indexes: fn() -> Vec<IndexDef>,
    foreign_keys: fn() -> Vec<ForeignKeyDef>,
    unique_constraints: fn() -> Vec<UniqueConstraintDef>,
}

/// Build a [`SchemaEntry`] from a type implementing [`HasTableSchema`].
macro_rules! from_entity {
    ($entity:ty) => {
        SchemaEntry {
            table: <$entity as HasTableSchema>::table_def,
            indexes: <$entity as HasTableSchema>::indexes,
            foreign_keys: <$entity as HasTableSchema>::foreign_keys,
            unique_constraints: <$entity as HasTableSchema>::unique_constraints,
        }
    };
}

/// Build a [`SchemaEntry`] from a free-function schema module (4 functions).
macro_rules! from_module {
    ($module:ident) => {
        SchemaEntry {
            table: $module::table,
            indexes: $module::indexes,
            foreign_keys: $module::foreign_keys,
            unique_constraints: $module::unique_constraints,
        }
    };
}

use crate::entities::{
    McpServerConfig, McpTool, McpToolEmbedding, Memory, MemoryCrossref, Project, Session, Task,
    TaskDependency, WorkflowState,
};

const SCHEMA_ENTRIES: &[SchemaEntry] = &[
    // ── Entity-colocated schemas (the entity is the source of truth) ──
    from_entity!(Project),
    from_entity!(Session),
    from_entity!(Task),
    from_entity!(TaskDependency),
    from_entity!(Memory),
    from_entity!(MemoryCrossref),
    from_entity!(WorkflowState),
    from_entity!(McpServerConfig),
    from_entity!(McpTool),
    from_entity!(McpToolEmbedding),
    // ── Join / append-only history tables with no dedicated entity ──
    from_module!(session_tasks),
    from_module!(session_memories),
    from_module!(task_validation_history),
    from_module!(task_selection_history),
    from_module!(worktrees),
];

impl Schema {
    /// Build the canonical full schema definition.
    #[must_use]
    pub fn definition() -> Self {
        Self {
            tables: Self::tables(),
            fts: Self::fts_def(),
            indexes: Self::indexes(),
            foreign_keys: Self::foreign_keys(),
            unique_constraints: Self::unique_constraints(),
        }
    }

    fn tables() -> Vec<TableDef> {
        SCHEMA_ENTRIES.iter().map(|entry| (entry.table)()).collect()
    }

    fn fts_def() -> Option<FtsDef> {
        None
    }

    fn indexes() -> Vec<IndexDef> {
        SCHEMA_ENTRIES
            .iter()
            .flat_map(|entry| (entry.indexes)().into_iter())
            .collect()
    }

    fn foreign_keys() -> Vec<ForeignKeyDef> {
        SCHEMA_ENTRIES
            .iter()
            .flat_map(|entry| (entry.foreign_keys)().into_iter())
            .collect()
    }

    fn unique_constraints() -> Vec<UniqueConstraintDef> {
        SCHEMA_ENTRIES
            .iter()
            .flat_map(|entry| (entry.unique_constraints)().into_iter())
            .collect()
    }
}
