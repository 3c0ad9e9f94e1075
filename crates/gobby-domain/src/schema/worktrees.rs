//!
//! **Documentation**: [docs/modules/domain.md](../../../../docs/modules/domain.md)
//!
//! `worktrees`: git worktree checkouts associated with a task, carried only
//! as a migration-rewrite target for the legacy task-id UUID conversion.
use crate::schema::types::{ForeignKeyDef, IndexDef, TableDef, UniqueConstraintDef};

pub fn table() -> TableDef {
    crate::table!(
        "worktrees",
        [
            crate::col!("id", Text, pk),
            crate::col!("task_id", Text),
            crate::col!("path", Text),
            crate::col!("created_at", Text),
        ]
    )
}

pub fn indexes() -> Vec<IndexDef> {
    vec![crate::index!("idx_worktrees_task", "worktrees", ["task_id"])]
}

pub fn foreign_keys() -> Vec<ForeignKeyDef> {
    vec![crate::fk!("worktrees", "task_id", "tasks", "id")]
}

pub fn unique_constraints() -> Vec<UniqueConstraintDef> {
    vec![]
}
