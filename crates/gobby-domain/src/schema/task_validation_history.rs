//!
//! **Documentation**: [docs/modules/domain.md](../../../../docs/modules/domain.md)
//!
//! `task_validation_history`: append-only log of validation passes against a
//! task's acceptance criteria.
use crate::schema::types::{ForeignKeyDef, IndexDef, TableDef, UniqueConstraintDef};

pub fn table() -> TableDef {
    crate::table!(
        "task_validation_history",
        [
            crate::col!("id", Text, pk),
            crate::col!("task_id", Text),
            crate::col!("session_id", Text, nullable),
            crate::col!("status", Text),
            crate::col!("feedback", Text, nullable),
            crate::col!("created_at", Text),
        ]
    )
}

pub fn indexes() -> Vec<IndexDef> {
    vec![crate::index!(
        "idx_task_validation_history_task",
        "task_validation_history",
        ["task_id"]
    )]
}

pub fn foreign_keys() -> Vec<ForeignKeyDef> {
    vec![
        crate::fk!(
            "task_validation_history",
            "task_id",
            "tasks",
            "id"
        ),
        crate::fk!(
            "task_validation_history",
            "session_id",
            "sessions",
            "id"
        ),
    ]
}

pub fn unique_constraints() -> Vec<UniqueConstraintDef> {
    vec![]
}
