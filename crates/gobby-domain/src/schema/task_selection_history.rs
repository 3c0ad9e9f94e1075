//!
//! **Documentation**: [docs/modules/domain.md](../../../../docs/modules/domain.md)
//!
//! `task_selection_history`: append-only log of which task a session picked
//! up to work on next, and why.
use crate::schema::types::{ForeignKeyDef, IndexDef, TableDef, UniqueConstraintDef};

pub fn table() -> TableDef {
    crate::table!(
        "task_selection_history",
        [
            crate::col!("id", Text, pk),
            crate::col!("task_id", Text),
            crate::col!("session_id", Text),
            crate::col!("reason", Text, nullable),
            crate::col!("created_at", Text),
        ]
    )
}

pub fn indexes() -> Vec<IndexDef> {
    vec![
        crate::index!(
            "idx_task_selection_history_task",
            "task_selection_history",
            ["task_id"]
        ),
        crate::index!(
            "idx_task_selection_history_session",
            "task_selection_history",
            ["session_id"]
        ),
    ]
}

pub fn foreign_keys() -> Vec<ForeignKeyDef> {
    vec![
        crate::fk!(
            "task_selection_history",
            "task_id",
            "tasks",
            "id"
        ),
        crate::fk!(
            "task_selection_history",
            "session_id",
            "sessions",
            "id"
        ),
    ]
}

pub fn unique_constraints() -> Vec<UniqueConstraintDef> {
    vec![]
}
