//!
//! **Documentation**: [docs/modules/domain.md](../../../../docs/modules/domain.md)
//!
//! `session_tasks` join table: many-to-many relation between sessions and
//! tasks, discriminated by [`crate::entities::SessionTaskAction`].
use crate::schema::types::{ForeignKeyDef, IndexDef, TableDef, UniqueConstraintDef};

pub fn table() -> TableDef {
    crate::table!(
        "session_tasks",
        [
            crate::col!("session_id", Text),
            crate::col!("task_id", Text),
            crate::col!("action", Text),
            crate::col!("created_at", Text),
        ]
    )
}

pub fn indexes() -> Vec<IndexDef> {
    vec![
        crate::index!("idx_session_tasks_session", "session_tasks", ["session_id"]),
        crate::index!("idx_session_tasks_task", "session_tasks", ["task_id"]),
    ]
}

pub fn foreign_keys() -> Vec<ForeignKeyDef> {
    vec![
        crate::fk!("session_tasks", "session_id", "sessions", "id"),
        crate::fk!("session_tasks", "task_id", "tasks", "id"),
    ]
}

pub fn unique_constraints() -> Vec<UniqueConstraintDef> {
    vec![crate::unique!(
        "session_tasks",
        ["session_id", "task_id", "action"]
    )]
}
