//!
//! **Documentation**: [docs/modules/domain.md](../../../../docs/modules/domain.md)
//!
//! `session_memories` join table: many-to-many relation between sessions and
//! memories, discriminated by [`crate::entities::SessionMemoryAction`].
use crate::schema::types::{ForeignKeyDef, IndexDef, TableDef, UniqueConstraintDef};

pub fn table() -> TableDef {
    crate::table!(
        "session_memories",
        [
            crate::col!("session_id", Text),
            crate::col!("memory_id", Text),
            crate::col!("action", Text),
            crate::col!("created_at", Text),
        ]
    )
}

pub fn indexes() -> Vec<IndexDef> {
    vec![
        crate::index!(
            "idx_session_memories_session",
            "session_memories",
            ["session_id"]
        ),
        crate::index!(
            "idx_session_memories_memory",
            "session_memories",
            ["memory_id"]
        ),
    ]
}

pub fn foreign_keys() -> Vec<ForeignKeyDef> {
    vec![
        crate::fk!("session_memories", "session_id", "sessions", "id"),
        crate::fk!("session_memories", "memory_id", "memories", "id"),
    ]
}

pub fn unique_constraints() -> Vec<UniqueConstraintDef> {
    vec![crate::unique!(
        "session_memories",
        ["session_id", "memory_id", "action"]
    )]
}
