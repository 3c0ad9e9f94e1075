//! Domain macros.
//!
//! [`logging`] provides `trace!`..`error!` macros that dispatch through the
//! domain's tracing-free logging facade ([`crate::infra::logging`]).
//! [`schema`] provides `table!`/`col!`/`index!`/`fk!`/`unique!` and the
//! co-located `impl_table_schema!` helper used by `entities/` to declare
//! each entity's persisted shape next to its struct.

#[macro_use]
mod logging;
#[macro_use]
mod schema;
