//! Process-spawning port, used by the workflow engine's `start_new_session`
//! action to launch a sub-agent CLI process.

use async_trait::async_trait;

use crate::error::Result;

/// Outcome of spawning a new front-end CLI process.
#[derive(Debug, Clone)]
pub struct SpawnedProcess {
    /// OS process id of the spawned child.
    pub pid: u32,
}

/// Spawns detached sub-agent processes.
#[async_trait]
pub trait Spawner: Send + Sync {
    /// Spawns `command args...` and feeds it `prompt`, returning immediately
    /// without waiting for the child to exit.
    async fn spawn(&self, command: &str, args: &[String], prompt: &str) -> Result<SpawnedProcess>;
}
