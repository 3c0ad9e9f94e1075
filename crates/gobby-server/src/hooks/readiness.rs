//! Daemon readiness guard (pipeline step 1): a cached health flag refreshed
//! by an independent monitor task, never consulted synchronously on the
//! hot path so a slow health check can never add latency to a hook call.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use gobby_domain::ports::DatabaseExecutor;

/// Cached daemon readiness, flipped by [`DaemonReadiness::run_monitor`].
pub struct DaemonReadiness {
    ready: AtomicBool,
    status: arc_swap::ArcSwap<String>,
}

impl DaemonReadiness {
    #[must_use]
    pub fn new() -> Self {
        Self {
            ready: AtomicBool::new(true),
            status: arc_swap::ArcSwap::from_pointee("starting".to_owned()),
        }
    }

    /// `false` once the pipeline should fail open with a reason.
    pub fn is_ready(&self) -> bool {
        self.ready.load(Ordering::Relaxed)
    }

    /// Current status string, for the allow-with-reason response.
    pub fn status(&self) -> String {
        (**self.status.load()).clone()
    }

    fn set(&self, ready: bool, status: impl Into<String>) {
        self.ready.store(ready, Ordering::Relaxed);
        self.status.store(Arc::new(status.into()));
    }

    /// Ticks forever at `interval`, pinging `executor` with a trivial query
    /// to confirm the store connection is alive.
    pub async fn run_monitor(self: Arc<Self>, executor: Arc<dyn DatabaseExecutor>, interval: Duration) {
        let mut ticker = tokio::time::interval(interval);
        loop {
            ticker.tick().await;
            match executor.query_one("SELECT 1", &[]).await {
                Ok(_) => self.set(true, "ready"),
                Err(e) => {
                    tracing::warn!(error = %e, "daemon readiness check failed");
                    self.set(false, format!("store unreachable: {e}"));
                }
            }
        }
    }
}

impl Default for DaemonReadiness {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use gobby_domain::ports::infrastructure::database::SqlRow;
    use gobby_domain::error::Error;

    struct FlakyExecutor {
        healthy: AtomicBool,
    }

    #[async_trait]
    impl DatabaseExecutor for FlakyExecutor {
        async fn execute(&self, _sql: &str, _params: &[gobby_domain::ports::SqlParam]) -> gobby_domain::error::Result<()> {
            unimplemented!()
        }
        async fn query_one(
            &self,
            _sql: &str,
            _params: &[gobby_domain::ports::SqlParam],
        ) -> gobby_domain::error::Result<Option<Arc<dyn SqlRow>>> {
            if self.healthy.load(Ordering::Relaxed) {
                Ok(None)
            } else {
                Err(Error::database("store unreachable"))
            }
        }
        async fn query_all(
            &self,
            _sql: &str,
            _params: &[gobby_domain::ports::SqlParam],
        ) -> gobby_domain::error::Result<Vec<Arc<dyn SqlRow>>> {
            unimplemented!()
        }
    }

    #[tokio::test]
    async fn monitor_flips_ready_to_false_on_query_failure() {
        let readiness = Arc::new(DaemonReadiness::new());
        let executor: Arc<dyn DatabaseExecutor> = Arc::new(FlakyExecutor { healthy: AtomicBool::new(false) });

        let handle = tokio::spawn(Arc::clone(&readiness).run_monitor(executor, Duration::from_millis(5)));
        tokio::time::sleep(Duration::from_millis(30)).await;
        handle.abort();

        assert!(!readiness.is_ready());
        assert!(readiness.status().contains("store unreachable"));
    }

    #[tokio::test]
    async fn monitor_keeps_ready_true_on_query_success() {
        let readiness = Arc::new(DaemonReadiness::new());
        let executor: Arc<dyn DatabaseExecutor> = Arc::new(FlakyExecutor { healthy: AtomicBool::new(true) });

        let handle = tokio::spawn(Arc::clone(&readiness).run_monitor(executor, Duration::from_millis(5)));
        tokio::time::sleep(Duration::from_millis(30)).await;
        handle.abort();

        assert!(readiness.is_ready());
    }
}
