//! Watches the config file for changes and hot-reloads [`DaemonConfig`].

use std::path::PathBuf;
use std::sync::Arc;

use arc_swap::ArcSwap;
use gobby_domain::error::{Error, Result};
use gobby_domain::value_objects::DaemonConfig;
use notify::{Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use super::loader::ConfigLoader;

/// Holds the current [`DaemonConfig`] and reloads it when the backing file
/// changes on disk.
pub struct ConfigWatcher {
    config_path: PathBuf,
    loader: ConfigLoader,
    current: Arc<ArcSwap<DaemonConfig>>,
    _watcher: RecommendedWatcher,
}

impl ConfigWatcher {
    /// Starts watching `config_path`, which must already exist and parse.
    ///
    /// # Errors
    ///
    /// Returns an error if the initial load fails or the filesystem watcher
    /// cannot be installed.
    pub fn new(config_path: PathBuf) -> Result<Self> {
        let loader = ConfigLoader::new().with_config_path(&config_path);
        let initial = loader.load()?;
        let current = Arc::new(ArcSwap::from_pointee(initial));

        let (tx, mut rx) = mpsc::unbounded_channel::<()>();
        let mut watcher = notify::recommended_watcher(move |res: notify::Result<Event>| {
            if res.is_ok_and(|e| e.kind.is_modify()) {
                let _ = tx.send(());
            }
        })
        .map_err(|e| Error::config(format!("failed to create config file watcher: {e}")))?;

        watcher
            .watch(&config_path, RecursiveMode::NonRecursive)
            .map_err(|e| Error::config(format!("failed to watch {}: {e}", config_path.display())))?;

        let reload_loader = loader.clone();
        let reload_target = Arc::clone(&current);
        let reload_path = config_path.clone();
        tokio::spawn(async move {
            while rx.recv().await.is_some() {
                match reload_loader.reload() {
                    Ok(config) => {
                        reload_target.store(Arc::new(config));
                        tracing::info!(path = %reload_path.display(), "config reloaded");
                    }
                    Err(e) => {
                        tracing::warn!(path = %reload_path.display(), error = %e, "config reload failed, keeping previous config");
                    }
                }
            }
        });

        Ok(Self {
            config_path,
            loader,
            current,
            _watcher: watcher,
        })
    }

    /// Returns the currently-loaded configuration.
    #[must_use]
    pub fn current(&self) -> Arc<DaemonConfig> {
        self.current.load_full()
    }

    /// Forces a synchronous reload from disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn reload(&self) -> Result<Arc<DaemonConfig>> {
        let config = self.loader.reload()?;
        self.current.store(Arc::new(config));
        Ok(self.current.load_full())
    }

    /// Path to the watched configuration file.
    #[must_use]
    pub fn config_path(&self) -> &std::path::Path {
        &self.config_path
    }
}
