//! Loads [`DaemonConfig`] from `~/.gobby/config.yaml` (or an explicit path),
//! applying `${VAR}`/`${VAR:-default}` substitution before parsing.

use std::path::{Path, PathBuf};

use gobby_domain::error::{Error, Result};
use gobby_domain::value_objects::DaemonConfig;

use super::paths::config_file_path;
use super::substitution::expand_env_vars;

/// Reads and validates [`DaemonConfig`] from a YAML file on disk.
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Creates a loader that resolves `~/.gobby/config.yaml` by default.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Overrides the config file path, bypassing `~/.gobby` resolution.
    #[must_use]
    pub fn with_config_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.config_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Loads, substitutes, and parses the configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be found, read, or its YAML does
    /// not match [`DaemonConfig`]'s shape.
    pub fn load(&self) -> Result<DaemonConfig> {
        let path = self.resolve_path()?;
        let raw = std::fs::read_to_string(&path)
            .map_err(|e| Error::io_with_source(format!("read config file {}", path.display()), e))?;
        let expanded = expand_env_vars(&raw);
        serde_yaml::from_str(&expanded)
            .map_err(|e| Error::config(format!("invalid config at {}: {e}", path.display())))
    }

    /// Re-reads the configuration file from disk.
    ///
    /// # Errors
    ///
    /// Returns an error under the same conditions as [`ConfigLoader::load`].
    pub fn reload(&self) -> Result<DaemonConfig> {
        self.load()
    }

    /// Writes `config` to `path` as YAML, restricting permissions to owner
    /// read/write (`0600`) on Unix.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or the filesystem write fails.
    pub fn save_to_file<P: AsRef<Path>>(config: &DaemonConfig, path: P) -> Result<()> {
        let path = path.as_ref();
        let yaml = serde_yaml::to_string(config)
            .map_err(|e| Error::config(format!("failed to serialize config: {e}")))?;
        std::fs::write(path, yaml)
            .map_err(|e| Error::io_with_source(format!("write config file {}", path.display()), e))?;
        restrict_permissions(path)?;
        Ok(())
    }

    fn resolve_path(&self) -> Result<PathBuf> {
        match &self.config_path {
            Some(path) => Ok(path.clone()),
            None => config_file_path(),
        }
    }
}

#[cfg(unix)]
fn restrict_permissions(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;
    let perms = std::fs::Permissions::from_mode(0o600);
    std::fs::set_permissions(path, perms)
        .map_err(|e| Error::io_with_source(format!("chmod config file {}", path.display()), e))
}

#[cfg(not(unix))]
fn restrict_permissions(_path: &Path) -> Result<()> {
    Ok(())
}
