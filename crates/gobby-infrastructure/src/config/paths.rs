//! Standard filesystem locations under `~/.gobby`.

use std::path::PathBuf;

use gobby_domain::error::{Error, Result};

/// Returns `~/.gobby`, creating it if necessary.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn gobby_home_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(".gobby"))
        .ok_or_else(|| Error::config("Unable to determine home directory"))
}

/// Path to the daemon's YAML configuration file, `~/.gobby/config.yaml`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn config_file_path() -> Result<PathBuf> {
    Ok(gobby_home_dir()?.join("config.yaml"))
}

/// Default path to the embedded relational store, `~/.gobby/gobby.db`.
///
/// # Errors
///
/// Returns an error if the home directory cannot be determined.
pub fn default_database_path() -> Result<PathBuf> {
    Ok(gobby_home_dir()?.join("gobby.db"))
}
