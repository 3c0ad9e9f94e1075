//! Configuration loading, `${VAR}` substitution, and hot-reload.
//!
//! [`DaemonConfig`](gobby_domain::value_objects::DaemonConfig) itself is a
//! domain value object; this module is only concerned with getting a
//! validated instance of it from `~/.gobby/config.yaml` into memory and
//! keeping it current.

pub mod loader;
pub mod paths;
pub mod substitution;
pub mod watcher;

pub use loader::ConfigLoader;
pub use paths::{config_file_path, default_database_path, gobby_home_dir};
pub use substitution::expand_env_vars;
pub use watcher::ConfigWatcher;
