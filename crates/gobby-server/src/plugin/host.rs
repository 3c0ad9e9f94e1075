//! Plugin discovery and per-event handler execution.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use gobby_domain::value_objects::{HookEvent, HookResponse};
use serde::Deserialize;

use super::{Plugin, PLUGIN_REGISTRY};

#[derive(Debug, Deserialize)]
struct PluginManifest {
    name: String,
    #[serde(default = "default_enabled")]
    enabled: bool,
}

const fn default_enabled() -> bool {
    true
}

/// Loaded, enabled plugins ready to receive events.
pub struct PluginHost {
    plugins: Vec<Arc<dyn Plugin>>,
}

impl PluginHost {
    /// Scans each directory in `plugin_dirs` (after `~` expansion) for a
    /// `plugin.toml` manifest, instantiating any enabled, registered
    /// plugin it names. Missing directories and unreadable or malformed
    /// manifests are logged and skipped — plugin load errors never abort
    /// daemon startup.
    #[must_use]
    pub fn discover(plugin_dirs: &[String]) -> Self {
        let mut plugins = Vec::new();
        for raw_dir in plugin_dirs {
            let dir = expand_tilde(raw_dir);
            match load_manifest(&dir) {
                Ok(Some(manifest)) if manifest.enabled => match find_plugin(&manifest.name) {
                    Some(plugin) => {
                        tracing::info!(plugin = manifest.name, path = %dir.display(), "plugin loaded");
                        plugins.push(plugin);
                    }
                    None => {
                        tracing::warn!(plugin = manifest.name, path = %dir.display(), "unknown plugin name, skipping");
                    }
                },
                Ok(Some(_)) => tracing::debug!(path = %dir.display(), "plugin disabled, skipping"),
                Ok(None) => {}
                Err(e) => tracing::warn!(path = %dir.display(), error = %e, "failed to load plugin manifest"),
            }
        }
        Self { plugins }
    }

    /// An empty host, for deployments with plugins disabled entirely.
    #[must_use]
    pub fn empty() -> Self {
        Self { plugins: Vec::new() }
    }

    /// Runs every loaded plugin's pre- or post-handler for `event`.
    ///
    /// Pre-handlers: the first plugin to return a gating response
    /// (`block`/`deny`) short-circuits and that response is returned.
    /// Post-handlers: each plugin may further transform the running
    /// response; the final accumulated response is returned if any plugin
    /// changed it. A plugin's error is logged and that plugin is skipped;
    /// it can never poison the rest of the run.
    pub async fn run_plugin_handlers(
        &self,
        event: &HookEvent,
        pre: bool,
        core_response: Option<&HookResponse>,
    ) -> Option<HookResponse> {
        if pre {
            for plugin in &self.plugins {
                if !plugin.pre_events().contains(&event.event_type) {
                    continue;
                }
                match plugin.pre_handle(event).await {
                    Ok(Some(response)) if response.is_gating() => return Some(response),
                    Ok(_) => {}
                    Err(e) => {
                        tracing::warn!(plugin = plugin.name(), error = %e, "plugin pre-handler failed");
                    }
                }
            }
            return None;
        }

        let mut current = core_response.cloned().unwrap_or_default();
        let mut changed = false;
        for plugin in &self.plugins {
            if !plugin.post_events().contains(&event.event_type) {
                continue;
            }
            match plugin.post_handle(event, &current).await {
                Ok(Some(response)) => {
                    current = response;
                    changed = true;
                }
                Ok(None) => {}
                Err(e) => {
                    tracing::warn!(plugin = plugin.name(), error = %e, "plugin post-handler failed");
                }
            }
        }
        changed.then_some(current)
    }
}

fn find_plugin(name: &str) -> Option<Arc<dyn Plugin>> {
    PLUGIN_REGISTRY
        .iter()
        .find(|entry| entry.name == name)
        .map(|entry| (entry.build)())
}

fn load_manifest(dir: &Path) -> Result<Option<PluginManifest>, std::io::Error> {
    let manifest_path = dir.join("plugin.toml");
    if !manifest_path.exists() {
        return Ok(None);
    }
    let content = std::fs::read_to_string(&manifest_path)?;
    let manifest = toml::from_str(&content)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e.to_string()))?;
    Ok(Some(manifest))
}

fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expands_leading_tilde() {
        if let Some(home) = dirs::home_dir() {
            assert_eq!(expand_tilde("~/plugins/foo"), home.join("plugins/foo"));
        }
    }

    #[test]
    fn leaves_absolute_path_unchanged() {
        assert_eq!(expand_tilde("/etc/gobby/plugins"), PathBuf::from("/etc/gobby/plugins"));
    }

    #[test]
    fn missing_manifest_is_none_not_error() {
        let result = load_manifest(Path::new("/nonexistent/gobby/plugin/dir"));
        assert!(matches!(result, Ok(None)));
    }

    #[tokio::test]
    async fn empty_host_runs_without_plugins() {
        let host = PluginHost::empty();
        let event = HookEvent {
            event_type: gobby_domain::value_objects::HookEventType::BeforeTool,
            session_id: "s1".to_owned(),
            source: "test".to_owned(),
            timestamp: "2024-01-01T00:00:00Z".to_owned(),
            data: Default::default(),
            machine_id: None,
        };
        assert!(host.run_plugin_handlers(&event, true, None).await.is_none());
        assert!(host.run_plugin_handlers(&event, false, None).await.is_none());
    }
}
