//! Plugin Host (C10): discovers and runs pre/post hook handlers contributed
//! by compiled-in plugins, isolating failures so one broken plugin cannot
//! poison the pipeline.
//!
//! Dynamically loading arbitrary untrusted code has no safe equivalent in
//! the dependency stack this daemon carries (no `libloading`/`wasmtime`
//! anywhere in the pack), so plugins are Rust types compiled into the
//! binary and registered via `linkme::distributed_slice` — the same
//! auto-registration idiom `gobby_domain::registry::database` already uses
//! for storage backends, and the pattern the teacher's own `Cargo.toml`
//! names `linkme` for ("Plugin registration"). "Discovery paths" becomes:
//! each configured directory is scanned for a `plugin.toml` manifest naming
//! which registered plugin to enable, so enabling/disabling a plugin is
//! still a filesystem-driven, redeploy-free operation.

mod host;

use std::sync::Arc;

use async_trait::async_trait;
use gobby_domain::error::Result;
use gobby_domain::value_objects::{HookEvent, HookEventType, HookResponse};

pub use host::PluginHost;

/// A hook-pipeline extension contributing pre- and/or post-handlers.
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Stable plugin name, matched against `plugin.toml` manifests.
    fn name(&self) -> &str;

    /// Event types this plugin wants a pre-handler invoked for. Empty means
    /// the plugin declares no pre-handler.
    fn pre_events(&self) -> &[HookEventType] {
        &[]
    }

    /// Event types this plugin wants a post-handler invoked for.
    fn post_events(&self) -> &[HookEventType] {
        &[]
    }

    /// Runs before the event-specific handler. Returning a response with a
    /// gating decision (`block`/`deny`) short-circuits the pipeline.
    async fn pre_handle(&self, _event: &HookEvent) -> Result<Option<HookResponse>> {
        Ok(None)
    }

    /// Runs after the event-specific handler, given the response produced
    /// so far. May return a modified response; may not introduce a gating
    /// decision at this point (the pipeline ignores one if returned).
    async fn post_handle(&self, _event: &HookEvent, _current: &HookResponse) -> Result<Option<HookResponse>> {
        Ok(None)
    }
}

/// A registered, instantiable plugin.
pub struct PluginEntry {
    /// Unique plugin name, matched against `plugin.toml`'s `name` field.
    pub name: &'static str,
    /// Factory producing a fresh plugin instance.
    pub build: fn() -> Arc<dyn Plugin>,
}

#[linkme::distributed_slice]
/// Compiled-in plugins available for discovery to enable.
pub static PLUGIN_REGISTRY: [PluginEntry] = [..];
