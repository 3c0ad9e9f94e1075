//! Template-rendering port, used by the workflow engine to interpolate
//! action string parameters against `state.variables`/`state.artifacts`
//! and the current hook event context.

use serde_json::Value;

/// Renders template strings against a flat variable context.
///
/// Implementations decide, once and consistently, how an unresolved
/// reference is rendered: as an empty string, or left as the literal
/// `{{name}}` placeholder. Either policy is acceptable as long as a single
/// engine instance is consistent about it.
pub trait TemplateEngine: Send + Sync {
    /// Renders `template` against `context`, a JSON object mapping variable
    /// names to values.
    fn render(&self, template: &str, context: &Value) -> String;
}
