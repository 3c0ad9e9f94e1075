//! Handlebars-backed [`TemplateEngine`] used by the workflow engine to
//! interpolate action string parameters.

use gobby_domain::ports::TemplateEngine;
use handlebars::Handlebars;
use serde_json::Value;

/// Renders `{{var}}` references against a flat JSON object context.
///
/// Unresolved references render as an empty string (Handlebars' default
/// `strict_mode = false` behavior), never as the literal placeholder.
pub struct HandlebarsTemplateEngine {
    registry: Handlebars<'static>,
}

impl HandlebarsTemplateEngine {
    /// Builds an engine with strict mode left off, so a missing variable
    /// renders empty rather than erroring the whole template.
    #[must_use]
    pub fn new() -> Self {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(false);
        Self { registry }
    }
}

impl Default for HandlebarsTemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateEngine for HandlebarsTemplateEngine {
    fn render(&self, template: &str, context: &Value) -> String {
        self.registry
            .render_template(template, context)
            .unwrap_or_else(|e| {
                tracing::warn!(error = %e, "template render failed, passing through literal");
                template.to_owned()
            })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn renders_simple_variable() {
        let engine = HandlebarsTemplateEngine::new();
        let out = engine.render("hello {{name}}", &json!({ "name": "world" }));
        assert_eq!(out, "hello world");
    }

    #[test]
    fn missing_variable_renders_empty() {
        let engine = HandlebarsTemplateEngine::new();
        let out = engine.render("value: {{missing}}", &json!({}));
        assert_eq!(out, "value: ");
    }

    #[test]
    fn nested_path_resolves() {
        let engine = HandlebarsTemplateEngine::new();
        let out = engine.render("{{state.variables.branch}}", &json!({ "state": { "variables": { "branch": "main" } } }));
        assert_eq!(out, "main");
    }

    #[test]
    fn invalid_template_passes_through_literal() {
        let engine = HandlebarsTemplateEngine::new();
        let out = engine.render("{{#if}}", &json!({}));
        assert_eq!(out, "{{#if}}");
    }
}
