//! Handlebars renderer.

use handlebars::Handlebars;
use serde_json::Value;
use tracing::{instrument, trace};

use cradle_core::{
    application::{ApplicationError, ports::TemplateRenderer},
    domain::{HelperSet, TemplateId},
    error::CradleResult,
};

use super::helpers;

/// Renders templates with Handlebars in strict mode, without HTML escaping.
///
/// Every call builds its own engine holding exactly the helpers passed in,
/// so renders never observe helpers activated for another scaffold.
#[derive(Debug, Clone, Copy, Default)]
pub struct HandlebarsRenderer;

impl HandlebarsRenderer {
    pub fn new() -> Self {
        Self
    }

    fn engine(helpers: &HelperSet) -> Handlebars<'static> {
        let mut engine = Handlebars::new();
        engine.set_strict_mode(true);
        engine.register_escape_fn(handlebars::no_escape);
        for helper in helpers.iter() {
            helpers::register(&mut engine, helper);
        }
        engine
    }
}

impl TemplateRenderer for HandlebarsRenderer {
    #[instrument(skip(self, source, context, helpers), fields(template = %id))]
    fn render(
        &self,
        id: &TemplateId,
        source: &str,
        context: &Value,
        helpers: &HelperSet,
    ) -> CradleResult<String> {
        let mut engine = Self::engine(helpers);
        let render_error = |reason: String| ApplicationError::TemplateRender {
            id: id.to_string(),
            reason,
        };

        engine
            .register_template_string(id.as_str(), source)
            .map_err(|e| render_error(e.to_string()))?;
        let rendered = engine
            .render(id.as_str(), context)
            .map_err(|e| render_error(e.to_string()))?;

        trace!(bytes = rendered.len(), "Rendered");
        Ok(rendered)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use cradle_core::domain::Helper;
    use cradle_core::error::CradleError;

    fn render(source: &str, context: Value, helpers: &HelperSet) -> CradleResult<String> {
        HandlebarsRenderer::new().render(&"t.hbs".into(), source, &context, helpers)
    }

    #[test]
    fn renders_fields_without_escaping() {
        let out = render(
            "{{name}} <{{email}}>",
            json!({"name": "A & B", "email": "a@b"}),
            &HelperSet::empty(),
        )
        .unwrap();
        assert_eq!(out, "A & B <a@b>");
    }

    #[test]
    fn missing_field_is_render_error() {
        let err = render("{{nope}}", json!({}), &HelperSet::empty()).unwrap_err();
        assert!(matches!(
            err,
            CradleError::Application(ApplicationError::TemplateRender { id, .. }) if id == "t.hbs"
        ));
    }

    #[test]
    fn null_fields_render_empty_and_test_false() {
        let out = render(
            "[{{package}}]{{#if package}}yes{{else}}no{{/if}}",
            json!({"package": null}),
            &HelperSet::empty(),
        )
        .unwrap();
        assert_eq!(out, "[]no");
    }

    #[test]
    fn github_expression_wraps_body() {
        let helpers = HelperSet::empty().with(&[Helper::GithubExpression]);
        let out = render(
            "os: {{#gh_expr}} matrix.os {{/gh_expr}} for {{name}}",
            json!({"name": "widget"}),
            &helpers,
        )
        .unwrap();
        assert_eq!(out, "os: ${{ matrix.os }} for widget");
    }

    #[test]
    fn github_expression_body_can_interpolate() {
        let helpers = HelperSet::empty().with(&[Helper::GithubExpression]);
        let out = render(
            "{{#gh_expr}} env.{{var}} {{/gh_expr}}",
            json!({"var": "NODE_VERSION"}),
            &helpers,
        )
        .unwrap();
        assert_eq!(out, "${{ env.NODE_VERSION }}");
    }

    #[test]
    fn helper_is_absent_unless_requested() {
        let with = HelperSet::empty().with(&[Helper::GithubExpression]);
        let source = "{{#gh_expr}}x{{/gh_expr}}";
        assert_eq!(render(source, json!({}), &with).unwrap(), "${{x}}");

        let without = render(source, json!({}), &HelperSet::empty()).ok();
        assert_ne!(without.as_deref(), Some("${{x}}"));
    }

    #[test]
    fn syntax_error_is_render_error() {
        let err = render("{{#if}}", json!({}), &HelperSet::empty()).unwrap_err();
        assert!(err.to_string().contains("t.hbs"));
    }
}
