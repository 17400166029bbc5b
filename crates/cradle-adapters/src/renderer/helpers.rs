//! Implementations of the helpers a provider can activate.

use handlebars::{
    Context, Handlebars, Helper as HbHelper, HelperResult, Output, RenderContext, Renderable,
};

use cradle_core::domain::Helper;

/// Register `helper` under its template name.
pub(crate) fn register(engine: &mut Handlebars<'_>, helper: Helper) {
    match helper {
        Helper::GithubExpression => {
            engine.register_helper(helper.name(), Box::new(github_expression));
        }
    }
}

/// `{{#gh_expr}} matrix.os {{/gh_expr}}` → `${{ matrix.os }}`
fn github_expression<'reg, 'rc>(
    h: &HbHelper<'rc>,
    r: &'reg Handlebars<'reg>,
    ctx: &'rc Context,
    rc: &mut RenderContext<'reg, 'rc>,
    out: &mut dyn Output,
) -> HelperResult {
    out.write("${{")?;
    if let Some(body) = h.template() {
        body.render(r, ctx, rc, out)?;
    }
    out.write("}}")?;
    Ok(())
}
