//! Template Expander: look a template up, render it, optionally write it.

use std::path::Path;

use serde_json::Value;
use tracing::{debug, instrument};

use crate::application::ports::{Filesystem, TemplateRenderer, TemplateStore};
use crate::domain::{HelperSet, TemplateId};
use crate::error::CradleResult;

/// Thin utility shared by the manifest composer and the scaffold writer.
pub struct TemplateExpander<'a> {
    store: &'a dyn TemplateStore,
    renderer: &'a dyn TemplateRenderer,
    filesystem: &'a dyn Filesystem,
}

impl<'a> TemplateExpander<'a> {
    pub fn new(
        store: &'a dyn TemplateStore,
        renderer: &'a dyn TemplateRenderer,
        filesystem: &'a dyn Filesystem,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
        }
    }

    /// Render `id` against `context` with exactly `helpers` active.
    #[instrument(skip(self, context, helpers), fields(template = %id))]
    pub fn expand(
        &self,
        id: &TemplateId,
        context: &Value,
        helpers: &HelperSet,
    ) -> CradleResult<String> {
        let source = self.store.get(id)?;
        let rendered = self.renderer.render(id, &source, context, helpers)?;
        debug!(bytes = rendered.len(), "Template expanded");
        Ok(rendered)
    }

    /// Render `id` and write the result to `destination`, creating parent
    /// directories first.
    #[instrument(skip(self, context, helpers), fields(template = %id, destination = %destination.display()))]
    pub fn expand_to(
        &self,
        id: &TemplateId,
        context: &Value,
        helpers: &HelperSet,
        destination: &Path,
    ) -> CradleResult<()> {
        let rendered = self.expand(id, context, helpers)?;
        if let Some(parent) = destination.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.write_file(destination, &rendered)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::application::ApplicationError;
    use crate::application::services::testing::{MapStore, MemFs, NameRenderer};
    use crate::domain::Helper;
    use crate::error::CradleError;

    fn context() -> Value {
        json!({ "packageSpec": { "name": "widget" } })
    }

    #[test]
    fn expand_renders_against_context() {
        let store = MapStore::default().with("README.md.hbs", "# {{name}}");
        let fs = MemFs::default();
        let expander = TemplateExpander::new(&store, &NameRenderer, &fs);

        let out = expander
            .expand(&"README.md.hbs".into(), &context(), &HelperSet::empty())
            .unwrap();
        assert_eq!(out, "# widget");
        assert_eq!(fs.file_count(), 0);
    }

    #[test]
    fn unknown_template_is_not_found() {
        let store = MapStore::default();
        let fs = MemFs::default();
        let expander = TemplateExpander::new(&store, &NameRenderer, &fs);

        let err = expander
            .expand(&"nope.hbs".into(), &context(), &HelperSet::empty())
            .unwrap_err();
        assert!(matches!(
            err,
            CradleError::Application(ApplicationError::TemplateNotFound { id }) if id == "nope.hbs"
        ));
    }

    #[test]
    fn helpers_only_apply_when_passed() {
        let store = MapStore::default().with("ci.yml.hbs", "run: {{gh}}");
        let fs = MemFs::default();
        let expander = TemplateExpander::new(&store, &NameRenderer, &fs);
        let id = TemplateId::from("ci.yml.hbs");

        let with = HelperSet::empty().with(&[Helper::GithubExpression]);
        assert_eq!(expander.expand(&id, &context(), &with).unwrap(), "run: ${{ gh }}");

        let err = expander.expand(&id, &context(), &HelperSet::empty()).unwrap_err();
        assert!(matches!(
            err,
            CradleError::Application(ApplicationError::TemplateRender { .. })
        ));
    }

    #[test]
    fn expand_to_writes_exactly_one_file() {
        let store = MapStore::default().with("ts/index.cts.hbs", "// {{name}}");
        let fs = MemFs::default();
        let expander = TemplateExpander::new(&store, &NameRenderer, &fs);

        expander
            .expand_to(
                &"ts/index.cts.hbs".into(),
                &context(),
                &HelperSet::empty(),
                Path::new("/out/widget/ts/index.cts"),
            )
            .unwrap();

        assert_eq!(fs.file_count(), 1);
        assert_eq!(fs.read("/out/widget/ts/index.cts").as_deref(), Some("// widget"));
        assert!(fs.exists(Path::new("/out/widget/ts")));
    }
}
