//! Layered template store: the first layer that knows an id wins.

use cradle_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::TemplateId,
    error::{CradleError, CradleResult},
};

/// Stack of stores searched in order.
///
/// Typical use puts a [`DirectoryTemplateStore`](super::DirectoryTemplateStore)
/// over the [`EmbeddedTemplateStore`](super::EmbeddedTemplateStore) so users
/// can override individual built-in templates.
#[derive(Default)]
pub struct OverlayTemplateStore {
    layers: Vec<Box<dyn TemplateStore>>,
}

impl OverlayTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a layer below the existing ones.
    pub fn with_layer(mut self, store: impl TemplateStore + 'static) -> Self {
        self.layers.push(Box::new(store));
        self
    }
}

impl TemplateStore for OverlayTemplateStore {
    fn get(&self, id: &TemplateId) -> CradleResult<String> {
        for layer in &self.layers {
            match layer.get(id) {
                Err(CradleError::Application(ApplicationError::TemplateNotFound { .. })) => continue,
                other => return other,
            }
        }
        Err(ApplicationError::TemplateNotFound { id: id.to_string() }.into())
    }

    fn list(&self) -> CradleResult<Vec<TemplateId>> {
        let mut ids = Vec::new();
        for layer in &self.layers {
            ids.extend(layer.list()?);
        }
        ids.sort();
        ids.dedup();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::template_store::{DirectoryTemplateStore, EmbeddedTemplateStore};

    #[test]
    fn user_layer_overrides_builtin() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("README.md.hbs"), "# custom").unwrap();

        let store = OverlayTemplateStore::new()
            .with_layer(DirectoryTemplateStore::new(dir.path()))
            .with_layer(EmbeddedTemplateStore::new());

        assert_eq!(store.get(&"README.md.hbs".into()).unwrap(), "# custom");
        assert!(store.get(&"tsconfig.json.hbs".into()).unwrap().contains("compilerOptions"));
    }

    #[test]
    fn list_is_deduplicated_union() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("README.md.hbs"), "x").unwrap();
        fs::write(dir.path().join("extra.hbs"), "y").unwrap();

        let store = OverlayTemplateStore::new()
            .with_layer(DirectoryTemplateStore::new(dir.path()))
            .with_layer(EmbeddedTemplateStore::new());

        let ids = store.list().unwrap();
        let builtin = EmbeddedTemplateStore::new().list().unwrap();
        assert_eq!(ids.len(), builtin.len() + 1);
    }

    #[test]
    fn empty_overlay_finds_nothing() {
        let store = OverlayTemplateStore::new();
        assert!(store.get(&"README.md.hbs".into()).is_err());
        assert!(store.list().unwrap().is_empty());
    }
}
