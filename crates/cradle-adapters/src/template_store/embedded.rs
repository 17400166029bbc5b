//! Built-in templates compiled into the binary.
//!
//! Sources live under `crates/cradle-adapters/templates/` and are embedded
//! with [`include_str!`]. Paths are checked at compile time.
//!
//! ## Adding a template
//!
//! 1. Create the `.hbs` file under `templates/`
//! 2. Add its id and `include_str!` to [`BUILTIN`]
//! 3. Reference the id from a mapping in `cradle_core::domain::providers`

use cradle_core::{
    application::{ApplicationError, ports::TemplateStore},
    domain::TemplateId,
    error::CradleResult,
};

macro_rules! builtin {
    ($($id:literal),* $(,)?) => {
        &[$(($id, include_str!(concat!("../../templates/", $id)))),*]
    };
}

/// `(template id, source)` for every shipped template.
pub static BUILTIN: &[(&str, &str)] = builtin![
    // manifest fragments
    "manifest/base/default.json.hbs",
    "manifest/base/library.json.hbs",
    "manifest/scripts.json.hbs",
    // common files
    ".gitignore.hbs",
    "Cargo.toml.hbs",
    "README.md.hbs",
    "src/lib.rs.hbs",
    // typescript
    "tsconfig.json.hbs",
    "ts/index.cts.hbs",
    "ts/index.mts.hbs",
    "ts/load.cts.hbs",
    // github
    "ci/github/manifest/scripts.json.hbs",
    "ci/github/setup.yml.hbs",
    "ci/github/.env.hbs",
    "ci/github/build.yml.hbs",
    "ci/github/comments.yml.hbs",
    "ci/github/release.yml.hbs",
    "ci/github/test.yml.hbs",
];

/// Store backed by [`BUILTIN`].
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedTemplateStore;

impl EmbeddedTemplateStore {
    pub fn new() -> Self {
        Self
    }
}

impl TemplateStore for EmbeddedTemplateStore {
    fn get(&self, id: &TemplateId) -> CradleResult<String> {
        BUILTIN
            .iter()
            .find(|(builtin, _)| *builtin == id.as_str())
            .map(|(_, source)| (*source).to_string())
            .ok_or_else(|| ApplicationError::TemplateNotFound { id: id.to_string() }.into())
    }

    fn list(&self) -> CradleResult<Vec<TemplateId>> {
        let mut ids: Vec<TemplateId> = BUILTIN.iter().map(|(id, _)| TemplateId::from(*id)).collect();
        ids.sort();
        Ok(ids)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use cradle_core::domain::providers::{
        COMMON_TEMPLATES, MANIFEST_BASE_DEFAULT, MANIFEST_BASE_LIBRARY, MANIFEST_SCRIPTS,
        PROVIDER_REGISTRY,
    };
    use cradle_core::domain::CiProvider;

    use super::*;

    #[test]
    fn every_referenced_template_is_embedded() {
        let store = EmbeddedTemplateStore::new();
        let known: HashSet<_> = store.list().unwrap().into_iter().collect();

        let mut referenced: Vec<TemplateId> = vec![
            MANIFEST_BASE_DEFAULT.into(),
            MANIFEST_BASE_LIBRARY.into(),
            MANIFEST_SCRIPTS.into(),
        ];
        referenced.extend(COMMON_TEMPLATES.iter().map(|(id, _)| TemplateId::from(*id)));
        for def in PROVIDER_REGISTRY {
            referenced.extend(def.templates.iter().map(|(id, _)| TemplateId::from(*id)));
        }
        referenced.extend(CiProvider::ALL.iter().filter_map(|ci| ci.scripts_mixin()));

        for id in referenced {
            assert!(known.contains(&id), "{id} is not embedded");
        }
    }

    #[test]
    fn ids_are_unique_and_sources_non_empty() {
        let mut seen = HashSet::new();
        for (id, source) in BUILTIN {
            assert!(seen.insert(*id), "duplicate {id}");
            assert!(!source.trim().is_empty(), "{id} is empty");
        }
    }

    #[test]
    fn unknown_id_is_not_found() {
        let err = EmbeddedTemplateStore::new().get(&"nope.hbs".into()).unwrap_err();
        assert!(err.to_string().contains("nope.hbs"));
    }
}
