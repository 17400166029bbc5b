//! Scaffold Service - main application orchestrator.
//!
//! This service coordinates the entire scaffolding workflow:
//! 1. Validate the package specification
//! 2. Resolve the template mappings (common + language + CI)
//! 3. Compose the manifest (see `ManifestComposer`)
//! 4. Expand and write every mapped template
//!
//! Scaffolding is not transactional: when a step fails, files written by
//! earlier steps stay on disk for inspection.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Enricher, Filesystem, TemplateRenderer, TemplateStore},
        services::{MANIFEST_FILE, ManifestComposer, TemplateExpander},
    },
    domain::{
        DomainValidator as validator, HelperSet, Metadata, PackageRecord, PackageSpec, Provider,
        TemplateId, TemplateMap,
        providers::{
            self, COMMON_TEMPLATES, MANIFEST_BASE_DEFAULT, MANIFEST_BASE_LIBRARY,
            MANIFEST_SCRIPTS, ProviderKind,
        },
    },
    error::CradleResult,
};

/// Information about a provider for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProviderInfo {
    pub tag: String,
    pub kind: String,
    /// `(template id, output path)` pairs.
    pub templates: Vec<(String, String)>,
    pub helpers: Vec<String>,
    pub scripts_mixin: Option<String>,
}

/// Everything a scaffold will do, resolved before anything is written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldPlan {
    /// Package directory.
    pub root: PathBuf,
    /// Manifest fragment templates, in composition order.
    pub manifest_templates: Vec<TemplateId>,
    /// Union of the common, language and CI mappings.
    pub files: TemplateMap,
    /// Helpers every render of this scaffold gets.
    pub helpers: HelperSet,
}

impl ScaffoldPlan {
    /// Absolute destination of every file, manifest first.
    pub fn destinations(&self) -> Vec<PathBuf> {
        std::iter::once(self.root.join(MANIFEST_FILE))
            .chain(self.files.iter().map(|entry| entry.output.under(&self.root)))
            .collect()
    }
}

/// Outcome of a successful scaffold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub root: PathBuf,
    pub package: PackageRecord,
    /// Files written, manifest first.
    pub written: Vec<PathBuf>,
}

/// Main scaffolding service.
pub struct ScaffoldService {
    store: Box<dyn TemplateStore>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    enricher: Box<dyn Enricher>,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters.
    ///
    /// # Example
    ///
    /// ```rust,ignore
    /// use cradle_core::application::ScaffoldService;
    ///
    /// let service = ScaffoldService::new(
    ///     store,      // impl TemplateStore
    ///     renderer,   // impl TemplateRenderer
    ///     filesystem, // impl Filesystem
    ///     enricher,   // impl Enricher
    /// );
    /// ```
    pub fn new(
        store: Box<dyn TemplateStore>,
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
        enricher: Box<dyn Enricher>,
    ) -> Self {
        Self {
            store,
            renderer,
            filesystem,
            enricher,
        }
    }

    /// Resolve what scaffolding `spec` under `parent` would write.
    ///
    /// Fails before any I/O if mappings collide or a template is missing.
    #[instrument(skip_all, fields(package = %spec.name()))]
    pub fn plan(&self, spec: &PackageSpec, parent: &Path) -> CradleResult<ScaffoldPlan> {
        validator::validate_spec(spec)?;

        let mut files = TemplateMap::from_table(COMMON_TEMPLATES);
        let mut helpers = HelperSet::empty();
        let mut manifest_templates = Vec::with_capacity(3);

        match spec.library() {
            Some(lib) => {
                manifest_templates.push(TemplateId::from(MANIFEST_BASE_LIBRARY));
                files.extend(lib.lang.templates());
                helpers.merge(&lib.lang.setup());
            }
            None => manifest_templates.push(TemplateId::from(MANIFEST_BASE_DEFAULT)),
        }
        manifest_templates.push(TemplateId::from(MANIFEST_SCRIPTS));

        if let Some(ci) = spec.ci() {
            files.extend(ci.templates());
            helpers.merge(&ci.setup());
            manifest_templates.extend(ci.scripts_mixin());
        }

        validator::validate_template_map(&files)?;
        self.ensure_resolvable(manifest_templates.iter().chain(files.iter().map(|e| &e.template)))?;

        Ok(ScaffoldPlan {
            root: parent.join(spec.directory_name()),
            manifest_templates,
            files,
            helpers,
        })
    }

    /// Scaffold a new package in `parent/<name>`.
    ///
    /// This is the main use case.
    #[instrument(
        skip_all,
        fields(package = %spec.name(), parent = %parent.display())
    )]
    pub fn scaffold(&self, spec: PackageSpec, parent: &Path) -> CradleResult<ScaffoldReport> {
        let plan = self.plan(&spec, parent)?;

        if self.filesystem.exists(&plan.root) {
            return Err(ApplicationError::ProjectExists { path: plan.root }.into());
        }
        self.filesystem.create_dir_all(&plan.root)?;

        let expander = TemplateExpander::new(&*self.store, &*self.renderer, &*self.filesystem);
        let composer = ManifestComposer::new(&expander, &*self.filesystem, &*self.enricher);

        let metadata = Metadata::new(spec);
        let package = composer.compose(&metadata, &plan.helpers, &plan.root)?;

        let metadata = metadata.with_package(package.clone());
        let context = metadata.to_context();

        let mut written = vec![plan.root.join(MANIFEST_FILE)];
        for entry in plan.files.iter() {
            let destination = entry.output.under(&plan.root);
            expander.expand_to(&entry.template, &context, &plan.helpers, &destination)?;
            written.push(destination);
        }

        info!(files = written.len(), root = %plan.root.display(), "Scaffold completed successfully");
        Ok(ScaffoldReport {
            root: plan.root,
            package,
            written,
        })
    }

    /// List every language and CI provider.
    pub fn list_providers(&self) -> Vec<ProviderInfo> {
        [ProviderKind::Language, ProviderKind::Ci]
            .into_iter()
            .flat_map(providers::providers_of)
            .map(|def| ProviderInfo {
                tag: def.tag.to_string(),
                kind: def.kind.to_string(),
                templates: def
                    .templates()
                    .iter()
                    .map(|e| (e.template.to_string(), e.output.to_string()))
                    .collect(),
                helpers: def.helpers.iter().map(|h| h.name().to_string()).collect(),
                scripts_mixin: def
                    .scripts_mixin
                    .then(|| TemplateId::ci_scripts_mixin(def.tag).to_string()),
            })
            .collect()
    }

    /// Every template id the store can resolve.
    pub fn list_templates(&self) -> CradleResult<Vec<TemplateId>> {
        self.store.list()
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    fn ensure_resolvable<'t>(&self, ids: impl Iterator<Item = &'t TemplateId>) -> CradleResult<()> {
        let known: HashSet<TemplateId> = self.store.list()?.into_iter().collect();
        for id in ids {
            if !known.contains(id) {
                return Err(ApplicationError::TemplateNotFound { id: id.to_string() }.into());
            }
        }
        Ok(())
    }
}
