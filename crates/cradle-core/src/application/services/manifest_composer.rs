//! Manifest Composer: the layered `package.json` flow.
//!
//! 1. Expand the base fragment (library-flavoured or default) as the seed.
//! 2. Expand the scripts fragment and assign it to `seed.scripts`.
//! 3. Overlay the CI provider's scripts mixin, if the library has one.
//! 4. Write the seed as compact JSON.
//! 5. Run the enricher (`npm init`), which may rewrite the file.
//! 6. Re-read, normalise key order, write back pretty-printed.
//! 7. Return the [`PackageRecord`] of the final manifest.
//!
//! Every step depends on the previous one's artifact, so they run in order.
//! A failure aborts the flow and leaves the last written manifest on disk.

use std::path::Path;

use serde_json::{Map, Value};
use tracing::{debug, info, instrument};

use crate::application::ApplicationError;
use crate::application::ports::{EnrichOptions, Enricher, Filesystem};
use crate::application::services::TemplateExpander;
use crate::domain::manifest::{self, ManifestStage};
use crate::domain::providers::{MANIFEST_BASE_DEFAULT, MANIFEST_BASE_LIBRARY, MANIFEST_SCRIPTS};
use crate::domain::{HelperSet, Metadata, PackageRecord, TemplateId};
use crate::error::{CradleError, CradleResult};

/// File name of the manifest inside the package directory.
pub const MANIFEST_FILE: &str = "package.json";

pub struct ManifestComposer<'a> {
    expander: &'a TemplateExpander<'a>,
    filesystem: &'a dyn Filesystem,
    enricher: &'a dyn Enricher,
}

impl<'a> ManifestComposer<'a> {
    pub fn new(
        expander: &'a TemplateExpander<'a>,
        filesystem: &'a dyn Filesystem,
        enricher: &'a dyn Enricher,
    ) -> Self {
        Self {
            expander,
            filesystem,
            enricher,
        }
    }

    /// Run the whole flow for the package rooted at `dir`.
    #[instrument(skip_all, fields(package = %metadata.package_spec().name(), dir = %dir.display()))]
    pub fn compose(
        &self,
        metadata: &Metadata,
        helpers: &HelperSet,
        dir: &Path,
    ) -> CradleResult<PackageRecord> {
        let context = metadata.to_context();
        let manifest_path = dir.join(MANIFEST_FILE);

        let seed = self.seed(metadata, &context, helpers)?;
        self.filesystem
            .write_file(&manifest_path, &Value::Object(seed).to_string())?;
        debug!(path = %manifest_path.display(), "Seed manifest written");

        let options = EnrichOptions {
            unattended: metadata.package_spec().is_unattended(),
        };
        self.enricher
            .enrich(dir, &options)
            .map_err(|e| ApplicationError::EnrichmentFailed {
                reason: e.to_string(),
            })?;

        let manifest = self.normalize_on_disk(&manifest_path)?;
        let record = PackageRecord::from_manifest(&manifest);
        info!(version = ?record.version, "Manifest composed");
        Ok(record)
    }

    /// Steps 1-3: the seed fragment with merged scripts.
    pub fn seed(
        &self,
        metadata: &Metadata,
        context: &Value,
        helpers: &HelperSet,
    ) -> CradleResult<Map<String, Value>> {
        let spec = metadata.package_spec();

        let base_id = if spec.library().is_some() {
            MANIFEST_BASE_LIBRARY
        } else {
            MANIFEST_BASE_DEFAULT
        };
        let mut seed = self.fragment(
            &base_id.into(),
            context,
            helpers,
            ManifestStage::Base,
            manifest::parse_object,
        )?;

        let mut scripts = self.fragment(
            &MANIFEST_SCRIPTS.into(),
            context,
            helpers,
            ManifestStage::Scripts,
            manifest::parse_scripts,
        )?;

        if let Some(mixin_id) = spec.ci().and_then(|ci| ci.scripts_mixin()) {
            let mixin = self.fragment(
                &mixin_id,
                context,
                helpers,
                ManifestStage::Mixin,
                manifest::parse_scripts,
            )?;
            debug!(mixin = %mixin_id, keys = mixin.len(), "Overlaying scripts mixin");
            manifest::overlay_scripts(&mut scripts, mixin);
        }

        seed.insert("scripts".to_string(), Value::Object(scripts));
        Ok(seed)
    }

    /// Expand a fragment template and parse it, tagging parse failures with
    /// their stage.
    fn fragment(
        &self,
        id: &TemplateId,
        context: &Value,
        helpers: &HelperSet,
        stage: ManifestStage,
        parse: impl Fn(&str) -> Result<Map<String, Value>, String>,
    ) -> CradleResult<Map<String, Value>> {
        let text = self.expander.expand(id, context, helpers)?;
        parse(&text).map_err(|reason| {
            ApplicationError::ManifestCorrupt {
                stage,
                reason: format!("{id}: {reason}"),
            }
            .into()
        })
    }

    /// Step 6.
    fn normalize_on_disk(&self, path: &Path) -> CradleResult<Map<String, Value>> {
        if !self.filesystem.exists(path) {
            return Err(missing_manifest(path));
        }

        let text = self.filesystem.read_to_string(path)?;
        let enriched =
            manifest::parse_object(&text).map_err(|reason| ApplicationError::ManifestCorrupt {
                stage: ManifestStage::PostEnrichment,
                reason,
            })?;

        let normalized = manifest::normalize_key_order(enriched);
        let mut pretty = serde_json::to_string_pretty(&normalized).map_err(|e| {
            ApplicationError::ManifestCorrupt {
                stage: ManifestStage::PostEnrichment,
                reason: e.to_string(),
            }
        })?;
        pretty.push('\n');
        self.filesystem.write_file(path, &pretty)?;
        Ok(normalized)
    }
}

fn missing_manifest(path: &Path) -> CradleError {
    ApplicationError::EnrichmentFailed {
        reason: format!("{} is missing after enrichment", path.display()),
    }
    .into()
}
