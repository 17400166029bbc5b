//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `cradle-adapters` crate provides implementations.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use crate::domain::{HelperSet, TemplateId};
use crate::error::CradleResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `cradle_adapters::filesystem::LocalFilesystem` (production)
/// - `cradle_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> CradleResult<()>;

    /// Write content to a file, replacing any previous content.
    fn write_file(&self, path: &Path, content: &str) -> CradleResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> CradleResult<String>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;
}

/// Port for template source lookup.
///
/// Implemented by:
/// - `cradle_adapters::template_store::EmbeddedTemplateStore` (built-in templates)
/// - `cradle_adapters::template_store::DirectoryTemplateStore` (user templates)
/// - `cradle_adapters::template_store::OverlayTemplateStore` (both, user first)
pub trait TemplateStore: Send + Sync {
    /// Source text of a template. `TemplateNotFound` when unknown.
    fn get(&self, id: &TemplateId) -> CradleResult<String>;

    /// Every template id this store can resolve, sorted.
    fn list(&self) -> CradleResult<Vec<TemplateId>>;
}

/// Port for template rendering.
///
/// The helper set is passed on every call; implementations must not keep
/// helpers registered between renders.
pub trait TemplateRenderer: Send + Sync {
    /// Render `source` against `context`.
    ///
    /// `id` is only used to label errors. A field the template references
    /// but `context` lacks is a `TemplateRender` error.
    fn render(
        &self,
        id: &TemplateId,
        source: &str,
        context: &Value,
        helpers: &HelperSet,
    ) -> CradleResult<String>;
}

/// Options for one enrichment run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichOptions {
    /// Accept every default without prompting.
    pub unattended: bool,
}

/// Why the enrichment collaborator failed.
#[derive(Debug, Error)]
pub enum EnrichError {
    #[error("failed to run `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("`{command}` exited with {}", exit_status(.code))]
    NonZeroExit { command: String, code: Option<i32> },
}

fn exit_status(code: &Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

/// Port for the external package initializer.
///
/// Runs in `dir`, where a seeded `package.json` already exists, and may
/// rewrite that file arbitrarily.
#[cfg_attr(test, mockall::automock)]
pub trait Enricher: Send + Sync {
    fn enrich(&self, dir: &Path, options: &EnrichOptions) -> Result<(), EnrichError>;
}
