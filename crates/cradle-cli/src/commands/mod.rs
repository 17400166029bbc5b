//! Command handlers, one module per subcommand.

use cradle_adapters::{
    DirectoryTemplateStore, EmbeddedTemplateStore, HandlebarsRenderer, LocalFilesystem,
    NpmInitEnricher, OverlayTemplateStore,
};
use cradle_core::application::ScaffoldService;
use tracing::debug;

use crate::config::AppConfig;

pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod new;

/// Wire the production adapters into a [`ScaffoldService`].
///
/// A configured template directory is layered over the built-in templates.
pub(crate) fn build_service(config: &AppConfig) -> ScaffoldService {
    let mut store = OverlayTemplateStore::new();
    if let Some(dir) = &config.templates.dir {
        debug!(dir = %dir.display(), "Using template overrides");
        store = store.with_layer(DirectoryTemplateStore::new(dir));
    }
    let store = store.with_layer(EmbeddedTemplateStore::new());

    ScaffoldService::new(
        Box::new(store),
        Box::new(HandlebarsRenderer::new()),
        Box::new(LocalFilesystem::new()),
        Box::new(NpmInitEnricher::with_program(&config.enrichment.program)),
    )
}
