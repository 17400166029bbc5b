//! Infrastructure adapters for Cradle.
//!
//! This crate implements the ports defined in `cradle-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod enricher;
pub mod filesystem;
pub mod renderer;
pub mod template_store;

// Re-export commonly used adapters
pub use enricher::NpmInitEnricher;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use renderer::HandlebarsRenderer;
pub use template_store::{DirectoryTemplateStore, EmbeddedTemplateStore, OverlayTemplateStore};
