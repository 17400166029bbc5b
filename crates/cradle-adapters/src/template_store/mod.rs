//! Template stores: where template sources come from.

mod directory;
mod embedded;
mod overlay;

pub use directory::DirectoryTemplateStore;
pub use embedded::EmbeddedTemplateStore;
pub use overlay::OverlayTemplateStore;
