//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish
//! high-level use cases like "scaffold a package" or "compose a manifest".

pub mod manifest_composer;
pub mod scaffold_service;
pub mod template_expander;

#[cfg(test)]
pub(crate) mod testing;

pub use manifest_composer::{MANIFEST_FILE, ManifestComposer};
pub use scaffold_service::{ProviderInfo, ScaffoldPlan, ScaffoldReport, ScaffoldService};
pub use template_expander::TemplateExpander;
