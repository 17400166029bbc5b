//! Application layer for Cradle.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ScaffoldService, ManifestComposer, TemplateExpander)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer but contains no
//! business logic itself. All business rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    MANIFEST_FILE, ManifestComposer, ProviderInfo, ScaffoldPlan, ScaffoldReport,
    ScaffoldService, TemplateExpander,
};

// Re-export port traits (for adapter implementation)
pub use ports::{EnrichError, EnrichOptions, Enricher, Filesystem, TemplateRenderer, TemplateStore};

pub use error::ApplicationError;
