//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `cradle-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `TemplateStore`: Template source lookup
//!   - `TemplateRenderer`: Template rendering with an explicit helper set
//!   - `Enricher`: The external package initializer (`npm init`)
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by services)

pub mod output;

pub use output::{EnrichError, EnrichOptions, Enricher, Filesystem, TemplateRenderer, TemplateStore};

#[cfg(test)]
pub use output::MockEnricher;
