// ============================================================================
//  CLEAN MODULE BOUNDARIES
// ============================================================================

//! Core domain layer for Cradle.
//!
//! This module contains pure business logic. All I/O, template rendering, and
//! external processes are reached through ports (traits) defined in the
//! application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, or external calls
//! - **Few crates**: std + thiserror + serde/serde_json for the JSON data model
//! - **Immutable entities**: the metadata context is never mutated in place
//!
// Public API - what the world sees
pub mod entities;
pub mod error;
pub mod manifest;
pub mod providers;
pub mod value_objects;

// Private implementation details - not visible outside domain
mod validation;

// Re-exports for convenience
pub use entities::{
    Helper, HelperSet, LibrarySpec, Metadata, PackageRecord, PackageSpec, PackageSpecBuilder,
    RelativePath, TemplateId, TemplateMap, TemplateMapEntry, Versions,
};

pub use error::{DomainError, ErrorCategory};

pub use manifest::{CANONICAL_KEYS, ManifestStage};

pub use providers::{Provider, ProviderDef, ProviderKind};

pub use value_objects::{CachePolicy, CiProvider, Lang, ModuleType, PlatformPreset};

pub use validation::DomainValidator;
