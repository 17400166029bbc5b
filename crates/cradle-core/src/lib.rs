//! Cradle Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for Cradle, a
//! scaffolder for Node packages that wrap a Rust library.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           cradle-cli (CLI)              │
//! │     (Implements Driving Ports)          │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │  (ScaffoldService, ManifestComposer,    │
//! │   TemplateExpander)                     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Store, Renderer, Filesystem, Enricher) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │     cradle-adapters (Infrastructure)    │
//! │ (HandlebarsRenderer, NpmInitEnricher..) │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (PackageSpec, Metadata, TemplateMap,    │
//! │  provider registry, manifest ordering)  │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cradle_core::prelude::*;
//!
//! let spec = PackageSpec::builder("widget")
//!     .library(LibrarySpec::new(Lang::Ts).ci(Some(CiProvider::GitHub)))
//!     .unattended(true)
//!     .build()?;
//!
//! let service = ScaffoldService::new(store, renderer, filesystem, enricher);
//! let report = service.scaffold(spec, Path::new("."))?;
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ScaffoldPlan, ScaffoldReport, ScaffoldService,
        ports::{EnrichError, EnrichOptions, Enricher, Filesystem, TemplateRenderer, TemplateStore},
    };
    pub use crate::domain::{
        CachePolicy, CiProvider, Helper, HelperSet, Lang, LibrarySpec, ModuleType, PackageRecord,
        PackageSpec, PlatformPreset, TemplateId,
    };
    pub use crate::error::{CradleError, CradleResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
