//! Enrichment adapters.

mod npm;

pub use npm::NpmInitEnricher;
