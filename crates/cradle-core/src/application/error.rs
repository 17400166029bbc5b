//! Application layer errors.
//!
//! These errors represent failures in orchestration: templates that cannot
//! be found or rendered, manifests that do not parse, collaborators that
//! fail. Rule violations are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ManifestStage;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// No template source is registered under this id.
    #[error("Template not found: {id}")]
    TemplateNotFound { id: String },

    /// The template exists but rendering it failed.
    #[error("Failed to render template '{id}': {reason}")]
    TemplateRender { id: String, reason: String },

    /// A manifest fragment, or the enriched manifest, is not valid.
    #[error("Manifest is corrupt at the {stage} stage: {reason}")]
    ManifestCorrupt { stage: ManifestStage, reason: String },

    /// The external enrichment step failed or left no manifest behind.
    #[error("Manifest enrichment failed: {reason}")]
    EnrichmentFailed { reason: String },

    /// Writing an output file failed.
    #[error("Failed to write {path}: {reason}")]
    FileWrite { path: PathBuf, reason: String },

    /// Reading a file back failed.
    #[error("Failed to read {path}: {reason}")]
    FileRead { path: PathBuf, reason: String },

    /// Target directory already exists.
    #[error("Directory already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// An adapter's internal lock was poisoned.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateNotFound { id } => vec![
                format!("No template named '{id}' in the template store"),
                "If you use a custom templates directory, check it contains this file".into(),
            ],
            Self::TemplateRender { id, .. } => vec![
                format!("Template '{id}' references a value that is not available"),
                "Check the template for typos in field names".into(),
            ],
            Self::ManifestCorrupt { stage, .. } => vec![
                format!("The {stage} manifest fragment is not a valid JSON object"),
                "package.json has been left on disk for inspection".into(),
            ],
            Self::EnrichmentFailed { .. } => vec![
                "Ensure npm is installed and in your PATH".into(),
                "Re-run with --yes to skip the interactive questions".into(),
                "package.json has been left on disk; you can finish with `npm init`".into(),
            ],
            Self::FileWrite { path, .. } | Self::FileRead { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Files written before the failure were left in place".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different package name".into(),
            ],
            Self::LockPoisoned => vec!["This is likely a bug; try again".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::EnrichmentFailed { .. } => ErrorCategory::External,
            Self::TemplateRender { .. }
            | Self::ManifestCorrupt { .. }
            | Self::FileWrite { .. }
            | Self::FileRead { .. }
            | Self::LockPoisoned => ErrorCategory::Internal,
        }
    }
}
