// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid package specification: {0}")]
    InvalidSpec(String),

    #[error("Duplicate output path in template mapping: {path}")]
    DuplicatePath { path: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    // ========================================================================
    // Not Found Errors
    // ========================================================================
    #[error("Unknown provider '{selector}'")]
    UnknownProvider { selector: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidSpec(msg) => vec![
                "Check the package name and options".into(),
                format!("Details: {msg}"),
            ],
            Self::UnknownProvider { selector } => {
                let mut out = vec![format!("'{selector}' is not a known language or CI provider")];
                out.push(format!(
                    "Known providers: {}",
                    crate::domain::providers::PROVIDER_REGISTRY
                        .iter()
                        .map(|def| def.tag)
                        .collect::<Vec<_>>()
                        .join(", ")
                ));
                out.push("Try: cradle list".into());
                out
            }
            Self::DuplicatePath { path } => vec![
                format!("Two templates write to '{path}'"),
                "Please report this issue or use a different template directory".into(),
            ],
            Self::AbsolutePathNotAllowed { .. } => {
                vec!["Template output paths must be relative to the package root".into()]
            }
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidSpec(_) => ErrorCategory::Validation,
            Self::UnknownProvider { .. } => ErrorCategory::NotFound,
            Self::DuplicatePath { .. } | Self::AbsolutePathNotAllowed { .. } => {
                ErrorCategory::Internal
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Internal,
}
