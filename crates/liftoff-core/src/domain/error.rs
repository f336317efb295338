// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (they are carried inside node-context wrappers)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid directory tree: {0}")]
    InvalidTree(String),

    #[error("Invalid project configuration: {0}")]
    InvalidConfiguration(String),

    #[error("Invalid project name '{name}': {reason}")]
    InvalidProjectName { name: String, reason: String },

    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path leaves the project through '..': {path}")]
    PathTraversal { path: String },

    #[error("'{raw}' rendered to '{rendered}', which is not a single name: {reason}")]
    InvalidSegment {
        raw: String,
        rendered: String,
        reason: &'static str,
    },

    // ========================================================================
    // Settings Errors
    // ========================================================================
    #[error("Invalid settings in {origin}: {reason}")]
    InvalidSettings { origin: String, reason: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidTree(msg) => vec![
                "Check the `directories` section of your .liftoffrc".into(),
                "Directories are mappings, files are plain strings".into(),
                format!("Details: {}", msg),
            ],
            Self::InvalidProjectName { name, .. } => vec![
                format!("'{}' cannot be used as a project name", name),
                "Use letters, digits, spaces, hyphens, and underscores".into(),
            ],
            Self::AbsolutePathNotAllowed { path } | Self::PathTraversal { path } => vec![
                format!("'{}' would be written outside the project", path),
                "Paths in the tree are relative to the output directory".into(),
            ],
            Self::InvalidSegment { raw, .. } => vec![
                format!("Check the bindings used by '{}'", raw),
                "Directory and file names must render to one segment without '/' or '\\'"
                    .into(),
            ],
            Self::InvalidSettings { origin, .. } => vec![
                format!("Fix or remove {}", origin),
                "Settings files are YAML mappings".into(),
            ],
            Self::MissingRequiredField { field } => {
                vec![format!("Provide a value for '{}'", field)]
            }
            _ => vec!["See documentation for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidTree(_)
            | Self::InvalidConfiguration(_)
            | Self::InvalidProjectName { .. }
            | Self::AbsolutePathNotAllowed { .. }
            | Self::PathTraversal { .. }
            | Self::InvalidSegment { .. }
            | Self::MissingRequiredField { .. } => ErrorCategory::Validation,
            Self::InvalidSettings { .. } => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    NotFound,
    Internal,
}
