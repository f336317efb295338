//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the driven ports,
//! not business rules. Business rule violations are `DomainError` from
//! `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while a project is being built.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ApplicationError {
    /// A name or file body could not be rendered.
    #[error("Failed to render '{template}': {reason}")]
    RenderingFailed { template: String, reason: String },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The project model rejected an operation or could not be saved.
    #[error("Project model error: {reason}")]
    ProjectModel { reason: String },

    /// No template resource exists for the given id.
    #[error("Template not found: {id}")]
    TemplateNotFound { id: String },

    /// The project descriptor already exists at the output location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },
}

impl ApplicationError {
    pub fn rendering(template: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RenderingFailed {
            template: template.into(),
            reason: reason.into(),
        }
    }

    pub fn project_model(reason: impl Into<String>) -> Self {
        Self::ProjectModel {
            reason: reason.into(),
        }
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::RenderingFailed { template, .. } => vec![
                format!("Check the placeholders in '{}'", template),
                "Placeholders use <%= name %>; custom values go under `bindings`".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::TemplateNotFound { id } => vec![
                format!("No template named '{}' was found", id),
                "Run `liftoff templates` to see what is available".into(),
                "Add it to ~/.liftoff/templates or pass --template-dir".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Already present: {}", path.display()),
                "Use --force to generate over it".into(),
                "Or choose a different project name".into(),
            ],
            Self::ProjectModel { .. } => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::RenderingFailed { .. } => ErrorCategory::Validation,
            Self::TemplateNotFound { .. } => ErrorCategory::NotFound,
            Self::ProjectExists { .. } => ErrorCategory::Validation,
            Self::FilesystemError { .. } | Self::ProjectModel { .. } => ErrorCategory::Internal,
        }
    }
}
