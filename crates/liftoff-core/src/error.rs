//! Unified error handling for Liftoff Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with node context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::{DomainError, RelativePath};

pub use crate::domain::ErrorCategory;

/// Root error type for Liftoff Core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LiftoffError {
    /// Errors from the domain layer (business rule violations).
    #[error("{0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (orchestration and port failures).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// An error raised while processing one node of the directory tree.
    #[error("at '{path}': {source}")]
    AtNode {
        path: String,
        #[source]
        source: Box<LiftoffError>,
    },

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl LiftoffError {
    /// Attach the path of the tree node being processed.
    ///
    /// The innermost path wins: an error that already carries node context is
    /// returned unchanged. So is any error at the tree root.
    pub fn at_node(self, path: &RelativePath) -> Self {
        match self {
            Self::AtNode { .. } => self,
            other if path.is_root() => other,
            other => Self::AtNode {
                path: path.to_slash_string(),
                source: Box::new(other),
            },
        }
    }

    /// The error without any node context.
    pub fn root_cause(&self) -> &LiftoffError {
        match self {
            Self::AtNode { source, .. } => source.root_cause(),
            other => other,
        }
    }

    /// Path of the node that failed, when known.
    pub fn node_path(&self) -> Option<&str> {
        match self {
            Self::AtNode { path, .. } => Some(path),
            _ => None,
        }
    }

    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::AtNode { source, .. } => source.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in Liftoff".into(),
                "Please report it with the output of `liftoff -vv`".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => e.category(),
            Self::Application(e) => e.category(),
            Self::AtNode { source, .. } => source.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Convenient result type alias.
pub type LiftoffResult<T> = Result<T, LiftoffError>;

/// Extension trait for attaching node context to results.
pub trait NodeContext<T> {
    fn at_node(self, path: &RelativePath) -> LiftoffResult<T>;
}

impl<T, E> NodeContext<T> for Result<T, E>
where
    E: Into<LiftoffError>,
{
    fn at_node(self, path: &RelativePath) -> LiftoffResult<T> {
        self.map_err(|e| e.into().at_node(path))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_node_keeps_innermost_path() {
        let inner = RelativePath::try_new("Sources/Models").unwrap();
        let outer = RelativePath::try_new("Sources").unwrap();

        let err = LiftoffError::from(ApplicationError::TemplateNotFound {
            id: "Model.m".into(),
        })
        .at_node(&inner)
        .at_node(&outer);

        assert_eq!(err.node_path(), Some("Sources/Models"));
        assert!(matches!(
            err.root_cause(),
            LiftoffError::Application(ApplicationError::TemplateNotFound { .. })
        ));
        assert_eq!(err.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn root_adds_no_context() {
        let err = LiftoffError::from(ApplicationError::project_model("boom"))
            .at_node(&RelativePath::root());
        assert_eq!(err.node_path(), None);
        assert_eq!(err.to_string(), "Project model error: boom");
    }

    #[test]
    fn display_includes_node_path() {
        let path = RelativePath::try_new("Resources").unwrap();
        let err: LiftoffResult<()> =
            Err(ApplicationError::rendering("<%= nope %>", "undefined value")).at_node(&path);
        let msg = err.unwrap_err().to_string();
        assert!(msg.starts_with("at 'Resources': "));
        assert!(msg.contains("undefined value"));
    }
}
