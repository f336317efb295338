//! Application layer for Liftoff.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (ProjectBuilder, ApplicationTarget)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer. Naming, tree and
//! configuration rules live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;

pub use services::{ApplicationTarget, ProjectBuilder, ProjectSummary};

// Re-export port traits (for adapter implementation)
pub use ports::{Filesystem, ProjectModel, TemplateMaterializer, TemplateRenderer};

pub use error::ApplicationError;
