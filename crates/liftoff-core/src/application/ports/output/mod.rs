//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `liftoff-adapters` crate provides implementations.

mod project_model;

pub use project_model::{
    ConfigurationRef, FileRef, GroupRef, Platform, ProjectModel, TargetRef,
};
#[cfg(test)]
pub use project_model::MockProjectModel;

use crate::domain::RenderContext;
use crate::error::LiftoffResult;
use std::path::{Path, PathBuf};

/// Port for filesystem operations.
///
/// Implemented by:
/// - `liftoff_adapters::filesystem::LocalFilesystem` (production)
/// - `liftoff_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, mockall::automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories. Succeeds if it exists.
    fn create_dir_all(&self, path: &Path) -> LiftoffResult<()>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> LiftoffResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Contents of the file at `path`, or `None` when there is no file there.
    fn read_to_string(&self, path: &Path) -> LiftoffResult<Option<String>>;

    /// Every file below `dir`, at any depth, sorted by path.
    /// A missing directory has no files.
    fn list_files(&self, dir: &Path) -> LiftoffResult<Vec<PathBuf>>;
}

/// Port for placeholder expansion.
///
/// Implemented by:
/// - `liftoff_adapters::renderer::ErbRenderer`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateRenderer: Send + Sync {
    /// Expand every placeholder in `raw` using `context`.
    ///
    /// Text without placeholders comes back unchanged.
    fn render(&self, raw: &str, context: &RenderContext) -> LiftoffResult<String>;
}

/// Port that turns a named template into a file on disk.
///
/// Implemented by:
/// - `liftoff_adapters::template_library::TemplateLibrary`
#[cfg_attr(test, mockall::automock)]
pub trait TemplateMaterializer: Send + Sync {
    /// Write the rendered contents of `template_id` to `destination`.
    ///
    /// `template_id` is the raw, unrendered leaf name from the tree.
    fn generate(
        &self,
        template_id: &str,
        destination: &Path,
        context: &RenderContext,
    ) -> LiftoffResult<()>;
}
