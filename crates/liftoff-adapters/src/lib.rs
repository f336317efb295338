//! Infrastructure adapters for Liftoff.
//!
//! This crate implements the ports defined in `liftoff-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod builtin_templates;
pub mod filesystem;
pub mod project_model;
pub mod renderer;
pub mod settings;
pub mod template_library;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use project_model::XcodeProject;
pub use renderer::ErbRenderer;
pub use settings::{LiftoffSettings, SettingsLoader, SettingsLocation};
pub use template_library::{TemplateEntry, TemplateLibrary, TemplateOrigin};
