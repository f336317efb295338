//! Application services - orchestrate use cases.
//!
//! `ProjectBuilder` coordinates the domain layer and the ports to turn a
//! project configuration into files on disk and a saved project descriptor.

pub mod application_target;
pub mod project_builder;

pub use application_target::{ApplicationTarget, DEPLOYMENT_TARGET};
pub use project_builder::{
    DIRECTORY_MARKER, ProjectBuilder, ProjectSummary, build_settings_for, is_compiled_source,
};
