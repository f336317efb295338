//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `liftoff-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: directory and file creation
//!   - `TemplateRenderer`: placeholder expansion
//!   - `TemplateMaterializer`: template resource to file
//!   - `ProjectModel`: the project descriptor
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (`ProjectBuilder` is called directly by the CLI)

pub mod output;

pub use output::{
    ConfigurationRef, FileRef, Filesystem, GroupRef, Platform, ProjectModel, TargetRef,
    TemplateMaterializer, TemplateRenderer,
};
