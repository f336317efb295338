//! Liftoff Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for the Liftoff
//! project scaffolder, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           liftoff-cli (CLI)             │
//! │   (settings, prompts, output, exit)     │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (ProjectBuilder, ApplicationTarget)   │
//! │      Walks the tree, links files        │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Filesystem, Renderer, Materializer,    │
//! │  ProjectModel)                          │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    liftoff-adapters (Infrastructure)    │
//! │ (LocalFilesystem, ErbRenderer,          │
//! │  TemplateLibrary, XcodeProject)         │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (SpecificationTree, ProjectConfiguration│
//! │  RenderContext, ProjectPlan)            │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use liftoff_core::prelude::*;
//!
//! let config = ProjectConfiguration::builder("Weather")
//!     .prefix("WX")
//!     .company("Acme")
//!     .tree(tree)
//!     .build()?;
//!
//! let builder = ProjectBuilder::new(renderer, filesystem, materializer);
//! let summary = builder.create_project(&config, &mut project_model)?;
//! ```

pub mod application;
pub mod domain;
pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, ApplicationTarget, ProjectBuilder, ProjectSummary,
        ports::{
            ConfigurationRef, FileRef, Filesystem, GroupRef, Platform, ProjectModel, TargetRef,
            TemplateMaterializer, TemplateRenderer,
        },
    };
    pub use crate::domain::{
        DomainError, ProjectConfiguration, ProjectPlan, RelativePath, RenderContext,
        SpecificationTree, TreeNode,
    };
    pub use crate::error::{ErrorCategory, LiftoffError, LiftoffResult};
}

// Version info
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
