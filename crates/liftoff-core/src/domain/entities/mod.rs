pub mod common;
pub mod configuration;
pub mod plan;
pub mod render_context;
pub mod spec_tree;

pub use crate::domain::DomainError;
pub use common::RelativePath;
pub use configuration::{ProjectConfiguration, ProjectConfigurationBuilder};
pub use plan::{PlannedEntry, ProjectPlan};
pub use render_context::RenderContext;
pub use spec_tree::{SpecificationTree, TreeNode};
