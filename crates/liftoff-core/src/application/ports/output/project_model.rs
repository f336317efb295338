//! Port for the in-memory project descriptor (groups, files, targets and
//! build configurations) that is persisted once at the end of a run.

use std::fmt;
use std::path::PathBuf;

use crate::error::LiftoffResult;

macro_rules! object_ref {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub struct $name(String);

        impl $name {
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

object_ref!(
    /// Handle to a group (folder) in the project model.
    GroupRef
);
object_ref!(
    /// Handle to a file reference in the project model.
    FileRef
);
object_ref!(
    /// Handle to a build target.
    TargetRef
);
object_ref!(
    /// Handle to one build configuration (e.g. Debug) of a target.
    ConfigurationRef
);

/// Platform a target is built for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Platform {
    Ios,
}

impl Platform {
    pub fn sdk_root(self) -> &'static str {
        match self {
            Self::Ios => "iphoneos",
        }
    }

    /// Build setting that carries the deployment target for this platform.
    pub fn deployment_target_key(self) -> &'static str {
        match self {
            Self::Ios => "IPHONEOS_DEPLOYMENT_TARGET",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ios => f.write_str("ios"),
        }
    }
}

/// Port for the project descriptor.
///
/// Implemented by:
/// - `liftoff_adapters::project_model::XcodeProject`
///
/// Mutating methods take `&mut self`; a model belongs to exactly one run.
#[cfg_attr(test, mockall::automock)]
pub trait ProjectModel {
    /// The top-level group that mirrors the output root.
    fn root_group(&self) -> GroupRef;

    /// Set a string attribute on the project root object.
    fn set_root_attribute(&mut self, key: &str, value: &str) -> LiftoffResult<()>;

    /// Create a group under `parent`.
    fn new_group(&mut self, parent: &GroupRef, name: &str, path: &str) -> LiftoffResult<GroupRef>;

    /// Create a file reference inside `group`.
    fn new_file(&mut self, group: &GroupRef, name: &str) -> LiftoffResult<FileRef>;

    /// Create an application target with its default build configurations.
    fn new_application_target(
        &mut self,
        name: &str,
        platform: Platform,
        deployment_target: &str,
    ) -> LiftoffResult<TargetRef>;

    /// Add files to the target's sources build phase.
    fn add_file_references(&mut self, target: &TargetRef, files: &[FileRef]) -> LiftoffResult<()>;

    /// All build configurations of `target`, in declaration order.
    fn build_configurations(&self, target: &TargetRef) -> LiftoffResult<Vec<ConfigurationRef>>;

    fn set_build_setting(
        &mut self,
        configuration: &ConfigurationRef,
        key: &str,
        value: &str,
    ) -> LiftoffResult<()>;

    /// Persist the model. Returns the path of the written descriptor.
    fn save(&mut self) -> LiftoffResult<PathBuf>;
}
