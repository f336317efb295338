use tracing::debug;

use crate::application::ports::{FileRef, Platform, ProjectModel, TargetRef};
use crate::error::LiftoffResult;

/// Deployment target of every generated application.
pub const DEPLOYMENT_TARGET: &str = "7.0";

/// The single build target of a scaffolded application.
///
/// Holds the handle returned by the project model. All operations go back
/// through the model passed in, so the target never outlives its run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationTarget {
    name: String,
    handle: TargetRef,
}

impl ApplicationTarget {
    /// Create the target in `model` for iOS at [`DEPLOYMENT_TARGET`].
    pub fn create(model: &mut dyn ProjectModel, name: &str) -> LiftoffResult<Self> {
        let handle = model.new_application_target(name, Platform::Ios, DEPLOYMENT_TARGET)?;
        debug!(target_name = name, handle = %handle, "Application target created");
        Ok(Self {
            name: name.to_string(),
            handle,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn handle(&self) -> &TargetRef {
        &self.handle
    }

    /// Add files to the target's compiled sources.
    pub fn add_sources(&self, model: &mut dyn ProjectModel, files: &[FileRef]) -> LiftoffResult<()> {
        model.add_file_references(&self.handle, files)
    }

    /// Set `key = value` on every build configuration of the target.
    pub fn set_build_setting_for_all_configurations(
        &self,
        model: &mut dyn ProjectModel,
        key: &str,
        value: &str,
    ) -> LiftoffResult<()> {
        let configurations = model.build_configurations(&self.handle)?;
        for configuration in &configurations {
            model.set_build_setting(configuration, key, value)?;
        }
        debug!(
            key,
            value,
            configurations = configurations.len(),
            "Build setting applied"
        );
        Ok(())
    }
}
