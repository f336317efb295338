//! In-memory Xcode project persisted as `<name>.xcodeproj/project.pbxproj`.

use std::path::PathBuf;

use indexmap::IndexMap;
use tracing::{debug, info, instrument};
use uuid::Uuid;

use liftoff_core::{
    application::{
        ApplicationError,
        ports::{
            ConfigurationRef, FileRef, Filesystem, GroupRef, Platform, ProjectModel, TargetRef,
        },
    },
    error::LiftoffResult,
};

use super::objects::{FileReference, Group, NativeTarget, PbxObject, file_type_for};

pub const PBXPROJ_FILE_NAME: &str = "project.pbxproj";

const CONFIGURATION_NAMES: [&str; 2] = ["Debug", "Release"];

/// Xcode project model.
///
/// Objects are kept in creation order; the written file groups them by
/// `isa` and preserves that order inside each section.
pub struct XcodeProject {
    pub(super) name: String,
    output_root: PathBuf,
    filesystem: Box<dyn Filesystem>,
    pub(super) objects: IndexMap<String, PbxObject>,
    pub(super) project_id: String,
    pub(super) main_group: String,
    pub(super) products_group: Option<String>,
    pub(super) configuration_list: String,
    pub(super) targets: Vec<String>,
    pub(super) attributes: IndexMap<String, String>,
}

impl XcodeProject {
    /// Create an empty project named `name`, saved under `output_root`.
    pub fn new(
        name: impl Into<String>,
        output_root: impl Into<PathBuf>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        let mut project = Self {
            name: name.into(),
            output_root: output_root.into(),
            filesystem,
            objects: IndexMap::new(),
            project_id: String::new(),
            main_group: String::new(),
            products_group: None,
            configuration_list: String::new(),
            targets: Vec::new(),
            attributes: IndexMap::new(),
        };

        project.project_id = project.next_id();
        project.main_group = project.insert(PbxObject::Group(Group {
            name: None,
            path: None,
            children: Vec::new(),
        }));

        let project_configurations = CONFIGURATION_NAMES
            .iter()
            .map(|name| {
                let mut settings = IndexMap::new();
                settings.insert("ALWAYS_SEARCH_USER_PATHS".to_string(), "NO".to_string());
                settings.insert("CLANG_ENABLE_OBJC_ARC".to_string(), "YES".to_string());
                if *name == "Debug" {
                    settings.insert("ONLY_ACTIVE_ARCH".to_string(), "YES".to_string());
                }
                project.insert(PbxObject::BuildConfiguration {
                    name: name.to_string(),
                    settings,
                })
            })
            .collect();
        let owner = format!("PBXProject \"{}\"", project.name);
        project.configuration_list = project.insert(PbxObject::ConfigurationList {
            configurations: project_configurations,
            default_name: "Release".to_string(),
            owner,
        });

        project
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the `.xcodeproj` bundle directory.
    pub fn bundle_path(&self) -> PathBuf {
        self.output_root.join(format!("{}.xcodeproj", self.name))
    }

    /// Path `save` writes to.
    pub fn descriptor_path(&self) -> PathBuf {
        self.bundle_path().join(PBXPROJ_FILE_NAME)
    }

    pub fn root_attribute(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Native targets, in creation order.
    pub fn targets(&self) -> Vec<TargetRef> {
        self.targets.iter().cloned().map(TargetRef::new).collect()
    }

    /// Display names of the children of `group`, in order.
    pub fn child_names(&self, group: &GroupRef) -> Vec<String> {
        match self.objects.get(group.as_str()) {
            Some(PbxObject::Group(g)) => g
                .children
                .iter()
                .filter_map(|id| self.display_name(id))
                .collect(),
            _ => Vec::new(),
        }
    }

    /// Find a direct child group of `parent` by name.
    pub fn find_group(&self, parent: &GroupRef, name: &str) -> Option<GroupRef> {
        self.child_group_id(parent.as_str(), name).map(GroupRef::new)
    }

    /// File names in the target's sources build phase.
    pub fn source_files(&self, target: &TargetRef) -> Vec<String> {
        let Some(PbxObject::NativeTarget(t)) = self.objects.get(target.as_str()) else {
            return Vec::new();
        };
        let Some(PbxObject::SourcesBuildPhase { files }) = self.objects.get(&t.sources_phase)
        else {
            return Vec::new();
        };
        files
            .iter()
            .filter_map(|build_file| match self.objects.get(build_file) {
                Some(PbxObject::BuildFile { file_ref }) => self.display_name(file_ref),
                _ => None,
            })
            .collect()
    }

    pub fn build_setting(&self, configuration: &ConfigurationRef, key: &str) -> Option<&str> {
        match self.objects.get(configuration.as_str()) {
            Some(PbxObject::BuildConfiguration { settings, .. }) => {
                settings.get(key).map(String::as_str)
            }
            _ => None,
        }
    }

    pub fn configuration_name(&self, configuration: &ConfigurationRef) -> Option<&str> {
        match self.objects.get(configuration.as_str()) {
            Some(PbxObject::BuildConfiguration { name, .. }) => Some(name),
            _ => None,
        }
    }

    // -------------------------------------------------------------------------
    // Internal Helpers
    // -------------------------------------------------------------------------

    /// Fresh 24-digit uppercase hex object id.
    fn next_id(&self) -> String {
        loop {
            let id = Uuid::new_v4().simple().to_string()[..24].to_uppercase();
            if !self.objects.contains_key(&id) && id != self.project_id {
                return id;
            }
        }
    }

    fn insert(&mut self, object: PbxObject) -> String {
        let id = self.next_id();
        self.objects.insert(id.clone(), object);
        id
    }

    pub(super) fn display_name(&self, id: &str) -> Option<String> {
        match self.objects.get(id)? {
            PbxObject::Group(g) => g.name.clone().or_else(|| g.path.clone()),
            PbxObject::FileReference(f) => Some(f.path.clone()),
            PbxObject::NativeTarget(t) => Some(t.name.clone()),
            PbxObject::BuildConfiguration { name, .. } => Some(name.clone()),
            PbxObject::SourcesBuildPhase { .. } => Some("Sources".to_string()),
            PbxObject::BuildFile { file_ref } => {
                self.display_name(file_ref).map(|n| format!("{n} in Sources"))
            }
            PbxObject::ConfigurationList { owner, .. } => {
                Some(format!("Build configuration list for {owner}"))
            }
        }
    }

    fn group_mut(&mut self, id: &str) -> LiftoffResult<&mut Group> {
        match self.objects.get_mut(id) {
            Some(PbxObject::Group(group)) => Ok(group),
            _ => Err(ApplicationError::project_model(format!("unknown group '{id}'")).into()),
        }
    }

    fn target(&self, id: &str) -> LiftoffResult<&NativeTarget> {
        match self.objects.get(id) {
            Some(PbxObject::NativeTarget(target)) => Ok(target),
            _ => Err(ApplicationError::project_model(format!("unknown target '{id}'")).into()),
        }
    }

    fn child_group_id(&self, parent: &str, name: &str) -> Option<String> {
        let Some(PbxObject::Group(group)) = self.objects.get(parent) else {
            return None;
        };
        group
            .children
            .iter()
            .find(|id| {
                matches!(
                    self.objects.get(id.as_str()),
                    Some(PbxObject::Group(g)) if g.name.as_deref() == Some(name)
                )
            })
            .cloned()
    }

    fn ensure_products_group(&mut self) -> String {
        if let Some(id) = &self.products_group {
            return id.clone();
        }
        let id = self.insert(PbxObject::Group(Group {
            name: Some("Products".to_string()),
            path: None,
            children: Vec::new(),
        }));
        self.products_group = Some(id.clone());
        id
    }
}

impl ProjectModel for XcodeProject {
    fn root_group(&self) -> GroupRef {
        GroupRef::new(self.main_group.clone())
    }

    fn set_root_attribute(&mut self, key: &str, value: &str) -> LiftoffResult<()> {
        self.attributes.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn new_group(&mut self, parent: &GroupRef, name: &str, path: &str) -> LiftoffResult<GroupRef> {
        self.group_mut(parent.as_str())?;
        if self.child_group_id(parent.as_str(), name).is_some() {
            return Err(ApplicationError::project_model(format!(
                "group '{name}' already exists in its parent"
            ))
            .into());
        }

        let id = self.insert(PbxObject::Group(Group {
            name: Some(name.to_string()),
            path: Some(path.to_string()),
            children: Vec::new(),
        }));
        self.group_mut(parent.as_str())?.children.push(id.clone());
        debug!(group = name, id = %id, "PBXGroup added");
        Ok(GroupRef::new(id))
    }

    fn new_file(&mut self, group: &GroupRef, name: &str) -> LiftoffResult<FileRef> {
        self.group_mut(group.as_str())?;
        let id = self.insert(PbxObject::FileReference(FileReference {
            path: name.to_string(),
            file_type: file_type_for(name),
            product: false,
        }));
        self.group_mut(group.as_str())?.children.push(id.clone());
        debug!(file = name, id = %id, "PBXFileReference added");
        Ok(FileRef::new(id))
    }

    fn new_application_target(
        &mut self,
        name: &str,
        platform: Platform,
        deployment_target: &str,
    ) -> LiftoffResult<TargetRef> {
        let duplicate = self
            .targets
            .iter()
            .any(|id| matches!(self.objects.get(id), Some(PbxObject::NativeTarget(t)) if t.name == name));
        if duplicate {
            return Err(
                ApplicationError::project_model(format!("target '{name}' already exists")).into(),
            );
        }

        let configurations = CONFIGURATION_NAMES
            .iter()
            .map(|config_name| {
                let mut settings = IndexMap::new();
                settings.insert("SDKROOT".to_string(), platform.sdk_root().to_string());
                settings.insert(
                    platform.deployment_target_key().to_string(),
                    deployment_target.to_string(),
                );
                settings.insert("PRODUCT_NAME".to_string(), "$(TARGET_NAME)".to_string());
                settings.insert("WRAPPER_EXTENSION".to_string(), "app".to_string());
                self.insert(PbxObject::BuildConfiguration {
                    name: config_name.to_string(),
                    settings,
                })
            })
            .collect();
        let build_configuration_list = self.insert(PbxObject::ConfigurationList {
            configurations,
            default_name: "Release".to_string(),
            owner: format!("PBXNativeTarget \"{name}\""),
        });

        let sources_phase = self.insert(PbxObject::SourcesBuildPhase { files: Vec::new() });

        let products = self.ensure_products_group();
        let product_reference = self.insert(PbxObject::FileReference(FileReference {
            path: format!("{name}.app"),
            file_type: file_type_for("app.app"),
            product: true,
        }));
        self.group_mut(&products)?
            .children
            .push(product_reference.clone());

        let id = self.insert(PbxObject::NativeTarget(NativeTarget {
            name: name.to_string(),
            build_configuration_list,
            sources_phase,
            product_reference,
        }));
        self.targets.push(id.clone());

        info!(target_name = name, %platform, deployment_target, "PBXNativeTarget added");
        Ok(TargetRef::new(id))
    }

    fn add_file_references(&mut self, target: &TargetRef, files: &[FileRef]) -> LiftoffResult<()> {
        let phase = self.target(target.as_str())?.sources_phase.clone();

        for file in files {
            if !matches!(self.objects.get(file.as_str()), Some(PbxObject::FileReference(_))) {
                return Err(ApplicationError::project_model(format!(
                    "unknown file reference '{file}'"
                ))
                .into());
            }
            let build_file = self.insert(PbxObject::BuildFile {
                file_ref: file.as_str().to_string(),
            });
            if let Some(PbxObject::SourcesBuildPhase { files }) = self.objects.get_mut(&phase) {
                files.push(build_file);
            }
        }
        Ok(())
    }

    fn build_configurations(&self, target: &TargetRef) -> LiftoffResult<Vec<ConfigurationRef>> {
        let list = &self.target(target.as_str())?.build_configuration_list;
        match self.objects.get(list) {
            Some(PbxObject::ConfigurationList { configurations, .. }) => Ok(configurations
                .iter()
                .map(|id| ConfigurationRef::new(id.clone()))
                .collect()),
            _ => Err(ApplicationError::project_model(format!(
                "target '{target}' has no configuration list"
            ))
            .into()),
        }
    }

    fn set_build_setting(
        &mut self,
        configuration: &ConfigurationRef,
        key: &str,
        value: &str,
    ) -> LiftoffResult<()> {
        match self.objects.get_mut(configuration.as_str()) {
            Some(PbxObject::BuildConfiguration { settings, .. }) => {
                settings.insert(key.to_string(), value.to_string());
                Ok(())
            }
            _ => Err(ApplicationError::project_model(format!(
                "unknown build configuration '{configuration}'"
            ))
            .into()),
        }
    }

    #[instrument(skip(self), fields(project = %self.name))]
    fn save(&mut self) -> LiftoffResult<PathBuf> {
        let bundle = self.bundle_path();
        let descriptor = bundle.join(PBXPROJ_FILE_NAME);
        let contents = self.to_pbxproj();

        self.filesystem.create_dir_all(&bundle)?;
        self.filesystem.write_file(&descriptor, &contents)?;

        info!(
            path = %descriptor.display(),
            objects = self.objects.len(),
            "Project descriptor saved"
        );
        Ok(descriptor)
    }
}
