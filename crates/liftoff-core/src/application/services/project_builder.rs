//! Project Builder - main application orchestrator.
//!
//! Walks the specification tree depth-first and, for every node:
//! 1. renders its name against the project's bindings
//! 2. creates the directory (with a `.gitkeep` marker) or materializes the file
//! 3. mirrors it into the project model as a group or file reference
//!
//! Files are then linked to the application target according to their suffix.
//! The project model is saved exactly once, after the whole walk succeeded.

use std::path::{Path, PathBuf};

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, GroupRef, ProjectModel, TemplateMaterializer, TemplateRenderer},
        services::application_target::ApplicationTarget,
    },
    domain::{
        DomainValidator as validator, ProjectConfiguration, ProjectPlan, RelativePath,
        RenderContext, TreeNode,
    },
    error::{LiftoffResult, NodeContext},
};

/// Name of the empty marker written into every generated directory.
pub const DIRECTORY_MARKER: &str = ".gitkeep";

pub const CLASS_PREFIX_ATTRIBUTE: &str = "CLASSPREFIX";
pub const ORGANIZATION_ATTRIBUTE: &str = "ORGANIZATIONNAME";
pub const INFO_PLIST_SETTING: &str = "INFOPLIST_FILE";
pub const PREFIX_HEADER_SETTING: &str = "GCC_PREFIX_HEADER";

/// Whether a rendered file name belongs in the target's compiled sources.
///
/// Headers and property lists are excluded. The check is a plain suffix
/// match, so any name ending in `h` is treated as a header.
pub fn is_compiled_source(file_name: &str) -> bool {
    !(file_name.ends_with("h") || file_name.ends_with("plist"))
}

/// Build settings that must point at a file with this rendered name.
///
/// Each suffix is checked on its own; none excludes another.
pub fn build_settings_for(file_name: &str) -> Vec<&'static str> {
    let mut settings = Vec::new();
    if file_name.ends_with("plist") {
        settings.push(INFO_PLIST_SETTING);
    }
    if file_name.ends_with("pch") {
        settings.push(PREFIX_HEADER_SETTING);
    }
    settings
}

/// Outcome of a successful run, for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectSummary {
    pub project_name: String,
    pub target_name: String,
    pub descriptor_path: PathBuf,
    pub directories_created: usize,
    pub files_generated: usize,
    pub compiled_sources: usize,
}

/// Main scaffolding service.
pub struct ProjectBuilder {
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
    materializer: Box<dyn TemplateMaterializer>,
    output_root: PathBuf,
}

impl ProjectBuilder {
    /// Create a builder writing under the current working directory.
    pub fn new(
        renderer: Box<dyn TemplateRenderer>,
        filesystem: Box<dyn Filesystem>,
        materializer: Box<dyn TemplateMaterializer>,
    ) -> Self {
        Self {
            renderer,
            filesystem,
            materializer,
            output_root: PathBuf::new(),
        }
    }

    /// Resolve every generated path under `root` instead of the working directory.
    pub fn with_output_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.output_root = root.into();
        self
    }

    pub fn output_root(&self) -> &Path {
        &self.output_root
    }

    /// Where the project descriptor for `configuration` will be written.
    pub fn descriptor_path(&self, configuration: &ProjectConfiguration) -> PathBuf {
        self.output_root.join(configuration.descriptor_file_name())
    }

    /// Fail if a project descriptor for `configuration` already exists.
    pub fn ensure_fresh(&self, configuration: &ProjectConfiguration) -> LiftoffResult<()> {
        let path = self.descriptor_path(configuration);
        if self.filesystem.exists(&path) {
            return Err(ApplicationError::ProjectExists { path }.into());
        }
        Ok(())
    }

    /// Scaffold the project described by `configuration` into `model` and disk.
    ///
    /// Aborts on the first failure; whatever was already written stays on
    /// disk and the model is not saved.
    #[instrument(
        skip_all,
        fields(
            project = %configuration.name(),
            output_root = %self.output_root.display()
        )
    )]
    pub fn create_project(
        &self,
        configuration: &ProjectConfiguration,
        model: &mut dyn ProjectModel,
    ) -> LiftoffResult<ProjectSummary> {
        info!("Creating project");

        validator::validate_configuration(configuration)?;
        let context = configuration.render_context();

        let target = ApplicationTarget::create(model, configuration.name())?;
        model.set_root_attribute(CLASS_PREFIX_ATTRIBUTE, configuration.prefix())?;
        model.set_root_attribute(ORGANIZATION_ATTRIBUTE, configuration.company())?;

        let root_group = model.root_group();
        let mut run = BuildRun {
            builder: self,
            context,
            model,
            target,
            summary: ProjectSummary {
                project_name: configuration.name().to_string(),
                target_name: configuration.name().to_string(),
                ..Default::default()
            },
        };

        let root = RelativePath::root();
        for node in configuration.tree().nodes() {
            run.build_tree(node, &root, &root_group)?;
        }

        let descriptor = run.model.save()?;
        let summary = ProjectSummary {
            descriptor_path: descriptor,
            ..run.summary
        };

        info!(
            directories = summary.directories_created,
            files = summary.files_generated,
            sources = summary.compiled_sources,
            descriptor = %summary.descriptor_path.display(),
            "Project created"
        );
        Ok(summary)
    }

    /// Compute what [`create_project`](Self::create_project) would produce
    /// without touching disk or a project model.
    #[instrument(skip_all, fields(project = %configuration.name()))]
    pub fn plan(&self, configuration: &ProjectConfiguration) -> LiftoffResult<ProjectPlan> {
        validator::validate_configuration(configuration)?;
        let context = configuration.render_context();
        let mut plan = ProjectPlan::new();

        let root = RelativePath::root();
        for node in configuration.tree().nodes() {
            self.plan_node(node, &root, &context, &mut plan)?;
        }

        debug!(entries = plan.entry_count(), "Plan computed");
        Ok(plan)
    }

    fn plan_node(
        &self,
        node: &TreeNode,
        path: &RelativePath,
        context: &RenderContext,
        plan: &mut ProjectPlan,
    ) -> LiftoffResult<()> {
        match node {
            TreeNode::TemplateLeaf(raw) => {
                let resolved = self.render_segment(raw, context).at_node(path)?;
                let file_path = path.join(&resolved).at_node(path)?;
                if !path.is_root() {
                    plan.add_directory(path.clone());
                }
                plan.add_file(
                    file_path,
                    raw.as_str(),
                    is_compiled_source(&resolved),
                    build_settings_for(&resolved),
                );
            }
            TreeNode::DirectoryNode { name, .. } => {
                let rendered = self.render_segment(name, context).at_node(path)?;
                let child_path = path.join(&rendered).at_node(path)?;
                plan.add_directory(child_path.clone());
                for child in node.children() {
                    self.plan_node(child, &child_path, context, plan)?;
                }
            }
        }
        Ok(())
    }

    /// Render a directory or file name and check it is a usable path segment.
    fn render_segment(&self, raw: &str, context: &RenderContext) -> LiftoffResult<String> {
        let rendered = self.renderer.render(raw, context)?;
        validator::validate_segment(raw, &rendered)?;
        Ok(rendered)
    }
}

/// State of one `create_project` call.
struct BuildRun<'a> {
    builder: &'a ProjectBuilder,
    context: RenderContext,
    model: &'a mut dyn ProjectModel,
    target: ApplicationTarget,
    summary: ProjectSummary,
}

impl BuildRun<'_> {
    fn build_tree(
        &mut self,
        node: &TreeNode,
        path: &RelativePath,
        parent: &GroupRef,
    ) -> LiftoffResult<()> {
        match node {
            TreeNode::TemplateLeaf(raw) => {
                self.ensure_directory(path).at_node(path)?;
                self.link_file(raw, parent, path)
            }
            TreeNode::DirectoryNode { name, .. } => {
                let rendered = self
                    .builder
                    .render_segment(name, &self.context)
                    .at_node(path)?;
                let child_path = path.join(&rendered).at_node(path)?;

                self.ensure_directory(&child_path).at_node(&child_path)?;
                let group = self.create_group(&rendered, parent).at_node(&child_path)?;
                debug!(path = %child_path, group = %group, "Directory created");

                for child in node.children() {
                    self.build_tree(child, &child_path, &group)?;
                }
                Ok(())
            }
        }
    }

    /// Create `path` and its marker file. Safe to call repeatedly.
    ///
    /// The output root itself never receives a marker.
    fn ensure_directory(&mut self, path: &RelativePath) -> LiftoffResult<()> {
        let fs = &self.builder.filesystem;
        let full = self.builder.output_root.join(path.as_path());
        fs.create_dir_all(&full)?;

        if path.is_root() {
            return Ok(());
        }

        let marker = full.join(DIRECTORY_MARKER);
        if !fs.exists(&marker) {
            fs.write_file(&marker, "")?;
            self.summary.directories_created += 1;
        }
        Ok(())
    }

    fn create_group(&mut self, name: &str, parent: &GroupRef) -> LiftoffResult<GroupRef> {
        self.model.new_group(parent, name, name)
    }

    fn link_file(&mut self, raw: &str, parent: &GroupRef, path: &RelativePath) -> LiftoffResult<()> {
        let resolved = self
            .builder
            .render_segment(raw, &self.context)
            .at_node(path)?;
        let file_path = path.join(&resolved).at_node(path)?;
        let destination = self.builder.output_root.join(file_path.as_path());

        self.builder
            .materializer
            .generate(raw, &destination, &self.context)
            .at_node(&file_path)?;
        self.summary.files_generated += 1;

        let file = self
            .model
            .new_file(parent, &resolved)
            .at_node(&file_path)?;

        if is_compiled_source(&resolved) {
            self.target
                .add_sources(self.model, std::slice::from_ref(&file))
                .at_node(&file_path)?;
            self.summary.compiled_sources += 1;
        }

        let setting_value = file_path.to_slash_string();
        for key in build_settings_for(&resolved) {
            self.target
                .set_build_setting_for_all_configurations(self.model, key, &setting_value)
                .at_node(&file_path)?;
        }

        debug!(file = %file_path, template = raw, "File linked");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::ports::{
        ConfigurationRef, FileRef, Platform, TargetRef,
        output::{MockFilesystem, MockTemplateMaterializer},
    };
    use crate::domain::{DomainError, SpecificationTree, TreeNode};
    use crate::error::LiftoffError;
    use std::collections::BTreeMap;
    use std::sync::{Arc, Mutex};

    // ------------------------------------------------------------------------
    // Fakes
    // ------------------------------------------------------------------------

    /// Replaces `<%= key %>` and `<%=key%>` with bindings; fails on unknown keys.
    struct PlaceholderRenderer;

    impl TemplateRenderer for PlaceholderRenderer {
        fn render(&self, raw: &str, context: &RenderContext) -> LiftoffResult<String> {
            let mut out = String::new();
            let mut rest = raw;
            while let Some(start) = rest.find("<%=") {
                out.push_str(&rest[..start]);
                let after = &rest[start + 3..];
                let end = after
                    .find("%>")
                    .ok_or_else(|| ApplicationError::rendering(raw, "unclosed tag"))?;
                let key = after[..end].trim();
                let value = context
                    .get(key)
                    .ok_or_else(|| ApplicationError::rendering(raw, format!("undefined {key}")))?;
                out.push_str(value);
                rest = &after[end + 2..];
            }
            out.push_str(rest);
            Ok(out)
        }
    }

    #[derive(Clone, Default)]
    struct FakeFs {
        dirs: Arc<Mutex<Vec<PathBuf>>>,
        files: Arc<Mutex<BTreeMap<PathBuf, String>>>,
    }

    impl FakeFs {
        fn has_dir(&self, path: &str) -> bool {
            self.dirs.lock().unwrap().iter().any(|d| d == Path::new(path))
        }

        fn file_paths(&self) -> Vec<String> {
            self.files
                .lock()
                .unwrap()
                .keys()
                .map(|p| p.display().to_string())
                .collect()
        }
    }

    impl Filesystem for FakeFs {
        fn create_dir_all(&self, path: &Path) -> LiftoffResult<()> {
            let mut dirs = self.dirs.lock().unwrap();
            if !dirs.iter().any(|d| d == path) {
                dirs.push(path.to_path_buf());
            }
            Ok(())
        }

        fn write_file(&self, path: &Path, content: &str) -> LiftoffResult<()> {
            self.files
                .lock()
                .unwrap()
                .insert(path.to_path_buf(), content.to_string());
            Ok(())
        }

        fn exists(&self, path: &Path) -> bool {
            self.files.lock().unwrap().contains_key(path)
                || self.dirs.lock().unwrap().iter().any(|d| d == path)
        }

        fn read_to_string(&self, path: &Path) -> LiftoffResult<Option<String>> {
            Ok(self.files.lock().unwrap().get(path).cloned())
        }

        fn list_files(&self, dir: &Path) -> LiftoffResult<Vec<PathBuf>> {
            let files = self.files.lock().unwrap();
            Ok(files.keys().filter(|p| p.starts_with(dir)).cloned().collect())
        }
    }

    /// Writes the template id as file content.
    struct EchoMaterializer(FakeFs);

    impl TemplateMaterializer for EchoMaterializer {
        fn generate(
            &self,
            template_id: &str,
            destination: &Path,
            _context: &RenderContext,
        ) -> LiftoffResult<()> {
            self.0.write_file(destination, template_id)
        }
    }

    #[derive(Debug, Default)]
    struct RecordingProject {
        calls: Vec<String>,
        groups: Vec<(String, String, String)>,
        files: Vec<(String, String)>,
        sources: Vec<String>,
        settings: BTreeMap<(String, String), String>,
        attributes: BTreeMap<String, String>,
        saves: usize,
        next_id: usize,
    }

    impl RecordingProject {
        fn id(&mut self, prefix: &str) -> String {
            self.next_id += 1;
            format!("{prefix}{}", self.next_id)
        }

        fn setting(&self, config: &str, key: &str) -> Option<&str> {
            self.settings
                .get(&(config.to_string(), key.to_string()))
                .map(String::as_str)
        }
    }

    impl ProjectModel for RecordingProject {
        fn root_group(&self) -> GroupRef {
            GroupRef::new("ROOT")
        }

        fn set_root_attribute(&mut self, key: &str, value: &str) -> LiftoffResult<()> {
            self.calls.push(format!("attr {key}"));
            self.attributes.insert(key.into(), value.into());
            Ok(())
        }

        fn new_group(&mut self, parent: &GroupRef, name: &str, path: &str) -> LiftoffResult<GroupRef> {
            self.calls.push(format!("group {name}"));
            let id = self.id("G");
            self.groups
                .push((parent.as_str().into(), name.into(), path.into()));
            Ok(GroupRef::new(id))
        }

        fn new_file(&mut self, group: &GroupRef, name: &str) -> LiftoffResult<FileRef> {
            self.calls.push(format!("file {name}"));
            self.files.push((group.as_str().into(), name.into()));
            Ok(FileRef::new(name))
        }

        fn new_application_target(
            &mut self,
            name: &str,
            platform: Platform,
            deployment_target: &str,
        ) -> LiftoffResult<TargetRef> {
            self.calls
                .push(format!("target {name} {platform} {deployment_target}"));
            Ok(TargetRef::new("APP"))
        }

        fn add_file_references(&mut self, _target: &TargetRef, files: &[FileRef]) -> LiftoffResult<()> {
            self.sources
                .extend(files.iter().map(|f| f.as_str().to_string()));
            Ok(())
        }

        fn build_configurations(&self, _target: &TargetRef) -> LiftoffResult<Vec<ConfigurationRef>> {
            Ok(vec![
                ConfigurationRef::new("Debug"),
                ConfigurationRef::new("Release"),
            ])
        }

        fn set_build_setting(
            &mut self,
            configuration: &ConfigurationRef,
            key: &str,
            value: &str,
        ) -> LiftoffResult<()> {
            self.settings.insert(
                (configuration.as_str().into(), key.into()),
                value.into(),
            );
            Ok(())
        }

        fn save(&mut self) -> LiftoffResult<PathBuf> {
            self.calls.push("save".into());
            self.saves += 1;
            Ok(PathBuf::from("App.xcodeproj/project.pbxproj"))
        }
    }

    fn builder(fs: &FakeFs) -> ProjectBuilder {
        ProjectBuilder::new(
            Box::new(PlaceholderRenderer),
            Box::new(fs.clone()),
            Box::new(EchoMaterializer(fs.clone())),
        )
    }

    fn config(nodes: Vec<TreeNode>) -> ProjectConfiguration {
        ProjectConfiguration::builder("App")
            .prefix("ABC")
            .company("Acme")
            .tree(SpecificationTree::new(nodes))
            .build()
            .unwrap()
    }

    // ------------------------------------------------------------------------
    // Suffix rules
    // ------------------------------------------------------------------------

    #[test]
    fn suffix_rules_match_plain_endings() {
        assert!(is_compiled_source("main.m"));
        assert!(!is_compiled_source("App-Prefix.pch"));
        assert!(!is_compiled_source("AppDelegate.h"));
        assert!(!is_compiled_source("Info.plist"));
        // plain suffix match: anything ending in `h` counts as a header
        assert!(!is_compiled_source("build.sh"));

        assert_eq!(build_settings_for("Info.plist"), vec![INFO_PLIST_SETTING]);
        assert_eq!(build_settings_for("App-Prefix.pch"), vec![PREFIX_HEADER_SETTING]);
        assert!(build_settings_for("main.m").is_empty());
    }

    // ------------------------------------------------------------------------
    // Walk scenarios
    // ------------------------------------------------------------------------

    #[test]
    fn prefixed_sources_only_compile_implementation() {
        let fs = FakeFs::default();
        let mut model = RecordingProject::default();
        let cfg = config(vec![TreeNode::directory(
            "Sources",
            vec![
                TreeNode::leaf("AppDelegate.<%=prefix%>.h"),
                TreeNode::leaf("AppDelegate.<%=prefix%>.m"),
            ],
        )]);

        let summary = builder(&fs).create_project(&cfg, &mut model).unwrap();

        assert!(fs.has_dir("Sources"));
        assert_eq!(
            fs.file_paths(),
            [
                "Sources/.gitkeep",
                "Sources/AppDelegate.ABC.h",
                "Sources/AppDelegate.ABC.m",
            ]
        );
        assert_eq!(model.sources, ["AppDelegate.ABC.m"]);
        assert_eq!(
            model.groups,
            [("ROOT".into(), "Sources".into(), "Sources".into())]
        );
        assert_eq!(summary.files_generated, 2);
        assert_eq!(summary.compiled_sources, 1);
        assert_eq!(summary.directories_created, 1);
    }

    #[test]
    fn info_plist_sets_setting_on_every_configuration() {
        let fs = FakeFs::default();
        let mut model = RecordingProject::default();
        let cfg = config(vec![TreeNode::directory(
            "Resources",
            vec![TreeNode::leaf("Info.plist")],
        )]);

        builder(&fs).create_project(&cfg, &mut model).unwrap();

        for configuration in ["Debug", "Release"] {
            assert_eq!(
                model.setting(configuration, INFO_PLIST_SETTING),
                Some("Resources/Info.plist")
            );
        }
        assert!(model.sources.is_empty());
    }

    #[test]
    fn prefix_header_is_configured_but_not_compiled() {
        let fs = FakeFs::default();
        let mut model = RecordingProject::default();
        let cfg = config(vec![TreeNode::directory(
            "Supporting Files",
            vec![TreeNode::leaf("<%= project_name %>-Prefix.pch")],
        )]);

        builder(&fs).create_project(&cfg, &mut model).unwrap();

        assert_eq!(
            model.setting("Release", PREFIX_HEADER_SETTING),
            Some("Supporting Files/App-Prefix.pch")
        );
        assert!(model.sources.is_empty());
    }

    #[test]
    fn empty_directory_gets_marker_and_group_only() {
        let fs = FakeFs::default();
        let mut model = RecordingProject::default();
        let cfg = config(vec![TreeNode::empty_directory("Empty")]);

        builder(&fs).create_project(&cfg, &mut model).unwrap();

        assert_eq!(fs.file_paths(), ["Empty/.gitkeep"]);
        assert_eq!(model.groups.len(), 1);
        assert!(model.files.is_empty());
    }

    #[test]
    fn siblings_do_not_share_path_segments() {
        let fs = FakeFs::default();
        let mut model = RecordingProject::default();
        let cfg = config(vec![TreeNode::directory(
            "Sources",
            vec![
                TreeNode::directory("Models", vec![TreeNode::leaf("Model.m")]),
                TreeNode::directory("Views", vec![TreeNode::leaf("View.m")]),
            ],
        )]);

        builder(&fs).create_project(&cfg, &mut model).unwrap();

        let files = fs.file_paths();
        assert!(files.contains(&"Sources/Models/Model.m".to_string()));
        assert!(files.contains(&"Sources/Views/View.m".to_string()));
        assert!(!fs.has_dir("Sources/Models/Views"));
        // nested groups hang off their own parent
        assert_eq!(model.groups[1].0, "G1");
        assert_eq!(model.groups[2].0, "G1");
    }

    #[test]
    fn repeated_directory_keeps_single_marker() {
        let fs = FakeFs::default();
        let mut model = RecordingProject::default();
        let cfg = config(vec![
            TreeNode::directory("Shared", vec![TreeNode::leaf("a.m")]),
            TreeNode::directory("Shared", vec![TreeNode::leaf("b.m")]),
        ]);

        let summary = builder(&fs).create_project(&cfg, &mut model).unwrap();

        let markers = fs
            .file_paths()
            .into_iter()
            .filter(|p| p.ends_with(DIRECTORY_MARKER))
            .count();
        assert_eq!(markers, 1);
        assert_eq!(summary.directories_created, 1);
    }

    #[test]
    fn target_first_then_attributes_and_single_save_last() {
        let fs = FakeFs::default();
        let mut model = RecordingProject::default();
        let cfg = config(vec![
            TreeNode::leaf("README.md"),
            TreeNode::empty_directory("Tests"),
        ]);

        builder(&fs).create_project(&cfg, &mut model).unwrap();

        assert_eq!(model.calls.first().map(String::as_str), Some("target App ios 7.0"));
        assert_eq!(model.calls.last().map(String::as_str), Some("save"));
        assert_eq!(model.saves, 1);
        assert_eq!(model.attributes["CLASSPREFIX"], "ABC");
        assert_eq!(model.attributes["ORGANIZATIONNAME"], "Acme");
        // root-level leaves land in the output root without a marker
        assert_eq!(fs.file_paths(), ["README.md", "Tests/.gitkeep"]);
    }

    #[test]
    fn output_root_prefixes_disk_paths_but_not_settings() {
        let fs = FakeFs::default();
        let mut model = RecordingProject::default();
        let cfg = config(vec![TreeNode::directory(
            "Resources",
            vec![TreeNode::leaf("Info.plist")],
        )]);

        builder(&fs)
            .with_output_root("out")
            .create_project(&cfg, &mut model)
            .unwrap();

        assert!(fs.file_paths().contains(&"out/Resources/Info.plist".to_string()));
        assert_eq!(
            model.setting("Debug", INFO_PLIST_SETTING),
            Some("Resources/Info.plist")
        );
    }

    // ------------------------------------------------------------------------
    // Failures
    // ------------------------------------------------------------------------

    #[test]
    fn undefined_binding_aborts_with_node_path() {
        let fs = FakeFs::default();
        let mut model = RecordingProject::default();
        let cfg = config(vec![TreeNode::directory(
            "Sources",
            vec![TreeNode::directory("<%= nope %>", vec![])],
        )]);

        let err = builder(&fs).create_project(&cfg, &mut model).unwrap_err();

        assert_eq!(err.node_path(), Some("Sources"));
        assert!(matches!(
            err.root_cause(),
            LiftoffError::Application(ApplicationError::RenderingFailed { .. })
        ));
        assert_eq!(model.saves, 0);
        // partial state stays on disk
        assert!(fs.has_dir("Sources"));
    }

    fn escaping_config(rendered: &str) -> ProjectConfiguration {
        ProjectConfiguration::builder("App")
            .binding("dir", rendered)
            .tree(SpecificationTree::new(vec![TreeNode::empty_directory(
                "<%= dir %>",
            )]))
            .build()
            .unwrap()
    }

    #[test]
    fn rendered_separator_is_an_invalid_segment() {
        let fs = FakeFs::default();
        let mut model = RecordingProject::default();

        let err = builder(&fs)
            .create_project(&escaping_config("../escape"), &mut model)
            .unwrap_err();
        assert!(matches!(
            err.root_cause(),
            LiftoffError::Domain(DomainError::InvalidSegment { rendered, .. }) if rendered == "../escape"
        ));
        assert_eq!(model.saves, 0);
    }

    #[test]
    fn rendered_parent_directory_is_an_invalid_segment() {
        let fs = FakeFs::default();
        let mut model = RecordingProject::default();

        let err = builder(&fs)
            .create_project(&escaping_config(".."), &mut model)
            .unwrap_err();
        assert!(matches!(
            err.root_cause(),
            LiftoffError::Domain(DomainError::InvalidSegment { reason, .. })
                if *reason == "names a relative directory"
        ));
        assert!(!fs.has_dir(".."));
    }

    #[test]
    fn materializer_failure_stops_walk_before_save() {
        let mut fs = MockFilesystem::new();
        fs.expect_create_dir_all().returning(|_| Ok(()));
        fs.expect_exists().returning(|_| false);
        fs.expect_write_file().returning(|_, _| Ok(()));

        let mut materializer = MockTemplateMaterializer::new();
        materializer
            .expect_generate()
            .times(1)
            .returning(|id, _, _| {
                Err(ApplicationError::TemplateNotFound { id: id.to_string() }.into())
            });

        let builder = ProjectBuilder::new(
            Box::new(PlaceholderRenderer),
            Box::new(fs),
            Box::new(materializer),
        );
        let mut model = RecordingProject::default();
        let cfg = config(vec![TreeNode::directory(
            "Sources",
            vec![TreeNode::leaf("Missing.m"), TreeNode::leaf("Never.m")],
        )]);

        let err = builder.create_project(&cfg, &mut model).unwrap_err();

        assert_eq!(err.node_path(), Some("Sources/Missing.m"));
        assert!(model.files.is_empty());
        assert_eq!(model.saves, 0);
    }

    #[test]
    fn ensure_fresh_detects_existing_descriptor() {
        let mut fs = MockFilesystem::new();
        fs.expect_exists()
            .withf(|p| p == Path::new("out/App.xcodeproj"))
            .returning(|_| true);

        let builder = ProjectBuilder::new(
            Box::new(PlaceholderRenderer),
            Box::new(fs),
            Box::new(MockTemplateMaterializer::new()),
        )
        .with_output_root("out");

        let err = builder.ensure_fresh(&config(vec![])).unwrap_err();
        assert!(matches!(
            err,
            LiftoffError::Application(ApplicationError::ProjectExists { .. })
        ));
    }

    // ------------------------------------------------------------------------
    // Dry run
    // ------------------------------------------------------------------------

    #[test]
    fn plan_mirrors_walk_without_side_effects() {
        let fs = FakeFs::default();
        let cfg = config(vec![
            TreeNode::directory(
                "Resources",
                vec![TreeNode::leaf("Info.plist"), TreeNode::leaf("<%=prefix%>View.m")],
            ),
            TreeNode::empty_directory("Empty"),
        ]);

        let plan = builder(&fs).plan(&cfg).unwrap();

        let dirs: Vec<_> = plan.directories().map(|p| p.to_slash_string()).collect();
        let files: Vec<_> = plan.files().map(|p| p.to_slash_string()).collect();
        assert_eq!(dirs, ["Resources", "Empty"]);
        assert_eq!(files, ["Resources/Info.plist", "Resources/ABCView.m"]);
        assert!(fs.file_paths().is_empty());
    }
}
