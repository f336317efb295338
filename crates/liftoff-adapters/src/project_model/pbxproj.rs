//! Old-style ASCII property list writer for `project.pbxproj`.

use std::fmt::Write as _;

use indexmap::IndexMap;

use super::objects::{
    APPLICATION_PRODUCT_TYPE, BUILT_PRODUCTS_SOURCE_TREE, GROUP_SOURCE_TREE, PbxObject,
};
use super::xcode::XcodeProject;

const OBJECT_VERSION: u32 = 46;
const COMPATIBILITY_VERSION: &str = "Xcode 3.2";

/// Section order in the written file.
const SECTIONS: [&str; 8] = [
    "PBXBuildFile",
    "PBXFileReference",
    "PBXGroup",
    "PBXNativeTarget",
    "PBXProject",
    "PBXSourcesBuildPhase",
    "XCBuildConfiguration",
    "XCConfigurationList",
];

/// Quote `value` unless it is made only of characters Xcode leaves bare.
pub(crate) fn quote(value: &str) -> String {
    let bare = !value.is_empty()
        && value
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '$' | '/' | ':' | '.'));
    if bare {
        return value.to_string();
    }

    let mut out = String::with_capacity(value.len() + 2);
    out.push('"');
    for c in value.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

/// `name` made safe to sit between `/*` and `*/`.
fn comment_text(name: &str) -> String {
    name.replace("*/", "* /")
}

impl XcodeProject {
    /// Serialize the model to `project.pbxproj` text.
    pub fn to_pbxproj(&self) -> String {
        let mut out = String::new();
        out.push_str("// !$*UTF8*$!\n{\n");
        out.push_str("\tarchiveVersion = 1;\n\tclasses = {\n\t};\n");
        let _ = writeln!(out, "\tobjectVersion = {OBJECT_VERSION};");
        out.push_str("\tobjects = {\n");

        for section in SECTIONS {
            let _ = writeln!(out, "\n/* Begin {section} section */");
            if section == "PBXProject" {
                self.write_project(&mut out);
            } else {
                for (id, object) in self.objects.iter().filter(|(_, o)| o.isa() == section) {
                    self.write_object(&mut out, id, object);
                }
            }
            let _ = writeln!(out, "/* End {section} section */");
        }

        out.push_str("\t};\n");
        let _ = writeln!(
            out,
            "\trootObject = {} /* Project object */;",
            self.project_id
        );
        out.push_str("}\n");
        out
    }

    fn reference(&self, id: &str) -> String {
        match self.display_name(id) {
            Some(name) => format!("{id} /* {} */", comment_text(&name)),
            None => id.to_string(),
        }
    }

    fn reference_list(&self, ids: &[String], indent: &str) -> String {
        let mut out = String::from("(\n");
        for id in ids {
            let _ = writeln!(out, "{indent}\t{},", self.reference(id));
        }
        out.push_str(indent);
        out.push(')');
        out
    }

    fn write_object(&self, out: &mut String, id: &str, object: &PbxObject) {
        let head = self.reference(id);
        match object {
            PbxObject::BuildFile { file_ref } => {
                let _ = writeln!(
                    out,
                    "\t\t{head} = {{isa = PBXBuildFile; fileRef = {}; }};",
                    self.reference(file_ref)
                );
            }
            PbxObject::FileReference(file) => {
                let type_key = if file.product {
                    "explicitFileType"
                } else {
                    "lastKnownFileType"
                };
                let source_tree = if file.product {
                    BUILT_PRODUCTS_SOURCE_TREE
                } else {
                    GROUP_SOURCE_TREE
                };
                let _ = writeln!(
                    out,
                    "\t\t{head} = {{isa = PBXFileReference; {type_key} = {}; path = {}; sourceTree = {}; }};",
                    quote(file.file_type),
                    quote(&file.path),
                    quote(source_tree)
                );
            }
            PbxObject::Group(group) => {
                let mut children = group.children.clone();
                if id == self.main_group {
                    children.extend(self.products_group.iter().cloned());
                }
                let _ = writeln!(out, "\t\t{head} = {{");
                out.push_str("\t\t\tisa = PBXGroup;\n");
                let _ = writeln!(
                    out,
                    "\t\t\tchildren = {};",
                    self.reference_list(&children, "\t\t\t")
                );
                match (&group.name, &group.path) {
                    (Some(name), Some(path)) if name == path => {
                        let _ = writeln!(out, "\t\t\tpath = {};", quote(path));
                    }
                    (name, path) => {
                        if let Some(name) = name {
                            let _ = writeln!(out, "\t\t\tname = {};", quote(name));
                        }
                        if let Some(path) = path {
                            let _ = writeln!(out, "\t\t\tpath = {};", quote(path));
                        }
                    }
                }
                let _ = writeln!(out, "\t\t\tsourceTree = {};", quote(GROUP_SOURCE_TREE));
                out.push_str("\t\t};\n");
            }
            PbxObject::NativeTarget(target) => {
                let _ = writeln!(out, "\t\t{head} = {{");
                out.push_str("\t\t\tisa = PBXNativeTarget;\n");
                let _ = writeln!(
                    out,
                    "\t\t\tbuildConfigurationList = {};",
                    self.reference(&target.build_configuration_list)
                );
                let _ = writeln!(
                    out,
                    "\t\t\tbuildPhases = {};",
                    self.reference_list(std::slice::from_ref(&target.sources_phase), "\t\t\t")
                );
                out.push_str("\t\t\tbuildRules = (\n\t\t\t);\n");
                out.push_str("\t\t\tdependencies = (\n\t\t\t);\n");
                let _ = writeln!(out, "\t\t\tname = {};", quote(&target.name));
                let _ = writeln!(out, "\t\t\tproductName = {};", quote(&target.name));
                let _ = writeln!(
                    out,
                    "\t\t\tproductReference = {};",
                    self.reference(&target.product_reference)
                );
                let _ = writeln!(out, "\t\t\tproductType = {};", quote(APPLICATION_PRODUCT_TYPE));
                out.push_str("\t\t};\n");
            }
            PbxObject::SourcesBuildPhase { files } => {
                let _ = writeln!(out, "\t\t{head} = {{");
                out.push_str("\t\t\tisa = PBXSourcesBuildPhase;\n");
                out.push_str("\t\t\tbuildActionMask = 2147483647;\n");
                let _ = writeln!(out, "\t\t\tfiles = {};", self.reference_list(files, "\t\t\t"));
                out.push_str("\t\t\trunOnlyForDeploymentPostprocessing = 0;\n");
                out.push_str("\t\t};\n");
            }
            PbxObject::BuildConfiguration { name, settings } => {
                let _ = writeln!(out, "\t\t{head} = {{");
                out.push_str("\t\t\tisa = XCBuildConfiguration;\n");
                let _ = writeln!(
                    out,
                    "\t\t\tbuildSettings = {};",
                    dictionary(settings, "\t\t\t")
                );
                let _ = writeln!(out, "\t\t\tname = {};", quote(name));
                out.push_str("\t\t};\n");
            }
            PbxObject::ConfigurationList {
                configurations,
                default_name,
                ..
            } => {
                let _ = writeln!(out, "\t\t{head} = {{");
                out.push_str("\t\t\tisa = XCConfigurationList;\n");
                let _ = writeln!(
                    out,
                    "\t\t\tbuildConfigurations = {};",
                    self.reference_list(configurations, "\t\t\t")
                );
                out.push_str("\t\t\tdefaultConfigurationIsVisible = 0;\n");
                let _ = writeln!(
                    out,
                    "\t\t\tdefaultConfigurationName = {};",
                    quote(default_name)
                );
                out.push_str("\t\t};\n");
            }
        }
    }

    fn write_project(&self, out: &mut String) {
        let _ = writeln!(out, "\t\t{} /* Project object */ = {{", self.project_id);
        out.push_str("\t\t\tisa = PBXProject;\n");
        let _ = writeln!(
            out,
            "\t\t\tattributes = {};",
            dictionary(&self.attributes, "\t\t\t")
        );
        let _ = writeln!(
            out,
            "\t\t\tbuildConfigurationList = {};",
            self.reference(&self.configuration_list)
        );
        let _ = writeln!(
            out,
            "\t\t\tcompatibilityVersion = {};",
            quote(COMPATIBILITY_VERSION)
        );
        out.push_str("\t\t\tdevelopmentRegion = English;\n");
        out.push_str("\t\t\thasScannedForEncodings = 0;\n");
        out.push_str("\t\t\tknownRegions = (\n\t\t\t\ten,\n\t\t\t);\n");
        let _ = writeln!(out, "\t\t\tmainGroup = {};", self.main_group);
        if let Some(products) = &self.products_group {
            let _ = writeln!(
                out,
                "\t\t\tproductRefGroup = {};",
                self.reference(products)
            );
        }
        out.push_str("\t\t\tprojectDirPath = \"\";\n");
        out.push_str("\t\t\tprojectRoot = \"\";\n");
        let _ = writeln!(
            out,
            "\t\t\ttargets = {};",
            self.reference_list(&self.targets, "\t\t\t")
        );
        out.push_str("\t\t};\n");
    }
}

fn dictionary(entries: &IndexMap<String, String>, indent: &str) -> String {
    let mut out = String::from("{\n");
    for (key, value) in entries {
        let _ = writeln!(out, "{indent}\t{} = {};", quote(key), quote(value));
    }
    out.push_str(indent);
    out.push('}');
    out
}
