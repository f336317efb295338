//! Object graph of a `project.pbxproj` file.

use indexmap::IndexMap;

pub(crate) const GROUP_SOURCE_TREE: &str = "<group>";
pub(crate) const BUILT_PRODUCTS_SOURCE_TREE: &str = "BUILT_PRODUCTS_DIR";
pub(crate) const APPLICATION_PRODUCT_TYPE: &str = "com.apple.product-type.application";

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct Group {
    pub name: Option<String>,
    pub path: Option<String>,
    pub children: Vec<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct FileReference {
    pub path: String,
    pub file_type: &'static str,
    /// Products use `explicitFileType` and live under `BUILT_PRODUCTS_DIR`.
    pub product: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) struct NativeTarget {
    pub name: String,
    pub build_configuration_list: String,
    pub sources_phase: String,
    pub product_reference: String,
}

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum PbxObject {
    Group(Group),
    FileReference(FileReference),
    BuildFile { file_ref: String },
    SourcesBuildPhase { files: Vec<String> },
    NativeTarget(NativeTarget),
    ConfigurationList {
        configurations: Vec<String>,
        default_name: String,
        owner: String,
    },
    BuildConfiguration {
        name: String,
        settings: IndexMap<String, String>,
    },
}

impl PbxObject {
    pub fn isa(&self) -> &'static str {
        match self {
            Self::Group(_) => "PBXGroup",
            Self::FileReference(_) => "PBXFileReference",
            Self::BuildFile { .. } => "PBXBuildFile",
            Self::SourcesBuildPhase { .. } => "PBXSourcesBuildPhase",
            Self::NativeTarget(_) => "PBXNativeTarget",
            Self::ConfigurationList { .. } => "XCConfigurationList",
            Self::BuildConfiguration { .. } => "XCBuildConfiguration",
        }
    }
}

/// `lastKnownFileType` for a file name, from its extension.
pub(crate) fn file_type_for(name: &str) -> &'static str {
    let extension = name.rsplit_once('.').map(|(_, ext)| ext).unwrap_or_default();
    match extension {
        "h" | "pch" => "sourcecode.c.h",
        "m" => "sourcecode.c.objc",
        "mm" => "sourcecode.cpp.objcpp",
        "c" => "sourcecode.c.c",
        "cpp" | "cc" => "sourcecode.cpp.cpp",
        "swift" => "sourcecode.swift",
        "plist" => "text.plist.xml",
        "strings" => "text.plist.strings",
        "xib" => "file.xib",
        "storyboard" => "file.storyboard",
        "xcassets" => "folder.assetcatalog",
        "png" => "image.png",
        "json" => "text.json",
        "md" => "net.daringfireball.markdown",
        "app" => "wrapper.application",
        _ => "text",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_types_follow_extension() {
        assert_eq!(file_type_for("AppDelegate.m"), "sourcecode.c.objc");
        assert_eq!(file_type_for("App-Prefix.pch"), "sourcecode.c.h");
        assert_eq!(file_type_for("Info.plist"), "text.plist.xml");
        assert_eq!(file_type_for("Podfile"), "text");
    }
}
