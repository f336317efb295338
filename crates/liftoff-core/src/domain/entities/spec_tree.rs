//! The declarative directory tree that drives project generation.
//!
//! A tree is written in YAML as a list whose items are either plain strings
//! (a template to place in the enclosing directory) or mappings from a raw
//! directory name to its children:
//!
//! ```yaml
//! directories:
//!   - "<%= project_name %>":
//!       - Sources:
//!           - AppDelegate.h
//!           - AppDelegate.m
//!       - Resources:
//!           - Info.plist
//!   - Tests:
//! ```
//!
//! Leaf versus directory is decided here, at parse time. The walker never
//! inspects raw data.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, ser::SerializeMap};

use crate::domain::error::DomainError;

/// One node of a [`SpecificationTree`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeNode {
    /// A template name; renders to a file in the enclosing directory.
    TemplateLeaf(String),
    /// A raw directory name and its (possibly absent) children.
    DirectoryNode {
        name: String,
        children: Option<Vec<TreeNode>>,
    },
}

impl TreeNode {
    pub fn leaf(name: impl Into<String>) -> Self {
        Self::TemplateLeaf(name.into())
    }

    pub fn directory(name: impl Into<String>, children: Vec<TreeNode>) -> Self {
        Self::DirectoryNode {
            name: name.into(),
            children: Some(children),
        }
    }

    /// A directory declared with no children (`Empty:` in YAML).
    pub fn empty_directory(name: impl Into<String>) -> Self {
        Self::DirectoryNode {
            name: name.into(),
            children: None,
        }
    }

    /// The raw, unrendered name of this node.
    pub fn raw_name(&self) -> &str {
        match self {
            Self::TemplateLeaf(name) => name,
            Self::DirectoryNode { name, .. } => name,
        }
    }

    /// Children of a directory node; empty for leaves and childless directories.
    pub fn children(&self) -> &[TreeNode] {
        match self {
            Self::DirectoryNode {
                children: Some(children),
                ..
            } => children,
            _ => &[],
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::TemplateLeaf(_))
    }
}

/// Written back in the same shape it is read: a string or a one-entry mapping.
impl Serialize for TreeNode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::TemplateLeaf(name) => serializer.serialize_str(name),
            Self::DirectoryNode { name, children } => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry(name, children)?;
                map.end()
            }
        }
    }
}

/// Ordered list of top-level nodes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct SpecificationTree {
    nodes: Vec<TreeNode>,
}

impl SpecificationTree {
    pub fn new(nodes: Vec<TreeNode>) -> Self {
        Self { nodes }
    }

    pub fn nodes(&self) -> &[TreeNode] {
        &self.nodes
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Number of template leaves anywhere in the tree.
    pub fn leaf_count(&self) -> usize {
        fn count(nodes: &[TreeNode]) -> usize {
            nodes
                .iter()
                .map(|n| if n.is_leaf() { 1 } else { count(n.children()) })
                .sum()
        }
        count(&self.nodes)
    }

    /// Number of directory nodes anywhere in the tree.
    pub fn directory_count(&self) -> usize {
        fn count(nodes: &[TreeNode]) -> usize {
            nodes
                .iter()
                .map(|n| match n {
                    TreeNode::TemplateLeaf(_) => 0,
                    TreeNode::DirectoryNode { .. } => 1 + count(n.children()),
                })
                .sum()
        }
        count(&self.nodes)
    }

    /// Structural checks that do not depend on rendering.
    pub fn validate(&self) -> Result<(), DomainError> {
        fn check(nodes: &[TreeNode]) -> Result<(), DomainError> {
            for node in nodes {
                if node.raw_name().trim().is_empty() {
                    return Err(DomainError::InvalidTree(
                        "node names cannot be empty".into(),
                    ));
                }
                check(node.children())?;
            }
            Ok(())
        }
        check(&self.nodes)
    }
}

// ── Parsing ─────────────────────────────────────────────────────────────────

/// Shape of the tree as it appears in YAML/JSON, before variant resolution.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawNode {
    Leaf(String),
    Directories(IndexMap<String, Option<Vec<RawNode>>>),
}

fn resolve(raw: Vec<RawNode>) -> Vec<TreeNode> {
    let mut nodes = Vec::with_capacity(raw.len());
    for item in raw {
        match item {
            RawNode::Leaf(name) => nodes.push(TreeNode::TemplateLeaf(name)),
            // A mapping with several keys yields one directory per key, in order.
            RawNode::Directories(map) => {
                for (name, children) in map {
                    nodes.push(TreeNode::DirectoryNode {
                        name,
                        children: children.map(resolve),
                    });
                }
            }
        }
    }
    nodes
}

impl<'de> Deserialize<'de> for SpecificationTree {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = Vec::<RawNode>::deserialize(deserializer).map_err(|e| {
            serde::de::Error::custom(format!(
                "each entry must be a file name or a directory mapping ({e})"
            ))
        })?;
        Ok(Self::new(resolve(raw)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(yaml: &str) -> Result<SpecificationTree, serde_yaml::Error> {
        serde_yaml::from_str(yaml)
    }

    #[test]
    fn serializes_back_to_input_shape() {
        let yaml = "- Sources:\n  - main.m\n- Empty: null\n- README.md\n";
        let tree = parse(yaml).unwrap();
        let written = serde_yaml::to_string(&tree).unwrap();
        assert!(written.contains("- Sources:"));
        assert!(!written.contains("children"));
        assert_eq!(parse(&written).unwrap(), tree);
    }

    #[test]
    fn parses_leaves_and_directories() {
        let tree = parse(
            r#"
- Sources:
    - "AppDelegate.<%=prefix%>.h"
    - "AppDelegate.<%=prefix%>.m"
- README.md
"#,
        )
        .unwrap();

        assert_eq!(
            tree.nodes(),
            &[
                TreeNode::directory(
                    "Sources",
                    vec![
                        TreeNode::leaf("AppDelegate.<%=prefix%>.h"),
                        TreeNode::leaf("AppDelegate.<%=prefix%>.m"),
                    ]
                ),
                TreeNode::leaf("README.md"),
            ]
        );
        assert_eq!(tree.leaf_count(), 3);
        assert_eq!(tree.directory_count(), 1);
    }

    #[test]
    fn null_children_become_empty_directory() {
        let tree = parse("- Empty:\n").unwrap();
        assert_eq!(tree.nodes(), &[TreeNode::empty_directory("Empty")]);
        assert!(tree.nodes()[0].children().is_empty());
    }

    #[test]
    fn multi_key_mapping_keeps_key_order() {
        let tree = parse(
            r#"
- Zeta:
  Alpha:
    - a.m
  Mid:
"#,
        )
        .unwrap();

        let names: Vec<_> = tree.nodes().iter().map(|n| n.raw_name()).collect();
        assert_eq!(names, ["Zeta", "Alpha", "Mid"]);
    }

    #[test]
    fn rejects_numbers_and_nested_lists() {
        assert!(parse("- 42\n").is_err());
        assert!(parse("- - nested\n").is_err());
        assert!(parse("- Sources:\n    - 3.5\n").is_err());
    }

    #[test]
    fn validate_rejects_blank_names() {
        let tree = SpecificationTree::new(vec![TreeNode::directory(
            "Sources",
            vec![TreeNode::leaf("  ")],
        )]);
        assert!(matches!(tree.validate(), Err(DomainError::InvalidTree(_))));
    }

    #[test]
    fn serializes_back_to_the_same_shape() {
        let tree = SpecificationTree::new(vec![
            TreeNode::directory("Sources", vec![TreeNode::leaf("main.m")]),
            TreeNode::empty_directory("Empty"),
        ]);
        let yaml = serde_yaml::to_string(&tree).unwrap();
        let reparsed = parse(&yaml).unwrap();
        assert_eq!(reparsed, tree);
    }
}
