//! Core domain layer for Liftoff.
//!
//! Pure data and rules: the specification tree, project configuration,
//! render bindings and dry-run plan. No I/O happens here; filesystem access,
//! rendering and the project model are reached through ports defined in the
//! application layer.

pub mod entities;
pub mod error;

mod validation;

pub use entities::{
    PlannedEntry, ProjectConfiguration, ProjectConfigurationBuilder, ProjectPlan, RelativePath,
    RenderContext, SpecificationTree, TreeNode,
    render_context::{initials, to_kebab_case, to_pascal_case, to_snake_case},
};
pub use error::{DomainError, ErrorCategory};
pub use validation::DomainValidator;

#[cfg(test)]
mod tests {
    use super::*;

    // ========================================================================
    // Configuration + Tree
    // ========================================================================

    fn sample_tree() -> SpecificationTree {
        serde_yaml::from_str(
            r#"
- "<%= project_name %>":
    - Sources:
        - AppDelegate.h
        - AppDelegate.m
    - Resources:
        - Info.plist
- Tests:
"#,
        )
        .unwrap()
    }

    #[test]
    fn configuration_carries_tree() {
        let config = ProjectConfiguration::builder("Demo")
            .tree(sample_tree())
            .build()
            .unwrap();

        assert_eq!(config.tree().nodes().len(), 2);
        assert_eq!(config.tree().leaf_count(), 3);
        assert_eq!(config.tree().directory_count(), 4);
        assert!(DomainValidator::validate_configuration(&config).is_ok());
    }

    #[test]
    fn configuration_rejects_invalid_tree() {
        let tree = SpecificationTree::new(vec![TreeNode::empty_directory("")]);
        let err = ProjectConfiguration::builder("Demo")
            .tree(tree)
            .build()
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidTree(_)));
        assert_eq!(err.category(), ErrorCategory::Validation);
    }

    // ========================================================================
    // Error Tests
    // ========================================================================

    #[test]
    fn error_suggestions_are_actionable() {
        let err = DomainError::InvalidSettings {
            origin: "~/.liftoffrc".into(),
            reason: "expected a mapping".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Configuration);
        assert!(err.suggestions().iter().any(|s| s.contains("~/.liftoffrc")));
    }
}
