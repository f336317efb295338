use crate::domain::{
    entities::{ProjectConfiguration, SpecificationTree},
    error::DomainError,
};

/// Centralized domain validation.
///
/// All validation logic lives here, not scattered across the walker.
pub struct DomainValidator;

impl DomainValidator {
    pub fn validate_configuration(config: &ProjectConfiguration) -> Result<(), DomainError> {
        config.validate()
    }

    pub fn validate_tree(tree: &SpecificationTree) -> Result<(), DomainError> {
        tree.validate()
    }

    /// A rendered directory or file name must be a single, non-empty,
    /// relative path segment.
    pub fn validate_segment(raw: &str, rendered: &str) -> Result<(), DomainError> {
        if rendered.trim().is_empty() {
            return Err(DomainError::InvalidTree(format!(
                "'{raw}' rendered to an empty name"
            )));
        }
        let reason = if rendered.contains(['/', '\\']) {
            Some("contains a path separator")
        } else if rendered == "." || rendered == ".." {
            Some("names a relative directory")
        } else {
            None
        };
        if let Some(reason) = reason {
            return Err(DomainError::InvalidSegment {
                raw: raw.to_string(),
                rendered: rendered.to_string(),
                reason,
            });
        }
        Ok(())
    }
}
