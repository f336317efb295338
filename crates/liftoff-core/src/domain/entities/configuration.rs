use chrono::Datelike;
use indexmap::IndexMap;
use serde::Serialize;

use super::render_context::{RenderContext, initials};
use super::spec_tree::SpecificationTree;
use crate::domain::error::DomainError;

/// Everything a run needs to know about the project being scaffolded.
///
/// Immutable once built; the builder enforces the invariants.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectConfiguration {
    name: String,
    prefix: String,
    company: String,
    author: String,
    company_identifier: String,
    bindings: IndexMap<String, String>,
    tree: SpecificationTree,
}

impl ProjectConfiguration {
    pub fn builder(name: impl Into<String>) -> ProjectConfigurationBuilder {
        ProjectConfigurationBuilder {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    pub fn company(&self) -> &str {
        &self.company
    }

    pub fn author(&self) -> &str {
        &self.author
    }

    pub fn company_identifier(&self) -> &str {
        &self.company_identifier
    }

    pub fn bindings(&self) -> &IndexMap<String, String> {
        &self.bindings
    }

    pub fn tree(&self) -> &SpecificationTree {
        &self.tree
    }

    /// File name of the project descriptor bundle, e.g. `MyApp.xcodeproj`.
    pub fn descriptor_file_name(&self) -> String {
        format!("{}.xcodeproj", self.name)
    }

    /// Re-check invariants. Configurations built through the builder always pass.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_name(&self.name)?;
        self.tree.validate()
    }

    /// Binding environment for this configuration.
    ///
    /// `year` comes from the local clock.
    pub fn render_context(&self) -> RenderContext {
        let mut ctx = RenderContext::new(&self.name);
        ctx.insert("prefix", &self.prefix);
        ctx.insert("company", &self.company);
        ctx.insert("author", &self.author);
        ctx.insert("company_identifier", &self.company_identifier);
        ctx.insert("year", chrono::Local::now().year().to_string());
        for (key, value) in &self.bindings {
            ctx.insert(key, value);
        }
        ctx
    }
}

#[derive(Debug, Default)]
pub struct ProjectConfigurationBuilder {
    name: String,
    prefix: Option<String>,
    company: Option<String>,
    author: Option<String>,
    company_identifier: Option<String>,
    bindings: IndexMap<String, String>,
    tree: SpecificationTree,
}

impl ProjectConfigurationBuilder {
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    pub fn company(mut self, company: impl Into<String>) -> Self {
        self.company = Some(company.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn company_identifier(mut self, identifier: impl Into<String>) -> Self {
        self.company_identifier = Some(identifier.into());
        self
    }

    pub fn binding(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.bindings.insert(key.into(), value.into());
        self
    }

    pub fn bindings(mut self, bindings: IndexMap<String, String>) -> Self {
        self.bindings.extend(bindings);
        self
    }

    pub fn tree(mut self, tree: SpecificationTree) -> Self {
        self.tree = tree;
        self
    }

    pub fn build(self) -> Result<ProjectConfiguration, DomainError> {
        let name = self.name.trim().to_string();
        validate_name(&name)?;
        self.tree.validate()?;

        let company = self.company.unwrap_or_default();
        let prefix = self
            .prefix
            .filter(|p| !p.trim().is_empty())
            .unwrap_or_else(|| initials(&name));
        let company_identifier = self
            .company_identifier
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| default_company_identifier(&company));

        Ok(ProjectConfiguration {
            name,
            prefix,
            company,
            author: self.author.unwrap_or_default(),
            company_identifier,
            bindings: self.bindings,
            tree: self.tree,
        })
    }
}

fn validate_name(name: &str) -> Result<(), DomainError> {
    let invalid = |reason: &str| DomainError::InvalidProjectName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.trim().is_empty() {
        return Err(DomainError::MissingRequiredField {
            field: "project_name",
        });
    }
    if name.contains(['/', '\\']) {
        return Err(invalid("must not contain path separators"));
    }
    if name.starts_with('.') {
        return Err(invalid("must not start with '.'"));
    }
    if name.chars().any(char::is_control) {
        return Err(invalid("must not contain control characters"));
    }
    Ok(())
}

/// `"Acme Corp"` -> `"com.acmecorp"`.
fn default_company_identifier(company: &str) -> String {
    let slug: String = company
        .chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if slug.is_empty() {
        "com.example".to_string()
    } else {
        format!("com.{slug}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_fills_defaults() {
        let config = ProjectConfiguration::builder("Weather Station")
            .company("Acme Corp")
            .build()
            .unwrap();

        assert_eq!(config.prefix(), "WS");
        assert_eq!(config.company_identifier(), "com.acmecorp");
        assert_eq!(config.author(), "");
        assert_eq!(config.descriptor_file_name(), "Weather Station.xcodeproj");
    }

    #[test]
    fn explicit_values_win() {
        let config = ProjectConfiguration::builder("App")
            .prefix("ABC")
            .company_identifier("io.example")
            .build()
            .unwrap();
        assert_eq!(config.prefix(), "ABC");
        assert_eq!(config.company_identifier(), "io.example");
    }

    #[test]
    fn rejects_bad_names() {
        assert!(matches!(
            ProjectConfiguration::builder("  ").build(),
            Err(DomainError::MissingRequiredField { .. })
        ));
        assert!(matches!(
            ProjectConfiguration::builder("a/b").build(),
            Err(DomainError::InvalidProjectName { .. })
        ));
        assert!(ProjectConfiguration::builder(".hidden").build().is_err());
    }

    #[test]
    fn render_context_layers_custom_bindings_last() {
        let config = ProjectConfiguration::builder("App")
            .prefix("ABC")
            .company("Acme")
            .binding("prefix", "ZZZ")
            .binding("bundle_suffix", "beta")
            .build()
            .unwrap();

        let ctx = config.render_context();
        assert_eq!(ctx.get("prefix"), Some("ZZZ"));
        assert_eq!(ctx.get("bundle_suffix"), Some("beta"));
        assert_eq!(ctx.get("company"), Some("Acme"));
        assert_eq!(ctx.get("company_identifier"), Some("com.acme"));
        assert_eq!(
            ctx.get("year"),
            Some(chrono::Local::now().year().to_string().as_str())
        );
    }
}
