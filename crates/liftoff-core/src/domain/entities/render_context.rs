//! Binding environment used to render directory names, file names and
//! template bodies.

use indexmap::IndexMap;
use serde::Serialize;

/// Named string bindings available to placeholders such as `<%= prefix %>`.
///
/// Built at the start of a run from the project configuration and shared
/// read-only by every step of the tree walk.
///
/// # Standard bindings
///
/// - `project_name`, plus `project_name_snake`, `project_name_kebab` and
///   `project_name_pascal` casing variants
/// - `prefix`, `company`, `author`, `company_identifier`
/// - `year`
///
/// Custom bindings are inserted after these and may replace them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct RenderContext {
    bindings: IndexMap<String, String>,
}

impl RenderContext {
    /// Create a context holding only the project name and its casing variants.
    pub fn new(project_name: impl Into<String>) -> Self {
        let name = project_name.into();
        let mut bindings = IndexMap::new();

        bindings.insert("project_name_snake".to_string(), to_snake_case(&name));
        bindings.insert("project_name_kebab".to_string(), to_kebab_case(&name));
        bindings.insert("project_name_pascal".to_string(), to_pascal_case(&name));
        bindings.insert("project_name".to_string(), name);

        Self { bindings }
    }

    /// Add or replace a binding, consuming self.
    pub fn with_binding(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.bindings.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.bindings.get(key).map(String::as_str)
    }

    pub fn project_name(&self) -> &str {
        self.get("project_name").unwrap_or_default()
    }

    /// Bindings in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.bindings.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

// ============================================================================
// String Case Conversion Helpers
// ============================================================================

/// `"MyApp"` -> `"my_app"`, `"HTTPRequest"` -> `"http_request"`.
pub fn to_snake_case(s: &str) -> String {
    split_words(s).join("_")
}

/// Same as [`to_snake_case`] but joined with `-`.
pub fn to_kebab_case(s: &str) -> String {
    split_words(s).join("-")
}

/// `"my-app"` -> `"MyApp"`, `"HTTPRequest"` -> `"HttpRequest"`.
pub fn to_pascal_case(s: &str) -> String {
    split_words(s)
        .into_iter()
        .map(|w| {
            let mut chars = w.chars();
            match chars.next() {
                Some(first) => {
                    let mut out = String::new();
                    out.extend(first.to_uppercase());
                    out.push_str(chars.as_str());
                    out
                }
                None => String::new(),
            }
        })
        .collect()
}

/// Uppercase initials of each word: `"Weather Station"` -> `"WS"`.
///
/// Used as the class prefix when none is configured.
pub fn initials(s: &str) -> String {
    split_words(s)
        .iter()
        .filter_map(|w| w.chars().next())
        .flat_map(char::to_uppercase)
        .collect()
}

/// Split a string into lowercase words.
///
/// Boundaries are `_`, `-`, whitespace and `.`, a lower-to-upper transition
/// (`myApp`), and the end of an acronym (`HTTPServer` splits before `S`).
fn split_words(input: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut chars = input.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '_' || c == '-' || c == '.' || c.is_whitespace() {
            if !current.is_empty() {
                words.push(current.to_lowercase());
                current.clear();
            }
            continue;
        }

        if let Some(next) = chars.peek() {
            if c.is_lowercase() && next.is_uppercase() {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }

            if c.is_uppercase()
                && next.is_uppercase()
                && chars.clone().nth(1).is_some_and(|n| n.is_lowercase())
            {
                current.push(c);
                words.push(current.to_lowercase());
                current.clear();
                continue;
            }
        }

        current.push(c);
    }

    if !current.is_empty() {
        words.push(current.to_lowercase());
    }

    words
}
