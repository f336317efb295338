//! Layered YAML settings.
//!
//! # Layers, lowest precedence first
//!
//! 1. built-in `defaults.yml`
//! 2. `~/.liftoffrc`
//! 3. `./.liftoffrc`
//! 4. a file given explicitly (`--config`)
//!
//! A later layer replaces whole top-level keys of earlier ones; `directories`
//! in `./.liftoffrc` replaces the default tree rather than merging into it.
//!
//! # Format
//!
//! ```yaml
//! company: Acme
//! author: Sam Doe
//! prefix: AC
//! company_identifier: com.acme
//! bindings:
//!   bundle_suffix: beta
//! directories:
//!   - Sources:
//!       - main.m
//! ```

use std::{
    fmt, fs, io,
    path::{Path, PathBuf},
};

use directories::BaseDirs;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::{Mapping, Value};
use tracing::{debug, instrument};

use liftoff_core::domain::{DomainError, SpecificationTree};

pub const SETTINGS_FILE_NAME: &str = ".liftoffrc";

const DEFAULTS_YAML: &str = include_str!("defaults.yml");

const KNOWN_KEYS: [&str; 7] = [
    "project_name",
    "company",
    "author",
    "prefix",
    "company_identifier",
    "bindings",
    "directories",
];

/// Merged settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiftoffSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub company_identifier: Option<String>,
    #[serde(default)]
    pub bindings: IndexMap<String, String>,
    #[serde(default)]
    pub directories: SpecificationTree,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Layer {
    Builtin,
    File { path: PathBuf, required: bool },
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Builtin => f.write_str("built-in defaults"),
            Self::File { path, .. } => write!(f, "{}", path.display()),
        }
    }
}

/// One settings location, for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SettingsLocation {
    pub origin: String,
    pub path: Option<PathBuf>,
    pub exists: bool,
}

/// Builds [`LiftoffSettings`] from ordered layers.
#[derive(Debug, Clone)]
pub struct SettingsLoader {
    layers: Vec<Layer>,
}

impl Default for SettingsLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl SettingsLoader {
    /// Loader with only the built-in defaults.
    pub fn new() -> Self {
        Self {
            layers: vec![Layer::Builtin],
        }
    }

    /// Add `~/.liftoffrc` and `./.liftoffrc`, in that order.
    pub fn with_standard_locations(self) -> Self {
        let home = BaseDirs::new().map(|base| base.home_dir().join(SETTINGS_FILE_NAME));
        let this = match home {
            Some(path) => self.with_optional_file(path),
            None => self,
        };
        this.with_optional_file(PathBuf::from(SETTINGS_FILE_NAME))
    }

    /// Add a layer that is skipped when the file does not exist.
    pub fn with_optional_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.layers.push(Layer::File {
            path: path.into(),
            required: false,
        });
        self
    }

    /// Add a layer that must exist.
    pub fn with_required_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.layers.push(Layer::File {
            path: path.into(),
            required: true,
        });
        self
    }

    /// Every configured location, lowest precedence first.
    pub fn locations(&self) -> Vec<SettingsLocation> {
        self.layers
            .iter()
            .map(|layer| match layer {
                Layer::Builtin => SettingsLocation {
                    origin: layer.to_string(),
                    path: None,
                    exists: true,
                },
                Layer::File { path, .. } => SettingsLocation {
                    origin: layer.to_string(),
                    path: Some(path.clone()),
                    exists: path.is_file(),
                },
            })
            .collect()
    }

    /// Read and merge all layers.
    #[instrument(skip(self), fields(layers = self.layers.len()))]
    pub fn load(&self) -> Result<LiftoffSettings, DomainError> {
        let mut merged = Mapping::new();

        for layer in &self.layers {
            let Some(mapping) = read_layer(layer)? else {
                continue;
            };

            // Type-check each layer on its own so errors name the right file.
            serde_yaml::from_value::<LiftoffSettings>(Value::Mapping(mapping.clone()))
                .map_err(|e| invalid(layer, e))?;

            for (key, value) in mapping {
                match key.as_str() {
                    Some(k) if KNOWN_KEYS.contains(&k) => {}
                    Some(k) => debug!(origin = %layer, key = k, "ignoring unknown settings key"),
                    None => debug!(origin = %layer, "ignoring non-string settings key"),
                }
                merged.insert(key, value);
            }
            debug!(origin = %layer, "settings layer applied");
        }

        serde_yaml::from_value(Value::Mapping(merged)).map_err(|e| DomainError::InvalidSettings {
            origin: "merged settings".into(),
            reason: e.to_string(),
        })
    }
}

fn invalid(layer: &Layer, reason: impl fmt::Display) -> DomainError {
    DomainError::InvalidSettings {
        origin: layer.to_string(),
        reason: reason.to_string(),
    }
}

fn read_layer(layer: &Layer) -> Result<Option<Mapping>, DomainError> {
    let text = match layer {
        Layer::Builtin => DEFAULTS_YAML.to_string(),
        Layer::File { path, required } => match read_optional(path) {
            Ok(Some(text)) => text,
            Ok(None) if *required => return Err(invalid(layer, "file does not exist")),
            Ok(None) => {
                debug!(path = %path.display(), "settings file not present, skipping");
                return Ok(None);
            }
            Err(e) => return Err(invalid(layer, e)),
        },
    };

    match serde_yaml::from_str::<Value>(&text).map_err(|e| invalid(layer, e))? {
        Value::Null => Ok(None),
        Value::Mapping(mapping) => Ok(Some(mapping)),
        _ => Err(invalid(layer, "expected a mapping at the top level")),
    }
}

fn read_optional(path: &Path) -> io::Result<Option<String>> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(Some(text)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, body: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, body).unwrap();
        path
    }

    #[test]
    fn builtin_defaults_provide_a_tree() {
        let settings = SettingsLoader::new().load().unwrap();
        assert!(!settings.directories.is_empty());
        assert!(settings.directories.leaf_count() >= 9);
        assert_eq!(settings.company, None);
    }

    #[test]
    fn later_layers_override_by_key() {
        let temp = TempDir::new().unwrap();
        let home = write(&temp, "home.yml", "company: Home Co\nauthor: Sam\n");
        let project = write(
            &temp,
            "project.yml",
            "company: Project Co\ndirectories:\n  - Sources:\n      - main.m\n",
        );

        let settings = SettingsLoader::new()
            .with_optional_file(home)
            .with_optional_file(project)
            .load()
            .unwrap();

        assert_eq!(settings.company.as_deref(), Some("Project Co"));
        assert_eq!(settings.author.as_deref(), Some("Sam"));
        assert_eq!(settings.directories.leaf_count(), 1);
    }

    #[test]
    fn missing_optional_file_is_skipped() {
        let temp = TempDir::new().unwrap();
        let settings = SettingsLoader::new()
            .with_optional_file(temp.path().join("absent.yml"))
            .load();
        assert!(settings.is_ok());
    }

    #[test]
    fn missing_required_file_is_an_error() {
        let temp = TempDir::new().unwrap();
        let err = SettingsLoader::new()
            .with_required_file(temp.path().join("absent.yml"))
            .load()
            .unwrap_err();
        assert!(matches!(err, DomainError::InvalidSettings { .. }));
    }

    #[test]
    fn malformed_layer_names_its_origin() {
        let temp = TempDir::new().unwrap();
        let bad = write(&temp, "bad.yml", "directories:\n  - 42\n");

        let err = SettingsLoader::new()
            .with_optional_file(&bad)
            .load()
            .unwrap_err();

        match err {
            DomainError::InvalidSettings { origin, .. } => {
                assert_eq!(origin, bad.display().to_string())
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn non_mapping_and_empty_files() {
        let temp = TempDir::new().unwrap();
        let list = write(&temp, "list.yml", "- a\n- b\n");
        let empty = write(&temp, "empty.yml", "");

        assert!(SettingsLoader::new().with_optional_file(list).load().is_err());
        assert!(SettingsLoader::new().with_optional_file(empty).load().is_ok());
    }

    #[test]
    fn unknown_keys_are_ignored_and_bindings_kept_in_order() {
        let temp = TempDir::new().unwrap();
        let rc = write(
            &temp,
            "rc.yml",
            "colour: blue\nbindings:\n  zeta: z\n  alpha: a\n",
        );

        let settings = SettingsLoader::new().with_optional_file(rc).load().unwrap();
        let keys: Vec<_> = settings.bindings.keys().map(String::as_str).collect();
        assert_eq!(keys, ["zeta", "alpha"]);
    }

    #[test]
    fn locations_report_existence() {
        let temp = TempDir::new().unwrap();
        let present = write(&temp, "rc.yml", "author: Sam\n");
        let loader = SettingsLoader::new()
            .with_optional_file(&present)
            .with_optional_file(temp.path().join("nope.yml"));

        let exists: Vec<_> = loader.locations().iter().map(|l| l.exists).collect();
        assert_eq!(exists, [true, true, false]);
    }
}
