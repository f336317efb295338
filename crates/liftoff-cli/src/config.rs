//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by value. The
//! CLI layer owns config; the core crate only ever sees a finished
//! `ProjectConfiguration`.
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags (handled at the call-site, not here)
//! 2. `--config FILE`
//! 3. `./.liftoffrc`
//! 4. `~/.liftoffrc`
//! 5. Built-in defaults (always present)

use std::path::PathBuf;

use liftoff_adapters::{LiftoffSettings, SettingsLoader, SettingsLocation};
use liftoff_core::error::LiftoffError;
use tracing::debug;

use crate::error::{CliError, CliResult};

/// Merged settings plus where they were looked up.
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub settings: LiftoffSettings,
    pub locations: Vec<SettingsLocation>,
}

impl AppConfig {
    /// Load and merge every settings layer.
    ///
    /// `config_file` is the path passed via `--config`; it must exist.
    pub fn load(config_file: Option<&PathBuf>) -> CliResult<Self> {
        let loader = Self::loader(config_file);
        let settings = loader
            .load()
            .map_err(|e| CliError::Core(LiftoffError::from(e)))?;

        debug!(
            company = settings.company.as_deref().unwrap_or(""),
            bindings = settings.bindings.len(),
            nodes = settings.directories.nodes().len(),
            "Settings loaded"
        );

        Ok(Self {
            locations: loader.locations(),
            settings,
        })
    }

    fn loader(config_file: Option<&PathBuf>) -> SettingsLoader {
        let loader = SettingsLoader::new().with_standard_locations();
        match config_file {
            Some(path) => loader.with_required_file(path),
            None => loader,
        }
    }
}
