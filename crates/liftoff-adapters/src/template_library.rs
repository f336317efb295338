//! Template materializer backed by user template directories and the
//! built-in set.
//!
//! A template id is resolved against each search directory in order, then
//! against the built-ins. The first hit wins, so a user can shadow any
//! built-in by dropping a file with the same name into a search directory.
//! Search directories are read, and output written, through the injected
//! [`Filesystem`].

use std::{
    collections::BTreeMap,
    fmt,
    path::{Path, PathBuf},
};

use serde::Serialize;
use tracing::{debug, instrument, warn};

use liftoff_core::{
    application::{
        ApplicationError,
        ports::{Filesystem, TemplateMaterializer, TemplateRenderer},
    },
    domain::{RelativePath, RenderContext},
    error::LiftoffResult,
};

use crate::builtin_templates;

/// Where a template body came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "path", rename_all = "snake_case")]
pub enum TemplateOrigin {
    File(PathBuf),
    Builtin,
}

impl fmt::Display for TemplateOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "{}", path.display()),
            Self::Builtin => f.write_str("built-in"),
        }
    }
}

/// A template visible to the library.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateEntry {
    pub id: String,
    pub origin: TemplateOrigin,
}

pub struct TemplateLibrary {
    search_dirs: Vec<PathBuf>,
    renderer: Box<dyn TemplateRenderer>,
    filesystem: Box<dyn Filesystem>,
}

impl TemplateLibrary {
    /// A library that only knows the built-in templates.
    pub fn new(renderer: Box<dyn TemplateRenderer>, filesystem: Box<dyn Filesystem>) -> Self {
        Self {
            search_dirs: Vec::new(),
            renderer,
            filesystem,
        }
    }

    /// Append a search directory. Earlier directories take precedence.
    pub fn with_search_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.search_dirs.push(dir.into());
        self
    }

    pub fn with_search_dirs<I, P>(mut self, dirs: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.search_dirs.extend(dirs.into_iter().map(Into::into));
        self
    }

    /// Append the standard locations (env override, project, home).
    pub fn with_default_search_paths(self) -> Self {
        self.with_search_dirs(builtin_templates::candidate_paths())
    }

    pub fn search_dirs(&self) -> &[PathBuf] {
        &self.search_dirs
    }

    /// Find the raw body of `id` without rendering it.
    #[instrument(skip(self))]
    pub fn resolve(&self, id: &str) -> LiftoffResult<(String, TemplateOrigin)> {
        let relative = RelativePath::try_new(id)?;

        for dir in &self.search_dirs {
            let candidate = dir.join(relative.as_path());
            if let Some(body) = self.filesystem.read_to_string(&candidate)? {
                debug!(path = %candidate.display(), "template found in search directory");
                return Ok((body, TemplateOrigin::File(candidate)));
            }
        }

        builtin_templates::builtin(id)
            .map(|body| (body.to_string(), TemplateOrigin::Builtin))
            .ok_or_else(|| ApplicationError::TemplateNotFound { id: id.to_string() }.into())
    }

    /// Every template id visible to this library, sorted by id.
    ///
    /// When an id exists in several places only the winning origin is listed.
    pub fn available(&self) -> Vec<TemplateEntry> {
        let mut seen: BTreeMap<String, TemplateOrigin> = BTreeMap::new();

        for dir in &self.search_dirs {
            let files = match self.filesystem.list_files(dir) {
                Ok(files) => files,
                Err(e) => {
                    warn!(dir = %dir.display(), error = %e, "skipping unreadable template directory");
                    continue;
                }
            };
            for path in files {
                if let Some(id) = template_id(dir, &path) {
                    seen.entry(id).or_insert(TemplateOrigin::File(path));
                }
            }
        }

        for id in builtin_templates::builtin_ids() {
            seen.entry(id.to_string()).or_insert(TemplateOrigin::Builtin);
        }

        seen.into_iter()
            .map(|(id, origin)| TemplateEntry { id, origin })
            .collect()
    }
}

/// Slash-separated id of `path` relative to `root`.
fn template_id(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    let parts: Vec<_> = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect();
    (!parts.is_empty()).then(|| parts.join("/"))
}

impl TemplateMaterializer for TemplateLibrary {
    #[instrument(skip(self, context), fields(destination = %destination.display()))]
    fn generate(
        &self,
        template_id: &str,
        destination: &Path,
        context: &RenderContext,
    ) -> LiftoffResult<()> {
        let (body, origin) = self.resolve(template_id)?;
        let rendered = self.renderer.render(&body, context)?;
        self.filesystem.write_file(destination, &rendered)?;
        debug!(%origin, bytes = rendered.len(), "template materialized");
        Ok(())
    }
}
