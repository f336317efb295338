use serde::Serialize;

use super::common::RelativePath;

/// What a run would create, computed without touching disk or the project model.
///
/// Produced by a dry run. Entries appear in walk order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ProjectPlan {
    entries: Vec<PlannedEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlannedEntry {
    Directory {
        path: RelativePath,
    },
    File {
        path: RelativePath,
        template: String,
        /// Added to the application target's sources.
        compiled: bool,
        /// Build settings that point at this file.
        build_settings: Vec<&'static str>,
    },
}

impl ProjectPlan {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a directory. Repeats are ignored, matching the idempotent
    /// directory creation of a real run.
    pub fn add_directory(&mut self, path: RelativePath) {
        if !self.directories().any(|existing| existing == &path) {
            self.entries.push(PlannedEntry::Directory { path });
        }
    }

    pub fn add_file(
        &mut self,
        path: RelativePath,
        template: impl Into<String>,
        compiled: bool,
        build_settings: Vec<&'static str>,
    ) {
        self.entries.push(PlannedEntry::File {
            path,
            template: template.into(),
            compiled,
            build_settings,
        });
    }

    pub fn entries(&self) -> &[PlannedEntry] {
        &self.entries
    }

    pub fn directories(&self) -> impl Iterator<Item = &RelativePath> {
        self.entries.iter().filter_map(|e| match e {
            PlannedEntry::Directory { path } => Some(path),
            _ => None,
        })
    }

    pub fn files(&self) -> impl Iterator<Item = &RelativePath> {
        self.entries.iter().filter_map(|e| match e {
            PlannedEntry::File { path, .. } => Some(path),
            _ => None,
        })
    }

    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }
}
