//! In-memory filesystem adapter for testing and dry runs.

use std::{
    collections::{BTreeMap, BTreeSet},
    path::{Path, PathBuf},
    sync::{Arc, PoisonError, RwLock},
};

use liftoff_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{LiftoffError, LiftoffResult},
};

/// In-memory filesystem. Clones share the same contents.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    inner: Arc<RwLock<MemoryFilesystemInner>>,
}

#[derive(Debug, Default)]
struct MemoryFilesystemInner {
    files: BTreeMap<PathBuf, String>,
    directories: BTreeSet<PathBuf>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Read a file's content.
    pub fn read_file(&self, path: &Path) -> Option<String> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.files.get(path).cloned()
    }

    /// All files, sorted by path.
    pub fn list_files(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.files.keys().cloned().collect()
    }

    /// All directories, sorted by path.
    pub fn list_directories(&self) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.directories.iter().cloned().collect()
    }

    /// Files directly inside `dir`.
    pub fn files_in(&self, dir: &Path) -> Vec<PathBuf> {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner
            .files
            .keys()
            .filter(|p| p.parent() == Some(dir))
            .cloned()
            .collect()
    }
}

fn lock_error(path: &Path) -> LiftoffError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "memory filesystem lock poisoned".into(),
    }
    .into()
}

impl Filesystem for MemoryFilesystem {
    fn create_dir_all(&self, path: &Path) -> LiftoffResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;

        let mut current = PathBuf::new();
        for component in path.components() {
            current.push(component);
            inner.directories.insert(current.clone());
        }

        Ok(())
    }

    fn write_file(&self, path: &Path, content: &str) -> LiftoffResult<()> {
        let mut inner = self.inner.write().map_err(|_| lock_error(path))?;

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !inner.directories.contains(parent) {
                return Err(ApplicationError::FilesystemError {
                    path: path.to_path_buf(),
                    reason: "Parent directory does not exist".into(),
                }
                .into());
            }
        }

        inner.files.insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let inner = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        inner.files.contains_key(path) || inner.directories.contains(path)
    }

    fn read_to_string(&self, path: &Path) -> LiftoffResult<Option<String>> {
        let inner = self.inner.read().map_err(|_| lock_error(path))?;
        Ok(inner.files.get(path).cloned())
    }

    fn list_files(&self, dir: &Path) -> LiftoffResult<Vec<PathBuf>> {
        let inner = self.inner.read().map_err(|_| lock_error(dir))?;
        Ok(inner
            .files
            .keys()
            .filter(|p| p.starts_with(dir) && p.as_path() != dir)
            .cloned()
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clones_share_state() {
        let fs = MemoryFilesystem::new();
        let other = fs.clone();

        other.create_dir_all(Path::new("a/b")).unwrap();
        other.write_file(Path::new("a/b/c.m"), "int x;").unwrap();

        assert!(fs.exists(Path::new("a")));
        assert!(fs.exists(Path::new("a/b")));
        assert_eq!(fs.read_file(Path::new("a/b/c.m")).as_deref(), Some("int x;"));
        assert_eq!(fs.files_in(Path::new("a/b")), [PathBuf::from("a/b/c.m")]);
    }

    #[test]
    fn lists_files_below_a_directory() {
        let fs = MemoryFilesystem::new();
        fs.create_dir_all(Path::new("tpl/Views")).unwrap();
        fs.create_dir_all(Path::new("tplx")).unwrap();
        fs.write_file(Path::new("tpl/main.m"), "main").unwrap();
        fs.write_file(Path::new("tpl/Views/Cell.m"), "").unwrap();
        fs.write_file(Path::new("tplx/other.m"), "").unwrap();

        assert_eq!(
            Filesystem::list_files(&fs, Path::new("tpl")).unwrap(),
            [PathBuf::from("tpl/Views/Cell.m"), PathBuf::from("tpl/main.m")]
        );
        assert!(Filesystem::list_files(&fs, Path::new("missing")).unwrap().is_empty());
        assert_eq!(
            Filesystem::read_to_string(&fs, Path::new("tpl/main.m")).unwrap().as_deref(),
            Some("main")
        );
        assert_eq!(Filesystem::read_to_string(&fs, Path::new("tpl")).unwrap(), None);
    }

    #[test]
    fn write_requires_parent() {
        let fs = MemoryFilesystem::new();
        assert!(fs.write_file(Path::new("nope/file.m"), "").is_err());
        assert!(fs.write_file(Path::new("top.md"), "").is_ok());
    }
}
