use super::DomainError;
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A path of rendered directory segments, guaranteed to be relative.
///
/// Invariant: never absolute and never contains `..`. Enforced at construction.
///
/// Joining returns a new value, so two sibling branches of a tree walk can
/// each extend the same parent path without seeing each other's segments.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct RelativePath(PathBuf);

impl RelativePath {
    /// The empty path (the output root).
    pub fn root() -> Self {
        Self(PathBuf::new())
    }

    /// Fallible constructor.
    pub fn try_new(path: impl Into<PathBuf>) -> Result<Self, DomainError> {
        let path = path.into();
        check_relative(&path)?;
        Ok(Self(path))
    }

    /// Append one segment, leaving `self` untouched.
    pub fn join(&self, segment: impl AsRef<Path>) -> Result<Self, DomainError> {
        let segment = segment.as_ref();
        check_relative(segment)?;
        Ok(Self(self.0.join(segment)))
    }

    pub fn is_root(&self) -> bool {
        self.0.as_os_str().is_empty()
    }

    pub fn as_path(&self) -> &Path {
        &self.0
    }

    /// Number of directory segments.
    pub fn depth(&self) -> usize {
        self.0.components().count()
    }

    /// Render with `/` separators regardless of platform.
    ///
    /// Build settings in the project descriptor always use forward slashes.
    pub fn to_slash_string(&self) -> String {
        self.0
            .components()
            .map(|c| c.as_os_str().to_string_lossy().into_owned())
            .collect::<Vec<_>>()
            .join("/")
    }

    pub fn into_path_buf(self) -> PathBuf {
        self.0
    }
}

fn check_relative(path: &Path) -> Result<(), DomainError> {
    let rooted = path
        .components()
        .any(|c| matches!(c, Component::RootDir | Component::Prefix(_)));
    if path.is_absolute() || rooted {
        return Err(DomainError::AbsolutePathNotAllowed {
            path: path.display().to_string(),
        });
    }
    if path.components().any(|c| c == Component::ParentDir) {
        return Err(DomainError::PathTraversal {
            path: path.display().to_string(),
        });
    }
    Ok(())
}

impl AsRef<Path> for RelativePath {
    fn as_ref(&self) -> &Path {
        &self.0
    }
}

impl serde::Serialize for RelativePath {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_slash_string())
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_slash_string())
    }
}
