//! Normalized path handling for synthesized output locations

use std::path::{Path, PathBuf};

use crate::{Error, Result};

/// A path normalized to use forward slashes internally.
///
/// Output directories and manifest locations are stored in this form so
/// that synthesized paths compare and display the same on every platform.
/// Conversion back to a native `PathBuf` happens only at I/O boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NormalizedPath {
    inner: String,
}

impl NormalizedPath {
    /// Create a new NormalizedPath from any path-like input.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path_str = path.as_ref().to_string_lossy();
        Self {
            inner: path_str.replace('\\', "/"),
        }
    }

    /// Get the internal normalized string representation.
    pub fn as_str(&self) -> &str {
        &self.inner
    }

    /// Convert to a platform-native PathBuf for I/O operations.
    pub fn to_native(&self) -> PathBuf {
        PathBuf::from(&self.inner)
    }

    /// Whether the path is absolute on this platform.
    ///
    /// A leading `/` always counts, so normalized Windows drive paths
    /// (`C:/...`) and Unix paths behave the same.
    pub fn is_absolute(&self) -> bool {
        self.inner.starts_with('/') || self.to_native().is_absolute()
    }

    /// Join this path with a relative segment.
    ///
    /// Empty and `.` components of the segment are dropped.
    pub fn join(&self, segment: &str) -> Self {
        let segment = segment.replace('\\', "/");
        let mut joined = self.inner.trim_end_matches('/').to_string();
        if joined.is_empty() && self.inner.starts_with('/') {
            joined.push('/');
        }
        for part in segment.split('/').filter(|p| !p.is_empty() && *p != ".") {
            if !joined.is_empty() && !joined.ends_with('/') {
                joined.push('/');
            }
            joined.push_str(part);
        }
        if joined.is_empty() {
            joined.push('.');
        }
        Self { inner: joined }
    }

    /// Resolve `other` against this path.
    ///
    /// Absolute paths are returned unchanged; relative ones are joined.
    pub fn resolve(&self, other: impl AsRef<Path>) -> Self {
        let other = Self::new(other);
        if other.is_absolute() {
            other
        } else {
            self.join(other.as_str())
        }
    }

    /// Get the parent directory.
    pub fn parent(&self) -> Option<Self> {
        let trimmed = self.inner.trim_end_matches('/');
        match trimmed.rfind('/') {
            Some(0) => Some(Self {
                inner: "/".to_string(),
            }),
            Some(idx) => Some(Self {
                inner: trimmed[..idx].to_string(),
            }),
            None => None,
        }
    }

    /// Get the file name component.
    pub fn file_name(&self) -> Option<&str> {
        let trimmed = self.inner.trim_end_matches('/');
        trimmed.rsplit('/').next().filter(|name| !name.is_empty())
    }

    /// Get the extension if present.
    pub fn extension(&self) -> Option<&str> {
        self.file_name().and_then(|name| {
            let idx = name.rfind('.')?;
            if idx == 0 { None } else { Some(&name[idx + 1..]) }
        })
    }

    /// Check if this path exists on the filesystem.
    pub fn exists(&self) -> bool {
        self.to_native().exists()
    }

    /// Check if this is a directory.
    pub fn is_dir(&self) -> bool {
        self.to_native().is_dir()
    }

    /// Check if this is a file.
    pub fn is_file(&self) -> bool {
        self.to_native().is_file()
    }

    /// Canonicalize against the filesystem, without UNC prefixes on Windows.
    pub fn canonicalize(&self) -> Result<Self> {
        let native = self.to_native();
        dunce::canonicalize(&native)
            .map(Self::new)
            .map_err(|e| Error::io(native, e))
    }

    /// Component-wise prefix check.
    pub fn starts_with(&self, base: &NormalizedPath) -> bool {
        self.to_native().starts_with(base.to_native())
    }
}

impl AsRef<Path> for NormalizedPath {
    fn as_ref(&self) -> &Path {
        Path::new(&self.inner)
    }
}

impl std::fmt::Display for NormalizedPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.inner)
    }
}

impl From<&str> for NormalizedPath {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for NormalizedPath {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

impl From<PathBuf> for NormalizedPath {
    fn from(p: PathBuf) -> Self {
        Self::new(p)
    }
}

impl From<&Path> for NormalizedPath {
    fn from(p: &Path) -> Self {
        Self::new(p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn join_skips_dot_and_empty_segments() {
        let base = NormalizedPath::new("/out");
        assert_eq!(base.join("./.scaffold//tasks.json").as_str(), "/out/.scaffold/tasks.json");
    }

    #[test]
    fn join_on_root() {
        assert_eq!(NormalizedPath::new("/").join("a").as_str(), "/a");
    }

    #[test]
    fn join_on_empty_base() {
        assert_eq!(NormalizedPath::new("").join("a").as_str(), "a");
        assert_eq!(NormalizedPath::new("").join(".").as_str(), ".");
    }

    #[test]
    fn file_name_of_root_is_none() {
        assert_eq!(NormalizedPath::new("/").file_name(), None);
    }
}
