//! Well-known paths written by the generator, relative to a project outdir.

use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScaffoldPath {
    /// Serialized task definitions read by the task runtime
    TasksManifest,
    /// Serialized dependency registry
    DepsManifest,
}

impl ScaffoldPath {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TasksManifest => ".scaffold/tasks.json",
            Self::DepsManifest => ".scaffold/deps.json",
        }
    }
}

impl AsRef<Path> for ScaffoldPath {
    fn as_ref(&self) -> &Path {
        Path::new(self.as_str())
    }
}

impl AsRef<str> for ScaffoldPath {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl std::fmt::Display for ScaffoldPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
