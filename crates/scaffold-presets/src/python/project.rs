//! Python project facade

use scaffold_core::{
    ComponentTree, Dependency, NodeId, Project, ProjectOptions, SynthReport, synth,
};
use scaffold_fs::{ConfigStore, NormalizedPath};
use serde::Deserialize;

use super::pip::{Pip, PipOptions};
use crate::error::{Error, Result};

/// Options for [`PythonProject`]
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PythonProjectOptions {
    #[serde(flatten)]
    pub project: ProjectOptions,
    pub pip: PipOptions,
}

/// A project tree whose dependencies are managed by pip
pub struct PythonProject {
    tree: ComponentTree,
    pip: NodeId,
}

impl PythonProject {
    pub fn new(options: PythonProjectOptions) -> Result<Self> {
        let mut tree = Project::bootstrap(options.project)?;
        let root = tree.root();
        let pip = Pip::new(&mut tree, root, options.pip)?;
        Ok(Self { tree, pip })
    }

    /// Build a project from a TOML, JSON or YAML options file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let options: PythonProjectOptions = ConfigStore::new().load(path)?;
        Self::new(options)
    }

    pub fn tree(&self) -> &ComponentTree {
        &self.tree
    }

    /// Mutable access for attaching further components.
    pub fn tree_mut(&mut self) -> &mut ComponentTree {
        &mut self.tree
    }

    pub fn root(&self) -> NodeId {
        self.tree.root()
    }

    pub fn project(&self) -> Result<&Project> {
        Ok(Project::of(&self.tree, self.tree.root())?)
    }

    pub fn pip(&self) -> Result<&Pip> {
        self.tree
            .get::<Pip>(self.pip)
            .ok_or_else(|| Error::ComponentMissing {
                kind: "Pip",
                path: self.tree.path(self.pip),
            })
    }

    /// Add a runtime dependency (`<module>@<requirement>`).
    pub fn add_dependency(&self, spec: &str) -> Result<Dependency> {
        Ok(self.pip()?.add_dependency(spec)?)
    }

    /// Add a development dependency (`<module>@<requirement>`).
    pub fn add_dev_dependency(&self, spec: &str) -> Result<Dependency> {
        Ok(self.pip()?.add_dev_dependency(spec)?)
    }

    /// Synthesize the tree and, unless disabled, install dependencies.
    pub fn synth(&self) -> Result<SynthReport> {
        Ok(synth(&self.tree)?)
    }
}
