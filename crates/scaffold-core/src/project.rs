//! Project component
//!
//! A project owns the dependency registry and task registry of everything
//! beneath it in the tree, and fixes the output directory that synthesized
//! paths are relative to. Components find their project by walking up the
//! tree with [`Project::of`].

use std::path::PathBuf;

use scaffold_fs::{ConfigStore, NormalizedPath};
use serde::Deserialize;

use crate::component::{Component, ComponentTree, NodeId};
use crate::dependencies::Dependencies;
use crate::error::{Error, Result};
use crate::manifest::{DependencyManifestFile, TaskManifestFile};
use crate::task::{Task, TaskOptions, Tasks};

/// Project configuration
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct ProjectOptions {
    pub name: String,
    /// Output directory; relative paths resolve against the parent
    /// project's outdir (or the process working directory for a root)
    pub outdir: PathBuf,
    /// Run the post-synthesis phase (e.g. installing dependencies)
    pub post_synthesis: bool,
}

impl Default for ProjectOptions {
    fn default() -> Self {
        Self {
            name: "project".to_string(),
            outdir: PathBuf::from("."),
            post_synthesis: true,
        }
    }
}

impl ProjectOptions {
    pub fn new(name: impl Into<String>, outdir: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            outdir: outdir.into(),
            ..Self::default()
        }
    }

    /// Load options from a TOML, JSON or YAML file.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        Ok(ConfigStore::new().load(path)?)
    }
}

/// Root of a generated project
#[derive(Debug)]
pub struct Project {
    name: String,
    outdir: NormalizedPath,
    post_synthesis: bool,
    deps: Dependencies,
    tasks: Tasks,
}

impl Component for Project {}

impl Project {
    fn from_options(options: ProjectOptions, outdir: NormalizedPath) -> Self {
        Self {
            name: options.name,
            outdir,
            post_synthesis: options.post_synthesis,
            deps: Dependencies::new(),
            tasks: Tasks::new(),
        }
    }

    /// Create a tree rooted at a new project.
    pub fn bootstrap(options: ProjectOptions) -> Result<ComponentTree> {
        let outdir = NormalizedPath::new(&options.outdir);
        let name = options.name.clone();
        let project = Self::from_options(options, outdir);
        let attach = ManifestHandles::of(&project);

        let mut tree = ComponentTree::new(name, project);
        let root = tree.root();
        attach.add_to(&mut tree, root)?;
        tracing::debug!(project = %tree.name(root), "bootstrapped project");
        Ok(tree)
    }

    /// Nest a project under `scope`.
    ///
    /// A relative outdir resolves against the enclosing project's outdir.
    pub fn add_subproject(
        tree: &mut ComponentTree,
        scope: NodeId,
        options: ProjectOptions,
    ) -> Result<NodeId> {
        let parent = Self::of(tree, scope)?;
        let outdir = parent.outdir.resolve(&options.outdir);
        let name = options.name.clone();
        let project = Self::from_options(options, outdir);
        let attach = ManifestHandles::of(&project);

        let id = tree.add(scope, name, project)?;
        attach.add_to(tree, id)?;
        Ok(id)
    }

    /// The nearest project at or above `id`.
    pub fn of(tree: &ComponentTree, id: NodeId) -> Result<&Project> {
        Self::find(tree, id)
            .map(|(_, project)| project)
            .ok_or_else(|| Error::NoEnclosingProject {
                path: tree.path(id),
            })
    }

    /// Like [`Project::of`], also returning the project's node.
    pub fn find(tree: &ComponentTree, id: NodeId) -> Option<(NodeId, &Project)> {
        tree.find_ancestor::<Project>(id)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn outdir(&self) -> &NormalizedPath {
        &self.outdir
    }

    pub fn post_synthesis(&self) -> bool {
        self.post_synthesis
    }

    pub fn deps(&self) -> &Dependencies {
        &self.deps
    }

    pub fn tasks(&self) -> &Tasks {
        &self.tasks
    }

    /// Register a task on this project.
    pub fn add_task(&self, name: impl Into<String>, options: TaskOptions) -> Result<Task> {
        self.tasks.add_task(name, options)
    }
}

/// Registry handles captured before the project moves into the tree
struct ManifestHandles {
    deps: Dependencies,
    tasks: Tasks,
}

impl ManifestHandles {
    fn of(project: &Project) -> Self {
        Self {
            deps: project.deps.clone(),
            tasks: project.tasks.clone(),
        }
    }

    fn add_to(self, tree: &mut ComponentTree, project: NodeId) -> Result<()> {
        tree.add(project, "Tasks", TaskManifestFile::new(self.tasks))?;
        tree.add(project, "Deps", DependencyManifestFile::new(self.deps))?;
        Ok(())
    }
}
