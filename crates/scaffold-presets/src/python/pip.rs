//! pip dependency manager

use scaffold_core::{
    Component, ComponentTree, Dependencies, Dependency, DependencyType, Error, NodeId, Project,
    Result, SynthContext, Task, TaskOptions, TaskRuntime, TypedPackageProvider,
};
use scaffold_fs::NormalizedPath;
use serde::Deserialize;

use super::requirements::{RequirementsFile, RequirementsFileOptions};

/// Name of the task that installs the project's dependencies
pub const INSTALL_TASK: &str = "install";

/// Options for [`Pip`]
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct PipOptions {
    /// Command used to invoke pip in the install task
    pub pip: String,
    pub requirements_file: String,
    pub dev_requirements_file: String,
}

impl Default for PipOptions {
    fn default() -> Self {
        Self {
            pip: "pip".to_string(),
            requirements_file: "requirements.txt".to_string(),
            dev_requirements_file: "requirements-dev.txt".to_string(),
        }
    }
}

/// Manages dependencies with requirements files and the pip CLI.
///
/// Construction adds a runtime and a dev requirements file to the
/// enclosing project and registers its `install` task. After synthesis,
/// the post-synthesis phase runs that task from the project outdir.
#[derive(Debug)]
pub struct Pip {
    deps: Dependencies,
    install_task: Task,
    outdir: NormalizedPath,
}

impl Pip {
    /// Attach pip to the project enclosing `scope`.
    ///
    /// Every name pip needs (the `install` task, both requirements files
    /// under the project and `Pip` under `scope`) is checked before
    /// anything is declared, so a failed call leaves the tree and the task
    /// registry untouched.
    pub fn new(tree: &mut ComponentTree, scope: NodeId, options: PipOptions) -> Result<NodeId> {
        let (project_id, project) =
            Project::find(tree, scope).ok_or_else(|| Error::NoEnclosingProject {
                path: tree.path(scope),
            })?;
        if project.tasks().try_find(INSTALL_TASK).is_some() {
            return Err(Error::DuplicateTask {
                name: INSTALL_TASK.to_string(),
            });
        }
        let claims = [
            (project_id, options.requirements_file.as_str()),
            (project_id, options.dev_requirements_file.as_str()),
            (scope, "Pip"),
        ];
        for (i, &(parent, name)) in claims.iter().enumerate() {
            if tree.child(parent, name).is_some() || claims[..i].contains(&(parent, name)) {
                return Err(Error::DuplicateComponent {
                    scope: tree.path(parent),
                    name: name.to_string(),
                });
            }
        }

        let deps = project.deps().clone();
        let outdir = project.outdir().clone();
        let install_task = project.add_task(
            INSTALL_TASK,
            TaskOptions::described("Install and upgrade dependencies"),
        )?;
        install_task.exec(format!("{} install --upgrade pip", options.pip));
        install_task.exec(format!("{} install -r {}", options.pip, options.requirements_file));
        install_task.exec(format!(
            "{} install -r {}",
            options.pip, options.dev_requirements_file
        ));

        RequirementsFile::new(
            tree,
            project_id,
            options.requirements_file,
            RequirementsFileOptions {
                package_provider: Box::new(TypedPackageProvider::runtime(deps.clone())),
            },
        )?;
        RequirementsFile::new(
            tree,
            project_id,
            options.dev_requirements_file,
            RequirementsFileOptions {
                package_provider: Box::new(TypedPackageProvider::devenv(deps.clone())),
            },
        )?;

        tree.add(
            scope,
            "Pip",
            Self {
                deps,
                install_task,
                outdir,
            },
        )
    }

    /// Add a runtime dependency.
    ///
    /// `spec` has the form `<module>@<requirement>`.
    pub fn add_dependency(&self, spec: &str) -> Result<Dependency> {
        self.deps.add_dependency(spec, DependencyType::Runtime)
    }

    /// Add a development dependency.
    ///
    /// `spec` has the form `<module>@<requirement>`.
    pub fn add_dev_dependency(&self, spec: &str) -> Result<Dependency> {
        self.deps.add_dependency(spec, DependencyType::Devenv)
    }

    pub fn install_task(&self) -> &Task {
        &self.install_task
    }

    /// Run the synthesized install task in the project outdir.
    pub fn install_dependencies(&self) -> Result<()> {
        tracing::info!(outdir = %self.outdir, "Installing dependencies...");
        TaskRuntime::new(self.outdir.clone()).run_task(&self.install_task.name())
    }
}

impl Component for Pip {
    fn post_synthesize(&self, _ctx: &SynthContext<'_>) -> Result<()> {
        self.install_dependencies()
    }
}
