//! Generator metadata manifests
//!
//! Every project writes its task set to `.scaffold/tasks.json` (the only
//! channel between declaration and the task runtime) and a snapshot of its
//! dependency registry to `.scaffold/deps.json`.

use scaffold_fs::ScaffoldPath;
use serde::{Deserialize, Serialize};

use crate::component::Component;
use crate::dependencies::{Dependencies, Dependency};
use crate::error::Result;
use crate::synth::SynthContext;
use crate::task::Tasks;

/// Writes the project's task manifest
#[derive(Debug)]
pub struct TaskManifestFile {
    tasks: Tasks,
}

impl TaskManifestFile {
    pub fn new(tasks: Tasks) -> Self {
        Self { tasks }
    }
}

impl Component for TaskManifestFile {
    fn synthesize(&self, ctx: &SynthContext<'_>) -> Result<()> {
        ctx.write_config(ScaffoldPath::TasksManifest.as_str(), &self.tasks.to_manifest())?;
        Ok(())
    }
}

/// On-disk form of the dependency registry
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DependencyManifest {
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

/// Writes the project's dependency manifest
#[derive(Debug)]
pub struct DependencyManifestFile {
    deps: Dependencies,
}

impl DependencyManifestFile {
    pub fn new(deps: Dependencies) -> Self {
        Self { deps }
    }
}

impl Component for DependencyManifestFile {
    fn synthesize(&self, ctx: &SynthContext<'_>) -> Result<()> {
        let manifest = DependencyManifest {
            dependencies: self.deps.all(),
        };
        ctx.write_config(ScaffoldPath::DepsManifest.as_str(), &manifest)?;
        Ok(())
    }
}
