//! Task runtime
//!
//! Executes tasks from the synthesized task manifest of a working
//! directory. Steps run one at a time through the host shell; the first
//! step that exits non-zero aborts the task.

use std::process::Command;

use scaffold_fs::{ConfigStore, NormalizedPath, ScaffoldPath};

use crate::error::{Error, Result};
use crate::task::{TaskManifest, TaskSpec, TaskStep};

/// Executor bound to a working directory
#[derive(Debug, Clone)]
pub struct TaskRuntime {
    workdir: NormalizedPath,
}

impl TaskRuntime {
    pub fn new(workdir: impl Into<NormalizedPath>) -> Self {
        Self {
            workdir: workdir.into(),
        }
    }

    pub fn workdir(&self) -> &NormalizedPath {
        &self.workdir
    }

    /// Location of the task manifest this runtime reads.
    pub fn manifest_path(&self) -> NormalizedPath {
        self.workdir.join(ScaffoldPath::TasksManifest.as_str())
    }

    /// Load the synthesized task set.
    ///
    /// A working directory that was never synthesized has no tasks.
    pub fn manifest(&self) -> Result<TaskManifest> {
        let manifest = ConfigStore::new().load_optional(&self.manifest_path())?;
        Ok(manifest.unwrap_or_default())
    }

    /// Every synthesized task, sorted by name.
    pub fn tasks(&self) -> Result<Vec<TaskSpec>> {
        Ok(self.manifest()?.tasks.into_values().collect())
    }

    pub fn try_find_task(&self, name: &str) -> Result<Option<TaskSpec>> {
        Ok(self.manifest()?.tasks.remove(name))
    }

    /// Run a synthesized task to completion.
    ///
    /// # Errors
    ///
    /// - [`Error::TaskNotFound`] if no task with that name was synthesized;
    ///   nothing is spawned in that case.
    /// - [`Error::TaskStepFailed`] for the first step that exits non-zero;
    ///   later steps are not run.
    pub fn run_task(&self, name: &str) -> Result<()> {
        let task = self
            .try_find_task(name)?
            .ok_or_else(|| Error::TaskNotFound {
                name: name.to_string(),
            })?;

        tracing::info!(task = %task.name, workdir = %self.workdir, "running task");
        for (index, step) in task.steps.iter().enumerate() {
            self.run_step(&task, index, step)?;
        }
        tracing::debug!(task = %task.name, steps = task.steps.len(), "task complete");
        Ok(())
    }

    fn run_step(&self, task: &TaskSpec, index: usize, step: &TaskStep) -> Result<()> {
        let cwd = self.step_cwd(task, index, step)?;
        tracing::debug!(
            task = %task.name,
            step = index,
            name = step.name.as_deref().unwrap_or(""),
            cwd = %cwd,
            "{}",
            step.exec
        );

        let status = shell_command(&step.exec)
            .current_dir(cwd.to_native())
            .envs(&task.env)
            .status()
            .map_err(|source| Error::StepSpawn {
                task: task.name.clone(),
                step_index: index,
                source,
            })?;

        if !status.success() {
            tracing::warn!(task = %task.name, step = index, code = ?status.code(), "step failed");
            return Err(Error::TaskStepFailed {
                task: task.name.clone(),
                step_index: index,
                exit_code: status.code(),
            });
        }
        Ok(())
    }

    /// Resolve a step's working directory, refusing anything that
    /// canonicalizes outside the runtime's working directory.
    fn step_cwd(&self, task: &TaskSpec, index: usize, step: &TaskStep) -> Result<NormalizedPath> {
        let Some(cwd) = step.cwd.as_deref() else {
            return Ok(self.workdir.clone());
        };
        let resolved = self.workdir.resolve(cwd);

        // Missing directories are left for the spawn to report.
        if let (Ok(canon_cwd), Ok(canon_workdir)) =
            (resolved.canonicalize(), self.workdir.canonicalize())
            && !canon_cwd.starts_with(&canon_workdir)
        {
            return Err(Error::StepCwdOutsideWorkdir {
                task: task.name.clone(),
                step_index: index,
                cwd: resolved.to_native(),
                workdir: self.workdir.to_native(),
            });
        }
        Ok(resolved)
    }
}

fn shell_command(command: &str) -> Command {
    if cfg!(windows) {
        let mut cmd = Command::new("cmd");
        cmd.args(["/C", command]);
        cmd
    } else {
        let mut cmd = Command::new("sh");
        cmd.args(["-c", command]);
        cmd
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn manifest_path_is_under_workdir() {
        let runtime = TaskRuntime::new("/work/app");
        assert_eq!(runtime.manifest_path().as_str(), "/work/app/.scaffold/tasks.json");
    }

    #[test]
    fn unsynthesized_workdir_has_no_tasks() {
        let temp = tempfile::TempDir::new().unwrap();
        let runtime = TaskRuntime::new(temp.path());
        assert!(runtime.tasks().unwrap().is_empty());
    }
}
