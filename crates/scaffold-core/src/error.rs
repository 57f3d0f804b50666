//! Error types for scaffold-core

use std::fmt;
use std::path::PathBuf;

/// Result type for scaffold-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in scaffold-core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Dependency spec has no package name
    #[error("Malformed dependency spec '{spec}': expected <name>@<requirement>")]
    MalformedSpec { spec: String },

    /// A task with this name is already registered on the project
    #[error("Duplicate task: {name}")]
    DuplicateTask { name: String },

    /// A sibling component already uses this name
    #[error("Duplicate component '{name}' under {scope}")]
    DuplicateComponent { scope: String, name: String },

    /// No project encloses the given component
    #[error("No enclosing project for component {path}")]
    NoEnclosingProject { path: String },

    /// No synthesized task with this name
    #[error("Task not found: {name}")]
    TaskNotFound { name: String },

    /// A task step exited non-zero; remaining steps were skipped
    #[error("Task '{task}' failed at step {step_index} (exit code: {})", display_code(*exit_code))]
    TaskStepFailed {
        task: String,
        step_index: usize,
        exit_code: Option<i32>,
    },

    /// A task step could not be started
    #[error("Task '{task}' could not start step {step_index}: {source}")]
    StepSpawn {
        task: String,
        step_index: usize,
        #[source]
        source: std::io::Error,
    },

    /// A step's working directory escapes the runtime working directory
    #[error("Task '{task}' step {step_index} cwd {cwd:?} is outside {workdir:?}")]
    StepCwdOutsideWorkdir {
        task: String,
        step_index: usize,
        cwd: PathBuf,
        workdir: PathBuf,
    },

    /// One or more components failed to synthesize
    #[error("Synthesis failed for {} component(s): {}", failures.len(), SynthFailures(failures))]
    Synthesis { failures: Vec<SynthFailure> },

    /// Filesystem error from scaffold-fs
    #[error(transparent)]
    Fs(#[from] scaffold_fs::Error),

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// A component that failed during the synthesis phase
#[derive(Debug)]
pub struct SynthFailure {
    /// Tree path of the failing component
    pub component: String,
    pub error: Box<Error>,
}

fn display_code(code: Option<i32>) -> String {
    match code {
        Some(code) => code.to_string(),
        None => "terminated by signal".to_string(),
    }
}

struct SynthFailures<'a>(&'a [SynthFailure]);

impl fmt::Display for SynthFailures<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, failure) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, "; ")?;
            }
            write!(f, "{}: {}", failure.component, failure.error)?;
        }
        Ok(())
    }
}
