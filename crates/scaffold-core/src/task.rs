//! Task model
//!
//! A task is a named, flat list of shell steps declared while the
//! component tree is built. Tasks are data only: they are serialized into
//! the task manifest during synthesis and executed later by
//! [`TaskRuntime`](crate::runtime::TaskRuntime), which never sees these
//! in-memory objects.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// One shell-level invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskStep {
    /// Command line handed to the host shell unmodified
    pub exec: String,
    /// Label used in logs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Working directory relative to the runtime's working directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cwd: Option<String>,
}

impl TaskStep {
    pub fn exec(command: impl Into<String>) -> Self {
        Self {
            exec: command.into(),
            name: None,
            cwd: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_cwd(mut self, cwd: impl Into<String>) -> Self {
        self.cwd = Some(cwd.into());
        self
    }
}

/// Serialized form of a task, as stored in the task manifest
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskSpec {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub env: BTreeMap<String, String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<TaskStep>,
}

/// Options for [`Tasks::add_task`]
#[derive(Debug, Clone, Default)]
pub struct TaskOptions {
    pub description: Option<String>,
    pub env: BTreeMap<String, String>,
    /// Initial steps; more can be appended with [`Task::exec`]
    pub steps: Vec<TaskStep>,
}

impl TaskOptions {
    pub fn described(description: impl Into<String>) -> Self {
        Self {
            description: Some(description.into()),
            ..Self::default()
        }
    }
}

/// Live handle to a declared task.
///
/// The handle stays valid after registration, so whoever created the task
/// can keep appending steps until synthesis serializes it.
#[derive(Debug, Clone)]
pub struct Task {
    spec: Rc<RefCell<TaskSpec>>,
}

impl Task {
    fn new(spec: TaskSpec) -> Self {
        Self {
            spec: Rc::new(RefCell::new(spec)),
        }
    }

    pub fn name(&self) -> String {
        self.spec.borrow().name.clone()
    }

    pub fn description(&self) -> Option<String> {
        self.spec.borrow().description.clone()
    }

    /// Append a shell command.
    pub fn exec(&self, command: impl Into<String>) {
        self.exec_step(TaskStep::exec(command));
    }

    /// Append a fully specified step.
    pub fn exec_step(&self, step: TaskStep) {
        self.spec.borrow_mut().steps.push(step);
    }

    /// Insert a shell command before every existing step.
    pub fn prepend_exec(&self, command: impl Into<String>) {
        self.spec.borrow_mut().steps.insert(0, TaskStep::exec(command));
    }

    /// Drop every step declared so far.
    pub fn reset(&self) {
        self.spec.borrow_mut().steps.clear();
    }

    /// Set an environment variable for every step of the task.
    pub fn env(&self, key: impl Into<String>, value: impl Into<String>) {
        self.spec.borrow_mut().env.insert(key.into(), value.into());
    }

    pub fn steps(&self) -> Vec<TaskStep> {
        self.spec.borrow().steps.clone()
    }

    /// Snapshot of the task for serialization.
    pub fn to_spec(&self) -> TaskSpec {
        self.spec.borrow().clone()
    }
}

/// Shared handle to a project's task registry
#[derive(Debug, Clone, Default)]
pub struct Tasks {
    tasks: Rc<RefCell<Vec<Task>>>,
}

impl Tasks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a new task.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DuplicateTask`] if the name is already taken.
    pub fn add_task(&self, name: impl Into<String>, options: TaskOptions) -> Result<Task> {
        let name = name.into();
        if self.try_find(&name).is_some() {
            return Err(Error::DuplicateTask { name });
        }

        let task = Task::new(TaskSpec {
            name,
            description: options.description,
            env: options.env,
            steps: options.steps,
        });
        tracing::debug!(task = %task.name(), "declared task");
        self.tasks.borrow_mut().push(task.clone());
        Ok(task)
    }

    pub fn try_find(&self, name: &str) -> Option<Task> {
        self.tasks
            .borrow()
            .iter()
            .find(|task| task.spec.borrow().name == name)
            .cloned()
    }

    /// Every task in declaration order.
    pub fn all(&self) -> Vec<Task> {
        self.tasks.borrow().clone()
    }

    pub fn len(&self) -> usize {
        self.tasks.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.borrow().is_empty()
    }

    /// Serializable snapshot of every task.
    pub fn to_manifest(&self) -> TaskManifest {
        TaskManifest {
            tasks: self
                .tasks
                .borrow()
                .iter()
                .map(|task| {
                    let spec = task.to_spec();
                    (spec.name.clone(), spec)
                })
                .collect(),
        }
    }
}

/// The intermediate form shared by synthesis and the task runtime
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskManifest {
    #[serde(default)]
    pub tasks: BTreeMap<String, TaskSpec>,
}

impl TaskManifest {
    pub fn get(&self, name: &str) -> Option<&TaskSpec> {
        self.tasks.get(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn step_serialization_omits_unset_fields() {
        let json = serde_json::to_string(&TaskStep::exec("pip install -r requirements.txt"))
            .unwrap();
        assert_eq!(json, r#"{"exec":"pip install -r requirements.txt"}"#);
    }

    #[test]
    fn spec_deserializes_with_defaults() {
        let spec: TaskSpec = serde_json::from_str(r#"{"name":"noop"}"#).unwrap();
        assert_eq!(spec.name, "noop");
        assert!(spec.steps.is_empty());
        assert!(spec.env.is_empty());
        assert!(spec.description.is_none());
    }

    #[test]
    fn manifest_keys_are_sorted() {
        let tasks = Tasks::new();
        tasks.add_task("test", TaskOptions::default()).unwrap();
        tasks.add_task("build", TaskOptions::default()).unwrap();

        let keys: Vec<_> = tasks.to_manifest().tasks.into_keys().collect();
        assert_eq!(keys, vec!["build", "test"]);
    }
}
