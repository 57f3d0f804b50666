//! Dependency registry
//!
//! An append-only, ordered store of dependency declarations owned by a
//! project. Duplicate names are kept; deciding which declaration wins is
//! left to whoever consumes the registry.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Requirement recorded when a spec carries no version constraint
pub const ANY_VERSION: &str = "*";

/// How a dependency is used by the project
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum DependencyType {
    /// Needed at runtime
    Runtime,
    /// Expected to be provided by the consumer
    Peer,
    /// Shipped inside the package
    Bundled,
    /// Needed to build
    Build,
    /// Needed to run tests
    Test,
    /// Needed by the development environment
    Devenv,
    /// Forces a version of a transitive dependency
    Override,
    /// Installed when available
    Optional,
}

impl fmt::Display for DependencyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Runtime => "runtime",
            Self::Peer => "peer",
            Self::Bundled => "bundled",
            Self::Build => "build",
            Self::Test => "test",
            Self::Devenv => "devenv",
            Self::Override => "override",
            Self::Optional => "optional",
        };
        f.write_str(name)
    }
}

/// A named, versioned package requirement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    name: String,
    requirement: String,
    #[serde(rename = "type")]
    kind: DependencyType,
}

impl Dependency {
    /// Parse a `<name>@<requirement>` spec.
    ///
    /// The separator is the first `@`, except that scoped names such as
    /// `@scope/pkg@^1.0` keep their leading `@`. A missing or empty
    /// requirement becomes [`ANY_VERSION`].
    pub fn parse(spec: &str, kind: DependencyType) -> Result<Self> {
        let trimmed = spec.trim();
        let scoped = trimmed.starts_with('@')
            && trimmed
                .split('@')
                .nth(1)
                .is_some_and(|scope| scope.contains('/'));
        let split = if scoped {
            trimmed[1..].find('@').map(|idx| idx + 1)
        } else {
            trimmed.find('@')
        };

        let (name, requirement) = match split {
            Some(idx) => (&trimmed[..idx], trimmed[idx + 1..].trim()),
            None => (trimmed, ""),
        };
        let name = name.trim();

        if name.is_empty() {
            return Err(Error::MalformedSpec {
                spec: spec.to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            requirement: if requirement.is_empty() {
                ANY_VERSION.to_string()
            } else {
                requirement.to_string()
            },
            kind,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn requirement(&self) -> &str {
        &self.requirement
    }

    pub fn kind(&self) -> DependencyType {
        self.kind
    }

    /// True when any version satisfies the requirement.
    pub fn is_unconstrained(&self) -> bool {
        self.requirement == ANY_VERSION
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{} ({})", self.name, self.requirement, self.kind)
    }
}

/// Shared handle to a project's dependency registry.
///
/// Cloning the handle does not copy the registry; every clone observes
/// and appends to the same sequence.
#[derive(Debug, Clone, Default)]
pub struct Dependencies {
    entries: Rc<RefCell<Vec<Dependency>>>,
}

impl Dependencies {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse `spec` and append it to the registry.
    pub fn add_dependency(&self, spec: &str, kind: DependencyType) -> Result<Dependency> {
        let dependency = Dependency::parse(spec, kind)?;
        tracing::debug!(dependency = %dependency, "declared dependency");
        self.entries.borrow_mut().push(dependency.clone());
        Ok(dependency)
    }

    /// Every declaration, in insertion order.
    pub fn all(&self) -> Vec<Dependency> {
        self.entries.borrow().clone()
    }

    /// Declarations of one type, in insertion order.
    pub fn of_type(&self, kind: DependencyType) -> Vec<Dependency> {
        self.entries
            .borrow()
            .iter()
            .filter(|dep| dep.kind == kind)
            .cloned()
            .collect()
    }

    /// The most recent declaration of `name` with the given type.
    pub fn try_get(&self, name: &str, kind: DependencyType) -> Option<Dependency> {
        self.entries
            .borrow()
            .iter()
            .rev()
            .find(|dep| dep.name == name && dep.kind == kind)
            .cloned()
    }

    pub fn len(&self) -> usize {
        self.entries.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.borrow().is_empty()
    }
}
