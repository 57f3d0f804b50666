//! Ecosystem presets for the scaffold generator.
//!
//! Each preset is a set of components that plug a package manager into a
//! project: manifest synthesizers bound to the project's dependency
//! registry, plus the maintenance tasks that drive the package manager.

pub mod error;
pub mod python;

pub use error::{Error, Result};
pub use python::{Pip, PipOptions, PythonProject, PythonProjectOptions, RequirementsFile};
