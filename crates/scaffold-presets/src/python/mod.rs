//! Python presets

mod pip;
mod project;
mod requirements;

pub use pip::{INSTALL_TASK, Pip, PipOptions};
pub use project::{PythonProject, PythonProjectOptions};
pub use requirements::{RequirementsFile, RequirementsFileOptions, format_requirement};
