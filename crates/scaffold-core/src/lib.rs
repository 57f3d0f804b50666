//! Core model of the scaffold generator
//!
//! This crate provides:
//!
//! - **Component tree**: arena-owned hierarchy with typed upward lookup
//! - **Dependency registry**: append-only typed declarations and the lazy
//!   [`PackageProvider`] views manifest synthesizers pull from
//! - **Task model**: named, ordered shell steps declared at construction time
//! - **Task runtime**: executes synthesized tasks, aborting on the first
//!   failing step
//! - **Lifecycle**: the synthesize and post-synthesize phases
//!
//! # Architecture
//!
//! ```text
//!          scaffold-presets
//!                 |
//!           scaffold-core
//!                 |
//!            scaffold-fs
//! ```
//!
//! # Example
//!
//! ```no_run
//! use scaffold_core::{DependencyType, Project, ProjectOptions, TaskOptions, synth};
//!
//! fn example() -> scaffold_core::Result<()> {
//!     let tree = Project::bootstrap(ProjectOptions::new("demo", "out"))?;
//!     let project = Project::of(&tree, tree.root())?;
//!     project.deps().add_dependency("requests@^2.0", DependencyType::Runtime)?;
//!     project
//!         .add_task("hello", TaskOptions::described("Say hello"))?
//!         .exec("echo hello");
//!     synth(&tree)?;
//!     Ok(())
//! }
//! ```

pub mod component;
pub mod dependencies;
pub mod error;
pub mod manifest;
pub mod project;
pub mod provider;
pub mod runtime;
pub mod synth;
pub mod task;

pub use component::{Component, ComponentTree, NodeId};
pub use dependencies::{ANY_VERSION, Dependencies, Dependency, DependencyType};
pub use error::{Error, Result, SynthFailure};
pub use manifest::{DependencyManifest, DependencyManifestFile, TaskManifestFile};
pub use project::{Project, ProjectOptions};
pub use provider::{PackageProvider, TypedPackageProvider};
pub use runtime::TaskRuntime;
pub use synth::{DISABLE_POST_ENV, SynthContext, SynthReport, SynthesizedFile, synth};
pub use task::{Task, TaskManifest, TaskOptions, TaskSpec, TaskStep, Tasks};
