//! Synthesis lifecycle
//!
//! Declaration happens while the tree is built. [`synth`] then runs the two
//! remaining phases in order:
//!
//! 1. **synthesize** - every component writes its artifacts. A failing
//!    component is recorded and the others still run; there is no
//!    cross-file transaction.
//! 2. **post-synthesize** - runs only when every component synthesized,
//!    stops at the first error and skips the components of projects that
//!    opt out. This is where dependency installation happens.

use std::cell::RefCell;

use scaffold_fs::{ConfigStore, NormalizedPath, WriteOutcome, io};
use serde::Serialize;

use crate::component::{ComponentTree, NodeId};
use crate::error::{Error, Result, SynthFailure};
use crate::project::Project;

/// Set to a non-empty value other than `0`/`false` to skip post-synthesis.
pub const DISABLE_POST_ENV: &str = "SCAFFOLD_DISABLE_POST";

/// A file produced during synthesis
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynthesizedFile {
    pub path: NormalizedPath,
    pub outcome: WriteOutcome,
}

/// Outcome of the synthesize phase
#[derive(Debug, Default)]
pub struct SynthReport {
    pub files: Vec<SynthesizedFile>,
    pub failures: Vec<SynthFailure>,
}

impl SynthReport {
    pub fn is_success(&self) -> bool {
        self.failures.is_empty()
    }

    /// Turn recorded failures into [`Error::Synthesis`].
    pub fn into_result(self) -> Result<Self> {
        if self.failures.is_empty() {
            Ok(self)
        } else {
            Err(Error::Synthesis {
                failures: self.failures,
            })
        }
    }

    /// The outcome for a synthesized path, if one was written.
    pub fn outcome(&self, path: &NormalizedPath) -> Option<WriteOutcome> {
        self.files
            .iter()
            .find(|file| &file.path == path)
            .map(|file| file.outcome)
    }
}

/// What a component sees while it synthesizes
pub struct SynthContext<'a> {
    tree: &'a ComponentTree,
    node: NodeId,
    files: &'a RefCell<Vec<SynthesizedFile>>,
}

impl<'a> SynthContext<'a> {
    pub fn tree(&self) -> &'a ComponentTree {
        self.tree
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    /// Tree path of the component being synthesized.
    pub fn path(&self) -> String {
        self.tree.path(self.node)
    }

    /// The nearest project enclosing this component.
    pub fn project(&self) -> Result<&'a Project> {
        Project::of(self.tree, self.node)
    }

    /// Output directory of the enclosing project.
    pub fn outdir(&self) -> Result<NormalizedPath> {
        Ok(self.project()?.outdir().clone())
    }

    /// Write `content` to `file_name` under the project outdir.
    pub fn write_text(&self, file_name: &str, content: &str) -> Result<WriteOutcome> {
        let path = self.outdir()?.join(file_name);
        let outcome = io::sync_text(&path, content)?;
        self.record(path, outcome);
        Ok(outcome)
    }

    /// Serialize `value` to `file_name` under the project outdir, in the
    /// format implied by its extension.
    pub fn write_config<T: Serialize>(&self, file_name: &str, value: &T) -> Result<WriteOutcome> {
        let path = self.outdir()?.join(file_name);
        let outcome = ConfigStore::new().save(&path, value)?;
        self.record(path, outcome);
        Ok(outcome)
    }

    fn record(&self, path: NormalizedPath, outcome: WriteOutcome) {
        self.files
            .borrow_mut()
            .push(SynthesizedFile { path, outcome });
    }
}

impl ComponentTree {
    /// Run the synthesize phase over every component, in pre-order.
    pub fn synthesize(&self) -> SynthReport {
        let files = RefCell::new(Vec::new());
        let mut failures = Vec::new();

        for node in self.descendants(self.root()) {
            let ctx = SynthContext {
                tree: self,
                node,
                files: &files,
            };
            if let Err(error) = self.component(node).synthesize(&ctx) {
                let component = self.path(node);
                tracing::warn!(%component, %error, "synthesis failed");
                failures.push(SynthFailure {
                    component,
                    error: Box::new(error),
                });
            }
        }

        SynthReport {
            files: files.into_inner(),
            failures,
        }
    }

    /// Run the post-synthesize phase, stopping at the first error.
    ///
    /// Components whose nearest project disables post-synthesis are
    /// skipped; components outside any project always run.
    pub fn post_synthesize(&self) -> Result<()> {
        let files = RefCell::new(Vec::new());
        for node in self.descendants(self.root()) {
            if let Some((_, project)) = Project::find(self, node)
                && !project.post_synthesis()
            {
                continue;
            }
            let ctx = SynthContext {
                tree: self,
                node,
                files: &files,
            };
            self.component(node).post_synthesize(&ctx)?;
        }
        Ok(())
    }
}

/// Synthesize the tree, then run post-synthesis.
///
/// Setting [`DISABLE_POST_ENV`] skips post-synthesis for the whole tree;
/// otherwise each project's own `post_synthesis` flag applies to the
/// components it encloses.
pub fn synth(tree: &ComponentTree) -> Result<SynthReport> {
    tracing::info!(root = %tree.name(tree.root()), "synthesizing");
    let report = tree.synthesize().into_result()?;

    if post_disabled_by_env() {
        tracing::debug!("post-synthesis disabled by {DISABLE_POST_ENV}");
    } else {
        tree.post_synthesize()?;
    }

    Ok(report)
}

fn post_disabled_by_env() -> bool {
    std::env::var(DISABLE_POST_ENV)
        .map(|value| env_flag(&value))
        .unwrap_or(false)
}

fn env_flag(value: &str) -> bool {
    let value = value.trim();
    !(value.is_empty() || value == "0" || value.eq_ignore_ascii_case("false"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_flag_values() {
        assert!(env_flag("1"));
        assert!(env_flag("true"));
        assert!(!env_flag(""));
        assert!(!env_flag("0"));
        assert!(!env_flag("FALSE"));
    }

    #[test]
    fn empty_report_is_success() {
        let report = SynthReport::default();
        assert!(report.is_success());
        assert!(report.into_result().is_ok());
    }
}
