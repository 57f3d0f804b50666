//! Shell step fixtures for task and lifecycle tests.
//!
//! Steps are plain command strings run through `sh -c`, so these helpers
//! are Unix-only in practice. Side effects land in files so a test can
//! assert what ran, and in which order, after the fact.

use std::fs;
use std::path::{Path, PathBuf};

/// Quote a path for interpolation into a POSIX shell command.
pub fn sh_quote(path: &Path) -> String {
    format!("'{}'", path.display().to_string().replace('\'', r"'\''"))
}

/// A step that creates `marker` when it runs.
pub fn touch_step(marker: &Path) -> String {
    format!("touch {}", sh_quote(marker))
}

/// A step that appends `label` to `log` when it runs.
pub fn append_step(log: &Path, label: &str) -> String {
    format!("echo {} >> {}", label, sh_quote(log))
}

/// A step that exits with `code` without doing anything else.
pub fn exit_step(code: i32) -> String {
    format!("exit {code}")
}

/// Lines of `log`, or an empty list if nothing was ever appended.
pub fn read_log(log: &Path) -> Vec<String> {
    fs::read_to_string(log)
        .map(|content| content.lines().map(str::to_string).collect())
        .unwrap_or_default()
}

/// A stand-in for `pip` that records each invocation instead of installing.
pub struct FakePip {
    script: PathBuf,
    log: PathBuf,
}

impl FakePip {
    /// Write the fake script into `dir`.
    ///
    /// # Panics
    /// Panics if the script cannot be written.
    pub fn install(dir: &Path) -> Self {
        let script = dir.join("fake-pip.sh");
        let log = dir.join("pip.log");
        let body = format!("#!/bin/sh\necho \"$*\" >> {}\n", sh_quote(&log));
        fs::write(&script, body)
            .unwrap_or_else(|e| panic!("FakePip::install: failed to write script: {e}"));
        Self { script, log }
    }

    /// Command to use in place of `pip`.
    pub fn command(&self) -> String {
        format!("sh {}", sh_quote(&self.script))
    }

    /// Argument lists pip was called with, one entry per invocation.
    pub fn invocations(&self) -> Vec<String> {
        read_log(&self.log)
    }
}

/// A temporary directory to use as a project outdir.
///
/// # Panics
/// Panics if the directory cannot be created.
pub fn temp_outdir() -> tempfile::TempDir {
    tempfile::TempDir::new().unwrap_or_else(|e| panic!("temp_outdir: {e}"))
}
