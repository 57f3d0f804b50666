//! End-to-end test for a pip-managed project
//!
//! Exercises the full flow: declare dependencies -> synthesize files and
//! manifests -> post-synthesis runs the install task through the runtime.
#![cfg(unix)]

use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;
use pretty_assertions::assert_eq;
use scaffold_core::{ProjectOptions, TaskOptions, TaskRuntime};
use scaffold_fs::NormalizedPath;
use scaffold_presets::{PipOptions, PythonProject, PythonProjectOptions};
use scaffold_test_utils::{FakePip, append_step, exit_step, read_log};

fn pip_project(temp: &TempDir, fake: &FakePip) -> PythonProject {
    PythonProject::new(PythonProjectOptions {
        project: ProjectOptions::new("app", temp.path()),
        pip: PipOptions {
            pip: fake.command(),
            ..PipOptions::default()
        },
    })
    .unwrap()
}

#[test]
fn test_synth_writes_files_and_installs() {
    let temp = TempDir::new().unwrap();
    let fake = FakePip::install(temp.path());
    let project = pip_project(&temp, &fake);

    project.add_dependency("requests@^2.0").unwrap();
    project.add_dev_dependency("pytest@*").unwrap();

    project.synth().unwrap();

    temp.child("requirements.txt")
        .assert(predicate::str::diff("requests>=2.0,<3\n"));
    temp.child("requirements-dev.txt")
        .assert(predicate::str::diff("pytest\n"));
    temp.child(".scaffold/tasks.json")
        .assert(predicate::str::contains("\"install\""));
    temp.child(".scaffold/deps.json")
        .assert(predicate::str::contains("\"requests\""));

    assert_eq!(
        fake.invocations(),
        vec![
            "install --upgrade pip",
            "install -r requirements.txt",
            "install -r requirements-dev.txt",
        ]
    );
}

#[test]
fn test_post_synthesis_disabled_skips_install() {
    let temp = TempDir::new().unwrap();
    let fake = FakePip::install(temp.path());
    let project = PythonProject::new(PythonProjectOptions {
        project: ProjectOptions {
            post_synthesis: false,
            ..ProjectOptions::new("app", temp.path())
        },
        pip: PipOptions {
            pip: fake.command(),
            ..PipOptions::default()
        },
    })
    .unwrap();
    project.add_dependency("requests@^2.0").unwrap();

    project.synth().unwrap();

    temp.child("requirements.txt").assert(predicate::path::exists());
    assert!(fake.invocations().is_empty());

    // The synthesized task can still be run on demand.
    TaskRuntime::new(temp.path()).run_task("install").unwrap();
    assert_eq!(fake.invocations().len(), 3);
}

#[test]
fn test_extra_install_steps_run_after_pip() {
    let temp = TempDir::new().unwrap();
    let fake = FakePip::install(temp.path());
    let log = temp.path().join("hooks.log");
    let project = pip_project(&temp, &fake);

    project
        .pip()
        .unwrap()
        .install_task()
        .exec(append_step(&log, "post-install"));

    project.synth().unwrap();

    assert_eq!(fake.invocations().len(), 3);
    assert_eq!(read_log(&log), vec!["post-install"]);
}

#[test]
fn test_failed_install_surfaces_step_error() {
    let temp = TempDir::new().unwrap();
    let fake = FakePip::install(temp.path());
    let marker = temp.path().join("after-failure.log");
    let project = pip_project(&temp, &fake);

    let install = project.pip().unwrap().install_task().clone();
    install.prepend_exec(exit_step(7));
    install.exec(append_step(&marker, "ran"));

    let err = project.synth().unwrap_err();
    assert!(
        matches!(
            err,
            scaffold_presets::Error::Core(scaffold_core::Error::TaskStepFailed {
                step_index: 0,
                exit_code: Some(7),
                ..
            })
        ),
        "got {err:?}"
    );

    // Files were written before post-synthesis failed.
    temp.child("requirements.txt").assert(predicate::path::exists());
    assert!(fake.invocations().is_empty());
    assert!(read_log(&marker).is_empty());
}

#[test]
fn test_project_tasks_are_runnable_from_manifest() {
    let temp = TempDir::new().unwrap();
    let fake = FakePip::install(temp.path());
    let log = temp.path().join("test.log");
    let project = pip_project(&temp, &fake);

    project
        .project()
        .unwrap()
        .add_task("test", TaskOptions::described("Run the test suite"))
        .unwrap()
        .exec(append_step(&log, "pytest"));

    project.synth().unwrap();

    let manifest: serde_json::Value = serde_json::from_str(
        &std::fs::read_to_string(temp.path().join(".scaffold/tasks.json")).unwrap(),
    )
    .unwrap();
    let names: Vec<_> = manifest["tasks"]
        .as_object()
        .unwrap()
        .keys()
        .cloned()
        .collect();
    assert_eq!(names, vec!["install", "test"]);

    let runtime = TaskRuntime::new(NormalizedPath::new(temp.path()));
    runtime.run_task("test").unwrap();
    assert_eq!(read_log(&log), vec!["pytest"]);
}
