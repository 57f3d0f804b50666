//! Component tree and project lookup tests

use pretty_assertions::assert_eq;
use scaffold_core::{
    Component, ComponentTree, Error, Project, ProjectOptions, TaskManifestFile,
};
use scaffold_fs::NormalizedPath;

struct Group;
impl Component for Group {}

struct Leaf;
impl Component for Leaf {}

#[test]
fn test_bootstrap_attaches_manifest_components() {
    let tree = Project::bootstrap(ProjectOptions::new("app", "/tmp/app")).unwrap();
    let names: Vec<_> = tree
        .children(tree.root())
        .iter()
        .map(|&id| tree.name(id).to_string())
        .collect();
    assert_eq!(names, vec!["Tasks", "Deps"]);

    let tasks = tree.children(tree.root())[0];
    assert!(tree.get::<TaskManifestFile>(tasks).is_some());
}

#[test]
fn test_find_enclosing_project_from_nested_component() {
    let mut tree = Project::bootstrap(ProjectOptions::new("app", "/tmp/app")).unwrap();
    let group = tree.add(tree.root(), "Group", Group).unwrap();
    let leaf = tree.add(group, "Leaf", Leaf).unwrap();

    let project = Project::of(&tree, leaf).unwrap();
    assert_eq!(project.name(), "app");
    assert_eq!(tree.path(leaf), "app/Group/Leaf");
}

#[test]
fn test_find_ancestor_returns_nearest() {
    let mut tree = Project::bootstrap(ProjectOptions::new("app", "/tmp/app")).unwrap();
    let root = tree.root();
    let sub = Project::add_subproject(
        &mut tree,
        root,
        ProjectOptions::new("api", "packages/api"),
    )
    .unwrap();
    let leaf = tree.add(sub, "Leaf", Leaf).unwrap();

    let (id, project) = Project::find(&tree, leaf).unwrap();
    assert_eq!(id, sub);
    assert_eq!(project.name(), "api");
}

#[test]
fn test_subproject_relative_outdir_resolves_against_parent() {
    let mut tree = Project::bootstrap(ProjectOptions::new("app", "/tmp/app")).unwrap();
    let root = tree.root();
    let sub = Project::add_subproject(
        &mut tree,
        root,
        ProjectOptions::new("api", "packages/api"),
    )
    .unwrap();

    let project = tree.get::<Project>(sub).unwrap();
    assert_eq!(project.outdir(), &NormalizedPath::new("/tmp/app/packages/api"));
}

#[test]
fn test_subproject_absolute_outdir_is_kept() {
    let mut tree = Project::bootstrap(ProjectOptions::new("app", "/tmp/app")).unwrap();
    let root = tree.root();
    let sub = Project::add_subproject(
        &mut tree,
        root,
        ProjectOptions::new("docs", "/srv/docs"),
    )
    .unwrap();

    assert_eq!(tree.get::<Project>(sub).unwrap().outdir().as_str(), "/srv/docs");
}

#[test]
fn test_subprojects_have_separate_registries() {
    let mut tree = Project::bootstrap(ProjectOptions::new("app", "/tmp/app")).unwrap();
    let root = tree.root();
    let sub = Project::add_subproject(
        &mut tree,
        root,
        ProjectOptions::new("api", "api"),
    )
    .unwrap();

    Project::of(&tree, sub)
        .unwrap()
        .deps()
        .add_dependency("fastapi", scaffold_core::DependencyType::Runtime)
        .unwrap();

    assert!(Project::of(&tree, tree.root()).unwrap().deps().is_empty());
}

#[test]
fn test_duplicate_sibling_name_is_rejected() {
    let mut tree = Project::bootstrap(ProjectOptions::new("app", "/tmp/app")).unwrap();
    tree.add(tree.root(), "Leaf", Leaf).unwrap();

    let err = tree.add(tree.root(), "Leaf", Leaf).unwrap_err();
    match err {
        Error::DuplicateComponent { scope, name } => {
            assert_eq!(scope, "app");
            assert_eq!(name, "Leaf");
        }
        other => panic!("expected DuplicateComponent, got {other:?}"),
    }
}

#[test]
fn test_same_name_under_different_parents_is_allowed() {
    let mut tree = Project::bootstrap(ProjectOptions::new("app", "/tmp/app")).unwrap();
    let a = tree.add(tree.root(), "A", Group).unwrap();
    let b = tree.add(tree.root(), "B", Group).unwrap();

    assert!(tree.add(a, "Leaf", Leaf).is_ok());
    assert!(tree.add(b, "Leaf", Leaf).is_ok());
}

#[test]
fn test_no_enclosing_project() {
    let mut tree = ComponentTree::new("loose", Group);
    let leaf = tree.add(tree.root(), "Leaf", Leaf).unwrap();

    let err = Project::of(&tree, leaf).unwrap_err();
    assert!(
        matches!(&err, Error::NoEnclosingProject { path } if path == "loose/Leaf"),
        "got {err:?}"
    );
}

#[test]
fn test_ancestors_walk_to_root() {
    let mut tree = ComponentTree::new("root", Group);
    let a = tree.add(tree.root(), "a", Group).unwrap();
    let b = tree.add(a, "b", Leaf).unwrap();

    let chain: Vec<_> = tree.ancestors(b).collect();
    assert_eq!(chain, vec![b, a, tree.root()]);
    assert_eq!(tree.parent(tree.root()), None);
}

#[test]
fn test_project_options_from_toml() {
    let options: ProjectOptions = toml::from_str(
        r#"
name = "app"
outdir = "build/app"
post-synthesis = false
"#,
    )
    .unwrap();

    assert_eq!(options.name, "app");
    assert_eq!(options.outdir, std::path::PathBuf::from("build/app"));
    assert!(!options.post_synthesis);
}

#[test]
fn test_project_options_defaults() {
    let options: ProjectOptions = toml::from_str(r#"name = "app""#).unwrap();
    assert_eq!(options.outdir, std::path::PathBuf::from("."));
    assert!(options.post_synthesis);
}
