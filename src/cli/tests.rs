use std::fs;

use super::build::{cmd_build, BuildArgs};
use super::resolve_jack_files;

#[test]
fn resolve_single_file_returns_itself() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("Main.jack");
    fs::write(&path, "class Main {}").unwrap();

    let files = resolve_jack_files(&path).unwrap();
    assert_eq!(files, vec![path]);
}

#[test]
fn resolve_directory_finds_jack_files_only() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("Main.jack"), "class Main {}").unwrap();
    fs::write(dir.path().join("Other.jack"), "class Other {}").unwrap();
    fs::write(dir.path().join("README.md"), "not jack").unwrap();

    let files = resolve_jack_files(dir.path()).unwrap();
    let names: Vec<_> = files
        .iter()
        .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
        .collect();
    assert_eq!(names, vec!["Main.jack", "Other.jack"]);
}

#[test]
fn directory_build_with_output_override_writes_into_that_directory() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("Main.jack"),
        "class Main { function void main() { return; } }",
    )
    .unwrap();

    let out_dir = dir.path().join("out");
    cmd_build(BuildArgs {
        input: dir.path().to_path_buf(),
        output: Some(out_dir.clone()),
    });

    let compiled = fs::read_to_string(out_dir.join("Main.vm")).unwrap();
    assert_eq!(compiled, "function Main.main 0\npush constant 0\nreturn\n");
}
