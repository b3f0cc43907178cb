//! Integration tests for catalog, activation, and config bootstrap.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use assert_cmd::Command;
use assert_fs::TempDir;
use predicates::prelude::*;

const STUB: &str = r#"#!/bin/sh
for arg in "$@"; do
  if [ "$arg" = "--catalog" ]; then
    printf '%s' '{"Linters":[{"Name":"eslint","Description":"Pluggable JavaScript linter"},{"Name":"csslint","Description":"CSS rules checker"}]}'
    exit 0
  fi
  if [ "$arg" = "--init" ]; then
    touch "$(pwd)/init-ran"
    exit 0
  fi
done
printf '%s' '{"Files":[]}'
"#;

fn lhub_cmd() -> Command {
    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let workspace_root = manifest_dir
        .parent()
        .and_then(|p| p.parent())
        .expect("Failed to find workspace root");
    let bin_path = workspace_root.join("target/debug/lhub");
    Command::new(bin_path)
}

fn stub_cli(workspace: &TempDir) -> PathBuf {
    let cli_path = workspace.path().join("stub-cli");
    fs::write(&cli_path, STUB).unwrap();
    fs::set_permissions(&cli_path, fs::Permissions::from_mode(0o755)).unwrap();
    cli_path
}

#[test]
fn catalog_lists_available_linters() {
    let workspace = TempDir::new().unwrap();
    let cli_path = stub_cli(&workspace);

    lhub_cmd()
        .arg("--cli")
        .arg(&cli_path)
        .arg("catalog")
        .assert()
        .success()
        .stdout(predicate::str::contains("eslint"))
        .stdout(predicate::str::contains("Pluggable JavaScript linter"))
        .stdout(predicate::str::contains("2 linters available"));
}

#[test]
fn activate_then_deactivate_round_trip() {
    let workspace = TempDir::new().unwrap();

    lhub_cmd()
        .arg("activate")
        .arg("eslint")
        .arg("--project")
        .arg(workspace.path())
        .assert()
        .success();
    assert!(workspace.path().join(".linthub/eslint").is_dir());

    lhub_cmd()
        .arg("deactivate")
        .arg("eslint")
        .arg("--project")
        .arg(workspace.path())
        .assert()
        .success();
    assert!(!workspace.path().join(".linthub/eslint").exists());
}

#[test]
fn activate_rejects_path_like_names() {
    let workspace = TempDir::new().unwrap();

    lhub_cmd()
        .arg("activate")
        .arg("../escape")
        .arg("--project")
        .arg(workspace.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("Invalid linter name"));
}

#[test]
fn init_runs_the_cli_in_init_mode() {
    let workspace = TempDir::new().unwrap();
    let cli_path = stub_cli(&workspace);

    lhub_cmd()
        .current_dir(workspace.path())
        .arg("--cli")
        .arg(&cli_path)
        .arg("init")
        .arg("eslint")
        .arg("--project")
        .arg(workspace.path())
        .assert()
        .success();

    assert!(workspace.path().join("init-ran").exists());
}
