//! Integration tests for the analyze command.
//!
//! Drives the built binary against fixture workspaces, with a stub shell
//! script standing in for the external linthub cli.

#![cfg(unix)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::PathBuf;

use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use predicates::prelude::*;

const STUB: &str = r#"#!/bin/sh
linter=""
while [ $# -gt 0 ]; do
  case "$1" in
    --linter) linter="$2"; shift 2 ;;
    *) shift ;;
  esac
done
case "$linter" in
  mock-a)
    printf '%s' '{"Files":[{"Path":"index.js","Errors":[{"Message":"missing semicolon","Severity":0,"Row":{"Start":1,"End":1},"Column":{"Start":12,"End":13}}]}]}'
    ;;
  mock-b)
    printf '%s' '{"Files":[{"Path":"index.js","Errors":[{"Message":"unexpected console","Severity":1,"Row":{"Start":2,"End":2},"Column":{"Start":0,"End":7}}]}]}'
    ;;
  failing)
    echo 'analyzer crashed' >&2
    exit 1
    ;;
  *)
    printf '%s' '{"Files":[]}'
    ;;
esac
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

fn workspace_with(linters: &[&str]) -> (TempDir, PathBuf) {
    let workspace = TempDir::new().unwrap();
    for linter in linters {
        workspace
            .child(format!(".linthub/{linter}"))
            .create_dir_all()
            .unwrap();
    }
    workspace.child("index.js").write_str("console.log(1)\n").unwrap();

    let cli_path = workspace.path().join("stub-cli");
    fs::write(&cli_path, STUB).unwrap();
    fs::set_permissions(&cli_path, fs::Permissions::from_mode(0o755)).unwrap();

    (workspace, cli_path)
}

#[test]
fn merges_findings_across_linters() {
    let (workspace, cli_path) = workspace_with(&["mock-a", "mock-b"]);

    lhub_cmd()
        .arg("--cli")
        .arg(&cli_path)
        .arg("analyze")
        .arg(workspace.path())
        .assert()
        .failure()
        .code(1)
        .stdout(predicate::str::contains("missing semicolon"))
        .stdout(predicate::str::contains("unexpected console"))
        .stdout(predicate::str::contains("[mock-a]"))
        .stdout(predicate::str::contains("[mock-b]"))
        .stdout(predicate::str::contains("Found 2 findings across 1 files"));
}

#[test]
fn failing_linter_does_not_block_the_pass() {
    let (workspace, cli_path) = workspace_with(&["mock-a", "failing"]);

    lhub_cmd()
        .arg("--cli")
        .arg(&cli_path)
        .arg("analyze")
        .arg(workspace.path())
        .assert()
        .code(1)
        .stdout(predicate::str::contains("missing semicolon"))
        .stderr(predicate::str::contains("failing"));
}

#[test]
fn warning_only_findings_exit_zero() {
    let (workspace, cli_path) = workspace_with(&["mock-b"]);

    lhub_cmd()
        .arg("--cli")
        .arg(&cli_path)
        .arg("analyze")
        .arg(workspace.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("unexpected console"));
}

#[test]
fn empty_workspace_reports_no_findings() {
    let (workspace, cli_path) = workspace_with(&[]);

    lhub_cmd()
        .arg("--cli")
        .arg(&cli_path)
        .arg("analyze")
        .arg(workspace.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("Found 0 findings across 0 files"));
}

#[test]
fn json_output_is_machine_readable() {
    let (workspace, cli_path) = workspace_with(&["mock-a"]);

    let output = lhub_cmd()
        .arg("--cli")
        .arg(&cli_path)
        .arg("analyze")
        .arg(workspace.path())
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let sets = parsed.as_array().unwrap();
    assert_eq!(sets.len(), 1);

    let findings = sets[0]["findings"].as_array().unwrap();
    assert_eq!(findings.len(), 1);
    assert_eq!(findings[0]["severity"], "error");
    assert_eq!(findings[0]["source"], "mock-a");
}

#[test]
fn missing_cli_is_a_hard_error() {
    let (workspace, _) = workspace_with(&["mock-a"]);

    lhub_cmd()
        .arg("--cli")
        .arg(workspace.path().join("nonexistent"))
        .arg("analyze")
        .arg(workspace.path())
        .assert()
        .code(2)
        .stderr(predicate::str::contains("not found"));
}
