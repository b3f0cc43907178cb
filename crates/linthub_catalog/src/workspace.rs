//! Per-workspace linter activation and config bootstrap.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::info;

use linthub_core::CliCommand;

use crate::CatalogError;

/// Enables a linter for a workspace by creating its directory under the
/// reserved configuration subdirectory. Discovery picks it up on the next
/// pass. Idempotent.
pub fn activate_linter(
    root: &Path,
    dir_name: &str,
    linter: &str,
) -> Result<PathBuf, CatalogError> {
    validate_name(linter)?;

    let dir = root.join(dir_name).join(linter);
    fs::create_dir_all(&dir)?;
    info!(linter, "activated linter");
    Ok(dir)
}

/// Disables a linter for a workspace by removing its directory. Removing a
/// linter that is not active is not an error.
pub fn deactivate_linter(root: &Path, dir_name: &str, linter: &str) -> Result<(), CatalogError> {
    validate_name(linter)?;

    let dir = root.join(dir_name).join(linter);
    if dir.exists() {
        fs::remove_dir_all(&dir)?;
        info!(linter, "deactivated linter");
    }
    Ok(())
}

/// Bootstraps one linter's configuration by running the cli in init mode:
/// `<cli> --linter <name> --project <root> --init`. Synchronous from the
/// caller's perspective; no payload beyond success or failure.
pub async fn create_config(
    cli: &CliCommand,
    linter: &str,
    project: &Path,
) -> Result<(), CatalogError> {
    validate_name(linter)?;

    let output = cli
        .to_command()
        .arg("--linter")
        .arg(linter)
        .arg("--project")
        .arg(project)
        .arg("--init")
        .output()
        .await
        .map_err(|e| CatalogError::invocation(format!("failed to spawn cli: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CatalogError::invocation(format!(
            "config init for '{}' exited with {}: {}",
            linter,
            output.status,
            stderr.trim()
        )));
    }

    info!(linter, "created linter config");
    Ok(())
}

// Linter names become directory names; reject anything that could escape
// the configuration subdirectory.
fn validate_name(linter: &str) -> Result<(), CatalogError> {
    let escapes = linter.is_empty()
        || linter == "."
        || linter == ".."
        || linter.chars().any(std::path::is_separator);
    if escapes {
        return Err(CatalogError::InvalidLinterName(linter.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use linthub_core::{DEFAULT_LINTER_DIR, discover_linters};

    #[test]
    fn activate_then_discover_round_trip() {
        let workspace = tempfile::tempdir().unwrap();

        activate_linter(workspace.path(), DEFAULT_LINTER_DIR, "eslint").unwrap();
        activate_linter(workspace.path(), DEFAULT_LINTER_DIR, "csslint").unwrap();

        let linters = discover_linters(workspace.path(), DEFAULT_LINTER_DIR).unwrap();
        assert_eq!(linters, vec!["csslint", "eslint"]);
    }

    #[test]
    fn activation_is_idempotent() {
        let workspace = tempfile::tempdir().unwrap();

        activate_linter(workspace.path(), DEFAULT_LINTER_DIR, "eslint").unwrap();
        activate_linter(workspace.path(), DEFAULT_LINTER_DIR, "eslint").unwrap();

        let linters = discover_linters(workspace.path(), DEFAULT_LINTER_DIR).unwrap();
        assert_eq!(linters, vec!["eslint"]);
    }

    #[test]
    fn deactivate_removes_the_linter() {
        let workspace = tempfile::tempdir().unwrap();

        activate_linter(workspace.path(), DEFAULT_LINTER_DIR, "eslint").unwrap();
        deactivate_linter(workspace.path(), DEFAULT_LINTER_DIR, "eslint").unwrap();

        let linters = discover_linters(workspace.path(), DEFAULT_LINTER_DIR).unwrap();
        assert!(linters.is_empty());
    }

    #[test]
    fn deactivating_an_inactive_linter_is_ok() {
        let workspace = tempfile::tempdir().unwrap();
        fs::create_dir_all(workspace.path().join(DEFAULT_LINTER_DIR)).unwrap();

        deactivate_linter(workspace.path(), DEFAULT_LINTER_DIR, "eslint").unwrap();
    }

    #[test]
    fn rejects_names_with_path_separators() {
        let workspace = tempfile::tempdir().unwrap();

        for name in ["", ".", "..", "a/b", "../escape"] {
            let err = activate_linter(workspace.path(), DEFAULT_LINTER_DIR, name).unwrap_err();
            assert!(matches!(err, CatalogError::InvalidLinterName(_)), "{name:?}");
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn create_config_runs_cli_in_init_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let marker = dir.path().join("init-args");
        let path = dir.path().join("stub-cli");
        fs::write(&path, format!("#!/bin/sh\necho \"$@\" > {}\n", marker.display())).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        create_config(&CliCommand::new(&path), "eslint", dir.path())
            .await
            .unwrap();

        let argv = fs::read_to_string(&marker).unwrap();
        assert!(argv.contains("--linter eslint"));
        assert!(argv.contains("--init"));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn create_config_surfaces_cli_failure() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("stub-cli");
        fs::write(&path, "#!/bin/sh\necho 'unknown linter' >&2\nexit 1\n").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();

        let err = create_config(&CliCommand::new(&path), "nope", dir.path())
            .await
            .unwrap_err();
        assert!(err.to_string().contains("unknown linter"));
    }
}
