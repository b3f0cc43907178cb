//! External linter invocation.

use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use tokio::process::Command;
use tracing::debug;

use crate::{EngineError, StatusSender};

/// The external cli invoked once per linter.
///
/// `program` plus leading `args` so interpreter-shimmed installs
/// (e.g. `dotnet <path-to-dll>`) work unchanged.
#[derive(Debug, Clone)]
pub struct CliCommand {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl CliCommand {
    /// Creates a command for a plain executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Adds leading arguments.
    pub fn with_args(mut self, args: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Builds a `tokio` command with the leading arguments applied.
    pub fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        command
    }
}

/// One completed external run of a linter against a workspace.
#[derive(Debug, Clone)]
pub struct Invocation {
    /// The linter that was executed.
    pub linter: String,
    /// Captured standard output.
    pub stdout: String,
    /// Captured standard error (empty on success).
    pub stderr: String,
    /// Wall-clock duration of the run.
    pub elapsed: Duration,
}

/// Launches one external analysis invocation per linter identifier.
///
/// Invocations for distinct linters are mutually independent; one failure
/// never delays or corrupts another. There is no retry policy — a failed
/// invocation is terminal for that linter within the pass.
#[derive(Debug, Clone)]
pub struct CliRunner {
    cli: CliCommand,
    cli_config: Option<PathBuf>,
    status: StatusSender,
}

impl CliRunner {
    /// Creates a runner for one cli installation.
    pub fn new(cli: CliCommand, cli_config: Option<PathBuf>, status: StatusSender) -> Self {
        Self {
            cli,
            cli_config,
            status,
        }
    }

    /// Runs one linter against a workspace, capturing stdout and stderr.
    ///
    /// Emits a progress-start event before launch. Failure is a spawn
    /// error, a non-zero exit, or non-empty stderr regardless of exit code.
    pub async fn run(
        &self,
        id: &str,
        linter: &str,
        project: &Path,
    ) -> Result<Invocation, EngineError> {
        self.status.progress_start(id);

        let mut command = self.cli.to_command();
        if let Some(config) = &self.cli_config {
            command.arg("--config").arg(config);
        }
        command.arg("--linter").arg(linter);
        command.arg("--project").arg(project);

        debug!(linter, project = %project.display(), "launching linter");
        let started = Instant::now();

        let output = command
            .output()
            .await
            .map_err(|e| EngineError::invocation(linter, format!("failed to spawn: {}", e)))?;

        let elapsed = started.elapsed();
        let stdout = String::from_utf8_lossy(&output.stdout).into_owned();
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();

        if !output.status.success() {
            return Err(EngineError::invocation(
                linter,
                format!("exited with {}: {}", output.status, stderr.trim()),
            ));
        }
        if !stderr.trim().is_empty() {
            return Err(EngineError::invocation(
                linter,
                format!("wrote to stderr: {}", stderr.trim()),
            ));
        }

        debug!(linter, ?elapsed, "linter completed");
        Ok(Invocation {
            linter: linter.to_string(),
            stdout,
            stderr,
            elapsed,
        })
    }
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;
    use crate::StatusEvent;
    use std::fs;
    use std::os::unix::fs::PermissionsExt;

    fn stub_cli(dir: &Path, script: &str) -> CliCommand {
        let path = dir.join("stub-cli");
        fs::write(&path, format!("#!/bin/sh\n{}\n", script)).unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o755)).unwrap();
        CliCommand::new(path)
    }

    #[tokio::test]
    async fn captures_stdout_on_success() {
        let dir = tempfile::tempdir().unwrap();
        let cli = stub_cli(dir.path(), r#"echo '{"Files": []}'"#);
        let (status, mut rx) = StatusSender::channel();
        let runner = CliRunner::new(cli, None, status);

        let invocation = runner.run("1/eslint", "eslint", dir.path()).await.unwrap();

        assert_eq!(invocation.linter, "eslint");
        assert_eq!(invocation.stdout.trim(), r#"{"Files": []}"#);
        assert_eq!(
            rx.recv().await,
            Some(StatusEvent::ProgressStart("1/eslint".to_string()))
        );
    }

    #[tokio::test]
    async fn passes_linter_and_project_arguments() {
        let dir = tempfile::tempdir().unwrap();
        // Echo the raw argv back so the test can assert on it.
        let cli = stub_cli(dir.path(), r#"echo "$@""#);
        let (status, _rx) = StatusSender::channel();
        let runner = CliRunner::new(cli, Some(PathBuf::from("/etc/linthub.json")), status);

        let invocation = runner.run("1/eslint", "eslint", dir.path()).await.unwrap();

        let argv = invocation.stdout;
        assert!(argv.contains("--config /etc/linthub.json"));
        assert!(argv.contains("--linter eslint"));
        assert!(argv.contains(&format!("--project {}", dir.path().display())));
    }

    #[tokio::test]
    async fn non_zero_exit_is_an_invocation_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = stub_cli(dir.path(), "exit 3");
        let (status, _rx) = StatusSender::channel();
        let runner = CliRunner::new(cli, None, status);

        let err = runner.run("1/broken", "broken", dir.path()).await.unwrap_err();

        assert!(matches!(err, EngineError::Invocation { .. }));
        assert_eq!(err.linter(), Some("broken"));
    }

    #[tokio::test]
    async fn stderr_output_is_a_failure_despite_zero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let cli = stub_cli(dir.path(), r#"echo '{"Files": []}'; echo 'warning: deprecated flag' >&2"#);
        let (status, _rx) = StatusSender::channel();
        let runner = CliRunner::new(cli, None, status);

        let err = runner.run("1/eslint", "eslint", dir.path()).await.unwrap_err();

        assert!(matches!(err, EngineError::Invocation { .. }));
        assert!(err.to_string().contains("deprecated flag"));
    }

    #[tokio::test]
    async fn spawn_failure_is_an_invocation_error() {
        let dir = tempfile::tempdir().unwrap();
        let cli = CliCommand::new(dir.path().join("does-not-exist"));
        let (status, _rx) = StatusSender::channel();
        let runner = CliRunner::new(cli, None, status);

        let err = runner.run("1/ghost", "ghost", dir.path()).await.unwrap_err();

        assert!(matches!(err, EngineError::Invocation { .. }));
        assert!(err.to_string().contains("failed to spawn"));
    }
}
