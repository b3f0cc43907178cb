//! Cli installation resolution.
//!
//! Download and version management of the cli are out of scope; resolution
//! only answers "which installed executable do we invoke". The `Install`
//! protocol operation maps to [`CliLocator::resolve`] plus a
//! [`CliLocator::probe`] round-trip.

use std::env;
use std::path::{Path, PathBuf};

use tracing::debug;

use linthub_core::{CliCommand, EngineSettings};

use crate::CatalogError;

/// Executable name probed on `PATH` and in the data directory.
pub const CLI_BINARY: &str = "linthub-cli";

/// Resolves the external cli installation to invoke.
///
/// Resolution order: explicitly configured path, `PATH` lookup, then the
/// per-user data directory.
#[derive(Debug, Clone, Default)]
pub struct CliLocator {
    explicit: Option<PathBuf>,
    extra_args: Vec<String>,
}

impl CliLocator {
    /// Creates a locator with no explicit path.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a locator from engine settings.
    pub fn from_settings(settings: &EngineSettings) -> Self {
        Self {
            explicit: settings.cli_path.clone(),
            extra_args: settings.cli_args.clone(),
        }
    }

    /// Sets an explicit cli path.
    pub fn with_explicit(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit = Some(path.into());
        self
    }

    /// Resolves the cli command, without verifying it answers.
    pub fn resolve(&self) -> Result<CliCommand, CatalogError> {
        if let Some(path) = &self.explicit {
            if path.is_file() {
                debug!(path = %path.display(), "using configured cli");
                return Ok(self.command(path.clone()));
            }
            return Err(CatalogError::CliNotFound(format!(
                "configured path {} does not exist",
                path.display()
            )));
        }

        if let Some(found) = search_path(CLI_BINARY) {
            debug!(path = %found.display(), "found cli on PATH");
            return Ok(self.command(found));
        }

        if let Some(data_dir) = dirs::data_dir() {
            let candidate = data_dir.join("linthub").join(CLI_BINARY);
            if candidate.is_file() {
                debug!(path = %candidate.display(), "found cli in data directory");
                return Ok(self.command(candidate));
            }
        }

        Err(CatalogError::CliNotFound(format!(
            "no '{}' on PATH or in the data directory",
            CLI_BINARY
        )))
    }

    /// Verifies a resolved cli answers by running `--version`.
    pub async fn probe(cli: &CliCommand) -> Result<(), CatalogError> {
        let output = cli
            .to_command()
            .arg("--version")
            .output()
            .await
            .map_err(|e| CatalogError::invocation(format!("failed to spawn cli: {}", e)))?;

        if !output.status.success() {
            return Err(CatalogError::invocation(format!(
                "cli version probe exited with {}",
                output.status
            )));
        }
        Ok(())
    }

    fn command(&self, program: PathBuf) -> CliCommand {
        CliCommand::new(program).with_args(self.extra_args.iter().cloned())
    }
}

fn search_path(binary: &str) -> Option<PathBuf> {
    let path_var = env::var_os("PATH")?;
    env::split_paths(&path_var)
        .map(|dir| dir.join(binary))
        .find(|candidate| is_executable(candidate))
}

#[cfg(unix)]
fn is_executable(path: &Path) -> bool {
    use std::os::unix::fs::PermissionsExt;
    path.metadata()
        .map(|m| m.is_file() && m.permissions().mode() & 0o111 != 0)
        .unwrap_or(false)
}

#[cfg(not(unix))]
fn is_executable(path: &Path) -> bool {
    path.is_file()
}
