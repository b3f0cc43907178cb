//! Engine settings.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Reserved configuration subdirectory listed during linter discovery.
pub const DEFAULT_LINTER_DIR: &str = ".linthub";

/// Settings for the validation engine.
///
/// Sourced from LSP `initializationOptions` or CLI flags; all fields have
/// defaults so an empty object is a valid configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineSettings {
    /// Explicit path to the external cli. When unset, the locator probes
    /// `PATH` and the per-user data directory.
    pub cli_path: Option<PathBuf>,

    /// Extra leading arguments for the cli (e.g. an interpreter shim).
    pub cli_args: Vec<String>,

    /// Path passed to the cli as `--config`.
    pub cli_config: Option<PathBuf>,

    /// Name of the per-workspace linter directory.
    pub linter_dir: String,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            cli_path: None,
            cli_args: Vec::new(),
            cli_config: None,
            linter_dir: DEFAULT_LINTER_DIR.to_string(),
        }
    }
}
