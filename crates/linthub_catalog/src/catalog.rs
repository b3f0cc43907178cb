//! Linter catalog.

use serde::{Deserialize, Serialize};
use tracing::debug;

use linthub_core::CliCommand;

use crate::CatalogError;

/// The list of linters the cli knows how to drive.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LinterCatalog {
    pub linters: Vec<LinterInfo>,
}

/// One catalog entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct LinterInfo {
    pub name: String,

    #[serde(default)]
    pub description: String,

    /// Languages the linter analyzes, when the cli reports them.
    #[serde(default)]
    pub languages: Vec<String>,
}

/// Fetches the catalog by invoking `<cli> --catalog`.
pub async fn fetch_catalog(cli: &CliCommand) -> Result<LinterCatalog, CatalogError> {
    let output = cli
        .to_command()
        .arg("--catalog")
        .output()
        .await
        .map_err(|e| CatalogError::invocation(format!("failed to spawn cli: {}", e)))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(CatalogError::invocation(format!(
            "catalog request exited with {}: {}",
            output.status,
            stderr.trim()
        )));
    }

    let catalog: LinterCatalog = serde_json::from_slice(&output.stdout)?;
    debug!(linters = catalog.linters.len(), "fetched catalog");
    Ok(catalog)
}
