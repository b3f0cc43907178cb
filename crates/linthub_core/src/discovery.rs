//! Linter discovery.

use std::fs;
use std::path::Path;

use tracing::{debug, warn};

use crate::EngineError;

/// Returns the ordered set of linter identifiers configured for a workspace.
///
/// Each subdirectory of `<root>/<dir_name>/` names one linter; plain files
/// are ignored. Names are returned sorted so a pass launches invocations in
/// a stable order. A missing or unreadable configuration location yields
/// `EngineError::Discovery`; the orchestrator treats that as "zero linters
/// configured" rather than fatal.
pub fn discover_linters(root: &Path, dir_name: &str) -> Result<Vec<String>, EngineError> {
    let config_dir = root.join(dir_name);
    let entries = fs::read_dir(&config_dir).map_err(|e| {
        EngineError::discovery(format!("cannot read {}: {}", config_dir.display(), e))
    })?;

    let mut linters = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| EngineError::discovery(e.to_string()))?;
        let file_type = entry
            .file_type()
            .map_err(|e| EngineError::discovery(e.to_string()))?;
        if !file_type.is_dir() {
            continue;
        }
        match entry.file_name().into_string() {
            Ok(name) => linters.push(name),
            Err(name) => warn!("skipping non-UTF-8 linter directory {:?}", name),
        }
    }

    linters.sort();
    debug!(count = linters.len(), "discovered linters");
    Ok(linters)
}
