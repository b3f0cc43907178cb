//! Linter report decoding.
//!
//! Every linter invocation is expected to print a single JSON document on
//! stdout: a list of per-file entries, each with a list of findings. Field
//! names are PascalCase on the wire, matching the external cli. Decoding is
//! strict: a document missing required fields is rejected as a whole, and
//! the failure stays scoped to the one linter that produced it.

use serde::{Deserialize, Deserializer};

use crate::{EngineError, Finding, Range, Severity};

/// The decoded output of one linter invocation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct AnalysisReport {
    pub files: Vec<FileEntry>,
}

impl AnalysisReport {
    /// Total number of findings across all file entries.
    pub fn finding_count(&self) -> usize {
        self.files.iter().map(|f| f.errors.len()).sum()
    }
}

/// One file entry in a report.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FileEntry {
    /// File path relative to the analyzed project.
    pub path: String,

    /// Findings for this file, in the order the linter emitted them.
    pub errors: Vec<FindingEntry>,
}

impl FileEntry {
    /// Converts this entry's findings into the normalized model, tagging
    /// each with the originating linter as its source.
    pub fn into_findings(self, linter: &str) -> Vec<Finding> {
        let path = self.path;
        self.errors
            .into_iter()
            .map(|entry| Finding {
                path: path.clone(),
                severity: entry.severity,
                row: Range::new(entry.row.start, entry.row.end),
                column: Range::new(entry.column.start, entry.column.end),
                message: entry.message,
                source: linter.to_string(),
            })
            .collect()
    }
}

/// One finding entry in a report.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FindingEntry {
    pub message: String,

    /// Severity ordinal; out-of-range values decode to `Warning`.
    #[serde(deserialize_with = "severity_from_ordinal")]
    pub severity: Severity,

    pub row: RangeEntry,
    pub column: RangeEntry,
}

/// Start/end pair as reported on the wire.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RangeEntry {
    pub start: u32,
    pub end: u32,
}

fn severity_from_ordinal<'de, D>(deserializer: D) -> Result<Severity, D::Error>
where
    D: Deserializer<'de>,
{
    let ordinal = i64::deserialize(deserializer)?;
    Ok(Severity::from_ordinal(ordinal))
}

/// Decodes one linter's raw stdout into a report.
///
/// Any malformed document yields `EngineError::Parse` and zero findings for
/// that invocation.
pub fn parse_report(linter: &str, stdout: &str) -> Result<AnalysisReport, EngineError> {
    serde_json::from_str(stdout).map_err(|e| EngineError::parse(linter, e))
}
