//! Diagnostic aggregation.
//!
//! Findings from independently-completing invocations are merged into a
//! per-file table keyed by a reconstructed document identity. The table is
//! pass-scoped and mutated only from the orchestrator's completion loop, so
//! no further serialization is needed.

use std::collections::HashMap;

use serde::Serialize;

use crate::{AnalysisReport, Finding};

/// Reconstructs a full document identity for a finding.
///
/// Takes the directory portion of the triggering document's identity (up to
/// and including the last `/`) and appends the finding's reported relative
/// path. This deliberately assumes every finding of a pass shares the
/// triggering document's directory as its root — the behavior the external
/// cli contract was built around. For findings in nested directories the
/// reported path is appended as-is, so `sub/file.js` resolves under the
/// triggering document's directory, not the workspace root.
///
/// Pure and stable: identical inputs always yield the same identity string.
pub fn resolve_identity(document: &str, relative_path: &str) -> String {
    match document.rfind('/') {
        Some(idx) => {
            let mut identity = String::with_capacity(idx + 1 + relative_path.len());
            identity.push_str(&document[..=idx]);
            identity.push_str(relative_path);
            identity
        }
        None => relative_path.to_string(),
    }
}

/// The accumulated findings for one resolved document identity.
#[derive(Debug, Clone, Serialize)]
pub struct FileDiagnostics {
    /// The reconstructed document identity diagnostics are published against.
    pub identity: String,
    /// All findings resolved to this identity during the pass.
    pub findings: Vec<Finding>,
}

/// The evolving per-file result table of one validation pass.
#[derive(Debug)]
pub struct DiagnosticTable {
    document: String,
    files: HashMap<String, Vec<Finding>>,
}

impl DiagnosticTable {
    /// Creates an empty table rooted at the triggering document's identity.
    pub fn new(document: impl Into<String>) -> Self {
        Self {
            document: document.into(),
            files: HashMap::new(),
        }
    }

    /// Appends findings to the set for `identity`, creating it if absent.
    ///
    /// No deduplication is performed; the caller guarantees each invocation
    /// delivers its results at most once.
    pub fn merge(&mut self, identity: String, findings: impl IntoIterator<Item = Finding>) {
        self.files.entry(identity).or_default().extend(findings);
    }

    /// Merges one linter's decoded report, resolving each file entry's
    /// identity against the triggering document.
    pub fn merge_report(&mut self, linter: &str, report: AnalysisReport) {
        for file in report.files {
            let identity = resolve_identity(&self.document, &file.path);
            let findings = file.into_findings(linter);
            self.merge(identity, findings);
        }
    }

    /// Number of distinct document identities in the table.
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the table holds no file sets.
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Consumes the table into publishable per-file sets.
    pub fn into_sets(self) -> Vec<FileDiagnostics> {
        self.files
            .into_iter()
            .map(|(identity, findings)| FileDiagnostics { identity, findings })
            .collect()
    }
}
