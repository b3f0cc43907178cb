//! Finding → LSP diagnostic conversion.

use tower_lsp::lsp_types::{Diagnostic, DiagnosticSeverity, Position, Range};

use linthub_core::{Finding, Severity};

/// Converts a normalized finding into an LSP diagnostic.
///
/// Row and column numbers are passed through unchanged; the external cli
/// already reports them in the protocol's coordinate space.
pub fn to_lsp_diagnostic(finding: &Finding) -> Diagnostic {
    let severity = match finding.severity {
        Severity::Error => DiagnosticSeverity::ERROR,
        Severity::Warning => DiagnosticSeverity::WARNING,
        Severity::Info => DiagnosticSeverity::INFORMATION,
        Severity::Hint => DiagnosticSeverity::HINT,
    };

    Diagnostic {
        range: Range::new(
            Position::new(finding.row.start, finding.column.start),
            Position::new(finding.row.end, finding.column.end),
        ),
        severity: Some(severity),
        source: Some(finding.source.clone()),
        message: finding.message.clone(),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_all_severities() {
        for (severity, expected) in [
            (Severity::Error, DiagnosticSeverity::ERROR),
            (Severity::Warning, DiagnosticSeverity::WARNING),
            (Severity::Info, DiagnosticSeverity::INFORMATION),
            (Severity::Hint, DiagnosticSeverity::HINT),
        ] {
            let finding = Finding::new("a.js", "m", "eslint").with_severity(severity);
            assert_eq!(to_lsp_diagnostic(&finding).severity, Some(expected));
        }
    }

    #[test]
    fn carries_range_source_and_message() {
        let finding = Finding::new("a.js", "Missing semicolon.", "eslint")
            .with_row(3, 4)
            .with_column(10, 11);

        let diagnostic = to_lsp_diagnostic(&finding);
        assert_eq!(diagnostic.range.start, Position::new(3, 10));
        assert_eq!(diagnostic.range.end, Position::new(4, 11));
        assert_eq!(diagnostic.source.as_deref(), Some("eslint"));
        assert_eq!(diagnostic.message, "Missing semicolon.");
    }
}
