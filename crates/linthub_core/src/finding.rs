//! Normalized diagnostic types.

use serde::{Deserialize, Serialize};

/// Severity level for findings.
///
/// External linter reports carry severities as ordinals 0-3; anything
/// outside that set decodes to `Warning`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Error - must be fixed.
    Error,
    /// Warning - should be reviewed.
    #[default]
    Warning,
    /// Info - informational message.
    Info,
    /// Hint - stylistic suggestion.
    Hint,
}

impl Severity {
    /// Maps a report ordinal to a severity.
    ///
    /// 0 → Error, 1 → Warning, 2 → Info, 3 → Hint; any other value
    /// falls back to Warning.
    pub fn from_ordinal(ordinal: i64) -> Self {
        match ordinal {
            0 => Severity::Error,
            1 => Severity::Warning,
            2 => Severity::Info,
            3 => Severity::Hint,
            _ => Severity::Warning,
        }
    }

    /// The ordinal this severity is reported as.
    pub fn ordinal(self) -> i64 {
        match self {
            Severity::Error => 0,
            Severity::Warning => 1,
            Severity::Info => 2,
            Severity::Hint => 3,
        }
    }
}

/// A half-open start/end pair, used for both row and column ranges.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Range {
    pub start: u32,
    pub end: u32,
}

impl Range {
    /// Creates a new range.
    pub fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }
}

/// One normalized diagnostic extracted from a linter's report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Owning file path, workspace-relative as emitted by the linter.
    pub path: String,

    /// Severity level.
    pub severity: Severity,

    /// Row range (start/end line numbers).
    pub row: Range,

    /// Column range within the rows.
    pub column: Range,

    /// Human-readable message.
    pub message: String,

    /// The linter that produced this finding, used as the diagnostic source tag.
    pub source: String,
}

impl Finding {
    /// Creates a new finding.
    pub fn new(
        path: impl Into<String>,
        message: impl Into<String>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            severity: Severity::default(),
            row: Range::new(0, 0),
            column: Range::new(0, 0),
            message: message.into(),
            source: source.into(),
        }
    }

    /// Sets the severity level.
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Sets the row range.
    pub fn with_row(mut self, start: u32, end: u32) -> Self {
        self.row = Range::new(start, end);
        self
    }

    /// Sets the column range.
    pub fn with_column(mut self, start: u32, end: u32) -> Self {
        self.column = Range::new(start, end);
        self
    }
}
