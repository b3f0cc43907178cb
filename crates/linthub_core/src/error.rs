//! Engine error types.

use thiserror::Error;

/// Errors that can occur during a validation pass.
///
/// Discovery, invocation, and parse errors are isolated to a single pass or
/// linter; none of them aborts the pass for the remaining linters.
#[derive(Debug, Error)]
pub enum EngineError {
    /// Linter configuration location missing or unreadable.
    #[error("Discovery error: {0}")]
    Discovery(String),

    /// External linter process failed (spawn failure, non-zero exit, or
    /// non-empty stderr).
    #[error("Invocation error for '{linter}': {reason}")]
    Invocation { linter: String, reason: String },

    /// Linter stdout was not a valid report document.
    #[error("Parse error for '{linter}': {source}")]
    Parse {
        linter: String,
        #[source]
        source: serde_json::Error,
    },

    /// Presentation channel rejected the published diagnostics.
    #[error("Publish error: {0}")]
    Publish(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl EngineError {
    /// Creates a discovery error.
    pub fn discovery(message: impl Into<String>) -> Self {
        Self::Discovery(message.into())
    }

    /// Creates an invocation error for one linter.
    pub fn invocation(linter: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Invocation {
            linter: linter.into(),
            reason: reason.into(),
        }
    }

    /// Creates a parse error for one linter.
    pub fn parse(linter: impl Into<String>, source: serde_json::Error) -> Self {
        Self::Parse {
            linter: linter.into(),
            source,
        }
    }

    /// Creates a publish error.
    pub fn publish(message: impl Into<String>) -> Self {
        Self::Publish(message.into())
    }

    /// The linter this error is scoped to, if any.
    pub fn linter(&self) -> Option<&str> {
        match self {
            Self::Invocation { linter, .. } | Self::Parse { linter, .. } => Some(linter),
            _ => None,
        }
    }
}
