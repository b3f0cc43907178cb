//! Catalog error types.

use thiserror::Error;

/// Errors that can occur outside a validation pass.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// No usable cli installation was found.
    #[error("Linthub cli not found: {0}")]
    CliNotFound(String),

    /// A cli invocation failed.
    #[error("Cli invocation failed: {0}")]
    Invocation(String),

    /// The cli returned a payload that does not decode.
    #[error("Invalid catalog payload: {0}")]
    Decode(#[from] serde_json::Error),

    /// A linter name unsuitable for use as a directory name.
    #[error("Invalid linter name: '{0}'")]
    InvalidLinterName(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl CatalogError {
    /// Creates an invocation error.
    pub fn invocation(message: impl Into<String>) -> Self {
        Self::Invocation(message.into())
    }
}
