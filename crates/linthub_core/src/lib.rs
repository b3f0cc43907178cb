//! # linthub_core
//!
//! Multi-linter orchestration engine for Linthub.
//!
//! This crate provides:
//! - Linter discovery from workspace configuration state
//! - Concurrent external linter invocation
//! - Strict decoding of linter reports into a common diagnostic model
//! - Per-file diagnostic aggregation across linters
//! - Progress/status reporting for a presentation client
//!
//! ## Example
//!
//! ```rust,ignore
//! use linthub_core::{CliCommand, Engine, EngineSettings, StatusSender, WorkspaceContext};
//!
//! let (status, _events) = StatusSender::channel();
//! let engine = Engine::new(CliCommand::new("linthub-cli"), EngineSettings::default(), status);
//!
//! let workspace = WorkspaceContext::new("/path/to/project");
//! let outcome = engine.validate(&workspace, "file:///path/to/project/index.js").await;
//! for set in outcome.diagnostics {
//!     println!("{}: {} findings", set.identity, set.findings.len());
//! }
//! ```

mod aggregate;
mod discovery;
mod engine;
mod error;
mod finding;
mod report;
mod runner;
mod settings;
mod status;

pub use aggregate::{DiagnosticTable, FileDiagnostics, resolve_identity};
pub use discovery::discover_linters;
pub use engine::{Engine, PassOutcome, WorkspaceContext, invocation_id};
pub use error::EngineError;
pub use finding::{Finding, Range, Severity};
pub use report::{AnalysisReport, FileEntry, FindingEntry, RangeEntry, parse_report};
pub use runner::{CliCommand, CliRunner, Invocation};
pub use settings::{DEFAULT_LINTER_DIR, EngineSettings};
pub use status::{StatusEvent, StatusSender};
