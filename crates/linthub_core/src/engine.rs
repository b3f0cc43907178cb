//! Validation orchestration.

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::task::JoinSet;
use tracing::{debug, warn};

use crate::{
    CliCommand, CliRunner, DiagnosticTable, EngineError, EngineSettings, FileDiagnostics,
    StatusSender, discover_linters, parse_report,
};

/// Root path of the workspace being validated; immutable per pass.
#[derive(Debug, Clone)]
pub struct WorkspaceContext {
    pub root: PathBuf,
}

impl WorkspaceContext {
    /// Creates a workspace context.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// The published result of one validation pass.
#[derive(Debug)]
pub struct PassOutcome {
    /// Monotonic pass number, scopes invocation identifiers.
    pub pass_id: u64,
    /// One accumulated diagnostic set per resolved document identity.
    pub diagnostics: Vec<FileDiagnostics>,
    /// Per-linter errors of the pass; each contributed zero findings
    /// without blocking the others.
    pub failures: Vec<EngineError>,
}

impl PassOutcome {
    fn empty(pass_id: u64) -> Self {
        Self {
            pass_id,
            diagnostics: Vec::new(),
            failures: Vec::new(),
        }
    }
}

/// Builds the invocation-scoped identifier used for progress events.
pub fn invocation_id(pass_id: u64, linter: &str) -> String {
    format!("{}/{}", pass_id, linter)
}

/// The validation orchestrator.
///
/// On a trigger, discovers the configured linters, fans out one external
/// invocation per linter, feeds each completed result through the report
/// parser and the aggregation table, and returns the accumulated per-file
/// diagnostic sets for publishing.
pub struct Engine {
    cli: CliCommand,
    settings: EngineSettings,
    status: StatusSender,
    pass_counter: AtomicU64,
}

impl Engine {
    /// Creates an engine for one cli installation.
    pub fn new(cli: CliCommand, settings: EngineSettings, status: StatusSender) -> Self {
        Self {
            cli,
            settings,
            status,
            pass_counter: AtomicU64::new(0),
        }
    }

    /// The settings this engine was built with.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Runs one validation pass for a triggering document.
    ///
    /// `document` is the identity of the document whose open/save event
    /// triggered the pass; its directory portion is the resolution root for
    /// every finding (see [`crate::resolve_identity`]).
    ///
    /// Never fails as a whole: discovery, invocation, and parse errors are
    /// collected into the outcome and surfaced as status notices while the
    /// remaining linters proceed. Concurrent calls run as independent
    /// passes whose publishes may interleave.
    pub async fn validate(&self, workspace: &WorkspaceContext, document: &str) -> PassOutcome {
        let pass_id = self.pass_counter.fetch_add(1, Ordering::Relaxed) + 1;
        debug!(pass_id, document, "starting validation pass");

        let linters = match discover_linters(&workspace.root, &self.settings.linter_dir) {
            Ok(linters) => linters,
            Err(e) => {
                warn!(pass_id, "{}", e);
                self.status.message(e.to_string());
                self.status.message("ready");
                return PassOutcome::empty(pass_id);
            }
        };

        if linters.is_empty() {
            debug!(pass_id, "no linters configured");
            self.status.message("ready");
            return PassOutcome::empty(pass_id);
        }

        let runner = CliRunner::new(
            self.cli.clone(),
            self.settings.cli_config.clone(),
            self.status.clone(),
        );

        // Fan out every invocation without awaiting any of them; the join
        // loop below is the single consumer of completions.
        let mut pending = JoinSet::new();
        for linter in linters {
            let id = invocation_id(pass_id, &linter);
            self.status.message(format!("executing {}", linter));

            let runner = runner.clone();
            let root = workspace.root.clone();
            pending.spawn(async move {
                let result = runner.run(&id, &linter, &root).await;
                (id, linter, result)
            });
        }

        let mut table = DiagnosticTable::new(document);
        let mut failures = Vec::new();

        // Completions arrive in no guaranteed order; each one is parsed and
        // merged immediately. Draining the set is the join barrier that
        // gates publishing.
        while let Some(joined) = pending.join_next().await {
            let (id, linter, result) = match joined {
                Ok(completion) => completion,
                Err(e) => {
                    warn!(pass_id, "invocation task failed: {}", e);
                    failures.push(EngineError::invocation(
                        "<unknown>",
                        format!("invocation task failed: {}", e),
                    ));
                    continue;
                }
            };
            self.status.progress_end(&id);

            let invocation = match result {
                Ok(invocation) => invocation,
                Err(e) => {
                    warn!(pass_id, %linter, "{}", e);
                    self.status.message(e.to_string());
                    failures.push(e);
                    continue;
                }
            };

            match parse_report(&linter, &invocation.stdout) {
                Ok(report) => {
                    debug!(pass_id, %linter, findings = report.finding_count(), "merged report");
                    table.merge_report(&linter, report);
                }
                Err(e) => {
                    warn!(pass_id, %linter, "{}", e);
                    self.status.message(e.to_string());
                    failures.push(e);
                }
            }
        }

        self.status.message("ready");
        debug!(
            pass_id,
            files = table.len(),
            failures = failures.len(),
            "validation pass complete"
        );

        PassOutcome {
            pass_id,
            diagnostics: table.into_sets(),
            failures,
        }
    }
}
