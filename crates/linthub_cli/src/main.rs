//! Linthub CLI
//!
//! Frontend for the multi-linter orchestration engine: run validation
//! passes from the command line, manage per-workspace linters, and start
//! the LSP server.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use tracing::{debug, error, info, warn};
use tracing_subscriber::EnvFilter;

use linthub_catalog::{CliLocator, create_config, fetch_catalog};
use linthub_core::{
    DEFAULT_LINTER_DIR, Engine, EngineSettings, Severity, StatusEvent, StatusSender,
    WorkspaceContext,
};

/// Linthub - multi-linter orchestration
#[derive(Parser)]
#[command(name = "lhub")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Explicit path to the linthub cli
    #[arg(long, global = true, value_name = "PATH")]
    cli: Option<PathBuf>,

    /// Extra leading argument for the cli (repeatable)
    #[arg(long = "cli-arg", global = true, value_name = "ARG", allow_hyphen_values = true)]
    cli_args: Vec<String>,

    /// Configuration file passed to the cli
    #[arg(long, global = true, value_name = "PATH")]
    cli_config: Option<PathBuf>,

    /// Name of the per-workspace linter directory
    #[arg(long, global = true, default_value = DEFAULT_LINTER_DIR)]
    linter_dir: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a validation pass over a workspace
    Analyze {
        /// Workspace root
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output format (text, json)
        #[arg(short, long, default_value = "text")]
        format: String,
    },

    /// List the linters the cli knows how to drive
    Catalog,

    /// Enable a linter for a workspace
    Activate {
        /// Linter name
        linter: String,

        /// Workspace root
        #[arg(long, default_value = ".")]
        project: PathBuf,
    },

    /// Disable a linter for a workspace
    Deactivate {
        /// Linter name
        linter: String,

        /// Workspace root
        #[arg(long, default_value = ".")]
        project: PathBuf,
    },

    /// Bootstrap one linter's configuration
    Init {
        /// Linter name
        linter: String,

        /// Workspace root
        #[arg(long, default_value = ".")]
        project: PathBuf,
    },

    /// Start the LSP server
    Lsp,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match run(cli) {
        Ok(has_errors) => {
            if has_errors {
                ExitCode::from(1)
            } else {
                ExitCode::SUCCESS
            }
        }
        Err(e) => {
            error!("{:?}", e);
            ExitCode::from(2)
        }
    }
}

fn run(cli: Cli) -> Result<bool> {
    match &cli.command {
        Commands::Analyze { path, format } => run_analyze(&cli, path, format),
        Commands::Catalog => run_catalog(&cli).map(|_| false),
        Commands::Activate { linter, project } => {
            linthub_catalog::activate_linter(project, &cli.linter_dir, linter)
                .into_diagnostic()?;
            info!("activated '{}'", linter);
            Ok(false)
        }
        Commands::Deactivate { linter, project } => {
            linthub_catalog::deactivate_linter(project, &cli.linter_dir, linter)
                .into_diagnostic()?;
            info!("deactivated '{}'", linter);
            Ok(false)
        }
        Commands::Init { linter, project } => run_init(&cli, linter, project).map(|_| false),
        Commands::Lsp => run_lsp().map(|_| false),
    }
}

impl Cli {
    fn settings(&self) -> EngineSettings {
        EngineSettings {
            cli_path: self.cli.clone(),
            cli_args: self.cli_args.clone(),
            cli_config: self.cli_config.clone(),
            linter_dir: self.linter_dir.clone(),
        }
    }
}

fn runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .into_diagnostic()
}

fn run_lsp() -> Result<()> {
    runtime()?.block_on(async {
        linthub_lsp::run().await;
    });
    Ok(())
}

fn run_analyze(cli: &Cli, path: &PathBuf, format: &str) -> Result<bool> {
    let root = path.canonicalize().into_diagnostic()?;
    let settings = cli.settings();

    let cli_command = CliLocator::from_settings(&settings)
        .resolve()
        .into_diagnostic()?;

    let outcome = runtime()?.block_on(async {
        let (status, mut events) = StatusSender::channel();

        // Status events become log lines on the terminal.
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                match event {
                    StatusEvent::Message(text) => info!("{}", text),
                    StatusEvent::ProgressStart(id) => debug!("started {}", id),
                    StatusEvent::ProgressEnd(id) => debug!("finished {}", id),
                    StatusEvent::NoCli => warn!("linthub cli not found"),
                }
            }
        });

        let engine = Engine::new(cli_command, settings, status);
        let workspace = WorkspaceContext::new(&root);
        // The workspace root directory is the triggering identity, so
        // findings resolve directly beneath it.
        let document = format!("{}/", root.display());
        engine.validate(&workspace, &document).await
    });

    for failure in &outcome.failures {
        warn!("{}", failure);
    }

    output_results(&outcome.diagnostics, format)
}

fn output_results(
    diagnostics: &[linthub_core::FileDiagnostics],
    format: &str,
) -> Result<bool> {
    let has_errors = diagnostics
        .iter()
        .any(|set| set.findings.iter().any(|f| f.severity == Severity::Error));

    match format {
        "json" => {
            println!(
                "{}",
                serde_json::to_string_pretty(diagnostics).into_diagnostic()?
            );
        }
        _ => {
            // Text format, stable ordering for humans and tests.
            let mut sets: Vec<_> = diagnostics.iter().collect();
            sets.sort_by(|a, b| a.identity.cmp(&b.identity));

            for set in &sets {
                if set.findings.is_empty() {
                    continue;
                }

                println!("\n{}:", set.identity);
                for finding in &set.findings {
                    println!(
                        "  {}:{} {} [{}]: {}",
                        finding.row.start,
                        finding.column.start,
                        severity_label(finding.severity),
                        finding.source,
                        finding.message
                    );
                }
            }

            let total: usize = sets.iter().map(|s| s.findings.len()).sum();
            println!();
            println!("Found {} findings across {} files", total, sets.len());
        }
    }

    Ok(has_errors)
}

fn severity_label(severity: Severity) -> &'static str {
    match severity {
        Severity::Error => "error",
        Severity::Warning => "warning",
        Severity::Info => "info",
        Severity::Hint => "hint",
    }
}

fn run_catalog(cli: &Cli) -> Result<()> {
    let cli_command = CliLocator::from_settings(&cli.settings())
        .resolve()
        .into_diagnostic()?;

    let catalog = runtime()?
        .block_on(async { fetch_catalog(&cli_command).await })
        .into_diagnostic()?;

    for linter in &catalog.linters {
        println!("{:<16} {}", linter.name, linter.description);
    }
    println!();
    println!("{} linters available", catalog.linters.len());

    Ok(())
}

fn run_init(cli: &Cli, linter: &str, project: &PathBuf) -> Result<()> {
    let root = project.canonicalize().into_diagnostic()?;
    let cli_command = CliLocator::from_settings(&cli.settings())
        .resolve()
        .into_diagnostic()?;

    runtime()?
        .block_on(async { create_config(&cli_command, linter, &root).await })
        .into_diagnostic()?;

    info!("created configuration for '{}'", linter);
    Ok(())
}
