//! Linthub LSP server.
//!
//! Binds the validation engine to a request/notification protocol: document
//! open/save events trigger validation passes, per-file diagnostics are
//! published back, and the custom `linthub/*` methods expose catalog,
//! activation, config bootstrap, and cli resolution to the presentation
//! client.

use std::path::PathBuf;
use std::sync::Arc;

use tower_lsp::jsonrpc::{Error as RpcError, ErrorCode, Result};
use tower_lsp::lsp_types::*;
use tower_lsp::{Client, ClientSocket, LanguageServer, LspService, Server};
use tracing::{debug, error, info, warn};

use linthub_catalog::{CatalogError, CliLocator, fetch_catalog};
use linthub_core::{Engine, EngineError, EngineSettings, PassOutcome, StatusSender, WorkspaceContext};

mod conversion;
mod protocol;
mod state;

pub use conversion::to_lsp_diagnostic;
pub use protocol::{
    ActivateParams, AnalyzeParams, CatalogEntry, CatalogParams, CatalogResult, CreateConfigParams,
    InstallParams, InstallResult, StatusNotification, StatusParams, StatusState,
};

use state::BackendState;

/// The LSP backend for Linthub.
#[derive(Clone)]
pub struct Backend {
    /// LSP client for sending notifications.
    client: Client,
    /// Shared state.
    state: Arc<BackendState>,
    /// Sending half of the engine's status stream.
    status: StatusSender,
}

impl Backend {
    /// Creates a new backend with the given client.
    pub fn new(client: Client) -> Self {
        let (status, events) = StatusSender::channel();
        Self {
            client,
            state: Arc::new(BackendState::new(events)),
            status,
        }
    }

    /// Applies workspace root and settings, then resolves the cli.
    fn configure(&self, root: Option<PathBuf>, options: Option<serde_json::Value>) {
        let settings = match options {
            Some(value) => match serde_json::from_value::<EngineSettings>(value) {
                Ok(settings) => settings,
                Err(e) => {
                    warn!("invalid initializationOptions: {}; using defaults", e);
                    EngineSettings::default()
                }
            },
            None => EngineSettings::default(),
        };

        match self.state.settings.write() {
            Ok(mut guard) => *guard = settings,
            Err(e) => {
                error!("settings lock poisoned: {}", e);
                return;
            }
        }
        match self.state.workspace_root.write() {
            Ok(mut guard) => *guard = root,
            Err(e) => {
                error!("workspace root lock poisoned: {}", e);
                return;
            }
        }

        self.rebuild_engine();
    }

    /// Re-resolves the cli and swaps in a fresh engine; a missing cli
    /// leaves the backend running without validation and signals the
    /// client.
    fn rebuild_engine(&self) {
        let settings = self.current_settings();
        let locator = CliLocator::from_settings(&settings);

        let engine = match locator.resolve() {
            Ok(cli) => {
                info!(cli = %cli.program.display(), "resolved linthub cli");
                Some(Arc::new(Engine::new(cli, settings, self.status.clone())))
            }
            Err(e) => {
                warn!("{}; validation disabled", e);
                self.status.no_cli();
                None
            }
        };

        match self.state.engine.write() {
            Ok(mut guard) => *guard = engine,
            Err(e) => error!("engine lock poisoned: {}", e),
        }
    }

    fn current_settings(&self) -> EngineSettings {
        match self.state.settings.read() {
            Ok(guard) => guard.clone(),
            Err(e) => {
                error!("settings lock poisoned: {}", e);
                EngineSettings::default()
            }
        }
    }

    fn current_root(&self) -> Option<PathBuf> {
        match self.state.workspace_root.read() {
            Ok(guard) => guard.clone(),
            Err(e) => {
                error!("workspace root lock poisoned: {}", e);
                None
            }
        }
    }

    fn current_engine(&self) -> Option<Arc<Engine>> {
        match self.state.engine.read() {
            Ok(guard) => guard.clone(),
            Err(e) => {
                error!("engine lock poisoned: {}", e);
                None
            }
        }
    }

    /// Runs one validation pass for a document and publishes the result.
    async fn validate_document(&self, uri: &Url) {
        let Some(engine) = self.current_engine() else {
            debug!("cli unresolved; skipping validation for {}", uri);
            self.status.no_cli();
            return;
        };
        let Some(root) = self.current_root() else {
            debug!("no workspace root; skipping validation for {}", uri);
            return;
        };

        let workspace = WorkspaceContext::new(root);
        let outcome = engine.validate(&workspace, uri.as_str()).await;
        self.publish_outcome(outcome).await;
    }

    /// Publishes every accumulated per-file diagnostic set of a pass.
    ///
    /// An identity that does not parse as a URI is a publish error: logged,
    /// the rest of the pass still publishes.
    async fn publish_outcome(&self, outcome: PassOutcome) {
        for set in outcome.diagnostics {
            match Url::parse(&set.identity) {
                Ok(uri) => {
                    let diagnostics: Vec<Diagnostic> =
                        set.findings.iter().map(to_lsp_diagnostic).collect();
                    self.client.publish_diagnostics(uri, diagnostics, None).await;
                }
                Err(e) => {
                    let err = EngineError::publish(format!(
                        "'{}' is not a valid document identity: {}",
                        set.identity, e
                    ));
                    error!("{}", err);
                }
            }
        }
    }

    fn resolved_cli(&self) -> std::result::Result<linthub_core::CliCommand, CatalogError> {
        CliLocator::from_settings(&self.current_settings()).resolve()
    }

    /// `linthub/install`: resolve the cli, verify it answers, and return
    /// its path. Resolution only — downloading the tool is the
    /// presentation layer's concern.
    pub async fn install(&self, _params: InstallParams) -> Result<InstallResult> {
        let locator = CliLocator::from_settings(&self.current_settings());
        let cli = locator.resolve().map_err(|e| {
            self.status.no_cli();
            rpc_error(e)
        })?;
        CliLocator::probe(&cli).await.map_err(rpc_error)?;

        // The cli may have appeared since startup; make validation work.
        if self.current_engine().is_none() {
            self.rebuild_engine();
        }

        Ok(InstallResult {
            path: cli.program.display().to_string(),
        })
    }

    /// `linthub/createConfig`: run the cli in init mode for one linter.
    pub async fn create_config(&self, params: CreateConfigParams) -> Result<()> {
        let root = self.current_root().ok_or_else(|| rpc_error("no workspace root"))?;
        let cli = self.resolved_cli().map_err(|e| {
            self.status.no_cli();
            rpc_error(e)
        })?;

        linthub_catalog::create_config(&cli, &params.linter, &root)
            .await
            .map_err(rpc_error)
    }

    /// `linthub/catalog`: list the available linters.
    pub async fn catalog(&self, _params: CatalogParams) -> Result<CatalogResult> {
        let cli = self.resolved_cli().map_err(|e| {
            self.status.no_cli();
            rpc_error(e)
        })?;

        let catalog = fetch_catalog(&cli).await.map_err(rpc_error)?;
        Ok(CatalogResult {
            linters: catalog
                .linters
                .into_iter()
                .map(|linter| CatalogEntry {
                    name: linter.name,
                    description: linter.description,
                })
                .collect(),
        })
    }

    /// `linthub/activate`: enable or disable a linter for the workspace.
    pub async fn activate(&self, params: ActivateParams) -> Result<()> {
        let root = self.current_root().ok_or_else(|| rpc_error("no workspace root"))?;
        let linter_dir = self.current_settings().linter_dir;

        let result = if params.activate {
            linthub_catalog::activate_linter(&root, &linter_dir, &params.linter).map(|_| ())
        } else {
            linthub_catalog::deactivate_linter(&root, &linter_dir, &params.linter)
        };
        result.map_err(rpc_error)
    }

    /// `linthub/analyze`: run a validation pass on demand.
    pub async fn analyze(&self, params: AnalyzeParams) -> Result<()> {
        let root = self.current_root().ok_or_else(|| rpc_error("no workspace root"))?;
        let Some(engine) = self.current_engine() else {
            self.status.no_cli();
            return Err(rpc_error("linthub cli not found"));
        };

        let document = match params.path {
            Some(path) => {
                let absolute = root.join(path);
                Url::from_file_path(&absolute)
                    .map(|uri| uri.to_string())
                    .unwrap_or_else(|_| absolute.display().to_string())
            }
            None => Url::from_directory_path(&root)
                .map(|uri| uri.to_string())
                .unwrap_or_else(|_| format!("{}/", root.display())),
        };

        let workspace = WorkspaceContext::new(root);
        let outcome = engine.validate(&workspace, &document).await;
        self.publish_outcome(outcome).await;
        Ok(())
    }
}

#[tower_lsp::async_trait]
impl LanguageServer for Backend {
    async fn initialize(&self, params: InitializeParams) -> Result<InitializeResult> {
        info!("Linthub LSP server initializing...");

        let root = params.root_uri.and_then(|uri| uri.to_file_path().ok());
        self.configure(root, params.initialization_options);

        Ok(InitializeResult {
            capabilities: ServerCapabilities {
                text_document_sync: Some(TextDocumentSyncCapability::Options(
                    TextDocumentSyncOptions {
                        open_close: Some(true),
                        change: Some(TextDocumentSyncKind::NONE),
                        save: Some(TextDocumentSyncSaveOptions::SaveOptions(SaveOptions {
                            include_text: Some(false),
                        })),
                        ..Default::default()
                    },
                )),
                ..Default::default()
            },
            server_info: Some(ServerInfo {
                name: "linthub-lsp".to_string(),
                version: Some(env!("CARGO_PKG_VERSION").to_string()),
            }),
        })
    }

    async fn initialized(&self, _: InitializedParams) {
        self.client
            .log_message(MessageType::INFO, "Linthub LSP server initialized")
            .await;

        // Start forwarding engine status events to the client. Best-effort:
        // events sent before this point are queued in the channel.
        let events = match self.state.status_events.lock() {
            Ok(mut guard) => guard.take(),
            Err(e) => {
                error!("status events lock poisoned: {}", e);
                None
            }
        };
        if let Some(mut events) = events {
            let client = self.client.clone();
            tokio::spawn(async move {
                while let Some(event) = events.recv().await {
                    client
                        .send_notification::<StatusNotification>(StatusParams::from(event))
                        .await;
                }
            });
        }
    }

    async fn shutdown(&self) -> Result<()> {
        info!("Linthub LSP server shutting down...");
        Ok(())
    }

    async fn did_open(&self, params: DidOpenTextDocumentParams) {
        debug!("document opened: {}", params.text_document.uri);

        // Each trigger is an independent pass; publishes of overlapping
        // passes may interleave.
        let backend = self.clone();
        tokio::spawn(async move {
            backend.validate_document(&params.text_document.uri).await;
        });
    }

    async fn did_save(&self, params: DidSaveTextDocumentParams) {
        debug!("document saved: {}", params.text_document.uri);

        let backend = self.clone();
        tokio::spawn(async move {
            backend.validate_document(&params.text_document.uri).await;
        });
    }

    async fn did_close(&self, params: DidCloseTextDocumentParams) {
        debug!("document closed: {}", params.text_document.uri);

        self.client
            .publish_diagnostics(params.text_document.uri, vec![], None)
            .await;
    }
}

fn rpc_error(message: impl std::fmt::Display) -> RpcError {
    RpcError {
        code: ErrorCode::InternalError,
        message: message.to_string().into(),
        data: None,
    }
}

/// Builds the LSP service with the custom `linthub/*` methods registered.
pub fn service() -> (LspService<Backend>, ClientSocket) {
    LspService::build(Backend::new)
        .custom_method("linthub/install", Backend::install)
        .custom_method("linthub/createConfig", Backend::create_config)
        .custom_method("linthub/catalog", Backend::catalog)
        .custom_method("linthub/activate", Backend::activate)
        .custom_method("linthub/analyze", Backend::analyze)
        .finish()
}

/// Starts the LSP server on stdio.
///
/// Does not return unless the client disconnects or the server shuts down.
pub async fn run() {
    info!("Linthub LSP server starting...");

    let stdin = tokio::io::stdin();
    let stdout = tokio::io::stdout();

    let (service, socket) = service();
    Server::new(stdin, stdout, socket).serve(service).await;
}
