//! LSP backend state.

use std::fmt;
use std::path::PathBuf;
use std::sync::{Arc, Mutex, RwLock};

use tokio::sync::mpsc::UnboundedReceiver;

use linthub_core::{Engine, EngineSettings, StatusEvent};

/// Shared backend state.
pub(crate) struct BackendState {
    /// Engine settings from `initializationOptions`.
    pub settings: RwLock<EngineSettings>,
    /// Workspace root path.
    pub workspace_root: RwLock<Option<PathBuf>>,
    /// Validation engine (None while the cli is unresolved).
    pub engine: RwLock<Option<Arc<Engine>>>,
    /// Status events awaiting the forwarder task; taken once on
    /// `initialized`.
    pub status_events: Mutex<Option<UnboundedReceiver<StatusEvent>>>,
}

impl BackendState {
    /// Creates state holding the receiving half of the status stream.
    pub fn new(status_events: UnboundedReceiver<StatusEvent>) -> Self {
        Self {
            settings: RwLock::new(EngineSettings::default()),
            workspace_root: RwLock::new(None),
            engine: RwLock::new(None),
            status_events: Mutex::new(Some(status_events)),
        }
    }
}

impl fmt::Debug for BackendState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackendState")
            .field("workspace_root", &self.workspace_root)
            .field("engine", &"<Option<Engine>>")
            .finish()
    }
}
