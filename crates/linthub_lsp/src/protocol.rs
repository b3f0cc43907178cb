//! Custom protocol surface addressed to the presentation client.
//!
//! Request methods are `linthub/install`, `linthub/createConfig`,
//! `linthub/catalog`, `linthub/activate`, and `linthub/analyze`; status
//! updates flow as `linthub/status` notifications.

use serde::{Deserialize, Serialize};
use tower_lsp::lsp_types::notification::Notification;

use linthub_core::StatusEvent;

/// `linthub/install` request parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InstallParams {}

/// `linthub/install` result: the resolved cli path.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstallResult {
    pub path: String,
}

/// `linthub/createConfig` request parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateConfigParams {
    pub linter: String,
}

/// `linthub/catalog` request parameters.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogParams {}

/// `linthub/catalog` result.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogResult {
    pub linters: Vec<CatalogEntry>,
}

/// One selectable linter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEntry {
    pub name: String,
    pub description: String,
}

/// `linthub/activate` request parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActivateParams {
    pub linter: String,
    pub activate: bool,
}

/// `linthub/analyze` request parameters. Without a path, the whole
/// workspace is analyzed.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// `linthub/status` notification parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusParams {
    pub state: StatusState,

    /// Invocation-scoped identifier for progress events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// Free text for message events.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

/// Status notification kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum StatusState {
    ProgressStart,
    ProgressEnd,
    NoCliFound,
    Message,
}

impl From<StatusEvent> for StatusParams {
    fn from(event: StatusEvent) -> Self {
        match event {
            StatusEvent::ProgressStart(id) => Self {
                state: StatusState::ProgressStart,
                id: Some(id),
                text: None,
            },
            StatusEvent::ProgressEnd(id) => Self {
                state: StatusState::ProgressEnd,
                id: Some(id),
                text: None,
            },
            StatusEvent::NoCli => Self {
                state: StatusState::NoCliFound,
                id: None,
                text: None,
            },
            StatusEvent::Message(text) => Self {
                state: StatusState::Message,
                id: None,
                text: Some(text),
            },
        }
    }
}

/// The `linthub/status` notification.
#[derive(Debug)]
pub enum StatusNotification {}

impl Notification for StatusNotification {
    type Params = StatusParams;
    const METHOD: &'static str = "linthub/status";
}
