//! Progress and status reporting.
//!
//! Two logical channels share one stream of events: progress start/end pairs
//! keyed by an invocation-scoped identifier (drives a busy indicator), and
//! free-text notices. Delivery is best-effort notification; a dropped
//! receiver never blocks or fails the validation pipeline.

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::trace;

/// One status event addressed to the presentation client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusEvent {
    /// An invocation started; the busy indicator for `id` should show.
    ProgressStart(String),
    /// An invocation reached a terminal state.
    ProgressEnd(String),
    /// The external cli could not be located.
    NoCli,
    /// Free-text human-readable notice.
    Message(String),
}

/// Sending half of the status stream.
///
/// Cheap to clone; every send is fire-and-forget.
#[derive(Debug, Clone)]
pub struct StatusSender {
    tx: UnboundedSender<StatusEvent>,
}

impl StatusSender {
    /// Creates a sender together with its receiving half.
    pub fn channel() -> (Self, UnboundedReceiver<StatusEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Sends one event, ignoring a dropped receiver.
    pub fn send(&self, event: StatusEvent) {
        if self.tx.send(event).is_err() {
            trace!("status receiver dropped; event discarded");
        }
    }

    /// Sends a progress-start event for one invocation.
    pub fn progress_start(&self, id: &str) {
        self.send(StatusEvent::ProgressStart(id.to_string()));
    }

    /// Sends a progress-end event for one invocation.
    pub fn progress_end(&self, id: &str) {
        self.send(StatusEvent::ProgressEnd(id.to_string()));
    }

    /// Signals that the external cli is missing.
    pub fn no_cli(&self) {
        self.send(StatusEvent::NoCli);
    }

    /// Sends a free-text notice.
    pub fn message(&self, text: impl Into<String>) {
        self.send(StatusEvent::Message(text.into()));
    }
}
