//! The status slot the presentation renders.

use crate::operation::OperationOutcome;
use std::sync::Arc;
use tokio::sync::watch;

/// Single slot holding the outcome of the latest attempt.
///
/// Every publish overwrites the slot; there is no history. Observers either poll [`latest`] or
/// [`subscribe`] to be woken up on changes.
///
/// [`latest`]: Self::latest
/// [`subscribe`]: Self::subscribe
#[derive(Clone, Debug)]
pub struct StatusChannel {
    slot: Arc<watch::Sender<Option<OperationOutcome>>>,
}

impl Default for StatusChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusChannel {
    pub fn new() -> Self {
        Self { slot: Arc::new(watch::Sender::new(None)) }
    }

    pub fn publish(&self, outcome: OperationOutcome) {
        trace!(%outcome, "status");
        self.slot.send_replace(Some(outcome));
    }

    pub fn clear(&self) {
        self.slot.send_replace(None);
    }

    pub fn latest(&self) -> Option<OperationOutcome> {
        self.slot.borrow().clone()
    }

    /// The message of the latest outcome, if any.
    pub fn message(&self) -> Option<String> {
        self.slot.borrow().as_ref().map(|outcome| outcome.message().to_string())
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<OperationOutcome>> {
        self.slot.subscribe()
    }
}
