//! Single-slot holder for the last user-visible failure.

use tokio::sync::watch;

/// Last-error mailbox. Each new operation attempt clears it; a failure
/// overwrites whatever was there.
#[derive(Debug)]
pub struct ErrorChannel {
    slot: watch::Sender<Option<String>>,
}

impl Default for ErrorChannel {
    fn default() -> Self {
        Self::new()
    }
}

impl ErrorChannel {
    pub fn new() -> Self {
        let (slot, _) = watch::channel(None);
        Self { slot }
    }

    pub fn current(&self) -> Option<String> {
        self.slot.borrow().clone()
    }

    pub fn set(&self, message: impl Into<String>) {
        self.slot.send_replace(Some(message.into()));
    }

    /// Empties the slot. Subscribers are only woken if it held a message.
    pub fn clear(&self) {
        self.slot.send_if_modified(|slot| slot.take().is_some());
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<String>> {
        self.slot.subscribe()
    }
}
