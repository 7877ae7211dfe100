//! Change notifications scoped to one view-model.

use lexi_rs_store::EntryId;
use log::debug;
use tokio::sync::broadcast;

/// Collection changes published after the view-model has applied them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListEvent {
    /// The collection was replaced by a remote list.
    Reloaded { count: usize },
    /// A newly created entry joined the collection.
    Inserted { id: EntryId },
    /// An entry left the collection.
    Deleted { id: EntryId },
}

/// Broadcast channel for [`ListEvent`]s.
#[derive(Debug, Clone)]
pub struct ChangeBus {
    sender: broadcast::Sender<ListEvent>,
}

impl ChangeBus {
    /// Create a bus with the given channel buffer size.
    pub fn new(buffer: usize) -> Self {
        let (sender, _) = broadcast::channel(buffer.max(1));
        debug!("change bus initialized (buffer={})", buffer);
        Self { sender }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ListEvent> {
        self.sender.subscribe()
    }

    /// Publish without waiting; events with no subscribers are dropped.
    pub fn publish(&self, event: ListEvent) {
        let _ = self.sender.send(event);
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new(64)
    }
}
