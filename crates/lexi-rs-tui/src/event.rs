//! Events delivered to the TUI run loop.

use crossterm::event::KeyEvent;
use lexi_rs_store::{StoreError, VocabularyEntry};

/// Application event emitted by input handlers or background store calls.
#[derive(Debug)]
pub enum AppEvent {
    /// Keyboard input event.
    Input(KeyEvent),
    /// Periodic tick event.
    Tick,
    /// Outcome of a remote list request.
    RemoteLoaded(Result<Vec<VocabularyEntry>, StoreError>),
}
