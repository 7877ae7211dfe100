//! Vocabulary list view-model for Lexi.
//!
//! This crate reconciles the remote store with the local snapshot, derives the
//! filtered and sorted projection the presentation layer renders, and owns the
//! select/delete/create intents together with their toasts and change events.

pub mod draft;
pub mod error;
pub mod events;
pub mod list;
pub mod projection;
pub mod toast;

/// Form model and creation-time validation.
pub use draft::{DraftField, EntryDraft, ValidationError};
pub use error::LexiCoreError;
/// Scoped change notifications.
pub use events::{ChangeBus, ListEvent};
/// View-model and its presentation contract.
pub use list::{DataSource, ListOptions, ListStatus, LoadState, VocabularyList};
pub use projection::{compare_words, filter_entries, project, sort_entries};
pub use toast::{Toast, ToastKind};

pub use lexi_rs_config::{DeleteMode, SortDirection, SortKey};
pub use lexi_rs_store::{EntryId, VocabularyEntry};
