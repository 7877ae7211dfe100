//! Store interface and the in-process implementation.

use crate::error::StoreError;
use crate::model::{EntryId, NewEntry, VocabularyEntry};
use async_trait::async_trait;
use log::{debug, info};
use parking_lot::Mutex;
use uuid::Uuid;

#[async_trait]
/// Remote vocabulary collection used by the view-model.
pub trait VocabularyStore: Send + Sync {
    /// Insert a new entry, returning the stored record with its assigned id.
    async fn insert(&self, entry: NewEntry) -> Result<VocabularyEntry, StoreError>;

    /// List every entry, newest first.
    async fn list(&self) -> Result<Vec<VocabularyEntry>, StoreError>;

    /// Delete the entry with the given id.
    async fn delete(&self, id: &EntryId) -> Result<(), StoreError>;

    /// Short name used in logs.
    fn name(&self) -> &'static str {
        "store"
    }
}

/// In-process store; contents are lost when the process exits.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: Mutex<Vec<VocabularyEntry>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries.
    pub fn with_entries(entries: Vec<VocabularyEntry>) -> Self {
        info!("initialized memory store (entries={})", entries.len());
        Self {
            entries: Mutex::new(entries),
        }
    }
}

#[async_trait]
impl VocabularyStore for MemoryStore {
    async fn insert(&self, entry: NewEntry) -> Result<VocabularyEntry, StoreError> {
        let stored = entry.into_entry(EntryId::new(Uuid::new_v4().to_string()));
        self.entries.lock().push(stored.clone());
        debug!(
            "memory store insert (id={}, word_len={})",
            stored.id,
            stored.word.len()
        );
        Ok(stored)
    }

    async fn list(&self) -> Result<Vec<VocabularyEntry>, StoreError> {
        let mut entries = self.entries.lock().clone();
        entries.sort_by(|left, right| right.created_at.cmp(&left.created_at));
        Ok(entries)
    }

    /// Deleting a missing id succeeds, matching a filtered remote delete.
    async fn delete(&self, id: &EntryId) -> Result<(), StoreError> {
        let mut entries = self.entries.lock();
        let before = entries.len();
        entries.retain(|entry| &entry.id != id);
        debug!(
            "memory store delete (id={}, removed={})",
            id,
            before - entries.len()
        );
        Ok(())
    }

    fn name(&self) -> &'static str {
        "memory"
    }
}
