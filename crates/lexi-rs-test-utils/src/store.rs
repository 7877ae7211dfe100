use async_trait::async_trait;
use lexi_rs_store::{EntryId, MemoryStore, NewEntry, StoreError, VocabularyEntry, VocabularyStore};
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

/// In-memory store with switchable failures and a record of calls.
#[derive(Debug, Default)]
pub struct StubStore {
    inner: MemoryStore,
    fail_list: AtomicBool,
    fail_insert: AtomicBool,
    fail_delete: AtomicBool,
    list_calls: AtomicUsize,
    inserted: Mutex<Vec<NewEntry>>,
    deleted: Mutex<Vec<EntryId>>,
}

impl StubStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entries(entries: Vec<VocabularyEntry>) -> Self {
        Self {
            inner: MemoryStore::with_entries(entries),
            ..Self::default()
        }
    }

    pub fn fail_list(&self, fail: bool) {
        self.fail_list.store(fail, Ordering::SeqCst);
    }

    pub fn fail_insert(&self, fail: bool) {
        self.fail_insert.store(fail, Ordering::SeqCst);
    }

    pub fn fail_delete(&self, fail: bool) {
        self.fail_delete.store(fail, Ordering::SeqCst);
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn inserted(&self) -> Vec<NewEntry> {
        self.inserted.lock().clone()
    }

    pub fn deleted(&self) -> Vec<EntryId> {
        self.deleted.lock().clone()
    }
}

fn unavailable() -> StoreError {
    StoreError::Status {
        status: 503,
        body: "service unavailable".to_string(),
    }
}

#[async_trait]
impl VocabularyStore for StubStore {
    async fn insert(&self, entry: NewEntry) -> Result<VocabularyEntry, StoreError> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inserted.lock().push(entry.clone());
        self.inner.insert(entry).await
    }

    async fn list(&self) -> Result<Vec<VocabularyEntry>, StoreError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.list().await
    }

    async fn delete(&self, id: &EntryId) -> Result<(), StoreError> {
        if self.fail_delete.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.deleted.lock().push(id.clone());
        self.inner.delete(id).await
    }

    fn name(&self) -> &'static str {
        "stub"
    }
}
