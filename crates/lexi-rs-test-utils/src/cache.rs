use lexi_rs_store::{SnapshotCache, StoreError, VocabularyEntry};
use std::io;

/// Snapshot cache whose reads and writes always fail.
#[derive(Debug, Clone, Default)]
pub struct BrokenCache;

impl SnapshotCache for BrokenCache {
    fn load(&self) -> Result<Option<Vec<VocabularyEntry>>, StoreError> {
        Err(StoreError::Decode("snapshot is not a JSON array".to_string()))
    }

    fn save(&self, _entries: &[VocabularyEntry]) -> Result<(), StoreError> {
        Err(StoreError::Io(io::Error::other("snapshot is read-only")))
    }
}
