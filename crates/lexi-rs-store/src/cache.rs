//! Local snapshot cache of the vocabulary collection.

use crate::error::StoreError;
use crate::model::VocabularyEntry;
use log::{debug, info};
use parking_lot::Mutex;
use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

/// Single-slot persisted copy of the collection.
pub trait SnapshotCache: Send + Sync {
    /// Read the snapshot. `Ok(None)` means nothing has been written yet.
    fn load(&self) -> Result<Option<Vec<VocabularyEntry>>, StoreError>;

    /// Replace the snapshot with the given entries.
    fn save(&self, entries: &[VocabularyEntry]) -> Result<(), StoreError>;
}

/// Snapshot stored as a JSON array in `<dir>/<key>.json`.
#[derive(Debug, Clone)]
pub struct FileSnapshotCache {
    path: PathBuf,
}

impl FileSnapshotCache {
    /// Create a cache for the given slot key under `dir`. The directory is
    /// created on first write.
    pub fn new(dir: impl AsRef<Path>, key: &str) -> Self {
        let path = dir.as_ref().join(format!("{key}.json"));
        info!("initialized snapshot cache (path={})", path.display());
        Self { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        self.path.with_extension("json.tmp")
    }
}

impl SnapshotCache for FileSnapshotCache {
    fn load(&self) -> Result<Option<Vec<VocabularyEntry>>, StoreError> {
        if !self.path.exists() {
            debug!("snapshot missing (path={})", self.path.display());
            return Ok(None);
        }
        let contents = fs::read_to_string(&self.path)?;
        if contents.trim().is_empty() {
            return Ok(None);
        }
        let entries: Vec<VocabularyEntry> = serde_json::from_str(&contents)?;
        debug!("snapshot loaded (entries={})", entries.len());
        Ok(Some(entries))
    }

    /// Write through a temp file and rename so readers never see a partial array.
    fn save(&self, entries: &[VocabularyEntry]) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let temp_path = self.temp_path();
        {
            let mut file = OpenOptions::new()
                .create(true)
                .truncate(true)
                .write(true)
                .open(&temp_path)?;
            let payload = serde_json::to_vec(entries)?;
            file.write_all(&payload)?;
            file.flush()?;
        }
        fs::rename(&temp_path, &self.path)?;
        debug!(
            "snapshot saved (path={}, entries={})",
            self.path.display(),
            entries.len()
        );
        Ok(())
    }
}

/// Snapshot held in memory; used when caching is disabled and in tests.
#[derive(Debug, Default)]
pub struct MemorySnapshotCache {
    slot: Mutex<Option<Vec<VocabularyEntry>>>,
}

impl MemorySnapshotCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a cache that already holds a snapshot.
    pub fn seeded(entries: Vec<VocabularyEntry>) -> Self {
        Self {
            slot: Mutex::new(Some(entries)),
        }
    }

    /// Current snapshot contents, if any.
    pub fn snapshot(&self) -> Option<Vec<VocabularyEntry>> {
        self.slot.lock().clone()
    }
}

impl SnapshotCache for MemorySnapshotCache {
    fn load(&self) -> Result<Option<Vec<VocabularyEntry>>, StoreError> {
        Ok(self.slot.lock().clone())
    }

    fn save(&self, entries: &[VocabularyEntry]) -> Result<(), StoreError> {
        *self.slot.lock() = Some(entries.to_vec());
        Ok(())
    }
}
