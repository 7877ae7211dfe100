//! Vocabulary entry model, remote store adapters and the local snapshot cache.

pub mod cache;
pub mod error;
pub mod model;
pub mod provider;
pub mod supabase;

/// Snapshot cache interface and implementations.
pub use cache::{FileSnapshotCache, MemorySnapshotCache, SnapshotCache};
/// Store error type.
pub use error::StoreError;
/// Entry model and wire representations.
pub use model::{EntryId, NewEntry, RemoteRecord, VocabularyEntry};
/// Store interface and the in-process implementation.
pub use provider::{MemoryStore, VocabularyStore};
/// PostgREST-backed store.
pub use supabase::{SupabaseOptions, SupabaseStore};
