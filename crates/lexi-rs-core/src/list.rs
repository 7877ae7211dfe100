//! The vocabulary list view-model.

use crate::draft::EntryDraft;
use crate::error::LexiCoreError;
use crate::events::{ChangeBus, ListEvent};
use crate::projection;
use crate::toast::{Toast, ToastKind};
use chrono::Utc;
use lexi_rs_config::{DeleteMode, LexiConfig, SortDirection, SortKey};
use lexi_rs_store::{EntryId, SnapshotCache, StoreError, VocabularyEntry, VocabularyStore};
use log::{debug, info, warn};
use std::collections::HashSet;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::broadcast;

const LOAD_FAILED: &str = "Failed to load vocabularies";
const DELETE_FAILED: &str = "Failed to delete vocabulary";
const DELETE_SUCCEEDED: &str = "Vocabulary deleted successfully";
const SAVE_FAILED: &str = "Failed to save vocabulary. Please try again.";

/// Where the visible collection came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Cache,
    Remote,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Ready { source: DataSource },
    /// The remote list failed and no snapshot was available.
    Unavailable { message: String },
}

/// What the table area should show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListStatus {
    Loading,
    Unavailable(String),
    Empty,
    NoMatches,
    Ready { shown: usize, total: usize },
}

/// Initial settings for a [`VocabularyList`].
#[derive(Debug, Clone)]
pub struct ListOptions {
    pub sort: SortKey,
    pub direction: SortDirection,
    pub delete_mode: DeleteMode,
    pub toast_ttl: Duration,
    pub event_buffer: usize,
}

impl Default for ListOptions {
    fn default() -> Self {
        Self {
            sort: SortKey::CreatedAt,
            direction: SortDirection::Desc,
            delete_mode: DeleteMode::Remote,
            toast_ttl: Duration::from_millis(3000),
            event_buffer: 64,
        }
    }
}

impl ListOptions {
    pub fn from_config(config: &LexiConfig) -> Self {
        Self {
            sort: config.list.sort,
            direction: config.list.order,
            delete_mode: config.list.delete_mode,
            toast_ttl: Duration::from_millis(config.ui.toast_ms),
            ..Self::default()
        }
    }
}

/// Single source of truth for the vocabulary screen.
///
/// Owns the collection and the view state derived from it. The presentation
/// layer reads [`VocabularyList::projection`] and [`VocabularyList::status`]
/// and issues intents; every intent applies its own follow-up state change.
pub struct VocabularyList {
    store: Arc<dyn VocabularyStore>,
    cache: Option<Arc<dyn SnapshotCache>>,
    entries: Vec<VocabularyEntry>,
    state: LoadState,
    /// Set once a remote list has been applied during the current load.
    remote_applied: bool,
    search: String,
    sort: SortKey,
    direction: SortDirection,
    selected: Option<EntryId>,
    toast: Option<Toast>,
    toast_ttl: Duration,
    delete_mode: DeleteMode,
    events: ChangeBus,
}

impl VocabularyList {
    pub fn new(
        store: Arc<dyn VocabularyStore>,
        cache: Option<Arc<dyn SnapshotCache>>,
        options: ListOptions,
    ) -> Self {
        info!(
            "vocabulary list initialized (store={}, cache={}, sort={}, order={})",
            store.name(),
            cache.is_some(),
            options.sort,
            options.direction
        );
        Self {
            store,
            cache,
            entries: Vec::new(),
            state: LoadState::Loading,
            remote_applied: false,
            search: String::new(),
            sort: options.sort,
            direction: options.direction,
            selected: None,
            toast: None,
            toast_ttl: options.toast_ttl,
            delete_mode: options.delete_mode,
            events: ChangeBus::new(options.event_buffer),
        }
    }

    /// Store handle, for running the remote list off the event loop.
    pub fn store(&self) -> Arc<dyn VocabularyStore> {
        Arc::clone(&self.store)
    }

    /// Hydrate from the snapshot, then replace with the remote list.
    pub async fn load(&mut self) {
        self.begin_load();
        let result = self.store.list().await;
        self.apply_remote(result);
    }

    /// Re-run the load path.
    pub async fn reload(&mut self) {
        self.load().await;
    }

    /// Show the snapshot while the remote list is pending.
    ///
    /// Enters `Loading` only when nothing is on screen yet; a reload keeps
    /// the visible entries until the remote list answers.
    pub fn begin_load(&mut self) {
        if self.entries.is_empty() {
            self.state = LoadState::Loading;
        }
        self.remote_applied = false;
        self.hydrate_from_cache();
    }

    /// Populate the collection from the snapshot.
    ///
    /// Ignored once a remote list has been applied. Returns the number of
    /// entries taken from the snapshot.
    pub fn hydrate_from_cache(&mut self) -> usize {
        if self.remote_applied {
            debug!("snapshot hydration skipped; remote list already applied");
            return 0;
        }
        let Some(cache) = &self.cache else {
            return 0;
        };
        let entries = match cache.load() {
            Ok(Some(entries)) => entries,
            Ok(None) => return 0,
            Err(err) => {
                warn!("snapshot unreadable, treating as empty (error={err})");
                return 0;
            }
        };
        if entries.is_empty() {
            return 0;
        }
        self.entries = dedup_by_id(entries);
        self.state = LoadState::Ready {
            source: DataSource::Cache,
        };
        self.retain_valid_selection();
        debug!("hydrated from snapshot (entries={})", self.entries.len());
        self.entries.len()
    }

    /// Apply the outcome of a remote list request.
    pub fn apply_remote(&mut self, result: Result<Vec<VocabularyEntry>, StoreError>) {
        match result {
            Ok(entries) => {
                self.entries = dedup_by_id(entries);
                self.state = LoadState::Ready {
                    source: DataSource::Remote,
                };
                self.remote_applied = true;
                self.retain_valid_selection();
                self.persist();
                info!("remote list applied (entries={})", self.entries.len());
                self.events.publish(ListEvent::Reloaded {
                    count: self.entries.len(),
                });
            }
            Err(err) => {
                warn!("remote list failed (error={err})");
                self.raise_toast(ToastKind::Error, LOAD_FAILED);
                if self.entries.is_empty() {
                    self.state = LoadState::Unavailable {
                        message: err.to_string(),
                    };
                } else {
                    // Entries left over from an earlier load stay visible as stale data.
                    self.state = LoadState::Ready {
                        source: DataSource::Cache,
                    };
                }
            }
        }
    }

    pub fn load_state(&self) -> &LoadState {
        &self.state
    }

    /// The full collection, in the order its source delivered it.
    pub fn entries(&self) -> &[VocabularyEntry] {
        &self.entries
    }

    pub fn set_search_term(&mut self, term: impl Into<String>) {
        self.search = term.into();
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    /// Sort by `key`. Without an explicit direction, the active key flips and
    /// a new key starts ascending.
    pub fn set_sort(&mut self, key: SortKey, direction: Option<SortDirection>) {
        match direction {
            Some(direction) => {
                self.sort = key;
                self.direction = direction;
            }
            None => self.toggle_sort(key),
        }
    }

    pub fn toggle_sort(&mut self, key: SortKey) {
        if self.sort == key {
            self.direction = self.direction.flipped();
        } else {
            self.sort = key;
            self.direction = SortDirection::Asc;
        }
        debug!("sort changed (key={}, order={})", self.sort, self.direction);
    }

    pub fn sort(&self) -> (SortKey, SortDirection) {
        (self.sort, self.direction)
    }

    pub fn projection(&self) -> Vec<&VocabularyEntry> {
        projection::project(&self.entries, &self.search, self.sort, self.direction)
    }

    pub fn status(&self) -> ListStatus {
        match &self.state {
            LoadState::Loading => ListStatus::Loading,
            LoadState::Unavailable { message } => ListStatus::Unavailable(message.clone()),
            LoadState::Ready { .. } if self.entries.is_empty() => ListStatus::Empty,
            LoadState::Ready { .. } => {
                let shown = projection::filter_entries(&self.entries, &self.search).len();
                if shown == 0 {
                    ListStatus::NoMatches
                } else {
                    ListStatus::Ready {
                        shown,
                        total: self.entries.len(),
                    }
                }
            }
        }
    }

    /// Focus an entry. Unknown ids leave the selection untouched.
    pub fn select_entry(&mut self, id: &EntryId) -> bool {
        if !self.contains(id) {
            return false;
        }
        self.selected = Some(id.clone());
        true
    }

    pub fn clear_selection(&mut self) {
        self.selected = None;
    }

    pub fn selected_id(&self) -> Option<&EntryId> {
        self.selected.as_ref()
    }

    pub fn selected_entry(&self) -> Option<&VocabularyEntry> {
        let id = self.selected.as_ref()?;
        self.entries.iter().find(|entry| &entry.id == id)
    }

    /// Move the selection down the current projection, stopping at the end.
    pub fn select_next(&mut self) {
        self.step_selection(true);
    }

    /// Move the selection up the current projection, stopping at the top.
    pub fn select_previous(&mut self) {
        self.step_selection(false);
    }

    fn step_selection(&mut self, forward: bool) {
        let visible = self.projection();
        if visible.is_empty() {
            return;
        }
        let current = self
            .selected
            .as_ref()
            .and_then(|id| visible.iter().position(|entry| &entry.id == id));
        let next = match (current, forward) {
            (None, true) => 0,
            (None, false) => visible.len() - 1,
            (Some(index), true) => (index + 1).min(visible.len() - 1),
            (Some(index), false) => index.saturating_sub(1),
        };
        let id = visible[next].id.clone();
        self.selected = Some(id);
    }

    pub fn delete_mode(&self) -> DeleteMode {
        self.delete_mode
    }

    /// Delete an entry according to the configured [`DeleteMode`].
    ///
    /// Returns the removed entry, or `None` when no entry has that id.
    pub async fn delete_entry(
        &mut self,
        id: &EntryId,
    ) -> Result<Option<VocabularyEntry>, LexiCoreError> {
        match self.delete_mode {
            DeleteMode::LocalOnly => Ok(self.delete_local(id)),
            DeleteMode::Remote => self.delete_remote(id).await,
        }
    }

    /// Remove an entry from the collection and the snapshot only.
    pub fn delete_local(&mut self, id: &EntryId) -> Option<VocabularyEntry> {
        let index = self.entries.iter().position(|entry| &entry.id == id)?;
        let removed = self.entries.remove(index);
        if self.selected.as_ref() == Some(id) {
            self.selected = None;
        }
        self.persist();
        self.raise_toast(ToastKind::Success, DELETE_SUCCEEDED);
        info!("entry deleted (id={id}, remaining={})", self.entries.len());
        self.events.publish(ListEvent::Deleted { id: id.clone() });
        Some(removed)
    }

    /// Delete from the remote store first; on failure the entry stays.
    pub async fn delete_remote(
        &mut self,
        id: &EntryId,
    ) -> Result<Option<VocabularyEntry>, LexiCoreError> {
        if !self.contains(id) {
            debug!("delete ignored for unknown id (id={id})");
            return Ok(None);
        }
        if let Err(err) = self.store.delete(id).await {
            warn!("remote delete failed (id={id}, error={err})");
            self.raise_toast(ToastKind::Error, DELETE_FAILED);
            return Err(err.into());
        }
        Ok(self.delete_local(id))
    }

    /// Validate the draft, insert it, and add the stored record.
    ///
    /// The draft is reset on success and left intact on failure.
    pub async fn create_entry(
        &mut self,
        draft: &mut EntryDraft,
    ) -> Result<VocabularyEntry, LexiCoreError> {
        let payload = match draft.to_new_entry(Utc::now()) {
            Ok(payload) => payload,
            Err(err) => {
                self.raise_toast(ToastKind::Error, err.to_string());
                return Err(err.into());
            }
        };
        draft.submitting = true;
        let result = self.store.insert(payload).await;
        draft.submitting = false;
        let stored = match result {
            Ok(stored) => stored,
            Err(err) => {
                warn!("insert failed (error={err})");
                self.raise_toast(ToastKind::Error, SAVE_FAILED);
                return Err(err.into());
            }
        };
        if !self.contains(&stored.id) {
            self.entries.push(stored.clone());
        }
        if !matches!(self.state, LoadState::Ready { .. }) {
            self.state = LoadState::Ready {
                source: DataSource::Remote,
            };
        }
        self.persist();
        self.raise_toast(
            ToastKind::Success,
            format!("Added \"{}\" to vocabulary", stored.word),
        );
        info!("entry created (id={})", stored.id);
        self.events.publish(ListEvent::Inserted {
            id: stored.id.clone(),
        });
        draft.reset();
        Ok(stored)
    }

    pub fn toast(&self) -> Option<&Toast> {
        self.toast.as_ref()
    }

    /// Drop the toast once its interval has elapsed. Returns true if one was dropped.
    pub fn expire_toast(&mut self, now: Instant) -> bool {
        if self.toast.as_ref().is_some_and(|toast| toast.is_expired(now)) {
            self.toast = None;
            return true;
        }
        false
    }

    pub fn dismiss_toast(&mut self) {
        self.toast = None;
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ListEvent> {
        self.events.subscribe()
    }

    fn contains(&self, id: &EntryId) -> bool {
        self.entries.iter().any(|entry| &entry.id == id)
    }

    fn retain_valid_selection(&mut self) {
        let stale = self
            .selected
            .as_ref()
            .is_some_and(|id| !self.contains(id));
        if stale {
            self.selected = None;
        }
    }

    fn raise_toast(&mut self, kind: ToastKind, message: impl Into<String>) {
        self.toast = Some(Toast::new(message, kind, self.toast_ttl, Instant::now()));
    }

    /// Write the collection through to the snapshot; failures are logged only.
    fn persist(&self) {
        let Some(cache) = &self.cache else {
            return;
        };
        if let Err(err) = cache.save(&self.entries) {
            warn!("snapshot write failed (error={err})");
        }
    }
}

/// Keep the first occurrence of each id.
fn dedup_by_id(entries: Vec<VocabularyEntry>) -> Vec<VocabularyEntry> {
    let total = entries.len();
    let mut seen = HashSet::new();
    let unique: Vec<_> = entries
        .into_iter()
        .filter(|entry| seen.insert(entry.id.clone()))
        .collect();
    if unique.len() != total {
        warn!(
            "dropped duplicate entries (duplicates={})",
            total - unique.len()
        );
    }
    unique
}
