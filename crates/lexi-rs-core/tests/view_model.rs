//! View-model behaviour against stub stores and caches.

use chrono::Utc;
use lexi_rs_core::{
    DataSource, DeleteMode, EntryDraft, EntryId, LexiCoreError, ListEvent, ListOptions,
    ListStatus, LoadState, SortDirection, SortKey, ToastKind, ValidationError, VocabularyList,
};
use lexi_rs_store::{
    FileSnapshotCache, MemorySnapshotCache, SnapshotCache, StoreError, VocabularyEntry,
};
use lexi_rs_test_utils::{BrokenCache, EntryBuilder, StubStore, entry};
use pretty_assertions::assert_eq;
use std::sync::Arc;
use std::time::Duration;
use tempfile::tempdir;

fn list_with(
    store: Arc<StubStore>,
    cache: Option<Arc<dyn SnapshotCache>>,
    delete_mode: DeleteMode,
) -> VocabularyList {
    VocabularyList::new(
        store,
        cache,
        ListOptions {
            delete_mode,
            ..ListOptions::default()
        },
    )
}

fn ids(list: &VocabularyList) -> Vec<String> {
    list.projection()
        .iter()
        .map(|entry| entry.id.to_string())
        .collect()
}

fn words(entries: &[VocabularyEntry]) -> Vec<&str> {
    entries.iter().map(|entry| entry.word.as_str()).collect()
}

#[tokio::test]
async fn starts_loading_and_reports_empty_after_empty_remote() {
    let store = Arc::new(StubStore::new());
    let mut list = list_with(store, None, DeleteMode::Remote);
    assert_eq!(list.status(), ListStatus::Loading);
    assert_eq!(list.sort(), (SortKey::CreatedAt, SortDirection::Desc));

    list.load().await;
    assert_eq!(list.status(), ListStatus::Empty);
    assert_eq!(
        list.load_state(),
        &LoadState::Ready {
            source: DataSource::Remote
        }
    );
}

#[tokio::test]
async fn search_filters_word_and_meanings_without_reordering() {
    let store = Arc::new(StubStore::with_entries(vec![
        EntryBuilder::new("1", "Serene").english("calm").created_after(30).build(),
        EntryBuilder::new("2", "gregarious")
            .english("sociable")
            .example("a serene host")
            .created_after(20)
            .build(),
        EntryBuilder::new("3", "placid").bangla("শান্ত").english("calm, serene").created_after(10).build(),
    ]));
    let mut list = list_with(store, None, DeleteMode::Remote);
    list.load().await;

    list.set_search_term("SERENE");
    assert_eq!(ids(&list), vec!["1", "3"]);
    assert_eq!(list.status(), ListStatus::Ready { shown: 2, total: 3 });

    list.set_search_term("শান্ত");
    assert_eq!(ids(&list), vec!["3"]);

    list.set_search_term("xyz");
    assert!(list.projection().is_empty());
    assert_eq!(list.status(), ListStatus::NoMatches);
    assert_eq!(list.entries().len(), 3);

    list.set_search_term("");
    assert_eq!(ids(&list), vec!["1", "2", "3"]);
}

#[tokio::test]
async fn toggling_word_sort_goes_ascending_then_descending() {
    let store = Arc::new(StubStore::with_entries(vec![
        entry("a", "mellow", 40),
        entry("b", "Apt", 30),
        entry("c", "mellow", 20),
        entry("d", "zeal", 10),
    ]));
    let mut list = list_with(store, None, DeleteMode::Remote);
    list.load().await;
    assert_eq!(ids(&list), vec!["a", "b", "c", "d"]);

    list.toggle_sort(SortKey::Word);
    assert_eq!(list.sort(), (SortKey::Word, SortDirection::Asc));
    assert_eq!(ids(&list), vec!["b", "a", "c", "d"]);

    list.toggle_sort(SortKey::Word);
    assert_eq!(list.sort(), (SortKey::Word, SortDirection::Desc));
    assert_eq!(ids(&list), vec!["d", "a", "c", "b"]);

    list.set_sort(SortKey::CreatedAt, None);
    assert_eq!(list.sort(), (SortKey::CreatedAt, SortDirection::Asc));
    assert_eq!(ids(&list), vec!["d", "c", "b", "a"]);

    list.set_sort(SortKey::CreatedAt, Some(SortDirection::Desc));
    assert_eq!(ids(&list), vec!["a", "b", "c", "d"]);
}

#[tokio::test]
async fn delete_removes_by_id_not_by_word() {
    let temp = tempdir().expect("tempdir");
    let cache = Arc::new(FileSnapshotCache::new(temp.path(), "vocabularies"));
    let store = Arc::new(StubStore::with_entries(vec![
        entry("1", "twin", 20),
        entry("2", "twin", 10),
    ]));
    let mut list = list_with(store.clone(), Some(cache.clone()), DeleteMode::Remote);
    list.load().await;
    let mut events = list.subscribe();

    let removed = list
        .delete_entry(&EntryId::new("2"))
        .await
        .expect("delete")
        .expect("removed");
    assert_eq!(removed.id, EntryId::new("2"));
    assert_eq!(ids(&list), vec!["1"]);
    assert_eq!(store.deleted(), vec![EntryId::new("2")]);

    let snapshot = cache.load().expect("load").expect("snapshot");
    assert_eq!(snapshot.len(), 1);
    assert_eq!(snapshot[0].id, EntryId::new("1"));

    let toast = list.toast().expect("toast");
    assert_eq!(toast.kind, ToastKind::Success);
    assert_eq!(toast.message, "Vocabulary deleted successfully");
    assert_eq!(
        events.try_recv().expect("event"),
        ListEvent::Deleted {
            id: EntryId::new("2")
        }
    );
}

#[tokio::test]
async fn deleting_unknown_id_changes_nothing() {
    let store = Arc::new(StubStore::with_entries(vec![entry("1", "keep", 0)]));
    let mut list = list_with(store.clone(), None, DeleteMode::Remote);
    list.load().await;

    let removed = list
        .delete_entry(&EntryId::new("missing"))
        .await
        .expect("delete");
    assert_eq!(removed, None);
    assert!(list.toast().is_none());
    assert!(store.deleted().is_empty());
    assert_eq!(ids(&list), vec!["1"]);
}

#[tokio::test]
async fn local_only_delete_never_calls_the_store() {
    let store = Arc::new(StubStore::with_entries(vec![entry("1", "gone", 0)]));
    let mut list = list_with(store.clone(), None, DeleteMode::LocalOnly);
    list.load().await;
    assert!(list.select_entry(&EntryId::new("1")));

    list.delete_entry(&EntryId::new("1"))
        .await
        .expect("delete")
        .expect("removed");
    assert!(store.deleted().is_empty());
    assert_eq!(list.selected_id(), None);
    assert_eq!(list.status(), ListStatus::Empty);
}

#[tokio::test]
async fn failed_remote_delete_keeps_the_entry() {
    let store = Arc::new(StubStore::with_entries(vec![entry("1", "stubborn", 0)]));
    let mut list = list_with(store.clone(), None, DeleteMode::Remote);
    list.load().await;
    store.fail_delete(true);

    let err = list.delete_entry(&EntryId::new("1")).await.unwrap_err();
    assert!(matches!(err, LexiCoreError::Store(StoreError::Status { .. })));
    assert_eq!(ids(&list), vec!["1"]);
    let toast = list.toast().expect("toast");
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "Failed to delete vocabulary");
}

#[tokio::test]
async fn remote_list_replaces_cache_and_late_hydration_is_ignored() {
    let cache = Arc::new(MemorySnapshotCache::seeded(vec![entry("stale", "old", 0)]));
    let store = Arc::new(StubStore::with_entries(vec![
        entry("1", "fresh", 10),
        entry("2", "newer", 20),
    ]));
    let mut list = list_with(store, Some(cache.clone()), DeleteMode::Remote);

    list.begin_load();
    assert_eq!(ids(&list), vec!["stale"]);
    assert_eq!(
        list.load_state(),
        &LoadState::Ready {
            source: DataSource::Cache
        }
    );

    let remote = list.store().list().await;
    list.apply_remote(remote);
    assert_eq!(ids(&list), vec!["2", "1"]);
    let snapshot = cache.snapshot().expect("snapshot");
    assert_eq!(words(&snapshot), vec!["newer", "fresh"]);

    cache
        .save(&[entry("intruder", "late", 99)])
        .expect("overwrite snapshot");
    assert_eq!(list.hydrate_from_cache(), 0);
    assert_eq!(ids(&list), vec!["2", "1"]);
}

#[tokio::test]
async fn remote_failure_without_snapshot_is_unavailable() {
    let store = Arc::new(StubStore::new());
    store.fail_list(true);
    let mut list = list_with(store, Some(Arc::new(MemorySnapshotCache::new())), DeleteMode::Remote);

    list.load().await;
    assert!(matches!(list.status(), ListStatus::Unavailable(message) if message.contains("503")));
    let toast = list.toast().expect("toast");
    assert_eq!(toast.kind, ToastKind::Error);
    assert_eq!(toast.message, "Failed to load vocabularies");
}

#[tokio::test]
async fn remote_failure_keeps_snapshot_visible() {
    let store = Arc::new(StubStore::new());
    store.fail_list(true);
    let cache = Arc::new(MemorySnapshotCache::seeded(vec![
        entry("1", "cached", 0),
        entry("1", "duplicate", 5),
    ]));
    let mut list = list_with(store, Some(cache), DeleteMode::Remote);

    list.load().await;
    assert_eq!(ids(&list), vec!["1"]);
    assert_eq!(list.status(), ListStatus::Ready { shown: 1, total: 1 });
    assert_eq!(
        list.load_state(),
        &LoadState::Ready {
            source: DataSource::Cache
        }
    );
    assert!(list.toast().is_some());
}

#[tokio::test]
async fn unreadable_snapshot_is_treated_as_empty() {
    let store = Arc::new(StubStore::with_entries(vec![entry("1", "remote", 0)]));
    let mut list = list_with(store, Some(Arc::new(BrokenCache)), DeleteMode::Remote);

    list.begin_load();
    assert_eq!(list.status(), ListStatus::Loading);

    list.reload().await;
    assert_eq!(ids(&list), vec!["1"]);
    assert!(list.toast().is_none());
}

#[tokio::test]
async fn create_entry_validates_before_reaching_the_store() {
    let store = Arc::new(StubStore::new());
    let mut list = list_with(store.clone(), None, DeleteMode::Remote);
    list.load().await;

    let mut draft = EntryDraft::new();
    draft.word = "orphan".to_string();
    let err = list.create_entry(&mut draft).await.unwrap_err();
    assert!(matches!(
        err,
        LexiCoreError::Validation(ValidationError::MissingMeaning)
    ));
    assert_eq!(
        list.toast().expect("toast").message,
        "Please provide at least one meaning (Bangla or English)"
    );
    assert!(store.inserted().is_empty());
    assert_eq!(draft.word, "orphan");
}

#[tokio::test]
async fn failed_insert_keeps_draft_and_raises_toast() {
    let store = Arc::new(StubStore::new());
    store.fail_insert(true);
    let mut list = list_with(store, None, DeleteMode::Remote);
    list.load().await;

    let mut draft = EntryDraft::new();
    draft.word = "resilient".to_string();
    draft.meaning_english = "recovers quickly".to_string();
    assert!(list.create_entry(&mut draft).await.is_err());
    assert_eq!(
        list.toast().expect("toast").message,
        "Failed to save vocabulary. Please try again."
    );
    assert!(!draft.submitting);
    assert_eq!(draft.word, "resilient");
    assert_eq!(list.status(), ListStatus::Empty);
}

#[tokio::test]
async fn ephemeral_entry_lifecycle() {
    let cache = Arc::new(MemorySnapshotCache::new());
    let store = Arc::new(StubStore::new());
    let mut list = list_with(store.clone(), Some(cache.clone()), DeleteMode::Remote);
    list.load().await;
    let mut events = list.subscribe();

    let requested_at = Utc::now();
    let mut draft = EntryDraft {
        word: "ephemeral".to_string(),
        meaning_english: "lasting a short time".to_string(),
        meaning_bangla: String::new(),
        example_sentence: "Her fame was ephemeral.".to_string(),
        ..EntryDraft::default()
    };
    let created = list.create_entry(&mut draft).await.expect("create");
    assert!(created.created_at >= requested_at);
    assert!(!created.id.as_str().is_empty());
    assert_eq!(draft, EntryDraft::default());
    assert_eq!(
        list.toast().expect("toast").message,
        "Added \"ephemeral\" to vocabulary"
    );
    assert_eq!(
        events.try_recv().expect("event"),
        ListEvent::Inserted {
            id: created.id.clone()
        }
    );

    list.reload().await;
    for term in ["ephemeral", "short", "lasting a short"] {
        list.set_search_term(term);
        assert_eq!(ids(&list), vec![created.id.to_string()], "term {term}");
    }
    list.set_search_term("xyz");
    assert!(list.projection().is_empty());

    list.set_search_term("");
    list.delete_entry(&created.id)
        .await
        .expect("delete")
        .expect("removed");
    list.reload().await;
    assert_eq!(list.status(), ListStatus::Empty);
    assert_eq!(cache.snapshot(), Some(Vec::new()));
}

#[tokio::test]
async fn selection_walks_the_projection() {
    let store = Arc::new(StubStore::with_entries(vec![
        entry("1", "alpha", 30),
        entry("2", "beta", 20),
        entry("3", "gamma", 10),
    ]));
    let mut list = list_with(store, None, DeleteMode::Remote);
    list.load().await;

    assert!(!list.select_entry(&EntryId::new("nope")));
    list.select_next();
    assert_eq!(list.selected_id(), Some(&EntryId::new("1")));
    list.select_next();
    list.select_next();
    list.select_next();
    assert_eq!(list.selected_id(), Some(&EntryId::new("3")));
    list.select_previous();
    assert_eq!(
        list.selected_entry().map(|entry| entry.word.as_str()),
        Some("beta")
    );

    list.set_search_term("beta");
    assert_eq!(list.selected_id(), Some(&EntryId::new("2")));
    list.clear_selection();
    assert!(list.selected_entry().is_none());
}

#[tokio::test]
async fn toast_expires_after_its_interval() {
    let store = Arc::new(StubStore::with_entries(vec![entry("1", "brief", 0)]));
    let mut list = VocabularyList::new(
        store,
        None,
        ListOptions {
            delete_mode: DeleteMode::LocalOnly,
            toast_ttl: Duration::from_millis(500),
            ..ListOptions::default()
        },
    );
    list.load().await;
    list.delete_entry(&EntryId::new("1")).await.expect("delete");

    let expires_at = list.toast().expect("toast").expires_at;
    assert!(!list.expire_toast(expires_at - Duration::from_millis(1)));
    assert!(list.toast().is_some());
    assert!(list.expire_toast(expires_at));
    assert!(list.toast().is_none());
    assert!(!list.expire_toast(expires_at));
}

#[tokio::test]
async fn reload_without_cache_keeps_entries_visible() {
    let store = Arc::new(StubStore::with_entries(vec![entry("1", "one", 0), entry("2", "two", 1)]));
    let mut list = list_with(store.clone(), None, DeleteMode::Remote);
    list.load().await;

    list.begin_load();
    assert_eq!(list.status(), ListStatus::Ready { shown: 2, total: 2 });
    assert_eq!(ids(&list).len(), 2);

    store.fail_list(true);
    list.reload().await;
    assert_eq!(list.status(), ListStatus::Ready { shown: 2, total: 2 });
    assert_eq!(
        list.load_state(),
        &LoadState::Ready {
            source: DataSource::Cache
        }
    );
    assert!(list.toast().is_some());
}

#[tokio::test]
async fn reload_publishes_count() {
    let store = Arc::new(StubStore::with_entries(vec![entry("1", "one", 0), entry("2", "two", 1)]));
    let mut list = list_with(store.clone(), None, DeleteMode::Remote);
    let mut events = list.subscribe();

    list.load().await;
    list.reload().await;
    assert_eq!(store.list_calls(), 2);
    assert_eq!(events.try_recv().expect("event"), ListEvent::Reloaded { count: 2 });
    assert_eq!(events.try_recv().expect("event"), ListEvent::Reloaded { count: 2 });
}
