//! SupabaseStore against an in-process server speaking the PostgREST subset.

use axum::extract::{Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use lexi_rs_store::{EntryId, NewEntry, StoreError, SupabaseOptions, SupabaseStore, VocabularyStore};
use parking_lot::Mutex;
use pretty_assertions::assert_eq;
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

const API_KEY: &str = "anon-test-key";

#[derive(Clone, Default)]
struct FakeTable {
    rows: Arc<Mutex<Vec<Value>>>,
    next_id: Arc<Mutex<u64>>,
}

fn authorized(headers: &HeaderMap) -> bool {
    let apikey = headers.get("apikey").and_then(|value| value.to_str().ok());
    let bearer = headers
        .get("authorization")
        .and_then(|value| value.to_str().ok());
    apikey == Some(API_KEY) && bearer == Some(format!("Bearer {API_KEY}").as_str())
}

async fn list_rows(
    State(table): State<FakeTable>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "missing key").into_response();
    }
    if params.get("select").map(String::as_str) != Some("*")
        || params.get("order").map(String::as_str) != Some("created_at.desc")
    {
        return (StatusCode::BAD_REQUEST, "unexpected query").into_response();
    }
    let mut rows = table.rows.lock().clone();
    rows.sort_by(|left, right| {
        let key = |row: &Value| row["created_at"].as_str().unwrap_or_default().to_string();
        key(right).cmp(&key(left))
    });
    Json(rows).into_response()
}

async fn insert_rows(
    State(table): State<FakeTable>,
    headers: HeaderMap,
    Json(body): Json<Vec<Value>>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "missing key").into_response();
    }
    let wants_rows = headers
        .get("prefer")
        .and_then(|value| value.to_str().ok())
        == Some("return=representation");
    let mut inserted = Vec::new();
    for mut row in body {
        let id = {
            let mut next = table.next_id.lock();
            *next += 1;
            *next
        };
        row["id"] = json!(id);
        table.rows.lock().push(row.clone());
        inserted.push(row);
    }
    if wants_rows {
        (StatusCode::CREATED, Json(inserted)).into_response()
    } else {
        StatusCode::CREATED.into_response()
    }
}

async fn delete_rows(
    State(table): State<FakeTable>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if !authorized(&headers) {
        return (StatusCode::UNAUTHORIZED, "missing key").into_response();
    }
    let Some(target) = params.get("id").and_then(|filter| filter.strip_prefix("eq.")) else {
        return (StatusCode::BAD_REQUEST, "missing filter").into_response();
    };
    table
        .rows
        .lock()
        .retain(|row| row["id"].to_string() != target);
    StatusCode::NO_CONTENT.into_response()
}

async fn spawn_server(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("addr");
    tokio::spawn(async move { axum::serve(listener, router).await.expect("serve") });
    format!("http://{addr}")
}

async fn fake_postgrest(table: FakeTable) -> String {
    let router = Router::new()
        .route(
            "/rest/v1/vocabulary",
            get(list_rows).post(insert_rows).delete(delete_rows),
        )
        .with_state(table);
    spawn_server(router).await
}

fn store_for(url: String, api_key: Option<&str>) -> SupabaseStore {
    SupabaseStore::new(SupabaseOptions {
        url,
        api_key: api_key.map(str::to_string),
        table: "vocabulary".to_string(),
        timeout: Duration::from_secs(5),
    })
    .expect("store")
}

#[tokio::test]
async fn insert_list_and_delete_round_trip() {
    let table = FakeTable::default();
    let store = store_for(fake_postgrest(table.clone()).await, Some(API_KEY));

    let requested_at = Utc::now();
    let created = store
        .insert(NewEntry::from_fields(
            "ephemeral",
            "",
            "lasting a short time",
            "Her fame was ephemeral.",
            Utc::now(),
        ))
        .await
        .expect("insert");
    assert_eq!(created.id, EntryId::new("1"));
    assert!(created.created_at >= requested_at);
    assert_eq!(created.meaning_bangla, None);

    let listed = store.list().await.expect("list");
    assert_eq!(listed, vec![created.clone()]);

    store.delete(&created.id).await.expect("delete");
    assert!(store.list().await.expect("list").is_empty());
    assert!(table.rows.lock().is_empty());
}

#[tokio::test]
async fn list_is_newest_first_and_accepts_offsetless_timestamps() {
    let table = FakeTable::default();
    table.rows.lock().extend([
        json!({"id": 7, "word": "older", "meaning_bangla": "পুরনো", "meaning_english": null,
               "example_sentence": null, "created_at": "2024-01-01T00:00:00"}),
        json!({"id": 8, "word": "newer", "meaning_bangla": null, "meaning_english": "recent",
               "example_sentence": "", "created_at": "2024-02-01T00:00:00.5"}),
    ]);
    let store = store_for(fake_postgrest(table).await, Some(API_KEY));

    let listed = store.list().await.expect("list");
    let words: Vec<_> = listed.iter().map(|entry| entry.word.as_str()).collect();
    assert_eq!(words, vec!["newer", "older"]);
    assert_eq!(listed[0].id.as_str(), "8");
    assert_eq!(listed[0].example_sentence, None);
}

#[tokio::test]
async fn missing_key_surfaces_status_error() {
    let store = store_for(fake_postgrest(FakeTable::default()).await, None);
    let err = store.list().await.unwrap_err();
    match err {
        StoreError::Status { status, body } => {
            assert_eq!(status, 401);
            assert_eq!(body, "missing key");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn malformed_body_is_a_decode_error() {
    let router = Router::new().route(
        "/rest/v1/vocabulary",
        get(|| async { Json(json!({"message": "not an array"})) }),
    );
    let store = store_for(spawn_server(router).await, Some(API_KEY));
    let err = store.list().await.unwrap_err();
    assert!(matches!(err, StoreError::Decode(_)));
}

#[tokio::test]
async fn unreachable_server_is_an_http_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);
    let store = store_for(format!("http://{addr}"), Some(API_KEY));
    let err = store.list().await.unwrap_err();
    assert!(matches!(err, StoreError::Http(_)));
}
