//! PostgREST-backed store (the Supabase REST dialect).

use crate::error::StoreError;
use crate::model::{EntryId, NewEntry, RemoteRecord, VocabularyEntry};
use crate::provider::VocabularyStore;
use async_trait::async_trait;
use log::{debug, info, warn};
use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{RequestBuilder, Response};
use std::time::Duration;

/// Connection settings for [`SupabaseStore`].
#[derive(Debug, Clone)]
pub struct SupabaseOptions {
    /// Project base url, e.g. `https://xyz.supabase.co`.
    pub url: String,
    /// Anon or service key sent as `apikey` and bearer token.
    pub api_key: Option<String>,
    pub table: String,
    pub timeout: Duration,
}

/// Store speaking the PostgREST subset used by the vocabulary table.
#[derive(Debug, Clone)]
pub struct SupabaseStore {
    client: reqwest::Client,
    endpoint: String,
}

impl SupabaseStore {
    pub fn new(options: SupabaseOptions) -> Result<Self, StoreError> {
        let base = options.url.trim().trim_end_matches('/');
        if base.is_empty() {
            return Err(StoreError::NotConfigured("missing store url".to_string()));
        }
        if options.table.trim().is_empty() {
            return Err(StoreError::NotConfigured("missing table name".to_string()));
        }
        let client = reqwest::Client::builder()
            .timeout(options.timeout)
            .default_headers(auth_headers(options.api_key.as_deref())?)
            .build()?;
        let endpoint = format!("{base}/rest/v1/{}", options.table.trim());
        info!("initialized supabase store (endpoint={endpoint})");
        Ok(Self { client, endpoint })
    }

    /// Table endpoint all requests are issued against.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    async fn send(&self, request: RequestBuilder) -> Result<Response, StoreError> {
        let response = request.send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!(
            "remote store request failed (status={}, body_len={})",
            status.as_u16(),
            body.len()
        );
        Err(StoreError::Status {
            status: status.as_u16(),
            body,
        })
    }
}

/// Build the `apikey` and `Authorization` headers.
fn auth_headers(api_key: Option<&str>) -> Result<HeaderMap, StoreError> {
    let mut headers = HeaderMap::new();
    let Some(key) = api_key.filter(|key| !key.trim().is_empty()) else {
        return Ok(headers);
    };
    let invalid = |err: reqwest::header::InvalidHeaderValue| {
        StoreError::NotConfigured(format!("invalid api key: {err}"))
    };
    headers.insert("apikey", HeaderValue::from_str(key).map_err(invalid)?);
    headers.insert(
        reqwest::header::AUTHORIZATION,
        HeaderValue::from_str(&format!("Bearer {key}")).map_err(invalid)?,
    );
    Ok(headers)
}

async fn decode_rows(response: Response) -> Result<Vec<RemoteRecord>, StoreError> {
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes).map_err(|err| StoreError::Decode(err.to_string()))
}

#[async_trait]
impl VocabularyStore for SupabaseStore {
    async fn insert(&self, entry: NewEntry) -> Result<VocabularyEntry, StoreError> {
        let request = self
            .client
            .post(&self.endpoint)
            .header("Prefer", "return=representation")
            .json(&[&entry]);
        let response = self.send(request).await?;
        let record = decode_rows(response)
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Decode("insert returned no rows".to_string()))?;
        debug!("remote insert (id={})", record.id);
        Ok(record.into())
    }

    async fn list(&self) -> Result<Vec<VocabularyEntry>, StoreError> {
        let request = self
            .client
            .get(&self.endpoint)
            .query(&[("select", "*"), ("order", "created_at.desc")]);
        let response = self.send(request).await?;
        let rows = decode_rows(response).await?;
        debug!("remote list (rows={})", rows.len());
        Ok(rows.into_iter().map(VocabularyEntry::from).collect())
    }

    async fn delete(&self, id: &EntryId) -> Result<(), StoreError> {
        let request = self
            .client
            .delete(&self.endpoint)
            .query(&[("id", format!("eq.{id}"))]);
        self.send(request).await?;
        debug!("remote delete (id={id})");
        Ok(())
    }

    fn name(&self) -> &'static str {
        "supabase"
    }
}
