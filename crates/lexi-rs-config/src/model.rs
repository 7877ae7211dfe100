//! Configuration schema for Lexi.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Environment variable consulted when `store.url` is unset.
pub const ENV_STORE_URL: &str = "SUPABASE_URL";
/// Environment variable consulted when `store.api_key` is unset.
pub const ENV_STORE_API_KEY: &str = "SUPABASE_ANON_KEY";

/// Root config for Lexi.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LexiConfig {
    #[serde(default, rename = "$schema")]
    pub schema: Option<String>,
    #[serde(default)]
    pub store: StoreConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl LexiConfig {
    /// Start building a config programmatically with defaults applied.
    pub fn builder() -> LexiConfigBuilder {
        LexiConfigBuilder::new()
    }

    /// Fill unset store credentials from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// Fill unset store credentials using a custom variable lookup.
    pub fn apply_env_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if self.store.url.is_none() {
            self.store.url = lookup(ENV_STORE_URL).filter(|value| !value.trim().is_empty());
        }
        if self.store.api_key.is_none() {
            self.store.api_key =
                lookup(ENV_STORE_API_KEY).filter(|value| !value.trim().is_empty());
        }
    }
}

/// Builder for assembling a `LexiConfig` in code.
#[derive(Debug, Default, Clone)]
pub struct LexiConfigBuilder {
    config: LexiConfig,
}

impl LexiConfigBuilder {
    /// Create a new builder seeded with default config values.
    pub fn new() -> Self {
        Self {
            config: LexiConfig::default(),
        }
    }

    /// Replace the remote store configuration.
    pub fn store(mut self, store: StoreConfig) -> Self {
        self.config.store = store;
        self
    }

    /// Replace the snapshot cache configuration.
    pub fn cache(mut self, cache: CacheConfig) -> Self {
        self.config.cache = cache;
        self
    }

    /// Replace the list view configuration.
    pub fn list(mut self, list: ListConfig) -> Self {
        self.config.list = list;
        self
    }

    /// Replace the UI configuration.
    pub fn ui(mut self, ui: UiConfig) -> Self {
        self.config.ui = ui;
        self
    }

    /// Finalize and return the built `LexiConfig`.
    pub fn build(self) -> LexiConfig {
        self.config
    }
}

/// Remote store backend selection.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum StoreProvider {
    /// Hosted PostgREST table (Supabase).
    #[default]
    Supabase,
    /// In-process store; nothing survives a restart.
    Memory,
}

/// Remote store configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub provider: StoreProvider,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default = "default_table")]
    pub table: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            provider: StoreProvider::default(),
            url: None,
            api_key: None,
            table: default_table(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

/// Default remote table name.
fn default_table() -> String {
    "vocabulary".to_string()
}

/// Default request timeout for remote calls.
fn default_timeout_secs() -> u64 {
    10
}

/// Local snapshot cache configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_cache_enabled")]
    pub enabled: bool,
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default = "default_cache_key")]
    pub key: String,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: default_cache_enabled(),
            path: None,
            key: default_cache_key(),
        }
    }
}

fn default_cache_enabled() -> bool {
    true
}

/// Default snapshot slot name.
fn default_cache_key() -> String {
    "vocabularies".to_string()
}

/// Field the vocabulary table is ordered by.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Locale-style comparison of the word.
    Word,
    /// Creation instant.
    #[default]
    CreatedAt,
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortKey::Word => f.write_str("word"),
            SortKey::CreatedAt => f.write_str("created_at"),
        }
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SortDirection::Asc => f.write_str("asc"),
            SortDirection::Desc => f.write_str("desc"),
        }
    }
}

/// How a delete intent is propagated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum DeleteMode {
    /// Delete from the remote store, then from the local view and snapshot.
    #[default]
    Remote,
    /// Remove from the local view and snapshot only.
    LocalOnly,
}

/// List view defaults.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ListConfig {
    #[serde(default)]
    pub sort: SortKey,
    #[serde(default)]
    pub order: SortDirection,
    #[serde(default)]
    pub delete_mode: DeleteMode,
}

/// Presentation settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_toast_ms")]
    pub toast_ms: u64,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            toast_ms: default_toast_ms(),
        }
    }
}

/// Toast lifetime in milliseconds.
fn default_toast_ms() -> u64 {
    3000
}
