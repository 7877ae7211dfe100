//! Wiring from a loaded config to a ready view-model.

use lexi_rs_config::{
    ConfigError, LayeredConfigOptions, LexiConfig, StoreProvider, default_cache_dir,
};
use lexi_rs_core::{ListOptions, VocabularyList};
use lexi_rs_store::{
    FileSnapshotCache, MemoryStore, SnapshotCache, StoreError, SupabaseOptions, SupabaseStore,
    VocabularyStore,
};
use log::{debug, info, warn};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

/// Errors raised while assembling the store, cache and view-model.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(transparent)]
    Store(#[from] StoreError),
    /// Caching is enabled but no directory was configured or discoverable.
    #[error("cache.path is not set and no home directory was found")]
    NoCacheDir,
}

/// Load the layered config and fill store credentials from the environment.
pub fn load_config(options: LayeredConfigOptions) -> Result<LexiConfig, SetupError> {
    let layered = LexiConfig::load_layered_with_options(options)?;
    debug!("layered config loaded (layers={})", layered.layers.len());
    let mut config = layered.config;
    config.apply_env();
    Ok(config)
}

/// Build the snapshot cache, or `None` when caching is disabled.
pub fn build_cache(config: &LexiConfig) -> Result<Option<Arc<dyn SnapshotCache>>, SetupError> {
    if !config.cache.enabled {
        info!("snapshot cache disabled");
        return Ok(None);
    }
    let dir = config
        .cache
        .path
        .as_ref()
        .map(PathBuf::from)
        .or_else(default_cache_dir)
        .ok_or(SetupError::NoCacheDir)?;
    let cache = FileSnapshotCache::new(&dir, &config.cache.key);
    info!("snapshot cache ready (path={})", cache.path().display());
    Ok(Some(Arc::new(cache)))
}

/// Build the remote store.
///
/// With `offline` set, an in-memory store seeded from the snapshot stands in
/// for the remote, so reads and writes operate on the local copy only.
pub fn build_store(
    config: &LexiConfig,
    offline: bool,
    cache: Option<&Arc<dyn SnapshotCache>>,
) -> Result<Arc<dyn VocabularyStore>, SetupError> {
    if offline {
        let seed = match cache.map(|cache| cache.load()) {
            Some(Ok(Some(entries))) => entries,
            Some(Err(err)) => {
                warn!("offline store starts empty (error={err})");
                Vec::new()
            }
            _ => Vec::new(),
        };
        info!("offline store seeded from snapshot (count={})", seed.len());
        return Ok(Arc::new(MemoryStore::with_entries(seed)));
    }
    match config.store.provider {
        StoreProvider::Memory => {
            info!("using in-memory store");
            Ok(Arc::new(MemoryStore::new()))
        }
        StoreProvider::Supabase => {
            config.validate_store_credentials()?;
            let options = SupabaseOptions {
                url: config.store.url.clone().unwrap_or_default(),
                api_key: config.store.api_key.clone(),
                table: config.store.table.clone(),
                timeout: Duration::from_secs(config.store.timeout_secs),
            };
            if options.api_key.is_none() {
                warn!("no api key configured; requests are sent unauthenticated");
            }
            let store = SupabaseStore::new(options)?;
            info!("using supabase store (endpoint={})", store.endpoint());
            Ok(Arc::new(store))
        }
    }
}

/// Assemble a view-model from config. Nothing is loaded yet.
pub fn build_list(config: &LexiConfig, offline: bool) -> Result<VocabularyList, SetupError> {
    let cache = build_cache(config)?;
    let store = build_store(config, offline, cache.as_ref())?;
    Ok(VocabularyList::new(
        store,
        cache,
        ListOptions::from_config(config),
    ))
}
