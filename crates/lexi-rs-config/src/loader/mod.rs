//! Layered configuration loader.
//!
//! Discovers configuration layers (system/user/project/cwd/runtime), validates
//! schema, merges them, and produces a final `LexiConfig`.

mod layer_io;
mod merge;
mod schema;
mod utils;


pub use layer_io::default_cache_dir;

use crate::{ConfigError, LexiConfig, StoreProvider};
use log::{debug, info};
use serde_json::Value;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Default config filename in local layers.
const DEFAULT_CONFIG_FILE: &str = "lexi.json5";
/// Default config directory under the user's home.
const DEFAULT_CONFIG_DIR: &str = ".lexi";
/// Marker files/dirs that identify a project root.
const DEFAULT_PROJECT_ROOT_MARKERS: &[&str] = &[".git"];

#[cfg(unix)]
/// Default system config path on Unix.
const SYSTEM_CONFIG_PATH: &str = "/etc/lexi/lexi.json5";
#[cfg(windows)]
/// Default system config path on Windows.
const SYSTEM_CONFIG_PATH: &str = "C:\\ProgramData\\lexi\\lexi.json5";

/// Effective config plus metadata about which layers were loaded.
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    /// The merged, validated config.
    pub config: LexiConfig,
    /// Metadata for each layer that contributed to the config.
    pub layers: Vec<ConfigLayer>,
}

/// Origin for a single config layer in the stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigLayerSource {
    /// System-wide configuration.
    System,
    /// User-specific configuration.
    User,
    /// Project root configuration.
    Project,
    /// Current working directory configuration.
    Cwd,
    /// Runtime overrides (highest precedence).
    Runtime,
}

/// Metadata about a loaded config layer.
#[derive(Debug, Clone)]
pub struct ConfigLayer {
    /// Layer origin.
    pub source: ConfigLayerSource,
    /// Location on disk.
    pub path: Option<PathBuf>,
}

/// Options controlling layered config discovery and overrides.
#[derive(Debug, Clone)]
pub struct LayeredConfigOptions {
    /// Working directory used to resolve local layers.
    pub cwd: PathBuf,
    /// Optional system config path (defaults to `/etc/lexi/lexi.json5` on Unix).
    pub system_config_path: Option<PathBuf>,
    /// Optional user config path (defaults to `~/.lexi/lexi.json5`).
    pub user_config_path: Option<PathBuf>,
    /// Runtime override config paths applied last.
    pub runtime_paths: Vec<PathBuf>,
    /// Marker files/dirs used to detect the project root.
    pub project_root_markers: Vec<String>,
}

impl LayeredConfigOptions {
    /// Create options with default layer locations for the provided cwd.
    pub fn new(cwd: impl AsRef<Path>) -> Self {
        let cwd = cwd.as_ref().to_path_buf();
        Self {
            cwd,
            system_config_path: layer_io::default_system_config_path(),
            user_config_path: layer_io::default_user_config_path(),
            runtime_paths: Vec::new(),
            project_root_markers: DEFAULT_PROJECT_ROOT_MARKERS
                .iter()
                .map(|marker| marker.to_string())
                .collect(),
        }
    }

    /// Add a runtime override config path that is applied last.
    pub fn with_runtime_path(mut self, path: impl AsRef<Path>) -> Self {
        self.runtime_paths.push(path.as_ref().to_path_buf());
        self
    }
}

impl LexiConfig {
    /// Load a single config from a path (no layering).
    pub fn load_from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        info!("loading config from path: {}", path.as_ref().display());
        let path = path.as_ref();
        let value = layer_io::read_document(path, &path.display().to_string())?;
        config_from_value(value, "config")
    }

    /// Load a single config from JSON5 contents (no layering).
    pub fn load_from_str(contents: &str) -> Result<Self, ConfigError> {
        debug!("loading config from raw contents (len={})", contents.len());
        let value = layer_io::parse_document(contents, "config")?;
        config_from_value(value, "config")
    }

    /// Load a layered config stack using the default layer locations.
    pub fn load_layered(cwd: impl AsRef<Path>) -> Result<LayeredConfig, ConfigError> {
        info!(
            "loading layered config with defaults (cwd={})",
            cwd.as_ref().display()
        );
        Self::load_layered_with_options(LayeredConfigOptions::new(cwd))
    }

    /// Load a layered config stack using explicit layer locations.
    ///
    /// Precedence, lowest first: system, user, project root, cwd, runtime.
    /// Only runtime layers must exist; a file reached twice is read once.
    pub fn load_layered_with_options(
        options: LayeredConfigOptions,
    ) -> Result<LayeredConfig, ConfigError> {
        let cwd = utils::normalize_path(&options.cwd)?;
        let project_root = utils::find_project_root(&cwd, &options.project_root_markers);
        debug!(
            "resolving config layers (cwd={}, project_root={:?})",
            cwd.display(),
            project_root
        );

        let optional = [
            (ConfigLayerSource::System, options.system_config_path),
            (ConfigLayerSource::User, options.user_config_path),
            (
                ConfigLayerSource::Project,
                project_root.map(|root| root.join(DEFAULT_CONFIG_FILE)),
            ),
            (ConfigLayerSource::Cwd, Some(cwd.join(DEFAULT_CONFIG_FILE))),
        ];
        let candidates = optional
            .into_iter()
            .filter_map(|(source, path)| path.map(|path| (source, path, false)))
            .chain(
                options
                    .runtime_paths
                    .into_iter()
                    .map(|path| (ConfigLayerSource::Runtime, path, true)),
            );

        let mut visited = HashSet::new();
        let mut merged = Value::Object(serde_json::Map::new());
        let mut layers = Vec::new();
        for (source, path, required) in candidates {
            if !required && !path.exists() {
                debug!("no {source:?} layer (path={})", path.display());
                continue;
            }
            if !visited.insert(utils::unique_path(&path)) {
                debug!("{source:?} layer already applied (path={})", path.display());
                continue;
            }
            let layer = layer_io::load_layer(source, &path)?;
            merge::merge_json_values(&mut merged, &layer.value);
            layers.push(layer.meta);
        }

        let config = config_from_value(merged, "effective")?;
        info!("layered config loaded (layers={})", layers.len());
        Ok(LayeredConfig { config, layers })
    }

    /// Validate configuration invariants that cannot be expressed in serde.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.store.table.trim().is_empty() {
            return Err(invalid_field("store.table", "must not be empty"));
        }
        if self.store.timeout_secs == 0 {
            return Err(invalid_field("store.timeout_secs", "must be positive"));
        }
        if self.cache.key.trim().is_empty() {
            return Err(invalid_field("cache.key", "must not be empty"));
        }
        if self.ui.toast_ms == 0 {
            return Err(invalid_field("ui.toast_ms", "must be positive"));
        }
        Ok(())
    }

    /// Check that the selected store backend has what it needs to connect.
    ///
    /// Call after [`LexiConfig::apply_env`] so environment fallbacks count.
    pub fn validate_store_credentials(&self) -> Result<(), ConfigError> {
        if self.store.provider != StoreProvider::Supabase {
            return Ok(());
        }
        match self.store.url.as_deref() {
            Some(url) if url.starts_with("http://") || url.starts_with("https://") => Ok(()),
            Some(_) => Err(invalid_field("store.url", "must be an http(s) url")),
            None => Err(ConfigError::Invalid(format!(
                "store.url is required for the supabase provider (or set {})",
                crate::ENV_STORE_URL
            ))),
        }
    }
}

/// Internal representation of a loaded config layer.
#[derive(Debug, Clone)]
struct LoadedLayer {
    meta: ConfigLayer,
    value: Value,
}

fn invalid_field(path: &str, message: &str) -> ConfigError {
    ConfigError::InvalidField {
        path: path.to_string(),
        message: message.to_string(),
    }
}

fn config_from_value(value: Value, label: &str) -> Result<LexiConfig, ConfigError> {
    schema::validate_layer_schema(&value, label)?;
    let config: LexiConfig = serde_json::from_value(value)?;
    config.validate()?;
    Ok(config)
}
