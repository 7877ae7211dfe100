//! IO helpers for reading config layers from disk.

use super::{
    ConfigLayer, ConfigLayerSource, DEFAULT_CONFIG_DIR, DEFAULT_CONFIG_FILE, LoadedLayer,
    SYSTEM_CONFIG_PATH, schema,
};
use crate::ConfigError;
use directories::UserDirs;
use log::debug;
use serde_json::Value;
use std::fs;
use std::path::{Path, PathBuf};

/// Read, parse and schema-check one layer.
pub(super) fn load_layer(
    source: ConfigLayerSource,
    path: &Path,
) -> Result<LoadedLayer, ConfigError> {
    debug!(
        "loading config layer (source={:?}, path={})",
        source,
        path.display()
    );
    let label = layer_label(source, path);
    let value = read_document(path, &label)?;
    schema::validate_layer_schema(&value, &label)?;
    Ok(LoadedLayer {
        meta: ConfigLayer {
            source,
            path: Some(path.to_path_buf()),
        },
        value,
    })
}

/// Read and parse one JSON5 file; `origin` names it in parse errors.
pub(super) fn read_document(path: &Path, origin: &str) -> Result<Value, ConfigError> {
    let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
        path: path.to_path_buf(),
        source,
    })?;
    parse_document(&contents, origin)
}

pub(super) fn parse_document(contents: &str, origin: &str) -> Result<Value, ConfigError> {
    json5::from_str(contents).map_err(|source| ConfigError::ParseFailed {
        origin: origin.to_string(),
        source,
    })
}

/// Label such as `cwd(/work/lexi.json5)`, used as the prefix of field paths.
pub(super) fn layer_label(source: ConfigLayerSource, path: &Path) -> String {
    let name = match source {
        ConfigLayerSource::System => "system",
        ConfigLayerSource::User => "user",
        ConfigLayerSource::Project => "project",
        ConfigLayerSource::Cwd => "cwd",
        ConfigLayerSource::Runtime => "runtime",
    };
    format!("{name}({})", path.display())
}

/// Default system config path.
pub(super) fn default_system_config_path() -> Option<PathBuf> {
    Some(PathBuf::from(SYSTEM_CONFIG_PATH))
}

/// Default user config path under the home directory.
pub(super) fn default_user_config_path() -> Option<PathBuf> {
    UserDirs::new().map(|dirs| {
        dirs.home_dir()
            .join(DEFAULT_CONFIG_DIR)
            .join(DEFAULT_CONFIG_FILE)
    })
}

/// Default directory for the snapshot cache (`~/.lexi/cache`).
pub fn default_cache_dir() -> Option<PathBuf> {
    UserDirs::new().map(|dirs| dirs.home_dir().join(DEFAULT_CONFIG_DIR).join("cache"))
}
