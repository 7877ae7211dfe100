//! Schema validation helpers for Lexi JSON5 configuration.

use crate::ConfigError;
use serde_json::{Map, Value};

/// Validate a single config layer against the schema.
pub(super) fn validate_layer_schema(value: &Value, layer: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, "")?;
    ensure_allowed_keys(map, &["$schema", "store", "cache", "list", "ui"], layer, "")?;

    if let Some(value) = map.get("$schema") {
        expect_string(value, layer, "$schema")?;
    }
    if let Some(value) = map.get("store") {
        validate_store(value, layer, "store")?;
    }
    if let Some(value) = map.get("cache") {
        validate_cache(value, layer, "cache")?;
    }
    if let Some(value) = map.get("list") {
        validate_list(value, layer, "list")?;
    }
    if let Some(value) = map.get("ui") {
        validate_ui(value, layer, "ui")?;
    }

    Ok(())
}

/// Validate the "store" block.
fn validate_store(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(
        map,
        &["provider", "url", "api_key", "table", "timeout_secs"],
        layer,
        path,
    )?;

    if let Some(value) = map.get("provider") {
        expect_one_of(
            value,
            &["supabase", "memory"],
            "invalid store provider",
            layer,
            &join_path(path, "provider"),
        )?;
    }
    for key in ["url", "api_key", "table"] {
        if let Some(value) = map.get(key) {
            expect_string(value, layer, &join_path(path, key))?;
        }
    }
    if let Some(value) = map.get("timeout_secs") {
        expect_u64(value, layer, &join_path(path, "timeout_secs"))?;
    }
    Ok(())
}

/// Validate the "cache" block.
fn validate_cache(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, &["enabled", "path", "key"], layer, path)?;

    if let Some(value) = map.get("enabled") {
        expect_bool(value, layer, &join_path(path, "enabled"))?;
    }
    if let Some(value) = map.get("path") {
        expect_string(value, layer, &join_path(path, "path"))?;
    }
    if let Some(value) = map.get("key") {
        expect_string(value, layer, &join_path(path, "key"))?;
    }
    Ok(())
}

/// Validate the "list" block.
fn validate_list(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, &["sort", "order", "delete_mode"], layer, path)?;

    if let Some(value) = map.get("sort") {
        expect_one_of(
            value,
            &["word", "created_at"],
            "invalid sort key",
            layer,
            &join_path(path, "sort"),
        )?;
    }
    if let Some(value) = map.get("order") {
        expect_one_of(
            value,
            &["asc", "desc"],
            "invalid sort order",
            layer,
            &join_path(path, "order"),
        )?;
    }
    if let Some(value) = map.get("delete_mode") {
        expect_one_of(
            value,
            &["remote", "local_only"],
            "invalid delete mode",
            layer,
            &join_path(path, "delete_mode"),
        )?;
    }
    Ok(())
}

/// Validate the "ui" block.
fn validate_ui(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    let map = expect_object(value, layer, path)?;
    ensure_allowed_keys(map, &["toast_ms"], layer, path)?;

    if let Some(value) = map.get("toast_ms") {
        expect_u64(value, layer, &join_path(path, "toast_ms"))?;
    }
    Ok(())
}

/// Expect a JSON object or return a typed error.
fn expect_object<'a>(
    value: &'a Value,
    layer: &str,
    path: &str,
) -> Result<&'a Map<String, Value>, ConfigError> {
    match value {
        Value::Object(map) => Ok(map),
        _ => Err(invalid_field(layer, path, "expected object")),
    }
}

/// Expect a JSON string or return a typed error.
fn expect_string(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.as_str().is_some() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected string"))
    }
}

/// Expect a JSON boolean or return a typed error.
fn expect_bool(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if matches!(value, Value::Bool(_)) {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected bool"))
    }
}

/// Expect a non-negative JSON integer or return a typed error.
fn expect_u64(value: &Value, layer: &str, path: &str) -> Result<(), ConfigError> {
    if value.is_u64() {
        Ok(())
    } else {
        Err(invalid_field(layer, path, "expected non-negative integer"))
    }
}

/// Expect a string drawn from a fixed set of values.
fn expect_one_of(
    value: &Value,
    allowed: &[&str],
    message: &str,
    layer: &str,
    path: &str,
) -> Result<(), ConfigError> {
    let Some(text) = value.as_str() else {
        return Err(invalid_field(layer, path, "expected string"));
    };
    if allowed.contains(&text) {
        Ok(())
    } else {
        Err(invalid_field(layer, path, message))
    }
}

/// Ensure an object contains only allowed keys.
fn ensure_allowed_keys(
    map: &Map<String, Value>,
    allowed: &[&str],
    layer: &str,
    path: &str,
) -> Result<(), ConfigError> {
    for key in map.keys() {
        if !allowed.contains(&key.as_str()) {
            return Err(invalid_field(layer, &join_path(path, key), "unknown key"));
        }
    }
    Ok(())
}

/// Join nested paths for better error messages.
fn join_path(prefix: &str, key: &str) -> String {
    if prefix.is_empty() {
        key.to_string()
    } else {
        format!("{prefix}.{key}")
    }
}

/// Build a structured invalid-field error.
fn invalid_field(layer: &str, path: &str, message: &str) -> ConfigError {
    let normalized_path = if path.is_empty() { "root" } else { path };
    ConfigError::InvalidField {
        path: format!("{layer}:{normalized_path}"),
        message: message.to_string(),
    }
}
