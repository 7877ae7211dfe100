//! Errors raised while loading or validating `lexi.json5`.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A config file exists but could not be read.
    #[error("cannot read {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        source: std::io::Error,
    },
    /// A config document is not valid JSON5.
    #[error("cannot parse {origin}: {source}")]
    ParseFailed {
        origin: String,
        source: json5::Error,
    },
    /// The merged document does not fit the config model.
    #[error("config does not match the expected shape: {0}")]
    DecodeFailed(#[from] serde_json::Error),
    /// A field holds a value outside its allowed range.
    #[error("invalid config at {path}: {message}")]
    InvalidField { path: String, message: String },
    #[error("invalid config: {0}")]
    Invalid(String),
}
