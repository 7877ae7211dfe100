//! Error types for store and cache operations.

/// Errors returned by vocabulary stores and snapshot caches.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Transport failure talking to the remote store.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// The remote store answered with a non-success status.
    #[error("remote store returned {status}: {body}")]
    Status { status: u16, body: String },
    /// The remote store answered with a body we could not interpret.
    #[error("unexpected response: {0}")]
    Decode(String),
    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization error.
    #[error("serialization error: {0}")]
    Serde(#[from] serde_json::Error),
    /// The store is missing required connection settings.
    #[error("store not configured: {0}")]
    NotConfigured(String),
}
