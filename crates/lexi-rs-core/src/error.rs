//! Error types for the view-model crate.

use crate::draft::ValidationError;
use lexi_rs_store::StoreError;
use thiserror::Error;

/// Errors returned by view-model intents.
#[derive(Debug, Error)]
pub enum LexiCoreError {
    /// The draft failed creation-time validation.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
    /// Remote store or snapshot failure.
    #[error("store error: {0}")]
    Store(#[from] StoreError),
}
