//! Error types for vocab-core.

use thiserror::Error;

/// Result type alias using CatalogError.
pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors that can occur while loading the word catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid catalog JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("duplicate word ID {id}")]
    DuplicateId { id: String },

    #[error("word at position {index} has an empty ID")]
    EmptyId { index: usize },
}
