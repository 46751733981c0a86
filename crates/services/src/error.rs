//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;

/// Errors emitted while fetching or decoding the challenge document.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChallengeSourceError {
    #[error("challenge source returned status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("malformed challenge document: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Errors emitted by `CompletionService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompletionServiceError {
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `CatalogService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CatalogServiceError {
    #[error(transparent)]
    Source(#[from] ChallengeSourceError),
    #[error(transparent)]
    Completion(#[from] CompletionServiceError),
}
