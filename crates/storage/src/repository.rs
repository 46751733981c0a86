use async_trait::async_trait;
use catalog_core::model::ChallengeId;
use std::collections::HashSet;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("connection error: {0}")]
    Connection(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Repository contract for the persisted completion set.
///
/// The set is the sole source of truth for "is this challenge completed".
/// Implementations must treat an absent or malformed persisted value as the
/// empty set rather than an error; losing the set is recoverable, refusing
/// to load is not.
#[async_trait]
pub trait CompletionRepository: Send + Sync {
    /// Read the full persisted set.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` only for connection-level failures; malformed
    /// persisted data loads as the empty set.
    async fn load_all(&self) -> Result<HashSet<ChallengeId>, StorageError>;

    /// Replace the persisted set with `completed`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the set cannot be written.
    async fn replace_all(&self, completed: &HashSet<ChallengeId>) -> Result<(), StorageError>;
}

/// Simple in-memory repository implementation for testing and prototyping.
#[derive(Clone, Default)]
pub struct InMemoryRepository {
    completed: Arc<Mutex<HashSet<ChallengeId>>>,
}

impl InMemoryRepository {
    #[must_use]
    pub fn new() -> Self {
        Self {
            completed: Arc::new(Mutex::new(HashSet::new())),
        }
    }
}

#[async_trait]
impl CompletionRepository for InMemoryRepository {
    async fn load_all(&self) -> Result<HashSet<ChallengeId>, StorageError> {
        let guard = self
            .completed
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard.clone())
    }

    async fn replace_all(&self, completed: &HashSet<ChallengeId>) -> Result<(), StorageError> {
        let mut guard = self
            .completed
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        *guard = completed.clone();
        Ok(())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub completions: Arc<dyn CompletionRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let repo = InMemoryRepository::new();
        let completions: Arc<dyn CompletionRepository> = Arc::new(repo);
        Self { completions }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_round_trips_the_set() {
        let repo = InMemoryRepository::new();
        assert!(repo.load_all().await.unwrap().is_empty());

        let set: HashSet<_> = [ChallengeId::new(1), ChallengeId::new(9)].into();
        repo.replace_all(&set).await.unwrap();

        let loaded = repo.load_all().await.unwrap();
        assert_eq!(loaded, set);
    }

    #[tokio::test]
    async fn replace_all_overwrites_previous_set() {
        let repo = InMemoryRepository::new();
        let first: HashSet<_> = [ChallengeId::new(1)].into();
        repo.replace_all(&first).await.unwrap();

        let second: HashSet<_> = [ChallengeId::new(2)].into();
        repo.replace_all(&second).await.unwrap();

        assert_eq!(repo.load_all().await.unwrap(), second);
    }
}
