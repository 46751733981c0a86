use std::collections::HashSet;

use catalog_core::model::ChallengeId;
use sqlx::Row;

use super::SqliteRepository;
use crate::repository::{CompletionRepository, StorageError};

/// The single durable key holding the serialized completion set.
const COMPLETED_KEY: &str = "completed_challenges";

#[async_trait::async_trait]
impl CompletionRepository for SqliteRepository {
    async fn load_all(&self) -> Result<HashSet<ChallengeId>, StorageError> {
        let row = sqlx::query("SELECT value FROM completion_state WHERE key = ?1")
            .bind(COMPLETED_KEY)
            .fetch_optional(self.pool())
            .await
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        let Some(row) = row else {
            return Ok(HashSet::new());
        };

        let raw: String = row
            .try_get("value")
            .map_err(|e| StorageError::Connection(e.to_string()))?;

        // Malformed persisted data is recoverable: log it and start over with
        // an empty set instead of propagating a parse error to the caller.
        match serde_json::from_str::<Vec<u64>>(&raw) {
            Ok(ids) => Ok(ids.into_iter().map(ChallengeId::new).collect()),
            Err(err) => {
                tracing::warn!(error = %err, "discarding malformed completion state");
                Ok(HashSet::new())
            }
        }
    }

    async fn replace_all(&self, completed: &HashSet<ChallengeId>) -> Result<(), StorageError> {
        let mut ids: Vec<u64> = completed.iter().map(ChallengeId::value).collect();
        ids.sort_unstable();

        let value =
            serde_json::to_string(&ids).map_err(|e| StorageError::Serialization(e.to_string()))?;

        sqlx::query(
            r"
            INSERT INTO completion_state (key, value)
            VALUES (?1, ?2)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value
            ",
        )
        .bind(COMPLETED_KEY)
        .bind(value)
        .execute(self.pool())
        .await
        .map_err(|e| StorageError::Connection(e.to_string()))?;

        Ok(())
    }
}
