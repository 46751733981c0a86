use std::collections::HashSet;
use std::sync::Arc;

use catalog_core::model::ChallengeId;
use storage::repository::CompletionRepository;

use crate::error::CompletionServiceError;

/// Orchestrates reads and toggles of the persisted completion set.
///
/// Toggles are read-modify-write and persist the full set before returning,
/// so under sequential event handling a catalog rebuild that follows a toggle
/// always observes the new membership.
#[derive(Clone)]
pub struct CompletionService {
    completions: Arc<dyn CompletionRepository>,
}

impl CompletionService {
    #[must_use]
    pub fn new(completions: Arc<dyn CompletionRepository>) -> Self {
        Self { completions }
    }

    /// The full persisted set. Absent or malformed storage loads as empty.
    ///
    /// # Errors
    ///
    /// Returns `CompletionServiceError::Storage` if repository access fails.
    pub async fn load_all(&self) -> Result<HashSet<ChallengeId>, CompletionServiceError> {
        let completed = self.completions.load_all().await?;
        Ok(completed)
    }

    /// True iff `id` is a member of the persisted set.
    ///
    /// # Errors
    ///
    /// Returns `CompletionServiceError::Storage` if repository access fails.
    pub async fn is_completed(&self, id: ChallengeId) -> Result<bool, CompletionServiceError> {
        let completed = self.completions.load_all().await?;
        Ok(completed.contains(&id))
    }

    /// Flip membership of `id` and persist the updated set.
    ///
    /// Returns the new membership: `true` when the toggle marked the
    /// challenge completed, `false` when it cleared it.
    ///
    /// # Errors
    ///
    /// Returns `CompletionServiceError::Storage` if the updated set cannot be
    /// persisted; membership is unchanged in that case.
    pub async fn toggle(&self, id: ChallengeId) -> Result<bool, CompletionServiceError> {
        let mut completed = self.completions.load_all().await?;
        let now_member = if completed.remove(&id) {
            false
        } else {
            completed.insert(id);
            true
        };
        self.completions.replace_all(&completed).await?;
        Ok(now_member)
    }
}
