use rand::rng;
use rand::seq::SliceRandom;
use std::collections::HashSet;
use std::sync::Arc;

use catalog_core::catalog::{CatalogBuckets, CompletedSummary, DisplayCategory};
use catalog_core::model::{Challenge, ChallengeId};
use catalog_core::time::Clock;

use crate::challenge_service::ChallengeService;
use crate::completion_service::CompletionService;
use crate::error::CatalogServiceError;

/// One challenge in render order, tagged with its display category.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogEntry {
    pub challenge: Challenge,
    pub category: DisplayCategory,
}

/// Ordered catalog ready for rendering, plus the completed summary.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPlan {
    pub entries: Vec<CatalogEntry>,
    pub summary: CompletedSummary,
}

impl CatalogPlan {
    /// Total number of entries in render order.
    #[must_use]
    pub fn total(&self) -> usize {
        self.entries.len()
    }

    /// Returns true when the catalog has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Builds the render order from the challenge list and the completion set.
///
/// New and Completed keep source order; Stale is shuffled with a uniform
/// permutation. Tests disable the shuffle to assert exact orderings.
pub struct CatalogBuilder {
    shuffle_stale: bool,
}

impl CatalogBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self {
            shuffle_stale: true,
        }
    }

    /// Enable or disable shuffling of the Stale bucket.
    #[must_use]
    pub fn with_shuffle_stale(mut self, shuffle: bool) -> Self {
        self.shuffle_stale = shuffle;
        self
    }

    /// Classify, order, and summarize the given challenges.
    ///
    /// Render order is New ++ Stale ++ Completed. The summary counts
    /// completed challenges per difficulty; nothing else feeds it.
    #[must_use]
    pub fn build(
        &self,
        challenges: impl IntoIterator<Item = Challenge>,
        completed: &HashSet<ChallengeId>,
        now: chrono::DateTime<chrono::Utc>,
    ) -> CatalogPlan {
        let mut buckets = CatalogBuckets::partition(challenges, completed, now);

        if self.shuffle_stale {
            let mut rng = rng();
            buckets.stale.as_mut_slice().shuffle(&mut rng);
        }

        let summary = CompletedSummary::from_completed(&buckets.completed);

        let mut entries = Vec::with_capacity(buckets.total());
        entries.extend(buckets.new.into_iter().map(|challenge| CatalogEntry {
            challenge,
            category: DisplayCategory::New,
        }));
        entries.extend(buckets.stale.into_iter().map(|challenge| CatalogEntry {
            challenge,
            category: DisplayCategory::Stale,
        }));
        entries.extend(buckets.completed.into_iter().map(|challenge| CatalogEntry {
            challenge,
            category: DisplayCategory::Completed,
        }));

        CatalogPlan { entries, summary }
    }
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Combines the cached challenge list and the persisted completion set into
/// an ordered catalog.
pub struct CatalogService {
    clock: Clock,
    challenges: Arc<ChallengeService>,
    completions: Arc<CompletionService>,
}

impl CatalogService {
    #[must_use]
    pub fn new(
        clock: Clock,
        challenges: Arc<ChallengeService>,
        completions: Arc<CompletionService>,
    ) -> Self {
        Self {
            clock,
            challenges,
            completions,
        }
    }

    /// Build the catalog for rendering.
    ///
    /// # Errors
    ///
    /// Returns `CatalogServiceError::Source` when the challenge list cannot
    /// be fetched, or `CatalogServiceError::Completion` on storage failures.
    pub async fn build_catalog(&self) -> Result<CatalogPlan, CatalogServiceError> {
        let challenges = self.challenges.challenges().await?;
        let completed = self.completions.load_all().await?;
        let plan = CatalogBuilder::new().build(
            challenges.iter().cloned(),
            &completed,
            self.clock.now(),
        );
        Ok(plan)
    }
}
