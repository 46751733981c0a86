use chrono::{DateTime, Utc};
use std::collections::HashSet;

use crate::model::{Challenge, ChallengeId, Difficulty};

/// Challenges younger than this many days count as new.
pub const NEW_WINDOW_DAYS: f64 = 7.0;

//
// ─── CLASSIFICATION ────────────────────────────────────────────────────────────
//

/// Display classification of a challenge, derived on every catalog build.
///
/// Never persisted. `Completed` takes precedence over `New` regardless of age.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayCategory {
    New,
    Stale,
    Completed,
}

impl DisplayCategory {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DisplayCategory::New => "new",
            DisplayCategory::Stale => "stale",
            DisplayCategory::Completed => "completed",
        }
    }
}

/// Classify a challenge against the completion set and the current time.
#[must_use]
pub fn classify(
    challenge: &Challenge,
    completed: &HashSet<ChallengeId>,
    now: DateTime<Utc>,
) -> DisplayCategory {
    if completed.contains(&challenge.id) {
        DisplayCategory::Completed
    } else if challenge.age_days(now) < NEW_WINDOW_DAYS {
        DisplayCategory::New
    } else {
        DisplayCategory::Stale
    }
}

//
// ─── BUCKETS ───────────────────────────────────────────────────────────────────
//

/// The three display buckets, each preserving source order.
///
/// Render order is New ++ Stale ++ Completed; randomizing the Stale bucket is
/// the caller's concern, so partitioning stays deterministic and testable.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CatalogBuckets {
    pub new: Vec<Challenge>,
    pub stale: Vec<Challenge>,
    pub completed: Vec<Challenge>,
}

impl CatalogBuckets {
    /// Partition challenges into buckets, preserving source order within each.
    #[must_use]
    pub fn partition(
        challenges: impl IntoIterator<Item = Challenge>,
        completed: &HashSet<ChallengeId>,
        now: DateTime<Utc>,
    ) -> Self {
        let mut buckets = Self::default();
        for challenge in challenges {
            match classify(&challenge, completed, now) {
                DisplayCategory::New => buckets.new.push(challenge),
                DisplayCategory::Stale => buckets.stale.push(challenge),
                DisplayCategory::Completed => buckets.completed.push(challenge),
            }
        }
        buckets
    }

    /// Total number of challenges across all buckets.
    #[must_use]
    pub fn total(&self) -> usize {
        self.new.len() + self.stale.len() + self.completed.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

//
// ─── COMPLETED SUMMARY ─────────────────────────────────────────────────────────
//

/// Per-difficulty counts over the completed bucket only, for summary display.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CompletedSummary {
    counts: [usize; 4],
}

impl CompletedSummary {
    /// Aggregate counts from the completed bucket.
    #[must_use]
    pub fn from_completed(completed: &[Challenge]) -> Self {
        let mut summary = Self::default();
        for challenge in completed {
            summary.counts[challenge.difficulty.index()] += 1;
        }
        summary
    }

    /// Completed count for one difficulty tier.
    #[must_use]
    pub fn count(&self, difficulty: Difficulty) -> usize {
        self.counts[difficulty.index()]
    }

    /// Completed count across all tiers.
    #[must_use]
    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
