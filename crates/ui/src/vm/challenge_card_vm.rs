use catalog_core::catalog::DisplayCategory;
use catalog_core::filter::FilterState;
use catalog_core::model::{ChallengeId, Difficulty};
use services::CatalogEntry;

/// Card-level projection of one catalog entry.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ChallengeCardVm {
    pub id: ChallengeId,
    pub name: String,
    pub short_description: String,
    pub difficulty: Difficulty,
    pub is_new: bool,
    pub is_completed: bool,
}

#[must_use]
pub fn map_challenge_card(entry: &CatalogEntry) -> ChallengeCardVm {
    ChallengeCardVm {
        id: entry.challenge.id,
        name: entry.challenge.name.clone(),
        short_description: entry.challenge.short_description.clone(),
        difficulty: entry.challenge.difficulty,
        is_new: entry.category == DisplayCategory::New,
        is_completed: entry.category == DisplayCategory::Completed,
    }
}

impl ChallengeCardVm {
    /// Visibility under the current filter state.
    #[must_use]
    pub fn matches(&self, filter: &FilterState) -> bool {
        filter.matches(&self.name, &self.short_description, self.difficulty)
    }
}
