use crate::model::Difficulty;

//
// ─── FILTER STATE ──────────────────────────────────────────────────────────────
//

/// Difficulty gate for the catalog, `All` or exactly one tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DifficultyFilter {
    #[default]
    All,
    Only(Difficulty),
}

impl DifficultyFilter {
    /// True when a card with the given difficulty passes this gate.
    #[must_use]
    pub fn admits(self, difficulty: Difficulty) -> bool {
        match self {
            DifficultyFilter::All => true,
            DifficultyFilter::Only(selected) => difficulty == selected,
        }
    }
}

/// Ephemeral filter state: search text plus difficulty gate.
///
/// In-memory only; reset on relaunch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search: String,
    pub difficulty: DifficultyFilter,
}

impl FilterState {
    #[must_use]
    pub fn new(search: impl Into<String>, difficulty: DifficultyFilter) -> Self {
        Self {
            search: search.into(),
            difficulty,
        }
    }

    /// Visibility rule for one card.
    ///
    /// The card passes iff its difficulty passes the gate AND the search text
    /// is empty or a case-insensitive substring of its name or description.
    /// Plain substring containment; not tokenized or fuzzy.
    #[must_use]
    pub fn matches(&self, name: &str, description: &str, difficulty: Difficulty) -> bool {
        if !self.difficulty.admits(difficulty) {
            return false;
        }
        if self.search.is_empty() {
            return true;
        }
        let needle = self.search.to_lowercase();
        name.to_lowercase().contains(&needle) || description.to_lowercase().contains(&needle)
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
