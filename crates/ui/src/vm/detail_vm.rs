use catalog_core::model::{Challenge, ChallengeId, Difficulty};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceLinkVm {
    pub name: String,
    pub url: String,
}

/// Full-detail projection of one challenge plus its completion state.
#[derive(Clone, Debug, PartialEq)]
pub struct ChallengeDetailVm {
    pub id: ChallengeId,
    pub name: String,
    pub difficulty: Difficulty,
    pub full_description: String,
    pub requirements: Vec<String>,
    pub example_code: Option<String>,
    pub example_output: Option<String>,
    pub hint: Option<String>,
    pub resources: Vec<ResourceLinkVm>,
    pub is_completed: bool,
}

impl ChallengeDetailVm {
    /// Label for the completion toggle, reflecting stored state.
    #[must_use]
    pub fn toggle_label(&self) -> &'static str {
        if self.is_completed {
            "✓ Completed"
        } else {
            "Mark as Complete"
        }
    }
}

#[must_use]
pub fn map_challenge_detail(challenge: &Challenge, is_completed: bool) -> ChallengeDetailVm {
    ChallengeDetailVm {
        id: challenge.id,
        name: challenge.name.clone(),
        difficulty: challenge.difficulty,
        full_description: challenge.full_description.clone(),
        requirements: challenge.requirements.clone(),
        example_code: challenge.example_code.clone(),
        example_output: challenge.example_output.clone(),
        hint: challenge.hint.clone(),
        resources: challenge
            .resources
            .iter()
            .map(|r| ResourceLinkVm {
                name: r.name.clone(),
                url: r.url.to_string(),
            })
            .collect(),
        is_completed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::time::fixed_now;

    fn build_challenge() -> Challenge {
        Challenge {
            id: ChallengeId::new(3),
            name: "Inventory System".to_string(),
            difficulty: Difficulty::Advanced,
            short_description: "Track items.".to_string(),
            full_description: "Build an inventory with add and remove.".to_string(),
            time_created: fixed_now(),
            requirements: vec!["Support add".to_string(), "Support remove".to_string()],
            example_code: Some("add(item)".to_string()),
            example_output: None,
            hint: Some("Use a map.".to_string()),
            resources: vec![],
        }
    }

    #[test]
    fn toggle_label_reflects_completion_state() {
        let pending = map_challenge_detail(&build_challenge(), false);
        assert_eq!(pending.toggle_label(), "Mark as Complete");

        let done = map_challenge_detail(&build_challenge(), true);
        assert_eq!(done.toggle_label(), "✓ Completed");
    }

    #[test]
    fn map_carries_optional_sections() {
        let vm = map_challenge_detail(&build_challenge(), false);
        assert_eq!(vm.requirements.len(), 2);
        assert_eq!(vm.example_code.as_deref(), Some("add(item)"));
        assert!(vm.example_output.is_none());
        assert_eq!(vm.hint.as_deref(), Some("Use a map."));
        assert!(vm.resources.is_empty());
    }
}
