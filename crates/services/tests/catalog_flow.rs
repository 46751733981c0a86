use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use catalog_core::catalog::DisplayCategory;
use catalog_core::model::{Challenge, ChallengeId, Difficulty};
use catalog_core::time::fixed_now;
use services::error::ChallengeSourceError;
use services::{CatalogService, ChallengeService, ChallengeSource, Clock, CompletionService};
use storage::repository::InMemoryRepository;
use tokio::sync::Semaphore;

fn fixture_challenge(id: u64, difficulty: &str, age_days: i64) -> Challenge {
    let json = format!(
        r#"{{
            "id": {id},
            "name": "Challenge {id}",
            "difficulty": "{difficulty}",
            "shortDescription": "short {id}",
            "fullDescription": "full {id}",
            "timeCreated": "{}"
        }}"#,
        (fixed_now() - chrono::Duration::days(age_days)).to_rfc3339(),
    );
    serde_json::from_str(&json).unwrap()
}

struct FixtureSource {
    challenges: Vec<Challenge>,
}

#[async_trait]
impl ChallengeSource for FixtureSource {
    async fn fetch_challenges(&self) -> Result<Vec<Challenge>, ChallengeSourceError> {
        Ok(self.challenges.clone())
    }
}

/// Source that blocks until the test releases it, for deep-link scenarios.
struct GatedSource {
    gate: Arc<Semaphore>,
    challenges: Vec<Challenge>,
}

#[async_trait]
impl ChallengeSource for GatedSource {
    async fn fetch_challenges(&self) -> Result<Vec<Challenge>, ChallengeSourceError> {
        let _permit = self.gate.acquire().await.expect("gate closed");
        Ok(self.challenges.clone())
    }
}

fn build_services(challenges: Vec<Challenge>) -> (Arc<ChallengeService>, Arc<CompletionService>, CatalogService) {
    let source = Arc::new(FixtureSource { challenges });
    let challenge_service = Arc::new(ChallengeService::new(source));
    let completion_service = Arc::new(CompletionService::new(Arc::new(InMemoryRepository::new())));
    let catalog = CatalogService::new(
        Clock::fixed(fixed_now()),
        Arc::clone(&challenge_service),
        Arc::clone(&completion_service),
    );
    (challenge_service, completion_service, catalog)
}

#[tokio::test]
async fn toggle_moves_challenge_to_completed_and_bumps_summary() {
    let challenges = vec![
        fixture_challenge(1, "beginner", 10),
        fixture_challenge(2, "novice", 1),
        fixture_challenge(3, "expert", 30),
    ];
    let (_challenges, completions, catalog) = build_services(challenges);

    let plan = catalog.build_catalog().await.unwrap();
    assert_eq!(plan.total(), 3);
    assert_eq!(plan.summary.total(), 0);
    let category_of_1 = plan
        .entries
        .iter()
        .find(|e| e.challenge.id == ChallengeId::new(1))
        .unwrap()
        .category;
    assert_eq!(category_of_1, DisplayCategory::Stale);

    assert!(completions.toggle(ChallengeId::new(1)).await.unwrap());

    let plan = catalog.build_catalog().await.unwrap();
    let completed_entry = plan
        .entries
        .iter()
        .find(|e| e.challenge.id == ChallengeId::new(1))
        .unwrap();
    assert_eq!(completed_entry.category, DisplayCategory::Completed);
    assert_eq!(plan.summary.count(Difficulty::Beginner), 1);
    assert_eq!(plan.summary.total(), 1);

    // Completed entries render last.
    assert_eq!(
        plan.entries.last().unwrap().challenge.id,
        ChallengeId::new(1)
    );
}

#[tokio::test]
async fn toggling_back_restores_the_original_catalog_shape() {
    let challenges = vec![fixture_challenge(1, "advanced", 10)];
    let (_challenges, completions, catalog) = build_services(challenges);

    let before = catalog.build_catalog().await.unwrap();
    completions.toggle(ChallengeId::new(1)).await.unwrap();
    completions.toggle(ChallengeId::new(1)).await.unwrap();
    let after = catalog.build_catalog().await.unwrap();

    assert_eq!(before.summary, after.summary);
    assert_eq!(
        before.entries[0].category,
        after.entries[0].category
    );
}

#[tokio::test]
async fn deep_link_before_data_resolves_once_data_arrives() {
    let gate = Arc::new(Semaphore::new(0));
    let source = Arc::new(GatedSource {
        gate: Arc::clone(&gate),
        challenges: vec![fixture_challenge(1, "beginner", 10)],
    });
    let service = Arc::new(ChallengeService::new(source));

    // Navigation request arrives before the list is available.
    let pending = {
        let service = Arc::clone(&service);
        tokio::spawn(async move { service.find(ChallengeId::new(1)).await })
    };

    // Data becomes available; the pending lookup must resolve, not drop.
    gate.add_permits(1);
    let found = tokio::time::timeout(Duration::from_secs(5), pending)
        .await
        .expect("deep link must not hang")
        .expect("task must not panic")
        .expect("fetch must succeed");

    assert_eq!(found.unwrap().name, "Challenge 1");
}

#[tokio::test]
async fn unknown_id_resolves_to_none_not_error() {
    let (challenges, _completions, _catalog) =
        build_services(vec![fixture_challenge(1, "beginner", 10)]);

    let missing = challenges.find(ChallengeId::new(404)).await.unwrap();
    assert!(missing.is_none());
}
