use std::sync::Arc;

use async_trait::async_trait;
use serde::Deserialize;
use tokio::sync::Mutex;

use catalog_core::model::{Challenge, ChallengeId};

use crate::error::ChallengeSourceError;

/// Wire shape of the remote challenge document.
#[derive(Debug, Deserialize)]
struct ChallengeDocument {
    challenges: Vec<Challenge>,
}

/// Provider of the raw challenge list.
#[async_trait]
pub trait ChallengeSource: Send + Sync {
    /// Fetch the full challenge list.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeSourceError` on transport failure, a non-success
    /// status, or a malformed document.
    async fn fetch_challenges(&self) -> Result<Vec<Challenge>, ChallengeSourceError>;
}

/// HTTP-backed challenge source.
pub struct HttpChallengeSource {
    client: reqwest::Client,
    url: String,
}

impl HttpChallengeSource {
    #[must_use]
    pub fn new(client: reqwest::Client, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }
}

#[async_trait]
impl ChallengeSource for HttpChallengeSource {
    async fn fetch_challenges(&self) -> Result<Vec<Challenge>, ChallengeSourceError> {
        let response = self.client.get(&self.url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ChallengeSourceError::HttpStatus(status));
        }

        // Decode from text so a malformed body is distinguishable from a
        // transport failure in the error taxonomy.
        let body = response.text().await?;
        let document: ChallengeDocument = serde_json::from_str(&body)?;
        Ok(document.challenges)
    }
}

/// Fetches the challenge list once and serves it from cache afterwards.
///
/// The list is read-only for the lifetime of a run. All callers of
/// [`ChallengeService::challenges`] share one in-flight fetch: a deep link
/// that arrives before the data simply awaits the same future instead of
/// polling. A failed fetch is not cached, so the next call retries.
pub struct ChallengeService {
    source: Arc<dyn ChallengeSource>,
    cached: Mutex<Option<Arc<[Challenge]>>>,
}

impl ChallengeService {
    #[must_use]
    pub fn new(source: Arc<dyn ChallengeSource>) -> Self {
        Self {
            source,
            cached: Mutex::new(None),
        }
    }

    /// The full challenge list, fetching it on first use.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeSourceError` when the list has not been fetched yet
    /// and the fetch fails; the failure is logged and not cached.
    pub async fn challenges(&self) -> Result<Arc<[Challenge]>, ChallengeSourceError> {
        let mut cached = self.cached.lock().await;
        if let Some(list) = cached.as_ref() {
            return Ok(Arc::clone(list));
        }

        match self.source.fetch_challenges().await {
            Ok(list) => {
                let list: Arc<[Challenge]> = list.into();
                *cached = Some(Arc::clone(&list));
                Ok(list)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load challenge list");
                Err(err)
            }
        }
    }

    /// Look up one challenge by id, waiting for the list if necessary.
    ///
    /// `Ok(None)` means the list is available but contains no such id.
    ///
    /// # Errors
    ///
    /// Returns `ChallengeSourceError` if the list cannot be fetched.
    pub async fn find(
        &self,
        id: ChallengeId,
    ) -> Result<Option<Challenge>, ChallengeSourceError> {
        let list = self.challenges().await?;
        Ok(list.iter().find(|c| c.id == id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingSource {
        calls: AtomicUsize,
        fail_first: AtomicUsize,
    }

    #[async_trait]
    impl ChallengeSource for CountingSource {
        async fn fetch_challenges(&self) -> Result<Vec<Challenge>, ChallengeSourceError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail_first.load(Ordering::SeqCst) > 0 {
                self.fail_first.fetch_sub(1, Ordering::SeqCst);
                let bad = serde_json::from_str::<ChallengeDocument>("not json").unwrap_err();
                return Err(ChallengeSourceError::Malformed(bad));
            }
            let document: ChallengeDocument = serde_json::from_str(
                r#"{"challenges": [{
                    "id": 1,
                    "name": "Loop Basics",
                    "difficulty": "beginner",
                    "shortDescription": "s",
                    "fullDescription": "f",
                    "timeCreated": "2024-06-01"
                }]}"#,
            )
            .unwrap();
            Ok(document.challenges)
        }
    }

    #[tokio::test]
    async fn second_call_is_served_from_cache() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
            fail_first: AtomicUsize::new(0),
        });
        let service = ChallengeService::new(source.clone());

        let first = service.challenges().await.unwrap();
        let second = service.challenges().await.unwrap();
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_fetch_is_retried_on_next_call() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
            fail_first: AtomicUsize::new(1),
        });
        let service = ChallengeService::new(source.clone());

        assert!(service.challenges().await.is_err());
        let list = service.challenges().await.unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(source.calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn find_resolves_known_and_unknown_ids() {
        let source = Arc::new(CountingSource {
            calls: AtomicUsize::new(0),
            fail_first: AtomicUsize::new(0),
        });
        let service = ChallengeService::new(source);

        let found = service.find(ChallengeId::new(1)).await.unwrap();
        assert_eq!(found.unwrap().name, "Loop Basics");

        let missing = service.find(ChallengeId::new(99)).await.unwrap();
        assert!(missing.is_none());
    }
}
