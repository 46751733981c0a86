use std::sync::Arc;

use services::{CatalogService, ChallengeService, CompletionService};

pub trait UiApp: Send + Sync {
    fn catalog(&self) -> Arc<CatalogService>;
    fn challenges(&self) -> Arc<ChallengeService>;
    fn completions(&self) -> Arc<CompletionService>;
}

#[derive(Clone)]
pub struct AppContext {
    catalog: Arc<CatalogService>,
    challenges: Arc<ChallengeService>,
    completions: Arc<CompletionService>,
}

impl AppContext {
    #[must_use]
    pub fn new(app: &Arc<dyn UiApp>) -> Self {
        Self {
            catalog: app.catalog(),
            challenges: app.challenges(),
            completions: app.completions(),
        }
    }

    #[must_use]
    pub fn catalog(&self) -> Arc<CatalogService> {
        Arc::clone(&self.catalog)
    }

    #[must_use]
    pub fn challenges(&self) -> Arc<ChallengeService> {
        Arc::clone(&self.challenges)
    }

    #[must_use]
    pub fn completions(&self) -> Arc<CompletionService> {
        Arc::clone(&self.completions)
    }
}

/// Build an `AppContext` from a UI-facing app implementation.
///
/// The context is provided by the application composition root
/// (e.g. `crates/app`).
#[must_use]
pub fn build_app_context(app: &Arc<dyn UiApp>) -> AppContext {
    AppContext::new(app)
}
