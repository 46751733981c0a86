#![forbid(unsafe_code)]

pub mod catalog_service;
pub mod challenge_service;
pub mod completion_service;
pub mod error;

pub use catalog_core::Clock;

pub use catalog_service::{CatalogBuilder, CatalogEntry, CatalogPlan, CatalogService};
pub use challenge_service::{ChallengeService, ChallengeSource, HttpChallengeSource};
pub use completion_service::CompletionService;
pub use error::{CatalogServiceError, ChallengeSourceError, CompletionServiceError};
