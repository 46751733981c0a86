pub mod challenge;
pub mod ids;

pub use challenge::{Challenge, Difficulty, DifficultyParseError, ResourceLink};
pub use ids::{ChallengeId, ParseIdError};
