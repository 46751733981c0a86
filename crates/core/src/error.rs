use thiserror::Error;

use crate::model::DifficultyParseError;
use crate::model::ParseIdError;

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Difficulty(#[from] DifficultyParseError),
    #[error(transparent)]
    Id(#[from] ParseIdError),
}
