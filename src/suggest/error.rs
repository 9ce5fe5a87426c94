use thiserror::Error;

use crate::generation::GenerationError;
use crate::ranking::RankingError;

#[derive(Debug, Error)]
pub enum SuggestError {
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },

    #[error(transparent)]
    Ranking(#[from] RankingError),

    #[error("generator failed: {0}")]
    Generation(#[from] GenerationError),

    #[error("no text generator configured for the generator strategy")]
    GeneratorUnavailable,

    #[error("ranking task failed: {reason}")]
    TaskFailed { reason: String },
}

impl From<tokio::task::JoinError> for SuggestError {
    fn from(err: tokio::task::JoinError) -> Self {
        SuggestError::TaskFailed {
            reason: err.to_string(),
        }
    }
}
