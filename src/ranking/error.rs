use thiserror::Error;

use crate::embedding::EmbeddingError;

#[derive(Debug, Error)]
pub enum RankingError {
    /// The embedding backend could not produce vectors. Not retried.
    #[error("embedding model unavailable: {0}")]
    ModelUnavailable(#[from] EmbeddingError),

    /// Malformed input; no partial result is produced.
    #[error("invalid argument: {reason}")]
    InvalidArgument { reason: String },
}

impl RankingError {
    pub(crate) fn invalid(reason: impl Into<String>) -> Self {
        RankingError::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Returns `true` for caller errors (as opposed to backend failures).
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, RankingError::InvalidArgument { .. })
    }
}
