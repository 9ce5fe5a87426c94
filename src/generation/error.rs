use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("text generation request failed: {reason}")]
    RequestFailed { reason: String },

    #[error("generator returned no text")]
    EmptyResponse,

    #[error("failed to launch {path}: {source}")]
    RuntimeLaunch {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("model pull for {model} exited with status {status}")]
    PullFailed { model: String, status: String },
}

impl From<genai::Error> for GenerationError {
    fn from(err: genai::Error) -> Self {
        GenerationError::RequestFailed {
            reason: err.to_string(),
        }
    }
}
