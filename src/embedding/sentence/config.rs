use std::path::PathBuf;

use crate::embedding::error::EmbeddingError;

/// Default sentence embedding dimension.
pub const SENTENCE_EMBEDDING_DIM: usize = crate::constants::DEFAULT_EMBEDDING_DIM;

/// Default sentence embedder max sequence length.
pub const SENTENCE_MAX_SEQ_LEN: usize = crate::constants::DEFAULT_MAX_SEQ_LEN;

/// Texts per forward pass.
pub const DEFAULT_BATCH_SIZE: usize = 32;

/// Files a model directory must contain.
pub const REQUIRED_MODEL_FILES: [&str; 3] = ["config.json", "model.safetensors", "tokenizer.json"];

#[derive(Debug, Clone)]
/// Configuration for [`SentenceEmbedder`](super::SentenceEmbedder).
pub struct EmbedderConfig {
    /// Directory holding `config.json`, `model.safetensors` and `tokenizer.json`.
    pub model_dir: PathBuf,
    /// Max tokens per text (longer texts are truncated).
    pub max_seq_len: usize,
    /// Output dimension in stub mode. A loaded model reports its own hidden size.
    pub embedding_dim: usize,
    /// Texts per forward pass.
    pub batch_size: usize,
    /// If true, run in deterministic stub mode (no model files required).
    pub testing_stub: bool,
}

impl Default for EmbedderConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::new(),
            max_seq_len: SENTENCE_MAX_SEQ_LEN,
            embedding_dim: SENTENCE_EMBEDDING_DIM,
            batch_size: DEFAULT_BATCH_SIZE,
            testing_stub: false,
        }
    }
}

impl EmbedderConfig {
    /// Env var used to locate the model directory.
    pub const ENV_MODEL_DIR: &'static str = "GLOSAURUS_MODEL_DIR";

    /// Loads config from the environment; an unset or blank model dir selects stub mode.
    pub fn from_env() -> Self {
        let model_dir = std::env::var(Self::ENV_MODEL_DIR)
            .ok()
            .map(|v| v.trim().to_string())
            .filter(|v| !v.is_empty())
            .map(PathBuf::from);

        match model_dir {
            Some(dir) => Self::new(dir),
            None => Self::stub(),
        }
    }

    /// Creates a config for a model directory.
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }

    /// Creates a stub config (no model files; produces deterministic embeddings).
    pub fn stub() -> Self {
        Self {
            testing_stub: true,
            ..Default::default()
        }
    }

    /// Overrides the batch size.
    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    /// Validates required fields.
    pub fn validate(&self) -> Result<(), EmbeddingError> {
        if self.batch_size == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "batch_size must be at least 1".to_string(),
            });
        }

        if self.max_seq_len == 0 {
            return Err(EmbeddingError::InvalidConfig {
                reason: "max_seq_len must be at least 1".to_string(),
            });
        }

        if self.testing_stub {
            if self.embedding_dim == 0 {
                return Err(EmbeddingError::InvalidConfig {
                    reason: "embedding_dim must be at least 1".to_string(),
                });
            }
            return Ok(());
        }

        if self.model_dir.as_os_str().is_empty() {
            return Err(EmbeddingError::InvalidConfig {
                reason: "model_dir is required (stubbing is disabled)".to_string(),
            });
        }

        if !self.model_dir.is_dir() {
            return Err(EmbeddingError::ModelNotFound {
                path: self.model_dir.clone(),
            });
        }

        Ok(())
    }

    /// Returns the first required model file missing from `model_dir`, if any.
    pub fn missing_model_file(&self) -> Option<PathBuf> {
        REQUIRED_MODEL_FILES
            .iter()
            .map(|name| self.model_dir.join(name))
            .find(|path| !path.is_file())
    }

    /// Returns `true` if every required model file exists.
    pub fn model_available(&self) -> bool {
        !self.model_dir.as_os_str().is_empty() && self.missing_model_file().is_none()
    }
}
