//! Sentence embedder (BERT-family safetensors + tokenizer).
//!
//! Use [`EmbedderConfig::stub`] for tests/examples without model files.

/// Sentence embedder configuration.
pub mod config;

#[cfg(test)]
mod tests;

pub use config::{
    DEFAULT_BATCH_SIZE, EmbedderConfig, REQUIRED_MODEL_FILES, SENTENCE_EMBEDDING_DIM,
    SENTENCE_MAX_SEQ_LEN,
};

use std::sync::Arc;

use candle_core::{Device, Tensor};
use tokenizers::Tokenizer;
use tracing::{debug, info, warn};

use crate::embedding::backend::Embedder;
use crate::embedding::bert::BertEncoder;
use crate::embedding::device::select_device;
use crate::embedding::error::EmbeddingError;
use crate::embedding::utils::load_batch_tokenizer;
use crate::hashing::hash_text;

enum EmbedderBackend {
    Model {
        encoder: BertEncoder,
        tokenizer: Arc<Tokenizer>,
        device: Device,
    },
    Stub,
}

/// Sentence embedding generator (supports stub mode).
///
/// Immutable once loaded: the encoder weights are reference counted and the tokenizer is
/// only read, so one handle serves concurrent callers without locking.
pub struct SentenceEmbedder {
    backend: EmbedderBackend,
    config: EmbedderConfig,
    embedding_dim: usize,
}

impl std::fmt::Debug for SentenceEmbedder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SentenceEmbedder")
            .field(
                "backend",
                &match &self.backend {
                    EmbedderBackend::Model { device, .. } => format!("Model({:?})", device),
                    EmbedderBackend::Stub => "Stub".to_string(),
                },
            )
            .field("embedding_dim", &self.embedding_dim)
            .field("max_seq_len", &self.config.max_seq_len)
            .finish()
    }
}

impl SentenceEmbedder {
    /// Loads the embedder from a config (stub mode is supported).
    pub fn load(config: EmbedderConfig) -> Result<Self, EmbeddingError> {
        config.validate()?;

        if config.testing_stub {
            warn!("Sentence embedder running in STUB mode (testing only)");
            return Ok(Self {
                embedding_dim: config.embedding_dim,
                backend: EmbedderBackend::Stub,
                config,
            });
        }

        if let Some(missing) = config.missing_model_file() {
            return Err(EmbeddingError::ModelNotFound { path: missing });
        }

        let device = select_device();
        debug!(?device, "Selected compute device for sentence embedder");

        let tokenizer = load_batch_tokenizer(&config.model_dir, config.max_seq_len).map_err(
            |e| EmbeddingError::TokenizationFailed {
                reason: format!("Failed to load tokenizer: {}", e),
            },
        )?;

        let encoder = BertEncoder::load(&config.model_dir, &device).map_err(|e| {
            EmbeddingError::ModelLoadFailed {
                reason: format!("Failed to load BERT encoder: {}", e),
            }
        })?;

        let embedding_dim = encoder.hidden_size();
        if embedding_dim != config.embedding_dim {
            info!(
                configured = config.embedding_dim,
                model = embedding_dim,
                "Using model hidden size as embedding dimension"
            );
        }

        info!(
            model_dir = %config.model_dir.display(),
            embedding_dim,
            max_seq_len = config.max_seq_len,
            batch_size = config.batch_size,
            "Sentence embedding model loaded"
        );

        Ok(Self {
            backend: EmbedderBackend::Model {
                encoder,
                tokenizer: Arc::new(tokenizer),
                device,
            },
            config,
            embedding_dim,
        })
    }

    /// Loads a stub embedder.
    pub fn stub() -> Result<Self, EmbeddingError> {
        Self::load(EmbedderConfig::stub())
    }

    /// Returns `true` if a model is loaded.
    pub fn has_model(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Model { .. })
    }

    /// Returns the embedder configuration.
    pub fn config(&self) -> &EmbedderConfig {
        &self.config
    }

    fn embed_batch_with_model(
        &self,
        texts: &[&str],
        encoder: &BertEncoder,
        tokenizer: &Tokenizer,
        device: &Device,
    ) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let encodings = tokenizer.encode_batch(texts.to_vec(), true).map_err(|e| {
            EmbeddingError::TokenizationFailed {
                reason: e.to_string(),
            }
        })?;

        debug!(
            batch = texts.len(),
            seq_len = encodings.first().map(|e| e.get_ids().len()).unwrap_or(0),
            "Embedding batch (encoder forward pass)"
        );

        let ids = encodings
            .iter()
            .map(|e| Tensor::new(e.get_ids(), device))
            .collect::<candle_core::Result<Vec<_>>>()?;
        let masks = encodings
            .iter()
            .map(|e| Tensor::new(e.get_attention_mask(), device))
            .collect::<candle_core::Result<Vec<_>>>()?;

        let input_ids = Tensor::stack(&ids, 0)?;
        let attention_mask = Tensor::stack(&masks, 0)?;
        let token_type_ids = input_ids.zeros_like()?;

        let pooled = encoder
            .encode(&input_ids, &token_type_ids, &attention_mask)
            .map_err(|e| EmbeddingError::InferenceFailed {
                reason: format!("Encoder forward pass failed: {}", e),
            })?;

        let vectors = pooled.to_vec2::<f32>()?;
        if vectors.len() != texts.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "encoder returned {} vectors for {} texts",
                    vectors.len(),
                    texts.len()
                ),
            });
        }

        Ok(vectors)
    }

    fn embed_stub(&self, text: &str) -> Vec<f32> {
        let digest = hash_text(text);
        let mut state = u64::from_le_bytes([
            digest[0], digest[1], digest[2], digest[3], digest[4], digest[5], digest[6],
            digest[7],
        ]);

        let mut embedding = Vec::with_capacity(self.embedding_dim);
        for _ in 0..self.embedding_dim {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let value = ((state >> 32) as f32 / u32::MAX as f32) * 2.0 - 1.0;
            embedding.push(value);
        }

        embedding
    }
}

impl Embedder for SentenceEmbedder {
    fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let mut vectors = self.embed_many(&[text])?;
        vectors.pop().ok_or_else(|| EmbeddingError::InferenceFailed {
            reason: "encoder returned no vector".to_string(),
        })
    }

    fn embed_many(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(vec![]);
        }

        match &self.backend {
            EmbedderBackend::Model {
                encoder,
                tokenizer,
                device,
            } => {
                let mut results = Vec::with_capacity(texts.len());
                for chunk in texts.chunks(self.config.batch_size) {
                    results.extend(self.embed_batch_with_model(chunk, encoder, tokenizer, device)?);
                }
                Ok(results)
            }
            EmbedderBackend::Stub => {
                debug!(batch = texts.len(), "Generating stub embeddings");
                Ok(texts.iter().map(|text| self.embed_stub(text)).collect())
            }
        }
    }

    fn embedding_dim(&self) -> usize {
        self.embedding_dim
    }

    fn is_stub(&self) -> bool {
        matches!(self.backend, EmbedderBackend::Stub)
    }
}
