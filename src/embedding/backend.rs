use std::sync::Arc;

use super::error::EmbeddingError;

/// Text → vector capability used by the ranker.
///
/// Implementations must be pure with respect to their loaded state: the same text yields
/// the same vector for the lifetime of the handle. Handles are shared across request
/// threads, hence `Send + Sync`.
pub trait Embedder: Send + Sync {
    /// Embeds a single text.
    fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError>;

    /// Embeds `texts`, returning one vector per input in the same order.
    ///
    /// The default calls [`embed_one`](Embedder::embed_one) per element; backends that can
    /// batch the model call should override it.
    fn embed_many(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        texts.iter().map(|text| self.embed_one(text)).collect()
    }

    /// Dimension of every vector this embedder returns.
    fn embedding_dim(&self) -> usize;

    /// `true` when vectors carry no meaning (deterministic test stub).
    fn is_stub(&self) -> bool {
        false
    }
}

impl<E: Embedder + ?Sized> Embedder for Arc<E> {
    fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed_one(text)
    }

    fn embed_many(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).embed_many(texts)
    }

    fn embedding_dim(&self) -> usize {
        (**self).embedding_dim()
    }

    fn is_stub(&self) -> bool {
        (**self).is_stub()
    }
}

impl<E: Embedder + ?Sized> Embedder for Box<E> {
    fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        (**self).embed_one(text)
    }

    fn embed_many(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        (**self).embed_many(texts)
    }

    fn embedding_dim(&self) -> usize {
        (**self).embedding_dim()
    }

    fn is_stub(&self) -> bool {
        (**self).is_stub()
    }
}
