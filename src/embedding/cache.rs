//! Memoizing wrapper around an [`Embedder`].
//!
//! Vectors are keyed by the BLAKE3 digest of the text and held in a bounded LRU. A batch
//! only sends its cache misses to the inner embedder, in one call.

use moka::sync::Cache;
use std::sync::Arc;
use tracing::debug;

use super::backend::Embedder;
use super::error::EmbeddingError;
use crate::hashing::hash_text;

/// [`Embedder`] that caches vectors per text.
pub struct CachedEmbedder<E> {
    inner: E,
    entries: Cache<[u8; 32], Arc<Vec<f32>>>,
}

impl<E: Embedder> CachedEmbedder<E> {
    /// Wraps `inner` with a cache holding at most `capacity` vectors.
    pub fn new(inner: E, capacity: u64) -> Self {
        Self {
            inner,
            entries: Cache::builder().max_capacity(capacity).build(),
        }
    }

    /// Returns the wrapped embedder.
    pub fn inner(&self) -> &E {
        &self.inner
    }

    /// Number of cached vectors (approximate until pending maintenance runs).
    pub fn len(&self) -> u64 {
        self.entries.entry_count()
    }

    /// Returns `true` if nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Flushes pending cache maintenance so [`len`](Self::len) is exact.
    pub fn run_pending_tasks(&self) {
        self.entries.run_pending_tasks();
    }

    /// Drops every cached vector.
    pub fn clear(&self) {
        self.entries.invalidate_all();
    }
}

impl<E: Embedder> Embedder for CachedEmbedder<E> {
    fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        let key = hash_text(text);
        if let Some(hit) = self.entries.get(&key) {
            return Ok(hit.as_ref().clone());
        }

        let vector = self.inner.embed_one(text)?;
        self.entries.insert(key, Arc::new(vector.clone()));
        Ok(vector)
    }

    fn embed_many(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        let keys: Vec<[u8; 32]> = texts.iter().map(|text| hash_text(text)).collect();
        let mut slots: Vec<Option<Arc<Vec<f32>>>> =
            keys.iter().map(|key| self.entries.get(key)).collect();

        let misses: Vec<usize> = slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.is_none())
            .map(|(idx, _)| idx)
            .collect();

        debug!(
            total = texts.len(),
            misses = misses.len(),
            "Embedding cache lookup"
        );

        if !misses.is_empty() {
            let miss_texts: Vec<&str> = misses.iter().map(|&idx| texts[idx]).collect();
            let vectors = self.inner.embed_many(&miss_texts)?;

            if vectors.len() != miss_texts.len() {
                return Err(EmbeddingError::InferenceFailed {
                    reason: format!(
                        "embedder returned {} vectors for {} texts",
                        vectors.len(),
                        miss_texts.len()
                    ),
                });
            }

            for (idx, vector) in misses.into_iter().zip(vectors) {
                let vector = Arc::new(vector);
                self.entries.insert(keys[idx], Arc::clone(&vector));
                slots[idx] = Some(vector);
            }
        }

        Ok(slots
            .into_iter()
            .flatten()
            .map(|vector| vector.as_ref().clone())
            .collect())
    }

    fn embedding_dim(&self) -> usize {
        self.inner.embedding_dim()
    }

    fn is_stub(&self) -> bool {
        self.inner.is_stub()
    }
}
