//! Fixture embedders for tests.
//!
//! [`MockEmbedder`] builds a text's vector as the sum of per-word vectors from a small
//! hand-written vocabulary, so tests can assert semantic orderings without model files.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::backend::Embedder;
use super::error::EmbeddingError;

/// Vocabulary-driven embedder with call counting.
#[derive(Debug)]
pub struct MockEmbedder {
    dim: usize,
    words: HashMap<String, Vec<f32>>,
    texts: HashMap<String, Vec<f32>>,
    calls: AtomicUsize,
}

impl MockEmbedder {
    pub fn new(dim: usize) -> Self {
        Self {
            dim,
            words: HashMap::new(),
            texts: HashMap::new(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Registers a word vector (matched case-insensitively per whitespace token).
    pub fn with_word(mut self, word: &str, vector: &[f32]) -> Self {
        assert_eq!(vector.len(), self.dim, "word vector has wrong dimension");
        self.words.insert(word.to_lowercase(), vector.to_vec());
        self
    }

    /// Pins the exact vector for a whole text, bypassing the word sum.
    pub fn with_text(mut self, text: &str, vector: &[f32]) -> Self {
        self.texts.insert(text.to_string(), vector.to_vec());
        self
    }

    /// Three axes: positive mood, negative mood, "feeling" talk.
    pub fn mood() -> Self {
        Self::new(3)
            .with_word("happy", &[1.0, 0.0, 0.2])
            .with_word("joyful", &[0.9, 0.0, 0.1])
            .with_word("great", &[0.8, 0.0, 0.0])
            .with_word("angry", &[0.0, 1.0, 0.2])
            .with_word("sad", &[0.0, 0.9, 0.1])
            .with_word("feeling", &[0.0, 0.0, 1.0])
            .with_word("today", &[0.0, 0.0, 0.1])
    }

    /// Number of `embed_many`/`embed_one` calls that reached this embedder.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn vector_for(&self, text: &str) -> Vec<f32> {
        if let Some(pinned) = self.texts.get(text) {
            return pinned.clone();
        }

        let mut sum = vec![0.0; self.dim];
        for token in text.split_whitespace() {
            if let Some(v) = self.words.get(&token.to_lowercase()) {
                for (acc, x) in sum.iter_mut().zip(v) {
                    *acc += x;
                }
            }
        }
        sum
    }
}

impl Embedder for MockEmbedder {
    fn embed_one(&self, text: &str) -> Result<Vec<f32>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.vector_for(text))
    }

    fn embed_many(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(texts.iter().map(|text| self.vector_for(text)).collect())
    }

    fn embedding_dim(&self) -> usize {
        self.dim
    }
}

/// Embedder whose backend is always down.
#[derive(Debug, Default)]
pub struct FailingEmbedder;

impl Embedder for FailingEmbedder {
    fn embed_one(&self, _text: &str) -> Result<Vec<f32>, EmbeddingError> {
        Err(EmbeddingError::InferenceFailed {
            reason: "backend offline".to_string(),
        })
    }

    fn embedding_dim(&self) -> usize {
        1
    }
}
