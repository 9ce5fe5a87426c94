//! Embedding + model utilities.
//!
//! - [`Embedder`] is the capability the ranker consumes.
//! - [`sentence`] provides the BERT-family sentence embedder.
//! - [`cache`] memoizes vectors in front of any embedder.

/// The embedder capability trait.
pub mod backend;
/// BERT / XLM-R encoder with mean pooling.
pub mod bert;
#[cfg(test)]
mod bert_tests;
/// Embedding cache.
pub mod cache;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
#[cfg(test)]
pub(crate) mod fixtures;
/// Fixture embedders for tests.
#[cfg(any(test, feature = "mock"))]
pub mod mock;
/// Sentence embedder.
pub mod sentence;
/// Tokenizer loading helpers.
pub mod utils;

pub use backend::Embedder;
pub use cache::CachedEmbedder;
pub use error::EmbeddingError;
#[cfg(any(test, feature = "mock"))]
pub use mock::{FailingEmbedder, MockEmbedder};
pub use sentence::{
    EmbedderConfig, SENTENCE_EMBEDDING_DIM, SENTENCE_MAX_SEQ_LEN, SentenceEmbedder,
};
