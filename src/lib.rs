//! Glosaurus library crate (used by the server and integration tests).
//!
//! # Public API Surface
//!
//! ## Core
//! - [`Embedder`], [`SentenceEmbedder`], [`EmbedderConfig`] - Sentence embeddings
//! - [`Ranker`], [`RankingError`] - Mean-cosine candidate ranking
//! - [`CachedEmbedder`] - Memoized embeddings keyed by text hash
//!
//! ## Candidate Sources
//! - [`ResyfLexicon`], [`LexicalResource`] - Lexicon lookups
//! - [`GenaiGenerator`], [`TextGenerator`] - Local language model suggestions
//! - [`SynonymService`], [`SuggestionStrategy`] - Gather, filter and rank
//!
//! ## Serving
//! - [`Config`], [`ConfigError`] - Environment configuration
//! - [`gateway`] - Axum routes
//! - [`MarkdownTable`] - Glossary export
//!
//! ## Test/Mock Support
//! Mock implementations are available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod embedding;
pub mod export;
pub mod gateway;
pub mod generation;
pub mod hashing;
pub mod lexicon;
pub mod ranking;
pub mod suggest;

pub use config::{Config, ConfigError};
pub use embedding::{
    CachedEmbedder, Embedder, EmbedderConfig, EmbeddingError, SENTENCE_EMBEDDING_DIM,
    SENTENCE_MAX_SEQ_LEN, SentenceEmbedder,
};
#[cfg(any(test, feature = "mock"))]
pub use embedding::{FailingEmbedder, MockEmbedder};
pub use export::{CellValue, ExportError, MarkdownTable};
#[cfg(any(test, feature = "mock"))]
pub use generation::StaticGenerator;
pub use generation::{GenaiGenerator, GenerationError, TextGenerator};
pub use hashing::{hash_text, hash_text_hex};
pub use lexicon::{LexicalResource, LexiconError, PartOfSpeech, ResyfLexicon, collect_synonyms};
pub use ranking::{RankedCandidate, Ranker, RankingError, cosine_similarity};
pub use suggest::{SuggestError, SuggestionStrategy, SynonymRequest, SynonymService};
