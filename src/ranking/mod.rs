//! Embedding-based candidate ranking.
//!
//! Each candidate is scored by the mean of its cosine similarity against every context
//! vector, then the candidates are stably sorted by descending score:
//!
//! ```text
//! score(c) = (1 / |X|) * Σ_{x ∈ X} cos(embed(c), embed(x))
//! ```
//!
//! A zero-norm vector scores `0.0` against anything, which keeps the order total.

pub mod error;
pub mod ranker;
pub mod similarity;
pub mod types;


pub use error::RankingError;
pub use ranker::Ranker;
pub use similarity::{cosine_similarity, mean_cosine_similarity};
pub use types::RankedCandidate;
