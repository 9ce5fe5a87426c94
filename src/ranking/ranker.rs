use std::cmp::Ordering;
use tracing::debug;

use crate::embedding::{Embedder, EmbeddingError};

use super::error::RankingError;
use super::similarity::mean_cosine_similarity;
use super::types::RankedCandidate;

/// Orders candidate texts by mean cosine similarity to a context.
///
/// Holds only the embedder handle, so a `Ranker` is as shareable as its embedder.
pub struct Ranker<E> {
    embedder: E,
}

impl<E> std::fmt::Debug for Ranker<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ranker").finish_non_exhaustive()
    }
}

impl<E: Embedder> Ranker<E> {
    pub fn new(embedder: E) -> Self {
        Self { embedder }
    }

    pub fn embedder(&self) -> &E {
        &self.embedder
    }

    /// Returns `candidates` reordered by descending relevance to `context`.
    ///
    /// Equal scores keep their input order. Duplicate candidates are ranked independently.
    /// An empty `context` is rejected with [`RankingError::InvalidArgument`]; an empty
    /// `candidates` list yields an empty result without touching the embedder.
    pub fn rank<C, X>(&self, candidates: &[C], context: &[X]) -> Result<Vec<String>, RankingError>
    where
        C: AsRef<str>,
        X: AsRef<str>,
    {
        Ok(self
            .rank_with_scores(candidates, context)?
            .into_iter()
            .map(RankedCandidate::into_text)
            .collect())
    }

    /// Like [`rank`](Self::rank), keeping each candidate's score and input position.
    pub fn rank_with_scores<C, X>(
        &self,
        candidates: &[C],
        context: &[X],
    ) -> Result<Vec<RankedCandidate>, RankingError>
    where
        C: AsRef<str>,
        X: AsRef<str>,
    {
        if context.is_empty() {
            return Err(RankingError::invalid("context must contain at least one text"));
        }

        if candidates.is_empty() {
            debug!("No candidates to rank");
            return Ok(Vec::new());
        }

        let context_texts: Vec<&str> = context.iter().map(AsRef::as_ref).collect();
        let candidate_texts: Vec<&str> = candidates.iter().map(AsRef::as_ref).collect();

        let context_vectors = self.embed_checked(&context_texts)?;
        let candidate_vectors = self.embed_checked(&candidate_texts)?;

        let mut scored: Vec<RankedCandidate> = candidate_texts
            .iter()
            .zip(candidate_vectors.iter())
            .enumerate()
            .map(|(input_index, (text, vector))| RankedCandidate {
                text: (*text).to_string(),
                score: mean_cosine_similarity(vector, &context_vectors),
                input_index,
            })
            .collect();

        // `sort_by` is stable: ties keep input order.
        scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        debug!(
            candidates = scored.len(),
            context = context_vectors.len(),
            top_score = scored.first().map(|c| c.score),
            "Ranked candidates"
        );

        Ok(scored)
    }

    fn embed_checked(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, RankingError> {
        let vectors = self.embedder.embed_many(texts)?;

        if vectors.len() != texts.len() {
            return Err(EmbeddingError::InferenceFailed {
                reason: format!(
                    "embedder returned {} vectors for {} texts",
                    vectors.len(),
                    texts.len()
                ),
            }
            .into());
        }

        let expected = self.embedder.embedding_dim();
        if let Some(bad) = vectors.iter().find(|v| v.len() != expected) {
            return Err(EmbeddingError::DimensionMismatch {
                expected,
                actual: bad.len(),
            }
            .into());
        }

        Ok(vectors)
    }
}
