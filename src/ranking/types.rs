use serde::Serialize;

/// One candidate with its relevance score, as produced by
/// [`Ranker::rank_with_scores`](super::Ranker::rank_with_scores).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedCandidate {
    /// Candidate text, unchanged.
    pub text: String,
    /// Mean cosine similarity against the context, in `[-1, 1]`.
    pub score: f32,
    /// Position of the candidate in the input sequence.
    pub input_index: usize,
}

impl RankedCandidate {
    /// Consumes the entry and returns the candidate text.
    pub fn into_text(self) -> String {
        self.text
    }
}
