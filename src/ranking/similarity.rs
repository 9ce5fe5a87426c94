//! Vector similarity helpers.

/// Cosine similarity of two vectors.
///
/// Returns `0.0` for empty or differently sized inputs and when either vector has zero
/// norm, so a degenerate embedding never produces a division error or NaN.
#[inline]
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let (dot, norm_a_sq, norm_b_sq) = a
        .iter()
        .zip(b.iter())
        .fold((0.0f32, 0.0f32, 0.0f32), |(dot, na, nb), (&av, &bv)| {
            (dot + av * bv, na + av * av, nb + bv * bv)
        });

    let norm_a = norm_a_sq.sqrt();
    let norm_b = norm_b_sq.sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let similarity = dot / (norm_a * norm_b);
    if similarity.is_finite() {
        similarity.clamp(-1.0, 1.0)
    } else {
        0.0
    }
}

/// Arithmetic mean of `cosine_similarity(vector, c)` over every context vector.
///
/// An empty context yields `0.0`; the ranker rejects that case before scoring.
pub fn mean_cosine_similarity(vector: &[f32], context: &[Vec<f32>]) -> f32 {
    if context.is_empty() {
        return 0.0;
    }

    let total: f32 = context
        .iter()
        .map(|other| cosine_similarity(vector, other))
        .sum();

    total / context.len() as f32
}
