use crate::types::WeightVector;

/// Cosine similarity between two weight vectors, in `[0, 1]`.
///
/// Returns 0.0 when either vector has zero magnitude (empty or term-free
/// document). Shared terms are summed in sorted order whichever side is
/// iterated, so the result is exactly symmetric.
pub fn cosine_similarity(a: &WeightVector, b: &WeightVector) -> f64 {
    let mag_a = a.magnitude();
    let mag_b = b.magnitude();
    if mag_a == 0.0 || mag_b == 0.0 {
        return 0.0;
    }

    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let dot: f64 = small
        .iter()
        .filter(|(term, _)| large.contains(term))
        .map(|(term, weight)| weight * large.get(term))
        .sum();

    (dot / (mag_a * mag_b)).clamp(0.0, 1.0)
}
