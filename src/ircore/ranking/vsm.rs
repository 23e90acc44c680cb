use crate::ircore::Weight;
use crate::ircore::error::EngineError;

fn vec_len(v: &[Weight]) -> Weight {
    v.iter().map(|x| x * x).sum::<Weight>().sqrt()
}

fn vec_dot(a: &[Weight], b: &[Weight]) -> Weight {
    a.iter().zip(b).map(|(x, y)| x * y).sum()
}

/// Cosine similarity of two BOW vectors of the same run.
///
/// A zero vector is similar to nothing, itself included, so the result is 0
/// rather than NaN. The result is clamped to [-1, 1].
pub fn cosine_similarity(a: &[Weight], b: &[Weight]) -> Result<Weight, EngineError> {
    if a.len() != b.len() {
        return Err(EngineError::DimensionMismatch { left: a.len(), right: b.len() });
    }
    let norm = vec_len(a) * vec_len(b);
    if norm == 0.0 || !norm.is_finite() {
        return Ok(0.0);
    }
    Ok((vec_dot(a, b) / norm).clamp(-1.0, 1.0))
}
