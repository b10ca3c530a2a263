/// Chunk size for the auto-vectorized accumulation loops.
const CHUNK_SIZE: usize = 32;

/// Cosine similarity of two embeddings, clamped to `[0, 1]`.
///
/// Negative cosines are floored to `0.0`. Vectors of unequal length, empty
/// vectors and zero-magnitude vectors all score `0.0`. Accumulation is done
/// in `f64` so 1408-dimensional image embeddings do not lose precision.
#[inline]
pub fn cosine(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let mut dot = 0.0_f64;
    let mut norm_a = 0.0_f64;
    let mut norm_b = 0.0_f64;

    for (ca, cb) in a.chunks(CHUNK_SIZE).zip(b.chunks(CHUNK_SIZE)) {
        let (d, na, nb) = accumulate_chunk(ca, cb);
        dot += d;
        norm_a += na;
        norm_b += nb;
    }

    let norm_a = norm_a.sqrt();
    let norm_b = norm_b.sqrt();
    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    let similarity = dot / (norm_a * norm_b);
    if similarity.is_nan() {
        return 0.0;
    }
    similarity.clamp(0.0, 1.0)
}

#[inline(always)]
fn accumulate_chunk(a: &[f32], b: &[f32]) -> (f64, f64, f64) {
    a.iter().zip(b).fold((0.0, 0.0, 0.0), |(dot, na, nb), (&x, &y)| {
        let (x, y) = (f64::from(x), f64::from(y));
        (dot + x * y, na + x * x, nb + y * y)
    })
}
