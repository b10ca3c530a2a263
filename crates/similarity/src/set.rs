use std::collections::BTreeSet;

/// Jaccard similarity `|A ∩ B| / |A ∪ B|` of two token sets.
///
/// Returns `0.0` when either side is empty, so two empty sets never count as
/// a full match. The result is always in `[0, 1]`.
pub fn jaccard<T: Ord>(a: &BTreeSet<T>, b: &BTreeSet<T>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    // Probe the smaller set against the larger one.
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    let intersection = small.iter().filter(|t| large.contains(t)).count();
    let union = a.len() + b.len() - intersection;

    if union == 0 {
        0.0
    } else {
        intersection as f64 / union as f64
    }
}
