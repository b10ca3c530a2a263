//! Reciprocal Rank Fusion: `score = Σ 1 / (k + rank_i)`.
//!
//! Merges the attribute and vector result lists without normalizing their
//! scores against each other. A candidate present in both lists collects
//! both contributions, so agreement across signals outranks one strong signal.

use std::collections::HashMap;

use crate::types::{Candidate, CandidateId, MatchSignal, ScoredCandidate};

/// Per-candidate accumulator while fusing.
#[derive(Debug)]
struct FusionState<'a> {
    candidate: &'a Candidate,
    rrf_score: f64,
    attribute_score: Option<f64>,
    vector_score: Option<f64>,
    distance_km: Option<f64>,
}

/// Fuse two ranked lists and keep the best `limit` entries.
///
/// Ranks are 1-based positions in each input list. The fused score replaces
/// the similarity score and is not on a `[0, 1]` scale. Ties on the fused
/// score are broken by ascending [`CandidateId`], which makes the result
/// independent of argument order.
pub fn fuse<'a>(
    list_a: &[ScoredCandidate<'a>],
    list_b: &[ScoredCandidate<'a>],
    k: u32,
    limit: usize,
) -> Vec<ScoredCandidate<'a>> {
    if limit == 0 {
        return Vec::new();
    }

    let mut states: HashMap<&'a CandidateId, FusionState<'a>> =
        HashMap::with_capacity(list_a.len() + list_b.len());

    for list in [list_a, list_b] {
        for (idx, hit) in list.iter().enumerate() {
            let rank = idx + 1;
            let candidate: &'a Candidate = hit.candidate;
            let state = states
                .entry(&candidate.id)
                .or_insert_with(|| FusionState {
                    candidate,
                    rrf_score: 0.0,
                    attribute_score: None,
                    vector_score: None,
                    distance_km: None,
                });
            state.rrf_score += 1.0 / (f64::from(k) + rank as f64);
            if hit.attribute_score.is_some() {
                state.attribute_score = hit.attribute_score;
            }
            if hit.vector_score.is_some() {
                state.vector_score = hit.vector_score;
            }
            // Both lists share one radius filter, so later distances agree.
            if hit.distance_km.is_some() {
                state.distance_km = hit.distance_km;
            }
        }
    }

    let mut fused: Vec<ScoredCandidate<'a>> = states
        .into_values()
        .map(|state| ScoredCandidate {
            candidate: state.candidate,
            score: state.rrf_score,
            distance_km: state.distance_km,
            attribute_score: state.attribute_score,
            vector_score: state.vector_score,
            signal: MatchSignal::Fused,
        })
        .collect();

    fused.sort_unstable_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| a.candidate.id.cmp(&b.candidate.id))
    });
    fused.truncate(limit);
    fused
}
