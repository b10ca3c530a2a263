use std::cmp::Ordering;
use std::sync::Arc;
use std::time::Instant;

use attributes::AttributeSet;
use similarity::{cosine, haversine_km, jaccard, GeoPoint};

use crate::config::MatcherConfig;
use crate::fusion::fuse;
use crate::metrics::RankMetrics;
use crate::types::{Candidate, MatchSignal, Query, ScoredCandidate};


/// Score candidates by Jaccard similarity of their attribute tokens.
///
/// Candidates without attributes are skipped. Scores below `min_score` are
/// dropped; when both the query and the candidate carry a location, candidates
/// farther than `radius_km` are dropped too. Missing locations never exclude.
pub fn match_by_attributes<'a>(
    candidates: &'a [Candidate],
    query_attrs: &AttributeSet,
    query_location: Option<GeoPoint>,
    radius_km: f64,
    min_score: f64,
    limit: usize,
) -> Vec<ScoredCandidate<'a>> {
    if limit == 0 || query_attrs.is_empty() {
        return Vec::new();
    }

    let hits = candidates
        .iter()
        .filter(|c| !c.attributes.is_empty())
        .filter_map(|c| {
            let score = jaccard(query_attrs.as_set(), c.attributes.as_set());
            admit(c, score, query_location, radius_km, min_score, MatchSignal::Attributes)
        })
        .collect();

    order_and_truncate(hits, limit)
}

/// Score candidates by cosine similarity of their image embeddings.
///
/// Same threshold, radius and ordering rules as [`match_by_attributes`].
/// Only candidates whose embedding has exactly `embedding_dim` components
/// are considered; a query embedding of any other length matches nothing.
pub fn match_by_vector<'a>(
    candidates: &'a [Candidate],
    query_embedding: &[f32],
    query_location: Option<GeoPoint>,
    radius_km: f64,
    min_score: f64,
    limit: usize,
    embedding_dim: usize,
) -> Vec<ScoredCandidate<'a>> {
    if limit == 0 || query_embedding.len() != embedding_dim {
        return Vec::new();
    }

    let hits = candidates
        .iter()
        .filter_map(|c| {
            let embedding = c.embedding_with_dim(embedding_dim)?;
            let score = cosine(query_embedding, embedding);
            admit(c, score, query_location, radius_km, min_score, MatchSignal::Vector)
        })
        .collect();

    order_and_truncate(hits, limit)
}

/// Apply the score threshold and the optional radius filter to one candidate.
fn admit<'a>(
    candidate: &'a Candidate,
    score: f64,
    query_location: Option<GeoPoint>,
    radius_km: f64,
    min_score: f64,
    signal: MatchSignal,
) -> Option<ScoredCandidate<'a>> {
    if score < min_score {
        return None;
    }

    let distance_km = match (query_location, candidate.location) {
        (Some(origin), Some(location)) => {
            let distance = haversine_km(origin, location);
            if distance.is_nan() || distance > radius_km {
                return None;
            }
            Some(distance)
        }
        _ => None,
    };

    let (attribute_score, vector_score) = match signal {
        MatchSignal::Attributes => (Some(score), None),
        MatchSignal::Vector => (None, Some(score)),
        MatchSignal::Fused => (None, None),
    };

    Some(ScoredCandidate {
        candidate,
        score,
        distance_km,
        attribute_score,
        vector_score,
        signal,
    })
}

/// Score descending, then nearest first (known distances before unknown),
/// then candidate id ascending.
fn order_and_truncate(mut hits: Vec<ScoredCandidate<'_>>, limit: usize) -> Vec<ScoredCandidate<'_>> {
    hits.sort_unstable_by(|a, b| {
        b.score
            .total_cmp(&a.score)
            .then_with(|| compare_distance(a.distance_km, b.distance_km))
            .then_with(|| a.candidate.id.cmp(&b.candidate.id))
    });
    hits.truncate(limit);
    hits
}

fn compare_distance(a: Option<f64>, b: Option<f64>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.total_cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Ranking facade: dispatches a [`Query`] to the applicable matchers and
/// fuses their lists when both produce results.
///
/// The engine holds configuration only. It is cheap to clone and share, and
/// every call to [`RankingEngine::rank`] is independent of the others.
#[derive(Clone, Default)]
pub struct RankingEngine {
    config: MatcherConfig,
    metrics: Option<Arc<dyn RankMetrics>>,
}

impl RankingEngine {
    pub fn new(config: MatcherConfig) -> Self {
        Self {
            config,
            metrics: None,
        }
    }

    /// Attach a metrics recorder that observes every ranking call.
    pub fn with_metrics(mut self, recorder: Arc<dyn RankMetrics>) -> Self {
        self.metrics = Some(recorder);
        self
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    /// Rank `candidates` against `query`.
    ///
    /// | attributes | embedding | behaviour                                   |
    /// |------------|-----------|---------------------------------------------|
    /// | yes        | no        | attribute matcher only                      |
    /// | no         | yes       | vector matcher only                         |
    /// | yes        | yes       | both; fused when both return hits           |
    /// | no         | no        | empty, no matcher runs                      |
    ///
    /// An empty attribute set, an empty embedding and an embedding of the
    /// wrong dimensionality all count as "no". The result holds at most
    /// `query.limit` entries; "no match" is an empty list, never an error.
    pub fn rank<'a>(&self, candidates: &'a [Candidate], query: &Query) -> Vec<ScoredCandidate<'a>> {
        let start = Instant::now();
        let cfg = &self.config;

        let attrs = query.attribute_signal();
        let embedding = query
            .embedding_signal()
            .filter(|e| e.len() == cfg.embedding_dim);
        if embedding.is_none() && query.embedding_signal().is_some() {
            tracing::debug!(
                expected = cfg.embedding_dim,
                actual = query.embedding_signal().map_or(0, <[f32]>::len),
                "ignoring query embedding with unexpected dimensionality"
            );
        }

        if query.limit == 0 || (attrs.is_none() && embedding.is_none()) {
            self.record(None, start, candidates.len(), 0);
            return Vec::new();
        }

        let radius_km = query.radius_km.unwrap_or(cfg.search_radius_km);
        let limit = query.limit;
        let location = query.location;

        let run_attributes = || {
            attrs
                .map(|a| {
                    match_by_attributes(candidates, a, location, radius_km, cfg.min_match_score, limit)
                })
                .unwrap_or_default()
        };
        let run_vector = || {
            embedding
                .map(|e| {
                    match_by_vector(
                        candidates,
                        e,
                        location,
                        radius_km,
                        cfg.min_match_score,
                        limit,
                        cfg.embedding_dim,
                    )
                })
                .unwrap_or_default()
        };

        let (attribute_hits, vector_hits) =
            if cfg.parallel && attrs.is_some() && embedding.is_some() {
                rayon::join(run_attributes, run_vector)
            } else {
                (run_attributes(), run_vector())
            };

        tracing::debug!(
            candidates = candidates.len(),
            attribute_hits = attribute_hits.len(),
            vector_hits = vector_hits.len(),
            radius_km,
            "matcher passes complete"
        );

        let (signal, hits) = match (attribute_hits.is_empty(), vector_hits.is_empty()) {
            (false, false) => (
                Some(MatchSignal::Fused),
                fuse(&attribute_hits, &vector_hits, cfg.rrf_k, limit),
            ),
            (false, true) => (Some(MatchSignal::Attributes), attribute_hits),
            (true, false) => (Some(MatchSignal::Vector), vector_hits),
            (true, true) => (None, Vec::new()),
        };

        self.record(signal, start, candidates.len(), hits.len());
        hits
    }

    fn record(&self, signal: Option<MatchSignal>, start: Instant, candidates: usize, hits: usize) {
        if let Some(recorder) = &self.metrics {
            recorder.record_rank(signal, start.elapsed(), candidates, hits);
        }
    }
}

impl std::fmt::Debug for RankingEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RankingEngine")
            .field("config", &self.config)
            .field("metrics", &self.metrics.is_some())
            .finish()
    }
}
