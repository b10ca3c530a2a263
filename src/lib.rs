//! Workspace umbrella crate for Pawmatch.
//!
//! Pawmatch ranks found-dog reports against a lost-dog search. This crate
//! stitches the attribute vocabulary, the similarity primitives and the
//! matching engine together behind one API, and adds YAML configuration for
//! deployments and the `pawmatch` binary.
//!
//! ```
//! use pawmatch::{rank_with_config, AttributeSet, Candidate, PawmatchConfig, Query};
//!
//! let candidates = vec![
//!     Candidate::new("found-1").with_attributes(AttributeSet::from_tokens(["mestizo", "negro"])),
//! ];
//! let query = Query::new(5).with_attributes(AttributeSet::from_tokens(["Negro", "mestizo"]));
//!
//! let hits = rank_with_config(&candidates, &query, &PawmatchConfig::default()).unwrap();
//! assert_eq!(hits[0].id().as_str(), "found-1");
//! assert_eq!(hits[0].score, 1.0);
//! ```

pub mod config;

pub use attributes::{
    normalize_token, AttributeError, AttributeSet, Extraction, DEFAULT_MIN_CONFIDENCE,
};
pub use matcher::{
    active_only, fuse, match_by_attributes, match_by_vector, to_ranked, Candidate, CandidateId,
    CandidateStatus, MatchError, MatchSignal, MatcherConfig, Query, RankMetrics, RankedMatch,
    RankingEngine, ScoredCandidate, DEFAULT_EMBEDDING_DIM, DEFAULT_RRF_K,
};
pub use similarity::{cosine, haversine_km, jaccard, GeoPoint, EARTH_RADIUS_KM};

pub use crate::config::{ConfigLoadError, PawmatchConfig};

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;

/// Errors surfaced by the umbrella helpers.
#[derive(Debug, Error)]
pub enum PawmatchError {
    #[error("configuration failure: {0}")]
    Config(#[from] ConfigLoadError),
    #[error("matching failure: {0}")]
    Match(#[from] MatchError),
}

/// [`RankMetrics`] implementation that reports every ranking call as a
/// `tracing` event.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingRankMetrics;

impl RankMetrics for TracingRankMetrics {
    fn record_rank(
        &self,
        signal: Option<MatchSignal>,
        latency: Duration,
        candidate_count: usize,
        hit_count: usize,
    ) {
        tracing::info!(
            signal = ?signal,
            latency_us = latency.as_micros() as u64,
            candidates = candidate_count,
            hits = hit_count,
            "rank complete"
        );
    }
}

/// Build a [`RankingEngine`] from a validated deployment configuration.
pub fn engine_from_config(config: &PawmatchConfig) -> Result<RankingEngine, PawmatchError> {
    config.validate()?;
    Ok(RankingEngine::new(config.to_matcher_config()))
}

/// Same as [`engine_from_config`] with [`TracingRankMetrics`] attached.
pub fn traced_engine_from_config(config: &PawmatchConfig) -> Result<RankingEngine, PawmatchError> {
    Ok(engine_from_config(config)?.with_metrics(Arc::new(TracingRankMetrics)))
}

/// Validate `query` against `config` and rank `candidates`.
///
/// Unlike [`RankingEngine::rank`], which quietly returns nothing for an
/// unusable query, this rejects malformed queries with a reason.
pub fn rank_with_config<'a>(
    candidates: &'a [Candidate],
    query: &Query,
    config: &PawmatchConfig,
) -> Result<Vec<ScoredCandidate<'a>>, PawmatchError> {
    let engine = engine_from_config(config)?;
    query.validate(engine.config())?;
    Ok(engine.rank(candidates, query))
}

/// Turn an extractor outcome into query attributes using the configured
/// confidence threshold.
pub fn query_attributes(extraction: Extraction, config: &PawmatchConfig) -> Option<AttributeSet> {
    extraction.into_attributes(config.extraction.min_confidence)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct CountingMetrics {
        calls: Mutex<Vec<(Option<MatchSignal>, usize)>>,
    }

    impl RankMetrics for CountingMetrics {
        fn record_rank(
            &self,
            signal: Option<MatchSignal>,
            _latency: Duration,
            _candidate_count: usize,
            hit_count: usize,
        ) {
            self.calls.lock().unwrap().push((signal, hit_count));
        }
    }

    fn labrador() -> Candidate {
        Candidate::new("lab").with_attributes(AttributeSet::from_tokens(["labrador", "cafe"]))
    }

    #[test]
    fn rank_with_config_rejects_invalid_query() {
        let candidates = vec![labrador()];
        let query = Query::new(0).with_attributes(AttributeSet::from_tokens(["labrador"]));
        let err = rank_with_config(&candidates, &query, &PawmatchConfig::default()).unwrap_err();
        assert!(matches!(err, PawmatchError::Match(MatchError::InvalidQuery(_))));
    }

    #[test]
    fn rank_with_config_rejects_invalid_config() {
        let candidates = vec![labrador()];
        let query = Query::new(5).with_attributes(AttributeSet::from_tokens(["labrador"]));
        let mut config = PawmatchConfig::default();
        config.matcher.rrf_k = 0;
        let err = rank_with_config(&candidates, &query, &config).unwrap_err();
        assert!(matches!(err, PawmatchError::Config(_)));
    }

    #[test]
    fn rank_with_config_ranks_valid_query() {
        let candidates = vec![labrador()];
        let query = Query::new(5).with_attributes(AttributeSet::from_tokens(["Labrador", "Café"]));
        let hits = rank_with_config(&candidates, &query, &PawmatchConfig::default()).unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].signal, MatchSignal::Attributes);
    }

    #[test]
    fn query_attributes_respects_configured_confidence() {
        let mut config = PawmatchConfig::default();
        let extraction = Extraction::accepted(["labrador"], 0.6).unwrap();
        assert!(query_attributes(extraction.clone(), &config).is_none());

        config.extraction.min_confidence = 0.5;
        let attrs = query_attributes(extraction, &config).unwrap();
        assert!(attrs.contains("labrador"));
    }

    #[test]
    fn engine_reports_to_attached_metrics() {
        let metrics = Arc::new(CountingMetrics::default());
        let engine = engine_from_config(&PawmatchConfig::default())
            .unwrap()
            .with_metrics(metrics.clone());
        let candidates = vec![labrador()];
        let query = Query::new(5).with_attributes(AttributeSet::from_tokens(["labrador", "cafe"]));
        engine.rank(&candidates, &query);

        let calls = metrics.calls.lock().unwrap();
        assert_eq!(calls.as_slice(), &[(Some(MatchSignal::Attributes), 1)]);
    }

    #[test]
    fn traced_engine_ranks_like_plain_engine() {
        let config = PawmatchConfig::default();
        let candidates = vec![labrador()];
        let query = Query::new(5).with_attributes(AttributeSet::from_tokens(["labrador"]));
        let plain = engine_from_config(&config).unwrap().rank(&candidates, &query);
        let traced = traced_engine_from_config(&config)
            .unwrap()
            .rank(&candidates, &query);
        assert_eq!(plain, traced);
    }
}
