//! Engine configuration.
//!
//! Everything here is fixed per deployment rather than per request: callers
//! choose the query signals, location, radius and limit, but never the
//! minimum match score or the fusion constant.

use serde::{Deserialize, Serialize};

use crate::types::MatchError;

/// Dimensionality of the image embeddings produced upstream.
pub const DEFAULT_EMBEDDING_DIM: usize = 1408;

/// Reciprocal rank fusion smoothing constant.
pub const DEFAULT_RRF_K: u32 = 60;

/// Tuning knobs for [`crate::RankingEngine`].
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MatcherConfig {
    /// Radius applied when a query carries a location but no radius.
    #[serde(default = "MatcherConfig::default_search_radius_km")]
    pub search_radius_km: f64,
    /// Minimum per-signal similarity for a candidate to be kept.
    #[serde(default = "MatcherConfig::default_min_match_score")]
    pub min_match_score: f64,
    /// `k` in `1 / (k + rank)`. Larger values flatten the contribution of
    /// top-ranked entries.
    #[serde(default = "MatcherConfig::default_rrf_k")]
    pub rrf_k: u32,
    /// Expected embedding length; anything else is treated as absent.
    #[serde(default = "MatcherConfig::default_embedding_dim")]
    pub embedding_dim: usize,
    /// Largest `limit` accepted by [`crate::Query::validate`].
    #[serde(default = "MatcherConfig::default_max_limit")]
    pub max_limit: usize,
    /// Run the attribute and vector passes on the rayon pool when both apply.
    #[serde(default = "MatcherConfig::default_parallel")]
    pub parallel: bool,
}

impl MatcherConfig {
    pub(crate) fn default_search_radius_km() -> f64 {
        10.0
    }

    pub(crate) fn default_min_match_score() -> f64 {
        0.3
    }

    pub(crate) fn default_rrf_k() -> u32 {
        DEFAULT_RRF_K
    }

    pub(crate) fn default_embedding_dim() -> usize {
        DEFAULT_EMBEDDING_DIM
    }

    pub(crate) fn default_max_limit() -> usize {
        100
    }

    pub(crate) fn default_parallel() -> bool {
        true
    }

    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_search_radius_km(mut self, radius_km: f64) -> Self {
        self.search_radius_km = radius_km;
        self
    }

    pub fn with_min_match_score(mut self, min_score: f64) -> Self {
        self.min_match_score = min_score;
        self
    }

    pub fn with_rrf_k(mut self, k: u32) -> Self {
        self.rrf_k = k;
        self
    }

    pub fn with_embedding_dim(mut self, dim: usize) -> Self {
        self.embedding_dim = dim;
        self
    }

    pub fn with_max_limit(mut self, max_limit: usize) -> Self {
        self.max_limit = max_limit;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validate configuration parameters.
    pub fn validate(&self) -> Result<(), MatchError> {
        if !(self.search_radius_km.is_finite() && self.search_radius_km > 0.0) {
            return Err(MatchError::InvalidConfig(
                "search_radius_km must be a positive number".into(),
            ));
        }
        if !(0.0..=1.0).contains(&self.min_match_score) {
            return Err(MatchError::InvalidConfig(
                "min_match_score must be between 0.0 and 1.0".into(),
            ));
        }
        if self.rrf_k == 0 {
            return Err(MatchError::InvalidConfig(
                "rrf_k must be greater than zero".into(),
            ));
        }
        if self.embedding_dim == 0 {
            return Err(MatchError::InvalidConfig(
                "embedding_dim must be greater than zero".into(),
            ));
        }
        if self.max_limit == 0 {
            return Err(MatchError::InvalidConfig(
                "max_limit must be greater than zero".into(),
            ));
        }
        Ok(())
    }
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            search_radius_km: Self::default_search_radius_km(),
            min_match_score: Self::default_min_match_score(),
            rrf_k: Self::default_rrf_k(),
            embedding_dim: Self::default_embedding_dim(),
            max_limit: Self::default_max_limit(),
            parallel: Self::default_parallel(),
        }
    }
}
