use std::fmt;

use attributes::AttributeSet;
use serde::{Deserialize, Serialize};
use similarity::GeoPoint;
use thiserror::Error;

use crate::config::MatcherConfig;

/// Stable identifier of a found-dog record.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CandidateId(String);

impl CandidateId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CandidateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CandidateId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for CandidateId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Lifecycle state of a record. Only `Active` records should be handed to
/// the engine; see [`active_only`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CandidateStatus {
    /// Still looking for the owner.
    #[default]
    Active,
    /// Reported, awaiting moderation.
    Pending,
    /// Dog returned home.
    Reunited,
    /// Withdrawn by the reporter or a moderator.
    Removed,
}

/// A found-dog record available for matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub id: CandidateId,
    /// Normalized attribute tokens; may be empty.
    #[serde(default)]
    pub attributes: AttributeSet,
    /// Image embedding, when generation succeeded. Vectors whose length differs
    /// from the configured dimensionality are ignored by the engine.
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    #[serde(default)]
    pub status: CandidateStatus,
}

impl Candidate {
    pub fn new(id: impl Into<CandidateId>) -> Self {
        Self {
            id: id.into(),
            attributes: AttributeSet::new(),
            embedding: None,
            location: None,
            status: CandidateStatus::Active,
        }
    }

    pub fn with_attributes(mut self, attributes: AttributeSet) -> Self {
        self.attributes = attributes;
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    pub fn with_location(mut self, location: GeoPoint) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_status(mut self, status: CandidateStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_active(&self) -> bool {
        self.status == CandidateStatus::Active
    }

    /// The embedding, only if it has exactly `dim` components.
    pub fn embedding_with_dim(&self, dim: usize) -> Option<&[f32]> {
        self.embedding.as_deref().filter(|e| e.len() == dim)
    }
}

/// Keep only records eligible for matching.
pub fn active_only<I>(candidates: I) -> Vec<Candidate>
where
    I: IntoIterator<Item = Candidate>,
{
    candidates.into_iter().filter(Candidate::is_active).collect()
}

/// A single ranking request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Query {
    #[serde(default)]
    pub attributes: Option<AttributeSet>,
    #[serde(default)]
    pub embedding: Option<Vec<f32>>,
    #[serde(default)]
    pub location: Option<GeoPoint>,
    /// Falls back to [`MatcherConfig::search_radius_km`] when absent.
    #[serde(default)]
    pub radius_km: Option<f64>,
    #[serde(default = "Query::default_limit")]
    pub limit: usize,
}

impl Query {
    pub(crate) fn default_limit() -> usize {
        20
    }

    pub fn new(limit: usize) -> Self {
        Self {
            attributes: None,
            embedding: None,
            location: None,
            radius_km: None,
            limit,
        }
    }

    pub fn with_attributes(mut self, attributes: AttributeSet) -> Self {
        self.attributes = Some(attributes);
        self
    }

    pub fn with_embedding(mut self, embedding: Vec<f32>) -> Self {
        self.embedding = Some(embedding);
        self
    }

    pub fn with_location(mut self, location: GeoPoint) -> Self {
        self.location = Some(location);
        self
    }

    pub fn with_radius_km(mut self, radius_km: f64) -> Self {
        self.radius_km = Some(radius_km);
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    /// Non-empty attribute set, if any.
    pub fn attribute_signal(&self) -> Option<&AttributeSet> {
        self.attributes.as_ref().filter(|a| !a.is_empty())
    }

    /// Non-empty embedding, if any. Length is not checked here.
    pub fn embedding_signal(&self) -> Option<&[f32]> {
        self.embedding.as_deref().filter(|e| !e.is_empty())
    }

    /// Caller-side contract check.
    ///
    /// The engine never calls this: it degrades silently on bad input. Request
    /// handlers call it first so malformed queries are rejected with a reason
    /// instead of quietly returning nothing.
    pub fn validate(&self, cfg: &MatcherConfig) -> Result<(), MatchError> {
        if self.limit == 0 {
            return Err(MatchError::InvalidQuery(
                "limit must be greater than zero".into(),
            ));
        }
        if self.limit > cfg.max_limit {
            return Err(MatchError::InvalidQuery(format!(
                "limit must be <= {}, got {}",
                cfg.max_limit, self.limit
            )));
        }
        if self.attribute_signal().is_none() && self.embedding_signal().is_none() {
            return Err(MatchError::InvalidQuery(
                "query needs attributes or an embedding".into(),
            ));
        }
        if let Some(embedding) = self.embedding_signal() {
            if embedding.len() != cfg.embedding_dim {
                return Err(MatchError::DimensionMismatch {
                    expected: cfg.embedding_dim,
                    actual: embedding.len(),
                });
            }
        }
        if let Some(location) = self.location {
            if !location.is_valid() {
                return Err(MatchError::InvalidQuery(format!(
                    "location out of range: lat={}, lon={}",
                    location.lat, location.lon
                )));
            }
        }
        if let Some(radius) = self.radius_km {
            if !(radius.is_finite() && radius > 0.0) {
                return Err(MatchError::InvalidQuery(format!(
                    "radius_km must be a positive number, got {radius}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for Query {
    fn default() -> Self {
        Self::new(Self::default_limit())
    }
}

/// Which scoring path produced a hit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchSignal {
    /// Jaccard similarity over attribute tokens.
    Attributes,
    /// Cosine similarity over image embeddings.
    Vector,
    /// Reciprocal rank fusion of both lists.
    Fused,
}

/// A candidate paired with its ranking score.
///
/// `score` is a similarity in `[0, 1]` for single-signal results and a
/// reciprocal-rank sum for [`MatchSignal::Fused`] results. Treat it as an
/// ordering key only.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredCandidate<'a> {
    pub candidate: &'a Candidate,
    pub score: f64,
    pub distance_km: Option<f64>,
    /// Jaccard score, when the attribute matcher saw this candidate.
    pub attribute_score: Option<f64>,
    /// Cosine score, when the vector matcher saw this candidate.
    pub vector_score: Option<f64>,
    pub signal: MatchSignal,
}

impl ScoredCandidate<'_> {
    pub fn id(&self) -> &CandidateId {
        &self.candidate.id
    }
}

/// Display-ready hit: scores rounded to 3 decimals, distance to 2.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedMatch<'a> {
    /// 1-based position in the result list.
    pub rank: usize,
    pub candidate: &'a Candidate,
    pub match_score: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance_km: Option<f64>,
    pub signal: MatchSignal,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attribute_score: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vector_score: Option<f64>,
}

/// Convert engine output into the display shape, preserving order.
pub fn to_ranked<'a>(hits: &[ScoredCandidate<'a>]) -> Vec<RankedMatch<'a>> {
    hits.iter()
        .enumerate()
        .map(|(idx, hit)| RankedMatch {
            rank: idx + 1,
            candidate: hit.candidate,
            match_score: round_to(hit.score, 3),
            distance_km: hit.distance_km.map(|d| round_to(d, 2)),
            signal: hit.signal,
            attribute_score: hit.attribute_score.map(|s| round_to(s, 3)),
            vector_score: hit.vector_score.map(|s| round_to(s, 3)),
        })
        .collect()
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}

/// Errors produced by the matching layer.
///
/// Ranking itself never fails; these come from configuration and from
/// caller-side query validation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum MatchError {
    #[error("invalid match config: {0}")]
    InvalidConfig(String),
    #[error("invalid query: {0}")]
    InvalidQuery(String),
    #[error("embedding has {actual} dimensions, expected {expected}")]
    DimensionMismatch { expected: usize, actual: usize },
}
