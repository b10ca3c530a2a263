//! # Pawmatch Matcher (`matcher`)
//!
//! ## Purpose
//!
//! `matcher` ranks found-dog reports against a search. Upstream services
//! have already turned the searcher's photos and text into attribute tokens
//! (see the `attributes` crate) and an image embedding; the candidate set has
//! already been loaded and filtered to active reports. This crate scores every
//! candidate, filters by threshold and distance, and produces one ordered list.
//!
//! ## Core Types
//!
//! - [`Candidate`]: a found-dog record (attributes, optional embedding,
//!   optional location).
//! - [`Query`]: attributes and/or embedding, optional location, radius, limit.
//! - [`ScoredCandidate`]: borrowed candidate + primary score + distance.
//! - [`RankedMatch`]: display shape produced by [`to_ranked`].
//! - [`MatcherConfig`]: deployment-wide radius default, score threshold,
//!   fusion constant and embedding dimensionality.
//! - [`RankingEngine`]: the facade that picks matchers and fuses results.
//!
//! ## Strategies
//!
//! - [`match_by_attributes`]: Jaccard similarity over attribute tokens.
//! - [`match_by_vector`]: cosine similarity over image embeddings.
//! - [`fuse`]: reciprocal rank fusion (`k = 60`) when both lists have hits.
//!
//! Within one matcher, ties on score go to the nearer candidate, known
//! distances before unknown ones, then to the smaller [`CandidateId`].
//! Fused ties go to the smaller [`CandidateId`].
//!
//! ## Example Usage
//!
//! ```
//! use attributes::AttributeSet;
//! use matcher::{to_ranked, Candidate, MatcherConfig, Query, RankingEngine};
//! use similarity::GeoPoint;
//!
//! let candidates = vec![
//!     Candidate::new("sighting-1")
//!         .with_attributes(AttributeSet::from_tokens(["labrador", "cafe", "grande"]))
//!         .with_location(GeoPoint::new(-33.45, -70.65)),
//!     Candidate::new("sighting-2")
//!         .with_attributes(AttributeSet::from_tokens(["quiltro", "negro"])),
//! ];
//!
//! let query = Query::new(20)
//!     .with_attributes(AttributeSet::from_tokens(["Labrador", "Café"]))
//!     .with_location(GeoPoint::new(-33.46, -70.64));
//!
//! let engine = RankingEngine::new(MatcherConfig::default());
//! let hits = engine.rank(&candidates, &query);
//! assert_eq!(hits.len(), 1);
//!
//! for hit in to_ranked(&hits) {
//!     println!("#{} {} score={} distance={:?}", hit.rank, hit.candidate.id, hit.match_score, hit.distance_km);
//! }
//! ```
//!
//! ## Observability
//!
//! Attach a [`RankMetrics`] implementation with [`RankingEngine::with_metrics`]
//! to record per-call latency and hit counts. Engine internals log through
//! `tracing` at `debug` level.

pub mod config;
pub mod engine;
pub mod fusion;
pub mod metrics;
pub mod types;

pub use crate::config::{MatcherConfig, DEFAULT_EMBEDDING_DIM, DEFAULT_RRF_K};
pub use crate::engine::{match_by_attributes, match_by_vector, RankingEngine};
pub use crate::fusion::fuse;
pub use crate::metrics::RankMetrics;
pub use crate::types::{
    active_only, to_ranked, Candidate, CandidateId, CandidateStatus, MatchError, MatchSignal,
    Query, RankedMatch, ScoredCandidate,
};
