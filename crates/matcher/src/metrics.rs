// Metrics hooks for the `matcher` crate.
//
// A `RankMetrics` implementation is handed to `RankingEngine::with_metrics`;
// the engine then reports latency and hit counts for every call to
// `RankingEngine::rank`.
use std::time::Duration;

use crate::types::MatchSignal;

/// Metrics observer for ranking calls.
pub trait RankMetrics: Send + Sync {
    /// Record the outcome of a ranking call.
    ///
    /// `signal` is the path that produced the returned list (`None` when the
    /// list is empty), `latency` is the wall-clock duration of the call,
    /// `candidate_count` is the size of the scanned set and `hit_count` the
    /// number of results returned after truncation.
    fn record_rank(
        &self,
        signal: Option<MatchSignal>,
        latency: Duration,
        candidate_count: usize,
        hit_count: usize,
    );
}
