use pawmatch::{AttributeSet, Candidate, GeoPoint, MatcherConfig, Query, RankingEngine};

const DIM: usize = 8;

fn fixture() -> Vec<Candidate> {
    let palettes = [
        ["labrador", "cafe", "grande"],
        ["labrador", "cafe", "mediano"],
        ["quiltro", "negro", "mediano"],
        ["labrador", "negro", "grande"],
        ["poodle", "blanco", "pequeno"],
    ];
    (0..40)
        .map(|i| {
            let embedding: Vec<f32> = (0..DIM)
                .map(|d| ((i * 7 + d * 3) % 11) as f32 - 3.0)
                .collect();
            let mut candidate = Candidate::new(format!("found-{i:02}"))
                .with_attributes(AttributeSet::from_tokens(palettes[i % palettes.len()]))
                .with_embedding(embedding);
            if i % 3 != 0 {
                candidate = candidate.with_location(GeoPoint::new(
                    -33.45 + (i as f64) * 0.004,
                    -70.65 - (i as f64) * 0.003,
                ));
            }
            candidate
        })
        .collect()
}

fn query() -> Query {
    Query::new(15)
        .with_attributes(AttributeSet::from_tokens(["labrador", "cafe"]))
        .with_embedding(vec![1.0, -2.0, 0.5, 3.0, 0.0, 1.0, -1.0, 2.0])
        .with_location(GeoPoint::new(-33.44, -70.66))
}

fn summary(engine: &RankingEngine, candidates: &[Candidate]) -> Vec<(String, u64)> {
    engine
        .rank(candidates, &query())
        .iter()
        .map(|h| (h.id().to_string(), h.score.to_bits()))
        .collect()
}

#[test]
fn repeated_calls_return_identical_rankings() {
    let candidates = fixture();
    let engine = RankingEngine::new(MatcherConfig::default().with_embedding_dim(DIM));
    let first = summary(&engine, &candidates);
    assert!(!first.is_empty());
    for _ in 0..5 {
        assert_eq!(summary(&engine, &candidates), first);
    }
}

#[test]
fn parallel_and_sequential_passes_agree() {
    let candidates = fixture();
    let parallel = RankingEngine::new(
        MatcherConfig::default()
            .with_embedding_dim(DIM)
            .with_parallel(true),
    );
    let sequential = RankingEngine::new(
        MatcherConfig::default()
            .with_embedding_dim(DIM)
            .with_parallel(false),
    );
    assert_eq!(
        summary(&parallel, &candidates),
        summary(&sequential, &candidates)
    );
}

#[test]
fn candidate_order_does_not_change_result() {
    let candidates = fixture();
    let mut reversed = candidates.clone();
    reversed.reverse();
    let engine = RankingEngine::new(MatcherConfig::default().with_embedding_dim(DIM));
    assert_eq!(summary(&engine, &candidates), summary(&engine, &reversed));
}
