// Benchmarks for the story-score objective and a full annealing run.
//
// The objective is re-evaluated from scratch on every proposal, so its cost
// times the iteration budget dominates `anneal_order`.

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use plotloom::{AnnealConfig, Intent, ScoringWeights, SearchRng, Unit, anneal_order, story_score};

fn document(n: usize) -> (Intent, Vec<Unit>) {
    let intent = Intent {
        genre: "space opera".into(),
        theme_or_claim: "freedom, belonging".into(),
        core_values: "courage・loyalty".into(),
        constraints: vec!["deus ex machina".into()],
    };
    let words = [
        "ship", "crew", "freedom", "storm", "signal", "home", "loyalty", "orbit", "courage",
        "silence", "engine", "dawn",
    ];
    let mut rng = SearchRng::new(17);
    let units = (0..n)
        .map(|i| {
            let len = rng.range_usize(20, 80);
            let text: Vec<&str> = (0..len)
                .map(|_| words[rng.range_usize(0, words.len())])
                .collect();
            Unit::new(format!("unit {i}"), text.join(" "))
        })
        .collect();
    (intent, units)
}

fn bench_story_score(c: &mut Criterion) {
    let (intent, units) = document(20);
    c.bench_function("story_score_20_units", |b| {
        b.iter(|| story_score(black_box(&intent), black_box(&units)))
    });
}

fn bench_anneal(c: &mut Criterion) {
    let (intent, units) = document(20);
    let config = AnnealConfig {
        iterations: 500,
        seed: Some(1),
        ..AnnealConfig::default()
    };
    let weights = ScoringWeights::default();
    c.bench_function("anneal_20_units_500_steps", |b| {
        b.iter(|| {
            let mut rng = SearchRng::new(1);
            anneal_order(black_box(&intent), black_box(&units), &config, &weights, &mut rng)
        })
    });
}

criterion_group!(benches, bench_story_score, bench_anneal);
criterion_main!(benches);
