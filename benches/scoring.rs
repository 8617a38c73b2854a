//! Criterion benchmarks for the combination scoring pass.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use resonator::domain::models::Subgoal;
use resonator::services::ResonanceScorer;

fn subgoal_set(n: usize) -> Vec<Subgoal> {
    let mut rng = ChaCha8Rng::seed_from_u64(42);
    let mut generated = Vec::with_capacity(n);
    for id in 0..n {
        use rand::Rng;
        generated.push(Subgoal::new(
            id,
            format!("subgoal {id}"),
            rng.gen_range(0.001..0.101),
            rng.gen_range(0.1..2.1),
        ));
    }
    generated
}

fn bench_scoring(c: &mut Criterion) {
    let scorer = ResonanceScorer::new();
    let mut group = c.benchmark_group("resonance_scoring");

    for n in [10usize, 20, 40] {
        let subgoals = subgoal_set(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &subgoals, |b, subgoals| {
            let mut rng = ChaCha8Rng::seed_from_u64(7);
            b.iter(|| black_box(scorer.score(black_box(subgoals), &mut rng)));
        });
    }

    group.finish();
}

criterion_group!(benches, bench_scoring);
criterion_main!(benches);
