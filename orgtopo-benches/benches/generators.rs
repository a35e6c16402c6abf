//! Generator throughput benchmarks.
//!
//! Measures one call of each family generator at the node counts the
//! sampling engine draws from.
#![allow(missing_docs, reason = "Criterion macros generate undocumented items")]
#![allow(
    clippy::expect_used,
    reason = "benchmark setup is infallible for valid constants"
)]
#![allow(
    clippy::excessive_nesting,
    reason = "Criterion bench_with_input + b.iter pattern requires deep nesting"
)]

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use rand::{SeedableRng, rngs::SmallRng};

use orgtopo_benches::GeneratorBenchParams;
use orgtopo_core::generator::{bipartite_random, directed_random, uniform_random_tree};

const SEED: u64 = 42;
const NODE_COUNTS: &[usize] = &[4, 10, 100];
const PROBABILITY: f64 = 0.5;

fn generators(c: &mut Criterion) {
    let mut group = c.benchmark_group("generators");

    for &nodes in NODE_COUNTS {
        let params = GeneratorBenchParams {
            nodes,
            probability: PROBABILITY,
        };
        let buyers = nodes.div_euclid(2);

        group.bench_with_input(BenchmarkId::new("bipartite", params), &nodes, |b, &n| {
            let mut rng = SmallRng::seed_from_u64(SEED);
            b.iter(|| black_box(bipartite_random(buyers, n - buyers, PROBABILITY, &mut rng)));
        });
        group.bench_with_input(BenchmarkId::new("tree", params), &nodes, |b, &n| {
            let mut rng = SmallRng::seed_from_u64(SEED);
            b.iter(|| black_box(uniform_random_tree(n, &mut rng).expect("non-empty tree")));
        });
        group.bench_with_input(BenchmarkId::new("directed", params), &nodes, |b, &n| {
            let mut rng = SmallRng::seed_from_u64(SEED);
            b.iter(|| black_box(directed_random(n, PROBABILITY, &mut rng)));
        });
    }

    group.finish();
}

criterion_group!(benches, generators);
criterion_main!(benches);
