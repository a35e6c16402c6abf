//! End-to-end sampling benchmarks.
//!
//! Measures the time to fill a corpus, which is dominated by the pairwise
//! isomorphism checks once the corpus grows.
#![allow(missing_docs, reason = "Criterion macros generate undocumented items")]
#![allow(
    clippy::expect_used,
    reason = "benchmark setup is infallible for valid constants"
)]
#![allow(
    clippy::excessive_nesting,
    reason = "Criterion bench_with_input + b.iter pattern requires deep nesting"
)]

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use orgtopo_benches::SamplingBenchParams;
use orgtopo_core::{ExecutionStrategy, GraphFamily, SamplerBuilder};

const SEED: u64 = 7;
const TARGETS: &[usize] = &[10, 30];
const FAMILIES: &[GraphFamily] = &[
    GraphFamily::BipartiteRandom,
    GraphFamily::UniformRandomTree,
    GraphFamily::DirectedRandom,
];

fn sampling(c: &mut Criterion) {
    let mut group = c.benchmark_group("sampling");
    group.sample_size(20);

    for &family in FAMILIES {
        for &target in TARGETS {
            let params = SamplingBenchParams { family, target };
            for (label, strategy) in [
                ("sequential", ExecutionStrategy::Sequential),
                ("parallel", ExecutionStrategy::Parallel),
            ] {
                let sampler = SamplerBuilder::new(family)
                    .with_target_size(target)
                    .with_seed(SEED)
                    .with_execution_strategy(strategy)
                    .build()
                    .expect("sampler configuration must be valid");
                group.bench_with_input(BenchmarkId::new(label, params), &sampler, |b, s| {
                    b.iter(|| s.run().expect("corpus must fill"));
                });
            }
        }
    }

    group.finish();
}

criterion_group!(benches, sampling);
criterion_main!(benches);
