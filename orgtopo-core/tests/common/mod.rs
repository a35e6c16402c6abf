use std::num::NonZeroUsize;

use orgtopo_core::{
    Corpus, GraphFamily, SamplerBuilder, TerminationPolicy, isomorphism::is_isomorphic,
};

/// Attempt budget large enough for every satisfiable request in this suite.
pub const ATTEMPT_BUDGET: usize = 20_000;

#[must_use]
pub fn bounded(family: GraphFamily, target: usize, seed: u64) -> SamplerBuilder {
    SamplerBuilder::new(family)
        .with_target_size(target)
        .with_seed(seed)
        .with_termination(TerminationPolicy::MaxAttempts(
            NonZeroUsize::new(ATTEMPT_BUDGET).expect("budget is non-zero"),
        ))
}

pub fn assert_pairwise_distinct(corpus: &Corpus) {
    let graphs: Vec<_> = corpus.samples().collect();
    for (i, left) in graphs.iter().enumerate() {
        for (j, right) in graphs.iter().enumerate().skip(i + 1) {
            assert!(
                !is_isomorphic(left, right),
                "samples {} and {} are isomorphic",
                i + 1,
                j + 1
            );
        }
    }
}
