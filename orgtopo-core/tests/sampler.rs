//! Behavioural tests for the sampling engine.

mod common;

use std::num::NonZeroUsize;

use common::{assert_pairwise_distinct, bounded};
use orgtopo_core::{
    ExecutionStrategy, Graph, GraphFamily, Partition, SamplerBuilder, SamplerError,
    TerminationPolicy,
    validity::{is_tree, is_weakly_connected},
};
use orgtopo_test_support::tracing::RecordingLayer;
use rstest::rstest;
use tracing::Level;

#[rstest]
fn four_node_trees_fill_a_two_sample_corpus() {
    let outcome = bounded(GraphFamily::UniformRandomTree, 2, 21)
        .with_min_class_size(4)
        .with_max_nodes(4)
        .build()
        .expect("configuration is valid")
        .run()
        .expect("the path and the star both have four nodes");
    let corpus = outcome.corpus();
    assert_eq!(corpus.len(), 2);
    assert!(corpus.samples().all(|tree| tree.edge_count() == 3 && is_tree(tree)));
    assert_pairwise_distinct(corpus);

    let ordinals: Vec<usize> = outcome
        .records()
        .expect("trees have four nodes")
        .iter()
        .map(|record| record.ordinal().get())
        .collect();
    assert_eq!(ordinals, vec![1, 2]);
}

#[rstest]
fn five_distinct_trees_up_to_six_nodes() {
    let outcome = bounded(GraphFamily::UniformRandomTree, 5, 4)
        .with_max_nodes(6)
        .build()
        .expect("configuration is valid")
        .run()
        .expect("thirteen unlabeled trees have between two and six nodes");
    let corpus = outcome.corpus();
    assert_eq!(corpus.len(), 5);
    for tree in corpus.samples() {
        assert!(is_tree(tree));
        assert!((2..=6).contains(&tree.node_count()));
    }
    assert_pairwise_distinct(corpus);
}

#[rstest]
fn unsatisfiable_tree_request_is_exhausted() {
    let err = SamplerBuilder::new(GraphFamily::UniformRandomTree)
        .with_target_size(5)
        .with_max_nodes(4)
        .with_seed(2)
        .with_termination(TerminationPolicy::MaxAttempts(
            NonZeroUsize::new(2_000).expect("non-zero"),
        ))
        .build()
        .expect("configuration is valid")
        .run()
        .expect_err("only four unlabeled trees have at most four nodes");
    assert!(matches!(
        err,
        SamplerError::Exhausted {
            accepted: 4,
            target: 5,
            attempts: 2_000
        }
    ));
    assert_eq!(err.code().as_str(), "SAMPLER_EXHAUSTED");
}

#[rstest]
#[case::defaults(1, 10, 0.5)]
#[case::sparse(2, 8, 0.35)]
#[case::dense(1, 6, 0.9)]
fn bipartite_samples_keep_their_partition(
    #[case] min: usize,
    #[case] max: usize,
    #[case] p: f64,
) {
    let outcome = bounded(GraphFamily::BipartiteRandom, 10, 77)
        .with_min_class_size(min)
        .with_max_nodes(max)
        .with_edge_probability(p)
        .build()
        .expect("configuration is valid")
        .run()
        .expect("ten connected bipartite graphs exist");
    let corpus = outcome.corpus();
    assert_eq!(corpus.len(), 10);
    for graph in corpus.samples() {
        assert!(is_weakly_connected(graph));
        assert!(graph.node_count() <= max);
        let labels = graph.partition().expect("bipartite samples are labelled");
        let buyers = labels.iter().filter(|l| **l == Partition::Buyer).count();
        assert!(buyers >= min && labels.len() - buyers >= min);
        for &(source, target) in graph.edges() {
            assert_ne!(graph.partition_of(source), graph.partition_of(target));
        }
    }
    assert_pairwise_distinct(corpus);
}

#[rstest]
fn complete_bipartite_corpus_enumerates_every_shape() {
    let builder = bounded(GraphFamily::BipartiteRandom, 6, 3)
        .with_max_nodes(4)
        .with_edge_probability(1.0);
    let outcome = builder
        .clone()
        .build()
        .expect("configuration is valid")
        .run()
        .expect("six buyer/seller splits fit in four nodes");
    let corpus = outcome.corpus();
    for graph in corpus.samples() {
        let labels = graph.partition().expect("bipartite samples are labelled");
        let buyers = labels.iter().filter(|l| **l == Partition::Buyer).count();
        assert_eq!(graph.edge_count(), buyers * (labels.len() - buyers));
    }

    let err = builder
        .with_target_size(7)
        .with_termination(TerminationPolicy::MaxAttempts(
            NonZeroUsize::new(1_000).expect("non-zero"),
        ))
        .build()
        .expect("configuration is valid")
        .run()
        .expect_err("a seventh complete bipartite shape does not exist");
    assert!(matches!(err, SamplerError::Exhausted { accepted: 6, .. }));
}

#[rstest]
fn empty_bipartite_graphs_never_pass_validation() {
    let err = bounded(GraphFamily::BipartiteRandom, 1, 5)
        .with_edge_probability(0.0)
        .with_termination(TerminationPolicy::MaxAttempts(
            NonZeroUsize::new(200).expect("non-zero"),
        ))
        .build()
        .expect("configuration is valid")
        .run()
        .expect_err("edgeless graphs on two or more nodes are disconnected");
    assert!(matches!(
        err,
        SamplerError::Exhausted {
            accepted: 0,
            attempts: 200,
            ..
        }
    ));
}

#[rstest]
fn directed_samples_are_weakly_connected() {
    let outcome = bounded(GraphFamily::DirectedRandom, 30, 12)
        .build()
        .expect("configuration is valid")
        .run()
        .expect("thirty connected digraphs exist");
    let corpus = outcome.corpus();
    assert_eq!(corpus.len(), 30);
    for graph in corpus.samples() {
        assert!(graph.is_directed());
        assert!(is_weakly_connected(graph));
        assert!((2..=10).contains(&graph.node_count()));
    }
    assert_pairwise_distinct(corpus);
}

#[rstest]
fn complete_digraphs_differ_only_by_size() {
    let outcome = bounded(GraphFamily::DirectedRandom, 4, 8)
        .with_max_nodes(5)
        .with_edge_probability(1.0)
        .build()
        .expect("configuration is valid")
        .run()
        .expect("one complete digraph per size in 2..=5");
    let mut sizes: Vec<usize> = outcome.corpus().samples().map(Graph::node_count).collect();
    sizes.sort_unstable();
    assert_eq!(sizes, vec![2, 3, 4, 5]);
    assert!(
        outcome
            .corpus()
            .samples()
            .all(|g| g.edge_count() == g.node_count() * (g.node_count() - 1))
    );
}

#[rstest]
#[case::bipartite(GraphFamily::BipartiteRandom)]
#[case::tree(GraphFamily::UniformRandomTree)]
#[case::directed(GraphFamily::DirectedRandom)]
fn fixed_seed_reproduces_the_corpus(#[case] family: GraphFamily) {
    let run = || {
        bounded(family, 12, 1_234)
            .build()
            .expect("configuration is valid")
            .run()
            .expect("twelve samples exist")
    };
    let first = run();
    let second = run();
    assert_eq!(first.stats(), second.stats());
    assert_eq!(first.into_corpus().into_graphs(), second.into_corpus().into_graphs());
}

#[cfg(feature = "parallel")]
#[rstest]
#[case::single(1)]
#[case::odd(7)]
#[case::default_batch(64)]
fn parallel_batches_match_sequential_runs(#[case] batch: usize) {
    let builder = bounded(GraphFamily::DirectedRandom, 15, 99).with_max_nodes(6);
    let sequential = builder
        .clone()
        .build()
        .expect("configuration is valid")
        .run()
        .expect("fifteen digraphs exist");
    let parallel = builder
        .with_execution_strategy(ExecutionStrategy::Parallel)
        .with_batch_size(batch)
        .build()
        .expect("configuration is valid")
        .run()
        .expect("fifteen digraphs exist");
    assert_eq!(sequential.stats(), parallel.stats());
    assert_eq!(
        sequential.into_corpus().into_graphs(),
        parallel.into_corpus().into_graphs()
    );
}

#[cfg(feature = "parallel")]
#[rstest]
fn parallel_runs_respect_the_attempt_cap() {
    let err = SamplerBuilder::new(GraphFamily::UniformRandomTree)
        .with_target_size(5)
        .with_max_nodes(4)
        .with_seed(2)
        .with_execution_strategy(ExecutionStrategy::Parallel)
        .with_batch_size(64)
        .with_termination(TerminationPolicy::MaxAttempts(
            NonZeroUsize::new(100).expect("non-zero"),
        ))
        .build()
        .expect("configuration is valid")
        .run()
        .expect_err("the request is unsatisfiable");
    assert!(matches!(err, SamplerError::Exhausted { attempts: 100, .. }));
}

#[rstest]
fn omitted_seed_is_resolved_and_replayable() {
    let first = SamplerBuilder::new(GraphFamily::UniformRandomTree)
        .with_target_size(3)
        .build()
        .expect("configuration is valid")
        .run()
        .expect("three trees exist");
    let replay = SamplerBuilder::new(GraphFamily::UniformRandomTree)
        .with_target_size(3)
        .with_seed(first.seed())
        .build()
        .expect("configuration is valid")
        .run()
        .expect("three trees exist");
    assert_eq!(replay.seed(), first.seed());
    assert_eq!(first.into_corpus().into_graphs(), replay.into_corpus().into_graphs());
}

#[rstest]
fn sample_span_and_acceptance_events_are_recorded() {
    let sampler = SamplerBuilder::new(GraphFamily::UniformRandomTree)
        .with_target_size(2)
        .with_min_class_size(4)
        .with_max_nodes(4)
        .with_seed(9)
        .build()
        .expect("configuration is valid");
    let (outcome, layer) = RecordingLayer::capture(|| sampler.run());
    outcome.expect("two four-node trees exist");

    let span = layer.span("core.sample").expect("core.sample span must exist");
    assert_eq!(span.field("family"), Some("uniform-random-tree"));
    assert_eq!(span.field("target"), Some("2"));
    assert_eq!(span.field("seed"), Some("9"));
    assert_eq!(span.field("strategy"), Some("Sequential"));

    let accepted = layer.events_with_message(Level::INFO, "sample accepted");
    let ordinals: Vec<_> = accepted
        .iter()
        .map(|event| event.field("ordinal").unwrap_or_default().to_owned())
        .collect();
    assert_eq!(ordinals, vec!["1", "2"]);
    assert!(layer.has_event(Level::INFO, "corpus complete"));
}

#[rstest]
fn exhaustion_is_logged_as_a_warning() {
    let sampler = bounded(GraphFamily::BipartiteRandom, 1, 5)
        .with_edge_probability(0.0)
        .with_termination(TerminationPolicy::MaxAttempts(
            NonZeroUsize::new(10).expect("non-zero"),
        ))
        .build()
        .expect("configuration is valid");
    let (result, layer) = RecordingLayer::capture(|| sampler.run());
    assert!(result.is_err());
    let warnings =
        layer.events_with_message(Level::WARN, "termination policy stopped an incomplete run");
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].field("attempts"), Some("10"));
}
