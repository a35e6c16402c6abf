//! The engine-owned collection of accepted, mutually non-isomorphic samples.

use std::num::NonZeroUsize;

use crate::{
    error::MetricError,
    graph::{Graph, GraphFamily},
    isomorphism::{Invariants, isomorphic_with_matching_invariants},
    record::SampleRecord,
};

#[derive(Clone, Debug)]
struct Entry {
    graph: Graph,
    invariants: Invariants,
}

/// Ordered sequence of accepted graphs, capped at a target size.
///
/// Members are kept in acceptance order, which is also their 1-based
/// ordinal. Only the sampling engine can append.
#[derive(Clone, Debug)]
pub struct Corpus {
    family: GraphFamily,
    target: NonZeroUsize,
    entries: Vec<Entry>,
}

impl Corpus {
    pub(crate) fn new(family: GraphFamily, target: NonZeroUsize) -> Self {
        Self {
            family,
            target,
            entries: Vec::with_capacity(target.get()),
        }
    }

    /// Family every member was drawn from.
    #[must_use]
    pub fn family(&self) -> GraphFamily {
        self.family
    }

    /// Requested number of samples.
    #[must_use]
    pub fn target(&self) -> NonZeroUsize {
        self.target
    }

    /// Number of accepted samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no sample has been accepted yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns whether the corpus has reached its target size.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.entries.len() >= self.target.get()
    }

    /// Accepted graphs in acceptance order.
    pub fn samples(&self) -> impl ExactSizeIterator<Item = &Graph> + '_ {
        self.entries.iter().map(|entry| &entry.graph)
    }

    /// Sample with the given 1-based ordinal.
    #[must_use]
    pub fn get(&self, ordinal: NonZeroUsize) -> Option<&Graph> {
        self.entries.get(ordinal.get() - 1).map(|entry| &entry.graph)
    }

    /// Returns the ordinal of the first member isomorphic to `candidate`, or
    /// `None` when the candidate is structurally new.
    ///
    /// Members are scanned in acceptance order and the scan stops at the
    /// first match.
    #[must_use]
    pub fn find_isomorphic(&self, candidate: &Graph) -> Option<NonZeroUsize> {
        let invariants = Invariants::of(candidate);
        self.find_with_invariants(candidate, &invariants)
    }

    fn find_with_invariants(
        &self,
        candidate: &Graph,
        invariants: &Invariants,
    ) -> Option<NonZeroUsize> {
        self.entries
            .iter()
            .position(|entry| {
                entry.invariants == *invariants
                    && isomorphic_with_matching_invariants(&entry.graph, candidate)
            })
            .and_then(|index| NonZeroUsize::new(index + 1))
    }

    /// Appends `candidate` unless it duplicates an existing member.
    ///
    /// Returns the new ordinal on success, or the ordinal of the member it
    /// duplicates.
    pub(crate) fn try_accept(&mut self, candidate: Graph) -> Result<NonZeroUsize, NonZeroUsize> {
        let invariants = Invariants::of(&candidate);
        if let Some(existing) = self.find_with_invariants(&candidate, &invariants) {
            return Err(existing);
        }
        debug_assert!(!self.is_complete(), "corpus is already complete");
        self.entries.push(Entry {
            graph: candidate,
            invariants,
        });
        Ok(NonZeroUsize::new(self.entries.len()).unwrap_or(NonZeroUsize::MIN))
    }

    /// Computes one [`SampleRecord`] per member, in acceptance order.
    ///
    /// # Errors
    /// Returns [`MetricError`] when a member's coupling factor is undefined.
    pub fn records(&self) -> Result<Vec<SampleRecord>, MetricError> {
        self.samples()
            .zip(1_usize..)
            .map(|(graph, ordinal)| {
                let ordinal = NonZeroUsize::new(ordinal).unwrap_or(NonZeroUsize::MIN);
                SampleRecord::from_graph(ordinal, graph)
            })
            .collect()
    }

    /// Consumes the corpus, returning the graphs in acceptance order.
    #[must_use]
    pub fn into_graphs(self) -> Vec<Graph> {
        self.entries.into_iter().map(|entry| entry.graph).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::{fixture, rstest};

    use crate::graph::Directedness;

    #[fixture]
    fn corpus() -> Corpus {
        Corpus::new(
            GraphFamily::DirectedRandom,
            NonZeroUsize::new(3).expect("non-zero"),
        )
    }

    fn directed(n: usize, edges: &[(usize, usize)]) -> Graph {
        Graph::try_new(n, Directedness::Directed, edges.iter().copied())
            .expect("fixture edges are valid")
    }

    #[rstest]
    fn duplicates_report_the_first_matching_ordinal(mut corpus: Corpus) {
        let first = corpus
            .try_accept(directed(2, &[(0, 1)]))
            .expect("first sample is new");
        assert_eq!(first.get(), 1);
        corpus
            .try_accept(directed(3, &[(0, 1), (1, 2)]))
            .expect("path is new");

        let duplicate = corpus
            .try_accept(directed(2, &[(1, 0)]))
            .expect_err("reversed arc is isomorphic to the first sample");
        assert_eq!(duplicate.get(), 1);
        assert_eq!(corpus.len(), 2);
        assert!(!corpus.is_complete());
    }

    #[rstest]
    fn records_follow_acceptance_order(mut corpus: Corpus) {
        for graph in [
            directed(2, &[(0, 1)]),
            directed(2, &[(0, 1), (1, 0)]),
            directed(3, &[(0, 1), (0, 2)]),
        ] {
            corpus.try_accept(graph).expect("samples are distinct");
        }
        assert!(corpus.is_complete());
        let records = corpus.records().expect("every sample has two nodes");
        let summary: Vec<(usize, usize, usize)> = records
            .iter()
            .map(|r| (r.ordinal().get(), r.node_count(), r.edge_count()))
            .collect();
        assert_eq!(summary, vec![(1, 2, 1), (2, 2, 2), (3, 3, 2)]);
        let second = corpus
            .get(NonZeroUsize::new(2).expect("non-zero"))
            .expect("ordinal 2 exists");
        assert_eq!(second.edge_count(), 2);
    }
}
