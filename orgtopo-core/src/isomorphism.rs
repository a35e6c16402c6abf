//! Graph isomorphism for the uniqueness oracle.
//!
//! Cheap invariants (node and edge counts, orientation, and the multiset of
//! per-node degree signatures) rule out most non-isomorphic pairs before the
//! VF2 search in `petgraph` runs. Partition labels take part in both stages,
//! so bipartite graphs only match when buyers map to buyers.

use petgraph::{
    Directed, EdgeType, Undirected,
    algo::is_isomorphic_matching,
    graph::{Graph as PetGraph, NodeIndex},
};

use crate::graph::{Directedness, Graph, Partition};

/// Isomorphism-invariant summary of a graph.
///
/// Two isomorphic graphs always share the same invariants; the converse does
/// not hold.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Invariants {
    node_count: usize,
    edge_count: usize,
    directedness: Directedness,
    signatures: Vec<(Option<Partition>, usize, usize)>,
}

impl Invariants {
    /// Computes the invariants of `graph`.
    #[must_use]
    pub fn of(graph: &Graph) -> Self {
        let mut signatures: Vec<_> = graph
            .degrees()
            .into_iter()
            .enumerate()
            .map(|(node, (out_degree, in_degree))| {
                (graph.partition_of(node), out_degree, in_degree)
            })
            .collect();
        signatures.sort_unstable();
        Self {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            directedness: graph.directedness(),
            signatures,
        }
    }
}

/// Returns whether a bijection between the node sets of `left` and `right`
/// preserves the edge relation and every partition label.
///
/// # Examples
/// ```
/// use orgtopo_core::{Directedness, Graph, isomorphism::is_isomorphic};
///
/// let path = Graph::try_new(3, Directedness::Directed, [(0, 1), (1, 2)])?;
/// let relabelled = Graph::try_new(3, Directedness::Directed, [(2, 0), (0, 1)])?;
/// let fork = Graph::try_new(3, Directedness::Directed, [(0, 1), (0, 2)])?;
/// assert!(is_isomorphic(&path, &relabelled));
/// assert!(!is_isomorphic(&path, &fork));
/// # Ok::<(), orgtopo_core::GraphError>(())
/// ```
#[must_use]
pub fn is_isomorphic(left: &Graph, right: &Graph) -> bool {
    Invariants::of(left) == Invariants::of(right) && isomorphic_with_matching_invariants(left, right)
}

/// Runs the full search; callers must already know the invariants agree.
pub(crate) fn isomorphic_with_matching_invariants(left: &Graph, right: &Graph) -> bool {
    match left.directedness() {
        Directedness::Directed => search::<Directed>(left, right),
        Directedness::Undirected => search::<Undirected>(left, right),
    }
}

fn search<Ty: EdgeType>(left: &Graph, right: &Graph) -> bool {
    let left = to_petgraph::<Ty>(left);
    let right = to_petgraph::<Ty>(right);
    is_isomorphic_matching(&left, &right, |a, b| a == b, |_, _| true)
}

fn to_petgraph<Ty: EdgeType>(graph: &Graph) -> PetGraph<Option<Partition>, (), Ty> {
    let mut converted = PetGraph::with_capacity(graph.node_count(), graph.edge_count());
    for node in graph.nodes() {
        converted.add_node(graph.partition_of(node));
    }
    for &(source, target) in graph.edges() {
        converted.add_edge(NodeIndex::new(source), NodeIndex::new(target), ());
    }
    converted
}
