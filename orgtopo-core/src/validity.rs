//! Structural validity checks applied to freshly generated candidates.

use crate::{
    graph::{Graph, GraphFamily},
    union_find::ComponentCounter,
};

/// Returns whether every node is reachable from every other node when edge
/// direction is ignored.
///
/// The null graph is not connected; a single node is.
///
/// # Examples
/// ```
/// use orgtopo_core::{Directedness, Graph, validity::is_weakly_connected};
///
/// let chain = Graph::try_new(3, Directedness::Directed, [(0, 1), (2, 1)])?;
/// assert!(is_weakly_connected(&chain));
///
/// let split = Graph::try_new(3, Directedness::Directed, [(0, 1)])?;
/// assert!(!is_weakly_connected(&split));
/// # Ok::<(), orgtopo_core::GraphError>(())
/// ```
#[must_use]
pub fn is_weakly_connected(graph: &Graph) -> bool {
    let node_count = graph.node_count();
    if node_count == 0 {
        return false;
    }
    if graph.edge_count() + 1 < node_count {
        return false;
    }
    let mut counter = ComponentCounter::new(node_count);
    node_count == 1
        || graph
            .edges()
            .iter()
            .any(|&(source, target)| counter.merge(source, target) == 1)
}

/// Returns whether `graph` is a tree: weakly connected with exactly
/// `node_count − 1` edges, hence acyclic.
#[must_use]
pub fn is_tree(graph: &Graph) -> bool {
    graph.node_count() > 0
        && graph.edge_count() == graph.node_count() - 1
        && is_weakly_connected(graph)
}

/// Decides whether a candidate from `family` may proceed to the uniqueness
/// check.
///
/// Trees are connected by construction; the other families must be weakly
/// connected.
#[must_use]
pub fn is_valid(graph: &Graph, family: GraphFamily) -> bool {
    !family.requires_connectivity() || is_weakly_connected(graph)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::graph::Directedness;

    fn directed(n: usize, edges: &[(usize, usize)]) -> Graph {
        Graph::try_new(n, Directedness::Directed, edges.iter().copied())
            .expect("fixture edges are valid")
    }

    #[rstest]
    #[case::null(0, vec![], false)]
    #[case::single(1, vec![], true)]
    #[case::isolated_pair(2, vec![], false)]
    #[case::opposed_arcs(3, vec![(0, 1), (2, 1)], true)]
    #[case::two_islands(4, vec![(0, 1), (2, 3)], false)]
    #[case::cycle(3, vec![(0, 1), (1, 2), (2, 0)], true)]
    fn weak_connectivity_ignores_direction(
        #[case] n: usize,
        #[case] edges: Vec<(usize, usize)>,
        #[case] expected: bool,
    ) {
        assert_eq!(is_weakly_connected(&directed(n, &edges)), expected);
    }

    #[rstest]
    fn cycle_is_not_a_tree() {
        let triangle = Graph::try_new(3, Directedness::Undirected, [(0, 1), (1, 2), (0, 2)])
            .expect("fixture edges are valid");
        assert!(!is_tree(&triangle));
    }

    #[rstest]
    fn trees_skip_the_connectivity_requirement() {
        let forest = directed(3, &[(0, 1)]);
        assert!(is_valid(&forest, GraphFamily::UniformRandomTree));
        assert!(!is_valid(&forest, GraphFamily::DirectedRandom));
        assert!(!is_valid(&forest, GraphFamily::BipartiteRandom));
    }
}
