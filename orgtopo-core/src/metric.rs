//! Density metric computed for every accepted sample.

use crate::{error::MetricError, graph::Graph};

/// Returns `|E| / (|V|² − |V|)`: the edge count normalised by the number of
/// arcs a simple directed graph on the same nodes can hold.
///
/// # Errors
/// Returns [`MetricError::TooFewNodes`] when the graph has fewer than two
/// nodes, where the denominator vanishes.
///
/// # Examples
/// ```
/// use orgtopo_core::{Directedness, Graph, MetricError, coupling_factor};
///
/// let pair = Graph::try_new(2, Directedness::Directed, [(0, 1)])?;
/// assert_eq!(coupling_factor(&pair)?, 0.5);
///
/// let lonely = Graph::try_new(1, Directedness::Directed, [])?;
/// assert_eq!(coupling_factor(&lonely), Err(MetricError::TooFewNodes { nodes: 1 }));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[expect(
    clippy::cast_precision_loss,
    clippy::float_arithmetic,
    reason = "the coupling factor is a ratio of small counts"
)]
pub fn coupling_factor(graph: &Graph) -> Result<f64, MetricError> {
    let nodes = graph.node_count();
    if nodes < 2 {
        return Err(MetricError::TooFewNodes { nodes });
    }
    let capacity = nodes * nodes - nodes;
    Ok(graph.edge_count() as f64 / capacity as f64)
}
