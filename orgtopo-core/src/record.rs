//! Per-sample records derived from a finalised corpus.

use std::num::NonZeroUsize;

use crate::{error::MetricError, graph::Graph, metric::coupling_factor};

/// Summary row describing one accepted sample.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use orgtopo_core::{Directedness, Graph, SampleRecord};
///
/// let graph = Graph::try_new(3, Directedness::Directed, [(0, 1), (1, 2)])?;
/// let ordinal = NonZeroUsize::new(4).expect("non-zero");
/// let record = SampleRecord::from_graph(ordinal, &graph)?;
/// assert_eq!(record.ordinal().get(), 4);
/// assert_eq!(record.node_count(), 3);
/// assert_eq!(record.edge_count(), 2);
/// assert!((record.coupling_factor() - 2.0 / 6.0).abs() < 1e-12);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SampleRecord {
    ordinal: NonZeroUsize,
    node_count: usize,
    edge_count: usize,
    coupling_factor: f64,
}

impl SampleRecord {
    /// Builds the record for the sample accepted at position `ordinal`.
    ///
    /// # Errors
    /// Propagates [`MetricError`] when the coupling factor is undefined.
    pub fn from_graph(ordinal: NonZeroUsize, graph: &Graph) -> Result<Self, MetricError> {
        Ok(Self {
            ordinal,
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            coupling_factor: coupling_factor(graph)?,
        })
    }

    /// 1-based acceptance order.
    #[must_use]
    pub fn ordinal(&self) -> NonZeroUsize {
        self.ordinal
    }

    /// Number of nodes in the sample.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of edges in the sample.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_count
    }

    /// Coupling factor of the sample.
    #[must_use]
    pub fn coupling_factor(&self) -> f64 {
        self.coupling_factor
    }
}
