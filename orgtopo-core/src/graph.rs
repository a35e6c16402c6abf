//! Concrete graph value type shared by generators, validity checks, and the
//! isomorphism oracle.
//!
//! Nodes are the contiguous identifiers `0..node_count`. Edges are kept sorted
//! and deduplicated so two graphs built from the same edge set compare equal
//! regardless of insertion order. Undirected edges are normalised to
//! `(low, high)`.

use std::{fmt, ops::Range};

use crate::error::GraphError;

/// Identifier of a node inside a [`Graph`].
pub type NodeId = usize;

/// Partition label carried by nodes of bipartite graphs.
///
/// # Examples
/// ```
/// use orgtopo_core::Partition;
///
/// assert_eq!(Partition::Buyer.label(), 0);
/// assert_eq!(Partition::Seller.label(), 1);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Partition {
    /// Partition `0`: the buyer side of a market.
    Buyer,
    /// Partition `1`: the seller side of a market.
    Seller,
}

impl Partition {
    /// Returns the numeric label (`0` for buyers, `1` for sellers).
    #[must_use]
    pub const fn label(self) -> u8 {
        match self {
            Self::Buyer => 0,
            Self::Seller => 1,
        }
    }
}

/// Whether edges are ordered pairs or unordered pairs.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Directedness {
    /// Edges are ordered `(source, target)` pairs.
    Directed,
    /// Edges are unordered pairs stored as `(low, high)`.
    Undirected,
}

/// Random graph families the generators can produce.
///
/// # Examples
/// ```
/// use orgtopo_core::GraphFamily;
///
/// assert!(GraphFamily::DirectedRandom.requires_connectivity());
/// assert!(!GraphFamily::UniformRandomTree.requires_connectivity());
/// assert_eq!(GraphFamily::BipartiteRandom.to_string(), "bipartite-random");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GraphFamily {
    /// Bipartite buyer/seller graph with independent buyer→seller edges.
    BipartiteRandom,
    /// Uniformly random labelled tree decoded from a Prüfer sequence.
    UniformRandomTree,
    /// Directed graph with independent edges between ordered node pairs.
    DirectedRandom,
}

impl GraphFamily {
    /// Stable kebab-case name of the family.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::BipartiteRandom => "bipartite-random",
            Self::UniformRandomTree => "uniform-random-tree",
            Self::DirectedRandom => "directed-random",
        }
    }

    /// Returns whether candidates must be weakly connected to be accepted.
    #[must_use]
    pub const fn requires_connectivity(self) -> bool {
        !matches!(self, Self::UniformRandomTree)
    }

    /// Returns whether isomorphisms must map buyers to buyers and sellers to
    /// sellers.
    #[must_use]
    pub const fn preserves_partition(self) -> bool {
        matches!(self, Self::BipartiteRandom)
    }

    /// Smallest admissible lower node bound: per partition for bipartite
    /// graphs, per graph otherwise.
    #[must_use]
    pub const fn min_class_floor(self) -> usize {
        match self {
            Self::BipartiteRandom => 1,
            Self::UniformRandomTree | Self::DirectedRandom => 2,
        }
    }
}

impl fmt::Display for GraphFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A small graph with contiguous node identifiers.
///
/// # Examples
/// ```
/// use orgtopo_core::{Directedness, Graph};
///
/// let graph = Graph::try_new(3, Directedness::Directed, [(2, 0), (0, 1), (0, 1)])?;
/// assert_eq!(graph.node_count(), 3);
/// assert_eq!(graph.edges(), &[(0, 1), (2, 0)]);
/// # Ok::<(), orgtopo_core::GraphError>(())
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Graph {
    node_count: usize,
    edges: Vec<(NodeId, NodeId)>,
    directedness: Directedness,
    partition: Option<Vec<Partition>>,
    family: Option<GraphFamily>,
}

impl Graph {
    /// Builds a graph from an edge list, validating every endpoint.
    ///
    /// Duplicate edges are collapsed. For undirected graphs `(a, b)` and
    /// `(b, a)` denote the same edge.
    ///
    /// # Errors
    /// Returns [`GraphError::NodeOutOfRange`] when an endpoint is not below
    /// `node_count` and [`GraphError::SelfLoop`] when an edge joins a node to
    /// itself.
    pub fn try_new(
        node_count: usize,
        directedness: Directedness,
        edges: impl IntoIterator<Item = (NodeId, NodeId)>,
    ) -> Result<Self, GraphError> {
        let mut collected = Vec::new();
        for (source, target) in edges {
            for node in [source, target] {
                if node >= node_count {
                    return Err(GraphError::NodeOutOfRange { node, node_count });
                }
            }
            if source == target {
                return Err(GraphError::SelfLoop { node: source });
            }
            collected.push((source, target));
        }
        Ok(Self::from_parts(node_count, directedness, collected))
    }

    /// Builds a graph from trusted parts, normalising the edge list.
    pub(crate) fn from_parts(
        node_count: usize,
        directedness: Directedness,
        mut edges: Vec<(NodeId, NodeId)>,
    ) -> Self {
        if directedness == Directedness::Undirected {
            for edge in &mut edges {
                if edge.0 > edge.1 {
                    *edge = (edge.1, edge.0);
                }
            }
        }
        edges.sort_unstable();
        edges.dedup();
        debug_assert!(
            edges
                .iter()
                .all(|&(s, t)| s < node_count && t < node_count && s != t),
            "edges must reference distinct existing nodes"
        );
        Self {
            node_count,
            edges,
            directedness,
            partition: None,
            family: None,
        }
    }

    /// Attaches a partition label to every node.
    ///
    /// # Errors
    /// Returns [`GraphError::PartitionLengthMismatch`] when `labels` does not
    /// cover every node and [`GraphError::SamePartitionEdge`] when an edge
    /// joins two nodes with the same label.
    ///
    /// # Examples
    /// ```
    /// use orgtopo_core::{Directedness, Graph, GraphError, Partition};
    ///
    /// let graph = Graph::try_new(2, Directedness::Directed, [(0, 1)])?
    ///     .with_partition(vec![Partition::Buyer, Partition::Seller])?;
    /// assert_eq!(graph.partition_of(1), Some(Partition::Seller));
    ///
    /// let err = Graph::try_new(2, Directedness::Directed, [(0, 1)])?
    ///     .with_partition(vec![Partition::Buyer, Partition::Buyer])
    ///     .unwrap_err();
    /// assert!(matches!(err, GraphError::SamePartitionEdge { .. }));
    /// # Ok::<(), GraphError>(())
    /// ```
    pub fn with_partition(mut self, labels: Vec<Partition>) -> Result<Self, GraphError> {
        if labels.len() != self.node_count {
            return Err(GraphError::PartitionLengthMismatch {
                expected: self.node_count,
                actual: labels.len(),
            });
        }
        for &(source, target) in &self.edges {
            if labels.get(source) == labels.get(target) {
                return Err(GraphError::SamePartitionEdge {
                    source_node: source,
                    target_node: target,
                });
            }
        }
        self.partition = Some(labels);
        Ok(self)
    }

    /// Attaches labels the caller has already proven consistent with the edges.
    pub(crate) fn with_trusted_partition(mut self, labels: Vec<Partition>) -> Self {
        debug_assert_eq!(labels.len(), self.node_count, "one label per node");
        debug_assert!(
            self.edges
                .iter()
                .all(|&(s, t)| labels.get(s) != labels.get(t)),
            "edges must cross partitions"
        );
        self.partition = Some(labels);
        self
    }

    /// Records the family that produced this graph.
    #[must_use]
    pub fn with_family(mut self, family: GraphFamily) -> Self {
        self.family = Some(family);
        self
    }

    /// Number of nodes.
    #[must_use]
    pub fn node_count(&self) -> usize {
        self.node_count
    }

    /// Number of edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Node identifiers, `0..node_count`.
    #[must_use]
    pub fn nodes(&self) -> Range<NodeId> {
        0..self.node_count
    }

    /// Sorted, deduplicated edge list.
    #[must_use]
    pub fn edges(&self) -> &[(NodeId, NodeId)] {
        &self.edges
    }

    /// Returns whether `(source, target)` is an edge. Undirected graphs
    /// ignore the order of the endpoints.
    #[must_use]
    pub fn contains_edge(&self, source: NodeId, target: NodeId) -> bool {
        let key = match self.directedness {
            Directedness::Directed => (source, target),
            Directedness::Undirected => (source.min(target), source.max(target)),
        };
        self.edges.binary_search(&key).is_ok()
    }

    /// Edge orientation of this graph.
    #[must_use]
    pub fn directedness(&self) -> Directedness {
        self.directedness
    }

    /// Shorthand for `directedness() == Directedness::Directed`.
    #[must_use]
    pub fn is_directed(&self) -> bool {
        self.directedness == Directedness::Directed
    }

    /// Partition labels indexed by node, when the graph is bipartite.
    #[must_use]
    pub fn partition(&self) -> Option<&[Partition]> {
        self.partition.as_deref()
    }

    /// Partition label of `node`, when the graph is bipartite.
    #[must_use]
    pub fn partition_of(&self, node: NodeId) -> Option<Partition> {
        self.partition.as_ref()?.get(node).copied()
    }

    /// Family that produced this graph, when known.
    #[must_use]
    pub fn family(&self) -> Option<GraphFamily> {
        self.family
    }

    /// Returns `(out_degree, in_degree)` per node. Undirected edges count
    /// towards the out-degree of both endpoints.
    #[must_use]
    pub fn degrees(&self) -> Vec<(usize, usize)> {
        let mut degrees = vec![(0_usize, 0_usize); self.node_count];
        for &(source, target) in &self.edges {
            match self.directedness {
                Directedness::Directed => {
                    if let Some(entry) = degrees.get_mut(source) {
                        entry.0 += 1;
                    }
                    if let Some(entry) = degrees.get_mut(target) {
                        entry.1 += 1;
                    }
                }
                Directedness::Undirected => {
                    for node in [source, target] {
                        if let Some(entry) = degrees.get_mut(node) {
                            entry.0 += 1;
                        }
                    }
                }
            }
        }
        degrees
    }
}
