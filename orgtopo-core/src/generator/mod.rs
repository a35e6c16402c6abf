//! Random graph generators, one per [`GraphFamily`].
//!
//! Every generator takes an explicit random source so callers control
//! reproducibility. [`Generator`] bundles a family with the concrete size and
//! probability drawn for one sampling attempt.

mod bipartite;
mod directed;
mod skip;
mod tree;

use rand::Rng;

use crate::{error::GenerationError, graph::Graph, graph::GraphFamily};

pub use bipartite::bipartite_random;
pub use directed::directed_random;
pub use tree::{random_prufer_sequence, tree_from_prufer, uniform_random_tree};

/// A fully parameterised generator call.
///
/// # Examples
/// ```
/// use orgtopo_core::{GraphFamily, generator::Generator};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let generator = Generator::UniformRandomTree { nodes: 5 };
/// assert_eq!(generator.family(), GraphFamily::UniformRandomTree);
/// let tree = generator.generate(&mut SmallRng::seed_from_u64(3))?;
/// assert_eq!(tree.edge_count(), 4);
/// # Ok::<(), orgtopo_core::GenerationError>(())
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Generator {
    /// See [`bipartite_random`].
    BipartiteRandom {
        /// Nodes in partition `0`.
        buyers: usize,
        /// Nodes in partition `1`.
        sellers: usize,
        /// Edge probability.
        probability: f64,
    },
    /// See [`uniform_random_tree`].
    UniformRandomTree {
        /// Node count.
        nodes: usize,
    },
    /// See [`directed_random`].
    DirectedRandom {
        /// Node count.
        nodes: usize,
        /// Edge probability.
        probability: f64,
    },
}

impl Generator {
    /// Family produced by this generator.
    #[must_use]
    pub const fn family(&self) -> GraphFamily {
        match self {
            Self::BipartiteRandom { .. } => GraphFamily::BipartiteRandom,
            Self::UniformRandomTree { .. } => GraphFamily::UniformRandomTree,
            Self::DirectedRandom { .. } => GraphFamily::DirectedRandom,
        }
    }

    /// Total number of nodes the generated graph will have.
    #[must_use]
    pub const fn node_count(&self) -> usize {
        match *self {
            Self::BipartiteRandom {
                buyers, sellers, ..
            } => buyers + sellers,
            Self::UniformRandomTree { nodes } | Self::DirectedRandom { nodes, .. } => nodes,
        }
    }

    /// Produces one random graph.
    ///
    /// # Errors
    /// Returns [`GenerationError::EmptyTree`] for a tree with zero nodes.
    pub fn generate<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Graph, GenerationError> {
        match *self {
            Self::BipartiteRandom {
                buyers,
                sellers,
                probability,
            } => Ok(bipartite_random(buyers, sellers, probability, rng)),
            Self::UniformRandomTree { nodes } => uniform_random_tree(nodes, rng),
            Self::DirectedRandom { nodes, probability } => {
                Ok(directed_random(nodes, probability, rng))
            }
        }
    }
}
