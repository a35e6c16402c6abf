//! Uniformly random labelled trees via Prüfer sequences.
//!
//! Sequences of length `n − 2` over `0..n` are in bijection with the labelled
//! trees on `n` nodes, so decoding a uniformly drawn sequence yields a
//! uniformly drawn tree.

use std::{cmp::Reverse, collections::BinaryHeap};

use rand::Rng;

use crate::{
    error::GenerationError,
    graph::{Directedness, Graph, GraphFamily},
};

/// Draws a uniformly random Prüfer sequence for a tree on `n` nodes.
///
/// Returns an empty sequence when `n < 2`.
///
/// # Examples
/// ```
/// use orgtopo_core::generator::random_prufer_sequence;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(4);
/// let sequence = random_prufer_sequence(6, &mut rng);
/// assert_eq!(sequence.len(), 4);
/// assert!(sequence.iter().all(|&label| label < 6));
/// ```
pub fn random_prufer_sequence<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Vec<usize> {
    (0..n.saturating_sub(2)).map(|_| rng.gen_range(0..n)).collect()
}

/// Returns a uniformly random tree on `n` labelled nodes.
///
/// # Errors
/// Returns [`GenerationError::EmptyTree`] when `n` is zero because the null
/// graph is not a tree.
///
/// # Examples
/// ```
/// use orgtopo_core::{GenerationError, generator::uniform_random_tree};
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(8);
/// let tree = uniform_random_tree(7, &mut rng)?;
/// assert_eq!(tree.edge_count(), 6);
///
/// let single = uniform_random_tree(1, &mut rng)?;
/// assert_eq!((single.node_count(), single.edge_count()), (1, 0));
///
/// assert_eq!(uniform_random_tree(0, &mut rng), Err(GenerationError::EmptyTree));
/// # Ok::<(), GenerationError>(())
/// ```
pub fn uniform_random_tree<R: Rng + ?Sized>(n: usize, rng: &mut R) -> Result<Graph, GenerationError> {
    match n {
        0 => Err(GenerationError::EmptyTree),
        1 => Ok(Graph::from_parts(1, Directedness::Undirected, Vec::new())
            .with_family(GraphFamily::UniformRandomTree)),
        _ => tree_from_prufer(&random_prufer_sequence(n, rng)),
    }
}

/// Decodes a Prüfer sequence into the tree on `sequence.len() + 2` nodes it
/// encodes.
///
/// Repeatedly attaches the smallest remaining leaf to the head of the
/// sequence, removes that leaf, and advances; the final two leaves are joined
/// by the last edge.
///
/// # Errors
/// Returns [`GenerationError::InvalidPruferLabel`] when a label is not below
/// `sequence.len() + 2`.
///
/// # Examples
/// ```
/// use orgtopo_core::generator::tree_from_prufer;
///
/// let star = tree_from_prufer(&[0, 0, 0])?;
/// assert_eq!(star.edges(), &[(0, 1), (0, 2), (0, 3), (0, 4)]);
///
/// let path = tree_from_prufer(&[1, 2])?;
/// assert_eq!(path.edges(), &[(0, 1), (1, 2), (2, 3)]);
/// # Ok::<(), orgtopo_core::GenerationError>(())
/// ```
pub fn tree_from_prufer(sequence: &[usize]) -> Result<Graph, GenerationError> {
    let node_count = sequence.len() + 2;
    let mut degree = vec![1_usize; node_count];
    for &label in sequence {
        match degree.get_mut(label) {
            Some(slot) => *slot += 1,
            None => return Err(GenerationError::InvalidPruferLabel { label, node_count }),
        }
    }

    let mut leaves: BinaryHeap<Reverse<usize>> = degree
        .iter()
        .enumerate()
        .filter(|&(_, &d)| d == 1)
        .map(|(node, _)| Reverse(node))
        .collect();

    let mut edges = Vec::with_capacity(node_count - 1);
    for &head in sequence {
        let Some(Reverse(leaf)) = leaves.pop() else {
            break;
        };
        edges.push((leaf, head));
        if let Some(slot) = degree.get_mut(head) {
            *slot -= 1;
            if *slot == 1 {
                leaves.push(Reverse(head));
            }
        }
    }
    if let (Some(Reverse(u)), Some(Reverse(v))) = (leaves.pop(), leaves.pop()) {
        edges.push((u, v));
    }

    Ok(Graph::from_parts(node_count, Directedness::Undirected, edges)
        .with_family(GraphFamily::UniformRandomTree))
}
