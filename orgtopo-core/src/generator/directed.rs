//! Directed binomial random graphs.

use rand::Rng;

use crate::graph::{Directedness, Graph, GraphFamily};

use super::skip::GeometricSkips;

/// Returns a directed graph on `n` nodes where every ordered pair of distinct
/// nodes carries an edge independently with probability `p`.
///
/// The `n · (n − 1)` off-diagonal pairs are linearised row by row and sampled
/// with the same geometric skips as [`super::bipartite_random`].
///
/// # Examples
/// ```
/// use orgtopo_core::generator::directed_random;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(2);
/// let full = directed_random(4, 1.0, &mut rng);
/// assert_eq!(full.edge_count(), 12);
/// assert!(full.is_directed());
/// ```
pub fn directed_random<R: Rng + ?Sized>(n: usize, p: f64, rng: &mut R) -> Graph {
    let total = n.saturating_mul(n.saturating_sub(1));
    let edges: Vec<(usize, usize)> = if p.is_nan() || p <= 0.0 || total == 0 {
        Vec::new()
    } else if p >= 1.0 {
        (0..total).map(|index| ordered_pair_at(index, n)).collect()
    } else {
        GeometricSkips::new(rng, p, total)
            .map(|index| ordered_pair_at(index, n))
            .collect()
    };
    Graph::from_parts(n, Directedness::Directed, edges).with_family(GraphFamily::DirectedRandom)
}

/// Maps a linear index over the off-diagonal cells of an `n × n` matrix back
/// to `(source, target)` with `source != target`.
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "row-major unravelling of the off-diagonal index"
)]
fn ordered_pair_at(index: usize, n: usize) -> (usize, usize) {
    let row_len = n - 1;
    let source = index / row_len;
    let column = index % row_len;
    let target = if column >= source { column + 1 } else { column };
    (source, target)
}
