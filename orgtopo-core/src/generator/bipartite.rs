//! Bipartite buyer/seller random graphs.

use rand::Rng;

use crate::graph::{Directedness, Graph, GraphFamily, Partition};

use super::skip::GeometricSkips;

/// Returns a random bipartite graph with `num_buyer` buyers and `num_seller`
/// sellers where each buyer→seller edge is present with probability `p`.
///
/// Buyers are nodes `0..num_buyer` (partition `0`); sellers are
/// `num_buyer..num_buyer + num_seller` (partition `1`). The run time is
/// proportional to `num_buyer + num_seller + |edges|`: edges are reached by
/// geometric skips over the linearised buyer×seller index instead of flipping
/// a coin per pair.
///
/// `p <= 0` yields no edges and `p >= 1` yields the complete bipartite graph.
///
/// # Examples
/// ```
/// use orgtopo_core::generator::bipartite_random;
/// use rand::{SeedableRng, rngs::SmallRng};
///
/// let mut rng = SmallRng::seed_from_u64(1);
/// let complete = bipartite_random(2, 3, 1.0, &mut rng);
/// assert_eq!(complete.node_count(), 5);
/// assert_eq!(complete.edge_count(), 6);
///
/// let empty = bipartite_random(2, 3, 0.0, &mut rng);
/// assert_eq!(empty.edge_count(), 0);
/// ```
pub fn bipartite_random<R: Rng + ?Sized>(
    num_buyer: usize,
    num_seller: usize,
    p: f64,
    rng: &mut R,
) -> Graph {
    let total = num_buyer.saturating_mul(num_seller);
    let edges: Vec<(usize, usize)> = if p.is_nan() || p <= 0.0 || total == 0 {
        Vec::new()
    } else if p >= 1.0 {
        (0..total)
            .map(|index| pair_at(index, num_buyer, num_seller))
            .collect()
    } else {
        GeometricSkips::new(rng, p, total)
            .map(|index| pair_at(index, num_buyer, num_seller))
            .collect()
    };

    let labels = (0..num_buyer)
        .map(|_| Partition::Buyer)
        .chain((0..num_seller).map(|_| Partition::Seller))
        .collect();
    let node_count = num_buyer + num_seller;
    Graph::from_parts(node_count, Directedness::Directed, edges)
        .with_trusted_partition(labels)
        .with_family(GraphFamily::BipartiteRandom)
}

/// Wraps a linear buyer×seller index back into `(buyer, seller)` node ids.
#[expect(
    clippy::integer_division,
    clippy::integer_division_remainder_used,
    reason = "row-major unravelling of the buyer×seller index"
)]
fn pair_at(index: usize, num_buyer: usize, num_seller: usize) -> (usize, usize) {
    let buyer = index / num_seller;
    let seller = num_buyer + index % num_seller;
    (buyer, seller)
}

#[cfg(test)]
mod tests {
    use super::*;

    use rand::{SeedableRng, rngs::SmallRng};
    use rstest::rstest;

    #[rstest]
    #[case(1, 1)]
    #[case(3, 4)]
    #[case(5, 5)]
    fn complete_graph_contains_every_buyer_seller_pair(
        #[case] buyers: usize,
        #[case] sellers: usize,
    ) {
        let mut rng = SmallRng::seed_from_u64(3);
        let graph = bipartite_random(buyers, sellers, 1.0, &mut rng);
        assert_eq!(graph.edge_count(), buyers * sellers);
        for buyer in 0..buyers {
            for seller in buyers..buyers + sellers {
                assert!(graph.contains_edge(buyer, seller));
            }
        }
    }

    #[rstest]
    #[case(-0.5)]
    #[case(0.0)]
    #[case(f64::NAN)]
    fn non_positive_probability_yields_no_edges(#[case] p: f64) {
        let mut rng = SmallRng::seed_from_u64(3);
        let graph = bipartite_random(4, 4, p, &mut rng);
        assert_eq!(graph.edge_count(), 0);
        assert_eq!(graph.node_count(), 8);
    }

    #[rstest]
    fn labels_split_buyers_from_sellers() {
        let mut rng = SmallRng::seed_from_u64(9);
        let graph = bipartite_random(2, 3, 0.5, &mut rng);
        let labels = graph.partition().expect("bipartite graphs carry labels");
        assert_eq!(
            labels,
            &[
                Partition::Buyer,
                Partition::Buyer,
                Partition::Seller,
                Partition::Seller,
                Partition::Seller,
            ]
        );
        assert_eq!(graph.family(), Some(GraphFamily::BipartiteRandom));
    }

    #[rstest]
    fn pair_at_unravels_row_major() {
        assert_eq!(pair_at(0, 2, 3), (0, 2));
        assert_eq!(pair_at(2, 2, 3), (0, 4));
        assert_eq!(pair_at(3, 2, 3), (1, 2));
        assert_eq!(pair_at(5, 2, 3), (1, 4));
    }
}
