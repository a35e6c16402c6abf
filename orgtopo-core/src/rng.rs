//! Seed resolution and per-attempt random streams for the sampling engine.
//!
//! Every attempt owns an independent `SmallRng` derived from the run seed and
//! the attempt index, so candidates are identical whether they are produced
//! sequentially or by a pool of workers.

use rand::{SeedableRng, rngs::SmallRng};

/// Indexable SplitMix64 sequence rooted at a run seed.
///
/// Output `n` is the `n + 1`-th value a SplitMix64 generator started at the
/// run seed would produce, so attempt seeds can be computed in any order.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct AttemptSeeds {
    origin: u64,
}

impl AttemptSeeds {
    const GAMMA: u64 = 0x9E37_79B9_7F4A_7C15;

    const fn new(origin: u64) -> Self {
        Self { origin }
    }

    fn nth(self, attempt: usize) -> u64 {
        let step = u64::try_from(attempt)
            .unwrap_or(u64::MAX)
            .wrapping_add(1);
        finalise(self.origin.wrapping_add(step.wrapping_mul(Self::GAMMA)))
    }
}

/// SplitMix64 output function (Stafford variant 13).
const fn finalise(mut z: u64) -> u64 {
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}

/// Random stream dedicated to attempt number `attempt` of a run seeded with
/// `seed`.
pub(crate) fn attempt_rng(seed: u64, attempt: usize) -> SmallRng {
    SmallRng::seed_from_u64(AttemptSeeds::new(seed).nth(attempt))
}

/// Returns `seed` or, when absent, a fresh seed drawn from OS-backed entropy.
pub(crate) fn resolve_seed(seed: Option<u64>) -> u64 {
    seed.unwrap_or_else(rand::random)
}
