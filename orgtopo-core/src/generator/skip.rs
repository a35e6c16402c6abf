//! Geometric skip sampling over a linearised pair space.
//!
//! Selecting each of `total` slots independently with probability `p` is
//! equivalent to drawing the gaps between selected slots from a geometric
//! distribution. Each gap is `⌊ln(1 − r) / ln(1 − p)⌋` for a uniform
//! `r ∈ [0, 1)`, so the cost is proportional to the number of selected slots
//! rather than to `total` (Batagelj and Brandes, 2005).

use rand::{Rng, distributions::Standard};

/// Iterator over the selected slot indices in increasing order.
pub(super) struct GeometricSkips<'r, R: ?Sized> {
    rng: &'r mut R,
    log_q: f64,
    next_base: usize,
    total: usize,
    finished: bool,
}

impl<'r, R: Rng + ?Sized> GeometricSkips<'r, R> {
    /// Creates the iterator. `probability` must lie strictly inside `(0, 1)`;
    /// callers resolve the boundaries themselves.
    pub(super) fn new(rng: &'r mut R, probability: f64, total: usize) -> Self {
        debug_assert!(
            probability > 0.0 && probability < 1.0,
            "boundary probabilities are handled by the caller"
        );
        Self {
            rng,
            log_q: (-probability).ln_1p(),
            next_base: 0,
            total,
            finished: total == 0,
        }
    }
}

impl<R: Rng + ?Sized> Iterator for GeometricSkips<'_, R> {
    type Item = usize;

    #[expect(
        clippy::float_arithmetic,
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss,
        reason = "geometric gap sampling is defined over floating-point logarithms"
    )]
    fn next(&mut self) -> Option<usize> {
        if self.finished {
            return None;
        }
        let draw: f64 = self.rng.sample(Standard);
        let gap = ((-draw).ln_1p() / self.log_q).floor();
        let remaining = self.total - self.next_base;
        if gap >= remaining as f64 {
            self.finished = true;
            return None;
        }
        let index = self.next_base + gap as usize;
        self.next_base = index + 1;
        if self.next_base >= self.total {
            self.finished = true;
        }
        Some(index)
    }
}
