//! Benchmark support crate for orgtopo.
//!
//! Provides the parameter types Criterion benchmarks use to label the
//! generator and sampling runs.

use std::fmt;

use orgtopo_core::GraphFamily;

/// Parameters for a single-generator benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct GeneratorBenchParams {
    /// Total node count of the generated graph.
    pub nodes: usize,
    /// Edge probability, ignored by trees.
    pub probability: f64,
}

impl fmt::Display for GeneratorBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "n={},p={}", self.nodes, self.probability)
    }
}

/// Parameters for a full sampling benchmark run.
#[derive(Clone, Copy, Debug)]
pub struct SamplingBenchParams {
    /// Family being sampled.
    pub family: GraphFamily,
    /// Number of samples collected per iteration.
    pub target: usize,
}

impl fmt::Display for SamplingBenchParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},target={}", self.family, self.target)
    }
}
