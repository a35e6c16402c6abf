//! Builder utilities for configuring the sampling engine.
//!
//! Exposes the execution strategy and termination policy selection surface
//! and the validation performed before a [`Sampler`] is constructed.

use std::{
    num::NonZeroUsize,
    time::Duration,
};

use rand::Rng;

use crate::{
    Result,
    error::SamplerError,
    generator::Generator,
    graph::GraphFamily,
    rng::resolve_seed,
    sampler::Sampler,
};

/// Default number of samples in a corpus.
pub const DEFAULT_TARGET_SIZE: usize = 30;
/// Default upper bound on the node count of a sample.
pub const DEFAULT_MAX_NODES: usize = 10;
/// Default edge probability for probabilistic families.
pub const DEFAULT_EDGE_PROBABILITY: f64 = 0.5;
/// Largest node count the engine accepts.
pub const MAX_SUPPORTED_NODES: usize = 10;
/// Default number of attempts generated per parallel batch.
pub const DEFAULT_BATCH_SIZE: usize = 64;

/// Indicates how the [`Sampler`] produces candidates.
///
/// Both strategies yield the same corpus for the same seed: every attempt
/// draws from its own random stream, and candidates are offered to the
/// uniqueness check in attempt order.
///
/// # Examples
/// ```
/// use orgtopo_core::ExecutionStrategy;
///
/// let strategy = ExecutionStrategy::Sequential;
/// assert!(matches!(strategy, ExecutionStrategy::Sequential));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecutionStrategy {
    /// Generate and validate one candidate at a time on the calling thread.
    Sequential,
    /// Generate and validate batches of candidates on the rayon pool; only
    /// the uniqueness check and corpus growth stay on the calling thread.
    Parallel,
}

/// Decides when the sampling loop gives up.
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use orgtopo_core::TerminationPolicy;
///
/// let policy = TerminationPolicy::MaxAttempts(NonZeroUsize::new(1_000).expect("non-zero"));
/// assert!(policy.is_bounded());
/// assert!(!TerminationPolicy::Unbounded.is_bounded());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationPolicy {
    /// Loop until the corpus is complete. Never returns when the requested
    /// corpus cannot exist under the configured bounds.
    Unbounded,
    /// Fail with [`SamplerError::Exhausted`] after this many attempts.
    MaxAttempts(NonZeroUsize),
    /// Fail with [`SamplerError::Exhausted`] once this much wall-clock time
    /// has elapsed.
    Deadline(Duration),
}

impl TerminationPolicy {
    /// Returns whether the policy can stop an incomplete run.
    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        !matches!(self, Self::Unbounded)
    }
}

/// Validated, immutable generation parameters.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationParameters {
    family: GraphFamily,
    target_size: NonZeroUsize,
    min_class_size: usize,
    max_nodes: usize,
    edge_probability: f64,
    seed: u64,
}

impl GenerationParameters {
    /// Graph family to sample.
    #[must_use]
    pub fn family(&self) -> GraphFamily {
        self.family
    }

    /// Number of samples to collect.
    #[must_use]
    pub fn target_size(&self) -> NonZeroUsize {
        self.target_size
    }

    /// Lower node bound: per partition for bipartite graphs, per graph
    /// otherwise.
    #[must_use]
    pub fn min_class_size(&self) -> usize {
        self.min_class_size
    }

    /// Upper bound on the total node count.
    #[must_use]
    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    /// Edge probability for probabilistic families.
    #[must_use]
    pub fn edge_probability(&self) -> f64 {
        self.edge_probability
    }

    /// Seed of the run. Replaying it reproduces the corpus.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draws the shape of one attempt.
    ///
    /// Bipartite attempts draw `buyers` from `[min, max − min]` and `sellers`
    /// from `[min, max − buyers]`; other families draw the node count from
    /// `[min, max]`.
    pub fn draw<R: Rng + ?Sized>(&self, rng: &mut R) -> Generator {
        let min = self.min_class_size;
        let max = self.max_nodes;
        match self.family {
            GraphFamily::BipartiteRandom => {
                let buyers = rng.gen_range(min..=max - min);
                let sellers = rng.gen_range(min..=max - buyers);
                Generator::BipartiteRandom {
                    buyers,
                    sellers,
                    probability: self.edge_probability,
                }
            }
            GraphFamily::UniformRandomTree => Generator::UniformRandomTree {
                nodes: rng.gen_range(min..=max),
            },
            GraphFamily::DirectedRandom => Generator::DirectedRandom {
                nodes: rng.gen_range(min..=max),
                probability: self.edge_probability,
            },
        }
    }
}

/// Configures and constructs [`Sampler`] instances.
///
/// # Examples
/// ```
/// use orgtopo_core::{ExecutionStrategy, GraphFamily, SamplerBuilder};
///
/// let sampler = SamplerBuilder::new(GraphFamily::DirectedRandom)
///     .with_target_size(8)
///     .with_seed(42)
///     .with_execution_strategy(ExecutionStrategy::Sequential)
///     .build()
///     .expect("builder configuration is valid");
/// assert_eq!(sampler.parameters().target_size().get(), 8);
/// assert_eq!(sampler.parameters().seed(), 42);
/// ```
#[derive(Debug, Clone)]
pub struct SamplerBuilder {
    family: GraphFamily,
    target_size: usize,
    min_class_size: Option<usize>,
    max_nodes: usize,
    edge_probability: f64,
    seed: Option<u64>,
    execution_strategy: ExecutionStrategy,
    termination: TerminationPolicy,
    batch_size: usize,
}

impl SamplerBuilder {
    /// Creates a builder for `family` populated with default parameters.
    ///
    /// # Examples
    /// ```
    /// use orgtopo_core::{GraphFamily, SamplerBuilder, TerminationPolicy};
    ///
    /// let builder = SamplerBuilder::new(GraphFamily::BipartiteRandom);
    /// assert_eq!(builder.target_size(), 30);
    /// assert_eq!(builder.min_class_size(), 1);
    /// assert_eq!(builder.max_nodes(), 10);
    /// assert_eq!(builder.termination(), TerminationPolicy::Unbounded);
    /// ```
    #[must_use]
    pub fn new(family: GraphFamily) -> Self {
        Self {
            family,
            target_size: DEFAULT_TARGET_SIZE,
            min_class_size: None,
            max_nodes: DEFAULT_MAX_NODES,
            edge_probability: DEFAULT_EDGE_PROBABILITY,
            seed: None,
            execution_strategy: ExecutionStrategy::Sequential,
            termination: TerminationPolicy::Unbounded,
            batch_size: DEFAULT_BATCH_SIZE,
        }
    }

    /// Overrides the number of samples to collect.
    #[must_use]
    pub fn with_target_size(mut self, size: usize) -> Self {
        self.target_size = size;
        self
    }

    /// Returns the configured target size.
    #[must_use]
    pub fn target_size(&self) -> usize {
        self.target_size
    }

    /// Overrides the lower node bound (per partition for bipartite graphs).
    #[must_use]
    pub fn with_min_class_size(mut self, size: usize) -> Self {
        self.min_class_size = Some(size);
        self
    }

    /// Returns the configured lower node bound, or the family default.
    #[must_use]
    pub fn min_class_size(&self) -> usize {
        self.min_class_size
            .unwrap_or_else(|| self.family.min_class_floor())
    }

    /// Overrides the upper bound on the total node count.
    #[must_use]
    pub fn with_max_nodes(mut self, nodes: usize) -> Self {
        self.max_nodes = nodes;
        self
    }

    /// Returns the configured upper node bound.
    #[must_use]
    pub fn max_nodes(&self) -> usize {
        self.max_nodes
    }

    /// Overrides the edge probability.
    #[must_use]
    pub fn with_edge_probability(mut self, probability: f64) -> Self {
        self.edge_probability = probability;
        self
    }

    /// Returns the configured edge probability.
    #[must_use]
    pub fn edge_probability(&self) -> f64 {
        self.edge_probability
    }

    /// Fixes the run seed. Without one, a seed is drawn from OS entropy at
    /// build time and exposed through [`GenerationParameters::seed`].
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Sets an optional seed, as parsed from configuration.
    #[must_use]
    pub fn with_optional_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    /// Sets the execution strategy.
    #[must_use]
    pub fn with_execution_strategy(mut self, strategy: ExecutionStrategy) -> Self {
        self.execution_strategy = strategy;
        self
    }

    /// Returns the configured execution strategy.
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Sets the termination policy.
    #[must_use]
    pub fn with_termination(mut self, policy: TerminationPolicy) -> Self {
        self.termination = policy;
        self
    }

    /// Returns the configured termination policy.
    #[must_use]
    pub fn termination(&self) -> TerminationPolicy {
        self.termination
    }

    /// Sets how many attempts each parallel batch contains.
    #[must_use]
    pub fn with_batch_size(mut self, size: usize) -> Self {
        self.batch_size = size;
        self
    }

    /// Validates the configuration and constructs a [`Sampler`].
    ///
    /// # Errors
    /// Returns a configuration error ([`SamplerError::InvalidTargetSize`],
    /// [`SamplerError::InvalidProbability`],
    /// [`SamplerError::InvalidNodeBounds`],
    /// [`SamplerError::NodeLimitExceeded`], [`SamplerError::InvalidBatchSize`],
    /// or [`SamplerError::BackendUnavailable`]) when a parameter is out of
    /// range.
    ///
    /// # Examples
    /// ```
    /// use orgtopo_core::{GraphFamily, SamplerBuilder, SamplerError};
    ///
    /// let err = SamplerBuilder::new(GraphFamily::BipartiteRandom)
    ///     .with_min_class_size(6)
    ///     .build()
    ///     .unwrap_err();
    /// assert!(matches!(err, SamplerError::InvalidNodeBounds { min: 6, max: 10, .. }));
    /// ```
    pub fn build(self) -> Result<Sampler> {
        let target_size = NonZeroUsize::new(self.target_size).ok_or(
            SamplerError::InvalidTargetSize {
                got: self.target_size,
            },
        )?;
        if !(0.0..=1.0).contains(&self.edge_probability) {
            return Err(SamplerError::InvalidProbability {
                got: self.edge_probability,
            });
        }
        if self.max_nodes > MAX_SUPPORTED_NODES {
            return Err(SamplerError::NodeLimitExceeded {
                max: self.max_nodes,
                limit: MAX_SUPPORTED_NODES,
            });
        }
        let min_class_size = self.min_class_size();
        self.validate_node_bounds(min_class_size)?;
        let batch_size = NonZeroUsize::new(self.batch_size).ok_or(SamplerError::InvalidBatchSize)?;
        ensure_strategy_available(self.execution_strategy)?;

        let parameters = GenerationParameters {
            family: self.family,
            target_size,
            min_class_size,
            max_nodes: self.max_nodes,
            edge_probability: self.edge_probability,
            seed: resolve_seed(self.seed),
        };
        Ok(Sampler::new(
            parameters,
            self.execution_strategy,
            self.termination,
            batch_size,
        ))
    }

    fn validate_node_bounds(&self, min: usize) -> Result<()> {
        let max = self.max_nodes;
        let fits = match self.family {
            GraphFamily::BipartiteRandom => {
                min >= self.family.min_class_floor() && min.saturating_mul(2) <= max
            }
            GraphFamily::UniformRandomTree | GraphFamily::DirectedRandom => {
                min >= self.family.min_class_floor() && min <= max
            }
        };
        if fits {
            Ok(())
        } else {
            Err(SamplerError::InvalidNodeBounds {
                family: self.family,
                min,
                max,
            })
        }
    }
}

#[cfg(feature = "parallel")]
fn ensure_strategy_available(_strategy: ExecutionStrategy) -> Result<()> {
    Ok(())
}

#[cfg(not(feature = "parallel"))]
fn ensure_strategy_available(strategy: ExecutionStrategy) -> Result<()> {
    match strategy {
        ExecutionStrategy::Sequential => Ok(()),
        ExecutionStrategy::Parallel => Err(SamplerError::BackendUnavailable {
            requested: ExecutionStrategy::Parallel,
        }),
    }
}
