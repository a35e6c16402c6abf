//! Rejection-sampling engine that grows a corpus of unique, valid graphs.
//!
//! Each attempt draws a generator shape, generates a candidate, filters it
//! for validity, and offers it to the corpus, which rejects isomorphic
//! duplicates. The loop ends when the corpus is complete or the
//! [`TerminationPolicy`] fires.

use std::{
    num::NonZeroUsize,
    sync::Arc,
    time::{Duration, Instant},
};

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, info, instrument, trace, warn};

use crate::{
    Result,
    builder::{ExecutionStrategy, GenerationParameters, TerminationPolicy},
    corpus::Corpus,
    error::{ObserverError, SamplerError},
    graph::Graph,
    record::SampleRecord,
    rng::attempt_rng,
    validity::is_valid,
};

/// Receives every sample at the moment it joins the corpus.
///
/// Observers run on the calling thread, in acceptance order. An observer
/// error aborts the run with [`SamplerError::Observer`].
///
/// # Examples
/// ```
/// use std::num::NonZeroUsize;
/// use orgtopo_core::{AcceptanceObserver, Graph, GraphFamily, ObserverError, SamplerBuilder};
///
/// #[derive(Default)]
/// struct EdgeTally(usize);
///
/// impl AcceptanceObserver for EdgeTally {
///     fn sample_accepted(&mut self, _: NonZeroUsize, graph: &Graph) -> Result<(), ObserverError> {
///         self.0 += graph.edge_count();
///         Ok(())
///     }
/// }
///
/// let sampler = SamplerBuilder::new(GraphFamily::UniformRandomTree)
///     .with_target_size(3)
///     .with_seed(5)
///     .build()?;
/// let mut tally = EdgeTally::default();
/// let outcome = sampler.run_with_observer(&mut tally)?;
/// let edges: usize = outcome.corpus().samples().map(Graph::edge_count).sum();
/// assert_eq!(tally.0, edges);
/// # Ok::<(), orgtopo_core::SamplerError>(())
/// ```
pub trait AcceptanceObserver {
    /// Called once per accepted sample with its 1-based ordinal.
    ///
    /// # Errors
    /// Implementations return an error to abort the run.
    fn sample_accepted(
        &mut self,
        ordinal: NonZeroUsize,
        graph: &Graph,
    ) -> core::result::Result<(), ObserverError>;
}

impl AcceptanceObserver for () {
    fn sample_accepted(
        &mut self,
        _: NonZeroUsize,
        _: &Graph,
    ) -> core::result::Result<(), ObserverError> {
        Ok(())
    }
}

impl<O: AcceptanceObserver + ?Sized> AcceptanceObserver for &mut O {
    fn sample_accepted(
        &mut self,
        ordinal: NonZeroUsize,
        graph: &Graph,
    ) -> core::result::Result<(), ObserverError> {
        (**self).sample_accepted(ordinal, graph)
    }
}

/// Counters describing how a run spent its attempts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SamplingStats {
    attempts: usize,
    invalid: usize,
    duplicates: usize,
}

impl SamplingStats {
    /// Attempts consumed, accepted or not.
    #[must_use]
    pub fn attempts(&self) -> usize {
        self.attempts
    }

    /// Candidates discarded by the validity filter or the generator.
    #[must_use]
    pub fn invalid(&self) -> usize {
        self.invalid
    }

    /// Candidates discarded as isomorphic to an accepted sample.
    #[must_use]
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    /// Candidates that joined the corpus.
    #[must_use]
    pub fn accepted(&self) -> usize {
        self.attempts - self.invalid - self.duplicates
    }
}

/// Result of a completed run.
#[derive(Clone, Debug)]
pub struct SamplingOutcome {
    corpus: Corpus,
    stats: SamplingStats,
    seed: u64,
    elapsed: Duration,
}

impl SamplingOutcome {
    /// The completed corpus.
    #[must_use]
    pub fn corpus(&self) -> &Corpus {
        &self.corpus
    }

    /// Consumes the outcome, returning the corpus.
    #[must_use]
    pub fn into_corpus(self) -> Corpus {
        self.corpus
    }

    /// Attempt counters.
    #[must_use]
    pub fn stats(&self) -> SamplingStats {
        self.stats
    }

    /// Seed the run used; replaying it reproduces the corpus.
    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Wall-clock duration of the run.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }

    /// Computes the per-sample records of the corpus.
    ///
    /// # Errors
    /// Returns [`SamplerError::Metric`] when a coupling factor is undefined.
    pub fn records(&self) -> Result<Vec<SampleRecord>> {
        Ok(self.corpus.records()?)
    }
}

enum Candidate {
    Rejected,
    Valid(Graph),
}

/// Configured sampling engine. Construct it with [`crate::SamplerBuilder`].
#[derive(Debug, Clone)]
pub struct Sampler {
    parameters: GenerationParameters,
    execution_strategy: ExecutionStrategy,
    termination: TerminationPolicy,
    batch_size: NonZeroUsize,
}

struct RunState<O> {
    corpus: Corpus,
    stats: SamplingStats,
    started: Instant,
    observer: O,
}

impl Sampler {
    pub(crate) fn new(
        parameters: GenerationParameters,
        execution_strategy: ExecutionStrategy,
        termination: TerminationPolicy,
        batch_size: NonZeroUsize,
    ) -> Self {
        Self {
            parameters,
            execution_strategy,
            termination,
            batch_size,
        }
    }

    /// Validated generation parameters, including the resolved seed.
    #[must_use]
    pub fn parameters(&self) -> &GenerationParameters {
        &self.parameters
    }

    /// Execution strategy used by [`Sampler::run`].
    #[must_use]
    pub fn execution_strategy(&self) -> ExecutionStrategy {
        self.execution_strategy
    }

    /// Termination policy used by [`Sampler::run`].
    #[must_use]
    pub fn termination(&self) -> TerminationPolicy {
        self.termination
    }

    /// Samples until the corpus reaches its target size.
    ///
    /// # Errors
    /// Returns [`SamplerError::Exhausted`] when a bounded termination policy
    /// fires first.
    ///
    /// # Examples
    /// ```
    /// use orgtopo_core::{GraphFamily, SamplerBuilder};
    ///
    /// let outcome = SamplerBuilder::new(GraphFamily::BipartiteRandom)
    ///     .with_target_size(4)
    ///     .with_seed(17)
    ///     .build()?
    ///     .run()?;
    /// assert_eq!(outcome.corpus().len(), 4);
    /// assert_eq!(outcome.seed(), 17);
    /// # Ok::<(), orgtopo_core::SamplerError>(())
    /// ```
    pub fn run(&self) -> Result<SamplingOutcome> {
        self.run_with_observer(())
    }

    /// Samples like [`Sampler::run`], reporting each acceptance to
    /// `observer`.
    ///
    /// # Errors
    /// Returns [`SamplerError::Exhausted`] when a bounded termination policy
    /// fires first and [`SamplerError::Observer`] when the observer fails.
    #[instrument(
        name = "core.sample",
        err,
        skip(self, observer),
        fields(
            family = %self.parameters.family(),
            target = self.parameters.target_size().get(),
            seed = self.parameters.seed(),
            strategy = ?self.execution_strategy,
        ),
    )]
    pub fn run_with_observer<O: AcceptanceObserver>(&self, observer: O) -> Result<SamplingOutcome> {
        let mut state = RunState {
            corpus: Corpus::new(self.parameters.family(), self.parameters.target_size()),
            stats: SamplingStats::default(),
            started: Instant::now(),
            observer,
        };
        match self.execution_strategy {
            ExecutionStrategy::Sequential => self.run_sequential(&mut state)?,
            #[cfg(feature = "parallel")]
            ExecutionStrategy::Parallel => self.run_parallel(&mut state)?,
            #[cfg(not(feature = "parallel"))]
            ExecutionStrategy::Parallel => {
                return Err(SamplerError::BackendUnavailable {
                    requested: ExecutionStrategy::Parallel,
                });
            }
        }
        let elapsed = state.started.elapsed();
        info!(
            accepted = state.corpus.len(),
            attempts = state.stats.attempts,
            invalid = state.stats.invalid,
            duplicates = state.stats.duplicates,
            elapsed_ms = elapsed.as_millis(),
            "corpus complete"
        );
        Ok(SamplingOutcome {
            corpus: state.corpus,
            stats: state.stats,
            seed: self.parameters.seed(),
            elapsed,
        })
    }

    fn run_sequential<O: AcceptanceObserver>(&self, state: &mut RunState<O>) -> Result<()> {
        while !state.corpus.is_complete() {
            self.check_budget(state)?;
            let attempt = state.stats.attempts;
            let candidate = self.attempt(attempt);
            self.offer(state, attempt, candidate)?;
        }
        Ok(())
    }

    #[cfg(feature = "parallel")]
    fn run_parallel<O: AcceptanceObserver>(&self, state: &mut RunState<O>) -> Result<()> {
        while !state.corpus.is_complete() {
            self.check_budget(state)?;
            let start = state.stats.attempts;
            let len = self.next_batch_len(start);
            let batch = self.generate_batch(start, len);
            for (attempt, candidate) in (start..).zip(batch) {
                if state.corpus.is_complete() {
                    break;
                }
                self.offer(state, attempt, candidate)?;
            }
        }
        Ok(())
    }

    #[cfg(feature = "parallel")]
    fn next_batch_len(&self, start: usize) -> usize {
        let len = self.batch_size.get();
        match self.termination {
            TerminationPolicy::MaxAttempts(max) => len.min(max.get().saturating_sub(start)),
            TerminationPolicy::Unbounded | TerminationPolicy::Deadline(_) => len,
        }
    }

    #[cfg(feature = "parallel")]
    #[instrument(name = "core.generate_batch", level = "debug", skip(self))]
    fn generate_batch(&self, start: usize, len: usize) -> Vec<Candidate> {
        (start..start + len)
            .into_par_iter()
            .map(|attempt| self.attempt(attempt))
            .collect()
    }

    /// Generates and validates the candidate of one attempt.
    fn attempt(&self, attempt: usize) -> Candidate {
        let mut rng = attempt_rng(self.parameters.seed(), attempt);
        let generator = self.parameters.draw(&mut rng);
        match generator.generate(&mut rng) {
            Ok(graph) if is_valid(&graph, self.parameters.family()) => Candidate::Valid(graph),
            Ok(graph) => {
                trace!(
                    attempt,
                    nodes = graph.node_count(),
                    edges = graph.edge_count(),
                    "candidate failed the validity filter"
                );
                Candidate::Rejected
            }
            Err(error) => {
                debug!(attempt, code = %error.code(), %error, "generator rejected the draw");
                Candidate::Rejected
            }
        }
    }

    fn offer<O: AcceptanceObserver>(
        &self,
        state: &mut RunState<O>,
        attempt: usize,
        candidate: Candidate,
    ) -> Result<()> {
        state.stats.attempts += 1;
        let graph = match candidate {
            Candidate::Valid(graph) => graph,
            Candidate::Rejected => {
                state.stats.invalid += 1;
                return Ok(());
            }
        };
        match state.corpus.try_accept(graph) {
            Ok(ordinal) => {
                let Some(accepted) = state.corpus.get(ordinal) else {
                    return Ok(());
                };
                info!(
                    ordinal = ordinal.get(),
                    attempt,
                    nodes = accepted.node_count(),
                    edges = accepted.edge_count(),
                    "sample accepted"
                );
                state
                    .observer
                    .sample_accepted(ordinal, accepted)
                    .map_err(|source| SamplerError::Observer {
                        ordinal: ordinal.get(),
                        source: Arc::from(source),
                    })
            }
            Err(existing) => {
                state.stats.duplicates += 1;
                debug!(
                    attempt,
                    duplicate_of = existing.get(),
                    "candidate is isomorphic to an accepted sample"
                );
                Ok(())
            }
        }
    }

    fn check_budget<O>(&self, state: &RunState<O>) -> Result<()> {
        let exhausted = match self.termination {
            TerminationPolicy::Unbounded => false,
            TerminationPolicy::MaxAttempts(max) => state.stats.attempts >= max.get(),
            TerminationPolicy::Deadline(limit) => state.started.elapsed() >= limit,
        };
        if !exhausted {
            return Ok(());
        }
        let error = SamplerError::Exhausted {
            accepted: state.corpus.len(),
            target: self.parameters.target_size().get(),
            attempts: state.stats.attempts,
        };
        warn!(
            accepted = state.corpus.len(),
            attempts = state.stats.attempts,
            policy = ?self.termination,
            "termination policy stopped an incomplete run"
        );
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use rstest::rstest;

    use crate::{builder::SamplerBuilder, graph::GraphFamily};

    struct Failing;

    impl AcceptanceObserver for Failing {
        fn sample_accepted(
            &mut self,
            _: NonZeroUsize,
            _: &Graph,
        ) -> core::result::Result<(), ObserverError> {
            Err("disk full".into())
        }
    }

    #[rstest]
    fn observer_failure_aborts_the_run() {
        let sampler = SamplerBuilder::new(GraphFamily::DirectedRandom)
            .with_target_size(2)
            .with_seed(3)
            .build()
            .expect("configuration is valid");
        let err = sampler
            .run_with_observer(Failing)
            .expect_err("observer error must propagate");
        assert!(matches!(err, SamplerError::Observer { ordinal: 1, .. }));
        assert_eq!(err.code().as_str(), "SAMPLER_OBSERVER_FAILURE");
    }

    #[rstest]
    fn stats_account_for_every_attempt() {
        let outcome = SamplerBuilder::new(GraphFamily::BipartiteRandom)
            .with_target_size(6)
            .with_seed(8)
            .build()
            .expect("configuration is valid")
            .run()
            .expect("six bipartite samples exist");
        let stats = outcome.stats();
        assert_eq!(stats.accepted(), 6);
        assert_eq!(
            stats.attempts(),
            stats.accepted() + stats.invalid() + stats.duplicates()
        );
    }

    #[rstest]
    fn zero_deadline_exhausts_immediately() {
        let err = SamplerBuilder::new(GraphFamily::DirectedRandom)
            .with_target_size(1)
            .with_seed(3)
            .with_termination(TerminationPolicy::Deadline(Duration::ZERO))
            .build()
            .expect("configuration is valid")
            .run()
            .expect_err("no time to sample");
        assert!(matches!(
            err,
            SamplerError::Exhausted {
                accepted: 0,
                target: 1,
                attempts: 0
            }
        ));
    }
}
