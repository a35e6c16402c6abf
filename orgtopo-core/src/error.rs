//! Error types for the orgtopo core library.
//!
//! Defines error enums exposed by the public API, their stable
//! machine-readable codes, and a convenient result alias.

use std::{error::Error as StdError, fmt, sync::Arc};

use thiserror::Error;

use crate::{builder::ExecutionStrategy, graph::GraphFamily};

macro_rules! define_error_codes {
    (
        $(#[$enum_meta:meta])*
        enum $CodeTy:ident for $ErrTy:ident {
            $(
                $(#[$variant_meta:meta])*
                $CodeVariant:ident => $ErrVariant:ident $( { $($pattern:tt)* } )? => $code:expr
            ),+ $(,)?
        }
    ) => {
        $(#[$enum_meta])*
        #[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
        #[non_exhaustive]
        pub enum $CodeTy {
            $(
                $(#[$variant_meta])*
                $CodeVariant,
            )+
        }

        impl $CodeTy {
            /// Return the stable machine-readable representation of this error code.
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$CodeVariant => $code,)+
                }
            }
        }

        impl fmt::Display for $CodeTy {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $ErrTy {
            #[doc = concat!(
                "Retrieve the stable [`",
                stringify!($CodeTy),
                "`] for this error."
            )]
            pub const fn code(&self) -> $CodeTy {
                match self {
                    $(Self::$ErrVariant $( { $($pattern)* } )? => $CodeTy::$CodeVariant,)+
                }
            }
        }
    };
}

/// An error produced when assembling a [`crate::Graph`] from raw parts.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GraphError {
    /// An edge referenced a node outside `0..node_count`.
    #[error("edge endpoint {node} is outside the node range 0..{node_count}")]
    NodeOutOfRange {
        /// The offending endpoint.
        node: usize,
        /// Number of nodes in the graph.
        node_count: usize,
    },
    /// An edge joined a node to itself.
    #[error("self-loop on node {node} is not permitted")]
    SelfLoop {
        /// Node carrying the loop.
        node: usize,
    },
    /// The partition map did not cover every node exactly once.
    #[error("partition map has {actual} labels but the graph has {expected} nodes")]
    PartitionLengthMismatch {
        /// Number of nodes in the graph.
        expected: usize,
        /// Number of labels supplied.
        actual: usize,
    },
    /// An edge joined two nodes of the same partition.
    #[error("edge {source_node}->{target_node} stays inside one partition")]
    SamePartitionEdge {
        /// Tail of the offending edge.
        source_node: usize,
        /// Head of the offending edge.
        target_node: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GraphError`] variants.
    enum GraphErrorCode for GraphError {
        /// An edge referenced a node outside `0..node_count`.
        NodeOutOfRange => NodeOutOfRange { .. } => "GRAPH_NODE_OUT_OF_RANGE",
        /// An edge joined a node to itself.
        SelfLoop => SelfLoop { .. } => "GRAPH_SELF_LOOP",
        /// The partition map did not cover every node exactly once.
        PartitionLengthMismatch => PartitionLengthMismatch { .. } => "GRAPH_PARTITION_LENGTH_MISMATCH",
        /// An edge joined two nodes of the same partition.
        SamePartitionEdge => SamePartitionEdge { .. } => "GRAPH_SAME_PARTITION_EDGE",
    }
}

/// An error produced by a single generator call.
#[non_exhaustive]
#[derive(Clone, Debug, Eq, Error, PartialEq)]
pub enum GenerationError {
    /// The null graph is not a tree.
    #[error("the null graph is not a tree")]
    EmptyTree,
    /// A Prüfer sequence contained a label outside `0..node_count`.
    #[error("Prüfer label {label} is outside the node range 0..{node_count}")]
    InvalidPruferLabel {
        /// The offending label.
        label: usize,
        /// Number of nodes implied by the sequence length.
        node_count: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`GenerationError`] variants.
    enum GenerationErrorCode for GenerationError {
        /// The null graph is not a tree.
        EmptyTree => EmptyTree => "GENERATION_EMPTY_TREE",
        /// A Prüfer sequence contained a label outside `0..node_count`.
        InvalidPruferLabel => InvalidPruferLabel { .. } => "GENERATION_INVALID_PRUFER_LABEL",
    }
}

/// An error produced when computing a metric outside its domain.
#[non_exhaustive]
#[derive(Clone, Copy, Debug, Eq, Error, PartialEq)]
pub enum MetricError {
    /// The coupling factor needs at least two nodes.
    #[error("coupling factor is undefined for {nodes} node(s); at least 2 are required")]
    TooFewNodes {
        /// Node count of the offending graph.
        nodes: usize,
    },
}

define_error_codes! {
    /// Stable codes describing [`MetricError`] variants.
    enum MetricErrorCode for MetricError {
        /// The coupling factor needs at least two nodes.
        TooFewNodes => TooFewNodes { .. } => "METRIC_TOO_FEW_NODES",
    }
}

/// Boxed error returned by [`crate::AcceptanceObserver`] implementations.
pub type ObserverError = Box<dyn StdError + Send + Sync + 'static>;

/// Error type produced when configuring or running a [`crate::Sampler`].
#[non_exhaustive]
#[derive(Clone, Debug, Error)]
pub enum SamplerError {
    /// The target corpus size must be at least one.
    #[error("target corpus size must be at least 1 (got {got})")]
    InvalidTargetSize {
        /// The invalid target size supplied by the caller.
        got: usize,
    },
    /// Edge probability must be a finite value in `[0, 1]`.
    #[error("edge probability must lie in [0, 1] (got {got})")]
    InvalidProbability {
        /// The invalid probability supplied by the caller.
        got: f64,
    },
    /// Node-count bounds cannot be satisfied for the family.
    #[error("node bounds min={min} max={max} are invalid for the {family} family")]
    InvalidNodeBounds {
        /// Family whose constraints were violated.
        family: GraphFamily,
        /// Configured minimum class size.
        min: usize,
        /// Configured maximum node count.
        max: usize,
    },
    /// The maximum node count exceeds what the isomorphism oracle supports.
    #[error("max node count {max} exceeds the supported limit of {limit}")]
    NodeLimitExceeded {
        /// Configured maximum node count.
        max: usize,
        /// Largest supported node count.
        limit: usize,
    },
    /// Parallel batches must contain at least one attempt.
    #[error("parallel batch size must be at least 1")]
    InvalidBatchSize,
    /// The requested execution strategy is unavailable in the current build.
    #[error("the requested execution strategy {requested:?} is not available in this build")]
    BackendUnavailable {
        /// Strategy that could not be satisfied by the current build.
        requested: ExecutionStrategy,
    },
    /// The termination policy stopped the loop before the corpus filled up.
    #[error(
        "sampling exhausted after {attempts} attempts with {accepted} of {target} samples accepted"
    )]
    Exhausted {
        /// Samples accepted before the policy fired.
        accepted: usize,
        /// Requested corpus size.
        target: usize,
        /// Attempts consumed.
        attempts: usize,
    },
    /// A metric could not be computed for an accepted sample.
    #[error(transparent)]
    Metric(#[from] MetricError),
    /// The acceptance observer failed.
    #[error("acceptance observer failed on sample {ordinal}: {source}")]
    Observer {
        /// Ordinal of the sample being observed.
        ordinal: usize,
        #[source]
        /// Error raised by the observer.
        source: Arc<dyn StdError + Send + Sync + 'static>,
    },
}

define_error_codes! {
    /// Stable codes describing [`SamplerError`] variants.
    enum SamplerErrorCode for SamplerError {
        /// The target corpus size must be at least one.
        InvalidTargetSize => InvalidTargetSize { .. } => "SAMPLER_INVALID_TARGET_SIZE",
        /// Edge probability must be a finite value in `[0, 1]`.
        InvalidProbability => InvalidProbability { .. } => "SAMPLER_INVALID_PROBABILITY",
        /// Node-count bounds cannot be satisfied for the family.
        InvalidNodeBounds => InvalidNodeBounds { .. } => "SAMPLER_INVALID_NODE_BOUNDS",
        /// The maximum node count exceeds what the isomorphism oracle supports.
        NodeLimitExceeded => NodeLimitExceeded { .. } => "SAMPLER_NODE_LIMIT_EXCEEDED",
        /// Parallel batches must contain at least one attempt.
        InvalidBatchSize => InvalidBatchSize => "SAMPLER_INVALID_BATCH_SIZE",
        /// The requested execution strategy is unavailable in the current build.
        BackendUnavailable => BackendUnavailable { .. } => "SAMPLER_BACKEND_UNAVAILABLE",
        /// The termination policy stopped the loop before the corpus filled up.
        Exhausted => Exhausted { .. } => "SAMPLER_EXHAUSTED",
        /// A metric could not be computed for an accepted sample.
        MetricFailure => Metric { .. } => "SAMPLER_METRIC_FAILURE",
        /// The acceptance observer failed.
        ObserverFailure => Observer { .. } => "SAMPLER_OBSERVER_FAILURE",
    }
}

impl SamplerError {
    /// Retrieve the inner [`MetricErrorCode`] when the error originated in a
    /// metric computation.
    pub const fn metric_code(&self) -> Option<MetricErrorCode> {
        match self {
            Self::Metric(error) => Some(error.code()),
            _ => None,
        }
    }

    /// Returns whether the error was raised before sampling began.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::InvalidTargetSize { .. }
                | Self::InvalidProbability { .. }
                | Self::InvalidNodeBounds { .. }
                | Self::NodeLimitExceeded { .. }
                | Self::InvalidBatchSize
                | Self::BackendUnavailable { .. }
        )
    }
}

/// Convenient alias for results returned by the core API.
pub type Result<T> = core::result::Result<T, SamplerError>;
