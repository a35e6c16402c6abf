//! Orgtopo core library.
//!
//! Generates corpora of small random organisational graphs: bipartite
//! buyer/seller markets, uniform random trees, and directed random graphs.
//! Every corpus member is valid for its family and structurally unique.
#![cfg_attr(docsrs, feature(doc_cfg))]

mod builder;
mod corpus;
mod error;
pub mod generator;
mod graph;
pub mod isomorphism;
mod metric;
mod record;
mod rng;
mod sampler;
mod union_find;
pub mod validity;

pub use crate::{
    builder::{
        DEFAULT_EDGE_PROBABILITY, DEFAULT_MAX_NODES, DEFAULT_TARGET_SIZE, ExecutionStrategy,
        GenerationParameters, MAX_SUPPORTED_NODES, SamplerBuilder, TerminationPolicy,
    },
    corpus::Corpus,
    error::{
        GenerationError, GenerationErrorCode, GraphError, GraphErrorCode, MetricError,
        MetricErrorCode, ObserverError, Result, SamplerError, SamplerErrorCode,
    },
    graph::{Directedness, Graph, GraphFamily, NodeId, Partition},
    metric::coupling_factor,
    record::SampleRecord,
    sampler::{AcceptanceObserver, Sampler, SamplingOutcome, SamplingStats},
};
