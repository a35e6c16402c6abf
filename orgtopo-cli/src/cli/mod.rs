//! Command-line interface orchestration for orgtopo.
//!
//! The `run` command samples a corpus for one topology, writes the dataset
//! table, and optionally renders every accepted sample.

mod commands;

pub use commands::{
    Cli, CliError, Command, ExecutionSummary, RunCommand, Topology, render_summary, run_cli,
};
