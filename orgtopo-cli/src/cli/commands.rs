//! Command implementations and argument parsing for the orgtopo CLI.

use std::io::{self, Write};
use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use orgtopo_core::{
    DEFAULT_EDGE_PROBABILITY, DEFAULT_MAX_NODES, DEFAULT_TARGET_SIZE, ExecutionStrategy,
    GraphFamily, SampleRecord, SamplerBuilder, SamplerError, SamplingOutcome, SamplingStats,
    TerminationPolicy,
};
use orgtopo_export::{DotRenderer, ExportError, OutputLayout, bootstrap_dir, write_dataset};
use thiserror::Error;
use tracing::{Span, field, info, instrument};

const DEFAULT_DATA_PATH: &str = "./data";
const DEFAULT_PLOT_ROOT: &str = "./plots";

/// Top-level CLI options parsed by [`clap`].
#[derive(Debug, Parser, Clone)]
#[command(
    name = "orgtopo",
    about = "Generate corpora of unique random organisational graphs."
)]
pub struct Cli {
    /// Command to execute.
    #[command(subcommand)]
    pub command: Command,
}

/// Supported CLI commands.
#[derive(Debug, Subcommand, Clone)]
pub enum Command {
    /// Sample a corpus for one topology and export it.
    Run(RunCommand),
}

/// Named organisational topologies, each backed by a graph family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Topology {
    /// Buyer/seller market as a bipartite random graph.
    Market,
    /// Federation of members and services as a bipartite random graph.
    Federation,
    /// Reporting hierarchy as a uniform random tree.
    Hierarchy,
    /// Team collaboration as a directed random graph.
    Team,
}

impl Topology {
    /// Graph family sampled for this topology.
    #[must_use]
    pub const fn family(self) -> GraphFamily {
        match self {
            Self::Market | Self::Federation => GraphFamily::BipartiteRandom,
            Self::Hierarchy => GraphFamily::UniformRandomTree,
            Self::Team => GraphFamily::DirectedRandom,
        }
    }

    /// File stem shared by the dataset and the rendered graphs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Market => "market",
            Self::Federation => "federation",
            Self::Hierarchy => "hierarchy",
            Self::Team => "team",
        }
    }
}

/// Options accepted by the `run` command.
#[derive(Debug, Args, Clone)]
pub struct RunCommand {
    /// Topology to sample.
    #[arg(value_enum)]
    pub topology: Topology,

    /// Number of unique samples to collect.
    #[arg(long, default_value_t = DEFAULT_TARGET_SIZE)]
    pub samples: usize,

    /// Lower node bound: per partition for bipartite topologies, per graph
    /// otherwise. Defaults to 1 for bipartite topologies and 2 elsewhere.
    #[arg(long = "min-class-size")]
    pub min_class_size: Option<usize>,

    /// Upper bound on the node count of each sample.
    #[arg(long = "max-nodes", default_value_t = DEFAULT_MAX_NODES)]
    pub max_nodes: usize,

    /// Edge probability for bipartite and directed topologies.
    #[arg(long, default_value_t = DEFAULT_EDGE_PROBABILITY)]
    pub probability: f64,

    /// Seed for a reproducible run; drawn from OS entropy when omitted.
    #[arg(long)]
    pub seed: Option<u64>,

    /// Render one Graphviz document per accepted sample.
    #[arg(long)]
    pub graphic: bool,

    /// Directory receiving `<topology>.csv`.
    #[arg(long = "data-path", default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,

    /// Directory receiving rendered graphs; defaults to `./plots/<topology>`.
    #[arg(long = "plot-path")]
    pub plot_path: Option<PathBuf>,

    /// Give up after this many attempts.
    #[arg(long = "max-attempts", conflicts_with = "timeout_secs")]
    pub max_attempts: Option<NonZeroUsize>,

    /// Give up after this many seconds.
    #[arg(long = "timeout-secs")]
    pub timeout_secs: Option<u64>,

    /// Generate and validate candidates on all cores.
    #[arg(long)]
    pub parallel: bool,
}

impl RunCommand {
    /// Builds a command with default options for `topology`.
    #[must_use]
    pub fn new(topology: Topology) -> Self {
        Self {
            topology,
            samples: DEFAULT_TARGET_SIZE,
            min_class_size: None,
            max_nodes: DEFAULT_MAX_NODES,
            probability: DEFAULT_EDGE_PROBABILITY,
            seed: None,
            graphic: false,
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            plot_path: None,
            max_attempts: None,
            timeout_secs: None,
            parallel: false,
        }
    }

    fn termination(&self) -> TerminationPolicy {
        match (self.max_attempts, self.timeout_secs) {
            (Some(attempts), _) => TerminationPolicy::MaxAttempts(attempts),
            (None, Some(secs)) => TerminationPolicy::Deadline(Duration::from_secs(secs)),
            (None, None) => TerminationPolicy::Unbounded,
        }
    }

    fn output_layout(&self) -> OutputLayout {
        let stem = self.topology.name();
        let plot_dir = self
            .plot_path
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_PLOT_ROOT).join(stem));
        OutputLayout::new(self.data_path.clone(), plot_dir, stem)
    }

    fn sampler_builder(&self) -> SamplerBuilder {
        let builder = SamplerBuilder::new(self.topology.family())
            .with_target_size(self.samples)
            .with_max_nodes(self.max_nodes)
            .with_edge_probability(self.probability)
            .with_optional_seed(self.seed)
            .with_termination(self.termination())
            .with_execution_strategy(if self.parallel {
                ExecutionStrategy::Parallel
            } else {
                ExecutionStrategy::Sequential
            });
        match self.min_class_size {
            Some(min) => builder.with_min_class_size(min),
            None => builder,
        }
    }
}

/// Errors surfaced while executing CLI commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Sampling failed or was misconfigured.
    #[error(transparent)]
    Core(#[from] SamplerError),
    /// Writing the corpus to disk failed.
    #[error(transparent)]
    Export(#[from] ExportError),
}

/// Summarises the outcome of a `run` command.
#[derive(Debug, Clone)]
pub struct ExecutionSummary {
    /// Topology that was sampled.
    pub topology: Topology,
    /// Seed that reproduces the corpus.
    pub seed: u64,
    /// Attempt counters of the run.
    pub stats: SamplingStats,
    /// One record per accepted sample, in acceptance order.
    pub records: Vec<SampleRecord>,
    /// Location of the dataset table.
    pub dataset_path: PathBuf,
    /// Number of rendered graph documents.
    pub graphs_written: usize,
}

/// Executes the CLI command represented by `cli`.
///
/// # Errors
/// Returns [`CliError`] when configuration, sampling, or export fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use orgtopo_cli::cli::{Cli, Command, RunCommand, Topology, run_cli};
/// # use tempfile::TempDir;
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let dir = TempDir::new()?;
/// let mut run = RunCommand::new(Topology::Team);
/// run.samples = 3;
/// run.seed = Some(1);
/// run.data_path = dir.path().to_path_buf();
/// let summary = run_cli(Cli { command: Command::Run(run) })?;
/// assert_eq!(summary.records.len(), 3);
/// assert!(dir.path().join("team.csv").is_file());
/// # Ok(())
/// # }
/// ```
#[instrument(
    name = "cli.run",
    err,
    skip(cli),
    fields(command = field::Empty),
)]
pub fn run_cli(cli: Cli) -> Result<ExecutionSummary, CliError> {
    match cli.command {
        Command::Run(run) => {
            Span::current().record("command", field::display("run"));
            run_command(&run)
        }
    }
}

#[instrument(
    name = "cli.execute",
    err,
    skip(command),
    fields(topology = command.topology.name(), graphic = command.graphic, seed = field::Empty),
)]
pub(super) fn run_command(command: &RunCommand) -> Result<ExecutionSummary, CliError> {
    let sampler = command.sampler_builder().build()?;
    let seed = sampler.parameters().seed();
    Span::current().record("seed", seed);
    info!(seed, "sampling with seed");

    let layout = command.output_layout();
    bootstrap_dir(layout.data_dir())?;
    let (outcome, graphs_written) = if command.graphic {
        bootstrap_dir(layout.plot_dir())?;
        let mut renderer = DotRenderer::new(layout.clone());
        let outcome = sampler.run_with_observer(&mut renderer)?;
        (outcome, renderer.written())
    } else {
        (sampler.run()?, 0)
    };

    export_dataset(command.topology, &layout, outcome, graphs_written)
}

fn export_dataset(
    topology: Topology,
    layout: &OutputLayout,
    outcome: SamplingOutcome,
    graphs_written: usize,
) -> Result<ExecutionSummary, CliError> {
    let records = outcome.records()?;
    let dataset_path = layout.dataset_path();
    write_dataset(&dataset_path, &records)?;
    info!(
        topology = topology.name(),
        samples = records.len(),
        path = %dataset_path.display(),
        "command completed"
    );
    Ok(ExecutionSummary {
        topology,
        seed: outcome.seed(),
        stats: outcome.stats(),
        records,
        dataset_path,
        graphs_written,
    })
}

/// Renders `summary` to `writer` in a human-readable text format.
///
/// # Errors
/// Returns [`io::Error`] if writing to the supplied writer fails.
///
/// # Examples
/// ```
/// # use std::error::Error;
/// # use std::io::Cursor;
/// # use std::path::PathBuf;
/// # use orgtopo_cli::cli::{ExecutionSummary, Topology, render_summary};
/// #
/// # fn main() -> Result<(), Box<dyn Error>> {
/// let summary = ExecutionSummary {
///     topology: Topology::Hierarchy,
///     seed: 7,
///     stats: Default::default(),
///     records: Vec::new(),
///     dataset_path: PathBuf::from("data/hierarchy.csv"),
///     graphs_written: 0,
/// };
/// let mut buffer = Cursor::new(Vec::new());
/// render_summary(&summary, &mut buffer)?;
/// let text = String::from_utf8(buffer.into_inner())?;
/// assert!(text.starts_with("topology: hierarchy (uniform-random-tree)\nseed: 7\n"));
/// # Ok(())
/// # }
/// ```
pub fn render_summary(summary: &ExecutionSummary, mut writer: impl Write) -> io::Result<()> {
    let stats = summary.stats;
    writeln!(
        writer,
        "topology: {} ({})",
        summary.topology.name(),
        summary.topology.family()
    )?;
    writeln!(writer, "seed: {}", summary.seed)?;
    writeln!(writer, "samples: {}", summary.records.len())?;
    writeln!(
        writer,
        "attempts: {} (invalid: {}, duplicates: {})",
        stats.attempts(),
        stats.invalid(),
        stats.duplicates()
    )?;
    writeln!(writer, "dataset: {}", summary.dataset_path.display())?;
    if summary.graphs_written > 0 {
        writeln!(writer, "graphs: {}", summary.graphs_written)?;
    }
    for record in &summary.records {
        writeln!(
            writer,
            "{}\t{}\t{}\t{:.4}",
            record.ordinal(),
            record.node_count(),
            record.edge_count(),
            record.coupling_factor()
        )?;
    }
    Ok(())
}
