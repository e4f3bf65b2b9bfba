//! permlink: command-line host for the permutation linker.
//!
//! Provides `permlink permutation` to record per-permutation passes,
//! `permlink aggregate` to produce cache manifests and the permutation map,
//! and `permlink inspect` to print the contents of an emitted manifest.

#![warn(missing_docs)]

mod aggregate;
mod inspect;
mod permutation;
mod pipeline;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// permlink: offline cache manifests and selection maps for multi-permutation builds.
#[derive(Parser, Debug)]
#[command(name = "permlink", version, about = "Permutation linker")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Output format for diagnostics.
    #[arg(long, global = true, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Path to a custom `permlink.toml` or the directory containing it.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Record one or more per-permutation passes.
    Permutation(PermutationArgs),
    /// Run the aggregating pass over recorded permutations.
    Aggregate(AggregateArgs),
    /// Print the resources listed in an emitted cache manifest.
    Inspect {
        /// Path to a `.appcache` manifest.
        manifest: String,
    },
}

/// Arguments for the `permlink permutation` subcommand.
#[derive(Parser, Debug)]
pub struct PermutationArgs {
    /// Per-permutation pass inputs (JSON).
    #[arg(required = true)]
    pub inputs: Vec<String>,

    /// Directory that receives `<name>.permutation.json` records.
    #[arg(long, default_value = ".")]
    pub out_dir: String,
}

/// Arguments for the `permlink aggregate` subcommand.
#[derive(Parser, Debug)]
pub struct AggregateArgs {
    /// Directory holding `*.permutation.json` records.
    #[arg(long)]
    pub permutations: String,

    /// JSON list of the build's emitted artifacts.
    #[arg(long)]
    pub artifacts: String,
}

/// Diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// One JSON object per line.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// How diagnostics are rendered.
    pub format: ReportFormat,
    /// Optional path to a custom config file.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        format: cli.format,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Permutation(ref args) => permutation::run(args, &global),
        Command::Aggregate(ref args) => aggregate::run(args, &global),
        Command::Inspect { ref manifest } => inspect::run(manifest, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the fmt subscriber; `RUST_LOG` wins over the verbosity default.
fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
