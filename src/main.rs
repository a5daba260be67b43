mod config;
mod input;
mod metrics;
mod output;
mod pipeline;
mod report;
mod vote;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

use crate::config::{EnsembleConfig, Platform, DEFAULT_METHOD_TAG, DEFAULT_RESULTS_FILENAME};
use crate::pipeline::run_ensemble;

#[derive(Debug, Parser)]
#[command(name = "ensemble-vote", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Aggregate per-model predictions by majority vote and write the
    /// per-experiment artifacts.
    Run(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Model result directories, in voting order.
    #[arg(long = "model", required = true)]
    models: Vec<PathBuf>,

    /// Experiment identifiers to process, in order.
    #[arg(long = "experiment", required = true)]
    experiments: Vec<u32>,

    /// Output root directory.
    #[arg(long)]
    out: PathBuf,

    /// Result filename looked up under each <model_dir>/<experiment>/.
    #[arg(long, default_value = DEFAULT_RESULTS_FILENAME)]
    results_file: String,

    /// Ensemble method tag used in artifact names.
    #[arg(long, default_value = DEFAULT_METHOD_TAG)]
    tag: String,

    /// Path-prefix platform for relative directories.
    #[arg(long, value_enum, default_value_t = PlatformArg::Local)]
    platform: PlatformArg,

    /// Skip writing the run summary.json.
    #[arg(long)]
    no_summary: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum PlatformArg {
    Local,
    Kaggle,
    Colab,
}

impl From<PlatformArg> for Platform {
    fn from(value: PlatformArg) -> Self {
        match value {
            PlatformArg::Local => Platform::Local,
            PlatformArg::Kaggle => Platform::Kaggle,
            PlatformArg::Colab => Platform::Colab,
        }
    }
}

impl RunArgs {
    fn into_config(self) -> EnsembleConfig {
        EnsembleConfig {
            model_dirs: self.models,
            experiments: self.experiments,
            results_filename: self.results_file,
            out_dir: self.out,
            method_tag: self.tag,
            platform: self.platform.into(),
            write_summary: !self.no_summary,
        }
    }
}

fn main() {
    init_tracing();
    if let Err(err) = run() {
        eprintln!("{err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), pipeline::EnsembleError> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => {
            let config = args.into_config();
            run_ensemble(&config)?;
            Ok(())
        }
    }
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();
}
