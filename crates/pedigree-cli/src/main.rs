mod export;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use pedigree_core::{load_nodes, RelationshipScheme, Settings};
use pedigree_scoring::{
    compare_files, discover_pairs, run_batch, CompareOptions, GraphSummary, Workbook,
};
use render::OutputFormat;
use std::path::{Path, PathBuf};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "pedigree")]
#[command(about = "Pedigree fidelity scoring - compare candidate pedigrees against golden references", long_about = None)]
#[command(version)]
struct Cli {
    /// Output format (json, pretty, table)
    #[arg(short, long, global = true, default_value = "pretty")]
    output: OutputFormat,

    /// Configuration file (defaults to ./pedigree.toml when present)
    #[arg(short, long, global = true, env = "PEDIGREE_CONFIG")]
    config: Option<PathBuf>,

    /// Relationship deduction scheme, overrides the configured one
    #[arg(long, global = true, value_enum)]
    scheme: Option<SchemeArg>,

    /// Skip the consistency and spatial diagnostics
    #[arg(long, global = true)]
    no_diagnostics: bool,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, ValueEnum)]
enum SchemeArg {
    SiblingDistribution,
    ParentPartnership,
}

impl From<SchemeArg> for RelationshipScheme {
    fn from(arg: SchemeArg) -> Self {
        match arg {
            SchemeArg::SiblingDistribution => RelationshipScheme::SiblingDistribution,
            SchemeArg::ParentPartnership => RelationshipScheme::ParentPartnership,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Score one candidate pedigree against its golden reference
    Compare {
        /// Golden (reference) JSON document
        golden: PathBuf,

        /// Candidate JSON document
        candidate: PathBuf,

        /// Write all report sheets and the raw comparison as JSON
        #[arg(short, long)]
        export: Option<PathBuf>,
    },

    /// Compute basic and extended metrics for one pedigree
    Metrics {
        /// JSON document
        file: PathBuf,
    },

    /// Score every golden/candidate pair in a directory
    Batch {
        /// Directory holding `<id>_golden.json` files
        golden_dir: PathBuf,

        /// Directory holding the candidate files (defaults to the golden directory)
        candidate_dir: Option<PathBuf>,

        /// Write the batch rows as JSON
        #[arg(short, long)]
        export: Option<PathBuf>,

        /// Compare pairs one at a time
        #[arg(long)]
        sequential: bool,
    },
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "pedigree=debug" } else { "pedigree=info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_settings(cli: &Cli) -> Result<Settings> {
    let mut settings =
        Settings::load(cli.config.as_deref()).context("Failed to load configuration")?;
    if let Some(scheme) = cli.scheme {
        settings.scoring.scheme = scheme.into();
    }
    if cli.no_diagnostics {
        settings.metrics.diagnostics = false;
    }
    Ok(settings)
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(&cli) {
        eprintln!("{} {:#}", "Error:".red().bold(), e);
        std::process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let settings = load_settings(cli)?;
    execute_command(cli, &settings)
}

fn execute_command(cli: &Cli, settings: &Settings) -> Result<()> {
    let options = CompareOptions::from(settings);
    match &cli.command {
        Commands::Compare {
            golden,
            candidate,
            export,
        } => execute_compare(cli, &options, golden, candidate, export.as_deref()),
        Commands::Metrics { file } => {
            let nodes =
                load_nodes(file).with_context(|| format!("Failed to load {}", file.display()))?;
            let summary = GraphSummary::compute(&nodes, &options.extended);
            render::print_metrics(&cli.output, &summary)
        }
        Commands::Batch {
            golden_dir,
            candidate_dir,
            export,
            sequential,
        } => {
            let candidate_dir = candidate_dir.as_deref().unwrap_or(golden_dir.as_path());
            let pairs = discover_pairs(golden_dir, candidate_dir, &settings.batch)
                .with_context(|| format!("Failed to scan {}", golden_dir.display()))?;
            if pairs.is_empty() {
                warn!(
                    golden_dir = %golden_dir.display(),
                    suffix = %settings.batch.golden_suffix,
                    "no golden files found"
                );
            }

            let parallel = settings.batch.parallel && !sequential;
            let rows = run_batch(&pairs, &options, parallel);
            let report = export::BatchReport::new(&rows);
            info!(
                pairs = report.pairs,
                failed = report.failed,
                mean_score = ?report.mean_score,
                "batch finished"
            );

            render::print_batch(&cli.output, &report)?;
            if let Some(path) = export {
                export::write_json(path, &report)?;
            }
            Ok(())
        }
    }
}

fn execute_compare(
    cli: &Cli,
    options: &CompareOptions,
    golden: &Path,
    candidate: &Path,
    export: Option<&Path>,
) -> Result<()> {
    let comparison = compare_files(golden, candidate, options).with_context(|| {
        format!(
            "Failed to compare {} against {}",
            candidate.display(),
            golden.display()
        )
    })?;
    let workbook = Workbook::new(&comparison);

    render::print_comparison(&cli.output, &workbook)?;
    if let Some(path) = export {
        export::write_json(path, &workbook)?;
    }
    Ok(())
}
