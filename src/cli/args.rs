use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "depthqc",
    version,
    about = "Cross-sample coverage summaries from mosdepth reports"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    Run(RunArgs),
}

#[derive(Parser)]
pub struct RunArgs {
    /// Files or directories to scan for mosdepth summary/dist reports.
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    #[arg(long)]
    pub out: PathBuf,

    #[arg(long, default_value_t = num_cpus::get())]
    pub threads: usize,

    /// Glob patterns of contigs to keep in per-contig output.
    #[arg(long = "include-contigs")]
    pub include_contigs: Vec<String>,

    /// Glob patterns of contigs to drop from per-contig output.
    /// Exclusion wins over inclusion.
    #[arg(long = "exclude-contigs")]
    pub exclude_contigs: Vec<String>,

    /// Exact name of the X chromosome in the reference.
    #[arg(long)]
    pub xchr: Option<String>,

    /// Exact name of the Y chromosome in the reference.
    #[arg(long)]
    pub ychr: Option<String>,

    /// Minimum share of the total coverage across all samples a contig
    /// must reach to stay in the per-contig table.
    #[arg(long = "fraction-cutoff", default_value = "0.001")]
    pub fraction_cutoff: String,

    /// Comma-separated depth thresholds for the general stats table.
    #[arg(long = "coverage-thresholds")]
    pub coverage_thresholds: Option<String>,

    /// Comma-separated subset of thresholds hidden by default in renderers.
    #[arg(long = "hidden-thresholds")]
    pub hidden_thresholds: Option<String>,

    /// Glob patterns of sample names to drop before aggregation.
    #[arg(long = "ignore-samples")]
    pub ignore_samples: Vec<String>,

    /// Also write the full report as JSON.
    #[arg(long, default_value_t = false)]
    pub json: bool,
}
