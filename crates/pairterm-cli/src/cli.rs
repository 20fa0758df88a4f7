use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan, Ted Yu",
    version,
    about = "PairTerm CLI - Evaluate MB-pol / MB-nrg two-body polynomial terms and their gradients for water and ion pairs.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Set the number of threads for batch evaluation.
    /// Defaults to the number of available logical cores.
    #[arg(short = 'j', long, global = true, value_name = "NUM")]
    pub threads: Option<usize>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Evaluate the two-body energy and gradients of one or more pairs.
    Eval(EvalArgs),
    /// Print the switching radii of a species pair.
    Cutoff(SpeciesArgs),
    /// List the built-in parameter presets.
    Presets,
    /// Compare analytic gradients against central finite differences.
    Check(CheckArgs),
}

/// Selects the species parameters.
#[derive(Args, Debug, Clone)]
pub struct SpeciesArgs {
    /// Built-in preset name (e.g., 'h2o-h2o', 'h2o-na-pol0', 'k-br') or a parameter TOML file.
    #[arg(short, long, required = true, value_name = "NAME_OR_PATH")]
    pub species: String,
}

/// Inputs shared by every command that evaluates a term.
#[derive(Args, Debug, Clone)]
pub struct TermArgs {
    #[command(flatten)]
    pub species: SpeciesArgs,

    /// Polynomial coefficient table in CSV format (header: coefficient,x0,...,x{N-1}).
    #[arg(short, long, required = true, value_name = "PATH")]
    pub polynomial: PathBuf,

    /// Geometry file in TOML format with `a`/`b` atom lists, or a `[[pairs]]` array of them.
    #[arg(short, long, required = true, value_name = "PATH")]
    pub geometry: PathBuf,
}

/// Arguments for the `eval` subcommand.
#[derive(Args, Debug)]
pub struct EvalArgs {
    #[command(flatten)]
    pub term: TermArgs,

    /// Also print the pairwise force-matrix decomposition of every pair.
    #[arg(long)]
    pub force_matrix: bool,
}

/// Arguments for the `check` subcommand.
#[derive(Args, Debug)]
pub struct CheckArgs {
    #[command(flatten)]
    pub term: TermArgs,

    /// Displacement used for the central differences, in Angstroms.
    #[arg(long, default_value_t = 1e-5, value_name = "FLOAT")]
    pub step: f64,

    /// Largest accepted relative deviation between analytic and numeric gradients.
    #[arg(long, default_value_t = 1e-5, value_name = "FLOAT")]
    pub tolerance: f64,
}
