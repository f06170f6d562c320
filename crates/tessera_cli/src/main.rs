//! Tessera CLI: the command-line interface for the Tessera chip planner.
//!
//! Provides `tessera analyze` for feasibility analysis and topology synthesis,
//! `tessera floorplan` for placement and routing, `tessera generate` for RTL
//! emission, `tessera advise` and `tessera parse` for the advisory boundary,
//! and `tessera init` for writing a starter specification.

#![warn(missing_docs)]

mod advise;
mod analyze;
mod floorplan;
mod generate;
mod init;
mod parse;
mod pipeline;

use std::path::PathBuf;
use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

/// Tessera: from chip intent to floorplan.
#[derive(Parser, Debug)]
#[command(name = "tessera", version, about = "Tessera chip architecture planner")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Enable verbose (debug-level) output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Output format for results and diagnostics.
    #[arg(short, long, global = true, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,

    /// Path to a custom `tessera.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Check a specification against node physics and synthesize its topology.
    Analyze {
        /// Specification file (`.toml` or `.json`).
        spec: PathBuf,
    },
    /// Place and route an architecture graph.
    Floorplan(FloorplanArgs),
    /// Emit Verilog and a testbench for a specification.
    Generate(GenerateArgs),
    /// Ask the advisory backend to review or optimize a specification.
    Advise(AdviseArgs),
    /// Turn a free-text request into a specification.
    Parse(ParseArgs),
    /// Write a starter specification file.
    Init {
        /// Where to write the specification (default: `chip.toml`).
        path: Option<PathBuf>,

        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

/// Arguments for the `tessera floorplan` subcommand.
#[derive(Args, Debug)]
pub struct FloorplanArgs {
    /// Architecture graph file (`.json` or `.toml`).
    #[arg(required_unless_present = "spec")]
    pub graph: Option<PathBuf>,

    /// Synthesize the graph from this specification instead.
    #[arg(long, conflicts_with = "graph")]
    pub spec: Option<PathBuf>,

    /// Write the floorplan JSON to this file instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Arguments for the `tessera generate` subcommand.
#[derive(Args, Debug)]
pub struct GenerateArgs {
    /// Specification file (`.toml` or `.json`).
    pub spec: PathBuf,

    /// Output directory for the generated files.
    #[arg(short, long, default_value = "rtl")]
    pub out: PathBuf,

    /// Skip the testbench.
    #[arg(long)]
    pub no_testbench: bool,
}

/// Advisory backend selection shared by `advise` and `parse`.
#[derive(Args, Debug)]
pub struct BackendArgs {
    /// Command that answers prompts on stdin (e.g. `"llm --json"`).
    /// Without it, answers come from the local fallback.
    #[arg(long)]
    pub backend: Option<String>,

    /// Seconds to wait for the backend before falling back.
    #[arg(long, default_value_t = 5)]
    pub timeout: u64,
}

/// Arguments for the `tessera advise` subcommand.
#[derive(Args, Debug)]
pub struct AdviseArgs {
    /// Specification file (`.toml` or `.json`).
    pub spec: PathBuf,

    /// Optimization goal (`power`, `performance`, `balanced`). Without it,
    /// the architecture is reviewed instead.
    #[arg(long)]
    pub goal: Option<String>,

    /// Backend selection.
    #[command(flatten)]
    pub backend: BackendArgs,
}

/// Arguments for the `tessera parse` subcommand.
#[derive(Args, Debug)]
pub struct ParseArgs {
    /// The request, e.g. `"5nm automotive chip with PCIe"`.
    #[arg(required = true, num_args = 1..)]
    pub text: Vec<String>,

    /// Write the resulting specification to this file.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Backend selection.
    #[command(flatten)]
    pub backend: BackendArgs,
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Result and diagnostic output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to print verbose/debug information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Output format.
    pub format: ReportFormat,
    /// Optional path to a custom config file.
    pub config: Option<PathBuf>,
}

fn main() {
    let cli = Cli::parse();

    let color = match cli.color {
        ColorChoice::Auto => std::env::var_os("NO_COLOR").is_none() && std::env::var_os("TERM").is_some(),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        verbose: cli.verbose,
        color,
        format: cli.format,
        config: cli.config,
    };
    init_tracing(&global);

    let result = match cli.command {
        Command::Analyze { ref spec } => analyze::run(spec, &global),
        Command::Floorplan(ref args) => floorplan::run(args, &global),
        Command::Generate(ref args) => generate::run(args, &global),
        Command::Advise(ref args) => advise::run(args, &global),
        Command::Parse(ref args) => parse::run(args, &global),
        Command::Init { path, force } => init::run(path, force, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Installs the log subscriber on stderr.
///
/// `--verbose` selects debug, `--quiet` selects error, otherwise `RUST_LOG`
/// applies with a default of `warn`.
fn init_tracing(global: &GlobalArgs) {
    let filter = if global.verbose {
        EnvFilter::new("debug")
    } else if global.quiet {
        EnvFilter::new("error")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(global.color)
        .with_target(false)
        .init();
}
