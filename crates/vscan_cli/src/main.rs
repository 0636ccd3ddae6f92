//! vscan CLI: structural recovery for Verilog source trees.
//!
//! Provides `vscan scan` for top-module and clock inference with a JSON-lines
//! summary log, `vscan hierarchy` for the instantiation tree below each top
//! module, and `vscan modules` for a per-module listing.

#![warn(missing_docs)]

mod hierarchy;
mod modules;
mod pipeline;
mod scan;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};

/// vscan: heuristic Verilog structure recovery.
#[derive(Parser, Debug)]
#[command(name = "vscan", version, about = "Verilog structure scanner")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Enable verbose output.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a custom `vscan.toml` configuration file.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Infer top modules and their clocks, and append a summary to the log.
    Scan(ScanArgs),
    /// Print the instantiation tree below each top module.
    Hierarchy(SourceArgs),
    /// List every module with its ports, clock, and connectivity.
    Modules(ModulesArgs),
}

/// Source selection shared by every command.
#[derive(Parser, Debug)]
pub struct SourceArgs {
    /// Design directory to scan recursively.
    pub dir: String,

    /// File extensions to collect, without the dot (overrides `[scan] extensions`).
    #[arg(long = "ext", num_args = 1..)]
    pub extensions: Vec<String>,

    /// Keep files that contain `initial` instead of dropping them as testbenches.
    #[arg(long)]
    pub keep_testbenches: bool,
}

/// Arguments for the `vscan scan` subcommand.
#[derive(Parser, Debug)]
pub struct ScanArgs {
    /// Source selection.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Summary log file (overrides `[report] log_file`).
    #[arg(long)]
    pub log: Option<String>,

    /// Output format for the result and diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `vscan modules` subcommand.
#[derive(Parser, Debug)]
pub struct ModulesArgs {
    /// Source selection.
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format for the listing.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
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

/// Output format.
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
    /// Whether to print verbose information.
    pub verbose: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a custom config file.
    pub config: Option<String>,
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
        config: cli.config,
    };

    let result = match cli.command {
        Command::Scan(ref args) => scan::run(args, &global),
        Command::Hierarchy(ref args) => hierarchy::run(args, &global),
        Command::Modules(ref args) => modules::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}
