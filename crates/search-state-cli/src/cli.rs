//! CLI argument definitions for the search state tool.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "search-state",
    version,
    about = "Read, refine and clean up widget values in a search state",
    long_about = "Apply widget refinements to a JSON search state.\n\n\
                  States are single-index (a flat object) or multi-index \
                  (per-index partitions under the `indices` key).\n\
                  The resulting state or value is printed as JSON on stdout."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print a widget's current value.
    Get(GetArgs),

    /// Merge a refinement into the state and print the new state.
    Refine(RefineArgs),

    /// Remove a widget's value and print the new state.
    Clean(CleanArgs),

    /// List every widget value stored in the state.
    Inspect(InspectArgs),
}

/// Where the state comes from and how the caller is scoped.
#[derive(Args)]
pub struct ScopeArgs {
    /// Search state JSON file, or `-` for stdin.
    #[arg(value_name = "STATE")]
    pub state: PathBuf,

    /// Context JSON file (`mainTargetedIndex`, `multiIndexContext`).
    #[arg(long = "context", value_name = "PATH")]
    pub context: Option<PathBuf>,

    /// Targeted index; switches to multi-index mode.
    #[arg(long = "index", value_name = "INDEX")]
    pub index: Option<String>,

    /// The application's main index.
    #[arg(long = "main-index", value_name = "INDEX")]
    pub main_index: Option<String>,
}

#[derive(Parser)]
pub struct GetArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Widget id (`attribute` or `namespace.attribute`).
    #[arg(long = "id")]
    pub id: String,

    /// Value printed when the widget has neither a value nor a default.
    #[arg(long = "default", value_name = "JSON", default_value = "null")]
    pub default_value: String,

    /// The widget's static default refinement.
    #[arg(long = "default-refinement", value_name = "JSON")]
    pub default_refinement: Option<String>,
}

#[derive(Parser)]
pub struct RefineArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Entries to merge, as `KEY=VALUE` (VALUE is JSON or a plain string).
    #[arg(long = "set", value_name = "KEY=VALUE", required = true)]
    pub set: Vec<String>,

    /// Merge into this namespace object.
    #[arg(long = "namespace")]
    pub namespace: Option<String>,

    /// Restart pagination.
    #[arg(long = "reset-page")]
    pub reset_page: bool,
}

#[derive(Parser)]
pub struct CleanArgs {
    #[command(flatten)]
    pub scope: ScopeArgs,

    /// Widget id (`attribute` or `namespace.attribute`).
    #[arg(long = "id")]
    pub id: String,
}

#[derive(Parser)]
pub struct InspectArgs {
    /// Search state JSON file, or `-` for stdin.
    #[arg(value_name = "STATE")]
    pub state: PathBuf,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
