//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "cdf-inspect",
    version,
    about = "Inspect CDF files and check them for archive compliance",
    long_about = "Inspect Common Data Format (CDF) files.\n\n\
                  Checks files against the CDF tools, ISTP and PDS archiving rules,\n\
                  dumps attributes, variables and records, and writes label summaries."
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
    /// Check files for archive compliance.
    Check(CheckArgs),

    /// Print the header, attributes, variables and records of a file.
    Dump(DumpArgs),

    /// Print a JSON label summary of a file.
    Summary(SummaryArgs),
}

#[derive(Args)]
pub struct ReaderArgs {
    /// Reject files whose magic word is not a CDF magic.
    #[arg(long = "strict-magic")]
    pub strict_magic: bool,

    /// Longest pointer chain to follow (default: the record count).
    #[arg(long = "max-chain", value_name = "N")]
    pub max_chain: Option<usize>,
}

#[derive(Args)]
pub struct CheckArgs {
    /// Files to check.
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Print reasons as plain lines instead of a table.
    #[arg(long = "plain")]
    pub plain: bool,

    #[command(flatten)]
    pub reader: ReaderArgs,
}

#[derive(Args)]
pub struct DumpArgs {
    /// File to dump.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Show global attributes.
    #[arg(long = "attributes")]
    pub attributes: bool,

    /// Show variables and their attributes.
    #[arg(long = "variables")]
    pub variables: bool,

    /// Show every record in file order.
    #[arg(long = "records")]
    pub records: bool,

    /// Render EPOCH and EPOCH16 values as ISO 8601 timestamps.
    #[arg(long = "iso-epochs")]
    pub iso_epochs: bool,

    #[command(flatten)]
    pub reader: ReaderArgs,
}

#[derive(Args)]
pub struct SummaryArgs {
    /// File to summarize.
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Print the JSON on one line.
    #[arg(long = "compact")]
    pub compact: bool,

    #[command(flatten)]
    pub reader: ReaderArgs,
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
