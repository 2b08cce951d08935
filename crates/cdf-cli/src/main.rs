//! `cdf-inspect`: check, dump and summarize CDF files.

use std::io::{self, IsTerminal};

use cdf_cli::commands::{DumpSections, run_check, run_dump, run_summary};
use cdf_cli::logging::{LogConfig, LogFormat, init_logging};
use cdf_format::ReaderOptions;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg, ReaderArgs};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match &cli.command {
        Command::Check(args) => {
            let options = reader_options(&args.reader);
            i32::from(!run_check(&args.files, &options, args.plain))
        }
        Command::Dump(args) => {
            let sections = DumpSections {
                attributes: args.attributes,
                variables: args.variables,
                records: args.records,
                iso_epochs: args.iso_epochs,
            };
            report_result(run_dump(
                &args.file,
                &reader_options(&args.reader),
                sections,
            ))
        }
        Command::Summary(args) => report_result(run_summary(
            &args.file,
            &reader_options(&args.reader),
            args.compact,
        )),
    };
    std::process::exit(exit_code);
}

fn report_result(result: anyhow::Result<()>) -> i32 {
    match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    }
}

fn reader_options(args: &ReaderArgs) -> ReaderOptions {
    let mut options = ReaderOptions::new();
    if args.strict_magic {
        options = options.strict();
    }
    if let Some(limit) = args.max_chain {
        options = options.with_max_chain_length(limit);
    }
    options
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
