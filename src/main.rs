//! Trace CSV CLI
//!
//! Converts profiler JSON output in Trace Event Format to a per-node CSV
//! summary.

use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use std::path::PathBuf;

use trace_csv::aggregator::{AggregatorConfig, FilterConfig, GroupBy};
use trace_csv::commands::{
    execute_convert, log_filter_for_level, normalize_legacy_flags, validate_args, ConvertArgs,
};

/// Convert profiler json output from Trace Event Format to CSV
#[derive(Parser, Debug)]
#[command(name = "trace-csv")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Input file - a trace event format json
    filename: Option<String>,

    /// Output file - default is the input file with replaced suffix
    #[arg(short = 'o')]
    output: Option<PathBuf>,

    /// 0 - TRACE, 1 - DEBUG, 2 - INFO, 3 - WARNING, 4 - ERROR, 5 - CRITICAL, 6 - OFF
    #[arg(long = "log_level", value_parser = clap::value_parser!(u8).range(0..=6))]
    log_level: Option<u8>,

    /// Include DMA engines (default is MME and TPC only); ignored with -include/-exclude
    #[arg(long)]
    dma: bool,

    /// Exclude engines containing any of these expressions (comma separated)
    #[arg(long)]
    exclude: Option<String>,

    /// Include only engines containing any of these expressions (comma separated)
    #[arg(long)]
    include: Option<String>,

    /// Group events by event name instead of by correlation id
    #[arg(long = "group_by_name")]
    group_by_name: bool,

    /// Print the CSV to stdout after writing it
    #[arg(long)]
    stdout: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    // Parse CLI arguments
    let cli = Cli::parse_from(normalize_legacy_flags(std::env::args_os()));

    // Setup logging
    let log_level = match cli.log_level {
        Some(level) => log_filter_for_level(level),
        None if cli.verbose => "debug",
        None => "info",
    };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    let group_by = if cli.group_by_name {
        GroupBy::Name
    } else {
        GroupBy::CorrelationId
    };
    let filter = FilterConfig::from_cli(cli.include.as_deref(), cli.exclude.as_deref(), cli.dma);

    let args = ConvertArgs {
        input: cli.filename.unwrap_or_default(),
        output: cli.output,
        config: AggregatorConfig::new(filter, group_by),
        print_csv: cli.stdout,
    };

    // Validate args first
    validate_args(&args)?;

    execute_convert(args)?;

    Ok(())
}
