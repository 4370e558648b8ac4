//! Convert command implementation.
//!
//! The convert command:
//! 1. Reads the trace events
//! 2. Collects metadata and records hardware intervals
//! 3. Builds the summary report
//! 4. Writes the CSV file

use super::models::ConvertArgs;
use crate::aggregator::aggregate;
use crate::output::{derive_output_path, render_report, write_report};
use crate::parser::read_trace_events;
use crate::utils::config::INPUT_SUFFIX;
use anyhow::{Context, Result};
use log::{debug, info};
use std::path::PathBuf;
use std::time::Instant;

/// Execute the convert command
///
/// **Public** - main entry point called from main.rs
///
/// # Returns
/// The path written, or `None` when no hardware events matched and
/// therefore no file was produced
///
/// # Errors
/// * Input file missing or not valid trace JSON
/// * Output file cannot be written
pub fn execute_convert(args: ConvertArgs) -> Result<Option<PathBuf>> {
    let start_time = Instant::now();
    let output_path = resolve_output_path(&args);

    info!("Converting trace: {}", args.input);
    debug!(
        "Filter: include={:?} exclude={:?}, grouping by {:?}",
        args.config.filter.include_terms, args.config.filter.exclude_terms, args.config.group_by
    );

    let events = read_trace_events(&args.input)
        .with_context(|| format!("Failed to read trace events from {}", args.input))?;

    let Some(report) = aggregate(&events, &args.config) else {
        info!("No hardware events matched, no report written");
        return Ok(None);
    };

    write_report(&report, &output_path)
        .with_context(|| format!("Failed to write report to {}", output_path.display()))?;

    info!(
        "✓ Wrote {} rows ({} samples) to {}",
        report.rows.len(),
        report.total_count(),
        output_path.display()
    );

    if args.print_csv {
        print!("{}", render_report(&report));
    }

    debug!("Conversion completed in {:.2}s", start_time.elapsed().as_secs_f64());

    Ok(Some(output_path))
}

/// Explicit `-o` path, or the input path with `.json` replaced by `.csv`
pub fn resolve_output_path(args: &ConvertArgs) -> PathBuf {
    args.output
        .clone()
        .unwrap_or_else(|| derive_output_path(&args.input))
}

/// Validate convert arguments
///
/// **Public** - can be called before execute_convert for early validation
pub fn validate_args(args: &ConvertArgs) -> Result<()> {
    if args.input.is_empty() {
        anyhow::bail!("Input file is required");
    }

    if !args.input.contains(INPUT_SUFFIX) {
        anyhow::bail!("Input file must be a {} trace: {}", INPUT_SUFFIX, args.input);
    }

    Ok(())
}
