//! CSV report writer.
//!
//! Writes a [`Report`] in the `excel` dialect: comma separated, CRLF record
//! terminators, fields quoted only when they contain a delimiter, a quote or
//! a line break.

use crate::aggregator::{NodeRow, Report};
use crate::parser::Micros;
use crate::utils::config::{
    ALL_NODES_LABEL, FLOAT_PRECISION, INPUT_SUFFIX, OUTPUT_SUFFIX, PLACEHOLDER, REPORT_BANNER,
    REPORT_HEADER,
};
use crate::utils::error::OutputError;
use log::{debug, info};
use std::borrow::Cow;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

const DELIMITER: char = ',';
const QUOTE: char = '"';
const LINE_TERMINATOR: &str = "\r\n";

/// Write a report to a CSV file
///
/// **Public** - main entry point for CSV output
///
/// # Errors
/// * `OutputError::WriteFailed` - I/O error during write
/// * `OutputError::InvalidPath` - Path is empty, a directory, or its parent cannot be created
pub fn write_report(report: &Report, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing report to: {}", output_path.display());

    validate_output_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);
    write_csv(report, &mut writer)?;
    writer.flush()?;

    debug!(
        "Report written ({} rows, {} bytes)",
        report.rows.len(),
        calculate_file_size(output_path)
    );

    Ok(())
}

/// Render a report to an in-memory CSV string
pub fn render_report(report: &Report) -> String {
    report_records(report)
        .iter()
        .map(|fields| format_record(fields))
        .collect()
}

/// Serialize a report into any writer
pub fn write_csv<W: Write>(report: &Report, writer: &mut W) -> io::Result<()> {
    for fields in report_records(report) {
        writer.write_all(format_record(&fields).as_bytes())?;
    }
    Ok(())
}

/// Banner, header, `ALL_NODES` and one record per node, in output order
fn report_records(report: &Report) -> Vec<Vec<String>> {
    let mut records = Vec::with_capacity(report.rows.len() + 3);

    records.push(vec![REPORT_BANNER.to_string()]);
    records.push(REPORT_HEADER.iter().map(|h| h.to_string()).collect());

    let mut all_nodes = vec![ALL_NODES_LABEL.to_string()];
    all_nodes.extend(std::iter::repeat(PLACEHOLDER.to_string()).take(REPORT_HEADER.len() - 2));
    all_nodes.push(format_micros(report.total_wall_time));
    records.push(all_nodes);

    records.extend(report.rows.iter().map(row_fields));
    records
}

/// Output path for an input trace: every `.json` becomes `.csv`
pub fn derive_output_path(input: &str) -> PathBuf {
    PathBuf::from(input.replace(INPUT_SUFFIX, OUTPUT_SUFFIX))
}

fn row_fields(row: &NodeRow) -> Vec<String> {
    vec![
        row.node.clone(),
        row.guid.clone(),
        row.count.to_string(),
        format_micros(row.self_time),
        format_micros(row.min),
        format_micros(row.max),
        format_float(row.avg),
        format_micros(row.wall_time),
    ]
}

/// One CSV line, terminator included
fn format_record(fields: &[String]) -> String {
    let mut line = fields
        .iter()
        .map(|f| escape_field(f))
        .collect::<Vec<_>>()
        .join(",");
    line.push_str(LINE_TERMINATOR);
    line
}

fn escape_field(field: &str) -> Cow<'_, str> {
    let needs_quotes = field
        .chars()
        .any(|c| c == DELIMITER || c == QUOTE || c == '\r' || c == '\n');

    if needs_quotes {
        Cow::Owned(format!("\"{}\"", field.replace(QUOTE, "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

/// Microsecond value in the form it was read: integers stay integers,
/// floats keep their decimal point even when integral (`50.0`)
fn format_micros(value: Micros) -> String {
    match value {
        Micros::Int(v) => v.to_string(),
        Micros::Float(v) => format_float(v),
    }
}

/// Round using the exact binary value of `value`, then print the shortest
/// representation (`16.667`, `50.0`, `1e+16`)
fn format_float(value: f64) -> String {
    let rounded = format!("{:.*}", FLOAT_PRECISION, value)
        .parse::<f64>()
        .unwrap_or(value);
    shortest_repr(rounded)
}

/// Shortest round-tripping decimal, switching to `1.5e+17` style outside
/// `[1e-4, 1e16)`
fn shortest_repr(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "inf" } else { "-inf" }.to_string();
    }

    let magnitude = value.abs();
    if magnitude != 0.0 && !(1e-4..1e16).contains(&magnitude) {
        let scientific = format!("{:e}", value);
        if let Some((mantissa, exponent)) = scientific.split_once('e') {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            return format!("{}e{}{:0>2}", mantissa, sign, digits);
        }
    }

    let plain = value.to_string();
    if plain.contains('.') {
        plain
    } else {
        format!("{}.0", plain)
    }
}

/// Validate that output path is writable
///
/// **Private** - internal validation
fn validate_output_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("Path is empty".to_string()));
    }

    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "Path is a directory: {}",
            path.display()
        )));
    }

    Ok(())
}

/// Calculate file size in bytes
///
/// **Private** - internal utility
fn calculate_file_size(path: &Path) -> u64 {
    std::fs::metadata(path).map(|m| m.len()).unwrap_or(0)
}
