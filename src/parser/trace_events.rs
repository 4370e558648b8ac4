//! Event Reader for Trace Event Format JSON.
//!
//! Loads the profiler document and extracts its flat `traceEvents` list.

use super::schema::TraceEvent;
use crate::utils::error::ParseError;
use log::{debug, warn};
use serde_json::Value;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Read and parse the trace events of a profiler JSON file
///
/// **Public** - main entry point for parsing
///
/// # Errors
/// * `ParseError::InputNotFound` - path is not a regular file
/// * `ParseError::JsonError` - file is not valid JSON
/// * `ParseError::MissingTraceEvents` - no `traceEvents` array at the top level
pub fn read_trace_events(path: impl AsRef<Path>) -> Result<Vec<TraceEvent>, ParseError> {
    let path = path.as_ref();

    if !path.is_file() {
        return Err(ParseError::InputNotFound(path.to_path_buf()));
    }

    debug!("Reading trace events from: {}", path.display());

    let file = File::open(path)?;
    let raw: Value = serde_json::from_reader(BufReader::new(file))?;

    parse_trace_events(raw)
}

/// Extract the `traceEvents` array from an already-decoded document
///
/// Events that fail to deserialize are logged and skipped.
pub fn parse_trace_events(raw: Value) -> Result<Vec<TraceEvent>, ParseError> {
    let items = match raw {
        Value::Object(mut obj) => match obj.remove("traceEvents") {
            Some(Value::Array(items)) => items,
            _ => return Err(ParseError::MissingTraceEvents),
        },
        _ => return Err(ParseError::MissingTraceEvents),
    };

    let total = items.len();
    let events: Vec<TraceEvent> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| match serde_json::from_value::<TraceEvent>(item) {
            Ok(event) => Some(event),
            Err(e) => {
                warn!("Skipping malformed trace event {}: {}", index, e);
                None
            }
        })
        .collect();

    debug!("Parsed {} of {} trace events", events.len(), total);

    Ok(events)
}
