//! Trace parsing and schema definitions.
//!
//! This module handles:
//! - Reading profiler JSON from disk
//! - Extracting the `traceEvents` list
//! - Typed, lenient event records and their id/timestamp values

pub mod schema;
pub mod trace_events;
pub mod values;

// Re-export main types
pub use schema::{EventArgs, Phase, TraceEvent};
pub use trace_events::{parse_trace_events, read_trace_events};
pub use values::{EventId, Micros};
