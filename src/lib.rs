//! Trace CSV
//!
//! Summarizes hardware-profiler logs in Trace Event Format into per-node
//! timing statistics (count, self time, min, max, average and wall time).
//!
//! This crate provides the core implementation for the `trace-csv` CLI tool.
//!
//! ## Getting Started
//!
//! ```bash
//! trace-csv profile.json                 # writes profile.csv
//! trace-csv profile.json -o out.csv -dma
//! trace-csv profile.json -include tpc -exclude tpc3 -group_by_name
//! ```
//!
//! Library use:
//!
//! ```ignore
//! let events = trace_csv::parser::read_trace_events("profile.json")?;
//! if let Some(report) = trace_csv::aggregator::aggregate(&events, &Default::default()) {
//!     trace_csv::output::write_report(&report, "profile.csv")?;
//! }
//! ```

pub mod aggregator;
pub mod commands;
pub mod output;
pub mod parser;
pub mod utils;
