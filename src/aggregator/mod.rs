//! Aggregation of trace events into per-node timing statistics.
//!
//! This module transforms parsed trace events into:
//! - Metadata lookup tables (unit and engine names)
//! - Matched begin/end duration samples per correlation key
//! - Summary rows for the report

pub mod filter;
pub mod metadata;
pub mod recorder;
pub mod stats;

use crate::parser::TraceEvent;

// Re-export main types and functions
pub use filter::FilterConfig;
pub use metadata::{collect_metadata, Metadata};
pub use recorder::{record_events, CorrelationKey, EventRecorder, GroupBy, Recording, WallBounds};
pub use stats::{build_report, NodeRow, Report};

/// Settings for one aggregation run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregatorConfig {
    pub filter: FilterConfig,
    pub group_by: GroupBy,
}

impl AggregatorConfig {
    pub fn new(filter: FilterConfig, group_by: GroupBy) -> Self {
        Self { filter, group_by }
    }

    pub fn with_group_by(mut self, group_by: GroupBy) -> Self {
        self.group_by = group_by;
        self
    }
}

/// Run metadata collection and recording over a parsed event list
///
/// **Public** - main entry point for aggregation
///
/// Returns `None` when no hardware interval matched the filter; callers
/// should treat that as "nothing to write", not as a failure.
pub fn aggregate(events: &[TraceEvent], config: &AggregatorConfig) -> Option<Report> {
    let metadata = collect_metadata(events);
    let recording = record_events(events, &metadata, &config.filter, config.group_by);
    build_report(recording)
}
