//! Summary statistics per node.
//!
//! Turns a [`Recording`] into report rows. All values stay at full precision
//! here; rounding happens only when the report is serialized.

use super::recorder::Recording;
use crate::parser::Micros;
use log::debug;

/// One summary row of the report
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRow {
    /// Node name (grouped by name) or the name recorded for the correlation id
    pub node: String,

    /// Operator GUID, empty if none was seen
    pub guid: String,

    pub count: usize,

    /// Sum of all sample durations
    pub self_time: Micros,

    pub min: Micros,
    pub max: Micros,
    pub avg: f64,

    /// Last end minus first begin, 0 when either bound is missing
    pub wall_time: Micros,
}

/// Aggregated report for one trace file
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    /// Envelope across every node (the `ALL_NODES` row)
    pub total_wall_time: Micros,

    /// Rows in order of first completed interval
    pub rows: Vec<NodeRow>,
}

impl Report {
    pub fn total_count(&self) -> usize {
        self.rows.iter().map(|r| r.count).sum()
    }
}

/// Build the report, or `None` if nothing was recorded
///
/// **Public** - consumes the recording exactly once
pub fn build_report(recording: Recording) -> Option<Report> {
    if recording.is_empty() {
        return None;
    }

    let total_wall_time = recording.global_bounds.span().unwrap_or_default();

    let rows: Vec<NodeRow> = recording
        .samples
        .iter()
        .map(|(key, samples)| {
            let wall_time = recording
                .wall_bounds
                .get(key)
                .and_then(|bounds| bounds.span())
                .unwrap_or_default();

            NodeRow {
                node: recording.label(key),
                guid: recording.guids.get(key).cloned().unwrap_or_default(),
                wall_time,
                ..summarize(samples)
            }
        })
        .collect();

    debug!("Built report with {} rows", rows.len());

    Some(Report {
        total_wall_time,
        rows,
    })
}

/// Count/total/min/max/avg over a sample list
///
/// Ties in min/max keep the earliest sample, so its integer or float form
/// is what gets printed.
fn summarize(samples: &[Micros]) -> NodeRow {
    let count = samples.len();
    let self_time: Micros = samples.iter().sum();
    let min = samples.iter().copied().reduce(Micros::min).unwrap_or_default();
    let max = samples.iter().copied().reduce(Micros::max).unwrap_or_default();

    let avg = if count == 0 {
        0.0
    } else {
        self_time.as_f64() / count as f64
    };

    NodeRow {
        node: String::new(),
        guid: String::new(),
        count,
        self_time,
        min,
        max,
        avg,
        wall_time: Micros::default(),
    }
}
