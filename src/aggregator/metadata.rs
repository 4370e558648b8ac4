//! Metadata Collector.
//!
//! Builds the process-id → unit name and thread-id → engine name lookup
//! tables from `M` events.

use crate::parser::{EventId, Phase, TraceEvent};
use crate::utils::config::{PROCESS_NAME_EVENT, THREAD_NAME_EVENT};
use log::debug;
use std::collections::HashMap;

/// Display-name lookup tables for one trace file
#[derive(Debug, Clone, Default)]
pub struct Metadata {
    /// processId → unit display name
    pub units_by_process_id: HashMap<EventId, String>,

    /// threadId → engine display name
    pub engines_by_thread_id: HashMap<EventId, String>,
}

impl Metadata {
    pub fn engine_name(&self, thread_id: &EventId) -> Option<&str> {
        self.engines_by_thread_id.get(thread_id).map(String::as_str)
    }

    pub fn unit_name(&self, process_id: &EventId) -> Option<&str> {
        self.units_by_process_id.get(process_id).map(String::as_str)
    }
}

/// Scan all metadata events and build the lookup tables
///
/// **Public** - first pass of an aggregation run
///
/// Later events overwrite earlier ones for the same id. Metadata events
/// without `args.name` are ignored.
pub fn collect_metadata(events: &[TraceEvent]) -> Metadata {
    let mut metadata = Metadata::default();

    for event in events {
        if event.phase != Phase::Metadata || !event.has_name() {
            continue;
        }

        let Some(display_name) = event.arg_name() else {
            continue;
        };

        match event.name.as_deref() {
            Some(PROCESS_NAME_EVENT) => {
                metadata
                    .units_by_process_id
                    .insert(event.process_id.clone(), display_name.to_string());
            }
            Some(THREAD_NAME_EVENT) => {
                metadata
                    .engines_by_thread_id
                    .insert(event.thread_id.clone(), display_name.to_string());
            }
            _ => {}
        }
    }

    debug!(
        "Collected metadata: {} units, {} engines",
        metadata.units_by_process_id.len(),
        metadata.engines_by_thread_id.len()
    );

    metadata
}
