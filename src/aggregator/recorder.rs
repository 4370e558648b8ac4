//! Event Recorder.
//!
//! Matches begin/end pairs per (thread, correlation key) and accumulates
//! duration samples, wall-clock bounds, operator GUIDs and node names.
//!
//! Unmatched begins and ends are dropped from the statistics. They are
//! counted and reported at debug level only.

use super::filter::FilterConfig;
use super::metadata::Metadata;
use crate::parser::{EventId, Micros, Phase, TraceEvent};
use log::debug;
use std::collections::{HashMap, HashSet};

/// How begin/end events are grouped into nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GroupBy {
    /// Group by the event's `id` field (missing ids count as 0)
    #[default]
    CorrelationId,

    /// Group by the event's `name` field
    Name,
}

/// Identity of a logical node across begin/end pairs
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CorrelationKey {
    Id(EventId),
    /// `None` groups events whose name was a JSON `null`
    Name(Option<String>),
}

impl CorrelationKey {
    pub fn for_event(event: &TraceEvent, group_by: GroupBy) -> Self {
        match group_by {
            GroupBy::CorrelationId => Self::Id(event.correlation_id_or_zero()),
            GroupBy::Name => Self::Name(event.name.clone()),
        }
    }

    /// Id 0 stands for "no correlation id" and never carries a GUID
    fn is_zero_id(&self) -> bool {
        matches!(self, Self::Id(EventId::Int(0)))
    }
}

/// Outer envelope of every occurrence of a key
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WallBounds {
    pub earliest_begin: Option<Micros>,
    pub latest_end: Option<Micros>,
}

impl WallBounds {
    pub fn observe_begin(&mut self, ts: Micros) {
        self.earliest_begin = Some(self.earliest_begin.map_or(ts, |cur| cur.min(ts)));
    }

    pub fn observe_end(&mut self, ts: Micros) {
        self.latest_end = Some(self.latest_end.map_or(ts, |cur| cur.max(ts)));
    }

    /// `latest_end - earliest_begin`, if both were seen
    pub fn span(&self) -> Option<Micros> {
        match (self.earliest_begin, self.latest_end) {
            (Some(begin), Some(end)) => Some(end - begin),
            _ => None,
        }
    }
}

/// Tables accumulated by one recording pass
#[derive(Debug, Clone, Default)]
pub struct Recording {
    pub group_by: GroupBy,

    /// Duration samples per key, in order of first completed interval
    pub samples: Vec<(CorrelationKey, Vec<Micros>)>,

    pub wall_bounds: HashMap<CorrelationKey, WallBounds>,

    /// Envelope across every key, including keys without samples
    pub global_bounds: WallBounds,

    /// key → operator GUID (`args.op`)
    pub guids: HashMap<CorrelationKey, String>,

    /// correlation id → node name, used when grouping by id
    pub names: HashMap<EventId, Option<String>>,
}

impl Recording {
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    /// Human label for a key: the name itself, or the name recorded for the id
    pub fn label(&self, key: &CorrelationKey) -> String {
        match key {
            CorrelationKey::Name(name) => name.clone().unwrap_or_default(),
            CorrelationKey::Id(id) => self.names.get(id).cloned().flatten().unwrap_or_default(),
        }
    }
}

/// Stateful single-pass recorder
///
/// **Public** - feed events in file order, then call [`EventRecorder::finish`]
pub struct EventRecorder<'a> {
    filter: &'a FilterConfig,
    metadata: &'a Metadata,
    recording: Recording,

    /// Position of each key in `recording.samples`
    sample_index: HashMap<CorrelationKey, usize>,

    /// threadId → (key → begin timestamp)
    open_intervals: HashMap<EventId, HashMap<CorrelationKey, Micros>>,

    unmatched_ends: usize,
    unknown_threads: HashSet<EventId>,
}

impl<'a> EventRecorder<'a> {
    pub fn new(filter: &'a FilterConfig, metadata: &'a Metadata, group_by: GroupBy) -> Self {
        Self {
            filter,
            metadata,
            recording: Recording {
                group_by,
                ..Default::default()
            },
            sample_index: HashMap::new(),
            open_intervals: HashMap::new(),
            unmatched_ends: 0,
            unknown_threads: HashSet::new(),
        }
    }

    /// Process one event. Non-hardware categories are ignored.
    pub fn record(&mut self, event: &TraceEvent) {
        if !event.is_hardware_event() {
            return;
        }

        let group_by = self.recording.group_by;
        let key = CorrelationKey::for_event(event, group_by);

        if let Some(op) = event.operator().filter(|op| !op.is_empty()) {
            if !key.is_zero_id() {
                self.recording.guids.insert(key.clone(), op.to_string());
            }
        }

        if event.is_null_name() || !self.is_recording_unit(&event.thread_id) {
            return;
        }

        match event.phase {
            Phase::Begin => self.begin(event, key),
            Phase::End => self.end(event, key),
            Phase::Metadata | Phase::Other => {}
        }
    }

    fn is_recording_unit(&mut self, thread_id: &EventId) -> bool {
        if self.metadata.engine_name(thread_id).is_none()
            && self.unknown_threads.insert(thread_id.clone())
        {
            debug!("Thread {:?} has no thread_name metadata, not recording", thread_id);
        }
        self.filter.is_recording_unit(self.metadata, thread_id)
    }

    fn begin(&mut self, event: &TraceEvent, key: CorrelationKey) {
        let ts = event.timestamp;
        let correlation_id = event.correlation_id_or_zero();

        if !event.has_empty_name()
            || (self.recording.group_by == GroupBy::CorrelationId
                && !self.recording.names.contains_key(&correlation_id))
        {
            self.recording
                .names
                .insert(correlation_id, event.name.clone());
        }

        self.recording
            .wall_bounds
            .entry(key.clone())
            .or_default()
            .observe_begin(ts);
        self.recording.global_bounds.observe_begin(ts);

        self.open_intervals
            .entry(event.thread_id.clone())
            .or_default()
            .insert(key, ts);
    }

    fn end(&mut self, event: &TraceEvent, key: CorrelationKey) {
        let ts = event.timestamp;

        let start = self
            .open_intervals
            .get_mut(&event.thread_id)
            .and_then(|open| open.remove(&key));

        self.recording
            .wall_bounds
            .entry(key.clone())
            .or_default()
            .observe_end(ts);
        self.recording.global_bounds.observe_end(ts);

        match start {
            Some(start) => self.push_sample(key, ts - start),
            None => self.unmatched_ends += 1,
        }
    }

    fn push_sample(&mut self, key: CorrelationKey, duration: Micros) {
        let samples = &mut self.recording.samples;
        let index = *self.sample_index.entry(key.clone()).or_insert_with(|| {
            samples.push((key, Vec::new()));
            samples.len() - 1
        });
        samples[index].1.push(duration);
    }

    /// Drop still-open intervals and hand back the accumulated tables
    pub fn finish(self) -> Recording {
        let unmatched_begins: usize = self.open_intervals.values().map(HashMap::len).sum();

        if unmatched_begins > 0 || self.unmatched_ends > 0 {
            debug!(
                "Dropped {} unmatched begin and {} unmatched end events",
                unmatched_begins, self.unmatched_ends
            );
        }

        debug!("Recorded {} nodes", self.recording.samples.len());

        self.recording
    }
}

/// Run the recorder over every event in file order
pub fn record_events(
    events: &[TraceEvent],
    metadata: &Metadata,
    filter: &FilterConfig,
    group_by: GroupBy,
) -> Recording {
    let mut recorder = EventRecorder::new(filter, metadata, group_by);
    for event in events {
        recorder.record(event);
    }
    recorder.finish()
}
