//! Input schema for Trace Event Format profiler logs.
//!
//! Profiler output is schema-loose: optional fields go missing, and scalar
//! fields occasionally change type between profiler versions. Every field
//! here is therefore defaulted, and string-like fields accept any JSON scalar.

use super::values::{EventId, Micros};
use crate::utils::config::{HARDWARE_CATEGORY, HARDWARE_CATEGORY_PREFIXES, NULL_NAME};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Event phase (`ph` field)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum Phase {
    /// Metadata marker (process/thread names)
    #[serde(rename = "M")]
    Metadata,

    /// Interval begin
    #[serde(rename = "B")]
    Begin,

    /// Interval end
    #[serde(rename = "E")]
    End,

    /// Any phase the aggregator does not interpret (X, i, C, ...)
    #[default]
    #[serde(other)]
    Other,
}

/// Nested `args` object of a trace event
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EventArgs {
    /// Display name carried by metadata events
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub name: Option<String>,

    /// GUID-like operator identifier
    #[serde(default, deserialize_with = "lenient_opt_string")]
    pub op: Option<String>,
}

/// One record of the `traceEvents` array
///
/// Missing fields take their values from [`TraceEvent::default`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TraceEvent {
    #[serde(rename = "cat", deserialize_with = "lenient_string")]
    pub category: String,

    #[serde(rename = "ph")]
    pub phase: Phase,

    /// `None` when the profiler wrote an explicit JSON `null`
    #[serde(deserialize_with = "lenient_opt_string")]
    pub name: Option<String>,

    #[serde(rename = "ts")]
    pub timestamp: Micros,

    #[serde(rename = "tid")]
    pub thread_id: EventId,

    #[serde(rename = "pid")]
    pub process_id: EventId,

    #[serde(rename = "id")]
    pub correlation_id: Option<EventId>,

    pub args: Option<EventArgs>,
}

impl Default for TraceEvent {
    fn default() -> Self {
        Self {
            category: String::new(),
            phase: Phase::default(),
            name: Some(String::new()),
            timestamp: Micros::default(),
            thread_id: EventId::default(),
            process_id: EventId::default(),
            correlation_id: None,
            args: None,
        }
    }
}

impl TraceEvent {
    /// True for categories that carry hardware begin/end timing
    pub fn is_hardware_event(&self) -> bool {
        self.category == HARDWARE_CATEGORY
            || HARDWARE_CATEGORY_PREFIXES
                .iter()
                .any(|prefix| self.category.starts_with(prefix))
    }

    /// True unless the name is empty or the `"null"` sentinel.
    /// A JSON `null` name counts as named.
    pub fn has_name(&self) -> bool {
        !self.has_empty_name() && !self.is_null_name()
    }

    pub fn has_empty_name(&self) -> bool {
        self.name.as_deref() == Some("")
    }

    pub fn is_null_name(&self) -> bool {
        self.name.as_deref() == Some(NULL_NAME)
    }

    /// Correlation id, 0 when absent
    pub fn correlation_id_or_zero(&self) -> EventId {
        self.correlation_id.clone().unwrap_or_default()
    }

    /// `args.name`, if present
    pub fn arg_name(&self) -> Option<&str> {
        self.args.as_ref().and_then(|a| a.name.as_deref())
    }

    /// `args.op`, if present
    pub fn operator(&self) -> Option<&str> {
        self.args.as_ref().and_then(|a| a.op.as_deref())
    }
}

/// Stringify any JSON scalar
fn scalar_to_string(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(scalar_to_string)
}

fn lenient_opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Null => None,
        other => Some(scalar_to_string(other)),
    })
}
