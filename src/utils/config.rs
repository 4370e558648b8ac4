//! Configuration and constants for the CLI.

/// Engine-name substrings recorded when no filter is given
pub const DEFAULT_INCLUDE_TERMS: &[&str] = &["mme", "tpc"];

/// Extra include term added by `-dma`
pub const DMA_TERM: &str = "dma";

/// Separator for `-include` / `-exclude` lists
pub const TERM_SEPARATOR: char = ',';

// Categories carrying hardware timing events.
// Exact match first, then prefixes used by newer profiler versions.
pub const HARDWARE_CATEGORY: &str = "Hardware event";
pub const HARDWARE_CATEGORY_PREFIXES: &[&str] = &["HE", "SP"];

// Metadata event names
pub const PROCESS_NAME_EVENT: &str = "process_name";
pub const THREAD_NAME_EVENT: &str = "thread_name";

/// Profilers write this literal instead of omitting the name
pub const NULL_NAME: &str = "null";

// Report layout
pub const REPORT_BANNER: &str = "All measurements in microseconds (us)";
pub const REPORT_HEADER: &[&str] = &[
    "Node",
    "Guid",
    "Total count",
    "Self time",
    "Min",
    "Max",
    "Avg",
    "Wall time",
];
pub const ALL_NODES_LABEL: &str = "ALL_NODES";
pub const PLACEHOLDER: &str = "-";

/// Decimal places kept when serializing fractional values
pub const FLOAT_PRECISION: usize = 3;

// Input/output file suffixes
pub const INPUT_SUFFIX: &str = ".json";
pub const OUTPUT_SUFFIX: &str = ".csv";
