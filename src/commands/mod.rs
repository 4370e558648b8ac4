//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod convert;
pub mod models;

// Re-export main command functions
pub use convert::{execute_convert, resolve_output_path, validate_args};
pub use models::{log_filter_for_level, normalize_legacy_flags, ConvertArgs};
