//! Output writers for aggregated reports.
//!
//! This module handles writing data to disk:
//! - CSV summary reports (excel dialect)

pub mod csv;

// Re-export main functions
pub use self::csv::{derive_output_path, render_report, write_csv, write_report};
