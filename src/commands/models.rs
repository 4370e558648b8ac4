use std::ffi::OsString;
use std::path::PathBuf;

use crate::aggregator::AggregatorConfig;

/// Arguments for the convert command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone, Default)]
pub struct ConvertArgs {
    /// Input trace file (must contain `.json`)
    pub input: String,

    /// Output CSV path; derived from `input` when absent
    pub output: Option<PathBuf>,

    /// Filter and grouping settings
    pub config: AggregatorConfig,

    /// Also print the CSV to stdout
    pub print_csv: bool,
}

/// Long flags that are also accepted with a single dash (`-include`)
pub const LEGACY_LONG_FLAGS: &[&str] = &["include", "exclude", "dma", "group_by_name", "log_level"];

/// Rewrite single-dash long flags to their double-dash form for clap
///
/// Handles both `-include tpc` and `-include=tpc`. Everything else,
/// including short flags like `-o`, passes through untouched.
pub fn normalize_legacy_flags<I>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .map(|arg| {
            let Some(text) = arg.to_str() else {
                return arg;
            };
            let Some(flag) = text.strip_prefix('-').filter(|rest| !rest.starts_with('-')) else {
                return arg;
            };
            let name = flag.split('=').next().unwrap_or(flag);
            if LEGACY_LONG_FLAGS.contains(&name) {
                OsString::from(format!("-{}", text))
            } else {
                arg
            }
        })
        .collect()
}

/// Map a numeric `--log_level` (0 TRACE .. 6 OFF) to an env_logger filter
pub fn log_filter_for_level(level: u8) -> &'static str {
    match level {
        0 => "trace",
        1 => "debug",
        2 => "info",
        3 => "warn",
        4 | 5 => "error",
        _ => "off",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalize(args: &[&str]) -> Vec<String> {
        normalize_legacy_flags(args.iter().map(OsString::from))
            .into_iter()
            .map(|a| a.into_string().unwrap())
            .collect()
    }

    #[test]
    fn test_normalize_legacy_flags() {
        assert_eq!(
            normalize(&["trace-csv", "t.json", "-include", "tpc", "-dma", "-group_by_name"]),
            vec!["trace-csv", "t.json", "--include", "tpc", "--dma", "--group_by_name"]
        );
    }

    #[test]
    fn test_normalize_keeps_short_and_double_dash() {
        assert_eq!(
            normalize(&["-o", "out.csv", "--exclude", "dma", "-v", "-exclude=nic"]),
            vec!["-o", "out.csv", "--exclude", "dma", "-v", "--exclude=nic"]
        );
    }

    #[test]
    fn test_log_filter_for_level() {
        assert_eq!(log_filter_for_level(0), "trace");
        assert_eq!(log_filter_for_level(3), "warn");
        assert_eq!(log_filter_for_level(5), "error");
        assert_eq!(log_filter_for_level(6), "off");
    }
}
