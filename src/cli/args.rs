use crate::core::ImportConfig;
use clap::{Parser, ValueEnum};
use log::LevelFilter;
use std::path::PathBuf;

/// Interactive personal-finance ledger
#[derive(Parser, Debug)]
#[command(name = "budget-ledger")]
#[command(about = "Import, query and export personal transactions", long_about = None)]
pub struct CliArgs {
    /// Transaction files imported before the prompt starts
    #[arg(value_name = "FILES", help = "CSV files to import at start-up")]
    pub files: Vec<PathBuf>,

    /// Maximum number of files imported concurrently
    #[arg(
        long = "max-concurrent",
        value_name = "COUNT",
        help = "Maximum number of files imported concurrently (default: CPU cores)"
    )]
    pub max_concurrent_files: Option<usize>,

    /// Minimum level of log messages written to stderr
    #[arg(
        long = "log-level",
        value_name = "LEVEL",
        default_value = "info",
        help = "Log level: off, error, warn, info, debug or trace (RUST_LOG also applies)"
    )]
    pub log_level: LogLevel,
}

/// Log verbosity accepted on the command line
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Off => LevelFilter::Off,
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Output formats supported by `export`
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl CliArgs {
    /// Create an ImportConfig from CLI arguments
    ///
    /// Falls back to the default when `--max-concurrent` is absent. A value of
    /// zero is replaced by the default with a warning.
    pub fn to_import_config(&self) -> ImportConfig {
        match self.max_concurrent_files {
            Some(count) => ImportConfig::new(count),
            None => ImportConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::no_files(&["program"], 0)]
    #[case::one_file(&["program", "a.csv"], 1)]
    #[case::several_files(&["program", "a.csv", "b.csv", "c.csv"], 3)]
    fn test_files(#[case] args: &[&str], #[case] expected: usize) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.files.len(), expected);
    }

    #[rstest]
    #[case::default(&["program"], num_cpus::get())]
    #[case::custom(&["program", "--max-concurrent", "3", "a.csv"], 3)]
    #[case::zero_falls_back(&["program", "--max-concurrent", "0"], num_cpus::get())]
    fn test_import_config(#[case] args: &[&str], #[case] expected: usize) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(parsed.to_import_config().max_concurrent_files, expected);
    }

    #[rstest]
    #[case::default(&["program"], LevelFilter::Info)]
    #[case::debug(&["program", "--log-level", "debug"], LevelFilter::Debug)]
    #[case::off(&["program", "--log-level", "off"], LevelFilter::Off)]
    fn test_log_level(#[case] args: &[&str], #[case] expected: LevelFilter) {
        let parsed = CliArgs::try_parse_from(args).unwrap();
        assert_eq!(LevelFilter::from(parsed.log_level), expected);
    }

    #[rstest]
    #[case::invalid_level(&["program", "--log-level", "loud"])]
    #[case::negative_concurrency(&["program", "--max-concurrent", "-1"])]
    fn test_parsing_errors(#[case] args: &[&str]) {
        assert!(CliArgs::try_parse_from(args).is_err());
    }
}
