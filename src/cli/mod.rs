// CLI module
// Start-up arguments and the grammar of the interactive prompt

mod args;
pub mod command;

pub use args::{CliArgs, ExportFormat, LogLevel};
pub use command::{Command, ReplLine};

use clap::Parser;

/// Parse command-line arguments using clap
///
/// If parsing fails (invalid arguments or `--help`), clap displays an error
/// message or help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}
