//! Grammar of the interactive prompt
//!
//! Each input line is split on whitespace and parsed with clap, so usage
//! errors and `help` output come for free. Trailing multi-word arguments
//! (category names, search text, paths) are collected and joined with a
//! single space.

use crate::app::report::MonthKey;
use crate::cli::ExportFormat;
use crate::types::TransactionId;
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;

/// One line typed at the prompt
#[derive(Parser, Debug, PartialEq)]
#[command(
    name = "ledger",
    no_binary_name = true,
    disable_version_flag = true,
    subcommand_required = true
)]
pub struct ReplLine {
    #[command(subcommand)]
    pub command: Command,
}

impl ReplLine {
    /// Parse a raw input line
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(line.split_whitespace())
    }
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Command {
    /// Import transactions from one or more CSV files
    Import {
        #[arg(required = true, value_name = "FILE")]
        files: Vec<String>,
    },
    /// List transactions
    List {
        #[command(subcommand)]
        scope: ListScope,
    },
    /// Filter transactions by category (substring, case-insensitive)
    By {
        #[command(subcommand)]
        target: ByTarget,
    },
    /// Transactions with an amount of at least AMOUNT
    Over {
        #[arg(allow_hyphen_values = true)]
        amount: Decimal,
    },
    /// Search payee and category (case-insensitive)
    Search {
        #[arg(required = true, allow_hyphen_values = true)]
        text: Vec<String>,
    },
    /// Change the category of one transaction
    Set {
        #[command(subcommand)]
        target: SetTarget,
    },
    /// Rename a category on every transaction that carries it
    Rename {
        #[command(subcommand)]
        target: RenameTarget,
    },
    /// Remove a transaction
    Remove {
        #[arg(allow_hyphen_values = true)]
        id: TransactionId,
    },
    /// Income and expense summaries
    Stats {
        #[command(subcommand)]
        period: StatsPeriod,
    },
    /// Export every transaction to a file
    Export {
        format: ExportFormat,
        #[arg(required = true)]
        path: Vec<String>,
        /// Overwrite an existing file without asking
        #[arg(long)]
        force: bool,
    },
    /// Quit the application
    #[command(alias = "quit")]
    Exit,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ListScope {
    /// Every transaction
    All,
    /// Transactions dated in one month
    Month {
        #[arg(value_name = "YYYY-MM")]
        month: MonthKey,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum ByTarget {
    Category {
        #[arg(required = true)]
        name: Vec<String>,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum SetTarget {
    Category {
        #[arg(allow_hyphen_values = true)]
        id: TransactionId,
        #[arg(required = true)]
        name: Vec<String>,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum RenameTarget {
    Category {
        old: String,
        #[arg(required = true)]
        new: Vec<String>,
    },
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum StatsPeriod {
    /// Totals and top expense categories for one month
    Month {
        #[arg(value_name = "YYYY-MM")]
        month: MonthKey,
    },
    /// Per-month totals for one year
    Yearly {
        #[arg(value_name = "YYYY")]
        year: i32,
    },
}

/// Join collected words back into one argument
pub fn join_words(words: &[String]) -> String {
    words.join(" ")
}
