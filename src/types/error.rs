//! Error types for the ledger
//!
//! This module defines all error types that can occur while importing, querying,
//! and exporting transactions. Errors are designed to be descriptive enough to
//! locate the offending record from a log line alone.
//!
//! # Error Categories
//!
//! - **Data Errors**: malformed lines and invalid field values. These are counted
//!   by the importer and never abort an import.
//! - **Resource Errors**: missing files and I/O faults. The affected file is
//!   skipped, the import continues.
//! - **Cancellation**: a distinct terminal outcome of an import, not a fault.

use rust_decimal::Decimal;
use thiserror::Error;

use super::transaction::{TransactionId, MAX_ABS_AMOUNT};

/// Violations of the transaction construction invariants
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Payee is empty after trimming
    #[error("Payee cannot be empty.")]
    EmptyPayee,

    /// Currency is empty after trimming
    #[error("Currency cannot be empty.")]
    EmptyCurrency,

    /// Absolute amount exceeds the configured maximum
    #[error("Amount {amount} must be within ±{max}.")]
    AmountOutOfRange {
        /// The rejected amount
        amount: Decimal,
        /// The largest accepted absolute amount
        max: Decimal,
    },
}

impl ValidationError {
    /// Create an AmountOutOfRange error against [`MAX_ABS_AMOUNT`]
    pub fn amount_out_of_range(amount: Decimal) -> Self {
        ValidationError::AmountOutOfRange {
            amount,
            max: MAX_ABS_AMOUNT,
        }
    }
}

/// Main error type for the ledger
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LedgerError {
    /// File not found at the specified path
    ///
    /// During import this is a resource error: the file is skipped.
    #[error("File not found: {path}")]
    FileNotFound {
        /// The path that was not found
        path: String,
    },

    /// I/O error occurred while reading or writing files
    #[error("I/O error: {message}")]
    IoError {
        /// Description of the I/O error
        message: String,
    },

    /// A line could not be decoded (e.g. invalid UTF-8)
    #[error("Parse error{}: {message}", line.map(|l| format!(" at line {}", l)).unwrap_or_default())]
    ParseError {
        /// Line number where the error occurred (if available)
        line: Option<u64>,
        /// Description of the parsing error
        message: String,
    },

    /// A line has fewer fields than a transaction requires
    #[error("Line {line}: expected at least {expected} columns, found {found}.")]
    MissingFields {
        line: u64,
        expected: usize,
        found: usize,
    },

    /// A field could not be parsed into its expected type
    #[error("Line {line}: invalid {field} '{value}'.")]
    InvalidField {
        /// Line number of the record
        line: u64,
        /// Name of the offending field
        field: &'static str,
        /// The raw field value
        value: String,
    },

    /// All fields parsed but the transaction invariants were violated
    #[error("Line {line}: {source}")]
    InvalidRecord {
        line: u64,
        source: ValidationError,
    },

    /// No transaction with the given id exists
    #[error("Transaction {id} not found")]
    TransactionNotFound { id: TransactionId },

    /// Writing an export failed
    #[error("Export failed: {message}")]
    ExportError { message: String },

    /// The import was cancelled before completion
    ///
    /// Callers treat this as "no summary available", never as a partial summary.
    #[error("Import cancelled")]
    Cancelled,
}

// Conversion from io::Error to LedgerError
impl From<std::io::Error> for LedgerError {
    fn from(error: std::io::Error) -> Self {
        LedgerError::IoError {
            message: error.to_string(),
        }
    }
}

// Conversion from csv::Error (export side)
impl From<csv::Error> for LedgerError {
    fn from(error: csv::Error) -> Self {
        LedgerError::ExportError {
            message: error.to_string(),
        }
    }
}

impl From<serde_json::Error> for LedgerError {
    fn from(error: serde_json::Error) -> Self {
        LedgerError::ExportError {
            message: error.to_string(),
        }
    }
}

// Helper functions for creating common errors

impl LedgerError {
    /// Create a FileNotFound error
    pub fn file_not_found(path: &std::path::Path) -> Self {
        LedgerError::FileNotFound {
            path: path.display().to_string(),
        }
    }

    /// Create an InvalidField error
    pub fn invalid_field(line: u64, field: &'static str, value: &str) -> Self {
        LedgerError::InvalidField {
            line,
            field,
            value: value.to_string(),
        }
    }

    /// Create an InvalidRecord error
    pub fn invalid_record(line: u64, source: ValidationError) -> Self {
        LedgerError::InvalidRecord { line, source }
    }

    /// Create a TransactionNotFound error
    pub fn transaction_not_found(id: TransactionId) -> Self {
        LedgerError::TransactionNotFound { id }
    }

    /// Whether the error is an I/O fault rather than a data error
    pub fn is_io_error(&self) -> bool {
        matches!(self, LedgerError::IoError { .. })
    }
}
