//! Export strategy module
//!
//! This module defines the Strategy pattern for writing a store snapshot to an
//! output format. Each format is a separate implementation selected at runtime
//! from the requested [`ExportFormat`].

use crate::cli::ExportFormat;
use crate::types::{LedgerError, Transaction};
use std::io::Write;

pub mod csv;
pub mod json;

pub use self::csv::CsvExportStrategy;
pub use self::json::JsonExportStrategy;

/// Export strategy trait
///
/// Implementations serialize a snapshot of transactions to a writer. The
/// snapshot is taken by the caller, so exporting never holds store locks.
pub trait ExportStrategy: Send + Sync {
    /// Write the transactions to output
    ///
    /// # Arguments
    ///
    /// * `transactions` - Snapshot of the transactions to export
    /// * `output` - Mutable reference to the destination writer
    ///
    /// # Returns
    ///
    /// * `Ok(())` if every record was written
    /// * `Err(LedgerError::ExportError)` if serialization or writing failed
    fn export(&self, transactions: &[Transaction], output: &mut dyn Write)
        -> Result<(), LedgerError>;
}

/// Create an export strategy for the specified format
///
/// # Arguments
///
/// * `format` - The output format to produce
///
/// # Returns
///
/// A boxed trait object implementing the ExportStrategy trait
pub fn create_exporter(format: ExportFormat) -> Box<dyn ExportStrategy> {
    match format {
        ExportFormat::Csv => Box::new(CsvExportStrategy),
        ExportFormat::Json => Box::new(JsonExportStrategy),
    }
}

/// Sort a snapshot by id for deterministic output
pub(crate) fn sorted_by_id(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by_key(|transaction| transaction.id());
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rstest::rstest;
    use rust_decimal::Decimal;

    #[rstest]
    #[case::csv(ExportFormat::Csv, "Id,Timestamp")]
    #[case::json(ExportFormat::Json, "[")]
    fn test_create_exporter(#[case] format: ExportFormat, #[case] prefix: &str) {
        let transaction = Transaction::new(
            1,
            NaiveDate::from_ymd_opt(2024, 1, 5).unwrap(),
            "Grocer",
            Decimal::new(-2599, 2),
            "EUR",
            Some("Food"),
        )
        .unwrap();

        let mut output = Vec::new();
        create_exporter(format)
            .export(&[transaction], &mut output)
            .unwrap();

        assert!(String::from_utf8(output).unwrap().starts_with(prefix));
    }
}
