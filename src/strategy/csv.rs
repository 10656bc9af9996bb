//! CSV export strategy
//!
//! Delegates the format itself to `io::csv_format` so the header and quoting
//! rules live in one place.

use crate::io::csv_format::write_transactions_csv;
use crate::strategy::ExportStrategy;
use crate::types::{LedgerError, Transaction};
use log::info;
use std::io::Write;

/// Writes a header row followed by one comma-separated row per transaction
#[derive(Debug, Clone, Copy)]
pub struct CsvExportStrategy;

impl ExportStrategy for CsvExportStrategy {
    fn export(
        &self,
        transactions: &[Transaction],
        output: &mut dyn Write,
    ) -> Result<(), LedgerError> {
        info!("Exporting {} transactions as CSV", transactions.len());
        write_transactions_csv(transactions, output)?;
        info!("CSV export completed");
        Ok(())
    }
}
