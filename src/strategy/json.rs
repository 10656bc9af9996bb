//! JSON export strategy
//!
//! Produces an indented array of objects with the same field names as the CSV
//! header. Amounts are JSON numbers written with their exact scale.

use crate::strategy::{sorted_by_id, ExportStrategy};
use crate::types::{LedgerError, Transaction};
use log::info;
use std::io::Write;

#[derive(Debug, Clone, Copy)]
pub struct JsonExportStrategy;

impl ExportStrategy for JsonExportStrategy {
    fn export(
        &self,
        transactions: &[Transaction],
        output: &mut dyn Write,
    ) -> Result<(), LedgerError> {
        info!("Exporting {} transactions as JSON", transactions.len());

        let sorted = sorted_by_id(transactions);
        serde_json::to_writer_pretty(&mut *output, &sorted)?;
        writeln!(output)?;
        output.flush()?;

        info!("JSON export completed");
        Ok(())
    }
}
