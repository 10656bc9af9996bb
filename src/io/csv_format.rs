//! CSV format handling for transaction export
//!
//! This module centralizes the CSV output concerns:
//! - The export header
//! - Conversion of a transaction into its output fields
//! - Serialization of a snapshot to any writer
//!
//! All functions are pure apart from writing to the provided writer.

use crate::core::parser::DATE_FORMAT;
use crate::strategy::sorted_by_id;
use crate::types::{LedgerError, Transaction};
use csv::{QuoteStyle, WriterBuilder};
use std::io::Write;

/// Header row of the CSV export
pub const EXPORT_HEADER: [&str; 6] = ["Id", "Timestamp", "Payee", "Amount", "Currency", "Category"];

/// Output fields of one transaction, in header order
pub fn transaction_fields(transaction: &Transaction) -> [String; 6] {
    [
        transaction.id().to_string(),
        transaction.timestamp().format(DATE_FORMAT).to_string(),
        transaction.payee().to_string(),
        transaction.amount().to_string(),
        transaction.currency().to_string(),
        transaction.category().to_string(),
    ]
}

/// Write transactions to CSV format
///
/// Writes the header followed by one row per transaction, sorted by id for
/// deterministic output. Fields containing a comma or a quote are quoted, with
/// embedded quotes doubled.
///
/// # Arguments
///
/// * `transactions` - Snapshot of the transactions to write
/// * `output` - Mutable reference to a writer for outputting CSV
///
/// # Returns
///
/// * `Ok(())` if writing succeeded
/// * `Err(LedgerError::ExportError)` if a write error occurred
pub fn write_transactions_csv(
    transactions: &[Transaction],
    output: &mut dyn Write,
) -> Result<(), LedgerError> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Necessary)
        .from_writer(output);

    writer.write_record(EXPORT_HEADER)?;

    // Sort by id for deterministic output
    for transaction in sorted_by_id(transactions) {
        writer.write_record(&transaction_fields(transaction))?;
    }

    writer.flush()?;
    Ok(())
}
