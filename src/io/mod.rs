//! I/O module
//!
//! Handles reading import files and writing exports.
//!
//! # Components
//!
//! - `line_reader` - Asynchronous reader yielding numbered, split data lines
//! - `csv_format` - CSV export serialization

pub mod csv_format;
pub mod line_reader;

pub use csv_format::{write_transactions_csv, EXPORT_HEADER};
pub use line_reader::{LineReader, RawLine};
