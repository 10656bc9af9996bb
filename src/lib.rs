//! Budget Ledger Library
//! # Overview
//!
//! This library provides an in-memory personal-finance ledger: a concurrent
//! CSV import pipeline feeding a thread-safe transaction store, with queries,
//! statistics and exports on top.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Transaction, ImportOutcome, errors)
//! - [`cli`] - Start-up arguments and the interactive command grammar
//! - [`core`] - Business logic components:
//!   - [`core::parser`] - Field list to validated transaction
//!   - [`core::repository`] - Concurrency-safe keyed store
//!   - [`core::importer`] - Bounded-concurrency, cancellable file import
//! - [`io`] - Line reading for imports and CSV writing for exports
//! - [`strategy`] - Pluggable export formats (CSV, JSON)
//! - [`app`] - Command loop, reports and printing
//!
//! # Import Semantics
//!
//! - The first line of every file is a header and is never parsed
//! - Blank lines are skipped and not counted
//! - A record whose id already exists in the store is a duplicate; the stored
//!   record is left untouched
//! - Any other failing line is malformed and counted once
//! - `imported + duplicate + malformed` equals the number of non-blank data
//!   lines across every readable file
//!
//! # Transaction Invariants
//!
//! Each transaction maintains:
//! - a non-empty trimmed `payee`
//! - a non-empty upper-case `currency`
//! - an `amount` within ±1,000,000
//! - a non-empty `category`, `Uncategorized` by default

// Module declarations
pub mod app;
pub mod cli;
pub mod core;
pub mod io;
pub mod logging;
pub mod strategy;
pub mod types;

pub use app::CommandLoop;
pub use core::{
    parse_record, ImportConfig, ImportService, InMemoryRepository, Repository, TransactionStore,
};
pub use io::write_transactions_csv;
pub use types::{ImportOutcome, LedgerError, Transaction, TransactionId, ValidationError};
