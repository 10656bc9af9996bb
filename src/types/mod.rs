//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `transaction`: the transaction entity and its identifiers
//! - `outcome`: the per-import summary
//! - `error`: Error types for the ledger

pub mod error;
pub mod outcome;
pub mod transaction;

pub use error::{LedgerError, ValidationError};
pub use outcome::{ImportOutcome, LineOutcome};
pub use transaction::{Keyed, Transaction, TransactionId, DEFAULT_CATEGORY, MAX_ABS_AMOUNT};
