//! Core business logic module
//!
//! This module contains the import pipeline and the store it writes into:
//! - `traits` - Repository abstraction shared by the importer and the commands
//! - `repository` - Concurrent in-memory store (DashMap)
//! - `parser` - Field parsing and validation of a single record
//! - `importer` - Concurrent multi-file import orchestration

pub mod importer;
pub mod parser;
pub mod repository;
pub mod traits;

pub use importer::{ImportConfig, ImportService};
pub use parser::parse_record;
pub use repository::{InMemoryRepository, TransactionStore};
pub use traits::Repository;
