//! Interactive application layer
//!
//! - `command_loop` - Prompt dispatcher tying the store, importer and exporters together
//! - `report` - Filters and statistics over a snapshot
//! - `printer` - Plain-text tables and money formatting

pub mod command_loop;
pub mod printer;
pub mod report;

pub use command_loop::{CommandLoop, Flow};
pub use report::{MonthKey, MonthlyStats, YearlyStats};
