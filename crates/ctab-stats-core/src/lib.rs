//! ctab-stats-core: Core contingency table inference library
//!
//! This crate provides hypothesis tests and pooled estimators for
//! cross-tabulated categorical data, designed for use directly from Rust or
//! via the C FFI crate.

pub mod distributions;
pub mod errors;
pub mod summary;
pub mod table;
pub mod tests;
pub mod types;

pub use errors::{StatsError, StatsResult};
pub use summary::SummaryTable;
pub use table::{ContingencyTable, LabeledTable};
pub use types::*;
