//! Statistical hypothesis testing for contingency tables
//!
//! - Square tables: Bowker symmetry, Stuart-Maxwell / Bhapkar homogeneity
//! - Ordinal association: linear-by-linear trend test
//! - Stratified 2x2 tables: Mantel-Haenszel, Breslow-Day
//! - Paired binary data: McNemar, Cochran's Q

pub mod ordinal;

pub use ordinal::{ordinal_association, OrdinalAssociationResult};
pub use paired::{cochrans_q, mcnemar, CochransQResult, McNemarResult};
pub use square::SquareTable;
pub use stratified::StratifiedTables;

/// Format a statistic the way summary tables show it
pub(crate) fn fmt3(x: f64) -> String {
    format!("{:.3}", x)
}
