use thiserror::Error;

/// Errors that can occur during contingency table computations
#[derive(Error, Debug, Clone, PartialEq)]
pub enum StatsError {
    // Input validation errors
    #[error("Invalid alpha parameter: {0} (must be in (0, 1))")]
    InvalidAlpha(f64),

    #[error("Table must be square, got {rows} rows and {cols} columns")]
    NotSquare { rows: usize, cols: usize },

    #[error("The length of `{axis}_scores` ({got}) must match the table's {axis} count ({expected})")]
    ScoreLength {
        axis: &'static str,
        expected: usize,
        got: usize,
    },

    #[error("Dimension mismatch: {0}")]
    DimensionMismatchMsg(String),

    #[error("Method '{method}' for {test} is not known")]
    UnsupportedMethod { test: &'static str, method: String },

    #[error("Empty input: {field} cannot be empty")]
    EmptyInput { field: &'static str },

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    // Internal errors
    #[error("Distribution error: {0}")]
    Distribution(String),
}

/// Result type for statistical operations
pub type StatsResult<T> = Result<T, StatsError>;
