//! Contingency table storage
//!
//! [`ContingencyTable`] is an immutable dense matrix of counts stored in
//! row-major order. [`LabeledTable`] attaches category labels to both axes
//! and provides cross-tabulation of raw observations plus the union
//! reindexing used to square a table whose rows and columns carry different
//! category sets.

use std::collections::{BTreeMap, BTreeSet};

use crate::errors::{StatsError, StatsResult};

/// Dense two-way table of non-negative counts
#[derive(Debug, Clone, PartialEq)]
pub struct ContingencyTable {
    data: Vec<f64>,
    n_rows: usize,
    n_cols: usize,
}

impl ContingencyTable {
    /// Build a table from rows of counts
    ///
    /// All rows must have the same length and every cell must be a finite,
    /// non-negative number. An empty `rows` gives a 0×0 table.
    pub fn new(rows: Vec<Vec<f64>>) -> StatsResult<Self> {
        let n_rows = rows.len();
        let n_cols = rows.first().map_or(0, Vec::len);

        for (i, row) in rows.iter().enumerate() {
            if row.len() != n_cols {
                return Err(StatsError::DimensionMismatchMsg(format!(
                    "Row {} has {} columns, expected {}",
                    i,
                    row.len(),
                    n_cols
                )));
            }
        }

        let data: Vec<f64> = rows.into_iter().flatten().collect();
        Self::from_row_major(data, n_rows, n_cols)
    }

    /// Build a table from integer counts
    pub fn from_counts(rows: &[Vec<usize>]) -> StatsResult<Self> {
        Self::new(
            rows.iter()
                .map(|row| row.iter().map(|&x| x as f64).collect())
                .collect(),
        )
    }

    /// Build a table from a flat row-major buffer
    pub fn from_row_major(data: Vec<f64>, n_rows: usize, n_cols: usize) -> StatsResult<Self> {
        if data.len() != n_rows * n_cols {
            return Err(StatsError::DimensionMismatchMsg(format!(
                "Buffer has {} cells, expected {} x {}",
                data.len(),
                n_rows,
                n_cols
            )));
        }
        if let Some(bad) = data.iter().find(|x| !x.is_finite() || **x < 0.0) {
            return Err(StatsError::InvalidInput(format!(
                "Table cells must be finite non-negative counts, found {}",
                bad
            )));
        }

        Ok(Self {
            data,
            n_rows,
            n_cols,
        })
    }

    /// Number of rows
    pub fn n_rows(&self) -> usize {
        self.n_rows
    }

    /// Number of columns
    pub fn n_cols(&self) -> usize {
        self.n_cols
    }

    pub fn is_square(&self) -> bool {
        self.n_rows == self.n_cols
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Cell at row `i`, column `j`
    ///
    /// # Panics
    /// Panics if the index is out of bounds.
    pub fn get(&self, i: usize, j: usize) -> f64 {
        assert!(i < self.n_rows && j < self.n_cols, "cell ({}, {}) out of bounds", i, j);
        self.data[i * self.n_cols + j]
    }

    /// Row `i` as a slice
    pub fn row(&self, i: usize) -> &[f64] {
        &self.data[i * self.n_cols..(i + 1) * self.n_cols]
    }

    /// Row-major cell buffer
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// Sum of all cells
    pub fn total(&self) -> f64 {
        self.data.iter().sum()
    }

    /// Row marginal totals
    pub fn row_sums(&self) -> Vec<f64> {
        (0..self.n_rows).map(|i| self.row(i).iter().sum()).collect()
    }

    /// Column marginal totals
    pub fn col_sums(&self) -> Vec<f64> {
        let mut sums = vec![0.0; self.n_cols];
        for i in 0..self.n_rows {
            for (s, x) in sums.iter_mut().zip(self.row(i)) {
                *s += x;
            }
        }
        sums
    }

    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for j in 0..self.n_cols {
            for i in 0..self.n_rows {
                data.push(self.data[i * self.n_cols + j]);
            }
        }
        Self {
            data,
            n_rows: self.n_cols,
            n_cols: self.n_rows,
        }
    }

    /// Copy out as nested rows
    pub fn to_rows(&self) -> Vec<Vec<f64>> {
        (0..self.n_rows).map(|i| self.row(i).to_vec()).collect()
    }
}

/// Contingency table with category labels on both axes
#[derive(Debug, Clone, PartialEq)]
pub struct LabeledTable<L> {
    row_labels: Vec<L>,
    col_labels: Vec<L>,
    table: ContingencyTable,
}

impl<L: Ord + Clone> LabeledTable<L> {
    /// Attach labels to an existing table
    pub fn new(
        row_labels: Vec<L>,
        col_labels: Vec<L>,
        table: ContingencyTable,
    ) -> StatsResult<Self> {
        if row_labels.len() != table.n_rows() || col_labels.len() != table.n_cols() {
            return Err(StatsError::DimensionMismatchMsg(format!(
                "{} row labels and {} column labels for a {} x {} table",
                row_labels.len(),
                col_labels.len(),
                table.n_rows(),
                table.n_cols()
            )));
        }
        Ok(Self {
            row_labels,
            col_labels,
            table,
        })
    }

    /// Cross-tabulate paired observations
    ///
    /// Rows are the distinct values of `rows`, columns the distinct values
    /// of `cols`, both in sorted order.
    pub fn crosstab(rows: &[L], cols: &[L]) -> StatsResult<Self> {
        let row_levels: BTreeSet<L> = rows.iter().cloned().collect();
        let col_levels: BTreeSet<L> = cols.iter().cloned().collect();
        Self::crosstab_with_levels(
            rows,
            cols,
            row_levels.into_iter().collect(),
            col_levels.into_iter().collect(),
        )
    }

    /// Cross-tabulate onto fixed sorted level sets
    ///
    /// Observations whose value is not among the levels are an error.
    pub(crate) fn crosstab_with_levels(
        rows: &[L],
        cols: &[L],
        row_levels: Vec<L>,
        col_levels: Vec<L>,
    ) -> StatsResult<Self> {
        if rows.len() != cols.len() {
            return Err(StatsError::DimensionMismatchMsg(format!(
                "Cannot cross-tabulate columns of length {} and {}",
                rows.len(),
                cols.len()
            )));
        }

        let row_index: BTreeMap<&L, usize> =
            row_levels.iter().enumerate().map(|(i, l)| (l, i)).collect();
        let col_index: BTreeMap<&L, usize> =
            col_levels.iter().enumerate().map(|(j, l)| (l, j)).collect();

        let n_cols = col_levels.len();
        let mut data = vec![0.0; row_levels.len() * n_cols];
        for (r, c) in rows.iter().zip(cols) {
            match (row_index.get(r), col_index.get(c)) {
                (Some(&i), Some(&j)) => data[i * n_cols + j] += 1.0,
                _ => {
                    return Err(StatsError::InvalidInput(
                        "Observation outside the declared category levels".into(),
                    ))
                }
            }
        }

        let table = ContingencyTable::from_row_major(data, row_levels.len(), n_cols)?;
        Self::new(row_levels, col_levels, table)
    }

    pub fn row_labels(&self) -> &[L] {
        &self.row_labels
    }

    pub fn col_labels(&self) -> &[L] {
        &self.col_labels
    }

    pub fn table(&self) -> &ContingencyTable {
        &self.table
    }

    pub fn into_table(self) -> ContingencyTable {
        self.table
    }

    /// Reindex both axes onto new label sequences
    ///
    /// Cells for labels absent from the current table are filled with zero.
    pub fn reindex(&self, row_labels: Vec<L>, col_labels: Vec<L>) -> StatsResult<Self> {
        let old_rows: BTreeMap<&L, usize> =
            self.row_labels.iter().enumerate().map(|(i, l)| (l, i)).collect();
        let old_cols: BTreeMap<&L, usize> =
            self.col_labels.iter().enumerate().map(|(j, l)| (l, j)).collect();

        let mut data = Vec::with_capacity(row_labels.len() * col_labels.len());
        for r in &row_labels {
            for c in &col_labels {
                let value = match (old_rows.get(r), old_cols.get(c)) {
                    (Some(&i), Some(&j)) => self.table.get(i, j),
                    _ => 0.0,
                };
                data.push(value);
            }
        }

        let table = ContingencyTable::from_row_major(data, row_labels.len(), col_labels.len())?;
        Self::new(row_labels, col_labels, table)
    }

    /// Square the table on the sorted union of row and column labels
    ///
    /// Only a table with unequal row and column counts is reindexed; an
    /// already square table is returned unchanged, whatever its labels.
    pub fn to_square(&self) -> StatsResult<Self> {
        if self.row_labels.len() == self.col_labels.len() {
            return Ok(self.clone());
        }
        let union: Vec<L> = self
            .row_labels
            .iter()
            .chain(&self.col_labels)
            .cloned()
            .collect::<BTreeSet<L>>()
            .into_iter()
            .collect();
        self.reindex(union.clone(), union)
    }
}
