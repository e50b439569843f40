//! Ordinal association (linear-by-linear test)

use crate::distributions::normal_cdf;
use crate::table::ContingencyTable;
use crate::types::AssociationMethod;
use crate::{StatsError, StatsResult};

/// Result of the linear-by-linear association test
#[derive(Debug, Clone)]
pub struct OrdinalAssociationResult {
    /// Test statistic: row_scores' * table * col_scores
    pub statistic: f64,
    /// Mean of the statistic under independence
    pub null_mean: f64,
    /// Standard deviation of the statistic under independence
    pub null_std: f64,
    /// Standardized statistic
    pub z_score: f64,
    /// Two-sided p-value from the standard normal
    pub p_value: f64,
}

impl OrdinalAssociationResult {
    /// The z-score and p-value alone
    pub fn z_and_p(&self) -> (f64, f64) {
        (self.z_score, self.p_value)
    }
}

fn check_scores(
    scores: Option<&[f64]>,
    len: usize,
    axis: &'static str,
) -> StatsResult<Vec<f64>> {
    match scores {
        None => Ok((0..len).map(|i| i as f64).collect()),
        Some(s) if s.len() == len => Ok(s.to_vec()),
        Some(s) => Err(StatsError::ScoreLength {
            axis,
            expected: len,
            got: s.len(),
        }),
    }
}

/// Assess row/column association in a table with ordinal rows and columns
///
/// Rows and columns are weighted by `row_scores` and `col_scores`
/// (defaulting to 0, 1, ...). The statistic `u' T v` is standardized with
/// its exact permutation mean and variance given the margins. Using the
/// default scores gives the Cochran-Armitage trend test.
///
/// For nominal factors, use a Pearson chi-square test instead.
///
/// # Arguments
/// * `table` - R x C contingency table
/// * `row_scores` - Optional scores of length R
/// * `col_scores` - Optional scores of length C
/// * `method` - Only the linear-by-linear method is available
pub fn ordinal_association(
    table: &ContingencyTable,
    row_scores: Option<&[f64]>,
    col_scores: Option<&[f64]>,
    method: AssociationMethod,
) -> StatsResult<OrdinalAssociationResult> {
    let AssociationMethod::LinearByLinear = method;

    let u = check_scores(row_scores, table.n_rows(), "row")?;
    let v = check_scores(col_scores, table.n_cols(), "col")?;

    let statistic: f64 = (0..table.n_rows())
        .map(|i| {
            let tv: f64 = table.row(i).iter().zip(&v).map(|(t, vj)| t * vj).sum();
            u[i] * tv
        })
        .sum();

    let n_obs = table.total();
    let rtot = table.row_sums();
    let ctot = table.col_sums();

    let um: f64 = u.iter().zip(&rtot).map(|(s, r)| s * r).sum();
    let u2m: f64 = u.iter().zip(&rtot).map(|(s, r)| s * s * r).sum();
    let vn: f64 = v.iter().zip(&ctot).map(|(s, c)| s * c).sum();
    let v2n: f64 = v.iter().zip(&ctot).map(|(s, c)| s * s * c).sum();

    let null_mean = um * vn / n_obs;
    let null_var = (u2m - um * um / n_obs) * (v2n - vn * vn / n_obs) / (n_obs - 1.0);
    let null_std = null_var.sqrt();

    let z_score = (statistic - null_mean) / null_std;
    let p_value = 2.0 * normal_cdf(-z_score.abs())?;

    Ok(OrdinalAssociationResult {
        statistic,
        null_mean,
        null_std,
        z_score,
        p_value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: Vec<Vec<f64>>) -> ContingencyTable {
        ContingencyTable::new(rows).unwrap()
    }

    fn table_3x3() -> ContingencyTable {
        table(vec![
            vec![20.0, 10.0, 5.0],
            vec![3.0, 30.0, 15.0],
            vec![0.0, 5.0, 40.0],
        ])
    }

    #[test]
    fn test_lbl_2x2() {
        let t = table(vec![vec![23.0, 15.0], vec![19.0, 31.0]]);
        let scores = [1.0, 2.0];
        let rslt = ordinal_association(
            &t,
            Some(&scores[..]),
            Some(&scores[..]),
            AssociationMethod::LinearByLinear,
        )
        .unwrap();

        assert_eq!(rslt.statistic, 215.0);
        assert!((rslt.null_mean - 210.136363636).abs() < 1e-6);
        assert!((rslt.null_std.powi(2) - 5.448489598).abs() < 1e-6);
        assert!((rslt.z_score - 2.083641668).abs() < 1e-6);
        assert!((rslt.p_value - 0.037192774).abs() < 1e-6);

        // For a 2x2 table z^2 = (n - 1) / n * Pearson chi-square
        let pearson = 88.0 * 428.0_f64.powi(2) / (38.0 * 50.0 * 42.0 * 46.0);
        assert!((rslt.z_score.powi(2) - 87.0 / 88.0 * pearson).abs() < 1e-9);
    }

    #[test]
    fn test_lbl_4x4() {
        let t = table(vec![
            vec![144.0, 33.0, 84.0, 126.0],
            vec![2.0, 4.0, 14.0, 29.0],
            vec![0.0, 2.0, 6.0, 25.0],
            vec![0.0, 0.0, 1.0, 5.0],
        ]);
        let scores = [1.0, 2.0, 3.0, 4.0];
        let rslt = ordinal_association(
            &t,
            Some(&scores[..]),
            Some(&scores[..]),
            AssociationMethod::LinearByLinear,
        )
        .unwrap();
        assert_eq!(rslt.statistic, 1760.0);
        assert!((rslt.null_mean - 1637.12).abs() < 1e-9);
        assert!((rslt.null_std.powi(2) - 318.387012392).abs() < 1e-6);
        assert!((rslt.z_score - 6.886578951).abs() < 1e-6);
    }

    #[test]
    fn test_lbl_squared_column_scores() {
        let rslt = ordinal_association(
            &table_3x3(),
            Some(&[1.0, 2.0, 3.0][..]),
            Some(&[1.0, 4.0, 9.0][..]),
            AssociationMethod::LinearByLinear,
        )
        .unwrap();
        assert_eq!(rslt.statistic, 1761.0);
        assert!((rslt.null_mean - 1544.046875).abs() < 1e-9);
        assert!((rslt.null_std.powi(2) - 804.735991711).abs() < 1e-6);
    }

    #[test]
    fn test_default_scores_and_shift_invariance() {
        let t = table_3x3();
        let default = ordinal_association(&t, None, None, AssociationMethod::default()).unwrap();
        assert_eq!(default.statistic, 230.0);
        assert!((default.null_mean - 177.890625).abs() < 1e-9);

        // Shifting scores by a constant leaves the z-score unchanged
        let shifted = ordinal_association(
            &t,
            Some(&[1.0, 2.0, 3.0][..]),
            Some(&[1.0, 2.0, 3.0][..]),
            AssociationMethod::LinearByLinear,
        )
        .unwrap();
        let (z0, p0) = default.z_and_p();
        let (z1, p1) = shifted.z_and_p();
        assert!((z0 - z1).abs() < 1e-9);
        assert!((p0 - p1).abs() < 1e-12);
        assert!((z0 - 7.759263587).abs() < 1e-6);
    }

    #[test]
    fn test_score_length_mismatch() {
        let t = table_3x3();
        let err = ordinal_association(
            &t,
            Some(&[1.0, 2.0][..]),
            None,
            AssociationMethod::LinearByLinear,
        )
        .unwrap_err();
        assert_eq!(
            err,
            StatsError::ScoreLength {
                axis: "row",
                expected: 3,
                got: 2
            }
        );

        let err = ordinal_association(
            &t,
            None,
            Some(&[1.0, 2.0, 3.0, 4.0][..]),
            AssociationMethod::LinearByLinear,
        )
        .unwrap_err();
        assert!(matches!(err, StatsError::ScoreLength { axis: "col", .. }));
    }
}
