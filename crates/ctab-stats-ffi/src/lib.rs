//! C FFI boundary for ctab-stats
//!
//! C-compatible entry points over the contingency table analyzers in
//! `ctab-stats-core`. Tables are passed as row-major `DataArray`s.

mod types;

pub use types::*;

use ctab_stats_core::{
    tests::{cochrans_q, mcnemar, ordinal_association, SquareTable, StratifiedTables},
    AssociationMethod, ChiSquareResult, ContingencyTable, McNemarOptions, StatsError,
    StratifiedOptions, SymmetryMethod,
};
use libc::c_char;

/// Convert StatsError to ErrorCode
fn error_to_code(err: &StatsError) -> ErrorCode {
    match err {
        StatsError::InvalidAlpha(_) => ErrorCode::InvalidAlpha,
        StatsError::NotSquare { .. } => ErrorCode::NotSquare,
        StatsError::ScoreLength { .. } => ErrorCode::DimensionMismatch,
        StatsError::DimensionMismatchMsg(_) => ErrorCode::DimensionMismatch,
        StatsError::UnsupportedMethod { .. } => ErrorCode::UnsupportedMethod,
        StatsError::EmptyInput { .. } => ErrorCode::NoValidData,
        StatsError::InvalidInput(_) => ErrorCode::InvalidInput,
        StatsError::Distribution(_) => ErrorCode::InternalError,
    }
}

/// Helper to allocate and copy a string
unsafe fn alloc_string(s: &str) -> *mut c_char {
    let len = s.len() + 1;
    let ptr = libc::malloc(len) as *mut c_char;
    if !ptr.is_null() {
        std::ptr::copy_nonoverlapping(s.as_ptr(), ptr as *mut u8, s.len());
        *ptr.add(s.len()) = 0;
    }
    ptr
}

unsafe fn set_error(out_error: *mut CtabError, code: ErrorCode, msg: &str) {
    if !out_error.is_null() {
        (*out_error).set(code, msg);
    }
}

/// Run a core computation, reporting panics and errors through `out_error`
unsafe fn guarded<T>(
    name: &str,
    out_error: *mut CtabError,
    f: impl FnOnce() -> Result<T, StatsError>,
) -> Option<T> {
    match std::panic::catch_unwind(std::panic::AssertUnwindSafe(f)) {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            set_error(out_error, error_to_code(&e), &e.to_string());
            None
        }
        Err(_) => {
            set_error(
                out_error,
                ErrorCode::InternalError,
                &format!("Internal panic in {}", name),
            );
            None
        }
    }
}

/// Read a row-major table; NULL cells become NaN and are rejected by the core
unsafe fn read_table(
    table: &DataArray,
    n_rows: usize,
    n_cols: usize,
) -> Result<ContingencyTable, StatsError> {
    if table.len != n_rows * n_cols {
        return Err(StatsError::DimensionMismatchMsg(format!(
            "Table has {} cells, expected {} x {}",
            table.len, n_rows, n_cols
        )));
    }
    ContingencyTable::from_row_major(table.to_vec(), n_rows, n_cols)
}

unsafe fn write_chisq(out_result: *mut ChiSquareResultFFI, r: &ChiSquareResult) {
    (*out_result) = ChiSquareResultFFI {
        statistic: r.statistic,
        p_value: r.p_value,
        df: r.df,
        method: alloc_string(&r.method),
    };
}

/// Bowker test of table symmetry
///
/// # Safety
/// - `table` must be a valid DataArray of `n_rows * n_cols` row-major cells
/// - `out_result` must be a valid pointer
/// - `out_error` can be NULL
///
/// # Returns
/// `true` on success, `false` on error (check `out_error` for details)
#[no_mangle]
pub unsafe extern "C" fn ctab_symmetry(
    table: DataArray,
    n_rows: usize,
    n_cols: usize,
    out_result: *mut ChiSquareResultFFI,
    out_error: *mut CtabError,
) -> bool {
    if !out_error.is_null() {
        *out_error = CtabError::success();
    }

    if out_result.is_null() {
        set_error(out_error, ErrorCode::InvalidInput, "out_result is NULL");
        return false;
    }

    let result = guarded("symmetry", out_error, || {
        let square = SquareTable::new(read_table(&table, n_rows, n_cols)?)?;
        Ok(square.symmetry(SymmetryMethod::Bowker))
    });

    match result {
        Some(r) => {
            write_chisq(out_result, &r);
            true
        }
        None => false,
    }
}

/// Stuart-Maxwell or Bhapkar test of marginal homogeneity
///
/// A singular covariance matrix is not an error: the statistic and p-value
/// are NaN.
///
/// # Safety
/// - `table` must be a valid DataArray of `n_rows * n_cols` row-major cells
/// - `out_result` must be a valid pointer
/// - `out_error` can be NULL
#[no_mangle]
pub unsafe extern "C" fn ctab_homogeneity(
    table: DataArray,
    n_rows: usize,
    n_cols: usize,
    method: HomogeneityMethodFFI,
    out_result: *mut ChiSquareResultFFI,
    out_error: *mut CtabError,
) -> bool {
    if !out_error.is_null() {
        *out_error = CtabError::success();
    }

    if out_result.is_null() {
        set_error(out_error, ErrorCode::InvalidInput, "out_result is NULL");
        return false;
    }

    let result = guarded("homogeneity", out_error, || {
        let square = SquareTable::new(read_table(&table, n_rows, n_cols)?)?;
        square.homogeneity(method.into())
    });

    match result {
        Some(r) => {
            write_chisq(out_result, &r);
            true
        }
        None => false,
    }
}

/// Linear-by-linear association test
///
/// # Safety
/// - `table` must be a valid DataArray of `n_rows * n_cols` row-major cells
/// - `row_scores` and `col_scores` must be NULL (default scores) or point to
///   valid DataArrays
/// - `out_result` must be a valid pointer
/// - `out_error` can be NULL
#[no_mangle]
pub unsafe extern "C" fn ctab_ordinal_association(
    table: DataArray,
    n_rows: usize,
    n_cols: usize,
    row_scores: *const DataArray,
    col_scores: *const DataArray,
    out_result: *mut OrdinalResultFFI,
    out_error: *mut CtabError,
) -> bool {
    if !out_error.is_null() {
        *out_error = CtabError::success();
    }

    if out_result.is_null() {
        set_error(out_error, ErrorCode::InvalidInput, "out_result is NULL");
        return false;
    }

    let row_vec = if row_scores.is_null() {
        None
    } else {
        Some((*row_scores).to_vec())
    };
    let col_vec = if col_scores.is_null() {
        None
    } else {
        Some((*col_scores).to_vec())
    };

    let result = guarded("ordinal association", out_error, || {
        let t = read_table(&table, n_rows, n_cols)?;
        ordinal_association(
            &t,
            row_vec.as_deref(),
            col_vec.as_deref(),
            AssociationMethod::LinearByLinear,
        )
    });

    match result {
        Some(r) => {
            (*out_result) = OrdinalResultFFI {
                statistic: r.statistic,
                null_mean: r.null_mean,
                null_std: r.null_std,
                z_score: r.z_score,
                p_value: r.p_value,
            };
            true
        }
        None => false,
    }
}

/// McNemar's test for the paired 2x2 table `[[a, b], [c, d]]`
///
/// The exact test reports `df` as NaN.
///
/// # Safety
/// - `out_result` must be a valid pointer
/// - `out_error` can be NULL
#[no_mangle]
pub unsafe extern "C" fn ctab_mcnemar(
    a: f64,
    b: f64,
    c: f64,
    d: f64,
    options: McNemarOptionsFFI,
    out_result: *mut ChiSquareResultFFI,
    out_error: *mut CtabError,
) -> bool {
    if !out_error.is_null() {
        *out_error = CtabError::success();
    }

    if out_result.is_null() {
        set_error(out_error, ErrorCode::InvalidInput, "out_result is NULL");
        return false;
    }

    let opts = McNemarOptions {
        exact: options.exact,
        correction: options.correction,
    };

    let result = guarded("McNemar", out_error, || {
        let t = ContingencyTable::from_row_major(vec![a, b, c, d], 2, 2)?;
        mcnemar(&t, &opts)
    });

    match result {
        Some(r) => {
            (*out_result) = ChiSquareResultFFI {
                statistic: r.statistic,
                p_value: r.p_value,
                df: r.df.map_or(f64::NAN, |df| df as f64),
                method: alloc_string(&r.method),
            };
            true
        }
        None => false,
    }
}

/// Cochran's Q test over `n_rows` subjects by `n_cols` treatments
///
/// # Safety
/// - `x` must be a valid DataArray of `n_rows * n_cols` row-major outcomes
/// - `out_result` must be a valid pointer
/// - `out_error` can be NULL
#[no_mangle]
pub unsafe extern "C" fn ctab_cochrans_q(
    x: DataArray,
    n_rows: usize,
    n_cols: usize,
    out_result: *mut ChiSquareResultFFI,
    out_error: *mut CtabError,
) -> bool {
    if !out_error.is_null() {
        *out_error = CtabError::success();
    }

    if out_result.is_null() {
        set_error(out_error, ErrorCode::InvalidInput, "out_result is NULL");
        return false;
    }

    if n_cols == 0 || x.len != n_rows * n_cols {
        set_error(
            out_error,
            ErrorCode::DimensionMismatch,
            "x length does not match n_rows * n_cols",
        );
        return false;
    }

    let values = x.to_vec();
    let rows: Vec<Vec<f64>> = values.chunks(n_cols).map(|r| r.to_vec()).collect();

    let result = guarded("Cochran's Q", out_error, || cochrans_q(&rows));

    match result {
        Some(r) => {
            (*out_result) = ChiSquareResultFFI {
                statistic: r.statistic,
                p_value: r.p_value,
                df: r.df as f64,
                method: alloc_string("Cochran's Q test"),
            };
            true
        }
        None => false,
    }
}

/// Mantel-Haenszel and Breslow-Day analysis of stratified 2x2 tables
///
/// # Safety
/// - `cells` must be a valid DataArray of `4 * n_strata` values, holding
///   `a, b, c, d` for each stratum in turn
/// - `out_result` must be a valid pointer
/// - `out_error` can be NULL
#[no_mangle]
pub unsafe extern "C" fn ctab_stratified(
    cells: DataArray,
    n_strata: usize,
    options: StratifiedOptionsFFI,
    out_result: *mut StratifiedResultFFI,
    out_error: *mut CtabError,
) -> bool {
    if !out_error.is_null() {
        *out_error = CtabError::success();
    }

    if out_result.is_null() {
        set_error(out_error, ErrorCode::InvalidInput, "out_result is NULL");
        return false;
    }

    if cells.len != 4 * n_strata {
        set_error(
            out_error,
            ErrorCode::DimensionMismatch,
            "cells length must be 4 * n_strata",
        );
        return false;
    }

    let values = cells.to_vec();
    let tables: Vec<[[f64; 2]; 2]> = values
        .chunks_exact(4)
        .map(|c| [[c[0], c[1]], [c[2], c[3]]])
        .collect();
    let opts = StratifiedOptions {
        shift_zeros: options.shift_zeros,
    };

    let result = guarded("stratified analysis", out_error, || {
        let st = StratifiedTables::new(&tables, &opts)?;
        let odds_ci = st.common_odds_confint(options.alpha)?;
        let logodds_ci = st.common_logodds_confint(options.alpha)?;
        let null_odds = st.test_null_odds(options.correction);
        let equal_odds = st.test_equal_odds(options.adjust);

        Ok(StratifiedResultFFI {
            n_strata: st.n_strata(),
            common_odds: st.common_odds(),
            common_logodds: st.common_logodds(),
            common_risk: st.common_risk(),
            common_logodds_se: st.common_logodds_se(),
            odds_ci_lower: odds_ci.lower,
            odds_ci_upper: odds_ci.upper,
            logodds_ci_lower: logodds_ci.lower,
            logodds_ci_upper: logodds_ci.upper,
            null_odds_statistic: null_odds.statistic,
            null_odds_p_value: null_odds.p_value,
            equal_odds_statistic: equal_odds.statistic,
            equal_odds_p_value: equal_odds.p_value,
            equal_odds_df: equal_odds.df,
        })
    });

    match result {
        Some(r) => {
            (*out_result) = r;
            true
        }
        None => false,
    }
}

/// Free memory allocated by chi-square result functions
///
/// # Safety
/// - `result` must be NULL or a valid pointer to a ChiSquareResultFFI
#[no_mangle]
pub unsafe extern "C" fn ctab_free_chisq_result(result: *mut ChiSquareResultFFI) {
    if result.is_null() {
        return;
    }
    if !(*result).method.is_null() {
        libc::free((*result).method as *mut libc::c_void);
        (*result).method = std::ptr::null_mut();
    }
}
