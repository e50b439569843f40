//! C-compatible types for FFI boundary

use ctab_stats_core::HomogeneityMethod;
use libc::c_char;

/// Error codes for FFI boundary
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    Success = 0,
    InvalidInput = 1,
    InvalidAlpha = 2,
    NotSquare = 3,
    DimensionMismatch = 4,
    UnsupportedMethod = 5,
    AllocationFailure = 6,
    NoValidData = 7,
    InternalError = 99,
}

/// Error information for FFI
#[repr(C)]
pub struct CtabError {
    pub code: ErrorCode,
    pub message: [c_char; 256],
}

impl CtabError {
    pub fn success() -> Self {
        Self {
            code: ErrorCode::Success,
            message: [0; 256],
        }
    }

    /// Record `code` and a NUL-terminated copy of `msg`
    ///
    /// Messages longer than 255 bytes are cut at the last character boundary
    /// that fits, so C callers never see a partial UTF-8 sequence.
    pub fn set(&mut self, code: ErrorCode, msg: &str) {
        self.code = code;
        let mut len = msg.len().min(self.message.len() - 1);
        while !msg.is_char_boundary(len) {
            len -= 1;
        }
        for (dst, &b) in self.message.iter_mut().zip(&msg.as_bytes()[..len]) {
            *dst = b as c_char;
        }
        self.message[len] = 0;
    }

    /// Message as a Rust string, up to the first NUL
    pub fn message(&self) -> String {
        let bytes: Vec<u8> = self
            .message
            .iter()
            .take_while(|&&c| c != 0)
            .map(|&c| c as u8)
            .collect();
        String::from_utf8_lossy(&bytes).into_owned()
    }
}

/// Array of f64 values with validity mask for NULL handling
#[repr(C)]
pub struct DataArray {
    /// Pointer to data values
    pub data: *const f64,
    /// Validity bitmask: bit i is 1 if data[i] is valid, 0 if NULL
    /// Can be NULL if all values are valid
    pub validity: *const u8,
    /// Number of elements
    pub len: usize,
}

impl DataArray {
    /// Check if index i is valid (not NULL)
    ///
    /// # Safety
    /// Caller must ensure index is within bounds
    pub unsafe fn is_valid(&self, i: usize) -> bool {
        self.validity.is_null() || (*self.validity.add(i / 8) >> (i % 8)) & 1 == 1
    }

    /// Convert to Vec<f64>, replacing NULL with NaN
    ///
    /// # Safety
    /// Caller must ensure pointers are valid and len is correct
    pub unsafe fn to_vec(&self) -> Vec<f64> {
        if self.data.is_null() {
            return Vec::new();
        }
        let mut result = Vec::with_capacity(self.len);
        for i in 0..self.len {
            if self.is_valid(i) {
                result.push(*self.data.add(i));
            } else {
                result.push(f64::NAN);
            }
        }
        result
    }
}

/// Chi-square style test result for FFI
#[repr(C)]
pub struct ChiSquareResultFFI {
    /// Test statistic
    pub statistic: f64,
    /// p-value
    pub p_value: f64,
    /// Degrees of freedom (NaN for exact tests)
    pub df: f64,
    /// Method name (must be freed)
    pub method: *mut c_char,
}

impl Default for ChiSquareResultFFI {
    fn default() -> Self {
        Self {
            statistic: f64::NAN,
            p_value: f64::NAN,
            df: f64::NAN,
            method: std::ptr::null_mut(),
        }
    }
}

/// Linear-by-linear association result for FFI
#[repr(C)]
pub struct OrdinalResultFFI {
    pub statistic: f64,
    pub null_mean: f64,
    pub null_std: f64,
    pub z_score: f64,
    pub p_value: f64,
}

impl Default for OrdinalResultFFI {
    fn default() -> Self {
        Self {
            statistic: f64::NAN,
            null_mean: f64::NAN,
            null_std: f64::NAN,
            z_score: f64::NAN,
            p_value: f64::NAN,
        }
    }
}

/// Marginal homogeneity method for FFI
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HomogeneityMethodFFI {
    StuartMaxwell = 0,
    Bhapkar = 1,
}

impl From<HomogeneityMethodFFI> for HomogeneityMethod {
    fn from(m: HomogeneityMethodFFI) -> Self {
        match m {
            HomogeneityMethodFFI::StuartMaxwell => HomogeneityMethod::StuartMaxwell,
            HomogeneityMethodFFI::Bhapkar => HomogeneityMethod::Bhapkar,
        }
    }
}

/// McNemar options for FFI
#[repr(C)]
pub struct McNemarOptionsFFI {
    /// Use the exact binomial test
    pub exact: bool,
    /// Apply continuity correction (chi-square mode only)
    pub correction: bool,
}

impl Default for McNemarOptionsFFI {
    fn default() -> Self {
        Self {
            exact: true,
            correction: true,
        }
    }
}

/// Stratified 2x2 analysis options for FFI
#[repr(C)]
pub struct StratifiedOptionsFFI {
    /// Add 0.5 to every cell of strata containing a zero
    pub shift_zeros: bool,
    /// Continuity correction for the Mantel-Haenszel test
    pub correction: bool,
    /// Tarone adjustment for the Breslow-Day test
    pub adjust: bool,
    /// Confidence intervals have coverage 1 - alpha
    pub alpha: f64,
}

impl Default for StratifiedOptionsFFI {
    fn default() -> Self {
        Self {
            shift_zeros: false,
            correction: false,
            adjust: false,
            alpha: 0.05,
        }
    }
}

/// Pooled estimates and tests over stratified 2x2 tables
#[repr(C)]
pub struct StratifiedResultFFI {
    pub n_strata: usize,
    pub common_odds: f64,
    pub common_logodds: f64,
    pub common_risk: f64,
    pub common_logodds_se: f64,
    pub odds_ci_lower: f64,
    pub odds_ci_upper: f64,
    pub logodds_ci_lower: f64,
    pub logodds_ci_upper: f64,
    /// Mantel-Haenszel test of OR = 1
    pub null_odds_statistic: f64,
    pub null_odds_p_value: f64,
    /// Breslow-Day test of equal odds ratios
    pub equal_odds_statistic: f64,
    pub equal_odds_p_value: f64,
    pub equal_odds_df: f64,
}

impl Default for StratifiedResultFFI {
    fn default() -> Self {
        Self {
            n_strata: 0,
            common_odds: f64::NAN,
            common_logodds: f64::NAN,
            common_risk: f64::NAN,
            common_logodds_se: f64::NAN,
            odds_ci_lower: f64::NAN,
            odds_ci_upper: f64::NAN,
            logodds_ci_lower: f64::NAN,
            logodds_ci_upper: f64::NAN,
            null_odds_statistic: f64::NAN,
            null_odds_p_value: f64::NAN,
            equal_odds_statistic: f64::NAN,
            equal_odds_p_value: f64::NAN,
            equal_odds_df: f64::NAN,
        }
    }
}
