use std::fmt;
use std::str::FromStr;

use crate::errors::StatsError;

/// Method for testing symmetry of a square table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SymmetryMethod {
    /// Bowker's test
    #[default]
    Bowker,
}

impl FromStr for SymmetryMethod {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "bowker" => Ok(SymmetryMethod::Bowker),
            _ => Err(StatsError::UnsupportedMethod {
                test: "symmetry",
                method: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SymmetryMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("bowker")
    }
}

/// Covariance estimate used by the marginal homogeneity test
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HomogeneityMethod {
    /// Stuart-Maxwell covariance (null hypothesis variance)
    #[default]
    StuartMaxwell,
    /// Bhapkar covariance (unrestricted variance)
    Bhapkar,
}

impl FromStr for HomogeneityMethod {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stuart_maxwell" => Ok(HomogeneityMethod::StuartMaxwell),
            "bhapkar" => Ok(HomogeneityMethod::Bhapkar),
            _ => Err(StatsError::UnsupportedMethod {
                test: "homogeneity",
                method: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for HomogeneityMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HomogeneityMethod::StuartMaxwell => f.write_str("stuart_maxwell"),
            HomogeneityMethod::Bhapkar => f.write_str("bhapkar"),
        }
    }
}

/// Method for ordinal row/column association
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AssociationMethod {
    /// Agresti's linear-by-linear statistic
    #[default]
    LinearByLinear,
}

impl FromStr for AssociationMethod {
    type Err = StatsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lbl" => Ok(AssociationMethod::LinearByLinear),
            _ => Err(StatsError::UnsupportedMethod {
                test: "association",
                method: s.to_string(),
            }),
        }
    }
}

/// Options for McNemar's test
#[derive(Debug, Clone)]
pub struct McNemarOptions {
    /// Use the exact binomial reference distribution
    pub exact: bool,
    /// Apply continuity correction (chi-square mode only)
    pub correction: bool,
}

impl Default for McNemarOptions {
    fn default() -> Self {
        Self {
            exact: true,
            correction: true,
        }
    }
}

/// Options for building a stratified table collection
#[derive(Debug, Clone, Default)]
pub struct StratifiedOptions {
    /// Add 0.5 to every cell of a stratum containing a zero cell
    pub shift_zeros: bool,
}

/// Chi-square test result
#[derive(Debug, Clone)]
pub struct ChiSquareResult {
    /// Chi-square statistic
    pub statistic: f64,
    /// p-value
    pub p_value: f64,
    /// Degrees of freedom
    pub df: f64,
    /// Method name
    pub method: String,
}

/// Two-sided confidence interval
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConfidenceInterval {
    /// Lower confidence bound
    pub lower: f64,
    /// Upper confidence bound
    pub upper: f64,
}

impl ConfidenceInterval {
    /// Apply `f` to both bounds
    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self {
            lower: f(self.lower),
            upper: f(self.upper),
        }
    }
}

/// Validate an alpha level for confidence intervals
pub(crate) fn check_alpha(alpha: f64) -> Result<(), StatsError> {
    if alpha > 0.0 && alpha < 1.0 {
        Ok(())
    } else {
        Err(StatsError::InvalidAlpha(alpha))
    }
}
