//! Reference distribution helpers
//!
//! Thin wrappers around `statrs` so the test modules can ask for tail
//! probabilities without handling distribution construction themselves.
//! Invalid parameters (zero or non-finite degrees of freedom) and NaN
//! statistics yield NaN instead of an error, so degenerate tables propagate
//! as non-finite results.

use statrs::distribution::{Binomial, ChiSquared, ContinuousCDF, DiscreteCDF, Normal};

use crate::errors::{StatsError, StatsResult};

fn chi2(df: f64) -> Option<ChiSquared> {
    if !(df.is_finite() && df > 0.0) {
        return None;
    }
    ChiSquared::new(df).ok()
}

/// Lower tail P(X <= x) of the chi-square distribution
pub fn chi2_cdf(x: f64, df: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    chi2(df).map_or(f64::NAN, |dist| dist.cdf(x))
}

/// Upper tail P(X > x) of the chi-square distribution
pub fn chi2_sf(x: f64, df: f64) -> f64 {
    if x.is_nan() {
        return f64::NAN;
    }
    chi2(df).map_or(f64::NAN, |dist| dist.sf(x))
}

fn standard_normal() -> StatsResult<Normal> {
    Normal::new(0.0, 1.0).map_err(|e| StatsError::Distribution(e.to_string()))
}

/// Standard normal CDF
pub fn normal_cdf(z: f64) -> StatsResult<f64> {
    if z.is_nan() {
        return Ok(f64::NAN);
    }
    Ok(standard_normal()?.cdf(z))
}

/// Standard normal quantile function
pub fn normal_ppf(p: f64) -> StatsResult<f64> {
    if !(0.0..=1.0).contains(&p) {
        return Err(StatsError::InvalidInput(format!(
            "probability {} outside [0, 1]",
            p
        )));
    }
    Ok(standard_normal()?.inverse_cdf(p))
}

/// Binomial CDF P(X <= k) for `trials` Bernoulli draws with success rate `p`
pub fn binomial_cdf(k: u64, trials: u64, p: f64) -> StatsResult<f64> {
    let dist = Binomial::new(p, trials).map_err(|e| StatsError::Distribution(e.to_string()))?;
    Ok(dist.cdf(k))
}
