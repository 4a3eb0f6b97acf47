//! # Return Reducers
//!
//! Moments, annualization, and tail-risk measures over periodic returns.
//! Moment-style reducers take a single series; the historic VaR/CVaR entry
//! points dispatch over the tagged [`ReturnSet`] input.

use ndarray::ArrayView1;
use statrs::distribution::ContinuousCDF;
use statrs::distribution::Normal;

use super::Reduced;
use super::ReturnSet;
use crate::error::HedgekitError;
use crate::error::Result;

fn mean(r: ArrayView1<f64>) -> f64 {
  r.mean().unwrap_or(f64::NAN)
}

/// Population standard deviation (ddof = 0).
fn std_population(r: ArrayView1<f64>) -> f64 {
  let m = mean(r);
  (r.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / r.len() as f64).sqrt()
}

/// Sample standard deviation (ddof = 1).
fn std_sample(r: ArrayView1<f64>) -> f64 {
  if r.len() < 2 {
    return f64::NAN;
  }
  let m = mean(r);
  (r.iter().map(|&x| (x - m).powi(2)).sum::<f64>() / (r.len() - 1) as f64).sqrt()
}

/// Third standardized moment, population-normalized.
pub fn skewness(r: ArrayView1<f64>) -> f64 {
  let m = mean(r);
  let sigma = std_population(r);
  let exp = r.iter().map(|&x| (x - m).powi(3)).sum::<f64>() / r.len() as f64;
  exp / sigma.powi(3)
}

/// Fourth standardized moment, population-normalized (3 for a Gaussian).
pub fn kurtosis(r: ArrayView1<f64>) -> f64 {
  let m = mean(r);
  let sigma = std_population(r);
  let exp = r.iter().map(|&x| (x - m).powi(4)).sum::<f64>() / r.len() as f64;
  exp / sigma.powi(4)
}

/// Population standard deviation of the negative returns only.
pub fn semideviation(r: ArrayView1<f64>) -> f64 {
  let negative: Vec<f64> = r.iter().copied().filter(|&x| x < 0.0).collect();
  std_population(ArrayView1::from(&negative))
}

/// Historic Value-at-Risk at `level` percent: the negated `level`-th
/// percentile of the return distribution.
pub fn var_historic(r: &ReturnSet, level: f64) -> Result<Reduced> {
  check_level(level)?;
  Ok(r.reduce(|s| -percentile(s, level)))
}

/// Historic Conditional VaR at `level` percent: the negated mean of the
/// returns at or beyond the VaR threshold.
pub fn cvar_historic(r: &ReturnSet, level: f64) -> Result<Reduced> {
  check_level(level)?;
  Ok(r.reduce(|s| {
    let threshold = -percentile(s, level);
    let tail: Vec<f64> = s.iter().copied().filter(|&x| x <= -threshold).collect();
    -mean(ArrayView1::from(&tail))
  }))
}

/// Parametric Gaussian VaR at `level` percent; with `modified` the z-score
/// is Cornish-Fisher adjusted for observed skewness and kurtosis.
pub fn var_gaussian(r: ArrayView1<f64>, level: f64, modified: bool) -> Result<f64> {
  check_level(level)?;
  let standard_normal = Normal::new(0.0, 1.0).unwrap();
  let mut z = standard_normal.inverse_cdf(level / 100.0);

  if modified {
    let s = skewness(r);
    let k = kurtosis(r);
    z = z
      + (z.powi(2) - 1.0) * s / 6.0
      + (z.powi(3) - 3.0 * z) * (k - 3.0) / 24.0
      - (2.0 * z.powi(3) - 5.0 * z) * s.powi(2) / 36.0;
  }

  Ok(-(mean(r) + z * std_population(r)))
}

/// Compounded growth re-expressed at `periods_per_year`.
pub fn annualized_return(r: ArrayView1<f64>, periods_per_year: usize) -> f64 {
  let compounded: f64 = r.iter().map(|&x| 1.0 + x).product();
  compounded.powf(periods_per_year as f64 / r.len() as f64) - 1.0
}

/// Sample volatility scaled to `periods_per_year`.
pub fn annualized_volatility(r: ArrayView1<f64>, periods_per_year: usize) -> f64 {
  std_sample(r) * (periods_per_year as f64).sqrt()
}

/// Annualized excess return over annualized volatility.
///
/// A vanishing volatility denominator is a hard failure, not a silent
/// division by zero.
pub fn sharpe_ratio(r: ArrayView1<f64>, riskfree_rate: f64, periods_per_year: usize) -> Result<f64> {
  let rf_per_period = (1.0 + riskfree_rate).powf(1.0 / periods_per_year as f64) - 1.0;
  let excess = r.mapv(|x| x - rf_per_period);
  let ann_excess = annualized_return(excess.view(), periods_per_year);
  let ann_vol = annualized_volatility(r, periods_per_year);

  if !(ann_vol > 1e-12) {
    return Err(HedgekitError::NonPositiveVolatility(ann_vol));
  }
  Ok(ann_excess / ann_vol)
}

/// Linear-interpolation percentile of an unsorted sample.
fn percentile(r: ArrayView1<f64>, level: f64) -> f64 {
  let mut sorted: Vec<f64> = r.to_vec();
  sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
  if sorted.is_empty() {
    return f64::NAN;
  }

  let rank = level / 100.0 * (sorted.len() - 1) as f64;
  let lo = rank.floor() as usize;
  let hi = rank.ceil() as usize;
  if lo == hi {
    return sorted[lo];
  }
  sorted[lo] + (rank - lo as f64) * (sorted[hi] - sorted[lo])
}

fn check_level(level: f64) -> Result<()> {
  if !(0.0..=100.0).contains(&level) {
    return Err(HedgekitError::contract(format!(
      "VaR level must be in [0, 100] percent, got {level}"
    )));
  }
  Ok(())
}
