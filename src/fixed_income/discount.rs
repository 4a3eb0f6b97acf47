//! # Discounting
//!
//! Present values of dated cash flows under a flat per-period rate.

use ndarray::Array1;

use crate::error::HedgekitError;
use crate::error::Result;

/// Amounts indexed by time period.
#[derive(Clone, Debug, PartialEq)]
pub struct CashFlows {
  /// Payment times, in periods.
  pub times: Array1<f64>,
  /// Payment amounts, one per time.
  pub amounts: Array1<f64>,
}

impl CashFlows {
  pub fn new(times: Array1<f64>, amounts: Array1<f64>) -> Result<Self> {
    if times.len() != amounts.len() {
      return Err(HedgekitError::shape_mismatch(
        "CashFlows",
        format!("{} amounts", times.len()),
        format!("{} amounts", amounts.len()),
      ));
    }
    Ok(Self { times, amounts })
  }

  pub fn len(&self) -> usize {
    self.times.len()
  }

  pub fn is_empty(&self) -> bool {
    self.times.is_empty()
  }
}

/// Price of a pure discount bond paying 1 at each time in `times`, at a flat
/// per-period rate.
pub fn discount_factors(times: &Array1<f64>, rate: f64) -> Array1<f64> {
  times.mapv(|t| (1.0 + rate).powf(-t))
}

/// Present value of a cash-flow series at a flat per-period rate.
pub fn present_value(flows: &CashFlows, rate: f64) -> f64 {
  discount_factors(&flows.times, rate).dot(&flows.amounts)
}

/// Ratio of asset present value to liability present value. Values below 1
/// indicate underfunding.
pub fn funding_ratio(assets: &CashFlows, liabilities: &CashFlows, rate: f64) -> f64 {
  present_value(assets, rate) / present_value(liabilities, rate)
}
