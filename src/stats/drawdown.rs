//! # Drawdown
//!
//! Wealth index, running peaks, and percentage drawdown of a return series.

use ndarray::Array1;
use ndarray::ArrayView1;

/// Base wealth for the index, matching the conventional $1000 start.
const START_WEALTH: f64 = 1000.0;

/// Wealth-index view of a return series.
#[derive(Clone, Debug)]
pub struct Drawdown {
  /// Compounded wealth index.
  pub wealth: Array1<f64>,
  /// Running maximum of the wealth index.
  pub peaks: Array1<f64>,
  /// Percentage decline from the running peak (non-positive).
  pub drawdown: Array1<f64>,
}

impl Drawdown {
  /// Deepest drawdown over the period (most negative value).
  pub fn max_drawdown(&self) -> f64 {
    self.drawdown.iter().cloned().fold(f64::INFINITY, f64::min)
  }
}

/// Compute the wealth index, previous peaks, and drawdown curve.
pub fn drawdown(returns: ArrayView1<f64>) -> Drawdown {
  let n = returns.len();
  let mut wealth = Array1::zeros(n);
  let mut peaks = Array1::zeros(n);
  let mut dd = Array1::zeros(n);

  let mut acc = START_WEALTH;
  let mut peak = f64::MIN;
  for t in 0..n {
    acc *= 1.0 + returns[t];
    peak = peak.max(acc);
    wealth[t] = acc;
    peaks[t] = peak;
    dd[t] = (acc - peak) / peak;
  }

  Drawdown {
    wealth,
    peaks,
    drawdown: dd,
  }
}
