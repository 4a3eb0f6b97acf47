//! # Terminal Statistics
//!
//! Reduces a time x scenario return matrix to per-scenario terminal wealth
//! and cross-scenario shortfall/surplus risk numbers.

use ndarray::Array1;
use ndarray::Array2;

/// Cross-scenario summary of terminal wealth against a floor and a cap.
///
/// Conditional statistics are `NaN` when no scenario breaches (or reaches);
/// they are undefined, not zero.
#[derive(Clone, Copy, Debug)]
pub struct TerminalStats {
  /// Mean terminal wealth.
  pub mean: f64,
  /// Sample standard deviation of terminal wealth.
  pub std: f64,
  /// Probability that terminal wealth ends below the floor.
  pub p_breach: f64,
  /// Expected shortfall `floor - wealth`, conditional on a breach.
  pub e_short: f64,
  /// Probability that terminal wealth reaches the cap.
  pub p_reach: f64,
  /// Expected surplus `wealth - cap`, conditional on a reach.
  pub e_surplus: f64,
}

/// Terminal value of one unit of wealth per scenario: the product of gross
/// returns down each column.
pub fn terminal_wealth(returns: &Array2<f64>) -> Array1<f64> {
  returns
    .columns()
    .into_iter()
    .map(|col| col.fold(1.0, |acc, &r| acc * (1.0 + r)))
    .collect()
}

/// Shortfall/surplus statistics of terminal wealth across scenarios.
pub fn terminal_stats(returns: &Array2<f64>, floor: f64, cap: f64) -> TerminalStats {
  let wealth = terminal_wealth(returns);
  let n = wealth.len();

  let mean = wealth.mean().unwrap_or(f64::NAN);
  let std = if n > 1 {
    let var = wealth.iter().map(|&w| (w - mean).powi(2)).sum::<f64>() / (n - 1) as f64;
    var.sqrt()
  } else {
    f64::NAN
  };

  let breaches: Vec<f64> = wealth.iter().copied().filter(|&w| w < floor).collect();
  let reaches: Vec<f64> = wealth.iter().copied().filter(|&w| w >= cap).collect();

  let p_breach = if breaches.is_empty() {
    f64::NAN
  } else {
    breaches.len() as f64 / n as f64
  };
  let e_short = if breaches.is_empty() {
    f64::NAN
  } else {
    breaches.iter().map(|w| floor - w).sum::<f64>() / breaches.len() as f64
  };
  let p_reach = if reaches.is_empty() {
    f64::NAN
  } else {
    reaches.len() as f64 / n as f64
  };
  let e_surplus = if reaches.is_empty() {
    f64::NAN
  } else {
    reaches.iter().map(|w| w - cap).sum::<f64>() / reaches.len() as f64
  };

  TerminalStats {
    mean,
    std,
    p_breach,
    e_short,
    p_reach,
    e_surplus,
  }
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;
  use ndarray::Array2;

  use super::*;

  #[test]
  fn terminal_wealth_compounds_each_column() {
    let mut returns = Array2::zeros((2, 2));
    returns[[0, 0]] = 0.10;
    returns[[1, 0]] = 0.10;
    returns[[0, 1]] = -0.50;

    let tw = terminal_wealth(&returns);
    assert_relative_eq!(tw[0], 1.21, epsilon = 1e-12);
    assert_relative_eq!(tw[1], 0.50, epsilon = 1e-12);
  }

  #[test]
  fn breach_probability_counts_scenarios_below_floor() {
    // 1000 single-step scenarios, exactly 50 ending at 0.5 < 0.8.
    let mut returns = Array2::zeros((1, 1000));
    for j in 0..50 {
      returns[[0, j]] = -0.5;
    }

    let stats = terminal_stats(&returns, 0.8, f64::INFINITY);
    assert_relative_eq!(stats.p_breach, 0.05, epsilon = 1e-12);
    assert_relative_eq!(stats.e_short, 0.3, epsilon = 1e-12);
  }

  #[test]
  fn reach_probability_uses_the_reach_mask() {
    let mut returns = Array2::zeros((1, 10));
    for j in 0..3 {
      returns[[0, j]] = 1.0; // terminal wealth 2.0
    }

    let stats = terminal_stats(&returns, 0.8, 1.5);
    assert_relative_eq!(stats.p_reach, 0.3, epsilon = 1e-12);
    assert_relative_eq!(stats.e_surplus, 0.5, epsilon = 1e-12);
    // No scenario breached: conditional stats undefined, not zero.
    assert!(stats.p_breach.is_nan());
    assert!(stats.e_short.is_nan());
  }

  #[test]
  fn unreachable_cap_leaves_reach_stats_undefined() {
    let returns = Array2::zeros((3, 5));
    let stats = terminal_stats(&returns, 0.8, f64::INFINITY);
    assert!(stats.p_reach.is_nan());
    assert!(stats.e_surplus.is_nan());
    assert_relative_eq!(stats.mean, 1.0, epsilon = 1e-12);
  }
}
