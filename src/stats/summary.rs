//! # Summary Table
//!
//! Per-asset descriptive summary of a return matrix, for downstream
//! reporting.

use ndarray::Array2;

use super::drawdown::drawdown;
use super::reducers::annualized_return;
use super::reducers::annualized_volatility;
use super::reducers::cvar_historic;
use super::reducers::kurtosis;
use super::reducers::sharpe_ratio;
use super::reducers::skewness;
use super::reducers::var_gaussian;
use super::Reduced;
use super::ReturnSet;
use crate::error::Result;

/// One row of the summary table, one per asset column.
#[derive(Clone, Debug)]
pub struct SummaryStats {
  pub annualized_return: f64,
  pub annualized_volatility: f64,
  pub skewness: f64,
  pub kurtosis: f64,
  /// Cornish-Fisher VaR at the 5% level.
  pub cornish_fisher_var5: f64,
  /// Historic CVaR at the 5% level.
  pub historic_cvar5: f64,
  pub sharpe_ratio: f64,
  pub max_drawdown: f64,
}

/// Summarize every column of a return matrix.
pub fn summary_stats(
  returns: &Array2<f64>,
  riskfree_rate: f64,
  periods_per_year: usize,
) -> Result<Vec<SummaryStats>> {
  let cvar = match cvar_historic(&ReturnSet::Matrix(returns.view()), 5.0)? {
    Reduced::PerColumn(v) => v,
    Reduced::Scalar(_) => unreachable!("matrix input reduces per column"),
  };

  returns
    .columns()
    .into_iter()
    .enumerate()
    .map(|(i, col)| {
      Ok(SummaryStats {
        annualized_return: annualized_return(col, periods_per_year),
        annualized_volatility: annualized_volatility(col, periods_per_year),
        skewness: skewness(col),
        kurtosis: kurtosis(col),
        cornish_fisher_var5: var_gaussian(col, 5.0, true)?,
        historic_cvar5: cvar[i],
        sharpe_ratio: sharpe_ratio(col, riskfree_rate, periods_per_year)?,
        max_drawdown: drawdown(col).max_drawdown(),
      })
    })
    .collect()
}

#[cfg(test)]
mod tests {
  use ndarray::Array2;
  use rand::SeedableRng;
  use rand::rngs::StdRng;
  use rand_distr::Distribution;
  use rand_distr::Normal;

  use super::*;

  #[test]
  fn one_row_per_asset_column() {
    let mut rng = StdRng::seed_from_u64(2);
    let normal = Normal::new(0.005, 0.03).unwrap();
    let returns = Array2::from_shape_fn((120, 3), |_| normal.sample(&mut rng));

    let rows = summary_stats(&returns, 0.03, 12).unwrap();

    assert_eq!(rows.len(), 3);
    for row in &rows {
      assert!(row.annualized_volatility > 0.0);
      assert!(row.max_drawdown <= 0.0);
      assert!(row.historic_cvar5 >= 0.0);
    }
  }
}
