//! # Descriptive Return Statistics
//!
//! $$
//! VaR_\alpha = -\inf\{x : F(x) > \alpha\}
//! $$
//!
//! Pure reductions over return series and matrices, consumed by reporting.
//! Inputs are tagged explicitly as a single series or an asset matrix; there
//! is no silent coercion between the two.

pub mod drawdown;
pub mod normality;
pub mod reducers;
pub mod summary;

use ndarray::Array1;
use ndarray::ArrayView1;
use ndarray::ArrayView2;

pub use drawdown::Drawdown;
pub use drawdown::drawdown;
pub use normality::is_normal;
pub use normality::jarque_bera;
pub use reducers::annualized_return;
pub use reducers::annualized_volatility;
pub use reducers::cvar_historic;
pub use reducers::kurtosis;
pub use reducers::semideviation;
pub use reducers::sharpe_ratio;
pub use reducers::skewness;
pub use reducers::var_gaussian;
pub use reducers::var_historic;
pub use summary::SummaryStats;
pub use summary::summary_stats;

/// A reducer input: one return series or a matrix of asset columns.
#[derive(Clone, Copy, Debug)]
pub enum ReturnSet<'a> {
  Series(ArrayView1<'a, f64>),
  Matrix(ArrayView2<'a, f64>),
}

/// A reducer output: one scalar for a series, one value per column for a
/// matrix.
#[derive(Clone, Debug, PartialEq)]
pub enum Reduced {
  Scalar(f64),
  PerColumn(Array1<f64>),
}

impl<'a> ReturnSet<'a> {
  /// Apply a series reducer to the series, or to every column of the matrix.
  pub fn reduce(&self, f: impl Fn(ArrayView1<f64>) -> f64) -> Reduced {
    match self {
      ReturnSet::Series(s) => Reduced::Scalar(f(s.view())),
      ReturnSet::Matrix(m) => {
        Reduced::PerColumn(m.columns().into_iter().map(|col| f(col.view())).collect())
      }
    }
  }
}

impl Reduced {
  /// The scalar value, if this reduction came from a series.
  pub fn as_scalar(&self) -> Option<f64> {
    match self {
      Reduced::Scalar(v) => Some(*v),
      Reduced::PerColumn(_) => None,
    }
  }
}
