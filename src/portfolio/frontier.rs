//! # Mean-Variance Frontier
//!
//! $$
//! \min_{\mathbf{w}} \ \mathbf{w}^\top \Sigma \mathbf{w}
//! \quad \text{s.t.} \quad \mathbf{w}^\top \mu = r^\*,\ \sum_i w_i = 1,\ 0 \le w_i \le 1
//! $$
//!
//! Long-only frontier, max-Sharpe, and global-minimum-variance weights. The
//! simplex constraints are enforced exactly by a softmax reparameterization;
//! the target-return equality enters the Nelder-Mead cost as a quadratic
//! penalty.

use argmin::core::CostFunction;
use argmin::core::Executor;
use argmin::solver::neldermead::NelderMead;
use ndarray::Array1;
use ndarray::Array2;
use ndarray_stats::QuantileExt;
use rayon::prelude::*;

use crate::error::HedgekitError;
use crate::error::Result;

/// Settings for the constrained weight searches.
///
/// A non-convergent search is not an error: the solver's terminal point is
/// returned as-is and the caller re-checks feasibility (e.g. that the
/// portfolio return matches the requested target).
#[derive(Clone, Copy, Debug)]
pub struct SolverConfig {
  /// Nelder-Mead iteration cap per subproblem.
  pub max_iters: u64,
  /// Standard-deviation tolerance on the simplex cost values.
  pub sd_tolerance: f64,
  /// Weight of the squared target-return constraint violation in the cost.
  pub target_penalty: f64,
}

impl Default for SolverConfig {
  fn default() -> Self {
    Self {
      max_iters: 5000,
      sd_tolerance: 1e-9,
      target_penalty: 1e4,
    }
  }
}

/// Expected portfolio return `w . mu`.
pub fn portfolio_return(weights: &Array1<f64>, expected_returns: &Array1<f64>) -> Result<f64> {
  if weights.len() != expected_returns.len() {
    return Err(HedgekitError::shape_mismatch(
      "portfolio_return",
      format!("{} weights", expected_returns.len()),
      format!("{} weights", weights.len()),
    ));
  }
  Ok(weights.dot(expected_returns))
}

/// Portfolio volatility `sqrt(w' Sigma w)`.
///
/// The quadratic form is clamped to zero before the square root so that
/// floating-point underflow cannot surface as NaN.
pub fn portfolio_volatility(weights: &Array1<f64>, covariance: &Array2<f64>) -> Result<f64> {
  check_covariance(weights.len(), covariance, "portfolio_volatility")?;
  let quad = weights.dot(&covariance.dot(weights));
  Ok(quad.max(0.0).sqrt())
}

/// Weights minimizing volatility subject to a target portfolio return.
pub fn minimize_volatility(
  target_return: f64,
  expected_returns: &Array1<f64>,
  covariance: &Array2<f64>,
  config: &SolverConfig,
) -> Result<Array1<f64>> {
  check_inputs(expected_returns, covariance, "minimize_volatility")?;

  let cost = MinVolCost {
    er: expected_returns.clone(),
    cov: covariance.clone(),
    target: target_return,
    penalty: config.target_penalty,
  };

  Ok(solve_on_simplex(cost, expected_returns.len(), config))
}

/// Frontier weights for `n_points` targets linspaced over `[min mu, max mu]`.
///
/// The per-target subproblems are independent and solved in parallel.
pub fn efficient_frontier_weights(
  n_points: usize,
  expected_returns: &Array1<f64>,
  covariance: &Array2<f64>,
  config: &SolverConfig,
) -> Result<Vec<Array1<f64>>> {
  check_inputs(expected_returns, covariance, "efficient_frontier_weights")?;
  if n_points == 0 {
    return Ok(Vec::new());
  }

  let lo = *expected_returns
    .min()
    .map_err(|_| HedgekitError::contract("expected returns contain no comparable values"))?;
  let hi = *expected_returns
    .max()
    .map_err(|_| HedgekitError::contract("expected returns contain no comparable values"))?;

  Array1::linspace(lo, hi, n_points)
    .to_vec()
    .into_par_iter()
    .map(|target| minimize_volatility(target, expected_returns, covariance, config))
    .collect()
}

/// Weights maximizing the Sharpe ratio `(w . mu - rf) / vol`.
pub fn max_sharpe_weights(
  riskfree_rate: f64,
  expected_returns: &Array1<f64>,
  covariance: &Array2<f64>,
  config: &SolverConfig,
) -> Result<Array1<f64>> {
  check_inputs(expected_returns, covariance, "max_sharpe_weights")?;

  let cost = NegSharpeCost {
    er: expected_returns.clone(),
    cov: covariance.clone(),
    riskfree_rate,
  };

  Ok(solve_on_simplex(cost, expected_returns.len(), config))
}

/// Global minimum-variance weights.
///
/// With every expected return equal, the only way to improve the Sharpe
/// ratio is to lower volatility, so max-Sharpe at rf = 0 degenerates to
/// pure variance minimization.
pub fn global_min_variance_weights(
  covariance: &Array2<f64>,
  config: &SolverConfig,
) -> Result<Array1<f64>> {
  let n = covariance.nrows();
  max_sharpe_weights(0.0, &Array1::ones(n), covariance, config)
}

struct MinVolCost {
  er: Array1<f64>,
  cov: Array2<f64>,
  target: f64,
  penalty: f64,
}

impl CostFunction for MinVolCost {
  type Param = Vec<f64>;
  type Output = f64;

  fn cost(&self, x: &Self::Param) -> std::result::Result<Self::Output, argmin::core::Error> {
    let w = Array1::from(softmax(x));
    let variance = w.dot(&self.cov.dot(&w));
    let ret = w.dot(&self.er);

    Ok(variance + self.penalty * (ret - self.target).powi(2))
  }
}

struct NegSharpeCost {
  er: Array1<f64>,
  cov: Array2<f64>,
  riskfree_rate: f64,
}

impl CostFunction for NegSharpeCost {
  type Param = Vec<f64>;
  type Output = f64;

  fn cost(&self, x: &Self::Param) -> std::result::Result<Self::Output, argmin::core::Error> {
    let w = Array1::from(softmax(x));
    let variance = w.dot(&self.cov.dot(&w));
    if variance < 1e-30 {
      return Ok(1e10);
    }
    let ret = w.dot(&self.er);

    Ok(-(ret - self.riskfree_rate) / variance.sqrt())
  }
}

fn solve_on_simplex<C>(cost: C, n: usize, config: &SolverConfig) -> Array1<f64>
where
  C: CostFunction<Param = Vec<f64>, Output = f64>,
{
  let x0 = vec![0.0; n];
  let mut simplex = Vec::with_capacity(n + 1);
  simplex.push(x0.clone());
  for i in 0..n {
    let mut point = x0.clone();
    point[i] = 1.0;
    simplex.push(point);
  }

  let best = match NelderMead::new(simplex).with_sd_tolerance(config.sd_tolerance) {
    Ok(solver) => {
      match Executor::new(cost, solver)
        .configure(|state| state.max_iters(config.max_iters))
        .run()
      {
        Ok(res) => res.state.best_param.unwrap_or(x0),
        Err(err) => {
          tracing::warn!(error = %err, "weight search aborted, returning equal weights");
          x0
        }
      }
    }
    Err(err) => {
      tracing::warn!(error = %err, "invalid solver tolerance, returning equal weights");
      x0
    }
  };

  Array1::from(softmax(&best))
}

fn softmax(x: &[f64]) -> Vec<f64> {
  if x.is_empty() {
    return Vec::new();
  }

  let max_x = x.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
  let exps: Vec<f64> = x.iter().map(|&v| (v - max_x).exp()).collect();
  let sum: f64 = exps.iter().sum();

  if sum < 1e-15 {
    vec![1.0 / x.len() as f64; x.len()]
  } else {
    exps.iter().map(|&e| e / sum).collect()
  }
}

fn check_inputs(er: &Array1<f64>, cov: &Array2<f64>, context: &'static str) -> Result<()> {
  if er.is_empty() {
    return Err(HedgekitError::contract(format!(
      "{context}: expected-return vector is empty"
    )));
  }
  check_covariance(er.len(), cov, context)
}

fn check_covariance(n: usize, cov: &Array2<f64>, context: &'static str) -> Result<()> {
  if cov.nrows() != n || cov.ncols() != n {
    return Err(HedgekitError::shape_mismatch(
      context,
      format!("{n}x{n} covariance"),
      format!("{}x{}", cov.nrows(), cov.ncols()),
    ));
  }
  Ok(())
}
