//! # Lognormal Price Generator
//!
//! Geometric-Brownian-motion style Monte Carlo: each step draws an
//! independent gross-return multiplier from a normal distribution calibrated
//! to the per-step time increment, and prices follow by cumulative product.

use impl_new_derive::ImplNew;
use ndarray::Array2;
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::Normal;

use crate::error::HedgekitError;
use crate::error::Result;

/// How the per-step mean gross return is derived from the annual drift.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DriftCompounding {
  /// `1 + mu * dt`: simple annualized compounding.
  Simple,
  /// `(1 + mu)^dt`: exact compounding, no discretization error in the mean.
  Exact,
}

/// Lognormal asset-price path generator.
#[derive(ImplNew, Clone, Debug)]
pub struct Gbm {
  /// Annualized drift.
  pub mu: f64,
  /// Annualized volatility.
  pub sigma: f64,
  /// Simulation horizon in years.
  pub n_years: f64,
  /// Steps per year.
  pub steps_per_year: usize,
  /// Number of independent scenario columns.
  pub n_scenarios: usize,
  /// Initial price.
  pub s0: f64,
  /// Per-step mean calibration.
  pub compounding: DriftCompounding,
}

impl Gbm {
  /// Rows of the generated matrices: one per step plus the pinned initial row.
  pub fn n_steps(&self) -> usize {
    (self.n_years * self.steps_per_year as f64).round() as usize + 1
  }

  /// Price paths, row 0 fixed to the initial price in every scenario.
  pub fn sample_prices<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Array2<f64>> {
    let mut growth = self.growth_factors(rng)?;

    let mut acc = vec![self.s0; self.n_scenarios];
    for mut row in growth.rows_mut() {
      for (j, cell) in row.iter_mut().enumerate() {
        acc[j] *= *cell;
        *cell = acc[j];
      }
    }

    Ok(growth)
  }

  /// Per-step simple returns instead of price levels; row 0 is all zeros.
  pub fn sample_returns<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Array2<f64>> {
    let mut growth = self.growth_factors(rng)?;
    growth -= 1.0;
    Ok(growth)
  }

  /// Gross per-step multipliers with the day-one row pinned to 1.
  fn growth_factors<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<Array2<f64>> {
    if self.sigma < 0.0 {
      return Err(HedgekitError::contract(format!(
        "gbm: negative volatility {}",
        self.sigma
      )));
    }
    if self.steps_per_year == 0 {
      return Err(HedgekitError::contract("gbm: steps_per_year must be positive"));
    }

    let dt = 1.0 / self.steps_per_year as f64;
    let loc = match self.compounding {
      DriftCompounding::Simple => 1.0 + self.mu * dt,
      DriftCompounding::Exact => (1.0 + self.mu).powf(dt),
    };
    let scale = self.sigma * dt.sqrt();
    let normal = Normal::new(loc, scale)
      .map_err(|e| HedgekitError::contract(format!("gbm: invalid step distribution: {e}")))?;

    let mut growth = Array2::random_using((self.n_steps(), self.n_scenarios), normal, rng);
    growth.row_mut(0).fill(1.0);

    Ok(growth)
  }
}
