//! # Mean-Reverting Short-Rate Generator
//!
//! Cox-Ingersoll-Ross style dynamics discretized with an Euler step and an
//! absolute-value reflection to keep rates non-negative (an intentional
//! approximation, not an exact CIR scheme). Alongside each rate path the
//! closed-form affine zero-coupon bond price for the remaining maturity is
//! produced:
//!
//! $$
//! P(t, T) = A(\tau)\,e^{-B(\tau) r_t}, \qquad h = \sqrt{a^2 + 2\sigma^2}
//! $$

use impl_new_derive::ImplNew;
use ndarray::Array2;
use ndarray_rand::RandomExt;
use rand::Rng;
use rand_distr::Normal;

use crate::error::HedgekitError;
use crate::error::Result;
use crate::stochastic::ann_to_inst;
use crate::stochastic::inst_to_ann;

/// Mean-reverting short-rate path generator with affine bond pricing.
#[derive(ImplNew, Clone, Debug)]
pub struct Cir {
  /// Annualized speed of mean reversion.
  pub a: f64,
  /// Annualized long-run mean rate.
  pub b: f64,
  /// Annualized rate volatility.
  pub sigma: f64,
  /// Initial annualized short rate; defaults to the long-run mean.
  pub r0: Option<f64>,
  /// Simulation horizon in years.
  pub n_years: f64,
  /// Steps per year.
  pub steps_per_year: usize,
  /// Number of independent scenario columns.
  pub n_scenarios: usize,
}

/// Simulated short-rate and zero-coupon bond price paths, one row per step
/// (row 0 deterministic) and one column per scenario.
#[derive(Clone, Debug)]
pub struct CirPaths {
  /// Annualized short rates.
  pub rates: Array2<f64>,
  /// Price of a zero-coupon bond maturing at the simulation horizon.
  pub prices: Array2<f64>,
}

impl Cir {
  /// Rows of the generated matrices: one per step plus the pinned initial row.
  pub fn n_steps(&self) -> usize {
    (self.n_years * self.steps_per_year as f64).round() as usize + 1
  }

  /// Simulate rate and bond-price paths.
  pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<CirPaths> {
    if self.sigma <= 0.0 {
      // The affine exponent divides by sigma^2.
      return Err(HedgekitError::NonPositiveVolatility(self.sigma));
    }
    if self.steps_per_year == 0 {
      return Err(HedgekitError::contract("cir: steps_per_year must be positive"));
    }
    if 2.0 * self.a * self.b < self.sigma.powi(2) {
      tracing::warn!(
        a = self.a,
        b = self.b,
        sigma = self.sigma,
        "Feller condition violated, rates will touch zero"
      );
    }

    let r0 = ann_to_inst(self.r0.unwrap_or(self.b));
    let dt = 1.0 / self.steps_per_year as f64;
    let n_steps = self.n_steps();
    let h = (self.a.powi(2) + 2.0 * self.sigma.powi(2)).sqrt();

    let zcb_price = |ttm: f64, r: f64| -> f64 {
      let growth = (h * ttm).exp() - 1.0;
      let denom = 2.0 * h + (h + self.a) * growth;
      let a_term = ((2.0 * h * ((h + self.a) * ttm / 2.0).exp()) / denom)
        .powf(2.0 * self.a * self.b / self.sigma.powi(2));
      let b_term = 2.0 * growth / denom;
      a_term * (-b_term * r).exp()
    };

    let normal = Normal::new(0.0, dt.sqrt())
      .map_err(|e| HedgekitError::contract(format!("cir: invalid shock distribution: {e}")))?;
    let shock = Array2::random_using((n_steps, self.n_scenarios), normal, rng);

    let mut rates = Array2::zeros((n_steps, self.n_scenarios));
    let mut prices = Array2::zeros((n_steps, self.n_scenarios));
    rates.row_mut(0).fill(r0);
    prices.row_mut(0).fill(zcb_price(self.n_years, r0));

    for step in 1..n_steps {
      for j in 0..self.n_scenarios {
        let r_t = rates[[step - 1, j]];
        let d_r_t = self.a * (self.b - r_t) * dt + self.sigma * r_t.sqrt() * shock[[step, j]];
        let r_next = (r_t + d_r_t).abs();
        rates[[step, j]] = r_next;
        prices[[step, j]] = zcb_price(self.n_years - step as f64 * dt, r_next);
      }
    }

    rates.mapv_inplace(inst_to_ann);

    Ok(CirPaths { rates, prices })
  }
}
