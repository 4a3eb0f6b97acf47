//! # Bond Analytics
//!
//! Coupon-bond cash flows and pricing, Macaulay duration, and the
//! closed-form two-bond duration match.

use ndarray::Array1;
use ndarray::Array2;

use super::discount::CashFlows;
use super::discount::discount_factors;
use super::discount::present_value;
use crate::error::Result;

/// Cash flows of a coupon bond, indexed by coupon number. The final payment
/// carries the principal.
pub fn bond_cash_flows(
  maturity: f64,
  principal: f64,
  coupon_rate: f64,
  coupons_per_year: usize,
) -> Result<CashFlows> {
  let n_coupons = (maturity * coupons_per_year as f64).round() as usize;
  let coupon_amt = principal * coupon_rate / coupons_per_year as f64;

  let times = Array1::from_iter((1..=n_coupons).map(|t| t as f64));
  let mut amounts = Array1::from_elem(n_coupons, coupon_amt);
  if let Some(last) = amounts.last_mut() {
    *last += principal;
  }

  CashFlows::new(times, amounts)
}

/// Price a bond at a flat annualized discount rate.
///
/// At maturity <= 0 the bond is worth par plus the accrued final coupon.
pub fn bond_price(
  maturity: f64,
  principal: f64,
  coupon_rate: f64,
  coupons_per_year: usize,
  rate: f64,
) -> Result<f64> {
  if maturity <= 0.0 {
    return Ok(principal + principal * coupon_rate / coupons_per_year as f64);
  }
  let flows = bond_cash_flows(maturity, principal, coupon_rate, coupons_per_year)?;
  Ok(present_value(&flows, rate / coupons_per_year as f64))
}

/// Reprice a bond along a time x scenario matrix of annualized rates.
///
/// Each observation row shortens the remaining maturity by the elapsed
/// coupon periods and reprices the remaining cash flows at that row's rates,
/// scenario by scenario.
pub fn bond_price_on_curve(
  maturity: f64,
  principal: f64,
  coupon_rate: f64,
  coupons_per_year: usize,
  rates: &Array2<f64>,
) -> Result<Array2<f64>> {
  let (n_obs, n_scenarios) = rates.dim();
  let mut prices = Array2::zeros((n_obs, n_scenarios));

  for t in 0..n_obs {
    let remaining = maturity - t as f64 / coupons_per_year as f64;
    for j in 0..n_scenarios {
      prices[[t, j]] = bond_price(
        remaining,
        principal,
        coupon_rate,
        coupons_per_year,
        rates[[t, j]],
      )?;
    }
  }

  Ok(prices)
}

/// Macaulay duration: present-value-weighted average time to payment, in
/// periods of the cash-flow index.
pub fn macaulay_duration(flows: &CashFlows, discount_rate: f64) -> f64 {
  let discounted = discount_factors(&flows.times, discount_rate) * &flows.amounts;
  let total = discounted.sum();
  flows.times.dot(&discounted) / total
}

/// Weight `w` on the short bond such that
/// `w * D_short + (1 - w) * D_long = D_target`.
///
/// The caller must ensure `D_short <= D_target <= D_long`; out-of-range
/// targets produce a weight outside `[0, 1]` without further validation.
pub fn match_durations(
  target_flows: &CashFlows,
  short_bond_flows: &CashFlows,
  long_bond_flows: &CashFlows,
  discount_rate: f64,
) -> f64 {
  let d_target = macaulay_duration(target_flows, discount_rate);
  let d_short = macaulay_duration(short_bond_flows, discount_rate);
  let d_long = macaulay_duration(long_bond_flows, discount_rate);

  (d_long - d_target) / (d_long - d_short)
}

/// Total periodic returns of a bond from a simulated price path, coupon
/// payments included. Returns one fewer row than `prices`.
pub fn bond_total_return(
  prices: &Array2<f64>,
  principal: f64,
  coupon_rate: f64,
  coupons_per_year: usize,
  periods_per_year: usize,
) -> Array2<f64> {
  let (n_obs, n_scenarios) = prices.dim();
  let coupon_amt = principal * coupon_rate / coupons_per_year as f64;
  let rows_per_coupon = (periods_per_year / coupons_per_year).max(1);

  let mut total_returns = Array2::zeros((n_obs.saturating_sub(1), n_scenarios));
  for t in 1..n_obs {
    let coupon = if t % rows_per_coupon == 0 { coupon_amt } else { 0.0 };
    for j in 0..n_scenarios {
      total_returns[[t - 1, j]] = (prices[[t, j]] + coupon) / prices[[t - 1, j]] - 1.0;
    }
  }

  total_returns
}
