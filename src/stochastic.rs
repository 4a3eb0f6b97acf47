//! # Stochastic Path Generators
//!
//! $$
//! dS_t = \mu S_t\,dt + \sigma S_t\,dW_t, \qquad
//! dr_t = a(b - r_t)\,dt + \sigma\sqrt{r_t}\,dW_t
//! $$
//!
//! Monte Carlo generators for stress-testing hedging strategies: lognormal
//! asset prices ([`gbm`]) and a mean-reverting short rate with closed-form
//! zero-coupon bond prices ([`cir`]). All randomness flows through an
//! injected `rand::Rng`, so paths are reproducible from an explicit seed.

pub mod cir;
pub mod gbm;

pub use cir::Cir;
pub use cir::CirPaths;
pub use gbm::DriftCompounding;
pub use gbm::Gbm;

/// Convert a continuously-compounded instantaneous rate to an annualized
/// rate. Exact inverse of [`ann_to_inst`].
pub fn inst_to_ann(r: f64) -> f64 {
  r.exp_m1()
}

/// Convert an annualized rate to a continuously-compounded instantaneous
/// rate. Exact inverse of [`inst_to_ann`].
pub fn ann_to_inst(r: f64) -> f64 {
  r.ln_1p()
}
