//! # Hedging
//!
//! $$
//! w_{risky} = \min\!\big(\max(m \cdot c_t,\ 0),\ 1\big), \qquad
//! c_t = \frac{V_t - F_t}{V_t}
//! $$
//!
//! Dynamic hedging strategies with downside protection.

pub mod cppi;

pub use cppi::CppiConfig;
pub use cppi::CppiResult;
pub use cppi::run_cppi;
