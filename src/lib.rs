//! # hedgekit
//!
//! `hedgekit` is a numerical toolkit for constructing investment portfolios
//! and simulating dynamic hedging strategies under uncertainty. It is a pure
//! in-memory computational library: inputs are already-parsed return
//! series/matrices, outputs are weight vectors, wealth histories, and summary
//! statistics for downstream reporting.
//!
//! ## Modules
//!
//! | Module           | Description                                                                 |
//! |------------------|-----------------------------------------------------------------------------|
//! | [`portfolio`]    | Constrained mean-variance frontier, max-Sharpe and minimum-variance weights. |
//! | [`hedging`]      | CPPI dynamic-hedging backtester with optional drawdown-ratcheted floor.      |
//! | [`stochastic`]   | Lognormal price and mean-reverting short-rate path generators.               |
//! | [`fixed_income`] | Cash-flow discounting, bond pricing, and duration-matching analytics.        |
//! | [`backtest`]     | Two-sleeve blend harness with pluggable allocators and terminal statistics.  |
//! | [`stats`]        | Descriptive return statistics (annualization, VaR/CVaR, drawdown, normality).|
//! | [`error`]        | Typed error taxonomy shared by every module.                                 |
//!
//! ## Determinism
//!
//! Random draws occur only in the path generators and the sampler is injected
//! (`&mut R where R: rand::Rng`), so every simulation is reproducible from an
//! explicit seed. No module holds process-wide mutable state.

pub mod backtest;
pub mod error;
pub mod fixed_income;
pub mod hedging;
pub mod portfolio;
pub mod stats;
pub mod stochastic;

pub use error::HedgekitError;
pub use error::Result;
