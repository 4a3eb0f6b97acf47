//! # Portfolio
//!
//! $$
//! \sigma_p^2 = \mathbf{w}^\top \Sigma \mathbf{w}
//! $$
//!
//! Constrained mean-variance portfolio construction.

pub mod frontier;

pub use frontier::SolverConfig;
pub use frontier::efficient_frontier_weights;
pub use frontier::global_min_variance_weights;
pub use frontier::max_sharpe_weights;
pub use frontier::minimize_volatility;
pub use frontier::portfolio_return;
pub use frontier::portfolio_volatility;
