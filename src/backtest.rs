//! # Mixed-Asset Backtest Harness
//!
//! $$
//! R^{mix}_{t,s} = w_{t,s} R^{(1)}_{t,s} + (1 - w_{t,s}) R^{(2)}_{t,s}
//! $$
//!
//! Blends two return matrices (e.g. a performance-seeking and a
//! goal-hedging sleeve) through a pluggable allocation policy, then reduces
//! the blend to terminal wealth and shortfall/surplus statistics.

pub mod mix;
pub mod terminal;

pub use mix::AllocatorExt;
pub use mix::FixedMix;
pub use mix::Glidepath;
pub use mix::blend;
pub use terminal::TerminalStats;
pub use terminal::terminal_stats;
pub use terminal::terminal_wealth;
