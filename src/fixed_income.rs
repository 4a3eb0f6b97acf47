//! # Fixed Income
//!
//! $$
//! PV = \sum_t \frac{CF_t}{(1+r)^t}, \qquad
//! D = \frac{\sum_t t \cdot PV(CF_t)}{\sum_t PV(CF_t)}
//! $$
//!
//! Cash-flow discounting and the bond analytics used to hedge liabilities:
//! pricing, Macaulay duration, and closed-form duration matching.

pub mod bonds;
pub mod discount;

pub use bonds::bond_cash_flows;
pub use bonds::bond_price;
pub use bonds::bond_price_on_curve;
pub use bonds::bond_total_return;
pub use bonds::macaulay_duration;
pub use bonds::match_durations;
pub use discount::CashFlows;
pub use discount::discount_factors;
pub use discount::funding_ratio;
pub use discount::present_value;
