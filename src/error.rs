//! # Errors
//!
//! Typed failure taxonomy shared by every module. All "failures" are input
//! contract violations; numerical edge cases are clamped at the call site
//! instead of surfacing here.

use thiserror::Error;

/// Result type alias used across the crate.
pub type Result<T> = std::result::Result<T, HedgekitError>;

#[derive(Error, Debug)]
pub enum HedgekitError {
  /// Dimension mismatch between paired inputs.
  #[error("shape mismatch in {context}: expected {expected}, got {actual}")]
  ShapeMismatch {
    context: &'static str,
    expected: String,
    actual: String,
  },

  /// Input violates a documented precondition.
  #[error("contract violation: {0}")]
  ContractViolation(String),

  /// A closed form or ratio requires strictly positive volatility.
  #[error("non-positive volatility: {0}")]
  NonPositiveVolatility(f64),
}

impl HedgekitError {
  pub fn shape_mismatch(
    context: &'static str,
    expected: impl Into<String>,
    actual: impl Into<String>,
  ) -> Self {
    Self::ShapeMismatch {
      context,
      expected: expected.into(),
      actual: actual.into(),
    }
  }

  pub fn contract(message: impl Into<String>) -> Self {
    Self::ContractViolation(message.into())
  }
}
