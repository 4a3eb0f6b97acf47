//! # Blend Harness
//!
//! Allocation policies produce a weight-path matrix (fraction in the first
//! sleeve per time/scenario cell); the blend is element-wise.

use ndarray::Array1;
use ndarray::Array2;

use crate::error::HedgekitError;
use crate::error::Result;

/// Allocation policy producing a weight path over two return matrices.
pub trait AllocatorExt {
  /// Weight on `r1` for every time/scenario cell. Must return a matrix of
  /// the same shape as the inputs.
  fn allocate(&self, r1: &Array2<f64>, r2: &Array2<f64>) -> Array2<f64>;
}

/// Constant split between the two sleeves.
#[derive(Clone, Copy, Debug)]
pub struct FixedMix {
  /// Weight on the first sleeve.
  pub w1: f64,
}

impl AllocatorExt for FixedMix {
  fn allocate(&self, r1: &Array2<f64>, _r2: &Array2<f64>) -> Array2<f64> {
    Array2::from_elem(r1.dim(), self.w1)
  }
}

/// Target-date-fund style de-risking: the first-sleeve weight moves linearly
/// from `start_glide` to `end_glide` over time, identically in every
/// scenario.
#[derive(Clone, Copy, Debug)]
pub struct Glidepath {
  pub start_glide: f64,
  pub end_glide: f64,
}

impl AllocatorExt for Glidepath {
  fn allocate(&self, r1: &Array2<f64>, _r2: &Array2<f64>) -> Array2<f64> {
    let (n_steps, n_scenarios) = r1.dim();
    let path = Array1::linspace(self.start_glide, self.end_glide, n_steps);

    let mut weights = Array2::zeros((n_steps, n_scenarios));
    for (t, mut row) in weights.rows_mut().into_iter().enumerate() {
      row.fill(path[t]);
    }
    weights
  }
}

/// Blend two return matrices through an allocation policy.
pub fn blend(
  r1: &Array2<f64>,
  r2: &Array2<f64>,
  allocator: &dyn AllocatorExt,
) -> Result<Array2<f64>> {
  if r1.dim() != r2.dim() {
    return Err(HedgekitError::shape_mismatch(
      "blend",
      format!("{}x{}", r1.nrows(), r1.ncols()),
      format!("{}x{}", r2.nrows(), r2.ncols()),
    ));
  }

  let weights = allocator.allocate(r1, r2);
  if weights.dim() != r1.dim() {
    return Err(HedgekitError::shape_mismatch(
      "blend allocator output",
      format!("{}x{}", r1.nrows(), r1.ncols()),
      format!("{}x{}", weights.nrows(), weights.ncols()),
    ));
  }

  let inverse = weights.mapv(|w| 1.0 - w);
  Ok(&weights * r1 + &inverse * r2)
}

#[cfg(test)]
mod tests {
  use approx::assert_relative_eq;
  use ndarray::Array2;

  use super::*;

  #[test]
  fn fixed_mix_interpolates_the_sleeves() {
    let r1 = Array2::from_elem((4, 3), 0.10);
    let r2 = Array2::from_elem((4, 3), 0.02);

    let mixed = blend(&r1, &r2, &FixedMix { w1: 0.25 }).unwrap();
    for &r in &mixed {
      assert_relative_eq!(r, 0.04, epsilon = 1e-12);
    }
  }

  #[test]
  fn glidepath_moves_linearly_over_time() {
    let r1 = Array2::from_elem((3, 2), 1.0);
    let r2 = Array2::zeros((3, 2));

    let mixed = blend(&r1, &r2, &Glidepath { start_glide: 1.0, end_glide: 0.0 }).unwrap();

    for j in 0..2 {
      assert_relative_eq!(mixed[[0, j]], 1.0, epsilon = 1e-12);
      assert_relative_eq!(mixed[[1, j]], 0.5, epsilon = 1e-12);
      assert_relative_eq!(mixed[[2, j]], 0.0, epsilon = 1e-12);
    }
  }

  #[test]
  fn blend_rejects_mismatched_inputs() {
    let r1 = Array2::zeros((4, 3));
    let r2 = Array2::zeros((4, 2));
    let res = blend(&r1, &r2, &FixedMix { w1: 0.5 });
    assert!(matches!(res, Err(HedgekitError::ShapeMismatch { .. })));
  }

  #[test]
  fn blend_rejects_misshapen_allocator_output() {
    struct Broken;
    impl AllocatorExt for Broken {
      fn allocate(&self, _r1: &Array2<f64>, _r2: &Array2<f64>) -> Array2<f64> {
        Array2::zeros((1, 1))
      }
    }

    let r = Array2::zeros((4, 3));
    let res = blend(&r, &r, &Broken);
    assert!(matches!(res, Err(HedgekitError::ShapeMismatch { .. })));
  }
}
