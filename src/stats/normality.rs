//! # Normality Testing
//!
//! Jarque-Bera test: under normality the statistic is asymptotically
//! chi-squared with 2 degrees of freedom.

use ndarray::ArrayView1;
use statrs::distribution::ChiSquared;
use statrs::distribution::ContinuousCDF;

use super::reducers::kurtosis;
use super::reducers::skewness;

/// Jarque-Bera statistic and its asymptotic p-value.
pub fn jarque_bera(returns: ArrayView1<f64>) -> (f64, f64) {
  let n = returns.len() as f64;
  let s = skewness(returns);
  let k = kurtosis(returns);
  let statistic = n / 6.0 * (s.powi(2) + (k - 3.0).powi(2) / 4.0);

  let chi2 = ChiSquared::new(2.0).unwrap();
  let p_value = 1.0 - chi2.cdf(statistic);

  (statistic, p_value)
}

/// True when the Jarque-Bera p-value exceeds `level` (default usage: 0.01).
pub fn is_normal(returns: ArrayView1<f64>, level: f64) -> bool {
  let (_, p_value) = jarque_bera(returns);
  p_value > level
}

#[cfg(test)]
mod tests {
  use ndarray::Array1;
  use ndarray::ArrayView1;
  use rand::SeedableRng;
  use rand::rngs::StdRng;
  use rand_distr::Distribution;
  use rand_distr::Normal;

  use super::*;

  #[test]
  fn gaussian_sample_passes() {
    let mut rng = StdRng::seed_from_u64(1);
    let normal = Normal::new(0.0, 0.02).unwrap();
    let sample: Array1<f64> = (0..500).map(|_| normal.sample(&mut rng)).collect();

    assert!(is_normal(sample.view(), 0.01));
  }

  #[test]
  fn heavy_tailed_sample_fails() {
    // A Gaussian bulk with repeated crash outliers.
    let mut sample = vec![0.0; 200];
    for (i, x) in sample.iter_mut().enumerate() {
      *x = if i % 50 == 0 { -0.5 } else { 0.001 * (i as f64 % 7.0 - 3.0) };
    }

    assert!(!is_normal(ArrayView1::from(&sample), 0.01));
  }

  #[test]
  fn statistic_is_non_negative() {
    let sample = Array1::from_elem(50, 0.01) + Array1::linspace(0.0, 0.01, 50);
    let (stat, p) = jarque_bera(sample.view());
    assert!(stat >= 0.0);
    assert!((0.0..=1.0).contains(&p));
  }
}
