use std::hint::black_box;
use std::time::Duration;

use criterion::BenchmarkId;
use criterion::Criterion;
use criterion::criterion_group;
use criterion::criterion_main;
use hedgekit::hedging::CppiConfig;
use hedgekit::hedging::run_cppi;
use hedgekit::stochastic::cir::Cir;
use hedgekit::stochastic::gbm::DriftCompounding;
use hedgekit::stochastic::gbm::Gbm;
use rand::SeedableRng;
use rand::rngs::StdRng;

fn bench_path_generation(c: &mut Criterion) {
  let mut group = c.benchmark_group("PathGeneration");
  group.measurement_time(Duration::from_secs(3));
  group.warm_up_time(Duration::from_millis(500));

  for &n_scenarios in &[100usize, 10_000usize] {
    group.bench_with_input(
      BenchmarkId::new("gbm/sample_prices", n_scenarios),
      &n_scenarios,
      |b, &n| {
        let gbm = Gbm::new(
          0.07,
          0.15,
          10.0,
          12,
          n,
          100.0,
          DriftCompounding::Simple,
        );
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| black_box(gbm.sample_prices(&mut rng).unwrap()));
      },
    );

    group.bench_with_input(
      BenchmarkId::new("cir/sample", n_scenarios),
      &n_scenarios,
      |b, &n| {
        let cir = Cir::new(0.05, 0.03, 0.05, Some(0.03), 10.0, 12, n);
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| black_box(cir.sample(&mut rng).unwrap()));
      },
    );

    group.bench_with_input(
      BenchmarkId::new("cppi/run", n_scenarios),
      &n_scenarios,
      |b, &n| {
        let gbm = Gbm::new(
          0.07,
          0.15,
          10.0,
          12,
          n,
          100.0,
          DriftCompounding::Simple,
        );
        let mut rng = StdRng::seed_from_u64(42);
        let risky = gbm.sample_returns(&mut rng).unwrap();
        let config = CppiConfig::default();
        b.iter(|| black_box(run_cppi(&risky, None, &config).unwrap()));
      },
    );
  }

  group.finish();
}

criterion_group!(benches, bench_path_generation);
criterion_main!(benches);
