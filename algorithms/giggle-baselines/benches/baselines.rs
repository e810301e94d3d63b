use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use giggle::benchmarks::config;
use giggle::traits::{Fit, Predict};
use giggle_baselines::{BetaParams, GaussianParams};
use giggle_datasets::generate::biased_ratings;

fn bench(c: &mut Criterion) {
    let mut benchmark = c.benchmark_group("baselines");
    config::set_default_benchmark_configs(&mut benchmark);

    for nusers in config::user_counts() {
        let dataset = biased_ratings(nusers, 100, 0.3, 1337).unwrap();
        let pairs = dataset.view().pairs();

        benchmark.bench_function(BenchmarkId::new("gaussian", nusers), |bencher| {
            bencher.iter(|| {
                GaussianParams::new()
                    .fit(black_box(&dataset.view()))
                    .unwrap()
                    .predict_many(black_box(&pairs))
            });
        });
        benchmark.bench_function(BenchmarkId::new("beta", nusers), |bencher| {
            bencher.iter(|| {
                BetaParams::new()
                    .fit(black_box(&dataset.view()))
                    .unwrap()
                    .predict_many(black_box(&pairs))
            });
        });
    }

    benchmark.finish();
}

#[cfg(not(target_os = "windows"))]
criterion_group! {
    name = benches;
    config = config::get_default_profiling_configs();
    targets = bench
}
#[cfg(target_os = "windows")]
criterion_group!(benches, bench);

criterion_main!(benches);
