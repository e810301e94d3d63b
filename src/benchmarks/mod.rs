//! Shared criterion settings for the benches of the workspace crates
//!
//! Only compiled with the `benchmarks` feature.

#[cfg(feature = "benchmarks")]
pub mod config {
    use criterion::{measurement::WallTime, BenchmarkGroup, Criterion};
    #[cfg(not(target_os = "windows"))]
    use pprof::criterion::{Output, PProfProfiler};
    use std::time::Duration;

    /// Criterion with a flamegraph profiler attached
    #[cfg(not(target_os = "windows"))]
    pub fn get_default_profiling_configs() -> Criterion {
        Criterion::default().with_profiler(PProfProfiler::new(100, Output::Flamegraph(None)))
    }

    /// Fitting on a full rating table takes long, so groups run fewer samples over a longer
    /// window than criterion's defaults
    pub fn set_default_benchmark_configs(benchmark: &mut BenchmarkGroup<WallTime>) {
        let sample_size: usize = 50;
        let measurement_time: Duration = Duration::new(15, 0);
        let confidence_level: f64 = 0.95;
        let warm_up_time: Duration = Duration::new(5, 0);
        let noise_threshold: f64 = 0.05;

        benchmark
            .sample_size(sample_size)
            .measurement_time(measurement_time)
            .confidence_level(confidence_level)
            .warm_up_time(warm_up_time)
            .noise_threshold(noise_threshold);
    }

    /// Number of users used by the scaling benches, Jester has about 60 000
    pub fn user_counts() -> [usize; 3] {
        [100, 500, 2_000]
    }
}
