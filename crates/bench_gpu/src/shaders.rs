//! WGSL sources compiled at session creation.

pub const MATH_BENCHMARK: &str = include_str!("../wgsl/math_benchmark.wgsl");

/// Entry point of [`MATH_BENCHMARK`].
pub const MATH_BENCHMARK_ENTRY: &str = "math_benchmark";
