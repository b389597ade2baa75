//! Timed dispatch plus aggregation of partial sums into one report.

use std::time::Instant;

use crate::error::Result;
use crate::partition::WorkloadSpec;
use crate::strategy::{ExecutionResult, ExecutionStrategy};
use crate::workload::OPS_PER_ITERATION;

/// Derived measurement for one completed run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BenchmarkReport {
    pub elapsed_seconds: f64,
    /// Checksum over all partial sums; keeps the workload observable.
    pub aggregated_value: f64,
    /// Floating operations per second over the timed window.
    pub throughput: f64,
}

/// Reduces all partial values in slot order.
///
/// Floating accumulation order differs between strategies and unit counts;
/// that non-determinism across configurations is accepted.
pub fn aggregate(results: &[ExecutionResult]) -> f64 {
    results.iter().map(|r| r.partial_value).sum()
}

/// Runs one benchmark: monotonic timestamps strictly bracket the strategy's
/// dispatch, so one-time setup (device sessions, config parsing) never
/// lands inside the timed window.
pub fn run<S: ExecutionStrategy + ?Sized>(
    strategy: &S,
    spec: &WorkloadSpec,
) -> Result<BenchmarkReport> {
    let started = Instant::now();
    let results = strategy.dispatch(spec)?;
    let elapsed_seconds = started.elapsed().as_secs_f64();

    debug_assert_eq!(
        results.len(),
        spec.unit_count as usize,
        "dispatch must return exactly one result per unit"
    );

    let aggregated_value = aggregate(&results);
    let throughput = if elapsed_seconds > 0.0 {
        spec.total_iterations as f64 * OPS_PER_ITERATION / elapsed_seconds
    } else {
        0.0
    };

    Ok(BenchmarkReport {
        elapsed_seconds,
        aggregated_value,
        throughput,
    })
}
