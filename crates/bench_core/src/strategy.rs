//! The execution seam between the harness and its two concurrency substrates.

use std::thread;

use crate::error::{BenchError, Result};
use crate::partition::{self, Partition, WorkloadSpec};
use crate::workload;

/// Partial sum produced by exactly one execution unit.
///
/// Written once by its unit, then only read by the aggregator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExecutionResult {
    pub partition_index: u32,
    pub partial_value: f64,
}

/// One way of dividing the workload across concurrent execution units.
///
/// `dispatch` starts every unit, blocks until all have completed, and
/// returns the full result set. Callers never observe a partial set: either
/// every unit finished or the dispatch itself failed.
pub trait ExecutionStrategy {
    /// Short human-readable name for logs and banners.
    fn label(&self) -> &'static str;

    /// Runs the whole workload and collects one result per unit.
    fn dispatch(&self, spec: &WorkloadSpec) -> Result<Vec<ExecutionResult>>;
}

/// Runs each contiguous partition on its own OS thread.
///
/// Threads share no mutable state: each owns its partition and produces its
/// own result, so no locking is involved. The join barrier is the only
/// suspension point.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadStrategy;

impl ThreadStrategy {
    fn run_unit(partition: Partition) -> ExecutionResult {
        ExecutionResult {
            partition_index: partition.index,
            partial_value: workload::sum_range(partition.start, partition.end),
        }
    }
}

impl ExecutionStrategy for ThreadStrategy {
    fn label(&self) -> &'static str {
        "threads"
    }

    fn dispatch(&self, spec: &WorkloadSpec) -> Result<Vec<ExecutionResult>> {
        let partitions = partition::split(spec)?;

        // The scope joins every thread it spawned even when we bail out of
        // the closure early, so a failed spawn never leaks running workers.
        thread::scope(|scope| {
            let mut handles = Vec::with_capacity(partitions.len());
            for p in &partitions {
                let p = *p;
                let builder = thread::Builder::new().name(format!("bench-worker-{}", p.index));
                let handle = builder
                    .spawn_scoped(scope, move || Self::run_unit(p))
                    .map_err(BenchError::from)?;
                handles.push((p.index, handle));
            }

            let mut results = Vec::with_capacity(handles.len());
            for (index, handle) in handles {
                let result = handle
                    .join()
                    .map_err(|_| BenchError::WorkerPanicked { index })?;
                results.push(result);
            }
            Ok(results)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dispatch_returns_one_result_per_unit() {
        let spec = WorkloadSpec::new(1_000, 4).unwrap();
        let results = ThreadStrategy.dispatch(&spec).unwrap();
        assert_eq!(results.len(), 4);
        for (i, r) in results.iter().enumerate() {
            assert_eq!(r.partition_index as usize, i);
        }
    }

    #[test]
    fn partial_sums_match_their_partitions_exactly() {
        let spec = WorkloadSpec::new(500, 3).unwrap();
        let partitions = partition::split(&spec).unwrap();
        let results = ThreadStrategy.dispatch(&spec).unwrap();
        for (p, r) in partitions.iter().zip(&results) {
            let expected = workload::sum_range(p.start, p.end);
            assert_eq!(r.partial_value.to_bits(), expected.to_bits());
        }
    }

    #[test]
    fn total_agrees_with_the_sequential_sum() {
        let spec = WorkloadSpec::new(2_000, 7).unwrap();
        let results = ThreadStrategy.dispatch(&spec).unwrap();
        let parallel: f64 = results.iter().map(|r| r.partial_value).sum();
        let sequential = workload::sum_range(0, 2_000);
        // Reassociating the accumulation may move the result by rounding.
        assert!((parallel - sequential).abs() < 1e-9);
    }

    #[test]
    fn invalid_spec_spawns_no_threads() {
        let bogus = WorkloadSpec {
            total_iterations: 10,
            unit_count: 0,
        };
        assert!(matches!(
            ThreadStrategy.dispatch(&bogus),
            Err(BenchError::Configuration { .. })
        ));
    }
}
