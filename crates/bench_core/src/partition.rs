//! Splits the total iteration count into contiguous per-unit ranges.

use crate::error::{BenchError, Result};

/// Immutable description of one benchmark run: how many iterations in total
/// and how many execution units they are divided across.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WorkloadSpec {
    pub total_iterations: u64,
    pub unit_count: u32,
}

impl WorkloadSpec {
    /// Validates the invariants up front so downstream code can assume a
    /// well-formed spec.
    pub fn new(total_iterations: u64, unit_count: u32) -> Result<Self> {
        if unit_count == 0 {
            return Err(BenchError::config("unit count must be at least 1"));
        }
        if total_iterations < u64::from(unit_count) {
            return Err(BenchError::config(format!(
                "total iterations ({total_iterations}) must be at least the unit count ({unit_count})"
            )));
        }
        Ok(Self {
            total_iterations,
            unit_count,
        })
    }
}

/// One contiguous sub-range `[start, end)` of the iteration space, owned by
/// exactly one execution unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Partition {
    pub index: u32,
    pub start: u64,
    pub end: u64,
}

impl Partition {
    pub fn len(&self) -> u64 {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Produces `unit_count` disjoint, ordered partitions covering
/// `[0, total_iterations)` exactly once.
///
/// Every partition gets `total / units` iterations except the last, which
/// absorbs the remainder. The asymmetric last chunk determines the load
/// imbalance and is deliberate.
pub fn split(spec: &WorkloadSpec) -> Result<Vec<Partition>> {
    if spec.unit_count == 0 {
        return Err(BenchError::config("unit count must be at least 1"));
    }
    if spec.total_iterations < u64::from(spec.unit_count) {
        return Err(BenchError::config(format!(
            "total iterations ({}) must be at least the unit count ({})",
            spec.total_iterations, spec.unit_count
        )));
    }

    let units = u64::from(spec.unit_count);
    let chunk = spec.total_iterations / units;

    let mut partitions = Vec::with_capacity(spec.unit_count as usize);
    for index in 0..spec.unit_count {
        let start = u64::from(index) * chunk;
        let end = if index == spec.unit_count - 1 {
            spec.total_iterations
        } else {
            start + chunk
        };
        partitions.push(Partition { index, start, end });
    }
    Ok(partitions)
}
