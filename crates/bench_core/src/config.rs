//! Immutable run configuration shared between the thread and device paths.

use std::env;

use serde::{Deserialize, Serialize};

use crate::error::{BenchError, Result};
use crate::partition::WorkloadSpec;

/// Environment variable naming the desired degree of thread parallelism.
pub const THREAD_COUNT_VAR: &str = "NUMCPUS";

/// Benchmark settings, fixed for the lifetime of one run.
///
/// These replace the compile-time constants of a typical hand-rolled
/// benchmark so tests can parameterize them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BenchSettings {
    /// Total iterations of the math term across all execution units.
    pub total_iterations: u64,
    /// Lanes per workgroup on the device path.
    pub workgroup_size: u32,
    /// Workgroups per kernel launch on the device path.
    pub workgroup_count: u32,
}

impl Default for BenchSettings {
    fn default() -> Self {
        Self {
            total_iterations: 1_000_000_000,
            workgroup_size: 256,
            workgroup_count: 1024,
        }
    }
}

impl BenchSettings {
    /// Total work-items in one device launch.
    pub fn work_item_count(&self) -> Result<u32> {
        self.workgroup_size
            .checked_mul(self.workgroup_count)
            .ok_or_else(|| {
                BenchError::config(format!(
                    "work-item count overflows: {} workgroups of {} lanes",
                    self.workgroup_count, self.workgroup_size
                ))
            })
    }

    /// Workload spec for the thread path with the given thread count.
    pub fn thread_spec(&self, thread_count: u32) -> Result<WorkloadSpec> {
        WorkloadSpec::new(self.total_iterations, thread_count)
    }

    /// Workload spec for the device path: one unit per work-item.
    pub fn device_spec(&self) -> Result<WorkloadSpec> {
        WorkloadSpec::new(self.total_iterations, self.work_item_count()?)
    }
}

/// Reads the thread count from [`THREAD_COUNT_VAR`]; absence means one unit.
pub fn thread_count_from_env() -> Result<u32> {
    match env::var(THREAD_COUNT_VAR) {
        Ok(raw) => parse_thread_count(&raw),
        Err(env::VarError::NotPresent) => Ok(1),
        Err(env::VarError::NotUnicode(_)) => Err(BenchError::config(format!(
            "{THREAD_COUNT_VAR} is not valid UTF-8"
        ))),
    }
}

/// Parses a thread count; anything non-numeric or non-positive is fatal.
pub fn parse_thread_count(raw: &str) -> Result<u32> {
    let value: i64 = raw.trim().parse().map_err(|_| {
        BenchError::config(format!(
            "{THREAD_COUNT_VAR} must be an integer, got {raw:?}"
        ))
    })?;
    if value <= 0 {
        return Err(BenchError::config(format!(
            "{THREAD_COUNT_VAR} must be a positive integer, got {value}"
        )));
    }
    u32::try_from(value).map_err(|_| {
        BenchError::config(format!(
            "{THREAD_COUNT_VAR} is too large: {value}"
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_production_constants() {
        let settings = BenchSettings::default();
        assert_eq!(settings.total_iterations, 1_000_000_000);
        assert_eq!(settings.work_item_count().unwrap(), 262_144);
    }

    #[test]
    fn overflowing_grid_is_a_configuration_error() {
        let settings = BenchSettings {
            workgroup_size: 1 << 16,
            workgroup_count: 1 << 16,
            ..Default::default()
        };
        assert!(matches!(
            settings.work_item_count(),
            Err(BenchError::Configuration { .. })
        ));
        assert!(matches!(
            settings.device_spec(),
            Err(BenchError::Configuration { .. })
        ));
    }

    #[test]
    fn negative_thread_count_is_rejected() {
        assert!(matches!(
            parse_thread_count("-5"),
            Err(BenchError::Configuration { .. })
        ));
    }

    #[test]
    fn zero_thread_count_is_rejected() {
        assert!(matches!(
            parse_thread_count("0"),
            Err(BenchError::Configuration { .. })
        ));
    }

    #[test]
    fn non_numeric_thread_count_is_rejected() {
        assert!(matches!(
            parse_thread_count("four"),
            Err(BenchError::Configuration { .. })
        ));
    }

    #[test]
    fn positive_thread_count_parses_with_whitespace() {
        assert_eq!(parse_thread_count(" 8\n").unwrap(), 8);
    }

    #[test]
    fn thread_spec_carries_the_iteration_total() {
        let settings = BenchSettings {
            total_iterations: 1_000,
            ..Default::default()
        };
        let spec = settings.thread_spec(4).unwrap();
        assert_eq!(spec.total_iterations, 1_000);
        assert_eq!(spec.unit_count, 4);
    }
}
