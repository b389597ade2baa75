//! The device-side [`ExecutionStrategy`]: one kernel launch, cyclically
//! partitioned.
//!
//! Unlike the thread path's contiguous ranges, lane `gid` sums the strided
//! index set `{gid, gid + stride, ...}` with `stride = work_item_count`.
//! The two partition shapes are intentionally not unified; collapsing them
//! would change the performance profile without being required for
//! correctness.

use bench_core::{BenchSettings, ExecutionResult, ExecutionStrategy, Result, WorkloadSpec};

use crate::session::DeviceSession;

pub struct GpuStrategy {
    session: DeviceSession,
}

impl GpuStrategy {
    /// Builds the full device session up front, outside any timed window.
    pub fn new(adapter: &wgpu::Adapter, settings: &BenchSettings) -> Result<Self> {
        let session = DeviceSession::create(adapter, settings)?;
        Ok(Self { session })
    }
}

impl ExecutionStrategy for GpuStrategy {
    fn label(&self) -> &'static str {
        "device"
    }

    fn dispatch(&self, spec: &WorkloadSpec) -> Result<Vec<ExecutionResult>> {
        self.session.run(spec)
    }
}
