//! Adapter enumeration and bounds-checked device selection.

use std::fmt;

use bench_core::{BenchError, Result};
use tracing::info;

/// Creates the wgpu instance used for one process invocation.
pub fn create_instance() -> wgpu::Instance {
    let instance_desc = wgpu::InstanceDescriptor {
        backends: wgpu::Backends::all(),
        ..Default::default()
    };
    wgpu::Instance::new(&instance_desc)
}

/// Display/selection view of one enumerated adapter.
///
/// Immutable after enumeration; nothing downstream reads it except the menu.
#[derive(Debug, Clone)]
pub struct DeviceInfo {
    pub index: usize,
    pub name: String,
    pub backend: wgpu::Backend,
    pub device_type: wgpu::DeviceType,
}

impl fmt::Display for DeviceInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} ({:?}, {:?})",
            self.index, self.name, self.backend, self.device_type
        )
    }
}

/// Enumerates every adapter across all backends, once, at startup.
pub fn enumerate(instance: &wgpu::Instance) -> Result<Vec<(DeviceInfo, wgpu::Adapter)>> {
    let adapters = instance.enumerate_adapters(wgpu::Backends::all());
    if adapters.is_empty() {
        return Err(BenchError::unavailable("no adapter found on any backend"));
    }

    Ok(adapters
        .into_iter()
        .enumerate()
        .map(|(index, adapter)| {
            let info = adapter.get_info();
            info!("found compute adapter: {} ({:?})", info.name, info.backend);
            (
                DeviceInfo {
                    index,
                    name: info.name,
                    backend: info.backend,
                    device_type: info.device_type,
                },
                adapter,
            )
        })
        .collect())
}

/// Rejects a selection outside the enumerated range before any device
/// resource exists.
pub fn validate_selection(index: i64, count: usize) -> Result<usize> {
    if index < 0 || index as u64 >= count as u64 {
        return Err(BenchError::InvalidSelection { index, count });
    }
    Ok(index as usize)
}
