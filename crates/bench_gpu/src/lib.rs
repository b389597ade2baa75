//! GPU execution path over `wgpu`: device enumeration, the per-run device
//! session, and the strided-kernel [`ExecutionStrategy`] implementation.
//!
//! [`ExecutionStrategy`]: bench_core::ExecutionStrategy

pub mod device;
pub mod runner;
pub mod session;
pub mod shaders;

pub use device::{create_instance, enumerate, validate_selection, DeviceInfo};
pub use runner::GpuStrategy;
pub use session::DeviceSession;

// The app layer needs `wgpu::Instance` without carrying its own dependency.
pub use wgpu;
