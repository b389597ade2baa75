//! Device session lifecycle: every device-side resource for one run, acquired
//! in order and owned together so drop releases them in reverse on any exit
//! path.

use bench_core::{BenchError, BenchSettings, ExecutionResult, Result, WorkloadSpec};
use bytemuck::{bytes_of, cast_slice};
use tracing::info;
use wgpu::util::DeviceExt;

use crate::shaders;

/// Lanes per workgroup baked into the kernel source. `BenchSettings` must
/// agree with it; a mismatch is rejected before any device resource exists.
pub const WORKGROUP_SIZE: u32 = 256;

#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
struct KernelParams {
    total_iterations: u32,
    work_item_count: u32,
    _pad: [u32; 2],
}

const _: () = assert!(core::mem::size_of::<KernelParams>() == 16);

/// Owns context, queue, compiled pipeline, and the device-resident buffers
/// for exactly one benchmark run. Never shared, never global.
pub struct DeviceSession {
    // Field order is the release order: buffers and bind group go before the
    // pipeline, which goes before queue and device.
    staging_buffer: wgpu::Buffer,
    partials_buffer: wgpu::Buffer,
    _params_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
    pipeline: wgpu::ComputePipeline,
    queue: wgpu::Queue,
    device: wgpu::Device,
    total_iterations: u32,
    work_item_count: u32,
    workgroup_count: u32,
}

impl DeviceSession {
    /// Blocking wrapper around [`DeviceSession::create_async`].
    pub fn create(adapter: &wgpu::Adapter, settings: &BenchSettings) -> Result<Self> {
        pollster::block_on(Self::create_async(adapter, settings))
    }

    /// Walks the acquisition chain: device/queue, kernel compilation, buffer
    /// allocation, argument binding. Each step is fatal; a compile failure
    /// surfaces the verbatim diagnostics.
    pub async fn create_async(adapter: &wgpu::Adapter, settings: &BenchSettings) -> Result<Self> {
        if settings.workgroup_size != WORKGROUP_SIZE {
            return Err(BenchError::config(format!(
                "workgroup size {} does not match the kernel's fixed local size {WORKGROUP_SIZE}",
                settings.workgroup_size
            )));
        }
        // The kernel indexes with 32-bit integers.
        let total_iterations = u32::try_from(settings.total_iterations).map_err(|_| {
            BenchError::config(format!(
                "total iterations ({}) exceed the device kernel's 32-bit index range",
                settings.total_iterations
            ))
        })?;
        let work_item_count = settings.work_item_count()?;

        let (device, queue) = adapter
            .request_device(&wgpu::DeviceDescriptor {
                label: Some("bench_device"),
                required_features: wgpu::Features::empty(),
                required_limits: wgpu::Limits::downlevel_defaults(),
                ..Default::default()
            })
            .await
            .map_err(|e| BenchError::session("requesting device", e))?;
        info!("device ready: {}", adapter.get_info().name);

        // Compile the kernel inside a validation scope so the build log is
        // captured instead of hitting the uncaptured-error handler.
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let shader = device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some("math_benchmark.wgsl"),
            source: wgpu::ShaderSource::Wgsl(shaders::MATH_BENCHMARK.into()),
        });
        if let Some(err) = device.pop_error_scope().await {
            return Err(BenchError::KernelBuild {
                log: err.to_string(),
            });
        }

        let bind_group_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("BenchBindGroupLayout"),
            entries: &[
                wgpu::BindGroupLayoutEntry {
                    binding: 0,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Storage { read_only: false },
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 1,
                    visibility: wgpu::ShaderStages::COMPUTE,
                    ty: wgpu::BindingType::Buffer {
                        ty: wgpu::BufferBindingType::Uniform,
                        has_dynamic_offset: false,
                        min_binding_size: None,
                    },
                    count: None,
                },
            ],
        });

        let pipeline_layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("BenchPipelineLayout"),
            bind_group_layouts: &[&bind_group_layout],
            push_constant_ranges: &[],
        });

        // Pipeline creation still reports interface/entry-point problems as
        // build diagnostics.
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        let pipeline = device.create_compute_pipeline(&wgpu::ComputePipelineDescriptor {
            label: Some("BenchPipeline"),
            layout: Some(&pipeline_layout),
            module: &shader,
            entry_point: Some(shaders::MATH_BENCHMARK_ENTRY),
            compilation_options: Default::default(),
            cache: None,
        });
        if let Some(err) = device.pop_error_scope().await {
            return Err(BenchError::KernelBuild {
                log: err.to_string(),
            });
        }
        info!("kernel compiled: {}", shaders::MATH_BENCHMARK_ENTRY);

        let params = KernelParams {
            total_iterations,
            work_item_count,
            _pad: [0; 2],
        };
        let partials_size =
            u64::from(work_item_count) * core::mem::size_of::<f32>() as u64;

        // Allocation failures surface as out-of-memory errors, which a
        // validation scope does not capture; guard with both filters.
        device.push_error_scope(wgpu::ErrorFilter::Validation);
        device.push_error_scope(wgpu::ErrorFilter::OutOfMemory);
        let partials_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("BenchPartials"),
            size: partials_size,
            usage: wgpu::BufferUsages::STORAGE | wgpu::BufferUsages::COPY_SRC,
            mapped_at_creation: false,
        });
        let staging_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("BenchStaging"),
            size: partials_size,
            usage: wgpu::BufferUsages::MAP_READ | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });
        let params_buffer = device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
            label: Some("BenchParams"),
            contents: bytes_of(&params),
            usage: wgpu::BufferUsages::UNIFORM,
        });
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("BenchBindGroup"),
            layout: &bind_group_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: partials_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: params_buffer.as_entire_binding(),
                },
            ],
        });
        if let Some(err) = device.pop_error_scope().await {
            return Err(BenchError::session("allocating device buffers", err));
        }
        if let Some(err) = device.pop_error_scope().await {
            return Err(BenchError::session("allocating device buffers", err));
        }

        Ok(Self {
            staging_buffer,
            partials_buffer,
            _params_buffer: params_buffer,
            bind_group,
            pipeline,
            queue,
            device,
            total_iterations,
            work_item_count,
            workgroup_count: settings.workgroup_count,
        })
    }

    /// Single enqueue over the 1-D grid, blocking wait for device completion,
    /// then readback of one partial per lane.
    pub fn run(&self, spec: &WorkloadSpec) -> Result<Vec<ExecutionResult>> {
        if spec.unit_count != self.work_item_count
            || spec.total_iterations != u64::from(self.total_iterations)
        {
            return Err(BenchError::config(format!(
                "workload spec ({} iterations / {} units) does not match the session \
                 ({} iterations / {} work-items)",
                spec.total_iterations, spec.unit_count, self.total_iterations, self.work_item_count
            )));
        }

        let mut encoder = self
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("BenchEncoder"),
            });
        {
            let mut pass = encoder.begin_compute_pass(&wgpu::ComputePassDescriptor::default());
            pass.set_pipeline(&self.pipeline);
            pass.set_bind_group(0, &self.bind_group, &[]);
            pass.dispatch_workgroups(self.workgroup_count, 1, 1);
        }
        encoder.copy_buffer_to_buffer(
            &self.partials_buffer,
            0,
            &self.staging_buffer,
            0,
            self.staging_buffer.size(),
        );
        self.queue.submit(Some(encoder.finish()));

        let buffer_slice = self.staging_buffer.slice(..);
        let (tx, rx) = std::sync::mpsc::channel();
        buffer_slice.map_async(wgpu::MapMode::Read, move |result| {
            let _ = tx.send(result);
        });
        let _ = self.device.poll(wgpu::MaintainBase::Wait);
        rx.recv()
            .map_err(|_| BenchError::session("waiting for device completion", "map callback was dropped"))?
            .map_err(|e| BenchError::session("reading back partial sums", e))?;

        let data = buffer_slice.get_mapped_range();
        let partials: &[f32] = cast_slice(&data);
        let results = partials
            .iter()
            .enumerate()
            .map(|(index, &partial)| ExecutionResult {
                partition_index: index as u32,
                partial_value: f64::from(partial),
            })
            .collect();
        drop(data);
        self.staging_buffer.unmap();

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_params_layout_matches_the_wgsl_struct() {
        let params = KernelParams {
            total_iterations: 1_000,
            work_item_count: 256,
            _pad: [0; 2],
        };
        let bytes = bytes_of(&params);
        assert_eq!(bytes.len(), 16);
        assert_eq!(&bytes[0..4], 1_000u32.to_le_bytes());
        assert_eq!(&bytes[4..8], 256u32.to_le_bytes());
    }
}
