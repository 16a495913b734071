use wgpu::{Buffer, BufferUsages, Device, Queue};

use sort_cycle::simulation::{CellInstance, Grid};

/// Share of a grid slot covered by the drawn cell
const CELL_FILL: f32 = 0.86;

/// Manages the per-cell instance buffer and the view uniform
pub struct CellBuffers {
    /// One `CellInstance` per cell, rewritten every frame
    pub instance_buffer: Buffer,
    /// Uniform buffer for view parameters
    pub view_buffer: Buffer,
    /// Instances the buffer can hold
    capacity: usize,
    /// Instances written by the last upload
    count: u32,
}

/// View parameters passed to the cell shader (16 bytes)
///
/// Maps grid space to clip space: `clip = (p - offset) * scale`.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct ViewParams {
    pub scale: [f32; 2],
    pub offset: [f32; 2],
}

impl ViewParams {
    /// Fit the whole grid (plus half a slot of margin) into a
    /// `width x height` pixel surface, preserving aspect ratio. Row 0 is
    /// drawn at the top.
    pub fn fit(grid: &Grid, width: u32, height: u32) -> Self {
        let [sx, sy, _] = grid.scale();
        let cols = grid.cols().max(1) as f32;
        let rows = grid.len().div_ceil(grid.cols().max(1)).max(1) as f32;

        let world_w = cols * sx;
        let world_h = rows * sy;
        let (width, height) = (width.max(1) as f32, height.max(1) as f32);
        let pixels_per_unit = (width / world_w).min(height / world_h);

        Self {
            scale: [
                2.0 * pixels_per_unit / width,
                -2.0 * pixels_per_unit / height,
            ],
            offset: [(cols - 1.0) * sx / 2.0, (rows - 1.0) * sy / 2.0],
        }
    }
}

/// Edge length of a drawn cell for the grid's spacing
pub fn cell_size(grid: &Grid) -> f32 {
    let [sx, sy, _] = grid.scale();
    sx.min(sy) * CELL_FILL
}

impl CellBuffers {
    /// Create buffers sized for `capacity` cells
    pub fn new(device: &Device, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let view_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("view-params-buffer"),
            size: std::mem::size_of::<ViewParams>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        Self {
            instance_buffer: Self::create_instance_buffer(device, capacity),
            view_buffer,
            capacity,
            count: 0,
        }
    }

    fn create_instance_buffer(device: &Device, capacity: usize) -> Buffer {
        device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("cell-instance-buffer"),
            size: (capacity * std::mem::size_of::<CellInstance>()) as u64,
            usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        })
    }

    /// Upload this frame's instances, growing the buffer if the grid grew
    pub fn upload(&mut self, device: &Device, queue: &Queue, instances: &[CellInstance]) {
        if instances.len() > self.capacity {
            self.capacity = instances.len().next_power_of_two();
            self.instance_buffer = Self::create_instance_buffer(device, self.capacity);
            log::debug!("Instance buffer grown to {} cells", self.capacity);
        }
        if !instances.is_empty() {
            queue.write_buffer(&self.instance_buffer, 0, bytemuck::cast_slice(instances));
        }
        self.count = instances.len() as u32;
    }

    /// Update view parameters
    pub fn update_view(&self, queue: &Queue, params: ViewParams) {
        queue.write_buffer(&self.view_buffer, 0, bytemuck::bytes_of(&params));
    }

    /// Instances written by the last upload
    pub fn count(&self) -> u32 {
        self.count
    }
}
