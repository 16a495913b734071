mod buffers;
mod context;
mod render;

pub use buffers::{cell_size, CellBuffers, ViewParams};
pub use context::GpuContext;
pub use render::RenderPipeline;
