mod buffers;
mod camera;
mod context;
mod render;

pub use buffers::CloudBuffers;
pub use camera::OrbitCamera;
pub use context::GpuContext;
pub use render::{GuideFlags, RenderPipeline};
