use std::ops::Range;

use glam::Mat4;
use orbital_cloud::config::{AXIS_LENGTH, GRID_DIVISIONS, GRID_SIZE, POINT_COLOR, POINT_SIZE};
use orbital_cloud::SampleField;
use wgpu::{Buffer, BufferUsages, Device, Queue};

/// Per-frame scene parameters shared by the point and guide shaders (96 bytes, aligned to 16)
#[repr(C)]
#[derive(Clone, Copy, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct SceneUniforms {
    // Camera (64 bytes)
    pub view_proj: [[f32; 4]; 4],

    // Point appearance (16 bytes)
    pub point_color: [f32; 4],

    // Viewport in pixels + point size (16 bytes)
    pub viewport: [f32; 2],
    pub point_size: f32,
    pub _padding: f32,
}

/// Vertex of the axis / grid line list
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct GuideVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

const GRID_CENTER_COLOR: [f32; 3] = [0.27, 0.27, 0.27];
const GRID_LINE_COLOR: [f32; 3] = [0.53, 0.53, 0.53];

/// Line geometry for the three axes followed by the XZ grid.
/// Returns the vertices and the vertex ranges of each part.
pub fn guide_vertices() -> (Vec<GuideVertex>, Range<u32>, Range<u32>) {
    let half_axis = AXIS_LENGTH / 2.0;
    let mut vertices = vec![
        GuideVertex {
            position: [-half_axis, 0.0, 0.0],
            color: [1.0, 0.0, 0.0],
        },
        GuideVertex {
            position: [half_axis, 0.0, 0.0],
            color: [1.0, 0.0, 0.0],
        },
        GuideVertex {
            position: [0.0, -half_axis, 0.0],
            color: [0.0, 1.0, 0.0],
        },
        GuideVertex {
            position: [0.0, half_axis, 0.0],
            color: [0.0, 1.0, 0.0],
        },
        GuideVertex {
            position: [0.0, 0.0, -half_axis],
            color: [0.0, 0.0, 1.0],
        },
        GuideVertex {
            position: [0.0, 0.0, half_axis],
            color: [0.0, 0.0, 1.0],
        },
    ];
    let axes = 0..vertices.len() as u32;

    let half = GRID_SIZE / 2.0;
    let spacing = GRID_SIZE / GRID_DIVISIONS as f32;
    for i in 0..=GRID_DIVISIONS {
        let offset = -half + i as f32 * spacing;
        let color = if 2 * i == GRID_DIVISIONS {
            GRID_CENTER_COLOR
        } else {
            GRID_LINE_COLOR
        };
        vertices.push(GuideVertex {
            position: [-half, 0.0, offset],
            color,
        });
        vertices.push(GuideVertex {
            position: [half, 0.0, offset],
            color,
        });
        vertices.push(GuideVertex {
            position: [offset, 0.0, -half],
            color,
        });
        vertices.push(GuideVertex {
            position: [offset, 0.0, half],
            color,
        });
    }
    let grid = axes.end..vertices.len() as u32;

    (vertices, axes, grid)
}

/// GPU buffers for the point cloud and its guides
pub struct CloudBuffers {
    /// Point positions, one vec3 per instance (uploaded once)
    pub position_buffer: Buffer,
    /// Visibility flags, one f32 per instance (rewritten every frame)
    pub visibility_buffer: Buffer,
    /// Uniform buffer for scene parameters
    pub scene_buffer: Buffer,
    /// Axis and grid line vertices
    pub guide_buffer: Buffer,
    pub axes_range: Range<u32>,
    pub grid_range: Range<u32>,
    /// Number of points
    pub point_count: u32,
}

impl CloudBuffers {
    /// Create buffers and upload the immutable point data
    pub fn new(device: &Device, queue: &Queue, field: &SampleField) -> Self {
        let point_count = field.len() as u32;

        let position_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("point-position-buffer"),
            size: std::mem::size_of_val(field.positions()) as u64,
            usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let visibility_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("point-visibility-buffer"),
            size: std::mem::size_of_val(field.visibility()) as u64,
            usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let scene_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("scene-uniform-buffer"),
            size: std::mem::size_of::<SceneUniforms>() as u64,
            usage: BufferUsages::UNIFORM | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let (guides, axes_range, grid_range) = guide_vertices();
        let guide_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("guide-vertex-buffer"),
            size: std::mem::size_of_val(guides.as_slice()) as u64,
            usage: BufferUsages::VERTEX | BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        // Positions and guides never change after this
        queue.write_buffer(&position_buffer, 0, bytemuck::cast_slice(field.positions()));
        queue.write_buffer(&guide_buffer, 0, bytemuck::cast_slice(&guides));
        queue.write_buffer(&visibility_buffer, 0, bytemuck::cast_slice(field.visibility()));

        Self {
            position_buffer,
            visibility_buffer,
            scene_buffer,
            guide_buffer,
            axes_range,
            grid_range,
            point_count,
        }
    }

    /// Upload the visibility flags produced by the latest evolution step
    pub fn update_visibility(&self, queue: &Queue, field: &SampleField) {
        debug_assert_eq!(field.len() as u32, self.point_count, "Visibility size mismatch");
        queue.write_buffer(&self.visibility_buffer, 0, bytemuck::cast_slice(field.visibility()));
    }

    /// Update camera and viewport parameters
    pub fn update_scene(&self, queue: &Queue, view_proj: Mat4, viewport: [f32; 2]) {
        let uniforms = SceneUniforms {
            view_proj: view_proj.to_cols_array_2d(),
            point_color: POINT_COLOR,
            viewport,
            point_size: POINT_SIZE,
            _padding: 0.0,
        };
        queue.write_buffer(&self.scene_buffer, 0, bytemuck::bytes_of(&uniforms));
    }
}
