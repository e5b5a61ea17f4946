//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: [f32; 4],
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: [f32; 4]) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: std::mem::size_of::<[f32; 2]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x4,
                },
            ],
        }
    }
}

/// Colors for game elements
pub mod colors {
    /// Translucent white light rays
    pub const RAY: [f32; 4] = [1.0, 1.0, 1.0, 0.39];
    pub const WALL: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    /// Soft red halo drawn beneath walls on the High preset
    pub const WALL_GLOW: [f32; 4] = [1.0, 0.2, 0.2, 0.2];
    /// Translucent green goal disc
    pub const GOAL: [f32; 4] = [0.0, 1.0, 0.0, 0.4];
    pub const PARTICLE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
}
