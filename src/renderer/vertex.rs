//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
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

/// Colors for game elements (CSS named colors, sRGB)
pub mod colors {
    use crate::sim::CrewColor;

    pub const BACKGROUND: [f32; 4] = [0.96, 0.96, 0.96, 1.0];
    /// Every dead character, whatever its identity
    pub const DEAD: [f32; 4] = [0.5, 0.5, 0.5, 1.0];
    pub const TASK: [f32; 4] = [0.0, 0.5, 0.0, 1.0];

    pub const fn crew(color: CrewColor) -> [f32; 4] {
        match color {
            CrewColor::Red => [1.0, 0.0, 0.0, 1.0],
            CrewColor::Blue => [0.0, 0.0, 1.0, 1.0],
            CrewColor::Green => [0.0, 0.5, 0.0, 1.0],
            CrewColor::Yellow => [1.0, 1.0, 0.0, 1.0],
            CrewColor::Cyan => [0.0, 1.0, 1.0, 1.0],
            CrewColor::Purple => [0.5, 0.0, 0.5, 1.0],
            CrewColor::Black => [0.0, 0.0, 0.0, 1.0],
        }
    }
}
