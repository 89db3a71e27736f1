//! Vertex types for 2D rendering

use bytemuck::{Pod, Zeroable};

/// Straight (non-premultiplied) RGBA, each channel in [0, 1]
pub type Rgba = [f32; 4];

/// Simple 2D vertex with position and color
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 2],
    pub color: Rgba,
}

impl Vertex {
    pub const fn new(x: f32, y: f32, color: Rgba) -> Self {
        Self {
            position: [x, y],
            color,
        }
    }

    /// Position at location 0, color at location 1
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x2, 1 => Float32x4];

    /// Buffer layout matching the `#[repr(C)]` field order
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Colors for game elements
pub mod colors {
    use super::Rgba;

    /// #0095DD, used for balls, paddle and normal bricks
    pub const BALL: Rgba = [0.0, 149.0 / 255.0, 221.0 / 255.0, 1.0];
    pub const PADDLE: Rgba = BALL;
    pub const BRICK_NORMAL: Rgba = BALL;
    pub const BRICK_SPEED: Rgba = [1.0, 0.0, 0.0, 1.0];
    pub const BRICK_SPLIT: Rgba = [0.0, 1.0, 0.0, 1.0];
    pub const BRICK_EXPLOSIVE: Rgba = [1.0, 165.0 / 255.0, 0.0, 1.0];

    /// Same color with a different alpha
    pub fn with_alpha(color: Rgba, alpha: f32) -> Rgba {
        [color[0], color[1], color[2], alpha]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertex_layout_matches_struct() {
        let layout = Vertex::layout();
        assert_eq!(layout.array_stride, 24);
        assert_eq!(layout.attributes.len(), 2);
        assert_eq!(layout.attributes[0].format, wgpu::VertexFormat::Float32x2);
        assert_eq!(layout.attributes[1].offset, 8);
        assert_eq!(layout.attributes[1].shader_location, 1);
    }
}
