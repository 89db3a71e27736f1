//! Vertex-batch surface
//!
//! Collects one frame's triangles in draw order. Alpha blending is left to
//! whatever pipeline consumes the buffer.

use glam::Vec2;

use super::Surface;
use super::shapes;
use super::vertex::{Rgba, Vertex};

/// Segments used to approximate each circle
pub const CIRCLE_SEGMENTS: u32 = 24;

/// A [`Surface`] that records triangles instead of rasterising
#[derive(Debug, Clone, Default)]
pub struct VertexBatch {
    vertices: Vec<Vertex>,
    /// Clear calls since creation
    clears: u64,
}

impl VertexBatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Raw bytes for a vertex buffer upload
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices)
    }

    /// Layout a pipeline needs to consume [`Self::as_bytes`]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        Vertex::layout()
    }

    /// Vertex count read back through the buffer layout
    pub fn uploaded_vertices(&self) -> usize {
        self.as_bytes().len() / Self::layout().array_stride as usize
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    pub fn clears(&self) -> u64 {
        self.clears
    }
}

impl Surface for VertexBatch {
    fn clear(&mut self) {
        self.vertices.clear();
        self.clears += 1;
    }

    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Rgba) {
        self.vertices.extend(shapes::rect(pos, size, color));
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba) {
        self.vertices
            .extend(shapes::circle(center, radius, color, CIRCLE_SEGMENTS));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_batch_accumulates_until_clear() {
        let mut batch = VertexBatch::new();
        batch.fill_rect(Vec2::ZERO, Vec2::ONE, [1.0; 4]);
        batch.fill_circle(Vec2::ZERO, 1.0, [1.0; 4]);
        assert_eq!(batch.triangle_count(), 2 + CIRCLE_SEGMENTS as usize);
        assert_eq!(
            batch.as_bytes().len(),
            batch.vertices().len() * std::mem::size_of::<Vertex>()
        );

        assert_eq!(batch.uploaded_vertices(), batch.vertices().len());

        batch.clear();
        assert!(batch.vertices().is_empty());
        assert_eq!(batch.uploaded_vertices(), 0);
        assert_eq!(batch.clears(), 1);
    }
}
