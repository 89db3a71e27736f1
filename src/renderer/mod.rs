//! Rendering module
//!
//! The render pass draws through the [`Surface`] trait so any host canvas can
//! back it. [`VertexBatch`] is the built-in surface: it tessellates every
//! primitive into colored triangles ready for a GPU vertex buffer.

pub mod batch;
pub mod pass;
pub mod shapes;
pub mod vertex;

pub use batch::VertexBatch;
pub use pass::draw_session;
pub use vertex::{Rgba, Vertex};

use glam::Vec2;

/// Fixed-size 2D drawing target
pub trait Surface {
    /// Wipe the whole surface
    fn clear(&mut self);
    /// Filled axis-aligned rectangle from its top-left corner
    fn fill_rect(&mut self, pos: Vec2, size: Vec2, color: Rgba);
    /// Filled circle
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Rgba);
}
